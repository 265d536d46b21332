//! Canvas document and in-memory drawing surface.

use crate::brush::Brush;
use crate::shapes::{Freehand, SerializableColor, Shape, ShapeId};
use crate::surface::DrawingSurface;
use kurbo::{Point, Size};
use peniko::Color;
use std::collections::HashMap;

/// Pointer hit-test tolerance in pixels.
pub const HIT_TOLERANCE: f64 = 4.0;

/// Default canvas background (`#333`).
pub const DEFAULT_BACKGROUND: SerializableColor = SerializableColor {
    r: 0x33,
    g: 0x33,
    b: 0x33,
    a: 255,
};

/// The objects on a canvas, keyed by id, plus their stacking order.
#[derive(Debug, Clone, Default)]
pub struct CanvasDocument {
    /// All shapes in the document, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    pub z_order: Vec<ShapeId>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape on top.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.insert(id, shape);
        self.z_order.push(id);
        id
    }

    /// Remove a shape by ID.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&z| z != id);
        self.shapes.remove(&id)
    }

    /// Remove all shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Shapes under a point, topmost first.
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .filter(|id| {
                self.shapes
                    .get(id)
                    .is_some_and(|shape| shape.hit_test(point, tolerance))
            })
            .copied()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// UI state of a shape on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    #[default]
    Normal,
    /// The active object.
    Selected,
    /// The active object, open for in-place text editing.
    Editing,
}

/// In-memory drawing surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The objects on the canvas.
    pub document: CanvasDocument,
    active: Option<ShapeId>,
    editing: Option<ShapeId>,
    background: SerializableColor,
    drawing_mode: bool,
    brush: Brush,
    size: Size,
    /// Stroke being painted while the pointer is down in drawing mode.
    stroke: Option<Freehand>,
    render_requested: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Canvas {
    /// Create an empty canvas of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            document: CanvasDocument::new(),
            active: None,
            editing: None,
            background: DEFAULT_BACKGROUND,
            drawing_mode: false,
            brush: Brush::default(),
            size: Size::new(width, height),
            stroke: None,
            render_requested: false,
        }
    }

    /// Set the canvas size.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Size::new(width, height);
        self.render_requested = true;
    }

    /// Shapes in z-order (back to front).
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.document.shapes_ordered()
    }

    /// Get the shape currently being edited (if any).
    pub fn editing_shape(&self) -> Option<ShapeId> {
        self.editing
    }

    /// Leave in-place text editing. The text stays active.
    pub fn exit_text_editing(&mut self) {
        if self.editing.take().is_some() {
            self.render_requested = true;
        }
    }

    /// UI state for a shape.
    pub fn widget_state(&self, id: ShapeId) -> WidgetState {
        if self.editing == Some(id) {
            WidgetState::Editing
        } else if self.active == Some(id) {
            WidgetState::Selected
        } else {
            WidgetState::Normal
        }
    }

    /// The stroke currently being painted, for live preview.
    pub fn stroke_in_progress(&self) -> Option<&Freehand> {
        self.stroke.as_ref()
    }

    /// Return whether a render was requested since the last call, and reset the request.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    /// Check for a pending render request without clearing it.
    pub fn render_requested(&self) -> bool {
        self.render_requested
    }

    /// Pointer pressed at `point`.
    ///
    /// In drawing mode this starts a stroke with the current brush; otherwise
    /// it activates the topmost object under the pointer, or clears the
    /// selection when nothing is hit. Returns the newly active object.
    pub fn pointer_down(&mut self, point: Point) -> Option<ShapeId> {
        if self.drawing_mode {
            let mut stroke = Freehand::new().with_style(self.brush.stroke_style());
            stroke.add_point(point);
            self.stroke = Some(stroke);
            self.render_requested = true;
            return None;
        }

        match self.document.shapes_at_point(point, HIT_TOLERANCE).first() {
            Some(&id) => {
                if self.editing != Some(id) {
                    self.set_active_object(id);
                }
                Some(id)
            }
            None => {
                self.discard_active_object();
                None
            }
        }
    }

    /// Pointer moved to `point`.
    pub fn pointer_move(&mut self, point: Point) {
        if let Some(stroke) = self.stroke.as_mut() {
            stroke.add_point(point);
            self.render_requested = true;
        }
    }

    /// Pointer released at `point`. Commits the stroke in progress, if any.
    pub fn pointer_up(&mut self, point: Point) -> Option<ShapeId> {
        let mut stroke = self.stroke.take()?;
        if stroke.points.last() != Some(&point) {
            stroke.add_point(point);
        }
        stroke.simplify(0.5);
        let id = self.add_object(Shape::Freehand(stroke));
        log::debug!("Committed freehand stroke {}", id);
        Some(id)
    }

    /// Type text into the text box being edited.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let Some(id) = self.editing else {
            return false;
        };
        match self.document.get_shape_mut(id).and_then(Shape::as_text_mut) {
            Some(t) if t.editable => {
                t.insert_str(text);
                self.render_requested = true;
                true
            }
            _ => false,
        }
    }

    /// Delete the last character of the text box being edited.
    pub fn delete_backward(&mut self) -> bool {
        let Some(id) = self.editing else {
            return false;
        };
        let deleted = self
            .document
            .get_shape_mut(id)
            .and_then(Shape::as_text_mut)
            .is_some_and(|t| t.delete_backward());
        if deleted {
            self.render_requested = true;
        }
        deleted
    }
}

impl DrawingSurface for Canvas {
    fn add_object(&mut self, shape: Shape) -> ShapeId {
        self.render_requested = true;
        self.document.add_shape(shape)
    }

    fn remove_object(&mut self, id: ShapeId) -> Option<Shape> {
        if self.active == Some(id) {
            self.active = None;
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
        let removed = self.document.remove_shape(id);
        if removed.is_some() {
            self.render_requested = true;
        }
        removed
    }

    fn object_ids(&self) -> Vec<ShapeId> {
        self.document.z_order.clone()
    }

    fn object(&self, id: ShapeId) -> Option<&Shape> {
        self.document.get_shape(id)
    }

    fn object_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.document.get_shape_mut(id)
    }

    fn active_object(&self) -> Option<ShapeId> {
        self.active
    }

    fn set_active_object(&mut self, id: ShapeId) {
        if self.document.get_shape(id).is_none() {
            return;
        }
        if self.editing != Some(id) {
            self.editing = None;
        }
        self.active = Some(id);
        self.render_requested = true;
    }

    fn discard_active_object(&mut self) {
        if self.active.take().is_some() {
            self.editing = None;
            self.render_requested = true;
        }
    }

    fn enter_text_editing(&mut self, id: ShapeId) {
        let editable = self
            .document
            .get_shape(id)
            .and_then(Shape::as_text)
            .is_some_and(|t| t.editable);
        if !editable {
            return;
        }
        self.active = Some(id);
        self.editing = Some(id);
        self.render_requested = true;
    }

    fn background_color(&self) -> Color {
        self.background.into()
    }

    fn set_background_color(&mut self, color: Color) {
        self.background = color.into();
        self.render_requested = true;
    }

    fn is_drawing_mode(&self) -> bool {
        self.drawing_mode
    }

    fn set_drawing_mode(&mut self, on: bool) {
        self.drawing_mode = on;
        if on {
            self.editing = None;
        } else {
            self.stroke = None;
        }
    }

    fn brush(&self) -> &Brush {
        &self.brush
    }

    fn brush_mut(&mut self) -> &mut Brush {
        &mut self.brush
    }

    fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    fn size(&self) -> Size {
        self.size
    }

    fn request_render(&mut self) {
        self.render_requested = true;
    }

    fn clear_objects(&mut self) {
        self.active = None;
        self.editing = None;
        if !self.document.is_empty() {
            self.render_requested = true;
        }
        self.document.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rectangle, SerializableColor, ShapeStyle, ShapeTrait, Text};

    fn filled_rect(x: f64, y: f64) -> Shape {
        let mut rect = Rectangle::new(Point::new(x, y), 100.0, 100.0);
        rect.style = ShapeStyle {
            fill_color: Some(SerializableColor::black()),
            ..ShapeStyle::default()
        };
        Shape::Rectangle(rect)
    }

    #[test]
    fn test_document_add_remove() {
        let mut doc = CanvasDocument::new();
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        let id = rect.id();

        doc.add_shape(Shape::Rectangle(rect));
        assert_eq!(doc.len(), 1);
        assert!(doc.get_shape(id).is_some());

        assert!(doc.remove_shape(id).is_some());
        assert!(doc.is_empty());
        assert!(doc.z_order.is_empty());
    }

    #[test]
    fn test_shapes_at_point_topmost_first() {
        let mut doc = CanvasDocument::new();
        let id1 = doc.add_shape(filled_rect(0.0, 0.0));
        let id2 = doc.add_shape(filled_rect(50.0, 50.0));

        let hits = doc.shapes_at_point(Point::new(75.0, 75.0), 0.0);
        assert_eq!(hits, vec![id2, id1]);
    }

    #[test]
    fn test_removing_active_discards_selection() {
        let mut canvas = Canvas::default();
        let id = canvas.add_object(filled_rect(0.0, 0.0));
        canvas.set_active_object(id);
        assert_eq!(canvas.active_object(), Some(id));

        canvas.remove_object(id);
        assert_eq!(canvas.active_object(), None);
    }

    #[test]
    fn test_set_active_ignores_unknown_id() {
        let mut canvas = Canvas::default();
        canvas.set_active_object(uuid::Uuid::new_v4());
        assert_eq!(canvas.active_object(), None);
    }

    #[test]
    fn test_text_editing_follows_selection() {
        let mut canvas = Canvas::default();
        let text = Text::new(Point::new(0.0, 0.0), String::new());
        let text_id = canvas.add_object(Shape::Text(text));
        let rect_id = canvas.add_object(filled_rect(300.0, 300.0));

        canvas.enter_text_editing(text_id);
        assert_eq!(canvas.widget_state(text_id), WidgetState::Editing);
        assert!(canvas.insert_text("hi"));

        canvas.set_active_object(rect_id);
        assert_eq!(canvas.editing_shape(), None);
        assert_eq!(canvas.widget_state(rect_id), WidgetState::Selected);
        assert!(!canvas.insert_text("ignored"));

        let text = canvas.object(text_id).and_then(Shape::as_text).unwrap();
        assert_eq!(text.content(), "hi");
    }

    #[test]
    fn test_enter_text_editing_rejects_non_text() {
        let mut canvas = Canvas::default();
        let id = canvas.add_object(filled_rect(0.0, 0.0));
        canvas.enter_text_editing(id);
        assert_eq!(canvas.editing_shape(), None);
        assert_eq!(canvas.active_object(), None);
    }

    #[test]
    fn test_pointer_selects_topmost() {
        let mut canvas = Canvas::default();
        let _below = canvas.add_object(filled_rect(0.0, 0.0));
        let above = canvas.add_object(filled_rect(50.0, 50.0));

        assert_eq!(canvas.pointer_down(Point::new(75.0, 75.0)), Some(above));
        assert_eq!(canvas.active_object(), Some(above));

        assert_eq!(canvas.pointer_down(Point::new(500.0, 500.0)), None);
        assert_eq!(canvas.active_object(), None);
    }

    #[test]
    fn test_pointer_paints_stroke_in_drawing_mode() {
        let mut canvas = Canvas::default();
        canvas.set_drawing_mode(true);
        canvas.set_brush(Brush::new(Color::from_rgba8(255, 0, 0, 255), 5.0));

        canvas.pointer_down(Point::new(10.0, 10.0));
        canvas.pointer_move(Point::new(20.0, 15.0));
        canvas.pointer_move(Point::new(30.0, 40.0));
        assert!(canvas.stroke_in_progress().is_some());
        let id = canvas.pointer_up(Point::new(40.0, 10.0)).unwrap();

        assert!(canvas.stroke_in_progress().is_none());
        assert_eq!(canvas.object_count(), 1);
        let style = canvas.object(id).unwrap().style();
        assert_eq!(style.stroke_color, SerializableColor::new(255, 0, 0, 255));
        assert!((style.stroke_width - 5.0).abs() < f64::EPSILON);
        assert!(style.fill_color.is_none());
    }

    #[test]
    fn test_pointer_up_without_stroke_is_noop() {
        let mut canvas = Canvas::default();
        assert!(canvas.pointer_up(Point::new(1.0, 1.0)).is_none());
        assert_eq!(canvas.object_count(), 0);
    }

    #[test]
    fn test_clear_objects_keeps_background() {
        let mut canvas = Canvas::default();
        let id = canvas.add_object(filled_rect(0.0, 0.0));
        canvas.set_active_object(id);
        canvas.take_render_request();

        canvas.clear_objects();
        assert_eq!(canvas.object_count(), 0);
        assert_eq!(canvas.active_object(), None);
        assert_eq!(
            SerializableColor::from(canvas.background_color()),
            DEFAULT_BACKGROUND
        );
        assert!(canvas.take_render_request());
        assert!(!canvas.take_render_request());
    }
}
