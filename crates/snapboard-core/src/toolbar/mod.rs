//! Toolbar controller: turns toolbar actions into drawing-surface mutations.
//!
//! Handlers never fail. When a precondition is not met (no active object,
//! wrong object type, unknown shape name) they do nothing.

mod controls;

pub use controls::{ControlEvent, ControlId, ControlTable, ControlTableBuilder, Handler, UiEffect};

use crate::brush::Brush;
use crate::color::parse_color;
use crate::config::WhiteboardConfig;
use crate::shapes::{
    Circle, Ellipse, Polygon, Rectangle, SerializableColor, Shape, ShapeId, ShapeStyle, Text,
    TextAlign, Triangle,
};
use crate::surface::DrawingSurface;
use std::str::FromStr;
use thiserror::Error;

/// Font size change per click.
pub const FONT_SIZE_STEP: f64 = 2.0;
/// Smallest font size reachable with the decrease button.
pub const MIN_FONT_SIZE: f64 = 2.0;

/// Toolbar state shared by all handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    /// Color used for new shapes, text, the pencil and fills.
    pub selected_color: SerializableColor,
    /// Font size for new text boxes and font-size buttons.
    pub font_size: f64,
    pub shapes_menu_visible: bool,
    pub color_picker_open: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            selected_color: SerializableColor::black(),
            font_size: Text::DEFAULT_FONT_SIZE,
            shapes_menu_visible: false,
            color_picker_open: false,
        }
    }
}

/// Shapes offered by the shapes menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertableShape {
    Rectangle,
    Circle,
    Triangle,
    Hexagon,
    Ellipse,
}

impl InsertableShape {
    /// Every menu entry, in menu order.
    pub const ALL: [InsertableShape; 5] = [
        InsertableShape::Rectangle,
        InsertableShape::Circle,
        InsertableShape::Triangle,
        InsertableShape::Hexagon,
        InsertableShape::Ellipse,
    ];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            InsertableShape::Rectangle => "Rectangle",
            InsertableShape::Circle => "Circle",
            InsertableShape::Triangle => "Triangle",
            InsertableShape::Hexagon => "Hexagon",
            InsertableShape::Ellipse => "Ellipse",
        }
    }

    /// Build the shape with its default geometry.
    fn build(self, config: &WhiteboardConfig, style: ShapeStyle) -> Shape {
        let origin = config.shape_origin();
        match self {
            InsertableShape::Rectangle => {
                Shape::Rectangle(Rectangle::new(origin, 100.0, 100.0).with_style(style))
            }
            InsertableShape::Circle => {
                Shape::Circle(Circle::from_top_left(origin, 50.0).with_style(style))
            }
            InsertableShape::Triangle => {
                Shape::Triangle(Triangle::new(origin, 100.0, 100.0).with_style(style))
            }
            InsertableShape::Hexagon => Shape::Polygon(Polygon::hexagon(origin).with_style(style)),
            InsertableShape::Ellipse => {
                Shape::Ellipse(Ellipse::from_top_left(origin, 50.0, 30.0).with_style(style))
            }
        }
    }
}

/// A shape name that is not on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown shape: {0}")]
pub struct UnknownShape(pub String);

impl FromStr for InsertableShape {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" => Ok(InsertableShape::Rectangle),
            "circle" => Ok(InsertableShape::Circle),
            "triangle" => Ok(InsertableShape::Triangle),
            "hexagon" => Ok(InsertableShape::Hexagon),
            "ellipse" => Ok(InsertableShape::Ellipse),
            _ => Err(UnknownShape(s.to_string())),
        }
    }
}

/// Binds toolbar actions to a drawing surface.
#[derive(Debug)]
pub struct ToolbarController<S: DrawingSurface> {
    state: ToolState,
    surface: S,
    config: WhiteboardConfig,
}

impl<S: DrawingSurface> ToolbarController<S> {
    /// Create a controller and paint the configured background.
    pub fn new(mut surface: S, config: WhiteboardConfig) -> Self {
        match config.background() {
            Ok(color) => surface.set_background_color(color),
            Err(e) => log::warn!("Keeping surface background: {}", e),
        }
        let state = ToolState {
            font_size: config.font_size,
            ..ToolState::default()
        };
        Self {
            state,
            surface,
            config,
        }
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &WhiteboardConfig {
        &self.config
    }

    /// Palette button: open the native color picker.
    ///
    /// A picker dismissed without a choice sends no change, so every click
    /// opens it again.
    pub fn open_color_picker(&mut self) -> UiEffect {
        self.state.color_picker_open = true;
        UiEffect::OpenColorPicker
    }

    /// Color picker changed: remember the picked color.
    pub fn set_color(&mut self, value: &str) {
        self.state.color_picker_open = false;
        match parse_color(value) {
            Some(color) => self.state.selected_color = color.into(),
            None => log::debug!("Ignoring unreadable color {:?}", value),
        }
    }

    /// Show or hide the shapes menu.
    pub fn toggle_shapes_menu(&mut self) {
        self.state.shapes_menu_visible = !self.state.shapes_menu_visible;
    }

    /// Toggle freehand drawing. Entering loads the pencil in the selected color.
    pub fn toggle_free_draw(&mut self) {
        let on = !self.surface.is_drawing_mode();
        self.surface.set_drawing_mode(on);
        if on {
            let brush = self.surface.brush_mut();
            brush.color = self.state.selected_color;
            brush.width = self.config.pencil_width;
        }
    }

    /// Add an empty text box, select it and open it for editing.
    pub fn add_text(&mut self) -> ShapeId {
        let width = self.surface.size().width - self.config.text_margin;
        let mut text = Text::new(self.config.text_origin(), String::new())
            .with_font_size(self.state.font_size)
            .with_font_family(self.config.font_family.clone())
            .with_width(width);
        text.text_align = TextAlign::Left;
        text.split_by_grapheme = true;
        text.editable = true;
        text.style.fill_color = Some(self.state.selected_color);

        let id = self.surface.add_object(Shape::Text(text));
        self.surface.set_active_object(id);
        self.surface.enter_text_editing(id);
        id
    }

    /// Grow the font of the active text box.
    pub fn increase_font_size(&mut self) {
        self.adjust_font_size(|size| size + FONT_SIZE_STEP);
    }

    /// Shrink the font of the active text box, never below the minimum.
    pub fn decrease_font_size(&mut self) {
        self.adjust_font_size(|size| (size - FONT_SIZE_STEP).max(MIN_FONT_SIZE));
    }

    fn adjust_font_size(&mut self, step: impl FnOnce(f64) -> f64) {
        let Some(text) = self.surface.active_shape_mut().and_then(Shape::as_text_mut) else {
            log::debug!("Font size unchanged: no active text box");
            return;
        };
        self.state.font_size = step(self.state.font_size);
        text.font_size = self.state.font_size;
        self.surface.request_render();
    }

    /// Insert a shape by menu name and close the menu.
    ///
    /// The new shape becomes the active object. Unknown names insert nothing.
    pub fn add_shape(&mut self, name: &str) -> Option<ShapeId> {
        let inserted = match name.parse::<InsertableShape>() {
            Ok(kind) => {
                let style = ShapeStyle::outline(self.state.selected_color.into());
                let id = self.surface.add_object(kind.build(&self.config, style));
                self.surface.set_active_object(id);
                Some(id)
            }
            Err(e) => {
                log::debug!("{}", e);
                None
            }
        };
        self.state.shapes_menu_visible = false;
        inserted
    }

    /// Switch to a background-colored brush so strokes paint over content.
    pub fn enable_eraser(&mut self) {
        if self.surface.is_drawing_mode() {
            self.surface.set_drawing_mode(false);
            self.surface.request_render();
        }
        let eraser = Brush::new(self.surface.background_color(), self.config.eraser_width);
        self.surface.set_brush(eraser);
        self.surface.set_drawing_mode(true);
    }

    /// Fill the active object with the selected color.
    pub fn fill_selected(&mut self) {
        let color = self.state.selected_color;
        let Some(shape) = self.surface.active_shape_mut() else {
            log::debug!("Fill skipped: nothing selected");
            return;
        };
        shape.style_mut().fill_color = Some(color);
        self.surface.request_render();
    }

    /// Remove the active object.
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.surface.active_object() {
            self.surface.remove_object(id);
        }
    }

    /// Remove every object. The background stays.
    pub fn delete_all(&mut self) {
        self.surface.clear_objects();
        self.surface.request_render();
    }

    /// Ask the shell to export the canvas.
    pub fn save(&mut self) -> UiEffect {
        UiEffect::Export
    }
}
