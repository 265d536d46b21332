//! The drawing-surface capability the toolbar drives.

use crate::brush::Brush;
use crate::shapes::{Shape, ShapeId};
use kurbo::Size;
use peniko::Color;

/// A stateful canvas holding visual objects and render state.
///
/// The toolbar only talks to the canvas through this trait, so any
/// rendering backend that can provide these operations can sit behind it.
/// Implementations must keep at most one active object, and the active
/// object must always be present on the surface.
pub trait DrawingSurface {
    /// Add an object on top of the existing ones.
    fn add_object(&mut self, shape: Shape) -> ShapeId;

    /// Remove an object. Discards the selection if it was active.
    fn remove_object(&mut self, id: ShapeId) -> Option<Shape>;

    /// Object ids in back-to-front order.
    fn object_ids(&self) -> Vec<ShapeId>;

    fn object(&self, id: ShapeId) -> Option<&Shape>;

    fn object_mut(&mut self, id: ShapeId) -> Option<&mut Shape>;

    /// The active (selected) object, if any.
    fn active_object(&self) -> Option<ShapeId>;

    /// Make an object active. Ignored for ids not on the surface.
    fn set_active_object(&mut self, id: ShapeId);

    /// Clear the selection.
    fn discard_active_object(&mut self);

    /// Activate a text object and open it for in-place editing.
    fn enter_text_editing(&mut self, id: ShapeId);

    fn background_color(&self) -> Color;

    fn set_background_color(&mut self, color: Color);

    fn is_drawing_mode(&self) -> bool;

    fn set_drawing_mode(&mut self, on: bool);

    fn brush(&self) -> &Brush;

    fn brush_mut(&mut self) -> &mut Brush;

    /// Replace the free-drawing brush.
    fn set_brush(&mut self, brush: Brush);

    /// Size of the surface in pixels.
    fn size(&self) -> Size;

    /// Ask the shell to re-render.
    fn request_render(&mut self);

    /// Number of objects on the surface.
    fn object_count(&self) -> usize {
        self.object_ids().len()
    }

    /// The active object itself.
    fn active_shape(&self) -> Option<&Shape> {
        self.active_object().and_then(|id| self.object(id))
    }

    /// Mutable access to the active object.
    fn active_shape_mut(&mut self) -> Option<&mut Shape> {
        let id = self.active_object()?;
        self.object_mut(id)
    }

    /// Remove every object.
    fn clear_objects(&mut self) {
        for id in self.object_ids() {
            self.remove_object(id);
        }
    }
}
