//! Free-drawing brush.

use crate::shapes::{SerializableColor, ShapeStyle};
use peniko::Color;

/// Brush width used by the pencil.
pub const PENCIL_WIDTH: f64 = 5.0;
/// Brush width used by the eraser.
pub const ERASER_WIDTH: f64 = 20.0;

/// The brush that paints freehand strokes while the surface is in drawing mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: SerializableColor,
    pub width: f64,
}

impl Brush {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }

    /// Stroke style for a freehand shape painted with this brush.
    pub fn stroke_style(&self) -> ShapeStyle {
        ShapeStyle {
            stroke_color: self.color,
            stroke_width: self.width,
            fill_color: None,
        }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            width: 1.0,
        }
    }
}
