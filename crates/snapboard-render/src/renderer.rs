//! Renderer trait abstraction.

use kurbo::Size;
use peniko::Color;
use snapboard_core::canvas::Canvas;
use snapboard_core::surface::DrawingSurface;
use thiserror::Error;
use tiny_skia::Pixmap;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Encode failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Output size in pixels.
    pub size: Size,
    /// Background color. `None` leaves the frame transparent.
    pub background: Option<Color>,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Whether to outline the active object.
    pub show_selection: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a context for an on-screen frame of the whole canvas.
    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            size: canvas.size(),
            background: Some(canvas.background_color()),
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            show_selection: true,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Option<Color>) -> Self {
        self.background = color;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// Show or hide the selection outline.
    pub fn with_selection(mut self, show: bool) -> Self {
        self.show_selection = show;
        self
    }

    /// Pixel dimensions of the frame.
    pub fn pixel_size(&self) -> RenderResult<(u32, u32)> {
        let (w, h) = (self.size.width.round(), self.size.height.round());
        if !(w >= 1.0 && h >= 1.0 && w <= u32::MAX as f64 && h <= u32::MAX as f64) {
            return Err(RendererError::InvalidSize {
                width: self.size.width,
                height: self.size.height,
            });
        }
        Ok((w as u32, h as u32))
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Rasterize a frame.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<Pixmap>;
}
