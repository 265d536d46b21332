//! Snapboard Render Library
//!
//! Renderer abstraction, the tiny-skia software rasterizer and JPEG snapshot
//! export.

pub mod export;
mod renderer;
pub mod skia;

pub use export::{ExportOptions, ExportedImage, PendingExport, begin_export};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use skia::{SkiaRenderer, to_rgba8};
pub use tiny_skia::Pixmap;
