//! Snapboard Core Library
//!
//! Platform-agnostic whiteboard model: shapes, the drawing surface and the
//! toolbar controller that drives it.

pub mod brush;
pub mod canvas;
pub mod color;
pub mod config;
pub mod shapes;
pub mod surface;
pub mod toolbar;

pub use brush::Brush;
pub use canvas::{Canvas, CanvasDocument, WidgetState};
pub use config::{ConfigError, ConfigResult, WhiteboardConfig};
pub use surface::DrawingSurface;
pub use toolbar::{
    ControlEvent, ControlId, ControlTable, InsertableShape, ToolState, ToolbarController,
    UiEffect,
};
