//! Application errors.

use snapboard_core::config::ConfigError;
use snapboard_render::RendererError;
use thiserror::Error;

/// Errors surfaced by the application shell.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("Script error: {0}")]
    Script(#[from] serde_json::Error),
    #[error("Unknown control: {0}")]
    UnknownControl(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
