//! Whiteboard configuration.

use crate::brush::{ERASER_WIDTH, PENCIL_WIDTH};
use crate::color::parse_color;
use crate::shapes::Text;
use kurbo::Point;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunable defaults for the whiteboard. Every key is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteboardConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// CSS color of the canvas background.
    pub background_color: String,
    /// Font family given to new text boxes.
    pub font_family: String,
    /// Initial font size for new text boxes.
    pub font_size: f64,
    /// Where new text boxes are placed.
    pub text_origin: [f64; 2],
    /// New text boxes span the canvas width minus this margin.
    pub text_margin: f64,
    /// Top-left corner for inserted shapes.
    pub shape_origin: [f64; 2],
    pub pencil_width: f64,
    pub eraser_width: f64,
    /// File name offered for exported images.
    pub export_filename: String,
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
}

impl Default for WhiteboardConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            background_color: "#333".to_string(),
            font_family: "Hell0".to_string(),
            font_size: Text::DEFAULT_FONT_SIZE,
            text_origin: [25.0, 25.0],
            text_margin: 20.0,
            shape_origin: [100.0, 100.0],
            pencil_width: PENCIL_WIDTH,
            eraser_width: ERASER_WIDTH,
            export_filename: "Snap.jpg".to_string(),
            jpeg_quality: 92,
        }
    }
}

impl WhiteboardConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        self.background()?;
        Ok(())
    }

    /// The background color.
    pub fn background(&self) -> ConfigResult<Color> {
        parse_color(&self.background_color)
            .ok_or_else(|| ConfigError::InvalidColor(self.background_color.clone()))
    }

    pub fn text_origin(&self) -> Point {
        Point::new(self.text_origin[0], self.text_origin[1])
    }

    pub fn shape_origin(&self) -> Point {
        Point::new(self.shape_origin[0], self.shape_origin[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WhiteboardConfig::default();
        assert_eq!(config.export_filename, "Snap.jpg");
        assert_eq!(config.font_family, "Hell0");
        assert!((config.font_size - 20.0).abs() < f64::EPSILON);
        let bg = config.background().unwrap().to_rgba8();
        assert_eq!((bg.r, bg.g, bg.b, bg.a), (0x33, 0x33, 0x33, 255));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r##"{"canvas_width": 1024, "background_color": "#ffffff"}"##;
        let config = WhiteboardConfig::from_json(json).unwrap();
        assert!((config.canvas_width - 1024.0).abs() < f64::EPSILON);
        assert!((config.canvas_height - 600.0).abs() < f64::EPSILON);
        assert_eq!(config.jpeg_quality, 92);
    }

    #[test]
    fn test_invalid_background_rejected() {
        let err = WhiteboardConfig::from_json(r#"{"background_color": "chartreuse"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = WhiteboardConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"font_family": "Noto Sans", "text_origin": [10, 12]}}"#).unwrap();

        let config = WhiteboardConfig::load(file.path()).unwrap();
        assert_eq!(config.font_family, "Noto Sans");
        assert_eq!(config.text_origin(), Point::new(10.0, 12.0));
    }

    #[test]
    fn test_load_missing_file() {
        let err = WhiteboardConfig::load(Path::new("/nonexistent/snapboard.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
