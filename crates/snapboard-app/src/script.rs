//! Scripted toolbar sessions.
//!
//! A script is a JSON array of steps, replayed in order:
//!
//! ```json
//! [
//!   {"color": "#ff0000"},
//!   {"click": "shapesBtn"},
//!   {"shape": "Circle"},
//!   {"click": "fillColorBtn"},
//!   {"click": "saveBtn"}
//! ]
//! ```

use crate::error::AppResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Click a toolbar control by element id.
    Click(String),
    /// Pick a color in the color input.
    Color(String),
    /// Pick an entry in the shapes menu by its label.
    Shape(String),
    /// Type into the text box being edited.
    Type(String),
    /// Erase the character before the caret.
    Backspace,
    /// Drag the pointer through these points.
    Stroke(Vec<[f64; 2]>),
    /// Click the canvas at a point.
    Select([f64; 2]),
}

/// Parse a script from JSON.
pub fn parse_script(json: &str) -> AppResult<Vec<Step>> {
    Ok(serde_json::from_str(json)?)
}

/// Load a script file.
pub fn load_script(path: &Path) -> AppResult<Vec<Step>> {
    let json = std::fs::read_to_string(path)?;
    let steps = parse_script(&json)?;
    log::info!("Loaded {} steps from {}", steps.len(), path.display());
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_parse_all_step_kinds() {
        let steps = parse_script(
            r##"[
                {"click": "addTextBtn"},
                {"color": "#00ff00"},
                {"shape": "Ellipse"},
                {"type": "hi"},
                "backspace",
                {"stroke": [[1, 2], [3.5, 4]]},
                {"select": [10, 20]}
            ]"##,
        )
        .unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Click("addTextBtn".to_string()),
                Step::Color("#00ff00".to_string()),
                Step::Shape("Ellipse".to_string()),
                Step::Type("hi".to_string()),
                Step::Backspace,
                Step::Stroke(vec![[1.0, 2.0], [3.5, 4.0]]),
                Step::Select([10.0, 20.0]),
            ]
        );
    }

    #[test]
    fn test_unknown_step_rejected() {
        let err = parse_script(r#"[{"teleport": 1}]"#).unwrap_err();
        assert!(matches!(err, AppError::Script(_)));
    }

    #[test]
    fn test_load_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steps.json");
        std::fs::write(&path, r#"[{"click": "saveBtn"}]"#).unwrap();
        assert_eq!(load_script(&path).unwrap().len(), 1);
    }
}
