//! Toolbar control reference.

use snapboard_core::toolbar::ControlId;

/// A control and what it does.
#[derive(Debug, Clone)]
pub struct ControlHelp {
    pub control: ControlId,
    pub description: &'static str,
}

impl ControlHelp {
    /// Help for every control, in toolbar order.
    pub fn all() -> Vec<ControlHelp> {
        ControlId::ALL
            .into_iter()
            .map(|control| ControlHelp {
                control,
                description: describe(control),
            })
            .collect()
    }
}

fn describe(control: ControlId) -> &'static str {
    match control {
        ControlId::ColorPicker => "Color input; a change selects the color",
        ControlId::ColorPalette => "Open the color picker",
        ControlId::Shapes => "Show or hide the shapes menu",
        ControlId::ShapesMenu => "Insert the named shape",
        ControlId::FreeDraw => "Toggle freehand drawing",
        ControlId::AddText => "Add a text box and start editing it",
        ControlId::IncreaseFontSize => "Grow the selected text by 2px",
        ControlId::DecreaseFontSize => "Shrink the selected text by 2px",
        ControlId::Eraser => "Paint with the background color",
        ControlId::FillColor => "Fill the selection with the selected color",
        ControlId::DeleteSelected => "Delete the selection",
        ControlId::DeleteAll => "Clear the canvas",
        ControlId::Save => "Save the canvas as Snap.jpg",
    }
}

/// Print the control reference to stdout.
pub fn print_controls() {
    println!("\n=== Toolbar Controls ===");
    for help in ControlHelp::all() {
        println!("  {:22} {}", help.control.element_id(), help.description);
    }
    println!();
}
