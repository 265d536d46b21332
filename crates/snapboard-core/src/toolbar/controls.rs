//! Declarative wiring from toolbar controls to controller handlers.

use super::ToolbarController;
use crate::surface::DrawingSurface;
use std::collections::HashMap;

/// Toolbar controls, identified by their stable element ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    ColorPicker,
    ColorPalette,
    Shapes,
    ShapesMenu,
    FreeDraw,
    AddText,
    IncreaseFontSize,
    DecreaseFontSize,
    Eraser,
    FillColor,
    DeleteSelected,
    DeleteAll,
    Save,
}

impl ControlId {
    /// Every control, in toolbar order.
    pub const ALL: [ControlId; 13] = [
        ControlId::ColorPicker,
        ControlId::ColorPalette,
        ControlId::Shapes,
        ControlId::ShapesMenu,
        ControlId::FreeDraw,
        ControlId::AddText,
        ControlId::IncreaseFontSize,
        ControlId::DecreaseFontSize,
        ControlId::Eraser,
        ControlId::FillColor,
        ControlId::DeleteSelected,
        ControlId::DeleteAll,
        ControlId::Save,
    ];

    /// Element id of the control in the page.
    pub fn element_id(self) -> &'static str {
        match self {
            ControlId::ColorPicker => "colorPicker",
            ControlId::ColorPalette => "colorPaletteBtn",
            ControlId::Shapes => "shapesBtn",
            ControlId::ShapesMenu => "shapesMenu",
            ControlId::FreeDraw => "freeDrawBtn",
            ControlId::AddText => "addTextBtn",
            ControlId::IncreaseFontSize => "increaseFontSizeBtn",
            ControlId::DecreaseFontSize => "decreaseFontSizeBtn",
            ControlId::Eraser => "eraserBtn",
            ControlId::FillColor => "fillColorBtn",
            ControlId::DeleteSelected => "deleteSelectedBtn",
            ControlId::DeleteAll => "deleteAllBtn",
            ControlId::Save => "saveBtn",
        }
    }

    /// Look up a control by element id.
    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.element_id() == id)
    }
}

/// What happened on a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    Click,
    /// An input's value changed.
    Change(String),
    /// A menu item was picked; carries the item's label.
    MenuItem(String),
}

/// Work the shell has to do after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiEffect {
    #[default]
    None,
    /// Open the platform color picker.
    OpenColorPicker,
    /// Render and deliver the canvas as an image file.
    Export,
}

/// A toolbar handler.
pub type Handler<S> = fn(&mut ToolbarController<S>, &ControlEvent) -> UiEffect;

/// Maps controls to their handlers. Built once at startup.
pub struct ControlTable<S: DrawingSurface> {
    handlers: HashMap<ControlId, Handler<S>>,
}

impl<S: DrawingSurface> ControlTable<S> {
    pub fn builder() -> ControlTableBuilder<S> {
        ControlTableBuilder {
            handlers: HashMap::new(),
        }
    }

    /// The full toolbar wiring.
    pub fn standard() -> Self {
        Self::builder()
            .on(ControlId::ColorPalette, |c, _| c.open_color_picker())
            .on(ControlId::ColorPicker, |c, event| {
                if let ControlEvent::Change(value) = event {
                    c.set_color(value);
                }
                UiEffect::None
            })
            .on(ControlId::Shapes, |c, _| {
                c.toggle_shapes_menu();
                UiEffect::None
            })
            .on(ControlId::ShapesMenu, |c, event| {
                if let ControlEvent::MenuItem(label) = event {
                    c.add_shape(label);
                }
                UiEffect::None
            })
            .on(ControlId::FreeDraw, |c, _| {
                c.toggle_free_draw();
                UiEffect::None
            })
            .on(ControlId::AddText, |c, _| {
                c.add_text();
                UiEffect::None
            })
            .on(ControlId::IncreaseFontSize, |c, _| {
                c.increase_font_size();
                UiEffect::None
            })
            .on(ControlId::DecreaseFontSize, |c, _| {
                c.decrease_font_size();
                UiEffect::None
            })
            .on(ControlId::Eraser, |c, _| {
                c.enable_eraser();
                UiEffect::None
            })
            .on(ControlId::FillColor, |c, _| {
                c.fill_selected();
                UiEffect::None
            })
            .on(ControlId::DeleteSelected, |c, _| {
                c.delete_selected();
                UiEffect::None
            })
            .on(ControlId::DeleteAll, |c, _| {
                c.delete_all();
                UiEffect::None
            })
            .on(ControlId::Save, |c, _| c.save())
            .build()
    }

    /// Run the handler bound to `control`.
    pub fn dispatch(
        &self,
        controller: &mut ToolbarController<S>,
        control: ControlId,
        event: &ControlEvent,
    ) -> UiEffect {
        match self.handlers.get(&control) {
            Some(handler) => handler(controller, event),
            None => {
                log::debug!("No handler bound to {}", control.element_id());
                UiEffect::None
            }
        }
    }

    /// Controls that have a handler.
    pub fn controls(&self) -> impl Iterator<Item = ControlId> + '_ {
        ControlId::ALL
            .into_iter()
            .filter(|c| self.handlers.contains_key(c))
    }

    pub fn is_bound(&self, control: ControlId) -> bool {
        self.handlers.contains_key(&control)
    }
}

/// Builder for [`ControlTable`].
pub struct ControlTableBuilder<S: DrawingSurface> {
    handlers: HashMap<ControlId, Handler<S>>,
}

impl<S: DrawingSurface> ControlTableBuilder<S> {
    /// Bind a handler, replacing any earlier one for the same control.
    pub fn on(mut self, control: ControlId, handler: Handler<S>) -> Self {
        self.handlers.insert(control, handler);
        self
    }

    pub fn build(self) -> ControlTable<S> {
        ControlTable {
            handlers: self.handlers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::config::WhiteboardConfig;
    use crate::shapes::SerializableColor;

    fn setup() -> (ControlTable<Canvas>, ToolbarController<Canvas>) {
        (
            ControlTable::standard(),
            ToolbarController::new(Canvas::default(), WhiteboardConfig::default()),
        )
    }

    #[test]
    fn test_element_ids_roundtrip() {
        for control in ControlId::ALL {
            assert_eq!(ControlId::from_element_id(control.element_id()), Some(control));
        }
        assert_eq!(ControlId::from_element_id("nope"), None);
    }

    #[test]
    fn test_standard_table_binds_every_control() {
        let table = ControlTable::<Canvas>::standard();
        assert_eq!(table.controls().count(), ControlId::ALL.len());
    }

    #[test]
    fn test_dispatch_palette_and_picker() {
        let (table, mut c) = setup();
        let effect = table.dispatch(&mut c, ControlId::ColorPalette, &ControlEvent::Click);
        assert_eq!(effect, UiEffect::OpenColorPicker);

        let effect = table.dispatch(
            &mut c,
            ControlId::ColorPicker,
            &ControlEvent::Change("#0000ff".to_string()),
        );
        assert_eq!(effect, UiEffect::None);
        assert_eq!(c.state().selected_color, SerializableColor::new(0, 0, 255, 255));
    }

    #[test]
    fn test_dispatch_menu_item_uses_label() {
        let (table, mut c) = setup();
        table.dispatch(&mut c, ControlId::Shapes, &ControlEvent::Click);
        assert!(c.state().shapes_menu_visible);

        table.dispatch(
            &mut c,
            ControlId::ShapesMenu,
            &ControlEvent::MenuItem("Hexagon".to_string()),
        );
        assert_eq!(c.surface().object_count(), 1);
        assert!(!c.state().shapes_menu_visible);
    }

    #[test]
    fn test_dispatch_save() {
        let (table, mut c) = setup();
        assert_eq!(
            table.dispatch(&mut c, ControlId::Save, &ControlEvent::Click),
            UiEffect::Export
        );
    }

    #[test]
    fn test_unbound_control_is_noop() {
        let table = ControlTable::<Canvas>::builder()
            .on(ControlId::AddText, |c, _| {
                c.add_text();
                UiEffect::None
            })
            .build();
        let mut c = ToolbarController::new(Canvas::default(), WhiteboardConfig::default());

        assert!(!table.is_bound(ControlId::DeleteAll));
        let effect = table.dispatch(&mut c, ControlId::Save, &ControlEvent::Click);
        assert_eq!(effect, UiEffect::None);

        table.dispatch(&mut c, ControlId::AddText, &ControlEvent::Click);
        assert_eq!(c.surface().object_count(), 1);
    }

    #[test]
    fn test_wrong_event_kind_is_ignored() {
        let (table, mut c) = setup();
        table.dispatch(&mut c, ControlId::ColorPicker, &ControlEvent::Click);
        table.dispatch(&mut c, ControlId::ShapesMenu, &ControlEvent::Click);
        assert_eq!(c.state().selected_color, SerializableColor::black());
        assert_eq!(c.surface().object_count(), 0);
    }
}
