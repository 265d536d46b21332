//! A whiteboard session: controller, control table, renderer and the
//! snapshots produced so far.

use crate::error::{AppError, AppResult};
use crate::script::Step;
use kurbo::Point;
use snapboard_core::canvas::Canvas;
use snapboard_core::config::WhiteboardConfig;
use snapboard_core::toolbar::{ControlEvent, ControlId, ControlTable, ToolbarController, UiEffect};
use snapboard_render::{
    ExportOptions, ExportedImage, PendingExport, Pixmap, RenderContext, RenderResult, Renderer,
    SkiaRenderer, begin_export,
};
use std::path::{Path, PathBuf};

pub struct Session {
    controller: ToolbarController<Canvas>,
    controls: ControlTable<Canvas>,
    renderer: SkiaRenderer,
    export_options: ExportOptions,
    exports: Vec<ExportedImage>,
}

impl Session {
    /// Start a session on an empty canvas sized by the config.
    pub fn new(config: WhiteboardConfig) -> Self {
        let canvas = Canvas::new(config.canvas_width, config.canvas_height);
        let export_options = ExportOptions::from_config(&config);
        Self {
            controller: ToolbarController::new(canvas, config),
            controls: ControlTable::standard(),
            renderer: SkiaRenderer::new(),
            export_options,
            exports: Vec::new(),
        }
    }

    pub fn controller(&self) -> &ToolbarController<Canvas> {
        &self.controller
    }

    pub fn canvas(&self) -> &Canvas {
        self.controller.surface()
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        self.controller.surface_mut()
    }

    /// Route a control event to its handler. The caller carries out the effect.
    pub fn dispatch(&mut self, control: ControlId, event: ControlEvent) -> UiEffect {
        log::debug!("{} <- {:?}", control.element_id(), event);
        self.controls.dispatch(&mut self.controller, control, &event)
    }

    /// Render the on-screen frame, selection included.
    pub fn render_frame(&mut self) -> RenderResult<Pixmap> {
        let ctx = RenderContext::new(self.controller.surface());
        self.renderer.render(&ctx)
    }

    /// Rasterize the canvas for a snapshot.
    pub fn begin_export(&mut self) -> RenderResult<PendingExport> {
        begin_export(
            self.controller.surface(),
            &mut self.renderer,
            &self.export_options,
        )
    }

    /// Snapshots taken so far, oldest first.
    pub fn exports(&self) -> &[ExportedImage] {
        &self.exports
    }

    /// Replay one step, finishing any export it triggers right away.
    pub fn apply(&mut self, step: &Step) -> AppResult<()> {
        let effect = match step {
            Step::Click(id) => {
                let control = ControlId::from_element_id(id)
                    .ok_or_else(|| AppError::UnknownControl(id.clone()))?;
                self.dispatch(control, ControlEvent::Click)
            }
            Step::Color(value) => {
                self.dispatch(ControlId::ColorPicker, ControlEvent::Change(value.clone()))
            }
            Step::Shape(label) => self.dispatch(
                ControlId::ShapesMenu,
                ControlEvent::MenuItem(label.to_lowercase()),
            ),
            Step::Type(text) => {
                if !self.canvas_mut().insert_text(text) {
                    log::warn!("Typed text dropped: no text box is being edited");
                }
                UiEffect::None
            }
            Step::Backspace => {
                self.canvas_mut().delete_backward();
                UiEffect::None
            }
            Step::Stroke(points) => {
                self.drag(points);
                UiEffect::None
            }
            Step::Select([x, y]) => {
                let point = Point::new(*x, *y);
                let canvas = self.canvas_mut();
                canvas.pointer_down(point);
                canvas.pointer_up(point);
                UiEffect::None
            }
        };
        self.handle_effect(effect)
    }

    /// Replay steps in order, stopping at the first error.
    pub fn run(&mut self, steps: &[Step]) -> AppResult<()> {
        for (i, step) in steps.iter().enumerate() {
            log::trace!("Step {}: {:?}", i, step);
            self.apply(step)?;
        }
        Ok(())
    }

    fn drag(&mut self, points: &[[f64; 2]]) {
        let mut points = points.iter().map(|&[x, y]| Point::new(x, y));
        let Some(first) = points.next() else {
            return;
        };
        let canvas = self.canvas_mut();
        canvas.pointer_down(first);
        let mut last = first;
        for point in points {
            canvas.pointer_move(point);
            last = point;
        }
        canvas.pointer_up(last);
    }

    fn handle_effect(&mut self, effect: UiEffect) -> AppResult<()> {
        match effect {
            UiEffect::None => {}
            UiEffect::OpenColorPicker => {
                log::info!("Color picker requested; use a color step to pick a color");
            }
            UiEffect::Export => {
                let image = self.begin_export()?.finish()?;
                self.exports.push(image);
            }
        }
        Ok(())
    }

    /// Write every snapshot into `dir`. Repeated names get a numeric suffix.
    pub fn write_exports(&self, dir: &Path) -> AppResult<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.exports.len());
        for (i, image) in self.exports.iter().enumerate() {
            let path = dir.join(numbered_name(&image.filename, i));
            std::fs::write(&path, &image.bytes)?;
            log::info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

/// `Snap.jpg`, `Snap-2.jpg`, `Snap-3.jpg`, ...
fn numbered_name(filename: &str, index: usize) -> String {
    if index == 0 {
        return filename.to_string();
    }
    match filename.rsplit_once('.') {
        Some((stem, ext)) => format!("{}-{}.{}", stem, index + 1, ext),
        None => format!("{}-{}", filename, index + 1),
    }
}
