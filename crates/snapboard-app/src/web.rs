//! WebAssembly entry point and DOM wiring.

use crate::session::Session;
use snapboard_core::config::WhiteboardConfig;
use snapboard_core::toolbar::{ControlEvent, ControlId, UiEffect};
use snapboard_render::{ExportedImage, to_rgba8};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlInputElement,
    ImageData, KeyboardEvent, MouseEvent,
};

/// Id of the drawing `<canvas>` element.
const CANVAS_ID: &str = "canvas";

/// DOM handles the shell writes to.
struct View {
    context: CanvasRenderingContext2d,
    shapes_menu: Option<HtmlElement>,
    color_input: Option<HtmlInputElement>,
}

struct WebApp {
    session: Session,
    view: View,
}

type Shared = Rc<RefCell<WebApp>>;

impl WebApp {
    /// Push controller state to the page and redraw the canvas.
    fn sync(&mut self) {
        if let Some(menu) = &self.view.shapes_menu {
            let display = if self.session.controller().state().shapes_menu_visible {
                "block"
            } else {
                "none"
            };
            menu.style().set_property("display", display).ok();
        }
        self.session.canvas_mut().take_render_request();
        self.repaint();
    }

    fn repaint(&mut self) {
        let pixmap = match self.session.render_frame() {
            Ok(pixmap) => pixmap,
            Err(e) => {
                log::error!("Render failed: {}", e);
                return;
            }
        };
        let rgba = to_rgba8(&pixmap);
        let result = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(rgba.as_slice()),
            pixmap.width(),
            pixmap.height(),
        )
        .and_then(|data| self.view.context.put_image_data(&data, 0.0, 0.0));
        if let Err(e) = result {
            log::error!("Failed to paint canvas: {:?}", e);
        }
    }
}

/// Run a control event and carry out its effect.
fn handle(app: &Shared, control: ControlId, event: ControlEvent) {
    let effect = app.borrow_mut().session.dispatch(control, event);
    match effect {
        UiEffect::None => {}
        UiEffect::OpenColorPicker => {
            if let Some(input) = &app.borrow().view.color_input {
                input.click();
            }
        }
        UiEffect::Export => {
            let pending = app.borrow_mut().session.begin_export();
            match pending {
                Ok(pending) => wasm_bindgen_futures::spawn_local(async move {
                    pending.on_complete(|result| match result {
                        Ok(image) => download(&image),
                        Err(e) => log::error!("Export failed: {}", e),
                    });
                }),
                Err(e) => log::error!("Export failed: {}", e),
            }
        }
    }
    app.borrow_mut().sync();
}

/// Trigger a browser download of an exported image.
fn download(image: &ExportedImage) {
    if let Err(e) = try_download(image) {
        log::error!("Download failed: {:?}", e);
    }
}

fn try_download(image: &ExportedImage) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let uint8_array = js_sys::Uint8Array::from(image.bytes.as_slice());
    let blob_parts = js_sys::Array::new();
    blob_parts.push(&uint8_array);

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(image.mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let a = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()?;
    a.set_href(&url);
    a.set_download(&image.filename);
    a.click();

    web_sys::Url::revoke_object_url(&url).ok();
    log::info!("Downloaded {} ({} bytes)", image.filename, image.bytes.len());
    Ok(())
}

fn listen<E, F>(target: &web_sys::EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Attach one listener per toolbar control.
fn wire_toolbar(app: &Shared, document: &Document) -> Result<(), JsValue> {
    for control in ControlId::ALL {
        let Some(element) = document.get_element_by_id(control.element_id()) else {
            log::warn!("Control #{} not found", control.element_id());
            continue;
        };
        match control {
            ControlId::ColorPicker => {
                let input = element.dyn_into::<HtmlInputElement>()?;
                let target = input.clone();
                let app = app.clone();
                listen(&target, "change", move |_: web_sys::Event| {
                    handle(&app, control, ControlEvent::Change(input.value()));
                })?;
            }
            ControlId::ShapesMenu => {
                let items = element.query_selector_all("button")?;
                for i in 0..items.length() {
                    let Some(item) = items.get(i) else { continue };
                    let label = item.text_content().unwrap_or_default().to_lowercase();
                    let app = app.clone();
                    listen(&item, "click", move |_: MouseEvent| {
                        handle(&app, control, ControlEvent::MenuItem(label.clone()));
                    })?;
                }
            }
            _ => {
                let app = app.clone();
                listen(&element, "click", move |_: MouseEvent| {
                    handle(&app, control, ControlEvent::Click);
                })?;
            }
        }
    }
    Ok(())
}

/// Forward pointer input on the drawing canvas.
fn wire_pointer(app: &Shared, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let point = |e: &MouseEvent| kurbo::Point::new(e.offset_x() as f64, e.offset_y() as f64);

    let down = app.clone();
    listen(canvas, "mousedown", move |e: MouseEvent| {
        let mut app = down.borrow_mut();
        app.session.canvas_mut().pointer_down(point(&e));
        app.sync();
    })?;

    let moved = app.clone();
    listen(canvas, "mousemove", move |e: MouseEvent| {
        let mut app = moved.borrow_mut();
        app.session.canvas_mut().pointer_move(point(&e));
        if app.session.canvas_mut().take_render_request() {
            app.repaint();
        }
    })?;

    let up = app.clone();
    listen(canvas, "mouseup", move |e: MouseEvent| {
        let mut app = up.borrow_mut();
        app.session.canvas_mut().pointer_up(point(&e));
        app.sync();
    })?;
    Ok(())
}

/// Typing goes to the text box being edited.
fn wire_keyboard(app: &Shared, document: &Document) -> Result<(), JsValue> {
    let app = app.clone();
    listen(document, "keydown", move |e: KeyboardEvent| {
        let mut app = app.borrow_mut();
        let canvas = app.session.canvas_mut();
        if canvas.editing_shape().is_none() || e.ctrl_key() || e.meta_key() {
            return;
        }
        let key = e.key();
        let handled = match key.as_str() {
            "Backspace" => canvas.delete_backward(),
            "Enter" => canvas.insert_text("\n"),
            "Escape" => {
                canvas.exit_text_editing();
                true
            }
            k if k.chars().count() == 1 => canvas.insert_text(k),
            _ => false,
        };
        if handled {
            e.prevent_default();
            app.sync();
        }
    })
}

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub fn run_wasm() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Starting Snapboard (WASM)");

    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or("No #canvas element")?
        .dyn_into::<HtmlCanvasElement>()?;
    let context = canvas
        .get_context("2d")?
        .ok_or("No 2d context")?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let config = WhiteboardConfig {
        canvas_width: canvas.width() as f64,
        canvas_height: canvas.height() as f64,
        ..WhiteboardConfig::default()
    };
    let view = View {
        shapes_menu: document
            .get_element_by_id(ControlId::ShapesMenu.element_id())
            .and_then(|e| e.dyn_into::<HtmlElement>().ok()),
        color_input: document
            .get_element_by_id(ControlId::ColorPicker.element_id())
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok()),
        context,
    };
    let app: Shared = Rc::new(RefCell::new(WebApp {
        session: Session::new(config),
        view,
    }));

    wire_toolbar(&app, &document)?;
    wire_pointer(&app, &canvas)?;
    wire_keyboard(&app, &document)?;

    app.borrow_mut().sync();
    Ok(())
}
