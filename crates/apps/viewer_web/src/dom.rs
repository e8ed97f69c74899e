//! Writes into the host page. Every lookup is optional: a page without the
//! tooltip or the counter still gets a working sphere.

use scene::camera::ClientRect;
use scene::interaction::TooltipContent;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub const TOOLTIP_YEAR_SELECTOR: &str = ".event-year";
pub const TOOLTIP_SCORE_SELECTOR: &str = ".event-score";
pub const TOOLTIP_DESC_SELECTOR: &str = ".event-desc";

pub fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

pub fn element_by_id(id: &str) -> Option<web_sys::Element> {
    document()?.get_element_by_id(id)
}

pub fn canvas_by_id(id: &str) -> Result<web_sys::HtmlCanvasElement, JsValue> {
    element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("container {id} not found")))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("container {id} is not a canvas")))
}

pub fn client_rect(element: &web_sys::Element) -> ClientRect {
    let r = element.get_bounding_client_rect();
    ClientRect::new(r.left(), r.top(), r.width(), r.height())
}

pub fn set_text(id: &str, text: &str) {
    if let Some(el) = element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn set_child_text(parent: &web_sys::Element, selector: &str, text: &str) {
    if let Ok(Some(child)) = parent.query_selector(selector) {
        child.set_text_content(Some(text));
    }
}

fn tooltip(id: &str) -> Option<web_sys::HtmlElement> {
    element_by_id(id)?.dyn_into::<web_sys::HtmlElement>().ok()
}

pub fn show_tooltip(
    id: &str,
    content: &TooltipContent,
    client_x: f64,
    client_y: f64,
    offset_px: f64,
) {
    let Some(el) = tooltip(id) else {
        return;
    };
    set_child_text(&el, TOOLTIP_YEAR_SELECTOR, &content.year);
    set_child_text(&el, TOOLTIP_SCORE_SELECTOR, &content.score_label);
    set_child_text(&el, TOOLTIP_DESC_SELECTOR, &content.description);

    let style = el.style();
    let _ = style.set_property("display", "block");
    let _ = style.set_property("left", &format!("{}px", client_x + offset_px));
    let _ = style.set_property("top", &format!("{}px", client_y + offset_px));
}

pub fn hide_tooltip(id: &str) {
    if let Some(el) = tooltip(id) {
        let _ = el.style().set_property("display", "none");
    }
}

/// Milliseconds since the page loaded, for frame timing.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

pub fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub fn error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}
