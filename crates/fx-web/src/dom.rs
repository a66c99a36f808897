use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Backing stores are capped at 2x to keep fill rate sane on dense screens.
const MAX_PIXEL_RATIO: f64 = 2.0;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()
}

#[inline]
pub fn query(document: &web::Document, selector: &str) -> Option<web::Element> {
    document.query_selector(selector).ok().flatten()
}

/// Appends a canvas that fills `parent`.
pub fn create_canvas_in(
    document: &web::Document,
    parent: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let style = canvas.style();
    style.set_property("width", "100%").map_err(js_err)?;
    style.set_property("height", "100%").map_err(js_err)?;
    style.set_property("display", "block").map_err(js_err)?;
    parent.append_child(&canvas).map_err(js_err)?;
    Ok(canvas)
}

/// Window inner size in CSS pixels; zero when unavailable.
pub fn window_size() -> Vec2 {
    let Some(w) = web::window() else {
        return Vec2::ZERO;
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Vec2::new(width as f32, height as f32)
}

#[inline]
pub fn client_size(el: &web::Element) -> Vec2 {
    Vec2::new(el.client_width() as f32, el.client_height() as f32)
}

#[inline]
pub fn pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .min(MAX_PIXEL_RATIO)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    let dpr = pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr) as u32;
    let h_px = (rect.height() * dpr) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
}

/// Marks card `active` as featured and clears the class on the others.
pub fn set_featured_card(document: &web::Document, active: usize) {
    let Ok(cards) = document.query_selector_all(".service-item-card") else {
        return;
    };
    for i in 0..cards.length() {
        let Some(card) = cards.get(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let _ = card
            .class_list()
            .toggle_with_force("featured", i as usize == active);
    }
}
