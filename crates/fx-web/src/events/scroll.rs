use super::SharedQueue;
use crate::dom;
use fx_core::{section_progress, InputEvent};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn sample(queue: &SharedQueue, section: &web::Element) {
    let rect = section.get_bounding_client_rect();
    let viewport_h = dom::window_size().y;
    let progress = section_progress(-rect.top() as f32, rect.height() as f32, viewport_h);
    queue.borrow_mut().push(InputEvent::ScrollProgress(progress));
}

/// Reports scroll progress through `section` on every scroll, plus once now
/// so a page restored mid-section starts on the right shape.
pub fn wire_scroll_progress(queue: &SharedQueue, section: web::Element) {
    sample(queue, &section);

    let Some(window) = web::window() else {
        return;
    };
    let q = queue.clone();
    let closure = Closure::wrap(Box::new(move || {
        sample(&q, &section);
    }) as Box<dyn FnMut()>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(true);
    let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}
