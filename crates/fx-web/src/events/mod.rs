pub mod pointer;
pub mod scroll;
pub mod visibility;

pub use pointer::{wire_drag, wire_hover, wire_window_pointer};
pub use scroll::wire_scroll_progress;
pub use visibility::observe_visibility;

use crate::dom;
use fx_core::{InputEvent, InputQueue};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Queue shared between DOM callbacks (writers) and the frame loop (reader).
pub type SharedQueue = Rc<RefCell<InputQueue>>;

pub fn shared_queue() -> SharedQueue {
    Rc::new(RefCell::new(InputQueue::new()))
}

/// Keeps the canvas backing store in sync and reports `measure()` as the new
/// viewport on every window resize.
pub fn wire_resize(
    queue: &SharedQueue,
    canvas: web::HtmlCanvasElement,
    measure: impl Fn() -> Vec2 + 'static,
) {
    let q = queue.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
        q.borrow_mut().push(InputEvent::Resize(measure()));
    }) as Box<dyn FnMut()>);
    if let Some(w) = web::window() {
        let _ = w.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
