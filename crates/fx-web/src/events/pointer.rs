use super::SharedQueue;
use fx_core::InputEvent;
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Document-wide pointer tracking: mouse moves plus the first touch point
/// (passive, so scrolling is never blocked).
pub fn wire_window_pointer(queue: &SharedQueue) {
    let Some(document) = web::window().and_then(|w| w.document()) else {
        return;
    };

    let q = queue.clone();
    let on_move = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        q.borrow_mut().push(InputEvent::PointerMove(client_pos(&ev)));
    }) as Box<dyn FnMut(_)>);
    let _ = document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
    on_move.forget();

    let q = queue.clone();
    let on_touch = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        if let Some(t) = ev.touches().get(0) {
            let pos = Vec2::new(t.client_x() as f32, t.client_y() as f32);
            q.borrow_mut().push(InputEvent::PointerMove(pos));
        }
    }) as Box<dyn FnMut(_)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(true);
    for kind in ["touchstart", "touchmove"] {
        let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            on_touch.as_ref().unchecked_ref(),
            &opts,
        );
    }
    on_touch.forget();
}

/// Drag starts on the container; moves and release are tracked on the window
/// so a drag survives leaving the element.
pub fn wire_drag(queue: &SharedQueue, container: &web::Element) {
    let q = queue.clone();
    let on_down = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        q.borrow_mut().push(InputEvent::PointerDown(client_pos(&ev)));
    }) as Box<dyn FnMut(_)>);
    let _ = container.add_event_listener_with_callback("mousedown", on_down.as_ref().unchecked_ref());
    on_down.forget();

    let Some(window) = web::window() else {
        return;
    };
    let q = queue.clone();
    let on_move = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        q.borrow_mut().push(InputEvent::PointerMove(client_pos(&ev)));
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
    on_move.forget();

    let q = queue.clone();
    let on_up = Closure::wrap(Box::new(move || {
        q.borrow_mut().push(InputEvent::PointerUp);
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref());
    on_up.forget();
}

pub fn wire_hover(queue: &SharedQueue, el: &web::Element) {
    for (kind, hovered) in [("mouseenter", true), ("mouseleave", false)] {
        let q = queue.clone();
        let closure = Closure::wrap(Box::new(move || {
            q.borrow_mut().push(InputEvent::Hover(hovered));
        }) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
