use super::SharedQueue;
use crate::dom;
use fx_core::InputEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Feeds `Visibility` events for `target` once `threshold` of it is on screen.
pub fn observe_visibility(
    queue: &SharedQueue,
    target: &web::Element,
    threshold: f64,
) -> anyhow::Result<()> {
    let q = queue.clone();
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() {
                    q.borrow_mut().push(InputEvent::Visibility {
                        intersecting: entry.is_intersecting(),
                    });
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(dom::js_err)?;
    observer.observe(target);
    callback.forget();
    Ok(())
}
