#![cfg(target_arch = "wasm32")]
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

use frame::{DockFrame, FrameDriver, GlobeFrame, HeroFrame};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fx-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Every scene is optional: a page without its element simply skips it.
async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    match dom::canvas_by_id(&document, "hero-canvas") {
        Some(canvas) => launch("hero", HeroFrame::init(canvas).await),
        None => log::debug!("[hero] no #hero-canvas; skipping"),
    }

    match document.get_element_by_id("animation-dock") {
        Some(container) => launch("dock", DockFrame::init(document.clone(), container).await),
        None => log::debug!("[dock] no #animation-dock; skipping"),
    }

    match dom::query(&document, ".globe-container") {
        Some(container) => launch("globe", GlobeFrame::init(document.clone(), container).await),
        None => log::debug!("[globe] no .globe-container; skipping"),
    }
    Ok(())
}

fn launch<F: FrameDriver + 'static>(name: &str, scene: anyhow::Result<F>) {
    match scene {
        Ok(scene) => {
            log::info!("[{}] running", name);
            frame::start_loop(Rc::new(RefCell::new(scene)));
        }
        Err(e) => log::error!("[{}] init failed, feature disabled: {:?}", name, e),
    }
}
