use crate::dom::js_err;
use crate::events::{self, SharedQueue};
use fx_core::{Marker, MarkerView};
use wasm_bindgen::JsCast;
use web_sys as web;

/// HTML labels pinned over the globe, one element per marker, same order.
pub struct MarkerOverlay {
    items: Vec<web::HtmlElement>,
}

fn marker_html(marker: &Marker) -> String {
    format!(
        r#"<div class="marker-point"></div>
<div class="marker-label-hud">
  <div class="label-line"></div>
  <div class="label-content">
    <span class="country-name">{}</span>
    <p class="country-sub">{}</p>
  </div>
</div>"#,
        marker.spec.label, marker.spec.sub
    )
}

impl MarkerOverlay {
    pub fn build(
        document: &web::Document,
        container: &web::Element,
        markers: &[Marker],
        queue: &SharedQueue,
    ) -> anyhow::Result<Self> {
        let root = document.create_element("div").map_err(js_err)?;
        root.set_class_name("globe-overlay");
        container.append_child(&root).map_err(js_err)?;

        let mut items = Vec::with_capacity(markers.len());
        for (i, marker) in markers.iter().enumerate() {
            let el = document
                .create_element("div")
                .map_err(js_err)?
                .dyn_into::<web::HtmlElement>()
                .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
            el.set_class_name(if i == 0 { "globe-marker hub" } else { "globe-marker" });
            el.set_inner_html(&marker_html(marker));
            let style = el.style();
            style.set_property("opacity", "0").map_err(js_err)?;
            style.set_property("display", "none").map_err(js_err)?;
            events::wire_hover(queue, &el);
            root.append_child(&el).map_err(js_err)?;
            items.push(el);
        }
        log::debug!("[globe] overlay with {} markers", items.len());
        Ok(Self { items })
    }

    /// Positions visible markers in container pixels and hides the rest.
    pub fn sync(&self, views: impl Iterator<Item = MarkerView>) {
        for view in views {
            let Some(el) = self.items.get(view.index) else {
                continue;
            };
            let style = el.style();
            if view.visible {
                let _ = style.set_property("display", "block");
                let _ = style.set_property("left", &format!("{:.1}px", view.screen.x));
                let _ = style.set_property("top", &format!("{:.1}px", view.screen.y));
                let _ = style.set_property("opacity", &format!("{:.3}", view.opacity));
            } else {
                let _ = style.set_property("display", "none");
            }
        }
    }
}
