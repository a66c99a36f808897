use crate::dom;
use crate::events::{self, SharedQueue};
use crate::overlay::MarkerOverlay;
use crate::render::{Draw, GpuState, LayerUniforms, LineLayer, LineVertex, PointLayer};
use fx_core::{
    DockConfig, DockEngine, GlobeConfig, GlobeEngine, HeroConfig, HeroEngine, COLOR_BRAND_LIGHT,
    GLOBE_VISIBILITY_THRESHOLD,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One scene's per-frame work: drain input, tick the engine, draw.
pub trait FrameDriver {
    fn frame(&mut self, dt: Duration);
}

fn present(gpu: &mut GpuState, draws: &[Draw<'_>]) {
    match gpu.render(draws) {
        Ok(()) => {}
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
        Err(e) => log::error!("render error: {:?}", e),
    }
}

// ---------------- Hero ----------------

pub struct HeroFrame {
    engine: HeroEngine,
    inputs: SharedQueue,
    canvas: web::HtmlCanvasElement,
    gpu: GpuState,
    sphere: PointLayer,
    dust: PointLayer,
}

impl HeroFrame {
    pub async fn init(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        dom::sync_canvas_backing_size(&canvas);
        let engine = HeroEngine::create(HeroConfig {
            viewport: dom::window_size(),
            ..HeroConfig::default()
        })?;
        let mut gpu = GpuState::new(&canvas).await?;
        let sphere = gpu.point_layer("hero_sphere", engine.cloud());
        let dust = gpu.point_layer("hero_dust", engine.ambient());

        let inputs = events::shared_queue();
        events::wire_window_pointer(&inputs);
        events::wire_resize(&inputs, canvas.clone(), dom::window_size);
        Ok(Self {
            engine,
            inputs,
            canvas,
            gpu,
            sphere,
            dust,
        })
    }
}

impl FrameDriver for HeroFrame {
    fn frame(&mut self, dt: Duration) {
        let pending = self.inputs.borrow_mut().take();
        self.engine.tick(dt, pending);

        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        self.gpu.upload_points(&mut self.sphere, self.engine.cloud_mut());
        self.gpu.upload_points(&mut self.dust, self.engine.ambient_mut());

        let cam = self.engine.camera();
        let sphere = LayerUniforms::for_cloud(cam, self.engine.cloud_matrix(), &self.engine.cloud().style);
        let dust = LayerUniforms::for_cloud(cam, self.engine.ambient_matrix(), &self.engine.ambient().style);
        self.gpu.set_point_uniforms(&self.sphere, &sphere);
        self.gpu.set_point_uniforms(&self.dust, &dust);
        present(
            &mut self.gpu,
            &[Draw::Points(&self.dust), Draw::Points(&self.sphere)],
        );
    }
}

// ---------------- Dock ----------------

pub struct DockFrame {
    engine: DockEngine,
    inputs: SharedQueue,
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    gpu: GpuState,
    cloud: PointLayer,
    featured: Option<usize>,
}

impl DockFrame {
    pub async fn init(document: web::Document, container: web::Element) -> anyhow::Result<Self> {
        let canvas = dom::create_canvas_in(&document, &container)?;
        dom::sync_canvas_backing_size(&canvas);
        let engine = DockEngine::create(DockConfig {
            window_width: dom::window_size().x,
            ..DockConfig::default()
        })?;
        let mut gpu = GpuState::new(&canvas).await?;
        let cloud = gpu.point_layer("dock_cloud", engine.cloud());

        let inputs = events::shared_queue();
        match document.get_element_by_id("services") {
            Some(section) => events::wire_scroll_progress(&inputs, section),
            None => log::debug!("[dock] no #services section; scroll morphing off"),
        }
        events::wire_resize(&inputs, canvas.clone(), dom::window_size);
        Ok(Self {
            engine,
            inputs,
            document,
            canvas,
            gpu,
            cloud,
            featured: None,
        })
    }
}

impl FrameDriver for DockFrame {
    fn frame(&mut self, dt: Duration) {
        let pending = self.inputs.borrow_mut().take();
        self.engine.tick(dt, pending);

        if self.engine.driver().enabled {
            let card = self.engine.active_card();
            if self.featured != Some(card) {
                dom::set_featured_card(&self.document, card);
                self.featured = Some(card);
            }
        }

        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        self.gpu.upload_points(&mut self.cloud, self.engine.cloud_mut());
        let u = LayerUniforms::for_cloud(
            self.engine.camera(),
            self.engine.cloud_matrix(),
            &self.engine.cloud().style,
        );
        self.gpu.set_point_uniforms(&self.cloud, &u);
        present(&mut self.gpu, &[Draw::Points(&self.cloud)]);
    }
}

// ---------------- Globe ----------------

pub struct GlobeFrame {
    engine: GlobeEngine,
    inputs: SharedQueue,
    canvas: web::HtmlCanvasElement,
    gpu: GpuState,
    dots: PointLayer,
    /// Index-aligned with `engine.arcs()`.
    arcs: Vec<LineLayer>,
    overlay: MarkerOverlay,
}

impl GlobeFrame {
    pub async fn init(document: web::Document, container: web::Element) -> anyhow::Result<Self> {
        let canvas = dom::create_canvas_in(&document, &container)?;
        dom::sync_canvas_backing_size(&canvas);
        let engine = GlobeEngine::create(GlobeConfig {
            viewport: dom::client_size(&container),
            ..GlobeConfig::default()
        })?;
        let mut gpu = GpuState::new(&canvas).await?;
        let dots = gpu.point_layer("globe_dots", engine.dots());
        let [r, g, b] = COLOR_BRAND_LIGHT;
        let arcs = engine
            .arcs()
            .iter()
            .map(|arc| {
                let verts: Vec<LineVertex> = arc
                    .points
                    .iter()
                    .map(|p| LineVertex {
                        position: p.to_array(),
                        color: [r, g, b, 1.0],
                    })
                    .collect();
                gpu.line_layer("globe_arc", &verts)
            })
            .collect();

        let inputs = events::shared_queue();
        let overlay = MarkerOverlay::build(&document, &container, engine.markers(), &inputs)?;
        events::wire_drag(&inputs, &container);
        events::observe_visibility(&inputs, &container, GLOBE_VISIBILITY_THRESHOLD)?;
        let measured = container.clone();
        events::wire_resize(&inputs, canvas.clone(), move || {
            dom::client_size(&measured)
        });
        Ok(Self {
            engine,
            inputs,
            canvas,
            gpu,
            dots,
            arcs,
            overlay,
        })
    }
}

impl FrameDriver for GlobeFrame {
    fn frame(&mut self, dt: Duration) {
        let pending = self.inputs.borrow_mut().take();
        self.engine.tick(dt, pending);
        self.overlay.sync(self.engine.marker_views());

        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        self.gpu.upload_points(&mut self.dots, self.engine.dots_mut());

        let cam = self.engine.camera();
        let group = self.engine.group_matrix();
        let u = LayerUniforms::for_cloud(cam, group, &self.engine.dots().style);
        self.gpu.set_point_uniforms(&self.dots, &u);

        let mut draws = vec![Draw::Points(&self.dots)];
        for (arc, layer) in self.engine.arcs().iter().zip(&self.arcs) {
            if !self.engine.arc_visible(arc) {
                continue;
            }
            let u = LayerUniforms::new(cam, group, [1.0; 3], self.engine.arc_opacity(arc), 0.0);
            self.gpu.set_line_uniforms(layer, &u);
            draws.push(Draw::Lines(layer));
        }
        present(&mut self.gpu, &draws);
    }
}

// ---------------- Loop ----------------

pub fn start_loop<F: FrameDriver + 'static>(driver: Rc<RefCell<F>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let mut last_instant = Instant::now();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let now = Instant::now();
        let dt = now - last_instant;
        last_instant = now;
        driver.borrow_mut().frame(dt);
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
