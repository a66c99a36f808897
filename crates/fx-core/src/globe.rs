//! Dotted globe with geographic markers, hub arcs and a one-shot reveal.

use crate::camera::{ndc_to_pixels, Camera};
use crate::cloud::{fibonacci_sphere, BlendMode, CloudStyle, PointCloud, ShapeDefinition};
use crate::constants::*;
use crate::error::{ensure_points, ensure_positive, FxError, FxResult};
use crate::input::InputEvent;
use crate::reveal::{RevealEvent, RevealSequencer, RevealState, RevealTiming};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub sub: &'static str,
    pub lat: f32,
    pub lon: f32,
}

const fn spec(id: &'static str, lat: f32, lon: f32, label: &'static str, sub: &'static str) -> MarkerSpec {
    MarkerSpec {
        id,
        label,
        sub,
        lat,
        lon,
    }
}

/// Office locations, hub first.
pub const DEFAULT_MARKERS: [MarkerSpec; 9] = [
    spec("IND", 12.9716, 77.5946, "INDIA", "Global Headquarters"),
    spec("USA", 37.0902, -95.7129, "United States", "120+ Projects"),
    spec("UA", 48.3794, 31.1656, "Ukraine", "Digital Hub"),
    spec("UK", 51.5074, -0.1278, "London, UK", "Fintech HQ"),
    spec("UAE", 25.2048, 55.2708, "Dubai, UAE", "Smart Innovation"),
    spec("JPN", 35.6762, 139.6503, "Tokyo, JPN", "AI Research"),
    spec("CAN", 43.6532, -79.3832, "Toronto, CAN", "Creative Studio"),
    spec("SGP", 1.3521, 103.8198, "Singapore", "Data Center"),
    spec("GER", 52.5200, 13.4050, "Berlin, GER", "Engineering"),
];

/// Latitude/longitude in degrees to a point on a sphere of `radius`, +Y up.
pub fn lat_lon_to_vec3(lat: f32, lon: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lon + 180.0).to_radians();
    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Quadratic Bézier from `from` to `to`, bulging out to `lift * radius`.
pub fn arc_points(from: Vec3, to: Vec3, radius: f32, lift: f32, segments: usize) -> Vec<Vec3> {
    let mid = (from + to) * 0.5;
    let control = mid.normalize_or_zero() * radius * lift;
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let u = 1.0 - t;
            from * (u * u) + control * (2.0 * u * t) + to * (t * t)
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct Marker {
    pub spec: MarkerSpec,
    /// Group-local position, fixed at creation.
    pub position: Vec3,
    pub front_facing: bool,
    /// Container pixels, refreshed every frame.
    pub screen: Vec2,
}

/// Arcs glow over the dots rather than covering them.
pub const ARC_BLEND: BlendMode = BlendMode::Additive;

#[derive(Clone, Debug)]
pub struct GlobeArc {
    /// Marker this arc ends at; the start is always the hub.
    pub marker: usize,
    pub points: Vec<Vec3>,
}

/// What the overlay needs to place one marker label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerView {
    pub index: usize,
    pub screen: Vec2,
    pub visible: bool,
    pub opacity: f32,
}

/// Eased group rotation with drag input and an idle spin.
#[derive(Clone, Copy, Debug)]
pub struct GlobeRotation {
    pub current: Vec2,
    pub target: Vec2,
    pub dragging: bool,
    pub hovered: bool,
    last_pointer: Vec2,
    ease: f32,
    spin: f32,
    sensitivity: f32,
}

impl GlobeRotation {
    pub fn new(initial: Vec2, ease: f32, spin: f32, sensitivity: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            dragging: false,
            hovered: false,
            last_pointer: Vec2::ZERO,
            ease,
            spin,
            sensitivity,
        }
    }

    pub fn drag_start(&mut self, pointer: Vec2) {
        self.dragging = true;
        self.last_pointer = pointer;
    }

    /// Only moves the target while a drag is active.
    pub fn drag_move(&mut self, pointer: Vec2) {
        if !self.dragging {
            return;
        }
        let delta = pointer - self.last_pointer;
        // x drag spins around Y, y drag tilts around X
        self.target.y += delta.x * self.sensitivity;
        self.target.x += delta.y * self.sensitivity;
        self.last_pointer = pointer;
    }

    pub fn drag_end(&mut self) {
        self.dragging = false;
    }

    pub fn step(&mut self, auto_spin: bool) {
        self.current += (self.target - self.current) * self.ease;
        if auto_spin && !self.dragging && !self.hovered {
            self.target.y += self.spin;
        }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.current.x, self.current.y, 0.0)
    }
}

#[derive(Clone, Debug)]
pub struct GlobeConfig {
    pub dot_count: usize,
    pub radius: f32,
    pub dot_color: [f32; 3],
    pub style: CloudStyle,
    pub markers: Vec<MarkerSpec>,
    pub arc_segments: usize,
    pub arc_lift: f32,
    pub timing: RevealTiming,
    pub initial_rotation: Vec2,
    pub rotation_ease: f32,
    pub auto_spin: f32,
    pub drag_sensitivity: f32,
    pub fov_deg: f32,
    pub camera_z: f32,
    pub viewport: Vec2,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            dot_count: GLOBE_DOT_COUNT,
            radius: GLOBE_RADIUS,
            dot_color: COLOR_BRAND_LIGHT,
            style: CloudStyle::additive(GLOBE_DOT_SIZE, GLOBE_DOT_OPACITY),
            markers: DEFAULT_MARKERS.to_vec(),
            arc_segments: ARC_SEGMENTS,
            arc_lift: ARC_LIFT,
            timing: RevealTiming::default(),
            initial_rotation: Vec2::from(GLOBE_INITIAL_ROTATION),
            rotation_ease: GLOBE_ROTATION_EASE,
            auto_spin: GLOBE_AUTO_SPIN,
            drag_sensitivity: GLOBE_DRAG_SENSITIVITY,
            fov_deg: GLOBE_FOV_DEG,
            camera_z: GLOBE_CAMERA_Z,
            viewport: Vec2::new(800.0, 600.0),
        }
    }
}

impl GlobeConfig {
    pub fn validate(&self) -> FxResult<()> {
        ensure_points("globe dots", self.dot_count)?;
        ensure_positive("globe radius", self.radius)?;
        ensure_positive("globe fov", self.fov_deg)?;
        if self.markers.is_empty() {
            return Err(FxError::NoMarkers);
        }
        Ok(())
    }
}

/// Globe scene context: dots, markers, arcs, rotation and reveal state.
pub struct GlobeEngine {
    dots: PointCloud,
    markers: Vec<Marker>,
    arcs: Vec<GlobeArc>,
    reveal: RevealSequencer,
    rotation: GlobeRotation,
    camera: Camera,
    viewport: Vec2,
    offset_y: f32,
    reveal_events: Vec<RevealEvent>,
}

impl GlobeEngine {
    pub fn create(config: GlobeConfig) -> FxResult<Self> {
        config.validate()?;
        let shape = ShapeDefinition::new(
            "globe",
            fibonacci_sphere(config.dot_count, config.radius),
            config.dot_color,
        );
        let dots = PointCloud::from_shape(&shape, config.style)?;

        let hub = lat_lon_to_vec3(config.markers[0].lat, config.markers[0].lon, config.radius);
        let markers: Vec<Marker> = config
            .markers
            .iter()
            .map(|m| Marker {
                spec: m.clone(),
                position: lat_lon_to_vec3(m.lat, m.lon, config.radius),
                front_facing: false,
                screen: Vec2::ZERO,
            })
            .collect();
        let arcs = markers
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, m)| GlobeArc {
                marker: i,
                points: arc_points(hub, m.position, config.radius, config.arc_lift, config.arc_segments),
            })
            .collect();

        log::info!(
            "[globe] {} dots, {} markers",
            dots.len(),
            markers.len()
        );
        Ok(Self {
            dots,
            reveal: RevealSequencer::new(markers.len(), config.timing),
            markers,
            arcs,
            rotation: GlobeRotation::new(
                config.initial_rotation,
                config.rotation_ease,
                config.auto_spin,
                config.drag_sensitivity,
            ),
            camera: Camera::new(
                config.fov_deg,
                config.viewport,
                Vec3::new(0.0, 0.0, config.camera_z),
            ),
            viewport: config.viewport,
            offset_y: config.radius * GLOBE_OFFSET_Y_FACTOR,
            reveal_events: Vec::new(),
        })
    }

    /// Visibility gate entry point; see [`RevealSequencer::start_entrance_sequence`].
    pub fn start_entrance_sequence(&mut self) -> bool {
        self.reveal.start_entrance_sequence()
    }

    pub fn tick<I>(&mut self, dt: Duration, inputs: I)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for ev in inputs {
            self.apply(ev);
        }
        self.reveal_events.clear();
        self.reveal
            .advance(dt.as_secs_f32(), &mut self.reveal_events);
        for ev in &self.reveal_events {
            log::debug!("[globe] revealed {} at {:.2}s", self.markers[ev.index].spec.id, ev.at);
        }
        self.rotation.step(self.reveal.has_started());
        self.update_markers();
    }

    fn apply(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Visibility { intersecting: true } => {
                self.start_entrance_sequence();
            }
            InputEvent::PointerDown(p) => self.rotation.drag_start(p),
            InputEvent::PointerMove(p) => self.rotation.drag_move(p),
            InputEvent::PointerUp => self.rotation.drag_end(),
            InputEvent::Hover(h) => self.rotation.hovered = h,
            InputEvent::Resize(size) => self.resize(size),
            InputEvent::Visibility { intersecting: false } | InputEvent::ScrollProgress(_) => {}
        }
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.camera.set_viewport(viewport);
    }

    pub fn group_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation.quat(), Vec3::new(0.0, self.offset_y, 0.0))
    }

    /// Project markers and cull those behind the globe's centre.
    fn update_markers(&mut self) {
        let group = self.group_matrix();
        let eye = self.camera.eye;
        let centre_dist = eye.distance(Vec3::new(0.0, self.offset_y, 0.0));
        for m in &mut self.markers {
            let world = group.transform_point3(m.position);
            m.front_facing = eye.distance(world) < centre_dist;
            if m.front_facing {
                let ndc = self.camera.project(world);
                m.screen = ndc_to_pixels(ndc.truncate(), self.viewport);
            }
        }
    }

    pub fn marker_views(&self) -> impl Iterator<Item = MarkerView> + '_ {
        self.markers.iter().enumerate().map(|(index, m)| {
            let revealed = self.reveal.state(index) == Some(RevealState::Revealed);
            MarkerView {
                index,
                screen: m.screen,
                visible: revealed && m.front_facing,
                opacity: self.reveal.marker_opacity(index),
            }
        })
    }

    pub fn dots(&self) -> &PointCloud {
        &self.dots
    }

    pub fn dots_mut(&mut self) -> &mut PointCloud {
        &mut self.dots
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn arcs(&self) -> &[GlobeArc] {
        &self.arcs
    }

    pub fn arc_opacity(&self, arc: &GlobeArc) -> f32 {
        self.reveal.arc_opacity(arc.marker)
    }

    pub fn arc_visible(&self, arc: &GlobeArc) -> bool {
        self.reveal.arc_visible(arc.marker)
    }

    pub fn reveal(&self) -> &RevealSequencer {
        &self.reveal
    }

    /// Markers revealed during the most recent tick.
    pub fn last_reveals(&self) -> &[RevealEvent] {
        &self.reveal_events
    }

    pub fn rotation(&self) -> &GlobeRotation {
        &self.rotation
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn dispose(self) {
        log::info!("[globe] disposed");
    }
}
