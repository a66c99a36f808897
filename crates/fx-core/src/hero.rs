//! Hero particle sphere: Fibonacci cloud, pointer dent, camera parallax and
//! a slowly rotating field of ambient dust.

use crate::camera::{ray_plane_z, Camera};
use crate::cloud::{CloudStyle, PointCloud, ShapeDefinition, ShapeKind};
use crate::constants::*;
use crate::deform::{DeformParams, Deformer};
use crate::error::{ensure_points, ensure_positive, ensure_unit, FxResult};
use crate::input::InputEvent;
use crate::pointer::PointerTracker;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct HeroConfig {
    pub point_count: usize,
    pub radius: f32,
    pub style: CloudStyle,
    pub deform: DeformParams,
    pub pointer_smoothing: f32,
    pub intersect_lerp: f32,
    pub rotation_speed: f32,
    pub parallax_range: f32,
    pub parallax_ease: f32,
    pub fov_deg: f32,
    pub camera_z_desktop: f32,
    pub camera_z_mobile: f32,
    pub mobile_breakpoint: f32,
    pub ambient_count: usize,
    pub ambient_extent: f32,
    pub ambient_style: CloudStyle,
    pub ambient_spin: Vec2,
    pub seed: u64,
    pub viewport: Vec2,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            point_count: HERO_POINT_COUNT,
            radius: HERO_RADIUS,
            style: CloudStyle::additive(HERO_POINT_SIZE, HERO_OPACITY),
            deform: DeformParams::default(),
            pointer_smoothing: POINTER_SMOOTHING,
            intersect_lerp: INTERSECT_LERP,
            rotation_speed: HERO_ROTATION_SPEED,
            parallax_range: PARALLAX_RANGE,
            parallax_ease: PARALLAX_EASE,
            fov_deg: HERO_FOV_DEG,
            camera_z_desktop: HERO_CAMERA_Z_DESKTOP,
            camera_z_mobile: HERO_CAMERA_Z_MOBILE,
            mobile_breakpoint: MOBILE_BREAKPOINT_PX,
            ambient_count: AMBIENT_POINT_COUNT,
            ambient_extent: AMBIENT_EXTENT,
            ambient_style: CloudStyle::additive(AMBIENT_POINT_SIZE, AMBIENT_OPACITY),
            ambient_spin: Vec2::new(AMBIENT_SPIN_X, AMBIENT_SPIN_Y),
            seed: HERO_SEED,
            viewport: Vec2::new(1280.0, 800.0),
        }
    }
}

impl HeroConfig {
    pub fn validate(&self) -> FxResult<()> {
        ensure_points("hero sphere", self.point_count)?;
        ensure_points("ambient dust", self.ambient_count)?;
        ensure_positive("hero radius", self.radius)?;
        ensure_positive("hero fov", self.fov_deg)?;
        ensure_unit("pointer smoothing", self.pointer_smoothing)?;
        ensure_unit("intersect lerp", self.intersect_lerp)?;
        ensure_unit("parallax ease", self.parallax_ease)?;
        self.deform.validate()
    }

    pub fn camera_z_for(&self, viewport: Vec2) -> f32 {
        if viewport.x < self.mobile_breakpoint {
            self.camera_z_mobile
        } else {
            self.camera_z_desktop
        }
    }
}

/// Hero scene context. Created once per page view, ticked every frame.
pub struct HeroEngine {
    config: HeroConfig,
    cloud: PointCloud,
    ambient: PointCloud,
    ambient_rotation: Vec2,
    pointer: PointerTracker,
    deformer: Deformer,
    camera: Camera,
    viewport: Vec2,
    interaction: Vec3,
    elapsed: f32,
    rotation_y: f32,
}

impl HeroEngine {
    pub fn create(config: HeroConfig) -> FxResult<Self> {
        config.validate()?;
        let sphere = ShapeDefinition::generate(
            "hero",
            ShapeKind::FibonacciSphere {
                radius: config.radius,
            },
            config.point_count,
            config.seed,
            COLOR_WHITE,
        );
        let dust = ShapeDefinition::generate(
            "ambient",
            ShapeKind::Cube {
                side: config.ambient_extent,
            },
            config.ambient_count,
            config.seed.wrapping_add(1),
            COLOR_WHITE,
        );
        let viewport = config.viewport;
        let camera = Camera::new(
            config.fov_deg,
            viewport,
            Vec3::new(0.0, 0.0, config.camera_z_for(viewport)),
        );
        log::info!(
            "[hero] {} points r={:.1}, camera z={:.0}",
            config.point_count,
            config.radius,
            camera.eye.z
        );
        Ok(Self {
            cloud: PointCloud::from_shape(&sphere, config.style)?,
            ambient: PointCloud::from_shape(&dust, config.ambient_style)?,
            ambient_rotation: Vec2::ZERO,
            pointer: PointerTracker::new(config.pointer_smoothing),
            deformer: Deformer::new(config.deform),
            camera,
            viewport,
            interaction: Vec3::ZERO,
            elapsed: 0.0,
            rotation_y: 0.0,
            config,
        })
    }

    pub fn tick<I>(&mut self, dt: Duration, inputs: I)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for ev in inputs {
            match ev {
                InputEvent::PointerMove(p) | InputEvent::PointerDown(p) => {
                    self.pointer.update(p, self.viewport)
                }
                InputEvent::Resize(size) => self.resize(size),
                _ => {}
            }
        }
        self.elapsed += dt.as_secs_f32();

        let mouse = self.pointer.tick();

        // Parallax: ease the eye toward the pointer, keep looking at origin.
        let range = self.config.parallax_range;
        let ease = self.config.parallax_ease;
        self.camera.eye.x += (mouse.x * range - self.camera.eye.x) * ease;
        self.camera.eye.y += (mouse.y * range - self.camera.eye.y) * ease;
        self.camera.target = Vec3::ZERO;

        let (origin, dir) = self.camera.ray_from_ndc(mouse);
        if let Some(hit) = ray_plane_z(origin, dir, 0.0) {
            self.interaction = self.interaction.lerp(hit, self.config.intersect_lerp);
        }

        self.rotation_y = self.elapsed * self.config.rotation_speed;
        let local = Quat::from_rotation_y(-self.rotation_y) * self.interaction;
        self.deformer.step(&mut self.cloud, local, self.elapsed);

        self.ambient_rotation += self.config.ambient_spin;
    }

    /// Aspect and camera distance follow the viewport; safe for zero sizes.
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.camera.set_viewport(viewport);
        self.camera.eye.z = self.config.camera_z_for(viewport);
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn cloud_mut(&mut self) -> &mut PointCloud {
        &mut self.cloud
    }

    pub fn ambient(&self) -> &PointCloud {
        &self.ambient
    }

    pub fn ambient_mut(&mut self) -> &mut PointCloud {
        &mut self.ambient
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    /// Smoothed interaction point on the z = 0 plane, world space.
    pub fn interaction_point(&self) -> Vec3 {
        self.interaction
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn cloud_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }

    pub fn ambient_matrix(&self) -> Mat4 {
        Mat4::from_quat(Quat::from_euler(
            EulerRot::XYZ,
            self.ambient_rotation.x,
            self.ambient_rotation.y,
            0.0,
        ))
    }

    pub fn dispose(self) {
        log::info!("[hero] disposed after {:.1}s", self.elapsed);
    }
}
