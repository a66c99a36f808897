//! Perspective camera plus the picking and projection helpers the engines use.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(fov_deg: f32, viewport: Vec2, eye: Vec3) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect_ratio(viewport),
            fovy_radians: fov_deg.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.aspect = aspect_ratio(viewport);
    }

    /// World-space ray through an NDC point. Returns `(origin, direction)`.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far: Vec3 = far.truncate() / far.w;
        let dir = (far - self.eye).normalize_or_zero();
        (self.eye, dir)
    }

    /// World point to NDC; z carries depth in [0, 1] for points in front.
    pub fn project(&self, world: Vec3) -> Vec3 {
        self.view_projection().project_point3(world)
    }
}

/// Width over height, falling back to 1 for a collapsed viewport.
#[inline]
pub fn aspect_ratio(viewport: Vec2) -> f32 {
    if viewport.x > 0.0 && viewport.y > 0.0 {
        viewport.x / viewport.y
    } else {
        1.0
    }
}

/// Intersect a ray with the plane `z = plane_z`. `None` when parallel or behind.
#[inline]
pub fn ray_plane_z(origin: Vec3, dir: Vec3, plane_z: f32) -> Option<Vec3> {
    if dir.z.abs() < 1e-6 {
        return None;
    }
    let t = (plane_z - origin.z) / dir.z;
    (t >= 0.0).then(|| origin + dir * t)
}

/// NDC to container pixels with y down.
#[inline]
pub fn ndc_to_pixels(ndc: Vec2, viewport: Vec2) -> Vec2 {
    let half = viewport * 0.5;
    Vec2::new(ndc.x * half.x + half.x, -ndc.y * half.y + half.y)
}
