//! Per-frame breathing + pointer dent for a point cloud.
//!
//! Each point chases a target built from its rest position, a small
//! time-varying sinusoidal offset, and a Gaussian "dent" toward the origin
//! near the pointer. The chase is exponential easing with a fixed elasticity,
//! not a velocity integration, so there is no per-point state besides the
//! current position.

use crate::cloud::PointCloud;
use crate::constants::{
    DENT_FALLOFF, DENT_RADIUS_SQ, DENT_STRENGTH, ELASTICITY, NOISE_AMPLITUDE, NOISE_SPATIAL_FREQ,
    NOISE_TIME_FREQ,
};
use crate::error::{ensure_finite, ensure_positive, ensure_unit, FxResult};
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeformParams {
    pub noise_amplitude: f32,
    pub noise_time_freq: [f32; 3],
    pub noise_spatial_freq: f32,
    pub dent_radius_sq: f32,
    pub dent_falloff: f32,
    pub dent_strength: f32,
    pub elasticity: f32,
}

impl Default for DeformParams {
    fn default() -> Self {
        Self {
            noise_amplitude: NOISE_AMPLITUDE,
            noise_time_freq: NOISE_TIME_FREQ,
            noise_spatial_freq: NOISE_SPATIAL_FREQ,
            dent_radius_sq: DENT_RADIUS_SQ,
            dent_falloff: DENT_FALLOFF,
            dent_strength: DENT_STRENGTH,
            elasticity: ELASTICITY,
        }
    }
}

impl DeformParams {
    pub fn validate(&self) -> FxResult<()> {
        ensure_positive("dent radius", self.dent_radius_sq)?;
        ensure_positive("dent falloff", self.dent_falloff)?;
        ensure_unit("dent strength", self.dent_strength)?;
        ensure_unit("elasticity", self.elasticity)?;
        ensure_finite("noise amplitude", self.noise_amplitude)
    }

    /// Rest position plus the breathing offset at `time` seconds.
    #[inline]
    pub fn noise_target(&self, rest: Vec3, time: f32) -> Vec3 {
        let k = self.noise_spatial_freq;
        let [fx, fy, fz] = self.noise_time_freq;
        let a = self.noise_amplitude;
        rest + Vec3::new(
            (time * fx + rest.y * k).sin() * a,
            (time * fy + rest.x * k).cos() * a,
            (time * fz + rest.z * k).sin() * a,
        )
    }

    /// Gaussian influence of the pointer at this point, 0 outside the radius.
    #[inline]
    pub fn dent_influence(&self, point: Vec3, pointer: Vec2) -> f32 {
        let dist_sq = (point.truncate() - pointer).length_squared();
        if dist_sq < self.dent_radius_sq {
            (-dist_sq * self.dent_falloff).exp()
        } else {
            0.0
        }
    }

    /// Radial scale applied to the target; exactly 1 outside the radius.
    #[inline]
    pub fn dent_factor(&self, point: Vec3, pointer: Vec2) -> f32 {
        let influence = self.dent_influence(point, pointer);
        if influence > 0.0 {
            1.0 - influence * self.dent_strength
        } else {
            1.0
        }
    }

    /// Where a point wants to be this frame.
    #[inline]
    pub fn target(&self, rest: Vec3, pointer: Vec2, time: f32) -> Vec3 {
        let t = self.noise_target(rest, time);
        t * self.dent_factor(t, pointer)
    }
}

/// Runs the dent simulation over raw buffers.
///
/// `pointer` is in the cloud's local frame; only its x/y are used.
pub fn deform_step(
    params: &DeformParams,
    rest: &[Vec3],
    current: &mut [Vec3],
    pointer: Vec2,
    time: f32,
) {
    let e = params.elasticity;
    for (cur, &r) in current.iter_mut().zip(rest) {
        let target = params.target(r, pointer, time);
        *cur += (target - *cur) * e;
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Deformer {
    pub params: DeformParams,
}

impl Deformer {
    pub fn new(params: DeformParams) -> Self {
        Self { params }
    }

    pub fn step(&self, cloud: &mut PointCloud, local_pointer: Vec3, time: f32) {
        let (rest, current) = cloud.rest_and_positions_mut();
        deform_step(&self.params, rest, current, local_pointer.truncate(), time);
    }
}
