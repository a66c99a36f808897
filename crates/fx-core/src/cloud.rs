//! Point clouds and the shape generators that seed them.
//!
//! A [`ShapeDefinition`] is an immutable set of rest positions plus a colour.
//! A [`PointCloud`] owns a fixed number of points (rest, current, colour) and
//! tracks whether its buffers changed since the presenter last uploaded them.

use crate::error::{ensure_points, ensure_positive, FxResult};
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::{PI, TAU};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    Additive,
    Alpha,
}

/// Cloud-level uniforms shared by every point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudStyle {
    pub base_size: f32,
    pub opacity: f32,
    pub blend: BlendMode,
}

impl CloudStyle {
    pub const fn additive(base_size: f32, opacity: f32) -> Self {
        Self {
            base_size,
            opacity,
            blend: BlendMode::Additive,
        }
    }
}

/// Interleaved per-point data as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Analytic point-set generators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    /// Deterministic near-uniform sphere surface.
    FibonacciSphere { radius: f32 },
    /// Random directions on a sphere with radial jitter of `jitter` (full width).
    Shell { radius: f32, jitter: f32 },
    /// Uniform volume of an axis-aligned cube centred on the origin.
    Cube { side: f32 },
    /// Torus around +Z parameterised by two random angles.
    Torus { major: f32, minor: f32 },
    /// Sphere with both angles snapped to `1/steps` radians, giving facets.
    FacetedSphere { radius: f32, steps: f32 },
}

impl ShapeKind {
    pub fn generate(&self, count: usize, seed: u64) -> Vec<Vec3> {
        match *self {
            ShapeKind::FibonacciSphere { radius } => fibonacci_sphere(count, radius),
            kind => {
                let mut rng = StdRng::seed_from_u64(seed);
                (0..count).map(|_| kind.sample(&mut rng)).collect()
            }
        }
    }

    fn sample(&self, rng: &mut StdRng) -> Vec3 {
        match *self {
            ShapeKind::FibonacciSphere { radius } => random_direction(rng) * radius,
            ShapeKind::Shell { radius, jitter } => {
                let r = radius + (rng.gen::<f32>() - 0.5) * jitter;
                random_direction(rng) * r
            }
            ShapeKind::Cube { side } => Vec3::new(
                (rng.gen::<f32>() - 0.5) * side,
                (rng.gen::<f32>() - 0.5) * side,
                (rng.gen::<f32>() - 0.5) * side,
            ),
            ShapeKind::Torus { major, minor } => {
                let u = rng.gen::<f32>() * TAU;
                let v = rng.gen::<f32>() * TAU;
                let ring = major + minor * v.cos();
                Vec3::new(ring * u.cos(), ring * u.sin(), minor * v.sin())
            }
            ShapeKind::FacetedSphere { radius, steps } => {
                let theta = rng.gen::<f32>() * TAU;
                let phi = (rng.gen::<f32>() * 2.0 - 1.0).acos();
                let steps = steps.max(1.0);
                let theta = (theta * steps).round() / steps;
                let phi = (phi * steps).round() / steps;
                spherical(radius, theta, phi)
            }
        }
    }
}

/// Fibonacci-sphere sampling: `phi = acos(-1 + 2i/N)`, `theta = sqrt(N*pi) * phi`.
///
/// Angles are evaluated in f64 so large clouds keep their spiral spacing.
pub fn fibonacci_sphere(count: usize, radius: f32) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as f64;
    let spiral = (n * std::f64::consts::PI).sqrt();
    (0..count)
        .map(|i| {
            let phi = (-1.0 + (2.0 * i as f64) / n).acos();
            let theta = spiral * phi;
            spherical(radius, theta as f32, phi as f32)
        })
        .collect()
}

#[inline]
fn spherical(radius: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        radius * theta.cos() * phi.sin(),
        radius * theta.sin() * phi.sin(),
        radius * phi.cos(),
    )
}

#[inline]
fn random_direction(rng: &mut StdRng) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (rng.gen::<f32>() * 2.0 - 1.0).clamp(-1.0, 1.0).acos();
    spherical(1.0, theta, phi.clamp(0.0, PI))
}

/// Precomputed target state for a cloud. Cheap to clone; never mutated.
#[derive(Clone, Debug)]
pub struct ShapeDefinition {
    name: &'static str,
    positions: Arc<[Vec3]>,
    color: [f32; 3],
}

impl ShapeDefinition {
    pub fn new(name: &'static str, positions: Vec<Vec3>, color: [f32; 3]) -> Self {
        Self {
            name,
            positions: positions.into(),
            color,
        }
    }

    pub fn generate(
        name: &'static str,
        kind: ShapeKind,
        count: usize,
        seed: u64,
        color: [f32; 3],
    ) -> Self {
        Self::new(name, kind.generate(count, seed), color)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Per-point colour buffer matching `positions`.
    pub fn color_buffer(&self) -> Vec<[f32; 3]> {
        vec![self.color; self.positions.len()]
    }
}

/// Fixed-size particle set. Positions and colours change every frame; the
/// number of points never does.
#[derive(Clone, Debug)]
pub struct PointCloud {
    rest: Arc<[Vec3]>,
    positions: Vec<Vec3>,
    colors: Vec<[f32; 3]>,
    pub style: CloudStyle,
    dirty: bool,
}

impl PointCloud {
    pub fn from_shape(shape: &ShapeDefinition, style: CloudStyle) -> FxResult<Self> {
        ensure_points(shape.name(), shape.len())?;
        ensure_positive("base point size", style.base_size)?;
        Ok(Self {
            rest: shape.positions.clone(),
            positions: shape.positions().to_vec(),
            colors: shape.color_buffer(),
            style,
            dirty: true,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn rest(&self) -> &[Vec3] {
        &self.rest
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Mutable access to current positions; marks the cloud dirty.
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        self.dirty = true;
        &mut self.positions
    }

    /// Rest and current positions together, for simulation steps that read one
    /// and write the other.
    pub fn rest_and_positions_mut(&mut self) -> (&[Vec3], &mut [Vec3]) {
        self.dirty = true;
        (&self.rest, &mut self.positions)
    }

    pub fn fill_color(&mut self, color: [f32; 3]) {
        self.colors.iter_mut().for_each(|c| *c = color);
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether the buffers changed since the last call and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn write_instances(&self, out: &mut Vec<PointInstance>) {
        out.clear();
        out.extend(
            self.positions
                .iter()
                .zip(&self.colors)
                .map(|(p, c)| PointInstance {
                    position: p.to_array(),
                    color: *c,
                }),
        );
    }
}

/// Validates shape parameters before generation.
pub fn validate_kind(kind: &ShapeKind) -> FxResult<()> {
    match *kind {
        ShapeKind::FibonacciSphere { radius } => ensure_positive("sphere radius", radius),
        ShapeKind::Shell { radius, .. } => ensure_positive("shell radius", radius),
        ShapeKind::Cube { side } => ensure_positive("cube side", side),
        ShapeKind::Torus { major, minor } => {
            ensure_positive("torus major radius", major)?;
            ensure_positive("torus minor radius", minor)
        }
        ShapeKind::FacetedSphere { radius, steps } => {
            ensure_positive("faceted radius", radius)?;
            ensure_positive("facet steps", steps)
        }
    }
}
