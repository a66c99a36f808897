// Host-side tests for the breathing + dent deformer.

use fx_core::*;
use glam::{Vec2, Vec3};

fn quiet_params() -> DeformParams {
    DeformParams {
        noise_amplitude: 0.0,
        ..DeformParams::default()
    }
}

fn sphere_cloud(n: usize, r: f32) -> PointCloud {
    let shape = ShapeDefinition::new("s", fibonacci_sphere(n, r), [1.0; 3]);
    PointCloud::from_shape(&shape, CloudStyle::additive(0.05, 1.0)).unwrap()
}

#[test]
fn dent_factor_is_exactly_one_outside_radius() {
    let p = DeformParams::default();
    let pointer = Vec2::new(100.0, 100.0);
    let mut cloud = sphere_cloud(2_000, 6.2);
    let deformer = Deformer::new(p);
    for frame in 0..30 {
        let t = frame as f32 / 60.0;
        for &r in cloud.rest() {
            let target = p.noise_target(r, t);
            assert_eq!(p.dent_factor(target, pointer), 1.0);
            assert_eq!(p.dent_influence(target, pointer), 0.0);
        }
        deformer.step(&mut cloud, pointer.extend(0.0), t);
    }
}

#[test]
fn influence_is_maximal_at_the_pointer() {
    let p = DeformParams::default();
    let point = Vec3::new(1.5, -2.0, 4.0);
    let at = p.dent_influence(point, point.truncate());
    assert!((at - 1.0).abs() < 1e-6);
    assert!((p.dent_factor(point, point.truncate()) - (1.0 - p.dent_strength)).abs() < 1e-6);
    // falls off with planar distance, ignores depth
    let near = p.dent_influence(point, point.truncate() + Vec2::new(1.0, 0.0));
    let far = p.dent_influence(point, point.truncate() + Vec2::new(3.0, 0.0));
    assert!(at > near && near > far && far > 0.0);
}

#[test]
fn point_under_pointer_converges_to_shrunk_radius() {
    let p = quiet_params();
    let rest = [Vec3::new(0.0, 0.0, 6.2)];
    let mut cur = rest;
    for _ in 0..400 {
        deform_step(&p, &rest, &mut cur, Vec2::ZERO, 0.0);
    }
    let expected = 6.2 * (1.0 - p.dent_strength);
    assert!((cur[0].z - expected).abs() < 1e-3, "z={}", cur[0].z);
    assert!(cur[0].x.abs() < 1e-6 && cur[0].y.abs() < 1e-6);
}

#[test]
fn elastic_step_moves_a_fixed_fraction() {
    let p = quiet_params();
    let rest = [Vec3::new(10.0, 10.0, 0.0)];
    let mut cur = [Vec3::ZERO];
    deform_step(&p, &rest, &mut cur, Vec2::new(-50.0, -50.0), 0.0);
    assert!((cur[0] - rest[0] * p.elasticity).length() < 1e-5);
}

#[test]
fn breathing_stays_within_amplitude() {
    let p = DeformParams::default();
    let mut cloud = sphere_cloud(1_000, 6.2);
    let far = Vec3::new(500.0, 500.0, 0.0);
    let deformer = Deformer::new(p);
    for frame in 0..600 {
        deformer.step(&mut cloud, far, frame as f32 / 60.0);
    }
    let bound = p.noise_amplitude * 3f32.sqrt() + 1e-4;
    for (cur, rest) in cloud.positions().iter().zip(cloud.rest()) {
        assert!((*cur - *rest).length() <= bound);
    }
}

#[test]
fn dent_shrinks_only_the_nearby_cap() {
    let p = DeformParams::default();
    let mut cloud = sphere_cloud(3_000, 6.2);
    let deformer = Deformer::new(p);
    let pointer = Vec3::new(0.0, 0.0, 0.0);
    for frame in 0..300 {
        deformer.step(&mut cloud, pointer, frame as f32 / 60.0);
    }
    let mut dented = 0;
    for (cur, rest) in cloud.positions().iter().zip(cloud.rest()) {
        let planar_sq = rest.truncate().length_squared();
        if planar_sq > 25.0 {
            // well outside radius 4 even with breathing
            assert!((cur.length() - 6.2).abs() < 0.1);
        } else if planar_sq < 0.25 {
            assert!(cur.length() < 6.2 * 0.75);
            dented += 1;
        }
    }
    assert!(dented > 0);
    assert!(cloud.is_dirty());
}

#[test]
fn invalid_params_are_rejected() {
    let bad = DeformParams {
        elasticity: 1.5,
        ..DeformParams::default()
    };
    assert!(matches!(
        bad.validate(),
        Err(FxError::OutOfUnitRange { what: "elasticity", .. })
    ));
    assert!(DeformParams::default().validate().is_ok());
}

#[test]
fn noise_amplitude_only_needs_to_be_finite() {
    for amplitude in [0.0, -0.2] {
        let p = DeformParams {
            noise_amplitude: amplitude,
            ..DeformParams::default()
        };
        assert!(p.validate().is_ok(), "amplitude {amplitude}");
    }
    let nan = DeformParams {
        noise_amplitude: f32::NAN,
        ..DeformParams::default()
    };
    assert!(matches!(
        nan.validate(),
        Err(FxError::NonFinite { what: "noise amplitude", .. })
    ));
}
