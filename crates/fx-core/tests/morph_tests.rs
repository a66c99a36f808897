// Host-side tests for shape morphing and the scroll driver.

use fx_core::*;
use glam::Vec3;

const N: usize = 64;
const FRAME: f32 = 1.0 / 60.0;

fn shapes() -> Vec<ShapeDefinition> {
    vec![
        ShapeDefinition::new("a", vec![Vec3::ZERO; N], [1.0, 0.0, 0.0]),
        ShapeDefinition::new("b", vec![Vec3::new(10.0, 0.0, 0.0); N], [0.0, 1.0, 0.0]),
        ShapeDefinition::new("c", vec![Vec3::new(0.0, -10.0, 0.0); N], [0.0, 0.0, 1.0]),
    ]
}

fn setup() -> (MorphSequencer, PointCloud) {
    let shapes = shapes();
    let cloud = PointCloud::from_shape(&shapes[0], CloudStyle::additive(0.03, 0.7)).unwrap();
    let seq = MorphSequencer::new(shapes, 1.5, Easing::ExpoInOut).unwrap();
    (seq, cloud)
}

fn run_until_idle(seq: &mut MorphSequencer, cloud: &mut PointCloud) -> usize {
    let mut frames = 0;
    while seq.is_morphing() {
        seq.tick(FRAME, cloud);
        frames += 1;
        assert!(frames < 1_000, "morph never finished");
    }
    frames
}

#[test]
fn expo_in_out_hits_endpoints_and_midpoint() {
    assert_eq!(Easing::ExpoInOut.apply(0.0), 0.0);
    assert_eq!(Easing::ExpoInOut.apply(1.0), 1.0);
    assert!((Easing::ExpoInOut.apply(0.5) - 0.5).abs() < 1e-6);
    let mut prev = 0.0;
    for i in 1..=100 {
        let v = Easing::ExpoInOut.apply(i as f32 / 100.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn morph_to_current_shape_is_a_noop() {
    let (mut seq, mut cloud) = setup();
    cloud.take_dirty();
    assert!(!seq.morph_to(0, &cloud));
    assert!(!seq.is_morphing());
    assert_eq!(seq.tick(FRAME, &mut cloud), MorphStatus::Idle);
    assert!(!cloud.is_dirty(), "idle tick must not touch buffers");
}

#[test]
fn morph_reaches_target_and_updates_index_on_completion() {
    let (mut seq, mut cloud) = setup();
    assert!(seq.morph_to(1, &cloud));
    assert!(seq.is_morphing());
    assert_eq!(seq.current_shape_index(), 0);
    assert_eq!(seq.destination(), 1);

    let frames = run_until_idle(&mut seq, &mut cloud);
    assert!((89..=91).contains(&frames), "frames={frames}");
    assert_eq!(seq.current_shape_index(), 1);
    for p in cloud.positions() {
        assert!((*p - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
    }
    assert_eq!(cloud.colors()[0], [0.0, 1.0, 0.0]);
}

#[test]
fn repeated_request_for_inflight_target_does_not_restart() {
    let (mut seq, mut cloud) = setup();
    seq.morph_to(1, &cloud);
    for _ in 0..45 {
        seq.tick(FRAME, &mut cloud);
    }
    let mid = cloud.positions()[0];
    assert!(!seq.morph_to(1, &cloud));
    seq.tick(FRAME, &mut cloud);
    assert!(cloud.positions()[0].x >= mid.x, "restart would jump backwards");
}

#[test]
fn retarget_mid_morph_starts_from_current_positions() {
    let (mut seq, mut cloud) = setup();
    seq.morph_to(1, &cloud);
    let mut max_step = 0.0f32;
    let mut prev = cloud.positions()[0];
    for _ in 0..50 {
        seq.tick(FRAME, &mut cloud);
        max_step = max_step.max((cloud.positions()[0] - prev).length());
        prev = cloud.positions()[0];
    }
    let before = cloud.positions()[0];
    let color_before = cloud.colors()[0];
    assert!(before.x > 0.0 && before.x < 10.0, "should be mid-flight: {before:?}");

    assert!(seq.morph_to(2, &cloud));
    // Nothing moves at the instant of retargeting.
    assert_eq!(cloud.positions()[0], before);

    seq.tick(FRAME, &mut cloud);
    let after = cloud.positions()[0];
    let jump = (after - before).length();
    assert!(jump <= max_step + 1e-4, "jump {jump} exceeds largest step {max_step}");
    let dc: f32 = cloud.colors()[0]
        .iter()
        .zip(color_before)
        .map(|(a, b)| (a - b).abs())
        .sum();
    assert!(dc < 0.05, "colour jumped by {dc}");

    run_until_idle(&mut seq, &mut cloud);
    assert_eq!(seq.current_shape_index(), 2);
    assert!((cloud.positions()[0] - Vec3::new(0.0, -10.0, 0.0)).length() < 1e-5);
}

#[test]
fn unknown_shape_is_ignored() {
    let (mut seq, cloud) = setup();
    assert!(!seq.morph_to(9, &cloud));
    assert!(!seq.is_morphing());
}

#[test]
fn mismatched_shape_sizes_are_rejected() {
    let mut s = shapes();
    s.push(ShapeDefinition::new("short", vec![Vec3::ZERO; 3], [1.0; 3]));
    let err = MorphSequencer::new(s, 1.0, Easing::Linear).err();
    assert_eq!(
        err,
        Some(FxError::ShapeSizeMismatch {
            index: 3,
            expected: N,
            actual: 3
        })
    );
    assert_eq!(
        MorphSequencer::new(Vec::new(), 1.0, Easing::Linear).err(),
        Some(FxError::NoShapes)
    );
}

#[test]
fn driver_maps_progress_to_cards_and_shapes() {
    let d = ScrollMorphDriver::new(8, 2).unwrap();
    assert_eq!(d.shape_count(), 4);
    assert_eq!(d.card_for(0.0), 0);
    assert_eq!(d.card_for(0.124), 0);
    assert_eq!(d.card_for(0.125), 1);
    assert_eq!(d.card_for(0.99), 7);
    assert_eq!(d.card_for(1.0), 7);
    assert_eq!(d.card_for(f32::NAN), 0);
    assert_eq!(d.shape_for(0.3), 1);
    assert_eq!(d.shape_for(1.0), 3);
}

#[test]
fn driver_reports_shape_only_on_change() {
    let mut d = ScrollMorphDriver::new(8, 2).unwrap();
    let mut changes = Vec::new();
    for i in 0..=100 {
        let step = d.update(i as f32 / 100.0).unwrap();
        if let Some(s) = step.changed_shape {
            changes.push(s);
        }
    }
    assert_eq!(changes, vec![1, 2, 3]);
    assert_eq!(d.active_card(), 7);
    // scrolling back up
    assert_eq!(d.update(0.1).unwrap().changed_shape, Some(0));
    assert_eq!(d.update(0.05).unwrap().changed_shape, None);
}

#[test]
fn disabled_driver_ignores_progress() {
    let mut d = ScrollMorphDriver::default();
    d.enabled = false;
    assert_eq!(d.update(0.9), None);
    assert_eq!(d.active_card(), 0);
    assert!(ScrollMorphDriver::new(0, 2).is_err());
}

#[test]
fn section_progress_spans_the_pinned_range() {
    assert_eq!(section_progress(-200.0, 3_000.0, 800.0), 0.0);
    assert_eq!(section_progress(0.0, 3_000.0, 800.0), 0.0);
    assert!((section_progress(1_100.0, 3_000.0, 800.0) - 0.5).abs() < 1e-6);
    assert_eq!(section_progress(2_200.0, 3_000.0, 800.0), 1.0);
    assert_eq!(section_progress(9_000.0, 3_000.0, 800.0), 1.0);
    // section shorter than the viewport
    assert_eq!(section_progress(10.0, 500.0, 800.0), 1.0);
    assert_eq!(section_progress(f32::NAN, 3_000.0, 800.0), 0.0);
}
