// Host-side tests for the marker reveal sequencer and globe geometry.

use fx_core::*;
use glam::{Vec2, Vec3};
use std::time::Duration;

const FRAME: f32 = 1.0 / 60.0;

fn run(seq: &mut RevealSequencer, seconds: f32) -> Vec<RevealEvent> {
    let mut out = Vec::new();
    let frames = (seconds / FRAME).ceil() as usize;
    for _ in 0..frames {
        seq.advance(FRAME, &mut out);
    }
    out
}

#[test]
fn nothing_reveals_before_the_gate_opens() {
    let mut seq = RevealSequencer::new(5, RevealTiming::default());
    assert_eq!(seq.gate(), EntranceGate::NotStarted);
    assert!(run(&mut seq, 10.0).is_empty());
    assert!((0..5).all(|i| seq.state(i) == Some(RevealState::Pending)));
    assert_eq!(seq.marker_opacity(0), 0.0);
}

#[test]
fn markers_reveal_in_order_with_stagger() {
    let timing = RevealTiming::default();
    let mut seq = RevealSequencer::new(5, timing);
    run(&mut seq, 0.5);
    assert!(seq.start_entrance_sequence());
    let t0 = seq.clock();

    let mut events = Vec::new();
    // hub is visible on the very next step
    seq.advance(FRAME, &mut events);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].index, 0);
    assert!((events[0].at - t0).abs() < 1e-6);

    events.extend(run(&mut seq, 5.0));
    let order: Vec<usize> = events.iter().map(|e| e.index).collect();
    assert_eq!(order, vec![0, 1, 2, 3, 4]);
    for pair in events.windows(2).skip(1) {
        let gap = pair[1].at - pair[0].at;
        assert!((gap - timing.stagger).abs() < 1e-4, "gap {gap}");
    }
    assert!((events[1].at - t0 - timing.spoke_start).abs() < 1e-4);
    assert!((0..5).all(|i| seq.state(i) == Some(RevealState::Revealed)));
}

#[test]
fn second_trigger_is_ignored() {
    let mut seq = RevealSequencer::new(5, RevealTiming::default());
    assert!(seq.start_entrance_sequence());
    let first = run(&mut seq, 5.0);
    assert_eq!(first.len(), 5);
    let gate = seq.gate();

    assert!(!seq.start_entrance_sequence());
    assert_eq!(seq.gate(), gate);
    assert!(run(&mut seq, 5.0).is_empty());
}

#[test]
fn fades_follow_reveal_timing() {
    let timing = RevealTiming::default();
    let mut seq = RevealSequencer::new(3, timing);
    seq.start_entrance_sequence();
    run(&mut seq, 0.4);
    // hub is revealed but still inside its fade delay
    assert_eq!(seq.state(0), Some(RevealState::Revealed));
    assert_eq!(seq.marker_opacity(0), 0.0);
    assert!(!seq.arc_visible(0), "hub owns no arc");

    run(&mut seq, 1.0);
    assert!(seq.marker_opacity(0) > 0.0);
    assert!(seq.arc_visible(1));
    assert!(seq.arc_opacity(1) > 0.0 && seq.arc_opacity(1) < timing.arc_opacity);
    assert!(!seq.arc_visible(2));
    assert_eq!(seq.arc_opacity(2), 0.0);

    run(&mut seq, 5.0);
    assert!((seq.marker_opacity(0) - 1.0).abs() < 1e-6);
    assert!((seq.arc_opacity(2) - timing.arc_opacity).abs() < 1e-6);
}

#[test]
fn lat_lon_conversion_matches_axes() {
    let r = 11.0;
    let north = lat_lon_to_vec3(90.0, 0.0, r);
    assert!((north - Vec3::new(0.0, r, 0.0)).length() < 1e-4);
    // lon 0 on the equator faces +X after the 180 degree shift
    let prime = lat_lon_to_vec3(0.0, 0.0, r);
    assert!((prime - Vec3::new(r, 0.0, 0.0)).length() < 1e-4);
    for m in &DEFAULT_MARKERS {
        let p = lat_lon_to_vec3(m.lat, m.lon, r);
        assert!((p.length() - r).abs() < 1e-3, "{}", m.id);
    }
}

#[test]
fn arcs_start_at_hub_end_at_marker_and_bulge_out() {
    let r = 11.0;
    let a = lat_lon_to_vec3(12.97, 77.59, r);
    let b = lat_lon_to_vec3(51.5, -0.13, r);
    let pts = arc_points(a, b, r, 1.5, 60);
    assert_eq!(pts.len(), 61);
    assert!((pts[0] - a).length() < 1e-5);
    assert!((pts[60] - b).length() < 1e-5);
    assert!(pts[30].length() > r);
}

#[test]
fn arcs_and_dots_blend_additively() {
    assert_eq!(ARC_BLEND, BlendMode::Additive);
    let globe = GlobeEngine::create(GlobeConfig {
        dot_count: 200,
        ..GlobeConfig::default()
    })
    .unwrap();
    assert_eq!(globe.dots().style.blend, BlendMode::Additive);
}

#[test]
fn globe_entrance_is_one_shot_through_visibility_events() {
    let mut globe = GlobeEngine::create(GlobeConfig::default()).unwrap();
    let dt = Duration::from_secs_f32(FRAME);
    globe.tick(dt, [InputEvent::Visibility { intersecting: false }]);
    assert!(!globe.reveal().has_started());

    globe.tick(dt, [InputEvent::Visibility { intersecting: true }]);
    assert!(globe.reveal().has_started());
    assert_eq!(globe.last_reveals().len(), 1);

    let mut total = 1;
    for i in 0..600 {
        let ev = if i % 50 == 0 {
            vec![
                InputEvent::Visibility { intersecting: false },
                InputEvent::Visibility { intersecting: true },
            ]
        } else {
            Vec::new()
        };
        globe.tick(dt, ev);
        total += globe.last_reveals().len();
    }
    assert_eq!(total, DEFAULT_MARKERS.len());
}

#[test]
fn hub_faces_camera_and_back_markers_are_culled() {
    let mut globe = GlobeEngine::create(GlobeConfig::default()).unwrap();
    globe.tick(Duration::ZERO, std::iter::empty());
    let hub = &globe.markers()[0];
    assert!(hub.front_facing, "hub should face the viewer initially");
    let vp = Vec2::new(800.0, 600.0);
    assert!(hub.screen.x > 0.0 && hub.screen.x < vp.x);
    assert!(hub.screen.y > 0.0 && hub.screen.y < vp.y);

    // the Americas face away from the viewer at the initial rotation
    let usa = globe.markers().iter().position(|m| m.spec.id == "USA").unwrap();
    assert!(!globe.markers()[usa].front_facing);

    // culled markers stay hidden even once revealed
    globe.start_entrance_sequence();
    for _ in 0..600 {
        globe.tick(Duration::from_secs_f32(FRAME), std::iter::empty());
    }
    for view in globe.marker_views() {
        let m = &globe.markers()[view.index];
        assert_eq!(view.visible, m.front_facing);
    }
}

#[test]
fn drag_rotates_and_hover_pauses_spin() {
    let mut globe = GlobeEngine::create(GlobeConfig::default()).unwrap();
    let dt = Duration::from_secs_f32(FRAME);
    let start = globe.rotation().target;
    globe.tick(
        dt,
        [
            InputEvent::PointerDown(Vec2::new(100.0, 100.0)),
            InputEvent::PointerMove(Vec2::new(150.0, 110.0)),
            InputEvent::PointerUp,
            InputEvent::PointerMove(Vec2::new(900.0, 900.0)),
        ],
    );
    let t = globe.rotation().target;
    assert!((t.y - start.y - 0.5).abs() < 1e-5);
    assert!((t.x - start.x - 0.1).abs() < 1e-5);

    globe.start_entrance_sequence();
    globe.tick(dt, [InputEvent::Hover(true)]);
    let held = globe.rotation().target;
    globe.tick(dt, std::iter::empty());
    assert_eq!(globe.rotation().target, held);
    globe.tick(dt, [InputEvent::Hover(false)]);
    assert!(globe.rotation().target.y > held.y);
}

#[test]
fn zero_sized_container_does_not_panic() {
    let cfg = GlobeConfig {
        viewport: Vec2::ZERO,
        ..GlobeConfig::default()
    };
    let mut globe = GlobeEngine::create(cfg).unwrap();
    globe.start_entrance_sequence();
    for _ in 0..10 {
        globe.tick(Duration::from_secs_f32(FRAME), [InputEvent::Resize(Vec2::ZERO)]);
    }
    for v in globe.marker_views() {
        assert!(v.screen.is_finite());
    }
}
