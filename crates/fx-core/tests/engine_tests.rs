// Host-side tests for the hero and dock scene contexts.

use fx_core::*;
use glam::{Vec2, Vec3};
use std::time::Duration;

const FRAME: f32 = 1.0 / 60.0;

fn small_hero(viewport: Vec2) -> HeroEngine {
    HeroEngine::create(HeroConfig {
        point_count: 800,
        viewport,
        ..HeroConfig::default()
    })
    .unwrap()
}

fn small_dock(window_width: f32) -> DockEngine {
    DockEngine::create(DockConfig {
        point_count: 300,
        window_width,
        ..DockConfig::default()
    })
    .unwrap()
}

fn frame() -> Duration {
    Duration::from_secs_f32(FRAME)
}

#[test]
fn hero_camera_distance_follows_breakpoint() {
    let mut hero = small_hero(Vec2::new(500.0, 800.0));
    assert_eq!(hero.camera().eye.z, HERO_CAMERA_Z_MOBILE);
    hero.tick(frame(), [InputEvent::Resize(Vec2::new(1280.0, 800.0))]);
    assert_eq!(hero.camera().eye.z, HERO_CAMERA_Z_DESKTOP);
    hero.tick(frame(), [InputEvent::Resize(Vec2::new(767.0, 800.0))]);
    assert_eq!(hero.camera().eye.z, HERO_CAMERA_Z_MOBILE);
}

#[test]
fn hero_without_pointer_stays_centered() {
    let mut hero = small_hero(Vec2::new(1280.0, 800.0));
    for _ in 0..30 {
        hero.tick(frame(), std::iter::empty());
    }
    assert!(hero.interaction_point().length() < 1e-3);
    assert!(hero.camera().eye.truncate().length() < 1e-6);
    assert!((hero.elapsed() - 30.0 * FRAME).abs() < 1e-4);
}

#[test]
fn pointer_drives_interaction_point_and_parallax() {
    let vp = Vec2::new(1280.0, 800.0);
    let mut hero = small_hero(vp);
    hero.tick(frame(), [InputEvent::PointerMove(Vec2::new(vp.x, vp.y / 2.0))]);
    for _ in 0..120 {
        hero.tick(frame(), std::iter::empty());
    }
    let p = hero.interaction_point();
    assert!(p.x > 1.0, "interaction point {p:?}");
    assert!(p.z.abs() < 1e-4, "stays on the z = 0 plane");
    assert!(hero.camera().eye.x > 0.0 && hero.camera().eye.x <= PARALLAX_RANGE);
    assert_eq!(hero.camera().target, Vec3::ZERO);
}

#[test]
fn hero_rotates_and_dust_spins_every_frame() {
    let mut hero = small_hero(Vec2::new(1280.0, 800.0));
    let before = hero.ambient_matrix();
    hero.tick(Duration::from_secs(2), std::iter::empty());
    let x = hero.cloud_matrix().transform_vector3(Vec3::X);
    let expected = 2.0 * HERO_ROTATION_SPEED;
    assert!((x.z + expected.sin()).abs() < 1e-5, "{x:?}");
    assert_ne!(hero.ambient_matrix(), before);
    assert!(hero.cloud().is_dirty());
}

#[test]
fn hero_dent_follows_cloud_rotation() {
    // A quarter turn after ten seconds of simulated frames.
    let mut hero = HeroEngine::create(HeroConfig {
        point_count: 6000,
        viewport: Vec2::new(1280.0, 800.0),
        rotation_speed: std::f32::consts::FRAC_PI_2 / 10.0,
        ..HeroConfig::default()
    })
    .unwrap();
    // right of centre, at mid height: NDC (0.317, 0)
    hero.tick(frame(), [InputEvent::PointerMove(Vec2::new(843.0, 400.0))]);
    for _ in 1..600 {
        hero.tick(frame(), std::iter::empty());
    }

    let hit = hero.interaction_point();
    assert!(hit.x > 4.8 && hit.x < 5.6 && hit.y.abs() < 0.3, "interaction point {hit:?}");
    let r = HERO_RADIUS;

    // In the cloud's frame the pointer sits at x = hit.x * cos(quarter turn),
    // so the dent cylinder runs through the centre and the rims at world
    // x = ±r sink. Without the inverse rotation it would sit at local
    // x = hit.x, which the quarter turn carries to the back of the sphere.
    let world = hero.cloud_matrix();
    let cloud = hero.cloud();
    let near = |centre: Vec3, within: f32| -> Vec<f32> {
        cloud
            .rest()
            .iter()
            .zip(cloud.positions())
            .filter(|(rest, _)| world.transform_point3(**rest).distance(centre) < within)
            .map(|(_, cur)| cur.length())
            .collect()
    };

    for centre in [Vec3::new(r, 0.0, 0.0), Vec3::new(-r, 0.0, 0.0)] {
        let radii = near(centre, 1.2);
        assert!(!radii.is_empty());
        assert!(radii.iter().all(|&l| l < 0.85 * r), "rim {centre:?}: {radii:?}");
    }

    let back = Vec3::new((r * r - hit.x * hit.x).sqrt(), 0.0, -hit.x);
    let radii = near(back, 0.6);
    assert!(!radii.is_empty());
    assert!(radii.iter().all(|&l| l > 0.95 * r), "back {back:?}: {radii:?}");
}

#[test]
fn hero_survives_zero_sized_viewport() {
    let mut hero = small_hero(Vec2::ZERO);
    for i in 0..20 {
        let ev = [
            InputEvent::PointerMove(Vec2::new(i as f32, i as f32)),
            InputEvent::Resize(Vec2::ZERO),
        ];
        hero.tick(frame(), ev);
    }
    assert!(hero.interaction_point().is_finite());
    assert!(hero.cloud().positions().iter().all(|p| p.is_finite()));
    hero.dispose();
}

#[test]
fn hero_rejects_invalid_config() {
    let err = HeroEngine::create(HeroConfig {
        point_count: 0,
        ..HeroConfig::default()
    });
    assert!(err.is_err());
    let err = HeroEngine::create(HeroConfig {
        radius: -1.0,
        ..HeroConfig::default()
    });
    assert!(matches!(err, Err(FxError::NonPositive { .. })));
}

#[test]
fn dock_morphs_only_when_the_shape_changes() {
    let mut dock = small_dock(1280.0);
    assert_eq!(dock.on_scroll(0.0).map(|s| s.changed_shape), Some(None));
    assert!(!dock.morph().is_morphing());

    let step = dock.on_scroll(0.3).unwrap();
    assert_eq!(step.card, 2);
    assert_eq!(step.changed_shape, Some(1));
    assert!(dock.morph().is_morphing());

    // next card, same shape
    assert_eq!(dock.on_scroll(0.4).unwrap().changed_shape, None);
    assert_eq!(dock.active_card(), 3);

    let mut completed = false;
    for _ in 0..120 {
        dock.tick(frame(), std::iter::empty());
        completed |= dock.last_status() == MorphStatus::Completed { shape: 1 };
    }
    assert!(completed);
    assert_eq!(dock.morph().current_shape_index(), 1);
    assert_eq!(dock.cloud().colors()[0], COLOR_BRAND);
    dock.dispose();
}

#[test]
fn dock_scroll_events_flow_through_tick() {
    let mut dock = small_dock(1280.0);
    dock.tick(frame(), [InputEvent::ScrollProgress(0.9)]);
    assert_eq!(dock.active_card(), 7);
    assert_eq!(dock.morph().destination(), 3);
}

#[test]
fn narrow_window_disables_scroll_morphing() {
    let mut dock = small_dock(800.0);
    assert!(!dock.driver().enabled);
    assert_eq!(dock.on_scroll(0.9), None);
    assert!(!dock.morph().is_morphing());

    dock.tick(frame(), [InputEvent::Resize(Vec2::new(1400.0, 900.0))]);
    assert!(dock.driver().enabled);
    assert!(dock.on_scroll(0.9).is_some());
    assert!(dock.morph().is_morphing());
}

#[test]
fn dock_spins_while_idle() {
    let mut dock = small_dock(1280.0);
    dock.tick(frame(), std::iter::empty());
    assert_eq!(dock.last_status(), MorphStatus::Idle);
    let y = dock.cloud_matrix().transform_vector3(Vec3::Z);
    assert!(y.x.abs() > 0.0);
}

#[test]
fn dock_rejects_bad_layouts() {
    let no_shapes = DockEngine::create(DockConfig {
        recipes: Vec::new(),
        ..DockConfig::default()
    });
    assert_eq!(no_shapes.err(), Some(FxError::NoShapes));
    let no_cards = DockEngine::create(DockConfig {
        point_count: 10,
        card_count: 0,
        ..DockConfig::default()
    });
    assert!(matches!(no_cards, Err(FxError::CardLayout { .. })));

    // ten cards in pairs need a fifth shape
    let too_many_cards = DockEngine::create(DockConfig {
        point_count: 10,
        card_count: 10,
        cards_per_shape: 2,
        ..DockConfig::default()
    });
    assert_eq!(
        too_many_cards.err(),
        Some(FxError::TooFewShapes {
            needed: 5,
            available: 4
        })
    );
    let odd_cards = DockConfig {
        point_count: 10,
        card_count: 7,
        cards_per_shape: 2,
        ..DockConfig::default()
    };
    assert!(odd_cards.validate().is_ok());
}

#[test]
fn dock_shapes_are_seeded_per_index() {
    let cfg = DockConfig {
        point_count: 50,
        ..DockConfig::default()
    };
    let a = cfg.build_shapes();
    let b = cfg.build_shapes();
    assert_eq!(a.len(), 4);
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.positions(), y.positions());
        assert_eq!(x.len(), 50);
    }
    assert_eq!(a[0].name(), "sphere");
    assert_eq!(a[3].color(), COLOR_BRAND_DARK);
}
