// Shared visual tuning constants used by the simulation and the web front-end.

// ---------------- Pointer ----------------
pub const POINTER_SMOOTHING: f32 = 0.1; // per-frame, not dt-compensated

// ---------------- Hero sphere ----------------
pub const HERO_POINT_COUNT: usize = 15_000;
pub const HERO_RADIUS: f32 = 6.2;
pub const HERO_POINT_SIZE: f32 = 0.065;
pub const HERO_OPACITY: f32 = 1.0;
pub const HERO_ROTATION_SPEED: f32 = 0.05; // radians per second around +Y
pub const HERO_SEED: u64 = 0x4845_524F;

// Deformer
pub const NOISE_AMPLITUDE: f32 = 0.05;
pub const NOISE_TIME_FREQ: [f32; 3] = [0.5, 0.3, 0.4];
pub const NOISE_SPATIAL_FREQ: f32 = 0.5;
pub const DENT_RADIUS_SQ: f32 = 16.0; // radius 4.0
pub const DENT_FALLOFF: f32 = 0.15;
pub const DENT_STRENGTH: f32 = 0.3;
pub const ELASTICITY: f32 = 0.1;

// Interaction point on the z = 0 plane
pub const INTERSECT_LERP: f32 = 0.2;

// Hero camera
pub const HERO_FOV_DEG: f32 = 50.0;
pub const HERO_CAMERA_Z_DESKTOP: f32 = 22.0;
pub const HERO_CAMERA_Z_MOBILE: f32 = 32.0;
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;
pub const PARALLAX_RANGE: f32 = 2.0;
pub const PARALLAX_EASE: f32 = 0.05;

// Ambient dust around the hero
pub const AMBIENT_POINT_COUNT: usize = 100;
pub const AMBIENT_EXTENT: f32 = 40.0;
pub const AMBIENT_POINT_SIZE: f32 = 0.12;
pub const AMBIENT_OPACITY: f32 = 0.6;
pub const AMBIENT_SPIN_X: f32 = 0.0003; // radians per frame
pub const AMBIENT_SPIN_Y: f32 = 0.0005;

// ---------------- Morphing dock ----------------
pub const DOCK_POINT_COUNT: usize = 4_500;
pub const DOCK_POINT_SIZE: f32 = 0.035;
pub const DOCK_OPACITY: f32 = 0.7;
pub const DOCK_SEED: u64 = 0x444F_434B;
pub const DOCK_SPIN_X: f32 = 0.002; // radians per frame
pub const DOCK_SPIN_Y: f32 = 0.005;
pub const DOCK_FOV_DEG: f32 = 75.0;
pub const DOCK_CAMERA_Z: f32 = 14.0;
pub const DOCK_VIEWPORT: [f32; 2] = [550.0, 700.0];

pub const MORPH_DURATION_SEC: f32 = 1.5;
pub const CARD_COUNT: usize = 8;
pub const CARDS_PER_SHAPE: usize = 2;
pub const DESKTOP_MIN_WIDTH_PX: f32 = 1025.0;

// Shape geometry
pub const SHELL_RADIUS: f32 = 4.5;
pub const SHELL_JITTER: f32 = 0.6;
pub const CUBE_SIDE: f32 = 8.5;
pub const TORUS_MAJOR: f32 = 5.0;
pub const TORUS_MINOR: f32 = 1.8;
pub const FACETED_RADIUS: f32 = 5.8;
pub const FACET_STEPS: f32 = 8.0;

// Brand palette
pub const COLOR_ACCENT: [f32; 3] = [0.41, 0.41, 0.67]; // #696AAC
pub const COLOR_BRAND: [f32; 3] = [0.24, 0.25, 0.49]; // #3E3F7E
pub const COLOR_BRAND_LIGHT: [f32; 3] = [0.52, 0.53, 0.89]; // #8587E3
pub const COLOR_BRAND_DARK: [f32; 3] = [0.14, 0.14, 0.28]; // #232448
pub const COLOR_WHITE: [f32; 3] = [1.0, 1.0, 1.0];

// ---------------- Globe ----------------
pub const GLOBE_DOT_COUNT: usize = 8_000;
pub const GLOBE_RADIUS: f32 = 11.0;
pub const GLOBE_DOT_SIZE: f32 = 0.1;
pub const GLOBE_DOT_OPACITY: f32 = 0.25;
pub const GLOBE_OFFSET_Y_FACTOR: f32 = -0.35; // group y = radius * factor
pub const GLOBE_INITIAL_ROTATION: [f32; 2] = [0.2, -2.9]; // (x, y), hub faces camera
pub const GLOBE_ROTATION_EASE: f32 = 0.05;
pub const GLOBE_AUTO_SPIN: f32 = 0.0006; // radians per frame
pub const GLOBE_DRAG_SENSITIVITY: f32 = 0.01; // radians per pixel
pub const GLOBE_FOV_DEG: f32 = 40.0;
pub const GLOBE_CAMERA_Z: f32 = 28.0;
pub const GLOBE_VISIBILITY_THRESHOLD: f64 = 0.3;

pub const ARC_SEGMENTS: usize = 60;
pub const ARC_LIFT: f32 = 1.5; // control point distance in radii
pub const ARC_OPACITY: f32 = 0.35;
pub const ARC_FADE_SEC: f32 = 1.5;

// Reveal timing
pub const HUB_REVEAL_DELAY_SEC: f32 = 0.5;
pub const HUB_FADE_SEC: f32 = 1.2;
pub const SPOKE_REVEAL_START_SEC: f32 = 1.2;
pub const REVEAL_STAGGER_SEC: f32 = 0.4;
pub const SPOKE_FADE_SEC: f32 = 1.0;
