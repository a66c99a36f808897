use crate::constants::POINTER_SMOOTHING;
use glam::Vec2;

/// Smoothed pointer in normalized device coordinates.
///
/// Input overwrites the target; every frame the current value moves a fixed
/// fraction of the remaining distance. The fraction is applied per frame and
/// is not scaled by frame duration, so perceived speed follows refresh rate.
#[derive(Clone, Copy, Debug)]
pub struct PointerTracker {
    target: Vec2,
    current: Vec2,
    smoothing: f32,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(POINTER_SMOOTHING)
    }
}

impl PointerTracker {
    pub fn new(smoothing: f32) -> Self {
        Self {
            target: Vec2::ZERO,
            current: Vec2::ZERO,
            smoothing: smoothing.clamp(0.0, 1.0),
        }
    }

    /// Map client pixels to NDC (x right, y up). `None` for an empty viewport.
    pub fn normalize(screen: Vec2, viewport: Vec2) -> Option<Vec2> {
        if !(viewport.x > 0.0 && viewport.y > 0.0) {
            return None;
        }
        let x = (screen.x / viewport.x) * 2.0 - 1.0;
        let y = -(screen.y / viewport.y) * 2.0 + 1.0;
        Some(Vec2::new(x, y).clamp(Vec2::NEG_ONE, Vec2::ONE))
    }

    /// Latest input wins; a zero-sized viewport leaves the target untouched.
    pub fn update(&mut self, screen: Vec2, viewport: Vec2) {
        if let Some(ndc) = Self::normalize(screen, viewport) {
            self.target = ndc;
        }
    }

    pub fn set_target(&mut self, ndc: Vec2) {
        self.target = ndc;
    }

    pub fn tick(&mut self) -> Vec2 {
        self.current += (self.target - self.current) * self.smoothing;
        self.current
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }
}
