//! Easing curves and a minimal scalar tween.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Quadratic ease-out; the default curve for fades.
    Power1Out,
    /// Exponential ease-in-out used for shape morphs.
    ExpoInOut,
}

impl Easing {
    /// Map linear progress to eased progress. Input is clamped to [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::ExpoInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    (2.0f32).powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - (2.0f32).powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }
}

/// Interpolates one value over `duration` seconds after `delay` seconds.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub delay: f32,
    pub duration: f32,
    pub easing: Easing,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            delay: 0.0,
            duration,
            easing,
            elapsed: 0.0,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Linear progress in [0, 1], ignoring easing.
    pub fn progress(&self) -> f32 {
        let t = self.elapsed - self.delay;
        if t <= 0.0 {
            0.0
        } else if self.duration <= 0.0 {
            1.0
        } else {
            (t / self.duration).min(1.0)
        }
    }

    pub fn value(&self) -> f32 {
        let e = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * e
    }

    pub fn advance(&mut self, dt: f32) -> f32 {
        if !self.is_finished() {
            self.elapsed += dt.max(0.0);
        }
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}
