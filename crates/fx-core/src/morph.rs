//! Timed morphs between precomputed shapes, and the scroll driver that picks
//! which shape to morph to.

use crate::cloud::{PointCloud, ShapeDefinition};
use crate::constants::{CARDS_PER_SHAPE, CARD_COUNT, MORPH_DURATION_SEC};
use crate::easing::Easing;
use crate::error::{FxError, FxResult};
use glam::Vec3;

struct ActiveMorph {
    target: usize,
    start_positions: Vec<Vec3>,
    start_color: Vec3,
    elapsed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MorphStatus {
    Idle,
    Running { target: usize, progress: f32 },
    Completed { shape: usize },
}

/// Moves a cloud between shape definitions over a fixed, eased duration.
pub struct MorphSequencer {
    shapes: Vec<ShapeDefinition>,
    current: usize,
    color: Vec3,
    duration: f32,
    easing: Easing,
    active: Option<ActiveMorph>,
}

impl MorphSequencer {
    /// All shapes must have the same point count; shape 0 is the initial state.
    pub fn new(shapes: Vec<ShapeDefinition>, duration: f32, easing: Easing) -> FxResult<Self> {
        let first = shapes.first().ok_or(FxError::NoShapes)?;
        let expected = first.len();
        for (index, s) in shapes.iter().enumerate() {
            if s.len() != expected {
                return Err(FxError::ShapeSizeMismatch {
                    index,
                    expected,
                    actual: s.len(),
                });
            }
        }
        let color = Vec3::from(first.color());
        Ok(Self {
            shapes,
            current: 0,
            color,
            duration: duration.max(0.0),
            easing,
            active: None,
        })
    }

    pub fn with_default_timing(shapes: Vec<ShapeDefinition>) -> FxResult<Self> {
        Self::new(shapes, MORPH_DURATION_SEC, Easing::ExpoInOut)
    }

    pub fn shapes(&self) -> &[ShapeDefinition] {
        &self.shapes
    }

    /// Index of the last shape fully reached.
    pub fn current_shape_index(&self) -> usize {
        self.current
    }

    pub fn is_morphing(&self) -> bool {
        self.active.is_some()
    }

    /// Where the cloud is heading: the in-flight target, or the current shape.
    pub fn destination(&self) -> usize {
        self.active.as_ref().map_or(self.current, |m| m.target)
    }

    pub fn color(&self) -> [f32; 3] {
        self.color.to_array()
    }

    /// Starts a morph from whatever the cloud shows right now.
    ///
    /// Returns false without touching anything when `target` is already the
    /// destination or does not name a shape.
    pub fn morph_to(&mut self, target: usize, cloud: &PointCloud) -> bool {
        if target >= self.shapes.len() {
            log::warn!("[morph] ignoring unknown shape {target}");
            return false;
        }
        if target == self.destination() {
            return false;
        }
        log::debug!(
            "[morph] {} -> {} ({})",
            self.current,
            target,
            self.shapes[target].name()
        );
        self.active = Some(ActiveMorph {
            target,
            start_positions: cloud.positions().to_vec(),
            start_color: self.color,
            elapsed: 0.0,
        });
        true
    }

    /// Advances an in-flight morph by `dt` seconds and writes the cloud.
    pub fn tick(&mut self, dt: f32, cloud: &mut PointCloud) -> MorphStatus {
        let Some(active) = self.active.as_mut() else {
            return MorphStatus::Idle;
        };
        active.elapsed += dt.max(0.0);
        let linear = if self.duration > 0.0 {
            (active.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        let eased = self.easing.apply(linear);
        let shape = &self.shapes[active.target];

        for ((cur, start), end) in cloud
            .positions_mut()
            .iter_mut()
            .zip(&active.start_positions)
            .zip(shape.positions())
        {
            *cur = if linear >= 1.0 { *end } else { start.lerp(*end, eased) };
        }
        self.color = if linear >= 1.0 {
            Vec3::from(shape.color())
        } else {
            active.start_color.lerp(Vec3::from(shape.color()), eased)
        };
        cloud.fill_color(self.color.to_array());

        if linear >= 1.0 {
            let shape = active.target;
            self.current = shape;
            self.active = None;
            MorphStatus::Completed { shape }
        } else {
            MorphStatus::Running {
                target: active.target,
                progress: linear,
            }
        }
    }
}

/// Progress through a section pinned from "top hits top" to "bottom hits
/// bottom". `scrolled` is how far the section top has moved above the
/// viewport top, in CSS pixels.
pub fn section_progress(scrolled: f32, section_height: f32, viewport_height: f32) -> f32 {
    let range = section_height - viewport_height;
    if !scrolled.is_finite() || !range.is_finite() {
        return 0.0;
    }
    if range <= 0.0 {
        return if scrolled > 0.0 { 1.0 } else { 0.0 };
    }
    (scrolled / range).clamp(0.0, 1.0)
}

/// Result of feeding one scroll-progress sample to the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollStep {
    /// Highlighted card for this progress.
    pub card: usize,
    /// Shape index when it differs from the previous sample.
    pub changed_shape: Option<usize>,
}

/// Maps continuous scroll progress to a card and a shape index.
#[derive(Clone, Debug)]
pub struct ScrollMorphDriver {
    card_count: usize,
    cards_per_shape: usize,
    last_shape: usize,
    active_card: usize,
    pub enabled: bool,
}

impl Default for ScrollMorphDriver {
    fn default() -> Self {
        Self {
            card_count: CARD_COUNT,
            cards_per_shape: CARDS_PER_SHAPE,
            last_shape: 0,
            active_card: 0,
            enabled: true,
        }
    }
}

impl ScrollMorphDriver {
    pub fn new(card_count: usize, cards_per_shape: usize) -> FxResult<Self> {
        if card_count == 0 || cards_per_shape == 0 {
            return Err(FxError::CardLayout {
                cards: card_count,
                group: cards_per_shape,
            });
        }
        Ok(Self {
            card_count,
            cards_per_shape,
            ..Self::default()
        })
    }

    pub fn shape_count(&self) -> usize {
        self.card_count.div_ceil(self.cards_per_shape)
    }

    pub fn card_for(&self, progress: f32) -> usize {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        ((p * self.card_count as f32).floor() as usize).min(self.card_count - 1)
    }

    pub fn shape_for(&self, progress: f32) -> usize {
        self.card_for(progress) / self.cards_per_shape
    }

    pub fn active_card(&self) -> usize {
        self.active_card
    }

    /// `None` while disabled (narrow layouts do not pin the section).
    pub fn update(&mut self, progress: f32) -> Option<ScrollStep> {
        if !self.enabled {
            return None;
        }
        let card = self.card_for(progress);
        let shape = card / self.cards_per_shape;
        self.active_card = card;
        let changed_shape = (shape != self.last_shape).then_some(shape);
        self.last_shape = shape;
        Some(ScrollStep {
            card,
            changed_shape,
        })
    }
}
