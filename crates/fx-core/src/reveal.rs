//! One-shot, staggered reveal of globe markers and their arcs.

use crate::constants::{
    ARC_FADE_SEC, ARC_OPACITY, HUB_FADE_SEC, HUB_REVEAL_DELAY_SEC, REVEAL_STAGGER_SEC,
    SPOKE_FADE_SEC, SPOKE_REVEAL_START_SEC,
};
use crate::easing::{Easing, Tween};

/// The entrance runs at most once per scene; there is no way back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntranceGate {
    NotStarted,
    Started { at: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTiming {
    pub hub_delay: f32,
    pub hub_fade: f32,
    pub spoke_start: f32,
    pub stagger: f32,
    pub spoke_fade: f32,
    pub arc_fade: f32,
    pub arc_opacity: f32,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            hub_delay: HUB_REVEAL_DELAY_SEC,
            hub_fade: HUB_FADE_SEC,
            spoke_start: SPOKE_REVEAL_START_SEC,
            stagger: REVEAL_STAGGER_SEC,
            spoke_fade: SPOKE_FADE_SEC,
            arc_fade: ARC_FADE_SEC,
            arc_opacity: ARC_OPACITY,
        }
    }
}

impl RevealTiming {
    /// Offset from the trigger at which marker `index` becomes visible.
    pub fn offset(&self, index: usize) -> f32 {
        match index {
            0 => 0.0,
            i => self.spoke_start + (i - 1) as f32 * self.stagger,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealEvent {
    pub index: usize,
    /// Scene time the reveal was scheduled for.
    pub at: f32,
}

#[derive(Clone, Debug)]
struct Slot {
    state: RevealState,
    reveal_at: Option<f32>,
    fade: Tween,
    arc: Option<Tween>,
}

/// Per-marker `Pending -> Revealed` machines behind a single entrance gate.
///
/// Marker 0 is the hub: it reveals at the trigger and has no arc. Every other
/// marker owns the arc from the hub and reveals with it.
#[derive(Clone, Debug)]
pub struct RevealSequencer {
    gate: EntranceGate,
    timing: RevealTiming,
    clock: f32,
    slots: Vec<Slot>,
}

impl RevealSequencer {
    pub fn new(marker_count: usize, timing: RevealTiming) -> Self {
        let slots = (0..marker_count)
            .map(|i| {
                let (delay, fade) = if i == 0 {
                    (timing.hub_delay, timing.hub_fade)
                } else {
                    (0.0, timing.spoke_fade)
                };
                Slot {
                    state: RevealState::Pending,
                    reveal_at: None,
                    fade: Tween::new(0.0, 1.0, fade, Easing::Power1Out).with_delay(delay),
                    arc: (i > 0).then(|| {
                        Tween::new(0.0, timing.arc_opacity, timing.arc_fade, Easing::Power1Out)
                    }),
                }
            })
            .collect();
        Self {
            gate: EntranceGate::NotStarted,
            timing,
            clock: 0.0,
            slots,
        }
    }

    pub fn gate(&self) -> EntranceGate {
        self.gate
    }

    pub fn has_started(&self) -> bool {
        matches!(self.gate, EntranceGate::Started { .. })
    }

    pub fn timing(&self) -> &RevealTiming {
        &self.timing
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Opens the gate and schedules every reveal. Later calls do nothing and
    /// return false.
    pub fn start_entrance_sequence(&mut self) -> bool {
        if self.has_started() {
            return false;
        }
        let now = self.clock;
        self.gate = EntranceGate::Started { at: now };
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.reveal_at = Some(now + self.timing.offset(i));
        }
        log::info!("[globe] entrance sequence started at {now:.2}s");
        true
    }

    /// Advances scene time and pushes every marker revealed during this step.
    pub fn advance(&mut self, dt: f32, out: &mut Vec<RevealEvent>) {
        self.clock += dt.max(0.0);
        let now = self.clock;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            match (slot.state, slot.reveal_at) {
                (RevealState::Pending, Some(at)) if at <= now => {
                    slot.state = RevealState::Revealed;
                    // Catch up on the part of the step after the reveal.
                    let late = now - at;
                    slot.fade.advance(late);
                    if let Some(arc) = slot.arc.as_mut() {
                        arc.advance(late);
                    }
                    out.push(RevealEvent { index, at });
                }
                (RevealState::Revealed, _) => {
                    slot.fade.advance(dt);
                    if let Some(arc) = slot.arc.as_mut() {
                        arc.advance(dt);
                    }
                }
                _ => {}
            }
        }
    }

    pub fn state(&self, index: usize) -> Option<RevealState> {
        self.slots.get(index).map(|s| s.state)
    }

    pub fn revealed_at(&self, index: usize) -> Option<f32> {
        self.slots
            .get(index)
            .filter(|s| s.state == RevealState::Revealed)
            .and_then(|s| s.reveal_at)
    }

    pub fn marker_opacity(&self, index: usize) -> f32 {
        self.slots
            .get(index)
            .filter(|s| s.state == RevealState::Revealed)
            .map_or(0.0, |s| s.fade.value())
    }

    /// Arc ending at marker `index`, visible once that marker is revealed.
    pub fn arc_visible(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .is_some_and(|s| s.arc.is_some() && s.state == RevealState::Revealed)
    }

    pub fn arc_opacity(&self, index: usize) -> f32 {
        self.slots
            .get(index)
            .filter(|s| s.state == RevealState::Revealed)
            .and_then(|s| s.arc.as_ref())
            .map_or(0.0, |t| t.value())
    }
}
