//! Input events recorded by the front-end and drained once per frame.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Mouse moved or first touch point changed, in client pixels.
    PointerMove(Vec2),
    PointerDown(Vec2),
    PointerUp,
    /// Viewport (or container) resized, in CSS pixels.
    Resize(Vec2),
    /// Visibility signal for the engine's container.
    Visibility { intersecting: bool },
    /// Normalized scroll progress through the pinned section.
    ScrollProgress(f32),
    /// Pointer entered/left an overlay element.
    Hover(bool),
}

/// Ordered queue of pending input.
///
/// Events are applied in arrival order when drained, so for any single field
/// the last event written wins.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Moves everything queued so far out, leaving the queue empty.
    pub fn take(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}
