//! Zoom tracking state machine.
//!
//! One [`ZoomTracker`] belongs to one container. It turns input events into
//! [`ZoomUpdate`]s; the caller applies them to the DOM (consume the event,
//! toggle `active-zoom`, write `--x-pos`/`--y-pos`).

use crate::geometry::{Point, Rect};
use crate::input::{InputEvent, InputKind};
use crate::lock::ZoomLock;

/// What the caller should do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomUpdate {
    /// Leave the DOM and the event alone.
    Ignored,
    /// Consume the event, add `active-zoom` and publish the position.
    Track(Point),
    /// Remove `active-zoom`.
    Cancel,
    /// The lock was toggled; nothing visible changes.
    Toggled(ZoomLock),
}

/// Per-container zoom state.
#[derive(Debug, Clone, Default)]
pub struct ZoomTracker {
    lock: ZoomLock,
    active: bool,
    position: Option<Point>,
}

impl ZoomTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lock state.
    pub fn lock_state(&self) -> ZoomLock {
        self.lock
    }

    /// Whether `active-zoom` should currently be on the container.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Last published position, if any.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// React to one event. `rect` is the container's current bounding box.
    pub fn handle(&mut self, event: &InputEvent, rect: Rect) -> ZoomUpdate {
        match event.kind {
            InputKind::Select => ZoomUpdate::Toggled(self.lock.toggle()),
            InputKind::Move => self.track(event, rect),
            InputKind::Leave => {
                self.lock.unlock();
                self.cancel()
            }
            InputKind::TouchEnd => self.cancel(),
            InputKind::Enter => ZoomUpdate::Ignored,
        }
    }

    /// The container changed size. Re-clamp the published position so it
    /// stays inside the new bounds, even while locked.
    pub fn resize(&mut self, rect: Rect) -> ZoomUpdate {
        match self.position {
            Some(position) if self.active => {
                let clamped = rect.clamp(position);
                if clamped == position {
                    return ZoomUpdate::Ignored;
                }
                self.position = Some(clamped);
                ZoomUpdate::Track(clamped)
            }
            _ => ZoomUpdate::Ignored,
        }
    }

    fn track(&mut self, event: &InputEvent, rect: Rect) -> ZoomUpdate {
        // Pinch gestures belong to the browser.
        if event.is_multi_touch() {
            self.lock.unlock();
            return self.cancel();
        }
        if self.lock.is_locked() {
            return ZoomUpdate::Ignored;
        }
        // A finger on a linked image must still be able to follow the link.
        if event.inside_link && event.is_coarse() {
            return ZoomUpdate::Ignored;
        }
        let Some(client) = event.client else {
            return ZoomUpdate::Ignored;
        };

        let position = rect.zoom_position(client);
        self.active = true;
        self.position = Some(position);
        ZoomUpdate::Track(position)
    }

    fn cancel(&mut self) -> ZoomUpdate {
        self.active = false;
        ZoomUpdate::Cancel
    }
}
