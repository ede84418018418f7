//! Zoom lock: a toggle that freezes the published position.

/// Lock state of one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomLock {
    /// Motion updates the position.
    #[default]
    Unlocked,
    /// Motion is ignored; the last position stays put.
    Locked,
}

impl ZoomLock {
    /// Freeze tracking.
    pub fn lock(&mut self) {
        *self = ZoomLock::Locked;
    }

    /// Resume tracking.
    pub fn unlock(&mut self) {
        *self = ZoomLock::Unlocked;
    }

    /// Flip the state and return the new one.
    pub fn toggle(&mut self) -> ZoomLock {
        *self = match self {
            ZoomLock::Unlocked => ZoomLock::Locked,
            ZoomLock::Locked => ZoomLock::Unlocked,
        };
        *self
    }

    pub fn is_locked(&self) -> bool {
        *self == ZoomLock::Locked
    }
}
