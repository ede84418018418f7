//! Last-write-wins slot for throttled updates.
//!
//! High-frequency input (mouse and touch moves) only needs its latest value
//! applied once per frame. Each new value replaces the pending one, and the
//! handle of the frame request it superseded is handed back so the caller can
//! cancel it. Nothing is queued.

/// Pending value of type `T` scheduled under a frame handle `H`.
#[derive(Debug)]
pub struct Coalescer<T, H> {
    pending: Option<(T, H)>,
}

impl<T, H> Default for Coalescer<T, H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T, H> Coalescer<T, H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `value` under `handle`, returning the superseded handle.
    pub fn replace(&mut self, value: T, handle: H) -> Option<H> {
        self.pending.replace((value, handle)).map(|(_, old)| old)
    }

    /// Take the pending value when its frame fires.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value, returning its handle for cancellation.
    pub fn cancel(&mut self) -> Option<H> {
        self.pending.take().map(|(_, handle)| handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_returns_superseded_handle() {
        let mut slot: Coalescer<u32, i32> = Coalescer::new();
        assert_eq!(slot.replace(1, 10), None);
        assert_eq!(slot.replace(2, 11), Some(10));
        assert_eq!(slot.replace(3, 12), Some(11));
        assert_eq!(slot.cancel(), Some(12));
    }

    #[test]
    fn test_last_write_wins() {
        let mut slot: Coalescer<&str, i32> = Coalescer::new();
        slot.replace("first", 1);
        slot.replace("second", 2);

        assert_eq!(slot.take(), Some("second"));
        assert_eq!(slot.take(), None);
        assert_eq!(slot.cancel(), None);
    }

    #[test]
    fn test_cancel_drops_value() {
        let mut slot: Coalescer<u8, i32> = Coalescer::new();
        slot.replace(7, 99);

        assert_eq!(slot.cancel(), Some(99));
        assert_eq!(slot.take(), None);
        assert_eq!(slot.cancel(), None);
    }
}
