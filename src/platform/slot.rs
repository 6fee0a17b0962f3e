//! Ownership of the one outstanding frame request
//!
//! The slot holds the request id together with the callback registered for
//! it. Stopping takes both out, so a cancelled callback (and everything it
//! captured) is released instead of leaking.

use std::cell::{Cell, RefCell};

pub(crate) struct FrameSlot<C> {
    pending: RefCell<Option<(i32, C)>>,
    stopped: Cell<bool>,
}

impl<C> FrameSlot<C> {
    pub fn new() -> Self {
        Self {
            pending: RefCell::new(None),
            stopped: Cell::new(false),
        }
    }

    /// Remember a scheduled request; replaces (and drops) any previous one
    pub fn arm(&self, id: i32, callback: C) {
        *self.pending.borrow_mut() = Some((id, callback));
    }

    /// The request fired: hand back its callback so the caller decides when
    /// to release it
    pub fn fire(&self) -> Option<C> {
        self.pending.take().map(|(_, callback)| callback)
    }

    /// Mark stopped and release the pending callback
    ///
    /// Returns the id to cancel, `None` if nothing was pending or the slot was
    /// already stopped.
    pub fn stop(&self) -> Option<i32> {
        if self.stopped.replace(true) {
            return None;
        }
        self.pending.take().map(|(id, _)| id)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_stop_releases_pending_callback() {
        let captured = Rc::new(());
        let slot = FrameSlot::new();
        slot.arm(7, captured.clone());
        assert_eq!(Rc::strong_count(&captured), 2);

        assert_eq!(slot.stop(), Some(7));
        assert_eq!(Rc::strong_count(&captured), 1, "cancelled callback leaked");
        assert!(slot.is_stopped());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let slot = FrameSlot::new();
        slot.arm(1, ());
        assert_eq!(slot.stop(), Some(1));
        assert_eq!(slot.stop(), None);
    }

    #[test]
    fn test_fire_hands_back_callback() {
        let captured = Rc::new(());
        let slot = FrameSlot::new();
        slot.arm(3, captured.clone());

        let callback = slot.fire();
        assert!(callback.is_some());
        assert_eq!(slot.stop(), None, "fired request has nothing to cancel");
        drop(callback);
        assert_eq!(Rc::strong_count(&captured), 1);
    }

    #[test]
    fn test_rearm_drops_previous_callback() {
        let first = Rc::new(());
        let slot = FrameSlot::new();
        slot.arm(1, first.clone());
        slot.arm(2, Rc::new(()));
        assert_eq!(Rc::strong_count(&first), 1);
        assert_eq!(slot.stop(), Some(2));
    }
}
