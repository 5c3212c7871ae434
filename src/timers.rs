//! Cancellable delayed callbacks.
//!
//! A `TimerSlot` owns at most one `gloo-timers` timeout. Arming it again drops
//! (and so cancels) the previous one, which is all the debouncing the page
//! needs: only the most recently armed callback can ever run.

use std::cell::RefCell;

use gloo_timers::callback::Timeout;

/// Holds at most one pending timeout.
#[derive(Default)]
pub struct TimerSlot {
    pending: RefCell<Option<Timeout>>,
}

impl TimerSlot {
    /// Schedule `callback` after `delay_ms`, cancelling whatever was pending.
    pub fn arm<F: FnOnce() + 'static>(&self, delay_ms: u32, callback: F) {
        *self.pending.borrow_mut() = Some(Timeout::new(delay_ms, callback));
    }

    /// Cancel the pending timeout, if any. Dropping a `Timeout` clears it.
    pub fn clear(&self) {
        drop(self.pending.take());
    }
}
