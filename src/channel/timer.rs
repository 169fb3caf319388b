//! Timer Scheduling Seam
//!
//! The channel never calls `gloo` directly; retries are scheduled through
//! this trait so the reconnect loop can be driven by hand in tests.

use gloo_timers::callback::Timeout;

/// A pending one-shot timer. Dropping the handle cancels the callback.
pub trait TimerHandle {}

/// One-shot timer scheduler.
pub trait Timer {
    /// Run `callback` once after `delay_ms`, unless the returned handle is
    /// dropped first.
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Box<dyn TimerHandle>;
}

/// Browser timer backed by `setTimeout`.
pub struct BrowserTimer;

impl TimerHandle for Timeout {}

impl Timer for BrowserTimer {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Box<dyn TimerHandle> {
        Box::new(Timeout::new(delay_ms, callback))
    }
}
