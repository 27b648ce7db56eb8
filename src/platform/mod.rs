//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic millisecond clock)
//! - Frame scheduling ("run on next frame")

use std::cell::Cell;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::PerformanceClock;

/// Monotonic millisecond timestamp source
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Capability to ask for one more frame callback
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Scheduler that only records the request
///
/// The host drains it with [`PendingFrame::take`] after each handler and, if
/// set, registers the real frame callback. Keeps state mutation and
/// scheduling on the same single thread of control.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingFrame {
    requested: bool,
}

impl PendingFrame {
    /// Return and clear the request flag
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }
}

impl FrameScheduler for PendingFrame {
    fn request_frame(&mut self) {
        self.requested = true;
    }
}

/// Hand-driven clock for tests and the headless native run
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms.max(0.0));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_frame_take_clears() {
        let mut frames = PendingFrame::default();
        assert!(!frames.take());
        frames.request_frame();
        frames.request_frame();
        assert!(frames.take());
        assert!(!frames.take());
    }

    #[test]
    fn test_manual_clock_is_monotonic() {
        let clock = ManualClock::new(10.0);
        clock.advance(5.0);
        clock.advance(-100.0);
        assert_eq!(clock.now_ms(), 15.0);
    }
}
