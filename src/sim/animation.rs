//! Run/stop animation loop
//!
//! The loop never schedules itself directly. It asks an injected
//! [`FrameScheduler`] for the next frame, so tests can step time by hand and
//! the browser build can back it with `requestAnimationFrame`.

use crate::platform::FrameScheduler;

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

impl LoopState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopState::Stopped => "Stopped",
            LoopState::Running => "Running",
        }
    }
}

/// Clock bookkeeping, all in milliseconds
///
/// `elapsed_ms` survives a stop so that resuming continues the trajectory.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClockState {
    pub start_ms: f64,
    pub elapsed_ms: f64,
    pub prev_elapsed_ms: f64,
}

/// Timing of one processed frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    pub elapsed_ms: f64,
    /// Time since the previous frame (informational)
    pub delta_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AnimationLoop {
    pub state: LoopState,
    pub clock: ClockState,
    /// A frame has been requested and not yet delivered
    frame_pending: bool,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Flip between Stopped and Running, returning the new state
    pub fn toggle(&mut self, now_ms: f64, scheduler: &mut impl FrameScheduler) -> LoopState {
        match self.state {
            LoopState::Stopped => {
                self.clock.start_ms = now_ms - self.clock.elapsed_ms;
                self.state = LoopState::Running;
                self.schedule(scheduler);
            }
            LoopState::Running => {
                // Nothing to cancel; the next frame sees Stopped and does not reschedule
                self.state = LoopState::Stopped;
            }
        }
        self.state
    }

    /// Handle a delivered frame
    ///
    /// Returns `None` for a frame that arrives after a stop.
    pub fn on_frame(
        &mut self,
        now_ms: f64,
        scheduler: &mut impl FrameScheduler,
    ) -> Option<FrameTiming> {
        self.frame_pending = false;
        if !self.is_running() {
            return None;
        }

        // Never step backwards, even if the clock does
        let elapsed = (now_ms - self.clock.start_ms).max(self.clock.elapsed_ms);
        let delta = elapsed - self.clock.prev_elapsed_ms;
        self.clock.elapsed_ms = elapsed;
        self.clock.prev_elapsed_ms = elapsed;

        self.schedule(scheduler);
        Some(FrameTiming {
            elapsed_ms: elapsed,
            delta_ms: delta,
        })
    }

    /// Back to Stopped with zero elapsed time
    pub fn reset(&mut self) {
        self.state = LoopState::Stopped;
        self.clock = ClockState::default();
    }

    fn schedule(&mut self, scheduler: &mut impl FrameScheduler) {
        if !self.frame_pending {
            self.frame_pending = true;
            scheduler.request_frame();
        }
    }
}
