//! Simulation state: projectile plus the loop that drives it
//!
//! Owned by a single thread of control and mutated only inside event
//! handlers or frame callbacks.

use glam::DVec2;

use super::animation::{AnimationLoop, FrameTiming, LoopState};
use super::projectile::{LaunchParams, ProjectileState};
use crate::consts::MS_PER_SECOND;
use crate::platform::FrameScheduler;

#[derive(Debug, Clone)]
pub struct SimulationState {
    pub projectile: ProjectileState,
    pub animation: AnimationLoop,
}

impl SimulationState {
    pub fn new(initial_position: DVec2, launch: LaunchParams, gravity: f64, radius: f64) -> Self {
        Self {
            projectile: ProjectileState::new(initial_position, launch, gravity, radius),
            animation: AnimationLoop::new(),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    /// Elapsed simulation time in seconds
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.animation.clock.elapsed_ms / MS_PER_SECOND
    }

    /// Run/stop toggle
    pub fn toggle(&mut self, now_ms: f64, scheduler: &mut impl FrameScheduler) -> LoopState {
        let state = self.animation.toggle(now_ms, scheduler);
        log::info!(
            "Simulation {} at t={:.3}s",
            state.as_str().to_lowercase(),
            self.elapsed_secs()
        );
        state
    }

    /// Advance to `now_ms`; returns the frame timing when a redraw is due
    pub fn frame(
        &mut self,
        now_ms: f64,
        scheduler: &mut impl FrameScheduler,
    ) -> Option<FrameTiming> {
        let timing = self.animation.on_frame(now_ms, scheduler)?;
        let t = timing.elapsed_ms / MS_PER_SECOND;
        if self.projectile.update(t) {
            log::info!(
                "Ground contact at t={:.3}s, x={:.3}",
                t,
                self.projectile.current_position.x
            );
        }
        log::trace!(
            "frame t={:.3}s dt={:.1}ms pos=({:.3}, {:.3})",
            t,
            timing.delta_ms,
            self.projectile.current_position.x,
            self.projectile.current_position.y
        );
        Some(timing)
    }

    /// Stop and put the projectile back at its launch point
    pub fn reset(&mut self) {
        self.animation.reset();
        self.projectile.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::platform::{Clock, ManualClock, PendingFrame};

    fn sim() -> SimulationState {
        SimulationState::new(
            DVec2::new(2.5, 2.5),
            LaunchParams::default(),
            GRAVITY,
            PROJECTILE_RADIUS,
        )
    }

    /// Deliver frames every `step_ms` until `until_ms`, as a browser would
    fn run_frames(
        sim: &mut SimulationState,
        clock: &ManualClock,
        frames: &mut PendingFrame,
        until_ms: f64,
        step_ms: f64,
    ) {
        while clock.now_ms() < until_ms {
            if !frames.take() {
                break;
            }
            clock.advance(step_ms);
            sim.frame(clock.now_ms(), frames);
        }
    }

    #[test]
    fn test_stopped_frame_changes_nothing() {
        let mut sim = sim();
        let mut frames = PendingFrame::default();
        assert!(sim.frame(1000.0, &mut frames).is_none());
        assert_eq!(sim.projectile.current_position, DVec2::new(2.5, 2.5));
        assert!(!frames.take());
    }

    #[test]
    fn test_stop_resume_has_no_jump() {
        let mut sim = sim();
        let clock = ManualClock::new(0.0);
        let mut frames = PendingFrame::default();

        sim.toggle(clock.now_ms(), &mut frames);
        run_frames(&mut sim, &clock, &mut frames, 400.0, 16.0);
        let before_stop = sim.projectile.current_position;
        let elapsed_before = sim.animation.clock.elapsed_ms;

        sim.toggle(clock.now_ms(), &mut frames);
        clock.advance(3000.0);
        sim.toggle(clock.now_ms(), &mut frames);
        assert!(frames.take());
        sim.frame(clock.now_ms(), &mut frames);

        assert_eq!(sim.animation.clock.elapsed_ms, elapsed_before);
        assert_eq!(sim.projectile.current_position, before_stop);
    }

    #[test]
    fn test_runs_until_ground_then_y_frozen() {
        let mut sim = sim();
        let clock = ManualClock::new(0.0);
        let mut frames = PendingFrame::default();

        sim.toggle(clock.now_ms(), &mut frames);
        run_frames(&mut sim, &clock, &mut frames, 3000.0, 16.0);
        assert!(sim.projectile.grounded);

        let y = sim.projectile.current_position.y;
        let x = sim.projectile.current_position.x;
        run_frames(&mut sim, &clock, &mut frames, 4000.0, 16.0);
        assert_eq!(sim.projectile.current_position.y, y);
        assert!(sim.projectile.current_position.x > x);
    }

    #[test]
    fn test_reset_returns_to_launch_point() {
        let mut sim = sim();
        let mut frames = PendingFrame::default();
        sim.toggle(0.0, &mut frames);
        sim.frame(700.0, &mut frames);
        sim.reset();
        assert!(!sim.is_running());
        assert_eq!(sim.elapsed_secs(), 0.0);
        assert_eq!(sim.projectile.current_position, DVec2::new(2.5, 2.5));
    }
}
