//! Deterministic simulation module
//!
//! Projectile kinematics and the run/stop loop. This module must stay pure:
//! - Position is a closed-form function of elapsed time
//! - Time only enters through explicit `now_ms` arguments
//! - No rendering or platform dependencies beyond the scheduler trait

pub mod animation;
pub mod projectile;
pub mod state;

pub use animation::{AnimationLoop, ClockState, FrameTiming, LoopState};
pub use projectile::{LaunchParams, ProjectileState};
pub use state::SimulationState;
