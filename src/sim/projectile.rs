//! Closed-form point-mass projectile
//!
//! Position is a pure function of elapsed time:
//! `p(t) = ½·a·t² + v₀·t + p₀`, per axis. Nothing is integrated frame to
//! frame, so no drift accumulates however irregular the frame times are.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::direction_from_degrees;

/// Launch angle (degrees, counter-clockwise from +x) and launch speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchParams {
    pub angle_deg: f64,
    pub power: f64,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            angle_deg: LAUNCH_ANGLE_DEG,
            power: LAUNCH_POWER,
        }
    }
}

impl LaunchParams {
    /// `v = power · (cos θ, sin θ)`
    pub fn velocity(&self) -> DVec2 {
        direction_from_degrees(self.angle_deg) * self.power
    }
}

/// Projectile kinematics and its most recently computed position
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileState {
    pub initial_position: DVec2,
    pub initial_velocity: DVec2,
    /// Constant acceleration; only y is nonzero (downward pull)
    pub acceleration: DVec2,
    /// Radius in shape units (world radius = radius · `SHAPE_TO_WORLD`)
    pub radius: f64,
    pub current_position: DVec2,
    /// Lower edge has reached y = 0; y no longer updates
    pub grounded: bool,
}

impl ProjectileState {
    pub fn new(initial_position: DVec2, launch: LaunchParams, gravity: f64, radius: f64) -> Self {
        Self {
            initial_position,
            initial_velocity: launch.velocity(),
            acceleration: DVec2::new(0.0, -gravity),
            radius,
            current_position: initial_position,
            grounded: false,
        }
    }

    /// Radius in world units
    #[inline]
    pub fn world_radius(&self) -> f64 {
        self.radius * SHAPE_TO_WORLD
    }

    /// Unconstrained closed-form position at `t` seconds
    pub fn position_at(&self, t: f64) -> DVec2 {
        0.5 * self.acceleration * t * t + self.initial_velocity * t + self.initial_position
    }

    /// Lower edge at or below the baseline
    #[inline]
    pub fn touches_ground(&self, y: f64) -> bool {
        y - self.world_radius() <= 0.0
    }

    /// Recompute `current_position` for elapsed time `t` (seconds)
    ///
    /// Once the body touches the ground its y freezes; x keeps following
    /// the closed form. Returns true on the update that makes contact.
    pub fn update(&mut self, t: f64) -> bool {
        let next = self.position_at(t);
        self.current_position.x = next.x;

        if self.grounded {
            return false;
        }

        self.current_position.y = next.y;
        if self.touches_ground(next.y) {
            self.grounded = true;
            return true;
        }
        false
    }

    /// Back to the launch point
    pub fn reset(&mut self) {
        self.current_position = self.initial_position;
        self.grounded = false;
    }
}
