//! Cartesian Sandbox - a pannable, zoomable coordinate grid with a projectile
//!
//! Core modules:
//! - `viewport`: Origin + scale state and the world <-> screen transform
//! - `input`: Pointer drag / wheel zoom state machine
//! - `sim`: Deterministic simulation (closed-form projectile, animation loop)
//! - `renderer`: Grid, axes and projectile drawing over a `DrawSurface`
//! - `platform`: Clock and frame-scheduling abstraction
//! - `app`: The single owned session tying everything together
//! - `settings`: JSON configuration

pub mod app;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod viewport;

pub use app::App;
pub use settings::{OriginPreset, Settings};
pub use viewport::{Surface, Viewport};

use glam::DVec2;

/// Default configuration constants
pub mod consts {
    /// Default pixels per world unit
    pub const DEFAULT_SCALE: f64 = 16.0;
    /// Default origin, a fixed offset near the bottom-left corner (pixels)
    pub const DEFAULT_ORIGIN: (f64, f64) = (50.0, 550.0);

    /// Multiplicative zoom step per wheel event
    pub const ZOOM_FACTOR: f64 = 1.01;
    /// Scale clamp range (pixels per world unit)
    pub const MIN_SCALE: f64 = 1.0;
    pub const MAX_SCALE: f64 = 10_000.0;

    /// Above this scale tick labels drop their decimal digit
    pub const LABEL_INTEGER_SCALE: f64 = 30.0;
    /// X-axis labels sit this many pixels below the axis
    pub const X_LABEL_OFFSET: f64 = 15.0;
    /// Y-axis labels sit this many pixels right of the axis
    pub const Y_LABEL_OFFSET: f64 = 5.0;

    /// Downward acceleration (world units/s²)
    pub const GRAVITY: f64 = 9.81;
    /// Launch defaults
    pub const LAUNCH_ANGLE_DEG: f64 = 15.0;
    pub const LAUNCH_POWER: f64 = 15.0;
    pub const INITIAL_POSITION: (f64, f64) = (2.5, 2.5);

    /// Projectile radius in shape units
    pub const PROJECTILE_RADIUS: f64 = 8.0;
    /// Shape units -> world units (radius 8 is half a world unit)
    pub const SHAPE_TO_WORLD: f64 = 1.0 / 16.0;

    /// Clock is in milliseconds, physics in seconds
    pub const MS_PER_SECOND: f64 = 1000.0;
}

/// Unit vector for an angle given in degrees (counter-clockwise from +x)
#[inline]
pub fn direction_from_degrees(angle_deg: f64) -> DVec2 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    DVec2::new(cos, sin)
}
