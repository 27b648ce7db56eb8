//! Sandbox settings
//!
//! Read once at startup from JSON: the canvas element's `data-settings`
//! attribute on the web, an optional file path on native. Nothing is ever
//! written back.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::LaunchParams;
use crate::viewport::Surface;

/// Where world `(0, 0)` starts on the surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginPreset {
    /// Surface center
    Center,
    /// Fixed pixel offset from the top-left corner
    Fixed { x: f64, y: f64 },
}

impl Default for OriginPreset {
    fn default() -> Self {
        OriginPreset::Fixed {
            x: DEFAULT_ORIGIN.0,
            y: DEFAULT_ORIGIN.1,
        }
    }
}

impl OriginPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            OriginPreset::Center => "Center",
            OriginPreset::Fixed { .. } => "Fixed",
        }
    }

    /// Pixel origin on a surface of the given size
    pub fn resolve(&self, surface: Surface) -> DVec2 {
        match *self {
            OriginPreset::Center => surface.center(),
            OriginPreset::Fixed { x, y } => DVec2::new(x, y),
        }
    }
}

/// Startup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    pub origin: OriginPreset,
    /// Pixels per world unit
    pub scale: f64,
    /// Multiplicative step per wheel event (> 1)
    pub zoom_factor: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Above this scale tick labels drop their decimal digit
    pub label_integer_scale: f64,

    // === Input ===
    /// Only start a drag within this many pixels of the origin
    pub grab_radius: Option<f64>,

    // === Projectile ===
    pub launch: LaunchParams,
    pub initial_position: DVec2,
    /// Shape units
    pub radius: f64,
    /// Downward acceleration, world units/s²
    pub gravity: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            origin: OriginPreset::default(),
            scale: DEFAULT_SCALE,
            zoom_factor: ZOOM_FACTOR,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            label_integer_scale: LABEL_INTEGER_SCALE,

            grab_radius: None,

            launch: LaunchParams::default(),
            initial_position: DVec2::new(INITIAL_POSITION.0, INITIAL_POSITION.1),
            radius: PROJECTILE_RADIUS,
            gravity: GRAVITY,
        }
    }
}

/// Replace `value` with `fallback` unless `ok` holds, warning once
fn repair(name: &str, value: &mut f64, fallback: f64, ok: impl Fn(f64) -> bool) {
    if !ok(*value) {
        log::warn!("Invalid setting {name}={value}, using {fallback}");
        *value = fallback;
    }
}

impl Settings {
    /// Parse a (possibly partial) JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Parse, falling back to defaults on any error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Settings::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Invalid settings JSON ({e}), using defaults");
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Repair values that would break the viewport or the simulation
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let positive = |v: f64| v.is_finite() && v > 0.0;

        repair("min_scale", &mut self.min_scale, defaults.min_scale, positive);
        repair("max_scale", &mut self.max_scale, defaults.max_scale, positive);
        if self.min_scale > self.max_scale {
            log::warn!(
                "min_scale {} exceeds max_scale {}, swapping",
                self.min_scale,
                self.max_scale
            );
            std::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }
        if self.min_scale < MIN_SCALE {
            log::warn!(
                "min_scale {} below {MIN_SCALE}, raising it",
                self.min_scale
            );
            self.min_scale = MIN_SCALE;
            self.max_scale = self.max_scale.max(MIN_SCALE);
        }
        repair("scale", &mut self.scale, defaults.scale, positive);
        let clamped = self.scale.clamp(self.min_scale, self.max_scale);
        if clamped != self.scale {
            log::warn!("scale {} outside limits, using {clamped}", self.scale);
            self.scale = clamped;
        }
        repair("zoom_factor", &mut self.zoom_factor, defaults.zoom_factor, |v| {
            v.is_finite() && v > 1.0
        });
        repair(
            "label_integer_scale",
            &mut self.label_integer_scale,
            defaults.label_integer_scale,
            f64::is_finite,
        );
        repair("radius", &mut self.radius, defaults.radius, |v| {
            v.is_finite() && v >= 0.0
        });
        repair("gravity", &mut self.gravity, defaults.gravity, f64::is_finite);
        repair(
            "launch.angle_deg",
            &mut self.launch.angle_deg,
            defaults.launch.angle_deg,
            f64::is_finite,
        );
        repair(
            "launch.power",
            &mut self.launch.power,
            defaults.launch.power,
            f64::is_finite,
        );
        if !self.initial_position.is_finite() {
            log::warn!("Invalid initial_position, using default");
            self.initial_position = defaults.initial_position;
        }
        if let Some(r) = self.grab_radius {
            if !positive(r) {
                log::warn!("Invalid grab_radius {r}, drag starts anywhere");
                self.grab_radius = None;
            }
        }
        if let OriginPreset::Fixed { x, y } = self.origin {
            if !(x.is_finite() && y.is_finite()) {
                log::warn!("Invalid fixed origin, using default");
                self.origin = defaults.origin;
            }
        }
        self
    }

    /// Read the canvas element's `data-settings` attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::Element) -> Self {
        Self::from_json_or_default(canvas.get_attribute("data-settings").as_deref())
    }

    /// Read a settings file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            return Self::from_json_or_default(None);
        };
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json_or_default(Some(&json)),
            Err(e) => {
                log::warn!("Cannot read {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }
}
