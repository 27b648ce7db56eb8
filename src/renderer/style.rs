//! Colors, fonts and line widths for scene elements

pub const GRID_LINE: &str = "#ddd";
pub const GRID_LINE_WIDTH: f64 = 1.0;

pub const AXIS_LINE: &str = "black";
pub const AXIS_LINE_WIDTH: f64 = 2.0;

pub const TICK_LABEL: &str = "black";
pub const TICK_FONT: &str = "14px sans-serif";

pub const PROJECTILE: &str = "#e4572e";
pub const PROJECTILE_ALPHA: f64 = 0.9;
