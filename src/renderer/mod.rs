//! Rendering module
//!
//! Draws the grid, axes and projectile through the `DrawSurface` trait so the
//! same scene code runs against the browser canvas and a recording surface.

pub mod grid;
pub mod recording;
pub mod scene;
pub mod style;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2dSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use scene::{SceneView, draw_scene};
pub use surface::{DrawSurface, TextAlign, TextBaseline};
