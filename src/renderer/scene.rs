//! Full-frame redraw
//!
//! Layers, bottom first: clear, grid, axes + labels, projectile. The scene
//! only reads state; it never mutates the viewport or the simulation.

use super::grid::{axis_ticks, draw_axes, draw_grid, grid_lines, label_precision};
use super::style;
use super::surface::DrawSurface;
use crate::sim::ProjectileState;
use crate::viewport::{Surface, Viewport};

/// Read-only view of everything a frame needs
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub viewport: &'a Viewport,
    pub surface: Surface,
    pub projectile: &'a ProjectileState,
    /// Scale above which labels are drawn without decimals
    pub label_integer_scale: f64,
}

/// Draw one complete frame
///
/// # Errors
///
/// Returns `Err` if the surface rejects a text or arc call.
pub fn draw_scene<S: DrawSurface>(ctx: &mut S, view: &SceneView<'_>) -> Result<(), S::Error> {
    let surface = view.surface;
    ctx.clear_rect(0.0, 0.0, surface.width_f64(), surface.height_f64());

    draw_grid(ctx, &grid_lines(view.viewport, surface), surface);

    let ticks = axis_ticks(view.viewport, surface);
    let precision = label_precision(view.viewport.scale(), view.label_integer_scale);
    draw_axes(ctx, view.viewport, surface, &ticks, precision)?;

    draw_projectile(ctx, view.viewport, view.projectile)
}

/// Filled circle at the projectile's current position, scaled with zoom
pub fn draw_projectile<S: DrawSurface>(
    ctx: &mut S,
    viewport: &Viewport,
    projectile: &ProjectileState,
) -> Result<(), S::Error> {
    let center = viewport.world_to_screen(projectile.current_position);
    let radius = viewport.world_len_to_screen(projectile.world_radius());

    ctx.set_fill_style(style::PROJECTILE);
    ctx.set_global_alpha(style::PROJECTILE_ALPHA);
    ctx.fill_circle(center.x, center.y, radius)?;
    ctx.set_global_alpha(1.0);
    Ok(())
}
