//! Grid lines, axis lines and integer tick labels
//!
//! Geometry is computed by pure functions (`grid_lines`, `axis_ticks`) so it
//! can be checked without a surface; `draw_grid` / `draw_axes` just replay it.
//!
//! Grid lines sit at every pixel `p` with `(p - origin) mod scale == 0`, one
//! line per world unit, anchored to integer world coordinates rather than
//! to the surface edge.

use glam::DVec2;

use super::style;
use super::surface::{DrawSurface, TextAlign, TextBaseline};
use crate::consts::{X_LABEL_OFFSET, Y_LABEL_OFFSET};
use crate::viewport::{Surface, Viewport};

/// Pixel positions of the background grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// x of each vertical line
    pub vertical: Vec<f64>,
    /// y of each horizontal line
    pub horizontal: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// A labeled integer position on one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub axis: Axis,
    /// World coordinate along the axis (an integer, never zero)
    pub value: f64,
    /// Label anchor in pixels, already offset off the axis line
    pub anchor: DVec2,
}

/// Upper bound on lines or ticks along one dimension: one per pixel
fn pixel_cap(extent: f64) -> f64 {
    extent.ceil().max(0.0) + 1.0
}

/// Multiples of `scale` offset from `origin` that fall in `[0, extent)`
fn line_positions(origin: f64, scale: f64, extent: f64) -> Vec<f64> {
    let start = origin.rem_euclid(scale);
    if start.is_nan() || start >= extent {
        return Vec::new();
    }
    let count = ((extent - start) / scale).ceil().min(pixel_cap(extent)) as usize;
    (0..count)
        .map(|k| start + k as f64 * scale)
        .filter(|&p| p < extent)
        .collect()
}

/// Grid line positions covering the surface
pub fn grid_lines(viewport: &Viewport, surface: Surface) -> GridLines {
    let scale = viewport.scale();
    GridLines {
        vertical: line_positions(viewport.origin.x, scale, surface.width_f64()),
        horizontal: line_positions(viewport.origin.y, scale, surface.height_f64()),
    }
}

/// Inclusive range of step indices `k` whose pixel `origin + k·scale` lies
/// strictly inside `(0, extent)`:
/// `floor(-origin/scale) + 1 ..= ceil((extent - origin)/scale) - 1`
///
/// Returns `None` when no step is visible.
pub fn visible_steps(origin: f64, scale: f64, extent: f64) -> Option<(f64, f64)> {
    let first = (-origin / scale).floor() + 1.0;
    let last = ((extent - origin) / scale).ceil() - 1.0;
    (first.is_finite() && last.is_finite() && first <= last).then_some((first, last))
}

/// Iterate `first..=last` without ever producing more steps than fit in `extent`
fn steps(first: f64, last: f64, scale: f64, extent: f64) -> impl Iterator<Item = f64> {
    let cap = ((extent / scale).ceil() + 1.0).min(pixel_cap(extent));
    let count = (last - first + 1.0).min(cap).max(0.0) as usize;
    (0..count).map(move |j| first + j as f64)
}

/// Tick labels for both axes, zero excluded
pub fn axis_ticks(viewport: &Viewport, surface: Surface) -> Vec<Tick> {
    let scale = viewport.scale();
    let origin = viewport.origin;
    let (width, height) = (surface.width_f64(), surface.height_f64());
    let mut ticks = Vec::new();

    if let Some((first, last)) = visible_steps(origin.x, scale, width) {
        ticks.extend(
            steps(first, last, scale, width)
                .filter(|&k| k != 0.0)
                .map(|k| Tick {
                    axis: Axis::X,
                    value: k,
                    anchor: DVec2::new(origin.x + k * scale, origin.y + X_LABEL_OFFSET),
                }),
        );
    }

    // Screen steps run downward, world y runs upward
    if let Some((first, last)) = visible_steps(origin.y, scale, height) {
        ticks.extend(
            steps(first, last, scale, height)
                .filter(|&k| k != 0.0)
                .map(|k| Tick {
                    axis: Axis::Y,
                    value: -k,
                    anchor: DVec2::new(origin.x + Y_LABEL_OFFSET, origin.y + k * scale),
                }),
        );
    }

    ticks
}

/// Decimal digits for tick labels at this zoom level
#[inline]
pub fn label_precision(scale: f64, integer_scale: f64) -> usize {
    if scale > integer_scale { 0 } else { 1 }
}

pub fn format_tick(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

/// Stroke the background grid
pub fn draw_grid<S: DrawSurface>(ctx: &mut S, lines: &GridLines, surface: Surface) {
    let (width, height) = (surface.width_f64(), surface.height_f64());

    ctx.begin_path();
    for &x in &lines.vertical {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, height);
    }
    for &y in &lines.horizontal {
        ctx.move_to(0.0, y);
        ctx.line_to(width, y);
    }
    ctx.set_stroke_style(style::GRID_LINE);
    ctx.set_line_width(style::GRID_LINE_WIDTH);
    ctx.stroke();
}

/// Stroke both axes and label their ticks
pub fn draw_axes<S: DrawSurface>(
    ctx: &mut S,
    viewport: &Viewport,
    surface: Surface,
    ticks: &[Tick],
    precision: usize,
) -> Result<(), S::Error> {
    let origin = viewport.origin;

    ctx.begin_path();
    ctx.move_to(0.0, origin.y);
    ctx.line_to(surface.width_f64(), origin.y);
    ctx.move_to(origin.x, 0.0);
    ctx.line_to(origin.x, surface.height_f64());
    ctx.set_stroke_style(style::AXIS_LINE);
    ctx.set_line_width(style::AXIS_LINE_WIDTH);
    ctx.stroke();

    ctx.set_fill_style(style::TICK_LABEL);
    ctx.set_font(style::TICK_FONT);

    ctx.set_text_align(TextAlign::Center);
    ctx.set_text_baseline(TextBaseline::Alphabetic);
    for tick in ticks.iter().filter(|t| t.axis == Axis::X) {
        ctx.fill_text(&format_tick(tick.value, precision), tick.anchor.x, tick.anchor.y)?;
    }

    ctx.set_text_align(TextAlign::Left);
    ctx.set_text_baseline(TextBaseline::Middle);
    for tick in ticks.iter().filter(|t| t.axis == Axis::Y) {
        ctx.fill_text(&format_tick(tick.value, precision), tick.anchor.x, tick.anchor.y)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};

    const SURFACE: Surface = Surface::new(800, 600);

    fn values(ticks: &[Tick], axis: Axis) -> Vec<f64> {
        ticks.iter().filter(|t| t.axis == axis).map(|t| t.value).collect()
    }

    #[test]
    fn test_grid_lines_anchored_to_origin() {
        let vp = Viewport::new(DVec2::new(50.0, 550.0), 16.0);
        let lines = grid_lines(&vp, SURFACE);

        assert_eq!(lines.vertical[0], 2.0);
        assert!(lines.vertical.contains(&50.0));
        assert!(lines.horizontal.contains(&550.0));
        assert!(lines.vertical.iter().all(|&x| (0.0..800.0).contains(&x)));
        assert!(lines.horizontal.iter().all(|&y| (0.0..600.0).contains(&y)));
        for pair in lines.vertical.windows(2) {
            assert!((pair[1] - pair[0] - 16.0).abs() < 1e-9);
        }
        assert_eq!(lines.vertical.len(), 50);
    }

    #[test]
    fn test_grid_lines_negative_origin() {
        let vp = Viewport::new(DVec2::new(-35.0, -1000.0), 10.0);
        let lines = grid_lines(&vp, SURFACE);
        assert_eq!(lines.vertical[0], 5.0);
        assert_eq!(lines.horizontal[0], 0.0);
    }

    #[test]
    fn test_grid_density_tracks_scale() {
        let mut vp = Viewport::new(DVec2::new(400.0, 300.0), 40.0);
        let coarse = grid_lines(&vp, SURFACE).vertical.len();
        vp.set_scale(20.0);
        let fine = grid_lines(&vp, SURFACE).vertical.len();
        assert_eq!(coarse, 20);
        assert_eq!(fine, 40);
    }

    #[test]
    fn test_visible_steps() {
        assert_eq!(visible_steps(50.0, 16.0, 800.0), Some((-3.0, 46.0)));
        assert_eq!(visible_steps(400.0, 100.0, 800.0), Some((-3.0, 3.0)));
        // Axis far off-screen to the right: everything visible is negative
        assert_eq!(visible_steps(2000.0, 100.0, 800.0), Some((-19.0, -13.0)));
        // Wider steps than the surface: nothing strictly inside
        assert_eq!(visible_steps(0.0, 1000.0, 800.0), None);
    }

    #[test]
    fn test_axis_ticks_skip_zero_and_flip_y() {
        let vp = Viewport::new(DVec2::new(400.0, 300.0), 100.0);
        let ticks = axis_ticks(&vp, SURFACE);

        assert_eq!(values(&ticks, Axis::X), vec![-3.0, -2.0, -1.0, 1.0, 2.0, 3.0]);
        assert_eq!(values(&ticks, Axis::Y), vec![2.0, 1.0, -1.0, -2.0]);

        let y2 = ticks
            .iter()
            .find(|t| t.axis == Axis::Y && t.value == 2.0)
            .unwrap();
        assert_eq!(y2.anchor, DVec2::new(405.0, 100.0));
        let x1 = ticks
            .iter()
            .find(|t| t.axis == Axis::X && t.value == 1.0)
            .unwrap();
        assert_eq!(x1.anchor, DVec2::new(500.0, 315.0));
    }

    #[test]
    fn test_axis_ticks_bounded_by_window_when_panned_far() {
        let vp = Viewport::new(DVec2::new(-1.0e12, 1.0e12), 1.0);
        let ticks = axis_ticks(&vp, SURFACE);
        assert!(ticks.len() <= 802 + 602);
        assert!(ticks.iter().all(|t| t.value != 0.0));
    }

    #[test]
    fn test_sub_pixel_spacing_is_capped_per_pixel() {
        let lines = line_positions(50.0, 1.0e-4, 800.0);
        assert!(lines.len() <= 801);
        assert!(lines.iter().all(|&x| x < 800.0));

        let (first, last) = visible_steps(300.0, 1.0e-4, 600.0).unwrap();
        assert!(steps(first, last, 1.0e-4, 600.0).count() <= 601);
    }

    #[test]
    fn test_label_precision_follows_zoom() {
        assert_eq!(label_precision(16.0, 30.0), 1);
        assert_eq!(label_precision(30.0, 30.0), 1);
        assert_eq!(label_precision(31.0, 30.0), 0);
        assert_eq!(format_tick(-3.0, 1), "-3.0");
        assert_eq!(format_tick(12.0, 0), "12");
    }

    #[test]
    fn test_draw_axes_labels_every_tick() {
        let vp = Viewport::new(DVec2::new(400.0, 300.0), 100.0);
        let ticks = axis_ticks(&vp, SURFACE);
        let mut ctx = RecordingSurface::new();
        draw_axes(&mut ctx, &vp, SURFACE, &ticks, 0).unwrap();

        let texts = ctx.texts();
        assert_eq!(texts.len(), 10);
        assert!(!texts.contains(&"0"));
        assert!(texts.contains(&"-3"));
        assert_eq!(ctx.count(|c| *c == DrawCommand::Stroke), 1);
        assert!(ctx.commands.contains(&DrawCommand::LineWidth(2.0)));
        assert!(ctx.commands.contains(&DrawCommand::MoveTo(0.0, 300.0)));
        assert!(ctx.commands.contains(&DrawCommand::LineTo(400.0, 600.0)));
    }

    #[test]
    fn test_draw_grid_strokes_once() {
        let vp = Viewport::new(DVec2::new(400.0, 300.0), 100.0);
        let lines = grid_lines(&vp, SURFACE);
        let mut ctx = RecordingSurface::new();
        draw_grid(&mut ctx, &lines, SURFACE);

        let moves = ctx.count(|c| matches!(c, DrawCommand::MoveTo(..)));
        assert_eq!(moves, lines.vertical.len() + lines.horizontal.len());
        assert_eq!(ctx.commands.last(), Some(&DrawCommand::Stroke));
    }
}
