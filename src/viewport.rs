//! Viewport state and the world <-> screen transform
//!
//! World space is y-up with `(0, 0)` at the origin. Screen space is the
//! drawing surface's pixel grid, y-down with `(0, 0)` at the top-left corner.

use glam::DVec2;

use crate::consts::{MAX_SCALE, MIN_SCALE};

/// Fixed pixel size of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn width_f64(&self) -> f64 {
        f64::from(self.width)
    }

    #[inline]
    pub fn height_f64(&self) -> f64 {
        f64::from(self.height)
    }

    /// Pixel center of the surface
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width_f64() / 2.0, self.height_f64() / 2.0)
    }
}

/// Zoom direction decoded from a wheel event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Wheel moved away from the user (negative delta): magnify
    In,
    /// Wheel moved toward the user: shrink
    Out,
}

impl ZoomDirection {
    /// Negative deltas zoom in, everything else zooms out
    pub fn from_delta(delta_y: f64) -> Self {
        if delta_y < 0.0 { Self::In } else { Self::Out }
    }
}

/// Mapping between world coordinates and surface pixels
///
/// `origin` is the pixel that world `(0, 0)` lands on; it may sit anywhere,
/// including off the surface. `scale` is pixels per world unit and stays
/// at least [`MIN_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin: DVec2,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
}

impl Viewport {
    pub fn new(origin: DVec2, scale: f64) -> Self {
        Self::with_limits(origin, scale, MIN_SCALE, MAX_SCALE)
    }

    /// Viewport whose scale is clamped to `[min_scale, max_scale]`
    ///
    /// Limits that are not positive and finite fall back to the defaults,
    /// reversed limits are swapped, and the lower limit never drops below
    /// [`MIN_SCALE`] so a frame draws at most about one grid line per pixel.
    pub fn with_limits(origin: DVec2, scale: f64, min_scale: f64, max_scale: f64) -> Self {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        let min_scale = if valid(min_scale) { min_scale } else { MIN_SCALE };
        let max_scale = if valid(max_scale) { max_scale } else { MAX_SCALE };
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        let min_scale = min_scale.max(MIN_SCALE);
        let max_scale = max_scale.max(min_scale);

        let mut viewport = Self {
            origin,
            scale: min_scale,
            min_scale,
            max_scale,
        };
        viewport.set_scale(scale);
        viewport
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the scale, clamped to the allowed range
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = if scale.is_nan() {
            self.min_scale
        } else {
            scale.clamp(self.min_scale, self.max_scale)
        };
    }

    /// World -> pixel: `px = x·scale + originX`, `py = -y·scale + originY`
    #[inline]
    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        DVec2::new(
            world.x * self.scale + self.origin.x,
            -world.y * self.scale + self.origin.y,
        )
    }

    /// Pixel -> world, the exact inverse of [`Self::world_to_screen`]
    #[inline]
    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        DVec2::new(
            (screen.x - self.origin.x) / self.scale,
            (self.origin.y - screen.y) / self.scale,
        )
    }

    /// World length -> pixel length
    #[inline]
    pub fn world_len_to_screen(&self, len: f64) -> f64 {
        len * self.scale
    }

    /// Move the origin to an absolute pixel position
    pub fn pan_to(&mut self, origin: DVec2) {
        self.origin = origin;
    }

    /// One multiplicative zoom step about the current origin
    pub fn zoom(&mut self, direction: ZoomDirection, factor: f64) {
        let next = match direction {
            ZoomDirection::In => self.scale * factor,
            ZoomDirection::Out => self.scale / factor,
        };
        self.set_scale(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: DVec2, b: DVec2) -> bool {
        (a - b).abs().max_element() < EPSILON * (1.0 + a.abs().max_element())
    }

    #[test]
    fn test_world_to_screen_inverts_y() {
        let vp = Viewport::new(DVec2::new(50.0, 550.0), 16.0);
        assert_eq!(vp.world_to_screen(DVec2::ZERO), DVec2::new(50.0, 550.0));
        assert_eq!(vp.world_to_screen(DVec2::new(1.0, 1.0)), DVec2::new(66.0, 534.0));
        assert_eq!(vp.world_to_screen(DVec2::new(2.5, 2.5)), DVec2::new(90.0, 510.0));
    }

    #[test]
    fn test_screen_to_world_basic() {
        let vp = Viewport::new(DVec2::new(400.0, 300.0), 40.0);
        assert_eq!(vp.screen_to_world(DVec2::new(440.0, 220.0)), DVec2::new(1.0, 2.0));
    }

    #[test]
    fn test_zoom_is_multiplicative() {
        let mut vp = Viewport::new(DVec2::ZERO, 16.0);
        vp.zoom(ZoomDirection::In, 2.0);
        assert_eq!(vp.scale(), 32.0);
        vp.zoom(ZoomDirection::Out, 2.0);
        vp.zoom(ZoomDirection::Out, 2.0);
        assert_eq!(vp.scale(), 8.0);
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut vp = Viewport::with_limits(DVec2::ZERO, 16.0, 4.0, 64.0);
        for _ in 0..100 {
            vp.zoom(ZoomDirection::Out, 2.0);
        }
        assert_eq!(vp.scale(), 4.0);
        for _ in 0..100 {
            vp.zoom(ZoomDirection::In, 2.0);
        }
        assert_eq!(vp.scale(), 64.0);

        vp.set_scale(f64::NAN);
        assert_eq!(vp.scale(), 4.0);
        assert!(Viewport::new(DVec2::ZERO, -3.0).scale() > 0.0);
    }

    #[test]
    fn test_bad_limits_are_repaired() {
        let vp = Viewport::with_limits(DVec2::ZERO, 50.0, 100.0, 10.0);
        assert_eq!(vp.scale(), 50.0);
        let vp = Viewport::with_limits(DVec2::ZERO, 0.5, f64::NAN, -1.0);
        assert_eq!(vp.scale(), MIN_SCALE);
    }

    #[test]
    fn test_min_scale_has_a_floor() {
        let mut vp = Viewport::with_limits(DVec2::ZERO, 1.0e-4, 1.0e-4, 1.0e-3);
        assert_eq!(vp.scale(), MIN_SCALE);
        for _ in 0..1000 {
            vp.zoom(ZoomDirection::Out, 2.0);
        }
        assert_eq!(vp.scale(), MIN_SCALE);
    }

    #[test]
    fn test_zoom_direction_from_delta() {
        assert_eq!(ZoomDirection::from_delta(-100.0), ZoomDirection::In);
        assert_eq!(ZoomDirection::from_delta(100.0), ZoomDirection::Out);
        assert_eq!(ZoomDirection::from_delta(0.0), ZoomDirection::Out);
    }

    #[test]
    fn test_surface_center() {
        assert_eq!(Surface::new(800, 600).center(), DVec2::new(400.0, 300.0));
    }

    proptest! {
        #[test]
        fn prop_world_screen_round_trip(
            x in -1.0e4..1.0e4f64,
            y in -1.0e4..1.0e4f64,
            ox in -1.0e4..1.0e4f64,
            oy in -1.0e4..1.0e4f64,
            scale in 1.0..1.0e4f64,
        ) {
            let vp = Viewport::new(DVec2::new(ox, oy), scale);
            let world = DVec2::new(x, y);
            let back = vp.screen_to_world(vp.world_to_screen(world));
            prop_assert!(approx_eq(world, back), "{world:?} -> {back:?}");
        }

        #[test]
        fn prop_zoom_in_out_symmetry(steps in 0usize..300, scale in 2.0..500.0f64) {
            let mut vp = Viewport::new(DVec2::ZERO, scale);
            for _ in 0..steps {
                vp.zoom(ZoomDirection::In, 1.01);
            }
            for _ in 0..steps {
                vp.zoom(ZoomDirection::Out, 1.01);
            }
            prop_assert!((vp.scale() - scale).abs() < 1e-9 * scale);
        }
    }
}
