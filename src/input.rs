//! Input model: raw pointer / wheel / toggle events and the drag state machine
//!
//! `InputController` turns pointer-down/move/up into origin pans and wheel
//! events into multiplicative zoom steps. It never draws; it reports through
//! [`EventOutcome`] whether the caller must redraw and whether the browser's
//! default action (page scroll) must be suppressed.

use glam::DVec2;

use crate::viewport::{Viewport, ZoomDirection};

/// Vertical wheel / trackpad scroll delta
///
/// Negative means away from the user, which zooms in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelDelta {
    pub dy: f64,
}

/// A single input event, positions in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(DVec2),
    PointerMove(DVec2),
    PointerUp(DVec2),
    Wheel(WheelDelta),
    /// Run/stop button press
    Toggle,
}

/// What the host must do after an event has been handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// State changed; draw a new frame
    pub redraw: bool,
    /// Suppress the event's default browser action
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const NONE: Self = Self {
        redraw: false,
        prevent_default: false,
    };

    pub const REDRAW: Self = Self {
        redraw: true,
        prevent_default: false,
    };
}

/// Pointer drag state
///
/// `offset` is the pointer position minus the origin at drag start and is
/// only meaningful while `dragging`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    pub dragging: bool,
    pub offset: DVec2,
}

/// Translates pointer and wheel events into viewport mutations
#[derive(Debug, Clone)]
pub struct InputController {
    pub drag: DragState,
    zoom_factor: f64,
    /// When set, a drag only starts within this many pixels of the origin
    grab_radius: Option<f64>,
}

impl InputController {
    pub fn new(zoom_factor: f64, grab_radius: Option<f64>) -> Self {
        Self {
            drag: DragState::default(),
            zoom_factor,
            grab_radius,
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.dragging
    }

    /// Idle -> Dragging
    pub fn pointer_down(&mut self, viewport: &Viewport, pointer: DVec2) -> EventOutcome {
        if let Some(radius) = self.grab_radius {
            let near = pointer - viewport.origin;
            if near.x.abs() >= radius || near.y.abs() >= radius {
                return EventOutcome::NONE;
            }
        }

        self.drag = DragState {
            dragging: true,
            offset: pointer - viewport.origin,
        };
        EventOutcome::NONE
    }

    /// Dragging -> Dragging: the origin tracks the pointer minus the grab offset
    pub fn pointer_move(&mut self, viewport: &mut Viewport, pointer: DVec2) -> EventOutcome {
        if !self.drag.dragging {
            return EventOutcome::NONE;
        }
        viewport.pan_to(pointer - self.drag.offset);
        EventOutcome::REDRAW
    }

    /// Dragging -> Idle
    pub fn pointer_up(&mut self) -> EventOutcome {
        self.drag = DragState::default();
        EventOutcome::NONE
    }

    /// Wheel zoom, independent of drag state
    pub fn wheel(&mut self, viewport: &mut Viewport, delta: WheelDelta) -> EventOutcome {
        viewport.zoom(ZoomDirection::from_delta(delta.dy), self.zoom_factor);
        EventOutcome {
            redraw: true,
            prevent_default: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn viewport() -> Viewport {
        Viewport::new(DVec2::new(50.0, 550.0), 16.0)
    }

    #[test]
    fn test_down_then_up_leaves_origin() {
        let mut vp = viewport();
        let mut input = InputController::new(1.01, None);

        input.pointer_down(&vp, DVec2::new(300.0, 200.0));
        assert!(input.is_dragging());
        input.pointer_up();
        assert!(!input.is_dragging());

        let outcome = input.pointer_move(&mut vp, DVec2::new(10.0, 10.0));
        assert_eq!(outcome, EventOutcome::NONE);
        assert_eq!(vp.origin, DVec2::new(50.0, 550.0));
    }

    #[test]
    fn test_drag_records_grab_offset() {
        let vp = viewport();
        let mut input = InputController::new(1.01, None);
        input.pointer_down(&vp, DVec2::new(60.0, 500.0));
        assert_eq!(input.drag.offset, DVec2::new(10.0, -50.0));
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut vp = viewport();
        let mut input = InputController::new(1.01, None);
        assert!(!input.pointer_move(&mut vp, DVec2::new(1.0, 1.0)).redraw);
        assert_eq!(vp, viewport());
    }

    #[test]
    fn test_grab_radius_gates_drag_start() {
        let mut vp = viewport();
        let mut input = InputController::new(1.01, Some(20.0));

        input.pointer_down(&vp, DVec2::new(300.0, 300.0));
        assert!(!input.is_dragging());

        input.pointer_down(&vp, DVec2::new(55.0, 545.0));
        assert!(input.is_dragging());
        input.pointer_move(&mut vp, DVec2::new(105.0, 495.0));
        assert_eq!(vp.origin, DVec2::new(100.0, 500.0));
    }

    #[test]
    fn test_wheel_zooms_and_prevents_default() {
        let mut vp = viewport();
        let mut input = InputController::new(2.0, None);

        let outcome = input.wheel(&mut vp, WheelDelta { dy: -1.0 });
        assert!(outcome.redraw);
        assert!(outcome.prevent_default);
        assert_eq!(vp.scale(), 32.0);

        input.wheel(&mut vp, WheelDelta { dy: 3.0 });
        assert_eq!(vp.scale(), 16.0);
    }

    #[test]
    fn test_wheel_during_drag_keeps_dragging() {
        let mut vp = viewport();
        let mut input = InputController::new(1.01, None);
        input.pointer_down(&vp, DVec2::new(100.0, 100.0));
        input.wheel(&mut vp, WheelDelta { dy: -1.0 });
        assert!(input.is_dragging());
    }

    proptest! {
        #[test]
        fn prop_drag_shifts_origin_by_pointer_delta(
            px in -2000.0..2000.0f64,
            py in -2000.0..2000.0f64,
            dx in -2000.0..2000.0f64,
            dy in -2000.0..2000.0f64,
        ) {
            let mut vp = viewport();
            let start = vp.origin;
            let mut input = InputController::new(1.01, None);

            input.pointer_down(&vp, DVec2::new(px, py));
            let outcome = input.pointer_move(&mut vp, DVec2::new(px + dx, py + dy));
            prop_assert!(outcome.redraw);

            let shift = vp.origin - start;
            prop_assert!((shift.x - dx).abs() < 1e-9);
            prop_assert!((shift.y - dy).abs() < 1e-9);
        }
    }
}
