//! The interactive session: one owned state, one dispatch point
//!
//! `App` holds everything mutable (viewport, drag state, projectile, clock)
//! and never touches the browser. The host feeds it events and frame
//! callbacks, drains the frame request, and calls [`App::render`] whenever an
//! outcome asks for a redraw. Redraw therefore always follows the mutation
//! that caused it.

use crate::input::{EventOutcome, InputController, InputEvent};
use crate::platform::FrameScheduler;
use crate::renderer::{DrawSurface, SceneView, draw_scene};
use crate::settings::Settings;
use crate::sim::{LoopState, SimulationState};
use crate::viewport::{Surface, Viewport};

pub struct App {
    surface: Surface,
    pub viewport: Viewport,
    pub input: InputController,
    pub sim: SimulationState,
    settings: Settings,
}

impl App {
    pub fn new(surface: Surface, settings: Settings) -> Self {
        let viewport = Viewport::with_limits(
            settings.origin.resolve(surface),
            settings.scale,
            settings.min_scale,
            settings.max_scale,
        );
        log::info!(
            "Surface {}x{}, origin {} ({:.1}, {:.1}), scale {:.2}",
            surface.width,
            surface.height,
            settings.origin.as_str(),
            viewport.origin.x,
            viewport.origin.y,
            viewport.scale()
        );

        Self {
            surface,
            viewport,
            input: InputController::new(settings.zoom_factor, settings.grab_radius),
            sim: SimulationState::new(
                settings.initial_position,
                settings.launch,
                settings.gravity,
                settings.radius,
            ),
            settings,
        }
    }

    #[inline]
    pub fn surface(&self) -> Surface {
        self.surface
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn loop_state(&self) -> LoopState {
        self.sim.animation.state
    }

    /// Route one input event to its handler
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        now_ms: f64,
        scheduler: &mut impl FrameScheduler,
    ) -> EventOutcome {
        match event {
            InputEvent::PointerDown(p) => self.input.pointer_down(&self.viewport, p),
            InputEvent::PointerMove(p) => self.input.pointer_move(&mut self.viewport, p),
            InputEvent::PointerUp(_) => self.input.pointer_up(),
            InputEvent::Wheel(delta) => self.input.wheel(&mut self.viewport, delta),
            InputEvent::Toggle => {
                self.sim.toggle(now_ms, scheduler);
                EventOutcome::NONE
            }
        }
    }

    /// Frame callback; returns true when the frame must be drawn
    pub fn frame(&mut self, now_ms: f64, scheduler: &mut impl FrameScheduler) -> bool {
        self.sim.frame(now_ms, scheduler).is_some()
    }

    /// Draw the whole scene
    ///
    /// # Errors
    ///
    /// Propagates the surface's error from text or arc calls.
    pub fn render<S: DrawSurface>(&self, ctx: &mut S) -> Result<(), S::Error> {
        draw_scene(
            ctx,
            &SceneView {
                viewport: &self.viewport,
                surface: self.surface,
                projectile: &self.sim.projectile,
                label_integer_scale: self.settings.label_integer_scale,
            },
        )
    }
}
