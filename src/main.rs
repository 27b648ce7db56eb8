//! Cartesian Sandbox entry point
//!
//! Handles platform-specific initialization and wires input and frames into
//! the [`App`](cartesian_sandbox::App).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, WheelEvent};

    use cartesian_sandbox::input::{EventOutcome, InputEvent, WheelDelta};
    use cartesian_sandbox::platform::{Clock, PendingFrame, PerformanceClock};
    use cartesian_sandbox::renderer::Canvas2dSurface;
    use cartesian_sandbox::{App, Settings, Surface};

    /// Browser-side owner of the session and its collaborators
    struct Host {
        app: App,
        ctx: Canvas2dSurface,
        clock: PerformanceClock,
        frames: PendingFrame,
        toggle_button: Option<Element>,
    }

    impl Host {
        fn redraw(&mut self) {
            if let Err(e) = self.app.render(&mut self.ctx) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Handle an event, redrawing after the mutation when asked to
        fn dispatch(&mut self, event: InputEvent) -> EventOutcome {
            let now = self.clock.now_ms();
            let outcome = self.app.handle_event(event, now, &mut self.frames);
            if outcome.redraw {
                self.redraw();
            }
            outcome
        }

        fn update_toggle_label(&self) {
            if let Some(btn) = &self.toggle_button {
                let label = if self.app.sim.is_running() { "Stop" } else { "Start" };
                btn.set_text_content(Some(label));
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Cartesian Sandbox starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "element #canvas is not a canvas")?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()
            .map_err(|_| "unexpected 2d context type")?;

        let surface = Surface::new(canvas.width(), canvas.height());
        let settings = Settings::load(&canvas);

        let toggle_button = document.get_element_by_id("toggle-btn");
        if toggle_button.is_none() {
            log::warn!("No #toggle-btn element, animation cannot be started");
        }

        let host = Rc::new(RefCell::new(Host {
            app: App::new(surface, settings),
            ctx: Canvas2dSurface::new(ctx),
            clock: PerformanceClock::new(),
            frames: PendingFrame::default(),
            toggle_button,
        }));

        {
            let mut h = host.borrow_mut();
            h.redraw();
            h.update_toggle_label();
        }

        setup_pointer_handlers(&canvas, host.clone());
        setup_wheel_handler(&canvas, host.clone());
        setup_toggle_button(host);

        log::info!("Cartesian Sandbox running!");
        Ok(())
    }

    fn pointer_pos(event: &MouseEvent) -> DVec2 {
        DVec2::new(f64::from(event.offset_x()), f64::from(event.offset_y()))
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) {
        let handlers: [(&str, fn(DVec2) -> InputEvent); 3] = [
            ("mousedown", InputEvent::PointerDown),
            ("mousemove", InputEvent::PointerMove),
            ("mouseup", InputEvent::PointerUp),
        ];

        for (name, make_event) in handlers {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                host.borrow_mut().dispatch(make_event(pointer_pos(&event)));
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_wheel_handler(canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
            let delta = WheelDelta {
                dy: event.delta_y(),
            };
            let outcome = host.borrow_mut().dispatch(InputEvent::Wheel(delta));
            if outcome.prevent_default {
                event.prevent_default();
            }
        });
        let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_toggle_button(host: Rc<RefCell<Host>>) {
        let Some(btn) = host.borrow().toggle_button.clone() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let wants_frame = {
                let mut h = host.borrow_mut();
                h.dispatch(InputEvent::Toggle);
                h.update_toggle_label();
                h.frames.take()
            };
            if wants_frame {
                request_animation_frame(host.clone());
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window, cannot schedule frame");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame_loop(host);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(host: Rc<RefCell<Host>>) {
        let wants_frame = {
            let mut h = host.borrow_mut();
            let h = &mut *h;
            let now = h.clock.now_ms();
            if h.app.frame(now, &mut h.frames) {
                h.redraw();
            }
            h.frames.take()
        };

        if wants_frame {
            request_animation_frame(host);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = web_app::run() {
        log::error!("Startup failed: {:?}", e);
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cartesian Sandbox (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to get the interactive canvas");

    let config = std::env::args().nth(1).map(std::path::PathBuf::from);
    let settings = cartesian_sandbox::Settings::load(config.as_deref());
    headless::run(settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive one launch to the ground with a hand-stepped clock
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use cartesian_sandbox::platform::{Clock, ManualClock, PendingFrame};
    use cartesian_sandbox::renderer::RecordingSurface;
    use cartesian_sandbox::{App, Settings, Surface, input::InputEvent};

    /// Nominal frame period (60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after this much simulated time
    const MAX_RUN_MS: f64 = 30_000.0;

    pub fn run(settings: Settings) {
        let launch = settings.launch;
        let mut app = App::new(Surface::new(800, 600), settings);
        log::info!(
            "Launching at {:.1}° with power {:.1} (gravity {:.2})",
            launch.angle_deg,
            launch.power,
            app.settings().gravity
        );
        let clock = ManualClock::new(0.0);
        let mut frames = PendingFrame::default();
        let mut ctx = RecordingSurface::new();

        // Render errors are impossible on a recording surface
        let Ok(()) = app.render(&mut ctx);
        if let Some(&(x, y, _)) = ctx.circles().first() {
            log::info!("Launch point drawn at pixel ({x:.1}, {y:.1})");
        }

        app.handle_event(InputEvent::Toggle, clock.now_ms(), &mut frames);
        let mut frame_count = 0u32;
        while frames.take() && clock.now_ms() < MAX_RUN_MS {
            clock.advance(FRAME_MS);
            if app.frame(clock.now_ms(), &mut frames) {
                ctx.clear();
                let Ok(()) = app.render(&mut ctx);
                frame_count += 1;
            }
            if app.sim.projectile.grounded {
                app.handle_event(InputEvent::Toggle, clock.now_ms(), &mut frames);
            }
        }

        let p = app.sim.projectile.current_position;
        log::info!(
            "{} frames on {}x{}, t={:.3}s, final position ({:.3}, {:.3}), {} draw calls in last frame",
            frame_count,
            app.surface().width,
            app.surface().height,
            app.sim.elapsed_secs(),
            p.x,
            p.y,
            ctx.commands.len()
        );

        app.sim.reset();
        log::debug!(
            "Reset to {:?}, loop {}",
            app.sim.projectile.current_position,
            app.loop_state().as_str()
        );
    }
}
