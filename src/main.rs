//! Hotzone entry point
//!
//! Handles platform-specific initialization: browser event wiring and the
//! animation-frame loop on wasm, a headless scripted round on native.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use hotzone::consts::MOUSE_POINTER_ID;
    use hotzone::render;
    use hotzone::settings::GameSettings;
    use hotzone::sim::{self, FrameClock, GamePhase, GestureTracker, RoundState};

    /// App instance holding the simulation and input bookkeeping
    struct App {
        state: RoundState,
        clock: FrameClock,
        gesture: GestureTracker,
        mouse_down: bool,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl App {
        fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
            let seed = js_sys::Date::now() as u64;
            let width = canvas.width() as f32;
            let height = canvas.height() as f32;
            Self {
                state: RoundState::new(seed, width, height),
                clock: FrameClock::new(),
                gesture: GestureTracker::new(),
                mouse_down: false,
                canvas,
                ctx,
            }
        }

        /// One animation callback: derive dt, advance if unpaused, always draw
        fn frame(&mut self, timestamp: f64) {
            let dt = self.clock.frame(timestamp, self.state.paused);
            if !self.state.paused {
                sim::tick(&mut self.state, dt);
            }
            render::draw(&self.ctx, &self.state);
        }

        /// Map a client-space point into surface pixels
        fn to_surface(&self, client_x: f64, client_y: f64) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            let sx = self.canvas.width() as f64 / rect.width().max(1.0);
            let sy = self.canvas.height() as f64 / rect.height().max(1.0);
            (
                ((client_x - rect.left()) * sx) as f32,
                ((client_y - rect.top()) * sy) as f32,
            )
        }

        /// Sync the registry against the full current touch list
        fn apply_touches(&mut self, event: &TouchEvent) {
            let touches = event.touches();
            let mut active_ids = Vec::with_capacity(touches.length() as usize);

            for i in 0..touches.length() {
                if let Some(touch) = touches.item(i) {
                    let id = touch.identifier();
                    let (x, y) = self.to_surface(touch.client_x() as f64, touch.client_y() as f64);
                    active_ids.push(id);
                    sim::set_pointer_active(&mut self.state, id, x, y, true);
                }
            }

            // Tracked pointers missing from the touch list have lifted
            let lifted: Vec<i32> = self
                .state
                .players
                .keys()
                .copied()
                .filter(|id| *id != MOUSE_POINTER_ID && !active_ids.contains(id))
                .collect();
            for id in lifted {
                sim::set_pointer_active(&mut self.state, id, 0.0, 0.0, false);
            }
        }

        /// Match the backing store to the displayed size and pixel ratio
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio().max(1.0);
            let rect = self.canvas.get_bounding_client_rect();
            let (css_w, css_h) = (rect.width().max(1.0), rect.height().max(1.0));

            self.canvas.set_width((css_w * dpr) as u32);
            self.canvas.set_height((css_h * dpr) as u32);
            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{css_w}px"));
            let _ = style.set_property("height", &format!("{css_h}px"));

            self.state
                .set_surface_size((css_w * dpr) as f32, (css_h * dpr) as f32);
        }
    }

    fn wire_button(
        document: &web_sys::Document,
        id: &str,
        app: &Rc<RefCell<App>>,
        action: fn(&mut RoundState),
    ) {
        if let Some(button) = document.get_element_by_id(id) {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                action(&mut app.borrow_mut().state);
            });
            let _ =
                button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() {
        console_log::init_with_level(log::Level::Info).ok();
        console_error_panic_hook::set_once();
        log::info!("Hotzone starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element found");
            return;
        };
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("Canvas 2d context unavailable");
            return;
        };

        let app = Rc::new(RefCell::new(App::new(canvas.clone(), ctx)));
        app.borrow_mut().resize();

        // Jump straight into a lobby with the persisted settings; the screen
        // shell (when present) drives navigation through the buttons below.
        sim::start_round(&mut app.borrow_mut().state, GameSettings::load());

        // Touch input (also feeds the 3-finger pause gesture)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut app = app.borrow_mut();
                let count = event.touches().length();
                app.gesture.on_touch_start(count, js_sys::Date::now());
                app.apply_touches(&event);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().apply_touches(&event);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for kind in ["touchend", "touchcancel"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut app = app.borrow_mut();
                let remaining = event.touches().length();
                if app.gesture.on_touch_end(remaining, js_sys::Date::now()) {
                    sim::toggle_pause(&mut app.state);
                } else {
                    app.apply_touches(&event);
                }
            });
            let _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse input maps to the reserved pointer id
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut app = app.borrow_mut();
                app.mouse_down = true;
                let (x, y) = app.to_surface(event.client_x() as f64, event.client_y() as f64);
                sim::set_pointer_active(&mut app.state, MOUSE_POINTER_ID, x, y, true);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut app = app.borrow_mut();
                if app.mouse_down {
                    let (x, y) = app.to_surface(event.client_x() as f64, event.client_y() as f64);
                    sim::set_pointer_active(&mut app.state, MOUSE_POINTER_ID, x, y, true);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for kind in ["mouseup", "mouseleave"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut app = app.borrow_mut();
                if app.mouse_down {
                    app.mouse_down = false;
                    sim::set_pointer_active(&mut app.state, MOUSE_POINTER_ID, 0.0, 0.0, false);
                }
            });
            let _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard pause
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" || event.code() == "Escape" {
                    sim::toggle_pause(&mut app.borrow_mut().state);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Auto-pause when the window loses focus mid-round
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut app = app.borrow_mut();
                if matches!(app.state.phase, GamePhase::Countdown | GamePhase::Reveal) {
                    sim::round::pause(&mut app.state);
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Surface resize applies at the next zone generation
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Optional shell buttons
        wire_button(&document, "btn-start", &app, |state| {
            sim::start_round(state, GameSettings::load());
        });
        wire_button(&document, "btn-play-again", &app, sim::play_again);
        wire_button(&document, "btn-home", &app, sim::go_home);

        // Animation-frame loop; re-registers itself until the page goes away
        let raf_handle: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
            Rc::new(RefCell::new(None));
        let raf_inner = raf_handle.clone();
        let loop_app = app.clone();
        let loop_window = window.clone();

        *raf_handle.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            loop_app.borrow_mut().frame(timestamp);
            if let Some(closure) = raf_inner.borrow().as_ref() {
                let _ = loop_window.request_animation_frame(closure.as_ref().unchecked_ref());
            }
        }));
        if let Some(closure) = raf_handle.borrow().as_ref() {
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hotzone (native) starting...");
    log::info!("Native mode is headless - use the web build for the real game");

    println!("\nRunning a scripted round...");
    demo_round();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_round() {
    use hotzone::settings::{Difficulty, GameMode, GameSettings};
    use hotzone::sim::{self, GamePhase, RoundState};

    let mut state = RoundState::new(0xC0FFEE, 1280.0, 720.0);
    sim::start_round(
        &mut state,
        GameSettings {
            difficulty: Difficulty::Medium,
            mode: GameMode::Classic,
        },
    );
    sim::set_pointer_active(&mut state, 1, 200.0, 200.0, true);
    sim::set_pointer_active(&mut state, 2, 1000.0, 500.0, true);

    let frame = 1000.0 / 60.0;
    let mut elapsed = 0.0;
    while state.phase != GamePhase::Result && elapsed < 10_000.0 {
        sim::tick(&mut state, frame);
        elapsed += frame;
    }

    let result = state.result.as_ref().expect("round should have finished");
    assert_eq!(result.total, 2);
    println!(
        "✓ Round finished: {}/{} survived",
        result.survivors, result.total
    );
}
