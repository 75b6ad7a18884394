//! Box Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use box_snake::renderer::{RenderState, scene_vertices};
    use box_snake::sim::{GameEvent, GameSession, tick};
    use box_snake::{AnalogStick, GameSizes, Intent, KeyState, SnakeConfig};

    /// How often the wall-clock callback runs (stamina timer, announcements)
    const CLOCK_INTERVAL_MS: i32 = 50;

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        render_state: Option<RenderState>,
        keys: KeyState,
        stick: AnalogStick,
        /// Screen position of the analog stick center while it is held
        stick_center: Option<(f32, f32)>,
        /// Last wall-clock reading (ms) seen by the clock callback
        last_clock: f64,
    }

    impl Game {
        fn new(seed: u64, config: SnakeConfig, sizes: GameSizes) -> Self {
            Self {
                session: GameSession::new(seed, config, sizes),
                render_state: None,
                keys: KeyState::default(),
                stick: AnalogStick::default(),
                stick_center: None,
                last_clock: js_sys::Date::now(),
            }
        }

        fn press(&mut self, intent: Intent) {
            if self.keys.press(intent) && intent == Intent::Boost {
                // Settle the clock first so depletion counts from the press
                self.advance_clock();
                self.session.press_boost();
            }
        }

        fn release(&mut self, intent: Intent) {
            if self.keys.release(intent) && intent == Intent::Boost {
                self.session.release_boost();
            }
        }

        /// Start dragging the analog stick around the center of `el`
        fn grab_stick(&mut self, el: &web_sys::Element) {
            let rect = el.get_bounding_client_rect();
            let cx = (rect.left() + rect.width() / 2.0) as f32;
            let cy = (rect.top() + rect.height() / 2.0) as f32;
            self.stick_center = Some((cx, cy));
        }

        /// Pointer moved to client coordinates (x, y) while the stick is held
        fn steer_stick(&mut self, x: f32, y: f32) {
            if let Some((cx, cy)) = self.stick_center {
                let stick = self.stick;
                stick.steer(&mut self.keys, x - cx, y - cy);
            }
        }

        fn release_stick(&mut self) {
            if self.stick_center.take().is_some() {
                let stick = self.stick;
                stick.release(&mut self.keys);
            }
        }

        /// Wall-clock callback, runs outside the frame cadence
        fn advance_clock(&mut self) {
            let now = js_sys::Date::now();
            let elapsed_ms = (now - self.last_clock).max(0.0);
            self.last_clock = now;
            self.session
                .advance_clock(Duration::from_secs_f64(elapsed_ms / 1000.0));
        }

        /// Run one simulation frame
        fn update(&mut self) {
            let keys = self.keys;
            tick(&mut self.session, &keys);

            for event in self.session.drain_events() {
                match event {
                    GameEvent::LevelUp { level, fruit_target } => {
                        log::info!("Level {} ({} fruit)", level, fruit_target)
                    }
                    GameEvent::BoundaryReset { score_lost } => {
                        log::info!("Boundary hit, score {} lost", score_lost)
                    }
                    other => log::debug!("{:?}", other),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let half = self.session.sizes().half_boundary_size;
            let vertices = scene_vertices(&self.session);
            if let Some(ref mut render_state) = self.render_state {
                render_state.set_view_half_extent(half);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let progression = self.session.progression();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", progression.score)));
            }
            if let Some(el) = document.get_element_by_id("max-score") {
                el.set_text_content(Some(&format!("Max: {}", progression.max_score)));
            }

            if let Some(el) = document.get_element_by_id("level-up") {
                el.set_text_content(Some(&format!("Level: {}", progression.level)));
                set_opacity(&el, self.session.level_up_notice.is_visible());
            }
            if let Some(el) = document.get_element_by_id("reset-notice") {
                set_opacity(&el, self.session.reset_notice.is_visible());
            }

            if let Some(el) = document.get_element_by_id("stamina") {
                let blocks = self.session.stamina().blocks();
                if el.child_element_count() != blocks {
                    el.set_inner_html(&"<div class=\"stamina-block\"></div>".repeat(blocks as usize));
                }
            }

            if let Some(el) = document.get_element_by_id("boost-btn") {
                let _ = el
                    .class_list()
                    .toggle_with_force("active", self.session.is_boosting());
            }
        }
    }

    fn set_opacity(el: &web_sys::Element, visible: bool) {
        if let Some(el) = el.dyn_ref::<HtmlElement>() {
            let _ = el
                .style()
                .set_property("opacity", if visible { "1" } else { "0" });
        }
    }

    /// Playfield sizes for the current viewport
    fn viewport_sizes(config: &SnakeConfig) -> GameSizes {
        let Some(window) = web_sys::window() else {
            return GameSizes::large(config);
        };
        let width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0) as f32;
        let root_font = window
            .document()
            .and_then(|d| d.document_element())
            .and_then(|root| window.get_computed_style(&root).ok().flatten())
            .and_then(|style| style.get_property_value("font-size").ok())
            .and_then(|size| size.trim_end_matches("px").parse::<f32>().ok())
            .unwrap_or(16.0);
        GameSizes::for_viewport(width, root_font, config)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Box Snake starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let config = SnakeConfig::load();
        let sizes = viewport_sizes(&config);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, config, sizes)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width, height, sizes.half_boundary_size).await;
        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            // Render target exists: the head can move from now on
            g.session.mount_head();
        }

        setup_keyboard(game.clone());
        setup_touch_controls(game.clone());
        setup_resize(game.clone());
        start_clock(game.clone());

        request_animation_frame(game);

        log::info!("Box Snake running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(intent) = Intent::from_key(&event.key()) {
                    game.borrow_mut().press(intent);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(intent) = Intent::from_key(&event.key()) {
                    game.borrow_mut().release(intent);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen analog stick and boost button, for touch and mouse
    fn setup_touch_controls(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Analog stick
        if let Some(stick) = document.get_element_by_id("analog-stick") {
            {
                let game = game.clone();
                let stick_el = stick.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.grab_stick(&stick_el);
                    if let Some(touch) = event.touches().get(0) {
                        g.steer_stick(touch.client_x() as f32, touch.client_y() as f32);
                    }
                });
                let _ = stick
                    .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    if let Some(touch) = event.touches().get(0) {
                        game.borrow_mut()
                            .steer_stick(touch.client_x() as f32, touch.client_y() as f32);
                    }
                });
                let _ = stick
                    .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                    game.borrow_mut().release_stick();
                });
                let _ = stick
                    .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            {
                let game = game.clone();
                let stick_el = stick.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.grab_stick(&stick_el);
                    g.steer_stick(event.client_x() as f32, event.client_y() as f32);
                });
                let _ = stick
                    .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            // A mouse drag may leave the stick; follow it on the window
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    game.borrow_mut()
                        .steer_stick(event.client_x() as f32, event.client_y() as f32);
                });
                let _ = window
                    .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().release_stick();
                });
                let _ = window
                    .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Boost button
        if let Some(btn) = document.get_element_by_id("boost-btn") {
            for (event_name, pressed) in [
                ("touchstart", true),
                ("touchend", false),
                ("mousedown", true),
                ("mouseup", false),
                ("mouseleave", false),
            ] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    let mut g = game.borrow_mut();
                    if pressed {
                        event.prevent_default();
                        g.press(Intent::Boost);
                    } else {
                        g.release(Intent::Boost);
                    }
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Viewport changes are queued and only picked up on the next reset
    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            let sizes = viewport_sizes(&g.session.config);
            g.session.set_sizes(sizes);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn start_clock(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(move || {
            game.borrow_mut().advance_clock();
        });
        if let Err(e) = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            CLOCK_INTERVAL_MS,
        ) {
            log::error!("Failed to start clock: {:?}", e);
        }
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Box Snake (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    autoplay(0x5eed, 3600);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session steered toward the nearest fruit, one simulated minute
/// at 60 frames per second
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(seed: u64, frames: u32) {
    use std::time::Duration;

    use box_snake::sim::{FrameOutcome, GameSession, tick};
    use box_snake::{GameSizes, Intent, KeyState, SnakeConfig};

    let config = SnakeConfig::load();
    let sizes = GameSizes::large(&config);
    let mut session = GameSession::new(seed, config, sizes);
    session.mount_head();

    let frame_dt = Duration::from_micros(16_667);
    let mut resets = 0;

    for _ in 0..frames {
        let mut keys = KeyState::default();
        if let Some(head) = session.head() {
            let nearest = session
                .fruits()
                .iter()
                .min_by(|a, b| a.pos.distance(head).total_cmp(&b.pos.distance(head)));
            if let Some(target) = nearest {
                let delta = target.pos - head;
                let dead = session.progression().speed;
                if delta.x > dead {
                    keys.press(Intent::Right);
                } else if delta.x < -dead {
                    keys.press(Intent::Left);
                }
                if delta.z > dead {
                    keys.press(Intent::Back);
                } else if delta.z < -dead {
                    keys.press(Intent::Forward);
                }
            }
        }

        // Burn stamina whenever there is some
        if session.stamina().blocks() > 0 {
            session.press_boost();
        }

        session.advance_clock(frame_dt);
        if tick(&mut session, &keys) == FrameOutcome::Reset {
            resets += 1;
        }
        for event in session.drain_events() {
            log::info!("{:?}", event);
        }
    }

    let p = session.progression();
    println!(
        "Finished {} frames: level {}, score {}, body {}, stamina {}, resets {}",
        frames,
        p.level,
        p.score,
        session.body().len(),
        session.stamina().blocks(),
        resets
    );
}
