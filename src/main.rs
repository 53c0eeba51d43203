//! Santa Posts entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use santa_posts::Settings;
    use santa_posts::audio::{AudioManager, MusicCue, SoundEffect};
    use santa_posts::consts::SIM_DT;
    use santa_posts::input::{HeldKeys, Key};
    use santa_posts::renderer::pipeline::{device_limits, surface_size};
    use santa_posts::renderer::{RenderState, build_scene};
    use santa_posts::sim::{FixedStep, GameEvent, GameState, activate};
    use santa_posts::ui::{HudView, Overlay};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        audio: AudioManager,
        render_state: Option<RenderState>,
        keys: HeldKeys,
        clock: FixedStep,
        last_time: f64,
        /// HUD as last written to the DOM
        shown_hud: Option<HudView>,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            let seed = settings.seed.unwrap_or(0);
            let audio = AudioManager::new(&settings);
            Self {
                state: GameState::new(seed),
                settings,
                audio,
                render_state: None,
                keys: HeldKeys::default(),
                clock: FixedStep::default(),
                last_time: 0.0,
                shown_hud: None,
            }
        }

        fn next_seed(&self) -> u64 {
            self.settings
                .seed
                .unwrap_or_else(|| js_sys::Date::now() as u64)
        }

        /// Key went down. Returns true when a new run started and the loop must be scheduled.
        fn press(&mut self, key: Key) -> bool {
            self.keys.press(key);
            if key == Key::Action {
                let seed = self.next_seed();
                activate(&mut self.state, seed);
                return self.dispatch_events();
            }
            false
        }

        fn release(&mut self, key: Key) {
            self.keys.release(key);
        }

        /// Forward simulation events to audio. Returns true if a run started.
        fn dispatch_events(&mut self) -> bool {
            let mut started = false;
            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                match MusicCue::for_event(&event) {
                    Some(MusicCue::Start) => {
                        self.audio.resume();
                        self.audio.start_music();
                    }
                    Some(MusicCue::Stop) => self.audio.stop_music(),
                    None => {}
                }
                match event {
                    GameEvent::RunStarted => {
                        self.clock.reset();
                        self.last_time = 0.0;
                        started = true;
                    }
                    GameEvent::Crash => {
                        log::info!("Game over - final score: {}", self.state.score);
                    }
                    GameEvent::Shoot | GameEvent::Score { .. } => {}
                }
            }
            started
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let input = self.keys.tick_input();
            self.clock.advance(&mut self.state, &input, dt);
            self.dispatch_events();
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(ref mut render_state) = self.render_state else {
                return;
            };
            let vertices = build_scene(&self.state);
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

        /// Update HUD elements in DOM (only when something changed)
        fn update_hud(&mut self) {
            let view = HudView::from_state(&self.state);
            if self.shown_hud.as_ref() == Some(&view) {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&view.score));
            }
            fill_list(&document, "feed", &view.feed, "post-card");

            set_visible(&document, "start-screen", view.overlay == Some(Overlay::Start));
            match &view.overlay {
                Some(Overlay::GameOver {
                    final_score,
                    history,
                }) => {
                    set_visible(&document, "game-over", true);
                    if let Some(el) = document.get_element_by_id("final-score") {
                        el.set_text_content(Some(final_score));
                    }
                    set_visible(&document, "history", !history.is_empty());
                    fill_list(&document, "history-list", history, "history-item");
                }
                _ => set_visible(&document, "game-over", false),
            }

            self.shown_hud = Some(view);
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    /// Replace the children of `#id` with one element per message
    fn fill_list(document: &Document, id: &str, messages: &[String], class: &str) {
        let Some(list) = document.get_element_by_id(id) else {
            return;
        };
        list.set_inner_html("");
        for (i, message) in messages.iter().enumerate() {
            let Ok(item) = document.create_element("div") else {
                continue;
            };
            let class = if i == 0 {
                class.to_string()
            } else {
                format!("{class} faded")
            };
            let _ = item.set_attribute("class", &class);
            item.set_text_content(Some(&format!("\u{201c}{message}\u{201d}")));
            let _ = list.append_child(&item);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Santa Posts starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::from_json_or_default(
            canvas.get_attribute(Settings::ATTRIBUTE).as_deref(),
        );
        let game = Rc::new(RefCell::new(Game::new(settings)));

        setup_keyboard(game.clone());
        setup_touch_controls(&document, game.clone());
        setup_overlay_buttons(&document, game.clone());
        setup_focus_handlers(game.clone());
        game.borrow_mut().update_hud();

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::warn!("Failed to create surface - rendering disabled: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::warn!("No graphics adapter - rendering disabled: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        // Fixed logical size, scaled for crisp pixels on high-DPI screens but
        // never past the largest texture the device will accept
        let max_dim = device_limits(&adapter.limits()).max_texture_dimension_2d;
        let (width, height) = surface_size(window.device_pixel_ratio(), max_dim);
        canvas.set_width(width);
        canvas.set_height(height);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => {
                let mut g = game.borrow_mut();
                g.render_state = Some(render_state);
                g.render();
            }
            Err(e) => log::warn!("Failed to create device - rendering disabled: {}", e),
        }

        log::info!("Santa Posts ready!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_code(&event.code()) else {
                    return;
                };
                event.prevent_default();
                let started = game.borrow_mut().press(key);
                if started {
                    request_animation_frame(game.clone());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    // Keeps Space from also "clicking" a focused overlay button
                    event.prevent_default();
                    game.borrow_mut().release(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen buttons carrying `data-key="<KeyboardEvent.code>"` act as held keys
    fn setup_touch_controls(document: &Document, game: Rc<RefCell<Game>>) {
        let Ok(buttons) = document.query_selector_all("[data-key]") else {
            return;
        };

        for i in 0..buttons.length() {
            let Some(button) = buttons
                .item(i)
                .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let Some(key) = button
                .get_attribute("data-key")
                .and_then(|code| Key::from_code(&code))
            else {
                continue;
            };

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    let started = game.borrow_mut().press(key);
                    if started {
                        request_animation_frame(game.clone());
                    }
                });
                let _ = button.add_event_listener_with_callback(
                    "pointerdown",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }

            for release_event in ["pointerup", "pointerleave", "pointercancel"] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    game.borrow_mut().release(key);
                });
                let _ = button
                    .add_event_listener_with_callback(release_event, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Start / restart buttons behave like a single action key tap
    fn setup_overlay_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.stop_propagation();
                let started = {
                    let mut g = game.borrow_mut();
                    let started = g.press(Key::Action);
                    g.release(Key::Action);
                    started
                };
                if started {
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Losing focus swallows keyups, so drop held keys and optionally mute
    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.keys.release_all();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                    log::info!("Muted (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(false);
                }
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One display frame. Reschedules itself only while a run is in progress;
    /// the frame that ends a run is still drawn.
    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
            g.state.is_playing()
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use santa_posts::consts::SIM_DT;
    use santa_posts::sim::{GameState, TickInput, activate, tick};

    env_logger::init();
    log::info!("Santa Posts (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    // Headless smoke run: hover and drop a post every half second
    let mut state = GameState::new(2024);
    activate(&mut state, 2024);
    let input = TickInput::default();
    let mut frames = 0u32;
    while state.is_playing() && frames < 60 * 60 {
        if frames.is_multiple_of(30) {
            activate(&mut state, 2024);
        }
        tick(&mut state, &input);
        frames += 1;
    }
    log::info!(
        "Headless run: {} frames ({:.1}s), score {}, {:?}",
        frames,
        frames as f32 * SIM_DT,
        state.score,
        state.phase
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
