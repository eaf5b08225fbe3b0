//! Star Dodger entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use star_dodger::audio::AudioManager;
    use star_dodger::platform::assets::fetch;
    use star_dodger::platform::{AssetStore, FrameClock, InputState, Key};
    use star_dodger::renderer::{SpriteBatch, SpriteRenderState, build_scene};
    use star_dodger::sim::{GameEvent, GameState, tick};
    use star_dodger::{Settings, StartupError, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        clock: FrameClock,
        batch: SpriteBatch,
        render_state: Option<SpriteRenderState>,
        audio: AudioManager,
        document: Document,
        last_score: Option<u64>,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, document: Document) -> Self {
            let clock = FrameClock::new(tuning.max_frame_dt);
            Self {
                state: GameState::new(seed, tuning),
                input: InputState::new(),
                clock,
                batch: SpriteBatch::new(),
                render_state: None,
                audio: AudioManager::new(Settings::default()),
                document,
                last_score: None,
            }
        }

        /// Advance by the time since the previous frame
        fn update(&mut self, time: f64) {
            let Some(dt) = self.clock.advance(time) else {
                return;
            };
            let input = self.input.poll(js_sys::Date::now());
            tick(&mut self.state, &input, dt);
            self.process_events();
        }

        /// Carry out the side effects the simulation queued
        fn process_events(&mut self) {
            for event in self.state.drain_events() {
                self.audio.handle_event(event);
                match event {
                    GameEvent::GameOver => self.set_game_over_visible(true),
                    GameEvent::Reset => self.set_game_over_visible(false),
                    GameEvent::Shot | GameEvent::EnemyDestroyed => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            build_scene(&self.state, &mut self.batch);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.batch) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update the score display when it changes
        fn update_hud(&mut self) {
            if self.last_score == Some(self.state.score) {
                return;
            }
            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            self.last_score = Some(self.state.score);
        }

        fn set_game_over_visible(&self, visible: bool) {
            let display = if visible { "block" } else { "none" };
            for id in ["game-over", "game-over-overlay"] {
                let Some(el) = self
                    .document
                    .get_element_by_id(id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                else {
                    continue;
                };
                if let Err(e) = el.style().set_property("display", display) {
                    log::warn!("Failed to toggle #{}: {:?}", id, e);
                }
            }
        }

        /// Start over from a fresh world
        fn restart(&mut self) {
            self.state.reset();
            self.input.clear();
            self.clock.restart();
            // Handle Reset now so music starts inside the user gesture
            self.process_events();
            log::info!("Game restarted");
        }
    }

    pub async fn run() -> Result<(), StartupError> {
        log::info!("Star Dodger starting...");

        let window = web_sys::window().ok_or(StartupError::MissingElement("window"))?;
        let document = window
            .document()
            .ok_or(StartupError::MissingElement("document"))?;

        let tuning = load_tuning().await;
        let assets = AssetStore::load_all().await?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(StartupError::MissingElement("#canvas"))?;

        // Backing store scaled for the display, layout stays in logical pixels
        let dpr = window.device_pixel_ratio();
        let width = (tuning.canvas_width as f64 * dpr) as u32;
        let height = (tuning.canvas_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        if let Err(e) = canvas.style().set_property(
            "width",
            &format!("{}px", tuning.canvas_width),
        ) {
            log::warn!("Failed to size canvas: {:?}", e);
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, document.clone())));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let canvas_size = game.borrow().state.canvas_size();
        let render_state =
            SpriteRenderState::new(surface, &adapter, width, height, canvas_size, &assets).await?;

        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            g.set_game_over_visible(false);
            g.audio.start_music();
        }

        setup_input_handlers(game.clone())?;
        setup_play_again_button(&document, game.clone());
        setup_focus_handlers(game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Star Dodger running!");
        Ok(())
    }

    /// Optional balance overrides next to the page
    async fn load_tuning() -> Tuning {
        match fetch::optional_text(Tuning::FILE_NAME).await {
            Ok(Some(text)) => match Tuning::from_json(&text) {
                Ok(tuning) => {
                    log::info!("Loaded {}", Tuning::FILE_NAME);
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", Tuning::FILE_NAME, e);
                    Tuning::default()
                }
            },
            Ok(None) => Tuning::default(),
            Err(e) => {
                log::warn!("Could not fetch {}: {}", Tuning::FILE_NAME, e);
                Tuning::default()
            }
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), StartupError> {
        let window = web_sys::window().ok_or(StartupError::MissingElement("window"))?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                g.audio.resume_music();

                if let Some(k) = Key::from_dom(&key) {
                    // Arrows and space would scroll the page
                    event.prevent_default();
                    g.input.press(k);
                    return;
                }

                match key.as_str() {
                    "Enter" if g.state.is_game_over() => g.restart(),
                    "m" | "M" => {
                        let mut settings = g.audio.settings().clone();
                        settings.toggle_mute();
                        g.audio.set_settings(settings);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(k) = Key::from_dom(&event.key()) {
                    game.borrow_mut().input.release(k);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(())
    }

    fn setup_play_again_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("play-again") else {
            log::warn!("No #play-again button, use Enter to restart");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().restart();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) -> Result<(), StartupError> {
        let window = web_sys::window().ok_or(StartupError::MissingElement("window"))?;

        // Window blur: keyup events will not arrive while unfocused
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.input.clear();
                g.audio.set_focused(false);
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window focus: restart frame timing so the gap is not simulated
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.clock.restart();
                if !g.state.is_game_over() {
                    g.audio.set_focused(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, game loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
    }

    if let Err(e) = wasm_game::run().await {
        log::error!("Star Dodger failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use star_dodger::Tuning;
    use star_dodger::demo;

    env_logger::init();
    log::info!("Star Dodger (native) starting...");
    log::info!("Rendering requires the web build - run with `trunk serve` to play");

    let mut args = std::env::args().skip(1);
    let ticks: u32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(3600);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);

    let tuning = match std::fs::read_to_string(Tuning::FILE_NAME) {
        Ok(text) => match Tuning::from_json(&text) {
            Ok(tuning) => {
                log::info!("Loaded {}", Tuning::FILE_NAME);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", Tuning::FILE_NAME, e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    log::info!("Running autopilot for {} ticks (seed {})", ticks, seed);
    let report = demo::run(seed, tuning, ticks);

    println!("\nAutopilot run");
    println!("  ticks:      {}", report.ticks_run);
    println!("  game time:  {:.2}s", report.game_time);
    println!("  phase:      {:?}", report.phase);
    println!("  score:      {}", report.score);
    println!(
        "  on screen:  {} bullets, {} enemies, {} asteroids, {} explosions",
        report.bullets, report.enemies, report.asteroids, report.explosions
    );
    println!("  last frame: {} draw commands", report.draw_commands);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
