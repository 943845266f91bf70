//! Devilish Platformer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use devilish_platformer::audio::{AudioManager, SoundEffect};
    use devilish_platformer::consts::*;
    use devilish_platformer::effects::Effects;
    use devilish_platformer::platform::InputState;
    use devilish_platformer::renderer::{RenderState, build_scene};
    use devilish_platformer::sim::{GameEvent, GameState, LoopPhase, devilish_level, tick};
    use devilish_platformer::stats::{RunStats, format_time};
    use devilish_platformer::tuning::Tuning;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        effects: Effects,
        audio: AudioManager,
        stats: RunStats,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: InputState,
        /// Frame counter; salts the shake jitter and stone wobble
        frame_count: u32,
        /// Previous loop phase, to catch transitions
        last_phase: LoopPhase,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let tuning = Tuning::load();
            let mut stats = RunStats::load();
            stats.note_attempt();
            Self {
                state: GameState::new(devilish_level(), tuning),
                effects: Effects::new(seed),
                audio: AudioManager::new(),
                stats,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: InputState::new(),
                frame_count: 0,
                last_phase: LoopPhase::Running,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.poll();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                self.drain_events();
                self.handle_phase_transition();

                // One-shot intents are consumed by the first tick that sees them
                self.input.clear_one_shots();
            }

            // Cosmetics advance in wall time, once per frame
            let follow = self.state.player.aabb().center();
            self.effects
                .update(dt, follow, self.state.level.bounds, &self.state.tuning);
            self.frame_count = self.frame_count.wrapping_add(1);
        }

        /// Route the tick's events into effects, audio and stats
        fn drain_events(&mut self) {
            for i in 0..self.state.events.len() {
                let event = self.state.events[i];
                self.effects.on_event(&event, &self.state.tuning);
                if let Some(sound) = SoundEffect::for_event(&event) {
                    self.audio.play(sound);
                }
                if let GameEvent::Win { .. } = event {
                    if self.stats.record_completion(self.state.run_time) {
                        log::info!("New best time: {}", format_time(self.state.run_time));
                    }
                    self.stats.save();
                }
            }
        }

        fn handle_phase_transition(&mut self) {
            let phase = self.state.phase;
            if phase != self.last_phase {
                match phase {
                    LoopPhase::Resetting => {
                        // A new run is about to start; stale visuals go with the old one
                        self.effects.clear();
                        self.stats.note_attempt();
                    }
                    LoopPhase::Terminated => {
                        self.stats.save();
                        log::info!(
                            "Session over: {} attempt(s), {} completion(s)",
                            self.state.attempts,
                            self.stats.completions
                        );
                    }
                    LoopPhase::Running => {}
                }
                self.last_phase = phase;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.state, &self.effects, self.frame_count);
            if let Some(ref mut render_state) = self.render_state {
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
            let Some(window) = web_sys::window() else {
                return;
            };
            let Some(document) = window.document() else {
                return;
            };

            if let Some(el) = document
                .query_selector("#hud-attempts .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&self.state.attempts.to_string()));
            }

            if let Some(el) = document
                .query_selector("#hud-timer .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&format_time(self.state.run_time)));
            }

            if let Some(el) = document
                .query_selector("#hud-jumps .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&self.state.player.jumps_left.to_string()));
            }

            if let Some(el) = document
                .query_selector("#hud-best .hud-value")
                .ok()
                .flatten()
            {
                let text = match self.stats.best_time {
                    Some(best) => format_time(best),
                    None => "--".to_string(),
                };
                el.set_text_content(Some(&text));
            }

            // Status banner: dead, won, or nothing
            if let Some(el) = document.get_element_by_id("status-message") {
                let text = if self.state.phase == LoopPhase::Terminated {
                    Some("Thanks for playing")
                } else if self.state.player.won {
                    Some("You escaped! Press R to run it back")
                } else if !self.state.player.alive {
                    Some("You died! Press R to retry")
                } else {
                    None
                };
                match text {
                    Some(msg) => {
                        el.set_text_content(Some(msg));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Devilish Platformer starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
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
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
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

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (LEVEL_WIDTH, LEVEL_HEIGHT),
        )
        .await;
        game.borrow_mut().render_state = Some(render_state);

        // Set up input handlers
        setup_input_handlers(game.clone());

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Devilish Platformer running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keydown
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                // Held keys repeat; the sim does its own edge detection,
                // but repeats would re-latch one-shot intents
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                g.audio.resume();

                let key = event.key();
                if key == "m" || key == "M" {
                    let muted = g.audio.toggle_muted();
                    log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
                    return;
                }

                if g.input.key_event(&key, true) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.input.key_event(&event.key(), false) {
                    event.prevent_default();
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Drop held keys when the tab goes away, so the player does not
        // keep running off a ledge in the background
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.release_all();
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let terminated = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();

            g.state.phase == LoopPhase::Terminated
        };

        // A terminated loop stops rescheduling itself
        if !terminated {
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
    use devilish_platformer::consts::SIM_DT;
    use devilish_platformer::sim::{GameState, TickInput, devilish_level, tick};
    use devilish_platformer::tuning::Tuning;

    env_logger::init();
    log::info!("Devilish Platformer (native) starting...");
    log::info!("Headless demo run; serve the wasm build for the real game");

    let mut state = GameState::new(devilish_level(), Tuning::default());

    // Scripted demo: run right, hopping every second, for up to 20 seconds
    let mut events_seen = 0usize;
    for t in 0..2400u32 {
        let input = TickInput {
            move_right: true,
            jump: (t % 120) < 10,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);

        for event in &state.events {
            events_seen += 1;
            log::info!("tick {:5}: {:?}", state.time_ticks, event);
        }

        if !state.player.alive || state.player.won {
            break;
        }
    }

    log::info!(
        "Demo over after {:.2}s: alive={} won={} events={}",
        state.run_time,
        state.player.alive,
        state.player.won,
        events_seen
    );

    // Restart once, then shut the loop down
    tick(&mut state, &TickInput { reset: true, ..Default::default() }, SIM_DT);
    tick(&mut state, &TickInput::default(), SIM_DT);
    log::info!("After reset: attempt {}", state.attempts);

    tick(&mut state, &TickInput { quit: true, ..Default::default() }, SIM_DT);
    log::info!("Loop phase: {:?}", state.phase);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
