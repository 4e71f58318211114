//! Scanline Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use scanline_arcade::audio::AudioManager;
    use scanline_arcade::consts::*;
    use scanline_arcade::game::{Arcade, FrameInput};
    use scanline_arcade::platform::{FrameClock, Key, Keyboard};
    use scanline_arcade::renderer::RenderState;
    use scanline_arcade::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        arcade: Arcade,
        render_state: Option<RenderState>,
        audio: AudioManager,
        keyboard: Keyboard,
        clock: FrameClock,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            let audio = AudioManager::new(&settings);
            Self {
                arcade: Arcade::new(Tuning::default(), settings, seed),
                render_state: None,
                audio,
                keyboard: Keyboard::default(),
                clock: FrameClock::new(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, time: f64) {
            let steps = self.clock.advance_to(time);
            let mut input = FrameInput::from_keyboard(&self.keyboard);

            for _ in 0..steps {
                self.arcade.step(&input, SIM_DT);
                // One-shot presses only reach the first substep
                input = input.held_only();
            }
            if steps > 0 {
                self.keyboard.end_frame();
            }

            for sound in self.arcade.take_sounds() {
                self.audio.play(sound);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let scene = self.arcade.scene(self.clock.fps());
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        log::warn!("Surface lost, reconfiguring");
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Scanline Arcade starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed virtual resolution; CSS scales the canvas
        let width = SCREEN_WIDTH as u32;
        let height = SCREEN_HEIGHT as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));

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

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());

        request_animation_frame(game);

        log::info!("Scanline Arcade running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_code(&event.code()) else {
                    return;
                };
                // Keep Space from scrolling and Tab from moving focus
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.keyboard.key_down(key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    game.borrow_mut().keyboard.key_up(key);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: drop held keys so nothing sticks
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keyboard.clear();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
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
    log::info!("Scanline Arcade (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    let layout_path = std::env::args().nth(1);
    headless::run(layout_path.as_deref());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted autoplay of both games with no window
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use scanline_arcade::audio::AudioManager;
    use scanline_arcade::consts::SIM_DT;
    use scanline_arcade::game::{Arcade, FrameInput, GameKind};
    use scanline_arcade::sim::{BrickLayout, GameEvent, GamePhase};
    use scanline_arcade::{Settings, Tuning};

    /// Sim seconds per game before giving up
    const DEMO_SECONDS: f32 = 120.0;
    const TUNING_FILE: &str = "scanline_arcade_tuning.json";

    pub fn run(layout_path: Option<&str>) {
        let tuning = Tuning::load_or_default(TUNING_FILE);
        let settings = Settings::load();
        let layout = match layout_path.map(BrickLayout::load_png) {
            Some(Ok(layout)) => layout,
            Some(Err(e)) => {
                log::warn!("Brick layout unusable ({}), using the classic wall", e);
                BrickLayout::classic()
            }
            None => BrickLayout::classic(),
        };
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let mut arcade = Arcade::with_layout(tuning, settings, seed, layout);
        let mut audio = AudioManager::new(&arcade.settings);

        for kind in [GameKind::Breakout, GameKind::Bubbles] {
            arcade.kind = kind;
            let (phase, seconds, bounces) = autoplay(&mut arcade);
            for sound in arcade.take_sounds() {
                audio.play(sound);
            }
            println!(
                "{:<17} {:?} after {:>6.1}s ({} bounces/hits)",
                kind.name(),
                phase,
                seconds,
                bounces
            );
        }
        log::info!("{} sounds played", audio.played());
    }

    /// Drive the active game with a simple tracking bot
    fn autoplay(arcade: &mut Arcade) -> (GamePhase, f32, usize) {
        let mut t = 0.0;
        let mut hits = 0;
        let mut first = true;

        while t < DEMO_SECONDS {
            let input = FrameInput {
                dir: bot_dir(arcade),
                action_pressed: first || arcade.kind == GameKind::Breakout,
                action_down: true,
                ..Default::default()
            };
            first = false;

            let phase = arcade.step(&input, SIM_DT);
            hits += arcade
                .events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Bounce | GameEvent::BubbleHit { .. }))
                .count();
            t += SIM_DT;
            if phase.is_terminal() {
                return (phase, t, hits);
            }
        }
        (arcade.phase(), t, hits)
    }

    /// Steer under the ball, or under the lowest bubble
    fn bot_dir(arcade: &Arcade) -> f32 {
        let (target, current) = match arcade.kind {
            GameKind::Breakout => (
                arcade.breakout.ball.rect.center().x,
                arcade.breakout.paddle.rect.center().x,
            ),
            GameKind::Bubbles => {
                let player_x = arcade.bubbles.player.rect.center().x;
                let target = arcade
                    .bubbles
                    .bubbles
                    .iter()
                    .filter(|b| b.active)
                    .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                    .map_or(player_x, |b| b.pos.x);
                (target, player_x)
            }
        };
        let gap = target - current;
        if gap.abs() < 4.0 { 0.0 } else { gap.signum() }
    }
}
