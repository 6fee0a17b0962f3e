//! Egg Quest entry point
//!
//! Web: sets up WebGPU, input and the animation loop around a `Driver`.
//! Native: headless runner that plays a level (autopilot by default) and
//! prints the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use egg_quest::audio::AudioManager;
    use egg_quest::platform::{AnimationLoop, LoopHandle};
    use egg_quest::renderer::{RenderState, SceneStyle, scene};
    use egg_quest::sim::{GameEvent, GamePhase};
    use egg_quest::{Driver, FrameControl, LevelConfig, Outcomes, Progress, Session, Settings};

    /// Session outcomes as the page sees them
    struct ShellOutcomes {
        progress: Rc<RefCell<Progress>>,
    }

    impl Outcomes for ShellOutcomes {
        fn on_win(&mut self, eggs: u32) {
            self.progress.borrow_mut().apply_win(eggs);
            set_text("clear-eggs", &eggs.to_string());
            set_text("wallet", &self.progress.borrow().total_eggs.to_string());
            show("level-clear", true);
        }

        fn on_lose(&mut self) {
            show("game-over", true);
        }

        fn on_exit(&mut self) {
            show("game-over", false);
            show("level-clear", false);
            show("level-map", true);
        }
    }

    /// Game instance holding all page state
    struct Game {
        driver: Driver<ShellOutcomes>,
        render_state: Option<RenderState>,
        style: SceneStyle,
        audio: AudioManager,
        settings: Settings,
        progress: Rc<RefCell<Progress>>,
        loop_handle: Option<LoopHandle>,
        shake: f32,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(progress: Rc<RefCell<Progress>>, settings: Settings, seed: u64) -> Self {
            let (level, character) = {
                let p = progress.borrow();
                (LevelConfig::numbered(p.current_level), p.character())
            };
            let mut style = SceneStyle::new(&level, &character);
            style.tilt = !settings.reduced_motion;

            let outcomes = ShellOutcomes {
                progress: progress.clone(),
            };
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);

            Self {
                driver: Driver::new(Session::new(level, seed, outcomes)),
                render_state: None,
                style,
                audio,
                settings,
                progress,
                loop_handle: None,
                shake: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// One display refresh
        fn frame(&mut self, time: f64) -> FrameControl {
            let control = self.driver.frame(time);

            let events = self.driver.session_mut().drain_events();
            self.audio.play_events(&events);
            if events.contains(&GameEvent::Crashed) && self.settings.effective_screen_shake() {
                self.shake = 8.0;
            }
            self.shake *= -0.8;
            if self.shake.abs() < 0.5 {
                self.shake = 0.0;
            }

            self.track_fps(time);
            self.render();
            self.update_hud();
            control
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 && time > oldest {
                self.fps = (60000.0 / (time - oldest)).round() as u32;
            }
        }

        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            self.style.shake = self.shake;
            let vertices = scene::build(&self.driver.session().snapshot(), &self.style);
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

        fn update_hud(&self) {
            let snap = self.driver.session().snapshot();
            set_text("hud-level", &snap.level_id.to_string());
            set_text("hud-progress", &snap.progress_label());
            set_text("hud-eggs", &snap.eggs.to_string());
            if self.settings.show_fps {
                set_text("hud-fps", &self.fps.to_string());
            }
            show("start-prompt", snap.phase == GamePhase::PreStart);
        }

        /// Load whatever level progress points at and reset the session
        fn load_current_level(&mut self, seed: u64) {
            let (level, character) = {
                let p = self.progress.borrow();
                (LevelConfig::numbered(p.current_level), p.character())
            };
            let mut style = SceneStyle::new(&level, &character);
            style.tilt = !self.settings.reduced_motion;
            self.style = style;

            let outcomes = ShellOutcomes {
                progress: self.progress.clone(),
            };
            self.driver = Driver::new(Session::new(level, seed, outcomes));
            self.shake = 0.0;
        }
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn show(id: &str, visible: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn hide_overlays() {
        for id in ["game-over", "level-clear", "level-map"] {
            show(id, false);
        }
    }

    /// (Re)start the frame loop; the previous loop is cancelled by the drop
    fn start_loop(game: &Rc<RefCell<Game>>) {
        let frame_game = game.clone();
        let handle = AnimationLoop::start(move |time| frame_game.borrow_mut().frame(time));
        game.borrow_mut().loop_handle = Some(handle);
    }

    fn stop_loop(game: &Rc<RefCell<Game>>) {
        if let Some(handle) = game.borrow_mut().loop_handle.take() {
            handle.stop();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Egg Quest starting...");

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
            log::error!("No #canvas element");
            return;
        };

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let progress = Rc::new(RefCell::new(Progress::new()));
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(progress, settings, seed)));
        log::info!("Game initialized with seed: {}", seed);

        match RenderState::from_canvas(canvas.clone(), width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("WebGPU unavailable: {}", e);
                set_text("loading", &format!("WebGPU unavailable: {}", e));
                return;
            }
        }

        show("loading", false);
        show("hud", true);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());

        start_loop(&game);
        log::info!("Egg Quest running!");
    }

    fn flap(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        g.audio.resume();
        g.driver.session_mut().flap();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                flap(&game);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(document) = document() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" | "ArrowUp" | "KeyW" => {
                        event.prevent_default();
                        flap(&game);
                    }
                    "Escape" => {
                        game.borrow_mut().driver.exit();
                        stop_loop(&game);
                    }
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(id: &str, handler: impl FnMut(web_sys::MouseEvent) + 'static) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id(id)) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click("retry-btn", move |_| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().driver.restart(seed);
                hide_overlays();
                start_loop(&game);
            });
        }

        {
            let game = game.clone();
            on_click("next-btn", move |_| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().load_current_level(seed);
                hide_overlays();
                start_loop(&game);
            });
        }

        {
            let game = game.clone();
            on_click("mute-btn", move |_| {
                let mut g = game.borrow_mut();
                g.settings.muted = !g.settings.muted;
                g.settings.save();
                let settings = g.settings.clone();
                g.audio.apply_settings(&settings);
                set_text("mute-btn", if settings.muted { "Unmute" } else { "Mute" });
            });
        }

        on_click("quit-btn", move |_| {
            game.borrow_mut().driver.exit();
            stop_loop(&game);
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use clap::Parser;
    use serde::Serialize;

    use egg_quest::driver::run_headless;
    use egg_quest::sim::Snapshot;
    use egg_quest::{Driver, LevelConfig, Outcomes, Progress, Session};

    /// Play an Egg Quest level without a window
    #[derive(Parser, Debug)]
    #[command(name = "egg-quest", version, about)]
    pub struct Args {
        /// Level number from the built-in catalog
        #[arg(short, long, default_value_t = 1)]
        pub level: u32,

        /// Custom level JSON file (overrides --level)
        #[arg(long)]
        pub level_file: Option<std::path::PathBuf>,

        /// RNG seed (defaults to the current time)
        #[arg(short, long)]
        pub seed: Option<u64>,

        /// Frame limit at 60 Hz
        #[arg(short, long, default_value_t = 36_000)]
        pub frames: u64,

        /// Flap once and let the bird fall instead of using the autopilot
        #[arg(long)]
        pub no_autopilot: bool,

        /// Print the result as JSON
        #[arg(long)]
        pub json: bool,
    }

    #[derive(Debug, Default)]
    struct Report {
        won: Option<u32>,
        lost: bool,
    }

    impl Outcomes for Report {
        fn on_win(&mut self, eggs: u32) {
            self.won = Some(eggs);
        }

        fn on_lose(&mut self) {
            self.lost = true;
        }
    }

    #[derive(Serialize)]
    struct Summary {
        outcome: &'static str,
        seed: u64,
        frames: u64,
        eggs_banked: u32,
        unlocked_levels: u32,
        snapshot: Snapshot,
    }

    pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
        let level = match &args.level_file {
            Some(path) => LevelConfig::from_json(&std::fs::read_to_string(path)?)?,
            None => LevelConfig::numbered(args.level),
        };
        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });

        let mut session = Session::new(level, seed, Report::default());
        if args.no_autopilot {
            session.flap();
        } else {
            session.set_autopilot(true);
        }

        let mut driver = Driver::new(session);
        let frames = run_headless(&mut driver, args.frames);

        let report = driver.session().outcomes();
        let mut progress = Progress::new();
        let outcome = match (report.won, report.lost) {
            (Some(eggs), _) => {
                progress.apply_win(eggs);
                "win"
            }
            (None, true) => "lose",
            (None, false) => "timeout",
        };

        let summary = Summary {
            outcome,
            seed,
            frames,
            eggs_banked: progress.total_eggs,
            unlocked_levels: progress.unlocked_levels,
            snapshot: driver.session().snapshot(),
        };

        if args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!(
                "Level {}: {} after {} frames (seed {})",
                driver.session().level().id,
                summary.outcome,
                summary.frames,
                summary.seed
            );
            println!(
                "  pipes {}  eggs {}  distance {:.0}px",
                summary.snapshot.progress_label(),
                summary.snapshot.eggs,
                summary.snapshot.distance
            );
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    let args = headless::Args::parse();
    log::info!("Egg Quest (native, headless) starting: {:?}", args);

    if let Err(e) = headless::run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
