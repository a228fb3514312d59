//! Neon Arcade entry point
//!
//! In the browser: mounts the game named by the canvas `data-game`
//! attribute and exports `mount_game` / `unmount_game` to the page.
//! Natively: runs a headless, scripted session and logs a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use neon_arcade::platform::GameKind;
    use neon_arcade::platform::web::{Mount, mount};
    use neon_arcade::{Settings, Tuning};

    thread_local! {
        static MOUNTED: RefCell<Option<Mount>> = const { RefCell::new(None) };
    }

    fn find_canvas() -> Option<HtmlCanvasElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .ok()
    }

    /// Optional balance overrides from the canvas `data-tuning` attribute
    fn load_tuning(canvas: &HtmlCanvasElement) -> Tuning {
        let Some(json) = canvas.get_attribute("data-tuning") else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring data-tuning: {}", e);
                Tuning::default()
            }
        }
    }

    /// Mount a game on `#canvas`, replacing any mounted one
    #[wasm_bindgen]
    pub fn mount_game(kind: &str) -> bool {
        unmount_game();

        let kind = match kind.parse::<GameKind>() {
            Ok(kind) => kind,
            Err(e) => {
                log::warn!("{}", e);
                return false;
            }
        };
        let Some(canvas) = find_canvas() else {
            log::error!("No #canvas element to mount on");
            return false;
        };

        let tuning = load_tuning(&canvas);
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;

        match mount(canvas, kind, seed, &tuning, &settings) {
            Some(mounted) => {
                MOUNTED.with(|slot| *slot.borrow_mut() = Some(mounted));
                true
            }
            None => {
                log::error!("Failed to mount {}", kind.as_str());
                false
            }
        }
    }

    /// Stop the mounted game and detach it from the page
    #[wasm_bindgen]
    pub fn unmount_game() {
        if let Some(mounted) = MOUNTED.with(|slot| slot.borrow_mut().take()) {
            mounted.unmount();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            // Already initialized by an earlier start
            return;
        }
        log::info!("Neon Arcade starting...");

        let kind = find_canvas()
            .and_then(|c| c.get_attribute("data-game"))
            .and_then(|name| name.parse::<GameKind>().ok())
            .unwrap_or(GameKind::Realm);
        mount_game(kind.as_str());
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use glam::Vec2;

    use neon_arcade::audio::RecordingAudio;
    use neon_arcade::consts::LANE_COUNT;
    use neon_arcade::platform::{GameKind, InputSlot, LoopDriver, ManualScheduler};
    use neon_arcade::renderer::{RecordingSurface, Scene};
    use neon_arcade::sim::{Extent, Game, RacerState, RealmState, SessionPhase};
    use neon_arcade::{Tuning, TuningError};

    #[derive(Parser, Debug)]
    #[command(about = "Run a Neon Arcade game headless with a scripted player")]
    struct Args {
        /// game to run: realm or racer
        #[arg(default_value_t = GameKind::Realm)]
        game: GameKind,

        /// simulation ticks to run (60 per second of play)
        #[arg(long, default_value_t = 1800)]
        ticks: u64,

        /// JSON file with balance overrides
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// rng seed (defaults to the clock)
        #[arg(long)]
        seed: Option<u64>,
    }

    const EXTENT: Extent = Extent {
        width: 800.0,
        height: 600.0,
    };

    /// Scripted host action for one tick
    enum Action {
        Idle,
        Move(Vec2),
        Press(Vec2),
    }

    impl Action {
        fn apply(self, input: &mut InputSlot) {
            match self {
                Action::Idle => {}
                Action::Move(p) => input.pointer_moved(p),
                Action::Press(p) => input.pointer_pressed(p),
            }
        }
    }

    /// Press the newest bubble every few ticks
    fn realm_script(tick: u64, state: &RealmState) -> Action {
        match state.bubbles.last() {
            Some(b) if tick % 15 == 0 => Action::Press(b.pos),
            _ => Action::Move(Vec2::new(400.0 + (tick as f32 * 0.05).sin() * 300.0, 300.0)),
        }
    }

    /// Steer into the lane whose nearest oncoming car is farthest away
    fn racer_script(_tick: u64, state: &RacerState) -> Action {
        let player = state.player_rect();
        let lane_width = state.tuning.road_width / LANE_COUNT as f32;
        let best = (0..LANE_COUNT)
            .map(|lane| {
                let x = state.lane_x(lane);
                let threat = state
                    .obstacles
                    .iter()
                    .filter(|o| (o.rect.pos.x - x).abs() < lane_width / 2.0)
                    .filter(|o| o.rect.top() < player.bottom())
                    .map(|o| player.top() - o.rect.bottom())
                    .fold(f32::INFINITY, f32::min);
                (lane, threat)
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(lane, _)| lane)
            .unwrap_or(1);
        let x = state.lane_x(best) + state.tuning.car_width / 2.0;
        Action::Move(Vec2::new(x, player.center().y))
    }

    fn run<G: Game + Scene>(game: G, ticks: u64, mut script: impl FnMut(u64, &G) -> Action) {
        let mut driver = LoopDriver::new(
            game,
            RecordingSurface::new(EXTENT),
            RecordingAudio::default(),
            ManualScheduler::default(),
        );
        driver.launch();
        driver.start();

        let mut runs = 1;
        for tick in 0..ticks {
            script(tick, driver.game()).apply(driver.input_mut());
            driver.frame();
            if driver.game().phase() == SessionPhase::Ended {
                log::info!("Run {} ended at tick {} with score {}", runs, tick, driver.game().score());
                runs += 1;
                driver.start();
            }
        }
        driver.stop();

        log::info!(
            "Done: {} frames, score {}, {} tones, {} draw calls in the last frame",
            driver.surface().frames,
            driver.game().score(),
            driver.audio().played.len(),
            driver.surface().commands.len()
        );
    }

    fn load_tuning(path: Option<&Path>) -> Result<Tuning, TuningError> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)?;
        Tuning::from_json(&json)
    }

    pub fn main() -> Result<(), TuningError> {
        let args = Args::parse();
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let tuning = load_tuning(args.tuning.as_deref()).inspect_err(|e| {
            if let Some(path) = &args.tuning {
                log::error!("Bad tuning file {}: {}", path.display(), e);
            }
        })?;

        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        log::info!("Neon Arcade (headless) - {} for {} ticks, seed {}", args.game, args.ticks, seed);

        match args.game {
            GameKind::Realm => run(RealmState::new(seed, EXTENT, tuning.realm), args.ticks, realm_script),
            GameKind::Racer => run(RacerState::new(seed, EXTENT, tuning.racer), args.ticks, racer_script),
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), neon_arcade::TuningError> {
    headless::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
