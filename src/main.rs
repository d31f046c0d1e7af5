//! Neon Ascent - headless native demo
//!
//! Runs the autopilot through the real frame driver and logs the event
//! stream. Usage: `neon-ascent [settings.json] [level.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;
    use std::time::Duration;

    use neon_ascent::audio::{AudioMixer, LogSink};
    use neon_ascent::sim::{GameEvent, GameState, autopilot};
    use neon_ascent::{CustomLevel, Driver, LevelError, RunSettings, SettingsError, SystemClock};
    use thiserror::Error;

    /// Longest demo run before the driver is stopped (seconds)
    const DEMO_SECONDS: f64 = 120.0;

    #[derive(Debug, Error)]
    pub enum DemoError {
        #[error("cannot read {path}: {source}")]
        Io {
            path: String,
            source: std::io::Error,
        },
        #[error(transparent)]
        Settings(#[from] SettingsError),
        #[error(transparent)]
        Level(#[from] LevelError),
    }

    fn read(path: &Path) -> Result<String, DemoError> {
        std::fs::read_to_string(path).map_err(|source| DemoError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    fn load_run(
        settings_path: Option<&Path>,
        level_path: Option<&Path>,
    ) -> Result<GameState, DemoError> {
        let settings = match settings_path {
            Some(path) => RunSettings::from_json(&read(path)?)?,
            None => RunSettings {
                seed: rand::random(),
                ..RunSettings::default()
            },
        };
        match level_path {
            Some(path) => {
                let level = CustomLevel::from_json(&read(path)?)?;
                Ok(GameState::with_level(&settings, level)?)
            }
            None => Ok(GameState::new(&settings)),
        }
    }

    pub fn run() {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let settings_path = args.first().map(Path::new);
        let level_path = args.get(1).map(Path::new);

        let state = match load_run(settings_path, level_path) {
            Ok(state) => state,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        };

        let mut driver = Driver::new(state, SystemClock::new());
        let mut mixer = AudioMixer::new(LogSink::default());
        let frame = Duration::from_secs_f64(1.0 / 60.0);
        let mut coins: u64 = 0;

        loop {
            let input = autopilot::drive(driver.state());
            driver.frame(&input);

            for event in driver.drain_events() {
                match event {
                    GameEvent::Sound(cue) => mixer.play(cue),
                    GameEvent::CoinEarned { value } => coins += u64::from(value),
                    GameEvent::Milestone { altitude } => log::info!("Milestone: {}m", altitude),
                    GameEvent::CheckpointReached { altitude } => {
                        log::info!("Progress stored at {}m", altitude)
                    }
                    GameEvent::LifeLost => log::info!("Life lost"),
                    GameEvent::GameOver { score } => log::info!("Final altitude: {}m", score),
                }
            }

            let state = driver.state();
            if state.is_over() || state.time_ticks as f64 / 60.0 >= DEMO_SECONDS {
                break;
            }
            std::thread::sleep(frame);
        }

        driver.stop();
        let snapshot = driver.snapshot();
        log::info!(
            "Demo finished: {}m, {} coins, {} cues played",
            snapshot.score,
            coins,
            mixer.sink().played
        );
        match serde_json::to_string(&snapshot) {
            Ok(json) => log::debug!("Final frame: {}", json),
            Err(e) => log::warn!("Could not serialize final frame: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Ascent (native) starting...");
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Driver` themselves
}
