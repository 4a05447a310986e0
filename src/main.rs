//! Cat Flap entry point
//!
//! The browser build is driven from `cat_flap::web`. Natively this runs a
//! headless demo: the autopilot plays one run and a JSON summary is printed.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use cat_flap::Tuning;
    use cat_flap::assets::{DirSource, load_assets};
    use cat_flap::audio::{AudioManager, play_events};
    use cat_flap::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    #[derive(Parser, Debug)]
    #[command(name = "cat-flap")]
    #[command(about = "Headless Cat Flap run played by the built-in autopilot")]
    pub struct Args {
        /// RNG seed for the run
        #[arg(default_value_t = 42)]
        pub seed: u64,
        /// Stop after this many ticks even if the run is still going
        #[arg(default_value_t = 10_000)]
        pub max_ticks: u64,
        /// Directory holding the sprite and sound files
        #[arg(long)]
        pub assets: Option<PathBuf>,
        /// JSON file overriding the default tuning
        #[arg(long)]
        pub tuning: Option<PathBuf>,
    }

    /// Printed at the end of the run
    #[derive(Debug, Serialize)]
    struct Summary {
        seed: u64,
        ticks: u64,
        score: u32,
        pipes_spawned: u32,
        phase: GamePhase,
        cause: Option<String>,
    }

    pub fn run(args: Args) -> Result<()> {
        let tuning = match &args.tuning {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading tuning file {}", path.display()))?;
                Tuning::from_json(&json)
                    .with_context(|| format!("invalid tuning in {}", path.display()))?
            }
            None => Tuning::default(),
        };
        let mut state = GameState::with_tuning(args.seed, tuning)?;

        match &args.assets {
            Some(dir) => {
                let bundle = futures::executor::block_on(load_assets(&DirSource::new(dir)))
                    .with_context(|| format!("loading assets from {}", dir.display()))?;
                if !bundle.is_complete() {
                    log::warn!("Running without {} optional asset(s)", bundle.missing().len());
                }
            }
            None => log::info!("No asset directory given, running headless"),
        }
        state.mark_assets_ready();

        let audio = AudioManager::new();
        let mut input = TickInput {
            start: true,
            autopilot: true,
            ..Default::default()
        };

        let mut ticks = 0;
        let mut cause = None;
        while ticks < args.max_ticks {
            let out = tick(&mut state, &input);
            input.start = false;
            ticks += 1;

            let events = state.drain_events();
            play_events(&audio, &events);
            for event in &events {
                match event {
                    GameEvent::Scored { score } => log::debug!("tick {ticks}: score {score}"),
                    GameEvent::Collided { cause: c } => cause = Some(format!("{c:?}")),
                    other => log::debug!("tick {ticks}: {other:?}"),
                }
            }

            if out.game_over {
                break;
            }
        }

        let summary = Summary {
            seed: args.seed,
            ticks,
            score: state.score(),
            pipes_spawned: state.scheduler().spawn_count(),
            phase: state.phase(),
            cause,
        };
        log::info!("Demo finished after {ticks} ticks with score {}", summary.score);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_positional() {
            let a = Args::try_parse_from(["cat-flap", "7", "500"]).unwrap();
            assert_eq!(a.seed, 7);
            assert_eq!(a.max_ticks, 500);
            assert_eq!(a.assets, None);
        }

        #[test]
        fn test_parse_defaults() {
            let a = Args::try_parse_from(["cat-flap"]).unwrap();
            assert_eq!(a.seed, 42);
            assert_eq!(a.max_ticks, 10_000);
            assert_eq!(a.tuning, None);
        }

        #[test]
        fn test_parse_flags() {
            let a = Args::try_parse_from(["cat-flap", "--assets", "public", "3"]).unwrap();
            assert_eq!(a.assets, Some(PathBuf::from("public")));
            assert_eq!(a.seed, 3);
        }

        #[test]
        fn test_parse_errors() {
            assert!(Args::try_parse_from(["cat-flap", "seven"]).is_err());
            assert!(Args::try_parse_from(["cat-flap", "--assets"]).is_err());
            assert!(Args::try_parse_from(["cat-flap", "1", "2", "3"]).is_err());
        }

        #[test]
        fn test_short_run() {
            let a = Args::try_parse_from(["cat-flap", "11", "50"]).unwrap();
            assert!(run(a).is_ok());
        }

        #[test]
        fn test_missing_tuning_file_is_reported() {
            let a = Args::try_parse_from(["cat-flap", "--tuning", "/nonexistent/tuning.json"])
                .unwrap();
            let err = run(a).unwrap_err();
            assert!(err.to_string().contains("reading tuning file"));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Cat Flap (native) starting...");

    demo::run(demo::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is cat_flap::web::start, this is just to satisfy the compiler
}
