//! Headless runner (default binary).
//!
//! Plays games with a random-input bot on a simulated fixed-step clock and
//! reports the results. The best score is kept in a JSON file between runs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use blockfall::core::{PieceSource, RotationMode, SessionConfig};
use blockfall::engine::{Engine, JsonFileStore, ScoreStore, BEST_SCORE_KEY};
use blockfall::types::{Command, Direction, GameStatus, TICK_MS};

/// Score file name inside the config directory
const STORE_FILE: &str = "scores.json";

#[derive(Debug, Parser)]
#[command(version, about = "Play falling-block games headlessly with a random bot")]
struct Cli {
    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level (-v = INFO, -vv = DEBUG, -vvv = TRACE)")]
    verbose: u8,

    #[arg(long, help = "Seed for piece generation and the bot (random when omitted)")]
    seed: Option<u64>,

    #[arg(long, default_value_t = 1, help = "Number of games to play")]
    games: u32,

    #[arg(long, help = "Deal pieces from a shuffled 7-bag instead of uniformly")]
    bag: bool,

    #[arg(long, help = "Allow small wall-kick offsets when a rotation collides")]
    kicks: bool,

    #[arg(long, default_value_t = 200_000, help = "Give up on a game after this many ticks")]
    max_ticks: u64,

    #[arg(long, help = "Path of the best-score file")]
    store: Option<PathBuf>,
}

fn default_store_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("blockfall")
        .join(STORE_FILE)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
}

/// Pick the bot's input for this tick, if any
fn bot_command(rng: &mut StdRng) -> Option<Command> {
    match rng.random_range(0..100u32) {
        0..=7 => Some(Command::Move(Direction::Left)),
        8..=15 => Some(Command::Move(Direction::Right)),
        16..=21 => Some(Command::Rotate),
        22..=25 => Some(Command::Move(Direction::Down)),
        26 => Some(Command::HardDrop),
        _ => None,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = SessionConfig::default();
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if cli.bag {
        config = config.with_pieces(PieceSource::bag());
    }
    if cli.kicks {
        config = config.with_rotation(RotationMode::Kicks);
    }

    let store_path = cli.store.unwrap_or_else(default_store_path);
    let store = JsonFileStore::new(&store_path);
    let mut engine = Engine::new(config, store);
    let mut bot = StdRng::seed_from_u64(engine.session().seed());
    info!(seed = engine.session().seed(), store = %store_path.display(), "runner ready");

    for game in 1..=cli.games {
        engine.apply(Command::StartGame);

        let mut ticks = 0u64;
        while engine.session().status() == GameStatus::Playing && ticks < cli.max_ticks {
            if let Some(command) = bot_command(&mut bot) {
                engine.apply(command);
            }
            engine.tick(TICK_MS);
            ticks += 1;
        }

        let session = engine.session();
        println!(
            "game {game}: score {} lines {} level {} ({} ticks{})",
            session.score(),
            session.lines(),
            session.level(),
            ticks,
            if session.status() == GameStatus::GameOver {
                ""
            } else {
                ", stopped"
            }
        );
    }

    let snapshot = engine.snapshot();
    let stored = engine
        .store()
        .get(BEST_SCORE_KEY)
        .with_context(|| format!("failed to read {}", store_path.display()))?;
    println!(
        "best score: {} (stored: {})",
        snapshot.best_score.unwrap_or(0),
        stored.unwrap_or(0)
    );
    println!("seed: {}", snapshot.seed);

    Ok(())
}
