#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::path::PathBuf;

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use tictactoe::{
    init_logging, Controller, GameEngine, RandomOpponent, DEFAULT_HEIGHT, DEFAULT_SAVE_PATH,
    DEFAULT_WIDTH,
};

#[derive(Parser)]
#[command(author, version, about = "Tic-tac-toe on an arbitrary rectangular board", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Width of the playing area.
    #[arg(default_value_t = DEFAULT_WIDTH)]
    width: usize,
    /// Height of the playing area.
    #[arg(default_value_t = DEFAULT_HEIGHT)]
    height: usize,
    /// Load the game from the save file (if this file exists).
    #[arg(long)]
    load: bool,
    #[arg(long, default_value = DEFAULT_SAVE_PATH)]
    save_path: PathBuf,
    #[arg(long, help = "Fix RNG seed for a reproducible opponent (e.g., --seed 12345)")]
    seed: Option<u64>,
}

#[cfg(feature = "std")]
fn load_or_create_game(cli: &Cli, opponent: RandomOpponent) -> anyhow::Result<GameEngine> {
    if cli.load && cli.save_path.exists() {
        log::info!("resuming from {}", cli.save_path.display());
        return GameEngine::load_from_path(&cli.save_path, opponent)
            .map_err(|e| anyhow::anyhow!("cannot load {}: {}", cli.save_path.display(), e));
    }
    GameEngine::with_opponent(cli.width, cli.height, opponent).map_err(|e| anyhow::anyhow!(e))
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let opponent = match cli.seed {
        Some(s) => RandomOpponent::seeded(s),
        None => RandomOpponent::from_entropy(),
    };
    let engine = load_or_create_game(&cli, opponent)?;
    Controller::new(engine, cli.save_path.clone()).run()
}
