//! Headless rounds: a seeded random "user" against the random opponent,
//! reporting the outcome counts as JSON.

use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;
use tictactoe::{
    GameEngine, GameState, Opponent, Outcome, RandomOpponent, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};

#[derive(Parser)]
#[command(about = "Simulate random-vs-random rounds")]
struct Args {
    seed: u64,
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,
    #[arg(long, default_value_t = 1)]
    rounds: usize,
}

/// Play one round to its outcome, picking the user's cells with `user`.
fn play_round(
    engine: &mut GameEngine,
    user: &mut RandomOpponent<SmallRng>,
) -> anyhow::Result<(Outcome, usize)> {
    let mut moves = 0;
    while engine.state() == GameState::UserTurn {
        let pos = user
            .select_cell(engine.board().empty_cells())
            .ok_or_else(|| anyhow::anyhow!("no cell left for the user"))?;
        engine.place_mark(pos).map_err(|e| anyhow::anyhow!(e))?;
        moves += 1;
    }
    let outcome = engine
        .outcome()
        .ok_or_else(|| anyhow::anyhow!("round stopped in {:?}", engine.state()))?;
    Ok((outcome, moves))
}

fn main() -> anyhow::Result<()> {
    tictactoe::init_logging();
    let args = Args::parse();

    let mut engine = GameEngine::with_opponent(
        args.width,
        args.height,
        RandomOpponent::seeded(args.seed),
    )
    .map_err(|e| anyhow::anyhow!(e))?;
    let mut user = RandomOpponent::new(SmallRng::seed_from_u64(args.seed.wrapping_add(1)));

    let (mut x_wins, mut o_wins, mut draws, mut user_moves) = (0usize, 0usize, 0usize, 0usize);
    for round in 0..args.rounds {
        if round > 0 {
            engine.step();
            engine.restart().map_err(|e| anyhow::anyhow!(e))?;
        }
        let (outcome, moves) = play_round(&mut engine, &mut user)?;
        user_moves += moves;
        match outcome {
            Outcome::XWins => x_wins += 1,
            Outcome::OWins => o_wins += 1,
            Outcome::Draw => draws += 1,
        }
    }

    let result = json!({
        "width": args.width,
        "height": args.height,
        "rounds": args.rounds,
        "x_wins": x_wins,
        "o_wins": o_wins,
        "draws": draws,
        "user_moves": user_moves,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
