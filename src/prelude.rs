//! Commonly used types and utilities for ease of import.

pub use crate::{
    compute_winner, Board, CellState, Command, Direction, GameEngine, GameError, GameState,
    Opponent, Pos, RandomOpponent, Response,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, Controller};
