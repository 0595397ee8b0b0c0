//! Save-file schema and the bincode codec around it.
//!
//! A save holds only the grid, cursor and turn state. The empty-cell set is
//! never stored; it is rebuilt from the grid on load.

use crate::{
    board::Board,
    common::{BoardError, CellState},
    config::SAVE_FORMAT_VERSION,
    game::{GameEngine, GameState},
    opponent::Opponent,
    win::compute_winner,
};
use alloc::vec::Vec;

/// Serializable game session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedGame {
    /// Always the first field so older or newer files can be told apart.
    pub version: u32,
    pub width: u64,
    pub height: u64,
    /// Row-major cell contents, `width * height` entries.
    pub cells: Vec<CellState>,
    pub cursor: (u64, u64),
    pub state: GameState,
    pub last_mover: Option<CellState>,
}

/// Errors raised while restoring or encoding a save.
#[derive(Debug)]
pub enum PersistError {
    /// The file was written by a different format version.
    UnsupportedVersion(u32),
    /// The grid does not hold `width * height` cells.
    CellCountMismatch { expected: usize, found: usize },
    /// Stored dimensions or cursor do not form a valid board.
    InvalidBoard(BoardError),
    /// `last_mover` named an empty cell.
    InvalidLastMover,
    /// Stored numbers do not fit this platform.
    DimensionOverflow,
    /// The turn state cannot follow from the stored grid.
    InconsistentState(GameState),
    #[cfg(feature = "std")]
    Encoding(bincode::Error),
    #[cfg(feature = "std")]
    Io(std::io::Error),
}

impl core::fmt::Display for PersistError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PersistError::UnsupportedVersion(v) => write!(
                f,
                "Unsupported save format version {} (expected {})",
                v, SAVE_FORMAT_VERSION
            ),
            PersistError::CellCountMismatch { expected, found } => {
                write!(f, "Save holds {} cells, board needs {}", found, expected)
            }
            PersistError::InvalidBoard(e) => write!(f, "Invalid saved board: {}", e),
            PersistError::InvalidLastMover => write!(f, "Saved last mover is not a mark"),
            PersistError::DimensionOverflow => write!(f, "Saved dimensions are too large"),
            PersistError::InconsistentState(state) => {
                write!(f, "Saved state {:?} does not match the saved board", state)
            }
            #[cfg(feature = "std")]
            PersistError::Encoding(e) => write!(f, "Save encoding error: {}", e),
            #[cfg(feature = "std")]
            PersistError::Io(e) => write!(f, "Save file error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::InvalidBoard(e) => Some(e),
            PersistError::Encoding(e) => Some(e),
            PersistError::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<bincode::Error> for PersistError {
    fn from(err: bincode::Error) -> Self {
        PersistError::Encoding(err)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        PersistError::Io(err)
    }
}

fn to_usize(v: u64) -> Result<usize, PersistError> {
    usize::try_from(v).map_err(|_| PersistError::DimensionOverflow)
}

impl<O: Opponent> GameEngine<O> {
    /// Generate a serializable snapshot of the current session.
    pub fn to_saved(&self) -> SavedGame {
        let board = self.board();
        let (row, col) = board.cursor();
        SavedGame {
            version: SAVE_FORMAT_VERSION,
            width: board.width() as u64,
            height: board.height() as u64,
            cells: board.cells().to_vec(),
            cursor: (row as u64, col as u64),
            state: self.state(),
            last_mover: self.last_mover(),
        }
    }

    /// Restore an engine from a snapshot, validating it first.
    pub fn from_saved(saved: SavedGame, opponent: O) -> Result<Self, PersistError> {
        if saved.version != SAVE_FORMAT_VERSION {
            return Err(PersistError::UnsupportedVersion(saved.version));
        }
        let width = to_usize(saved.width)?;
        let height = to_usize(saved.height)?;
        let expected = width
            .checked_mul(height)
            .ok_or(PersistError::DimensionOverflow)?;
        if saved.cells.len() != expected {
            return Err(PersistError::CellCountMismatch {
                expected,
                found: saved.cells.len(),
            });
        }
        if saved.last_mover == Some(CellState::Empty) {
            return Err(PersistError::InvalidLastMover);
        }
        let cursor = (to_usize(saved.cursor.0)?, to_usize(saved.cursor.1)?);
        let board = Board::from_parts(width, height, saved.cells, cursor)
            .map_err(PersistError::InvalidBoard)?;
        // a decided or full board leaves the user nothing to play
        if saved.state == GameState::UserTurn
            && (board.is_full() || compute_winner(&board).is_some())
        {
            return Err(PersistError::InconsistentState(saved.state));
        }
        log::info!(
            "restored {}x{} game in state {:?}, {} empty cells",
            width,
            height,
            saved.state,
            board.empty_cells().len()
        );
        Ok(GameEngine::from_parts(board, saved.state, saved.last_mover, opponent))
    }
}

#[cfg(feature = "std")]
impl<O: Opponent> GameEngine<O> {
    /// Encode the session as bytes.
    pub fn save(&self) -> Result<Vec<u8>, PersistError> {
        encode(&self.to_saved())
    }

    /// Rebuild a session from bytes produced by [`GameEngine::save`].
    pub fn load(bytes: &[u8], opponent: O) -> Result<Self, PersistError> {
        // check the version before trusting the rest of the layout
        let version: u32 = bincode::deserialize(bytes)?;
        if version != SAVE_FORMAT_VERSION {
            log::warn!("rejecting save with format version {}", version);
            return Err(PersistError::UnsupportedVersion(version));
        }
        let saved: SavedGame = bincode::deserialize(bytes)?;
        Self::from_saved(saved, opponent).inspect_err(|e| log::warn!("rejecting save: {}", e))
    }

    pub fn save_to_path(&self, path: impl AsRef<std::path::Path>) -> Result<(), PersistError> {
        std::fs::write(path, self.save()?)?;
        Ok(())
    }

    pub fn load_from_path(
        path: impl AsRef<std::path::Path>,
        opponent: O,
    ) -> Result<Self, PersistError> {
        let bytes = std::fs::read(path)?;
        Self::load(&bytes, opponent)
    }
}

/// Encode a snapshot taken through [`crate::Command::Save`].
#[cfg(feature = "std")]
pub fn encode(saved: &SavedGame) -> Result<Vec<u8>, PersistError> {
    Ok(bincode::serialize(saved)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opponent::RandomOpponent;
    use alloc::vec;

    fn saved_3x3() -> SavedGame {
        SavedGame {
            version: SAVE_FORMAT_VERSION,
            width: 3,
            height: 3,
            cells: vec![CellState::Empty; 9],
            cursor: (1, 1),
            state: GameState::UserTurn,
            last_mover: None,
        }
    }

    #[test]
    fn rejects_wrong_version() {
        let saved = SavedGame {
            version: SAVE_FORMAT_VERSION + 1,
            ..saved_3x3()
        };
        let err = GameEngine::from_saved(saved, RandomOpponent::seeded(1)).unwrap_err();
        assert!(matches!(err, PersistError::UnsupportedVersion(v) if v == SAVE_FORMAT_VERSION + 1));
    }

    #[test]
    fn rejects_short_grid() {
        let saved = SavedGame {
            cells: vec![CellState::Empty; 8],
            ..saved_3x3()
        };
        let err = GameEngine::from_saved(saved, RandomOpponent::seeded(1)).unwrap_err();
        assert!(matches!(
            err,
            PersistError::CellCountMismatch { expected: 9, found: 8 }
        ));
    }

    #[test]
    fn rejects_cursor_off_board() {
        let saved = SavedGame {
            cursor: (3, 0),
            ..saved_3x3()
        };
        let err = GameEngine::from_saved(saved, RandomOpponent::seeded(1)).unwrap_err();
        assert!(matches!(err, PersistError::InvalidBoard(BoardError::OutOfBounds((3, 0)))));
    }

    #[test]
    fn rejects_empty_last_mover() {
        let saved = SavedGame {
            last_mover: Some(CellState::Empty),
            ..saved_3x3()
        };
        assert!(matches!(
            GameEngine::from_saved(saved, RandomOpponent::seeded(1)),
            Err(PersistError::InvalidLastMover)
        ));
    }

    #[test]
    fn rejects_user_turn_on_finished_board() {
        use CellState::{MarkO as O, MarkX as X};
        let full = SavedGame {
            cells: vec![X, O, X, X, O, O, O, X, X],
            last_mover: Some(X),
            ..saved_3x3()
        };
        assert!(matches!(
            GameEngine::from_saved(full.clone(), RandomOpponent::seeded(1)),
            Err(PersistError::InconsistentState(GameState::UserTurn))
        ));

        let mut won = saved_3x3();
        won.cells[..3].copy_from_slice(&[X, X, X]);
        won.cells[3..5].copy_from_slice(&[O, O]);
        assert!(matches!(
            GameEngine::from_saved(won, RandomOpponent::seeded(1)),
            Err(PersistError::InconsistentState(GameState::UserTurn))
        ));

        // the same grid is fine once the round is recorded as over
        let drawn = SavedGame {
            state: GameState::Draw,
            ..full
        };
        let engine = GameEngine::from_saved(drawn, RandomOpponent::seeded(1)).unwrap();
        assert_eq!(engine.state(), GameState::Draw);
    }

    #[test]
    fn rejects_zero_dimensions() {
        let saved = SavedGame {
            width: 0,
            cells: vec![],
            ..saved_3x3()
        };
        assert!(matches!(
            GameEngine::from_saved(saved, RandomOpponent::seeded(1)),
            Err(PersistError::InvalidBoard(BoardError::InvalidDimensions { .. }))
        ));
    }
}
