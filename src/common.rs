//! Common types for the board game: cell contents, coordinates and board errors.

/// A `(row, col)` coordinate on the board.
pub type Pos = (usize, usize);

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    Empty,
    /// Mark placed by the human player.
    MarkX,
    /// Mark placed by the opponent.
    MarkO,
}

impl CellState {
    /// Character used when drawing the cell.
    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::MarkX => 'X',
            CellState::MarkO => 'O',
        }
    }

    pub fn is_mark(self) -> bool {
        !matches!(self, CellState::Empty)
    }
}

impl core::fmt::Display for CellState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Width or height was zero.
    InvalidDimensions { width: usize, height: usize },
    /// The target cell already holds a mark.
    CellOccupied(Pos),
    /// The coordinate lies outside the grid.
    OutOfBounds(Pos),
    /// `Empty` cannot be written as a mark.
    InvalidSymbol,
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::InvalidDimensions { width, height } => {
                write!(f, "Invalid board dimensions {}x{}: both must be at least 1", width, height)
            }
            BoardError::CellOccupied(_) => write!(f, "This cell has been already occupied."),
            BoardError::OutOfBounds((r, c)) => write!(f, "Cell ({}, {}) is outside the board", r, c),
            BoardError::InvalidSymbol => write!(f, "An empty cell cannot be placed as a mark"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
