//! Rectangular game board: grid contents, cursor and the set of empty cells.

use crate::common::{BoardError, CellState, Direction, Pos};
use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// Read-only copy of the grid and cursor handed to renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major cell contents.
    pub cells: Vec<CellState>,
    pub cursor: Pos,
}

impl BoardSnapshot {
    /// Cell at `(row, col)`; panics when out of bounds.
    pub fn get(&self, (row, col): Pos) -> CellState {
        self.cells[row * self.width + col]
    }

    /// Iterate over the grid one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.width)
    }
}

/// Board of `width` x `height` cells.
///
/// `empty_cells` always equals the set of coordinates holding
/// [`CellState::Empty`]. Only [`Board::set_symbol`] and [`Board::clear`]
/// write cells, and both keep the set in step with the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
    empty_cells: BTreeSet<Pos>,
    cursor: Pos,
}

impl Board {
    /// Create an empty board with the cursor in the top-left corner.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        let invalid = BoardError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        let len = width.checked_mul(height).ok_or(invalid)?;
        Ok(Board {
            width,
            height,
            cells: vec![CellState::Empty; len],
            empty_cells: all_cells(width, height).collect(),
            cursor: (0, 0),
        })
    }

    /// Rebuild a board from raw grid contents, deriving the empty-cell set
    /// from the grid itself.
    pub(crate) fn from_parts(
        width: usize,
        height: usize,
        cells: Vec<CellState>,
        cursor: Pos,
    ) -> Result<Self, BoardError> {
        let mut board = Board::new(width, height)?;
        if !board.contains(cursor) {
            return Err(BoardError::OutOfBounds(cursor));
        }
        // callers check the length; a mismatch here is a bug in the caller
        debug_assert_eq!(cells.len(), width * height);
        board.empty_cells = all_cells(width, height)
            .filter(|&(r, c)| cells[r * width + c] == CellState::Empty)
            .collect();
        board.cells = cells;
        board.cursor = cursor;
        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Length of a run needed to win: the smaller board dimension.
    pub fn win_threshold(&self) -> usize {
        self.width.min(self.height)
    }

    /// Whether `pos` lies inside the grid.
    pub fn contains(&self, (row, col): Pos) -> bool {
        row < self.height && col < self.width
    }

    /// Contents of the cell at `pos`.
    ///
    /// # Panics
    /// When `pos` is out of bounds.
    pub fn get(&self, pos: Pos) -> CellState {
        self.cells[self.index(pos)]
    }

    /// Returns `true` when the cell at `pos` holds no mark.
    ///
    /// # Panics
    /// When `pos` is out of bounds.
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == CellState::Empty
    }

    /// Write `symbol` into an empty cell and drop it from the empty set.
    /// The board is untouched on error.
    pub fn set_symbol(&mut self, pos: Pos, symbol: CellState) -> Result<(), BoardError> {
        if !symbol.is_mark() {
            return Err(BoardError::InvalidSymbol);
        }
        if !self.contains(pos) {
            return Err(BoardError::OutOfBounds(pos));
        }
        if !self.is_empty(pos) {
            return Err(BoardError::CellOccupied(pos));
        }
        let idx = self.index(pos);
        self.cells[idx] = symbol;
        self.empty_cells.remove(&pos);
        Ok(())
    }

    /// Reset grid, empty set and cursor to the freshly created state.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
        self.empty_cells = all_cells(self.width, self.height).collect();
        self.cursor = (0, 0);
    }

    /// Coordinates of every empty cell, in row-major order.
    pub fn empty_cells(&self) -> &BTreeSet<Pos> {
        &self.empty_cells
    }

    pub fn is_full(&self) -> bool {
        self.empty_cells.is_empty()
    }

    /// Row-major view of the grid.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    /// Move the cursor one cell; stays put at the edge of the grid.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
        }
    }

    pub fn move_up(&mut self) {
        self.cursor.0 = self.cursor.0.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor.0 + 1 < self.height {
            self.cursor.0 += 1;
        }
    }

    pub fn move_left(&mut self) {
        self.cursor.1 = self.cursor.1.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor.1 + 1 < self.width {
            self.cursor.1 += 1;
        }
    }

    /// Copy of the grid and cursor for rendering.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            width: self.width,
            height: self.height,
            cells: self.cells.clone(),
            cursor: self.cursor,
        }
    }

    fn index(&self, (row, col): Pos) -> usize {
        assert!(self.contains((row, col)), "cell ({}, {}) out of bounds", row, col);
        row * self.width + col
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.chunks(self.width).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

fn all_cells(width: usize, height: usize) -> impl Iterator<Item = Pos> {
    (0..height).flat_map(move |r| (0..width).map(move |c| (r, c)))
}
