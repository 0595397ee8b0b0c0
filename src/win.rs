//! Winner detection over rows, columns and both diagonal families.
//!
//! A symbol wins when it holds a contiguous run of at least
//! [`Board::win_threshold`] cells along any line. Every cell belongs to
//! exactly one line of each family, so a full scan is `O(width * height)`.

use crate::board::Board;
use crate::common::{CellState, Pos};

/// One straight line of cells across the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Row `r`, scanned left to right.
    Row(usize),
    /// Column `c`, scanned top to bottom.
    Column(usize),
    /// Cells with `row + col == k`, scanned top to bottom.
    AntiDiagonal(usize),
    /// Cells with `col - row == k - (height - 1)`, scanned top to bottom.
    MainDiagonal(usize),
}

impl Line {
    /// Coordinates on this line for a `width` x `height` board.
    pub fn cells(self, width: usize, height: usize) -> LineCells {
        let (start, step) = match self {
            Line::Row(r) => ((r as isize, 0), (0, 1)),
            Line::Column(c) => ((0, c as isize), (1, 0)),
            Line::AntiDiagonal(k) => {
                let row = k.saturating_sub(width - 1);
                ((row as isize, (k - row) as isize), (1, -1))
            }
            Line::MainDiagonal(k) => {
                let diff = k as isize - (height as isize - 1);
                let row = (-diff).max(0);
                ((row, row + diff), (1, 1))
            }
        };
        LineCells {
            pos: start,
            step,
            width: width as isize,
            height: height as isize,
        }
    }
}

/// Iterator walking a [`Line`] until it leaves the board.
#[derive(Debug, Clone)]
pub struct LineCells {
    pos: (isize, isize),
    step: (isize, isize),
    width: isize,
    height: isize,
}

impl Iterator for LineCells {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        let (r, c) = self.pos;
        if r < 0 || c < 0 || r >= self.height || c >= self.width {
            return None;
        }
        self.pos = (r + self.step.0, c + self.step.1);
        Some((r as usize, c as usize))
    }
}

/// Every line of a `width` x `height` board: `height` rows, `width` columns,
/// then `width + height - 1` lines of each diagonal family.
pub fn lines(width: usize, height: usize) -> impl Iterator<Item = Line> {
    let diagonals = width + height - 1;
    (0..height)
        .map(Line::Row)
        .chain((0..width).map(Line::Column))
        .chain((0..diagonals).map(Line::AntiDiagonal))
        .chain((0..diagonals).map(Line::MainDiagonal))
}

/// Longest runs of X and O seen while scanning one line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct RunTracker {
    prev: Option<CellState>,
    cur_x: usize,
    cur_o: usize,
    max_x: usize,
    max_o: usize,
}

impl RunTracker {
    fn push(&mut self, cell: CellState) {
        match cell {
            CellState::Empty => {
                self.flush_x();
                self.flush_o();
            }
            CellState::MarkX => {
                if self.prev == Some(CellState::MarkX) {
                    self.cur_x += 1;
                } else {
                    self.flush_o();
                    self.cur_x = 1;
                }
            }
            CellState::MarkO => {
                if self.prev == Some(CellState::MarkO) {
                    self.cur_o += 1;
                } else {
                    self.flush_x();
                    self.cur_o = 1;
                }
            }
        }
        self.prev = Some(cell);
    }

    fn flush_x(&mut self) {
        self.max_x = self.max_x.max(self.cur_x);
        self.cur_x = 0;
    }

    fn flush_o(&mut self) {
        self.max_o = self.max_o.max(self.cur_o);
        self.cur_o = 0;
    }

    /// Final `(max_x, max_o)` after the last cell.
    fn finish(mut self) -> (usize, usize) {
        self.flush_x();
        self.flush_o();
        (self.max_x, self.max_o)
    }
}

/// Symbol holding a qualifying run on `line`, if any.
pub fn line_winner(board: &Board, line: Line) -> Option<CellState> {
    let mut tracker = RunTracker::default();
    for pos in line.cells(board.width(), board.height()) {
        tracker.push(board.get(pos));
    }
    let (max_x, max_o) = tracker.finish();
    let threshold = board.win_threshold();
    if max_x >= threshold {
        Some(CellState::MarkX)
    } else if max_o >= threshold {
        Some(CellState::MarkO)
    } else {
        None
    }
}

/// Returns the symbol that has a run of at least `win_threshold` cells on
/// any line, or `None`.
///
/// In legal play only the player who just moved can complete a run, so both
/// symbols never qualify at once; the first qualifying line decides.
pub fn compute_winner(board: &Board) -> Option<CellState> {
    lines(board.width(), board.height()).find_map(|line| line_winner(board, line))
}
