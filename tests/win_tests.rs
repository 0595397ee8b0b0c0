use proptest::prelude::*;
use tictactoe::win::{lines, Line};
use tictactoe::{compute_winner, Board, CellState, Pos};

fn board_with(width: usize, height: usize, marks: &[(Pos, CellState)]) -> Board {
    let mut board = Board::new(width, height).unwrap();
    for &(pos, symbol) in marks {
        board.set_symbol(pos, symbol).unwrap();
    }
    board
}

/// `len` consecutive cells on one line long enough to hold them.
fn run_on_line(width: usize, height: usize, line_pick: usize, offset_pick: usize, len: usize) -> Vec<Pos> {
    let candidates: Vec<Vec<Pos>> = lines(width, height)
        .map(|l| l.cells(width, height).collect::<Vec<_>>())
        .filter(|cells| cells.len() >= len)
        .collect();
    let cells = &candidates[line_pick % candidates.len()];
    let start = offset_pick % (cells.len() - len + 1);
    cells[start..start + len].to_vec()
}

#[test]
fn test_top_row_wins_for_x() {
    let x = CellState::MarkX;
    let board = board_with(3, 3, &[((0, 0), x), ((0, 1), x), ((0, 2), x)]);
    assert_eq!(compute_winner(&board), Some(CellState::MarkX));
}

#[test]
fn test_short_main_diagonal_on_wide_board() {
    let x = CellState::MarkX;
    let board = board_with(4, 2, &[((0, 1), x), ((1, 2), x)]);
    assert_eq!(board.win_threshold(), 2);
    assert_eq!(compute_winner(&board), Some(CellState::MarkX));
}

#[test]
fn test_anti_diagonal_on_tall_board() {
    let o = CellState::MarkO;
    let board = board_with(2, 4, &[((2, 1), o), ((3, 0), o)]);
    assert_eq!(compute_winner(&board), Some(CellState::MarkO));
}

#[test]
fn test_tall_board_diagonals_stay_separate() {
    // (3, 0) and (0, 1) share no diagonal; a wrapped index would join them
    let x = CellState::MarkX;
    let board = board_with(2, 4, &[((3, 0), x), ((0, 1), x)]);
    assert_eq!(compute_winner(&board), None);
}

#[test]
fn test_single_row_board() {
    let board = board_with(5, 1, &[((0, 3), CellState::MarkO)]);
    assert_eq!(board.win_threshold(), 1);
    assert_eq!(compute_winner(&board), Some(CellState::MarkO));
}

#[test]
fn test_longer_run_than_threshold_wins() {
    let x = CellState::MarkX;
    let marks: Vec<(Pos, CellState)> = (0..5).map(|c| ((0, c), x)).collect();
    let board = board_with(5, 2, &marks);
    assert_eq!(compute_winner(&board), Some(CellState::MarkX));
}

#[test]
fn test_full_board_without_run() {
    use CellState::{MarkO as O, MarkX as X};
    let grid = [[X, O, X], [X, O, O], [O, X, X]];
    let mut marks = Vec::new();
    for (r, row) in grid.iter().enumerate() {
        for (c, &cell) in row.iter().enumerate() {
            marks.push(((r, c), cell));
        }
    }
    let board = board_with(3, 3, &marks);
    assert!(board.is_full());
    assert_eq!(compute_winner(&board), None);
}

#[test]
fn test_main_diagonal_index_formula() {
    // cells on MainDiagonal(k) satisfy col - row == k - (height - 1)
    for (w, h) in [(4, 2), (2, 4), (3, 3)] {
        for k in 0..w + h - 1 {
            for (r, c) in Line::MainDiagonal(k).cells(w, h) {
                assert_eq!(c as isize - r as isize, k as isize - (h as isize - 1));
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn fresh_board_has_no_winner(width in 1..10usize, height in 1..10usize) {
        let board = Board::new(width, height).unwrap();
        prop_assert_eq!(compute_winner(&board), None);
    }

    #[test]
    fn threshold_run_wins(
        width in 1..9usize,
        height in 1..9usize,
        line_pick in any::<usize>(),
        offset_pick in any::<usize>(),
        use_o in any::<bool>(),
    ) {
        let symbol = if use_o { CellState::MarkO } else { CellState::MarkX };
        let threshold = width.min(height);
        let run = run_on_line(width, height, line_pick, offset_pick, threshold);
        let marks: Vec<(Pos, CellState)> = run.into_iter().map(|p| (p, symbol)).collect();
        let board = board_with(width, height, &marks);
        prop_assert_eq!(compute_winner(&board), Some(symbol));
    }

    #[test]
    fn run_one_short_does_not_win(
        width in 1..9usize,
        height in 1..9usize,
        line_pick in any::<usize>(),
        offset_pick in any::<usize>(),
        use_o in any::<bool>(),
    ) {
        let symbol = if use_o { CellState::MarkO } else { CellState::MarkX };
        let threshold = width.min(height);
        let run = run_on_line(width, height, line_pick, offset_pick, threshold - 1);
        let marks: Vec<(Pos, CellState)> = run.into_iter().map(|p| (p, symbol)).collect();
        let board = board_with(width, height, &marks);
        prop_assert_eq!(compute_winner(&board), None);
    }
}
