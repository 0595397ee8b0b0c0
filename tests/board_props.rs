use std::collections::BTreeSet;

use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use tictactoe::{Board, BoardError, CellState, Pos};

fn random_board(seed: u64, width: usize, height: usize) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(width, height).unwrap();
    let marks = rng.random_range(0..=width * height);
    for _ in 0..marks {
        let pos = (rng.random_range(0..height), rng.random_range(0..width));
        let symbol = if rng.random_bool(0.5) {
            CellState::MarkX
        } else {
            CellState::MarkO
        };
        let _ = board.set_symbol(pos, symbol);
    }
    board
}

fn empty_from_grid(board: &Board) -> BTreeSet<Pos> {
    (0..board.height())
        .flat_map(|r| (0..board.width()).map(move |c| (r, c)))
        .filter(|&pos| board.get(pos) == CellState::Empty)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn win_threshold_is_smaller_dimension(width in 1..50usize, height in 1..50usize) {
        let board = Board::new(width, height).unwrap();
        prop_assert_eq!(board.win_threshold(), width.min(height));
    }

    #[test]
    fn empty_set_tracks_grid(seed in any::<u64>(), width in 1..8usize, height in 1..8usize) {
        let mut board = random_board(seed, width, height);
        prop_assert_eq!(board.empty_cells(), &empty_from_grid(&board));
        board.clear();
        prop_assert_eq!(board.empty_cells().len(), width * height);
    }

    #[test]
    fn occupied_cell_rejected(seed in any::<u64>(), width in 1..8usize, height in 1..8usize) {
        let mut board = random_board(seed, width, height);
        let occupied: Vec<Pos> = (0..height)
            .flat_map(|r| (0..width).map(move |c| (r, c)))
            .filter(|&pos| !board.is_empty(pos))
            .collect();
        for pos in occupied {
            let before = board.clone();
            prop_assert_eq!(
                board.set_symbol(pos, CellState::MarkO),
                Err(BoardError::CellOccupied(pos))
            );
            prop_assert_eq!(&board, &before);
        }
    }
}
