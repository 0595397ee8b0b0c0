use crate::common::Pos;
use alloc::collections::BTreeSet;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Interface implemented by computer opponents.
pub trait Opponent {
    /// Choose the cell for the next `O` mark. `empty_cells` is never empty
    /// when called by the engine; returning `None` means the opponent gives
    /// up the move.
    fn select_cell(&mut self, empty_cells: &BTreeSet<Pos>) -> Option<Pos>;
}

impl<O: Opponent + ?Sized> Opponent for &mut O {
    fn select_cell(&mut self, empty_cells: &BTreeSet<Pos>) -> Option<Pos> {
        (**self).select_cell(empty_cells)
    }
}

/// Opponent picking uniformly at random among the empty cells.
#[derive(Debug, Clone)]
pub struct RandomOpponent<R: Rng = SmallRng> {
    rng: R,
}

impl<R: Rng> RandomOpponent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomOpponent<SmallRng> {
    /// Reproducible opponent for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        let mut seed_rng = rand::rng();
        Self::new(SmallRng::from_rng(&mut seed_rng))
    }
}

impl<R: Rng> Opponent for RandomOpponent<R> {
    fn select_cell(&mut self, empty_cells: &BTreeSet<Pos>) -> Option<Pos> {
        if empty_cells.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..empty_cells.len());
        empty_cells.iter().nth(idx).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_only_empty_cells() {
        let mut opponent = RandomOpponent::seeded(7);
        let empty: BTreeSet<Pos> = [(0, 1), (2, 2), (1, 0)].into_iter().collect();
        for _ in 0..50 {
            let pick = opponent.select_cell(&empty).unwrap();
            assert!(empty.contains(&pick));
        }
    }

    #[test]
    fn no_cells_no_pick() {
        let mut opponent = RandomOpponent::seeded(7);
        assert_eq!(opponent.select_cell(&BTreeSet::new()), None);
    }

    #[test]
    fn same_seed_same_choices() {
        let empty: BTreeSet<Pos> = (0..4).flat_map(|r| (0..4).map(move |c| (r, c))).collect();
        let mut a = RandomOpponent::seeded(99);
        let mut b = RandomOpponent::seeded(99);
        for _ in 0..20 {
            assert_eq!(a.select_cell(&empty), b.select_cell(&empty));
        }
    }
}
