use alloc::collections::BTreeSet;
use smallvec::SmallVec;

use crate::*;
pub use random::*;

mod random;

/// Source of every random draw a puzzle makes.
///
/// Production code hands in a seeded [`rand::rngs::SmallRng`], tests use [`ScriptedRandom`] to pin targets down.
pub trait RandomSource {
    /// Uniform draw from `0..bound`, `bound` is never zero.
    fn below(&mut self, bound: usize) -> usize;

    /// Uniform permutation of `items` in place.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

pub type SequenceTarget = SmallVec<[SequenceToken; SEQUENCE_LEN]>;

/// Tokens drawn independently, repeats allowed.
pub fn sequence_target<R: RandomSource>(rng: &mut R) -> SequenceTarget {
    (0..SEQUENCE_LEN)
        .map(|_| SequenceToken::ALL[rng.below(SequenceToken::ALL.len())])
        .collect()
}

/// Distinct grid cells, redrawing any cell that was already picked.
pub fn recall_targets<R: RandomSource>(rng: &mut R) -> BTreeSet<CellIndex> {
    let mut targets = BTreeSet::new();
    let mut rejected = 0usize;
    while targets.len() < RECALL_TARGETS {
        let cell = rng.below(RECALL_GRID_CELLS.into()) as CellIndex;
        if !targets.insert(cell) {
            rejected += 1;
        }
    }
    log::trace!("recall targets {:?}, {} draws rejected", targets, rejected);
    targets
}

/// First colors of a shuffled palette, so a secret never repeats a color.
pub fn code_secret<R: RandomSource>(rng: &mut R) -> [CodeColor; CODE_LEN] {
    let mut palette = CodeColor::ALL;
    rng.shuffle(&mut palette);
    [palette[0], palette[1], palette[2], palette[3]]
}

/// Numbers `1..=NUMBER_COUNT` in a random layout.
pub fn number_layout<R: RandomSource>(rng: &mut R) -> [u8; NUMBER_COUNT as usize] {
    let mut layout: [u8; NUMBER_COUNT as usize] = core::array::from_fn(|i| i as u8 + 1);
    rng.shuffle(&mut layout);
    layout
}

/// Numbers `1..=SORT_LEN` in a random order, may come out already sorted.
pub fn sort_order<R: RandomSource>(rng: &mut R) -> [u8; SORT_LEN] {
    let mut order: [u8; SORT_LEN] = core::array::from_fn(|i| i as u8 + 1);
    rng.shuffle(&mut order);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rand::prelude::*;

    #[test]
    fn every_sequence_target_has_four_known_tokens() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let target = sequence_target(&mut rng);
            assert_eq!(target.len(), SEQUENCE_LEN);
            assert!(target.iter().all(|token| SequenceToken::ALL.contains(token)));
        }
    }

    #[test]
    fn every_recall_target_set_has_five_distinct_cells_on_the_grid() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..200 {
            let targets = recall_targets(&mut rng);
            assert_eq!(targets.len(), RECALL_TARGETS);
            assert!(targets.iter().all(|&cell| cell < RECALL_GRID_CELLS));
        }
    }

    #[test]
    fn recall_targets_redraw_repeated_cells() {
        let mut rng = ScriptedRandom::new([3, 3, 3, 9, 3, 0, 9, 15, 1]);

        let targets = recall_targets(&mut rng);

        assert_eq!(targets.into_iter().collect::<Vec<_>>(), [0, 1, 3, 9, 15]);
    }

    #[test]
    fn every_code_secret_has_four_distinct_colors() {
        let mut rng = SmallRng::seed_from_u64(13);
        for _ in 0..200 {
            let secret = code_secret(&mut rng);
            let distinct: BTreeSet<_> = secret.iter().collect();
            assert_eq!(distinct.len(), CODE_LEN);
        }
    }

    #[test]
    fn layouts_are_permutations() {
        let mut rng = SmallRng::seed_from_u64(17);
        let mut layout = number_layout(&mut rng);
        layout.sort_unstable();
        assert_eq!(layout, [1, 2, 3, 4, 5, 6, 7, 8, 9]);

        let mut order = sort_order(&mut rng);
        order.sort_unstable();
        assert_eq!(order, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let mut a = SmallRng::seed_from_u64(99);
        let mut b = SmallRng::seed_from_u64(99);

        assert_eq!(code_secret(&mut a), code_secret(&mut b));
        assert_eq!(sequence_target(&mut a), sequence_target(&mut b));
    }
}
