use alloc::collections::VecDeque;
use rand::rngs::SmallRng;

use super::*;

impl RandomSource for SmallRng {
    fn below(&mut self, bound: usize) -> usize {
        use rand::prelude::*;
        self.random_range(0..bound)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        use rand::seq::SliceRandom;
        items.shuffle(self);
    }
}

/// Deterministic source that replays a fixed script of draws.
///
/// Each draw takes the next scripted value modulo the requested bound. Once the script runs out it keeps counting
/// upwards from zero, so rejection sampling still terminates. Shuffles leave the slice untouched, which makes
/// generated layouts and secrets equal to their canonical order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptedRandom {
    script: VecDeque<usize>,
    fallback: usize,
}

impl ScriptedRandom {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: 0,
        }
    }

    /// Appends more draws to the end of the script.
    pub fn extend(&mut self, script: impl IntoIterator<Item = usize>) {
        self.script.extend(script);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, bound: usize) -> usize {
        let value = self.script.pop_front().unwrap_or_else(|| {
            let value = self.fallback;
            self.fallback += 1;
            value
        });
        value % bound
    }

    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn scripted_draws_wrap_to_bound_then_count_up() {
        let mut rng = ScriptedRandom::new([5, 2]);

        assert_eq!(rng.below(4), 1);
        assert_eq!(rng.below(4), 2);
        assert_eq!(rng.remaining(), 0);
        assert_eq!(rng.below(4), 0);
        assert_eq!(rng.below(4), 1);
    }

    #[test]
    fn scripted_shuffle_keeps_order() {
        let mut rng = ScriptedRandom::default();
        let mut items = [1, 2, 3];

        rng.shuffle(&mut items);

        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    fn small_rng_draws_stay_in_bounds() {
        let mut rng = SmallRng::seed_from_u64(3);
        for bound in 1..40 {
            assert!(rng.below(bound) < bound);
        }
    }
}
