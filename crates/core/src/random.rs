//! Injectable random sources used by every generation phase.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// A source of uniform floats in `[0, 1)`.
///
/// Every helper is derived from [`RandomSource::next_f64`] so scripted sources
/// in tests drive the exact same decisions as the production generator.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }

    fn range_inclusive(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min <= max);
        let span = (max - min + 1) as f64;
        let offset = (self.next_f64() * span) as usize;
        min + offset.min(max - min)
    }

    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.range_inclusive(0, len - 1))
    }

    /// Index drawn proportionally to `weights`; non-positive weights never win.
    fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().filter(|&&w| w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }
        let mut roll = self.next_f64() * total;
        let mut last_positive = None;
        for (index, &weight) in weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            if roll < weight {
                return Some(index);
            }
            roll -= weight;
            last_positive = Some(index);
        }
        last_positive
    }

    fn shuffle(&mut self, items: &mut [usize]) {
        for i in (1..items.len()).rev() {
            let j = self.range_inclusive(0, i);
            items.swap(i, j);
        }
    }
}

/// Production source: one ChaCha8 stream per level build.
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }
}

/// Replays a fixed list of values, cycling when it runs out.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0.0);
        }
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_stream_is_reproducible_and_in_unit_range() {
        let mut a = SeededRandom::new(12_345);
        let mut b = SeededRandom::new(12_345);
        for _ in 0..200 {
            let value = a.next_f64();
            assert!((0.0..1.0).contains(&value));
            assert_eq!(value, b.next_f64());
        }
    }

    #[test]
    fn range_inclusive_reaches_both_ends() {
        let mut low = ScriptedRandom::constant(0.0);
        let mut high = ScriptedRandom::constant(0.999_999);
        assert_eq!(low.range_inclusive(2, 19), 2);
        assert_eq!(high.range_inclusive(2, 19), 19);
        assert_eq!(high.range_inclusive(4, 4), 4);
    }

    #[test]
    fn weighted_index_skips_zero_weights() {
        let weights = [0.0, 0.5, 0.0, 0.5];
        let mut rng = SeededRandom::new(7);
        for _ in 0..200 {
            let index = rng.weighted_index(&weights).expect("positive weights exist");
            assert!(index == 1 || index == 3);
        }
        assert_eq!(rng.weighted_index(&[0.0, 0.0]), None);
    }

    #[test]
    fn weighted_index_follows_cumulative_order() {
        let weights = [0.4, 0.4, 0.2];
        assert_eq!(ScriptedRandom::constant(0.1).weighted_index(&weights), Some(0));
        assert_eq!(ScriptedRandom::constant(0.5).weighted_index(&weights), Some(1));
        assert_eq!(ScriptedRandom::constant(0.95).weighted_index(&weights), Some(2));
    }

    #[test]
    fn shuffle_keeps_every_item() {
        let mut items = [0, 1, 2, 3, 4, 5];
        SeededRandom::new(3).shuffle(&mut items);
        let mut sorted = items;
        sorted.sort_unstable();
        assert_eq!(sorted, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn scripted_values_cycle() {
        let mut rng = ScriptedRandom::new(vec![0.25, 0.75]);
        assert_eq!(rng.next_f64(), 0.25);
        assert_eq!(rng.next_f64(), 0.75);
        assert_eq!(rng.next_f64(), 0.25);
    }
}
