use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;

/// Uniform source of randomness for game creation and draws.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    fn coin_flip(&mut self) -> bool {
        self.next_unit() < 0.5
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        let index = (self.next_unit() * len as f64) as usize;
        index.min(len - 1)
    }
}

/// Default source backed by a seeded small RNG.
#[derive(Clone, Debug)]
pub struct SeededSource {
    seed: u64,
    rng: SmallRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of values, wrapping around once exhausted.
///
/// Values below `0.5` count as heads for [`RandomSource::coin_flip`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub const HEADS: f64 = 0.25;
    pub const TAILS: f64 = 0.75;

    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let mut values: Vec<f64> = values
            .into_iter()
            .map(|value| value.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        if values.is_empty() {
            values.push(0.0);
        }
        Self { values, cursor: 0 }
    }

    pub fn coin_flips(flips: &[bool]) -> Self {
        Self::new(
            flips
                .iter()
                .map(|&heads| if heads { Self::HEADS } else { Self::TAILS }),
        )
    }

    /// How many values have been consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
