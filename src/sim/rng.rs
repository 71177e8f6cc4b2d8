//! Random sources for the simulation
//!
//! Serve angles and opponent aiming error are the only random inputs. Both draw
//! through `RandomSource` so a match can be seeded for play or scripted in tests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Capability supplying uniform samples to the simulation
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`
    fn next_unit(&mut self) -> f32;

    /// Fair coin
    fn next_bool(&mut self) -> bool {
        self.next_unit() < 0.5
    }
}

/// Seeded PCG generator used for real matches
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for GameRng {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn next_bool(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

/// Replays a fixed sequence of unit samples, wrapping around at the end.
///
/// `next_bool` maps samples below 0.5 to `true`.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Samples are clamped into `[0, 1)`. An empty script behaves like `[0.0]`.
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let mut values: Vec<f32> = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        if values.is_empty() {
            values.push(0.0);
        }
        Self { values, cursor: 0 }
    }

    /// How many samples have been drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
