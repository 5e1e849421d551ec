//! # Duration Sources
//!
//! `process` asks a [`DurationSource`] how long the next unit of work runs.
//! Production code draws from a random generator; tests replay a script.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::server::error::{Result, ServerError};

/// Producer of process durations.
pub trait DurationSource {
    /// Next duration, uniformly in `[0, max)`. Returns 0 when `max` is 0.
    fn next_duration(&mut self, max: u64) -> u64;
}

impl<D: DurationSource + ?Sized> DurationSource for Box<D> {
    fn next_duration(&mut self, max: u64) -> u64 {
        (**self).next_duration(max)
    }
}

/// Random durations backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct RandomDurations {
    rng: StdRng,
}

impl RandomDurations {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDurations {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl DurationSource for RandomDurations {
    fn next_duration(&mut self, max: u64) -> u64 {
        if max == 0 {
            return 0;
        }
        self.rng.gen_range(0..max)
    }
}

/// Replays a fixed list of durations, wrapping around at the end.
///
/// Values are reduced modulo `max` so the `[0, max)` contract holds for any
/// script.
#[derive(Debug, Clone)]
pub struct ScriptedDurations {
    values: Vec<u64>,
    cursor: usize,
}

impl ScriptedDurations {
    pub fn new(values: Vec<u64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Script whose values must all lie in `[0, max)`; nothing gets reduced.
    pub fn within(values: Vec<u64>, max: u64) -> Result<Self> {
        if let Some(bad) = values.iter().find(|v| **v >= max) {
            return Err(ServerError::InvalidConfig(format!(
                "scripted duration {} is outside [0, {})",
                bad, max
            )));
        }
        Ok(Self::new(values))
    }
}

impl DurationSource for ScriptedDurations {
    fn next_duration(&mut self, max: u64) -> u64 {
        if max == 0 || self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % max
    }
}
