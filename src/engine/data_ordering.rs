//! Test Data Generation
//!
//! This module provides `DataOrdering`, the named patterns initial arrays are
//! generated from. Every pattern fills an array with values in `0..max`; the
//! randomized ones draw from the caller's random number generator so that a
//! seeded generator reproduces the same data.

use crate::engine::{EngineError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Shape of generated test data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrdering {
    /// Uniformly random values
    #[default]
    Random,
    /// Uniformly random multiples of eight
    RandomDuplicates,
    /// Ascending values with 5% of them (at least five) swapped at random
    AlmostSorted,
    Ascending,
    Descending,
    /// Descending first half, ascending second half
    Valley,
    /// Ascending first half, descending second half
    Hill,
    /// Alternating ascending and descending segments
    SawTeeth,
    /// Three periods of a slightly jittered sine wave
    SineWave,
    /// One random value repeated
    OnlySame,
}

/// `round(i / n * max)`, capped below `max`
fn scaled(i: usize, n: usize, max: i32) -> i32 {
    let value = (i as f64 / n as f64 * f64::from(max)).round() as i32;
    value.min(max - 1)
}

impl DataOrdering {
    /// All orderings in menu order
    pub const ALL: [DataOrdering; 10] = [
        DataOrdering::Random,
        DataOrdering::RandomDuplicates,
        DataOrdering::AlmostSorted,
        DataOrdering::Ascending,
        DataOrdering::Descending,
        DataOrdering::Valley,
        DataOrdering::Hill,
        DataOrdering::SawTeeth,
        DataOrdering::SineWave,
        DataOrdering::OnlySame,
    ];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            DataOrdering::Random => "Random Order",
            DataOrdering::RandomDuplicates => "Random Order (many duplicates)",
            DataOrdering::AlmostSorted => "Almost Sorted",
            DataOrdering::Ascending => "Ascending Order",
            DataOrdering::Descending => "Descending Order",
            DataOrdering::Valley => "Valley",
            DataOrdering::Hill => "Hill",
            DataOrdering::SawTeeth => "Saw Teeth",
            DataOrdering::SineWave => "Sine Wave",
            DataOrdering::OnlySame => "Random Only Same",
        }
    }

    /// Snake case identifier, as used in configuration files
    pub fn identifier(&self) -> &'static str {
        match self {
            DataOrdering::Random => "random",
            DataOrdering::RandomDuplicates => "random_duplicates",
            DataOrdering::AlmostSorted => "almost_sorted",
            DataOrdering::Ascending => "ascending",
            DataOrdering::Descending => "descending",
            DataOrdering::Valley => "valley",
            DataOrdering::Hill => "hill",
            DataOrdering::SawTeeth => "saw_teeth",
            DataOrdering::SineWave => "sine_wave",
            DataOrdering::OnlySame => "only_same",
        }
    }

    /// Fill `values` according to this ordering
    ///
    /// # Arguments
    /// * `values` - The array to overwrite
    /// * `max` - Exclusive upper bound of the values, must be positive
    /// * `rng` - Random source for the randomized orderings
    pub fn fill<R: Rng + ?Sized>(&self, values: &mut [i32], max: i32, rng: &mut R) {
        let n = values.len();
        if n == 0 {
            return;
        }
        match self {
            DataOrdering::Random => values.iter_mut().for_each(|v| *v = rng.random_range(0..max)),
            DataOrdering::RandomDuplicates => {
                values.iter_mut().for_each(|v| *v = rng.random_range(0..max) & !0x7)
            }
            DataOrdering::AlmostSorted => {
                DataOrdering::Ascending.fill(values, max, rng);
                if n < 2 {
                    return;
                }
                for _ in 0..(n / 20).max(5) {
                    let a = rng.random_range(0..n);
                    let b = rng.random_range(0..n - 1);
                    let b = if b < a { b } else { b + 1 };
                    values.swap(a, b);
                }
            }
            DataOrdering::Ascending => {
                for (i, v) in values.iter_mut().enumerate() {
                    *v = scaled(i, n, max);
                }
            }
            DataOrdering::Descending => {
                for i in 0..n {
                    values[n - 1 - i] = scaled(i, n, max);
                }
            }
            DataOrdering::Valley => {
                let k = n / 2;
                for i in 0..k {
                    let value = scaled(k - 1 - i, k, max);
                    values[i] = value;
                    values[n - 1 - i] = value;
                }
                if n % 2 == 1 {
                    values[k] = 0;
                }
            }
            DataOrdering::Hill => {
                let k = (n + 1) / 2;
                for i in 0..k {
                    let value = scaled(i, k, max);
                    values[i] = value;
                    values[n - 1 - i] = value;
                }
            }
            DataOrdering::SawTeeth => {
                let teeth = (n / 3).clamp(1, 7);
                let min_size = n / teeth;
                let longer = n % teeth;
                for i in 0..n {
                    let value = scaled(i, n, max);
                    let tooth = i % teeth;
                    let pos = i / teeth;
                    let offset = tooth * min_size + tooth.min(longer);
                    if pos % 2 == 0 {
                        values[offset + pos / 2] = value;
                    } else {
                        let size = if tooth < longer { min_size + 1 } else { min_size };
                        values[offset + size - 1 - pos / 2] = value;
                    }
                }
            }
            DataOrdering::SineWave => {
                for (i, v) in values.iter_mut().enumerate() {
                    let jitter = 0.6 * (rng.random::<f64>() - 0.5);
                    let x = 6.0 * PI * (i as f64 + jitter) / n as f64;
                    let scaled_sin = (x.sin() + 1.0) * f64::from(max) / 2.0;
                    *v = (scaled_sin as i32).clamp(0, max - 1);
                }
            }
            DataOrdering::OnlySame => {
                let value = rng.random_range(0..max);
                values.fill(value);
            }
        }
    }

    /// Generate `count` values in `0..upper_bound`
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInput` if `count` is zero or `upper_bound`
    /// is not positive
    pub fn generate<R: Rng + ?Sized>(
        &self,
        count: usize,
        upper_bound: i32,
        rng: &mut R,
    ) -> Result<Vec<i32>> {
        if count == 0 {
            return Err(EngineError::InvalidInput(
                "cannot generate an empty array".into(),
            ));
        }
        if upper_bound <= 0 {
            return Err(EngineError::InvalidInput(format!(
                "upper bound must be positive, got {upper_bound}"
            )));
        }
        let mut values = vec![0; count];
        self.fill(&mut values, upper_bound, rng);
        Ok(values)
    }
}

impl std::fmt::Display for DataOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DataOrdering {
    type Err = String;

    /// Parse an ordering from its identifier or its display name, ignoring case
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        DataOrdering::ALL
            .into_iter()
            .find(|ordering| {
                ordering.identifier() == wanted || ordering.name().to_lowercase() == wanted
            })
            .ok_or_else(|| format!("Unknown data ordering: '{s}'"))
    }
}
