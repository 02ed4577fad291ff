//! Bogosort

use crate::engine::{ObservableBuffer, Result, Sorter};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

/// Bogosort: shuffle until sorted
///
/// Expected running time is factorial in the input length; only usable on a
/// handful of values.
#[derive(Debug, Clone)]
pub struct BogoSort {
    rng: SmallRng,
}

impl Default for BogoSort {
    fn default() -> Self {
        Self::new()
    }
}

impl BogoSort {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn is_sorted(buffer: &ObservableBuffer) -> Result<bool> {
        let n = buffer.len();
        buffer.push_range(0, n);
        let mut sorted = true;
        for i in 1..n {
            buffer.modify_range(0, i, n)?;
            buffer.set_special(Some(i));
            if buffer.compare(i - 1, i)? == Ordering::Greater {
                sorted = false;
                break;
            }
        }
        buffer.pop_range()?;
        buffer.set_special(None);
        Ok(sorted)
    }

    /// Fisher-Yates shuffle
    fn shuffle(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        buffer.push_range(0, 0);
        for i in 1..buffer.len() {
            buffer.modify_range(0, 0, i)?;
            buffer.set_special(Some(i));
            let j = self.rng.random_range(0..=i);
            buffer.swap(i, j)?;
        }
        buffer.pop_range()?;
        buffer.set_special(None);
        Ok(())
    }
}

impl Sorter for BogoSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        while !Self::is_sorted(buffer)? {
            self.shuffle(buffer)?;
        }
        Ok(())
    }
}
