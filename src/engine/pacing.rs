//! Pacing Strategy Implementation
//!
//! This module provides the pacing strategies used by the observable buffer.
//! A pacing strategy determines how long each elementary operation (comparison or
//! swap) is delayed so that a renderer can show the algorithm's progress.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Largest meaningful value of the delay dial and the distribution
pub const MAX_DIAL: u32 = 100;

/// Divisor of the exponential dial mapping
const DIAL_SCALE: f64 = 13.155;

/// Kind of elementary operation being paced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCost {
    /// A comparison (or any read-only inspection of values)
    Compare,
    /// A swap or a direct write
    Swap,
}

/// Strategy for pacing elementary operations
///
/// The buffer checks cancellation before asking the strategy for a delay and
/// performs the (interruptible) sleep itself, so implementations only compute
/// durations.
pub trait PacingStrategy: Send + Sync + Debug {
    /// Delay to apply for one operation of the given cost
    fn delay_for(&self, cost: OpCost) -> Duration;
}

/// Live-tunable pacing parameters shared between a run and its owner
///
/// `delay` is the dial (0 = fastest, 100 = slowest) and `distribution` shifts
/// time between comparisons (low values) and swaps (high values), with 50
/// meaning both pay the full delay.
#[derive(Debug)]
pub struct PacingControl {
    delay: AtomicU32,
    distribution: AtomicU32,
}

impl PacingControl {
    /// Create new pacing parameters
    pub fn new(delay: u32, distribution: u32) -> Self {
        Self {
            delay: AtomicU32::new(delay.min(MAX_DIAL)),
            distribution: AtomicU32::new(distribution.min(MAX_DIAL)),
        }
    }

    /// Current delay dial
    #[inline]
    pub fn delay(&self) -> u32 {
        self.delay.load(Ordering::Relaxed)
    }

    /// Update the delay dial, clamped to `MAX_DIAL`
    pub fn set_delay(&self, delay: u32) {
        self.delay.store(delay.min(MAX_DIAL), Ordering::Relaxed);
    }

    /// Current compare/swap distribution
    #[inline]
    pub fn distribution(&self) -> u32 {
        self.distribution.load(Ordering::Relaxed)
    }

    /// Update the compare/swap distribution, clamped to `MAX_DIAL`
    pub fn set_distribution(&self, distribution: u32) {
        self.distribution
            .store(distribution.min(MAX_DIAL), Ordering::Relaxed);
    }
}

impl Default for PacingControl {
    fn default() -> Self {
        Self::new(50, 50)
    }
}

/// Base delay in milliseconds for a dial position: `ceil(exp(dial / 13.155)) - 1`
pub fn base_delay_millis(dial: u32) -> f64 {
    ((f64::from(dial) / DIAL_SCALE).exp().ceil() - 1.0).max(0.0)
}

/// Share of the base delay paid by an operation under the given distribution
pub fn cost_factor(cost: OpCost, distribution: u32) -> f64 {
    let d = f64::from(distribution.min(MAX_DIAL));
    match cost {
        OpCost::Swap if distribution <= 50 => 1.0,
        OpCost::Swap => (100.0 - d) / d,
        OpCost::Compare if distribution >= 50 => 1.0,
        OpCost::Compare => d / (100.0 - d),
    }
}

/// Delay of one operation for a dial position and distribution
pub fn delay_for(dial: u32, distribution: u32, cost: OpCost) -> Duration {
    let millis = (cost_factor(cost, distribution) * base_delay_millis(dial)).round();
    Duration::from_millis(millis as u64)
}

/// Pacing driven by the live dial and distribution of a [`PacingControl`]
#[derive(Debug, Clone)]
pub struct DialPacing {
    control: Arc<PacingControl>,
}

impl DialPacing {
    /// Create a dial pacing strategy reading the given controls
    pub fn new(control: Arc<PacingControl>) -> Self {
        Self { control }
    }

    /// The shared controls read by this strategy
    pub fn control(&self) -> &Arc<PacingControl> {
        &self.control
    }
}

impl PacingStrategy for DialPacing {
    fn delay_for(&self, cost: OpCost) -> Duration {
        delay_for(self.control.delay(), self.control.distribution(), cost)
    }
}

/// Pacing with a constant delay per operation kind
#[derive(Debug, Clone, Copy)]
pub struct FixedPacing {
    compare: Duration,
    swap: Duration,
}

impl FixedPacing {
    /// Create a fixed pacing strategy with the same delay for both costs
    pub fn new(delay: Duration) -> Self {
        Self {
            compare: delay,
            swap: delay,
        }
    }

    /// Create a fixed pacing strategy with separate compare and swap delays
    pub fn new_with_costs(compare: Duration, swap: Duration) -> Self {
        Self { compare, swap }
    }
}

impl PacingStrategy for FixedPacing {
    fn delay_for(&self, cost: OpCost) -> Duration {
        match cost {
            OpCost::Compare => self.compare,
            OpCost::Swap => self.swap,
        }
    }
}

/// Pacing without any delay
///
/// Cancellation is still checked on every operation; use this for tests,
/// benchmarks and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl NoPacing {
    /// Create a new no-delay pacing strategy
    pub fn new() -> Self {
        Self
    }
}

impl PacingStrategy for NoPacing {
    fn delay_for(&self, _cost: OpCost) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_delay_curve() {
        assert_eq!(base_delay_millis(0), 0.0);
        // exp(13.155 / 13.155) = e, ceil = 3
        assert_eq!(base_delay_millis(13), 2.0);
        assert!(base_delay_millis(100) > 1_000.0);

        let mut previous = 0.0;
        for dial in 0..=MAX_DIAL {
            let millis = base_delay_millis(dial);
            assert!(millis >= previous);
            previous = millis;
        }
    }

    #[test]
    fn test_balanced_distribution_pays_full_cost() {
        assert_eq!(cost_factor(OpCost::Compare, 50), 1.0);
        assert_eq!(cost_factor(OpCost::Swap, 50), 1.0);
    }

    #[test]
    fn test_slow_swaps_make_comparisons_cheap() {
        assert_eq!(cost_factor(OpCost::Compare, 0), 0.0);
        assert_eq!(cost_factor(OpCost::Swap, 0), 1.0);
        assert!((cost_factor(OpCost::Compare, 25) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_slow_comparisons_make_swaps_cheap() {
        assert_eq!(cost_factor(OpCost::Swap, 100), 0.0);
        assert_eq!(cost_factor(OpCost::Compare, 100), 1.0);
        assert!((cost_factor(OpCost::Swap, 75) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_dial_pacing_follows_live_controls() {
        let control = Arc::new(PacingControl::new(0, 50));
        let pacing = DialPacing::new(Arc::clone(&control));
        assert_eq!(pacing.delay_for(OpCost::Swap), Duration::ZERO);

        control.set_delay(30);
        let expected = delay_for(30, 50, OpCost::Swap);
        assert_eq!(pacing.delay_for(OpCost::Swap), expected);
        assert!(expected > Duration::ZERO);

        control.set_distribution(100);
        assert_eq!(pacing.delay_for(OpCost::Swap), Duration::ZERO);
    }

    #[test]
    fn test_controls_are_clamped() {
        let control = PacingControl::new(250, 400);
        assert_eq!(control.delay(), MAX_DIAL);
        assert_eq!(control.distribution(), MAX_DIAL);
    }

    #[test]
    fn test_fixed_and_no_pacing() {
        let fixed = FixedPacing::new_with_costs(Duration::from_millis(1), Duration::from_millis(2));
        assert_eq!(fixed.delay_for(OpCost::Compare), Duration::from_millis(1));
        assert_eq!(fixed.delay_for(OpCost::Swap), Duration::from_millis(2));
        assert_eq!(NoPacing::new().delay_for(OpCost::Swap), Duration::ZERO);
    }
}
