//! Run-time knobs for a pool.

use std::ops::RangeInclusive;

/// Configuration of a worker pool run.
///
/// Quotas and pauses are drawn from inclusive ranges so tests can pin them
/// down (`lo..=lo`) while demos keep the original randomized feel. A fixed
/// `seed` makes a whole run reproducible.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of workers created at startup.
    pub workers: usize,
    /// Increment of the first worker's counter per unit of work.
    pub first_increment: u64,
    /// Each subsequent worker's increment is scaled by this factor,
    /// so the per-worker counters stay visually distinguishable.
    pub increment_multiplier: u64,
    /// Bounds of the per-worker unit quota, drawn once at creation.
    pub quota: RangeInclusive<u32>,
    /// Bounds of the simulated per-unit work duration, in milliseconds.
    pub pause: RangeInclusive<u64>,
    /// Seed for the master RNG; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: 3,
            first_increment: 1,
            increment_multiplier: 10,
            quota: 10..=20,
            pause: 0..=99,
            seed: None,
        }
    }
}
