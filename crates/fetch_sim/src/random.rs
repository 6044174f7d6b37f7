//! Random draws used by a fetch run, behind a trait so tests can script them.

use std::{ops::RangeInclusive, time::Duration};

use rand::{rngs::StdRng, Rng, SeedableRng};

pub trait RandomSource: Send {
    /// Uniform integer in `pages`, inclusive.
    fn page_number(&mut self, pages: RangeInclusive<u32>) -> u32;
    /// Uniform duration in `[min, max]`.
    fn stage_delay(&mut self, min: Duration, max: Duration) -> Duration;
    /// Uniform position in `0..len`.
    fn quote_index(&mut self, len: usize) -> usize;
}

pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn page_number(&mut self, pages: RangeInclusive<u32>) -> u32 {
        if pages.is_empty() {
            return *pages.start();
        }
        self.rng.gen_range(pages)
    }

    fn stage_delay(&mut self, min: Duration, max: Duration) -> Duration {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        let nanos = self
            .rng
            .gen_range(low.as_nanos() as u64..=high.as_nanos() as u64);
        Duration::from_nanos(nanos)
    }

    fn quote_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

#[cfg(test)]
#[path = "tests/random_tests.rs"]
mod tests;
