//! Random source used by every roll in the engine.
//!
//! Any `rand::Rng` is a `Dice`; tests script draws with their own implementation.

use rand::Rng;

/// Uniform random draws
pub trait Dice {
    /// Uniform integer in `lo..=hi`. Returns `lo` when the range is empty.
    fn range(&mut self, lo: i32, hi: i32) -> i32;

    /// Uniform float in `[0, 1)`
    fn unit(&mut self) -> f64;

    /// Bernoulli trial with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform index into a collection of `len` elements (`len > 0`)
    fn index(&mut self, len: usize) -> usize {
        let last = len.saturating_sub(1).min(i32::MAX as usize) as i32;
        self.range(0, last) as usize
    }
}

impl<R: Rng + ?Sized> Dice for R {
    fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            lo
        } else {
            self.gen_range(lo..=hi)
        }
    }

    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}
