//! Random source shared by every step of a render.
//!
//! A [`Random`] is owned by a single render (or by the caller driving several
//! renders in sequence), so no synchronisation is ever needed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct Random {
    rng: StdRng
}

impl Random {
    /// Seed a new source from the operating system
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Seed a new source with a fixed value, two sources built from the same
    /// seed produce the same stream
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Return a number in the closed range `[from, to]`.
    ///
    /// An empty range collapses to `from`.
    pub fn rnd(&mut self, from: i32, to: i32) -> i32 {
        if to <= from {
            return from;
        }
        self.rng.gen_range(from..=to)
    }

    /// Return a float in `[0, 1)`
    pub fn float(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::from_entropy()
    }
}
