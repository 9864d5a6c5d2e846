//! Randomness isolated behind a replaceable source.
//!
//! The engine makes exactly one kind of draw: a uniform value in `[0, 1)`
//! when the player pushes deeper into the hedge maze. Production sessions
//! draw from the `rand` thread RNG; tests script the draws to hit every
//! probability band deterministically (see [`crate::testing::FixedChance`]).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws in `[0, 1)`.
pub trait ChanceSource {
    /// The next uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadChance;

impl ChanceSource for ThreadChance {
    fn unit(&mut self) -> f64 {
        rand::thread_rng().gen()
    }
}

/// A deterministically seeded source, for reproducible sessions.
#[derive(Debug, Clone)]
pub struct SeededChance(StdRng);

impl SeededChance {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl ChanceSource for SeededChance {
    fn unit(&mut self) -> f64 {
        self.0.gen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_chance_stays_in_unit_interval() {
        let mut chance = ThreadChance;
        for _ in 0..100 {
            let value = chance.unit();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_seeded_chance_is_reproducible() {
        let mut a = SeededChance::new(237);
        let mut b = SeededChance::new(237);
        for _ in 0..10 {
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = SeededChance::new(1);
        let mut b = SeededChance::new(2);
        let a_draws: Vec<f64> = (0..4).map(|_| a.unit()).collect();
        let b_draws: Vec<f64> = (0..4).map(|_| b.unit()).collect();
        assert_ne!(a_draws, b_draws);
    }
}
