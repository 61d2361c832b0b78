// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ring Diffusion Simulation Suite - Value Samplers

use rand::Rng;

use crate::config::ValueRange;

/// Source of initial loads and activity intervals.
///
/// Production runs draw uniformly from a [`ValueRange`]; tests plug in
/// deterministic samplers to pin the initial distribution.
pub trait Sampler {
    fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u64;
}

/// Uniform draw over an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformRange {
    pub min: u64,
    pub max: u64,
}

impl From<ValueRange> for UniformRange {
    fn from(range: ValueRange) -> Self {
        Self { min: range.min, max: range.max }
    }
}

impl Sampler for UniformRange {
    fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u64 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Always returns the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixed(pub u64);

impl Sampler for Fixed {
    fn sample<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> u64 {
        self.0
    }
}

/// Replays a fixed sequence, wrapping around at the end.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    values: Vec<u64>,
    cursor: usize,
}

#[cfg(test)]
impl Cycle {
    /// Panics on an empty sequence.
    pub fn new(values: Vec<u64>) -> Self {
        assert!(!values.is_empty(), "Cycle sampler needs at least one value");
        Self { values, cursor: 0 }
    }
}

#[cfg(test)]
impl Sampler for Cycle {
    fn sample<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> u64 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn uniform_stays_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut sampler = UniformRange { min: 100, max: 1000 };
        let mut seen_min = u64::MAX;
        let mut seen_max = 0;
        for _ in 0..10_000 {
            let v = sampler.sample(&mut rng);
            assert!((100..=1000).contains(&v), "draw {} out of range", v);
            seen_min = seen_min.min(v);
            seen_max = seen_max.max(v);
        }
        // Inclusive range: both ends are reachable.
        assert!(seen_min < 110 && seen_max > 990);
    }

    #[test]
    fn degenerate_range_is_constant() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut sampler = UniformRange { min: 7, max: 7 };
        assert!((0..100).all(|_| sampler.sample(&mut rng) == 7));
    }

    #[test]
    fn cycle_wraps() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut sampler = Cycle::new(vec![3, 5]);
        let drawn: Vec<u64> = (0..5).map(|_| sampler.sample(&mut rng)).collect();
        assert_eq!(drawn, vec![3, 5, 3, 5, 3]);
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        let mut sampler = UniformRange { min: 10, max: 1000 };
        for _ in 0..100 {
            assert_eq!(sampler.sample(&mut a), sampler.sample(&mut b));
        }
    }
}
