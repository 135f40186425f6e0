//! Deterministic simulation RNG and count samplers.
//!
//! # Determinism strategy
//!
//! A run owns one root [`SimRng`] seeded from `SimConfig::seed`.  Independent
//! consumers (point sampling, charger availability) each get a child stream
//! derived with [`SimRng::child`], so adding draws to one consumer never
//! shifts the sequence another consumer sees.
//!
//! Charger occupancy is drawn through the [`CountSampler`] trait rather than
//! directly from the RNG so tests can script the exact draws the trip
//! simulator observes.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG.
///
/// Used only in single-threaded contexts.  Give each consumer its own child
/// stream via [`child`](Self::child).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── CountSampler ──────────────────────────────────────────────────────────────

/// Source of non-negative integer draws with a given mean.
///
/// The trip simulator draws "chargers in use" at a station through this
/// trait.  Production code uses [`PoissonSampler`]; tests substitute a
/// scripted sequence.
pub trait CountSampler {
    fn draw(&mut self, mean: f64) -> u32;
}

impl<S: CountSampler + ?Sized> CountSampler for &mut S {
    fn draw(&mut self, mean: f64) -> u32 {
        (**self).draw(mean)
    }
}

/// Poisson-distributed draws (Knuth's multiplication method).
///
/// Cost is O(mean) uniform draws per sample, which is negligible for the
/// single-digit means used for station occupancy.
pub struct PoissonSampler {
    rng: SimRng,
}

impl PoissonSampler {
    pub fn new(rng: SimRng) -> Self {
        Self { rng }
    }
}

impl CountSampler for PoissonSampler {
    fn draw(&mut self, mean: f64) -> u32 {
        if mean.is_nan() || mean <= 0.0 {
            return 0;
        }
        let limit = (-mean).exp();
        let mut k: u32 = 0;
        let mut p = self.rng.unit();
        while p > limit {
            k += 1;
            p *= self.rng.unit();
        }
        k
    }
}
