//! Uniform random sources driving the augmentation draws.
//!
//! Every pipeline owns its own source. Sharing one generator between loader
//! workers would make samples depend on thread scheduling.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A generator of independent uniform floats in `[0, 1)`.
pub trait RandomSource {
    /// Draw the next value in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Draw a value in `[low, high)`.
    ///
    /// Exactly one value is consumed, even when `low == high`. A draw that
    /// rounds up to `high` is moved to the float just below it.
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        let value = low + (high - low) * self.next_f32();
        if value >= high && high > low {
            float_below(high)
        } else {
            value
        }
    }

    /// Draw a value in `[-high, high)`.
    fn uniform_zero_centered(&mut self, high: f32) -> f32 {
        self.uniform(-high, high)
    }

    /// Draw `true` with probability `p`.
    fn bernoulli(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}

/// The largest finite `f32` smaller than `x`.
fn float_below(x: f32) -> f32 {
    if x == 0.0 {
        -f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }
}

/// A seeded [`StdRng`] wrapper.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a reproducible source from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded once from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed sequence of draws, cycling when it runs out.
///
/// # Examples
///
/// ```
/// use augmenta_transforms::random::{RandomSource, ReplayRandom};
///
/// let mut rng = ReplayRandom::new(vec![0.25, 0.5]);
/// assert_eq!(rng.uniform(0.0, 4.0), 1.0);
/// assert_eq!(rng.next_f32(), 0.5);
/// assert_eq!(rng.next_f32(), 0.25);
/// assert_eq!(rng.draws_consumed(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayRandom {
    draws: Vec<f32>,
    consumed: usize,
}

impl ReplayRandom {
    /// Create a source replaying `draws`; an empty sequence always yields `0.0`.
    pub fn new(draws: Vec<f32>) -> Self {
        Self { draws, consumed: 0 }
    }

    /// Number of values drawn so far.
    pub fn draws_consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ReplayRandom {
    fn next_f32(&mut self) -> f32 {
        let value = if self.draws.is_empty() {
            0.0
        } else {
            self.draws[self.consumed % self.draws.len()]
        };
        self.consumed += 1;
        value
    }
}
