//! Bounded integer draws over an injectable uniform sample stream.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Source of uniform samples in `[0, 1)`.
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;
}

impl UnitSource for ChaCha8Rng {
    fn next_unit(&mut self) -> f64 {
        // 53 high bits fill an f64 mantissa exactly.
        (self.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }
}

/// Replays a fixed cycle of samples. Values are clamped into `[0, 1)`.
#[derive(Clone, Debug)]
pub struct SequenceSource {
    samples: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples, cursor: 0 }
    }
}

impl UnitSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        let Some(&sample) = self.samples.get(self.cursor % self.samples.len().max(1)) else {
            return 0.0;
        };
        self.cursor += 1;
        sample.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[derive(Clone, Debug)]
pub struct BoundedRandom<S = ChaCha8Rng> {
    source: S,
}

impl BoundedRandom<ChaCha8Rng> {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl<S: UnitSource> BoundedRandom<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Integer in `[min, max]`.
    ///
    /// Scales one sample over the range width and rounds half up, so the two
    /// endpoints carry half the weight of each interior value.
    pub fn next(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min <= max);
        let span = max.saturating_sub(min) as f64;
        let drawn = (span * self.source.next_unit() + min as f64 + 0.5) as usize;
        drawn.clamp(min, max.max(min))
    }

    /// Odd integer in `[min, max]`.
    ///
    /// An even draw moves up by one unless that passes `max`, then down by one.
    /// A range holding no odd value (`min == max`, even) yields `max - 1`, or 1
    /// when the bound is 0.
    pub fn next_odd(&mut self, min: usize, max: usize) -> usize {
        let drawn = self.next(min, max);
        if drawn % 2 == 1 {
            drawn
        } else if drawn < max {
            drawn + 1
        } else if drawn == 0 {
            1
        } else {
            drawn - 1
        }
    }

    /// Uniform index in `[0, len)`; `len` must be non-zero.
    pub fn choose_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let index = (self.source.next_unit() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }
}
