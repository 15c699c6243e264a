//! Seeded placement randomness.
//!
//! Shape placement, sizes, palette picks and opacities come from this
//! xorshift64 stream. It is kept apart from the noise field: the field is a
//! pure function of coordinates, this is a sequential stream consumed in a
//! fixed order by each generator.

use serde::{Deserialize, Serialize};

/// Xorshift64 generator with shifts (13, 7, 17).
///
/// Seed 0 is a fixed point of xorshift and is replaced by a non-zero
/// fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Seeds the generator. A zero seed is replaced by a fixed non-zero
    /// constant, since xorshift never leaves the zero state.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state with the 13/7/17 shift triple.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform in [0, 1) from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [min, max). Returns `min` when the range is empty.
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform integer in [min, max], both ends included. Returns `min`
    /// when `max < min`.
    pub fn next_int_inclusive(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        let span = (max - min) as u64 + 1;
        min + (self.next_u64() % span) as usize
    }

    /// Picks one element uniformly, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = (self.next_u64() % items.len() as u64) as usize;
        items.get(idx)
    }
}
