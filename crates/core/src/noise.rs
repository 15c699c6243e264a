//! Smooth 2D value noise.
//!
//! Pseudo-random values from [`crate::hash`] are pinned to the integer
//! lattice and blended with a quintic fade, giving a field that is
//! continuous everywhere with zero first and second derivatives of the
//! weights at lattice lines.

use crate::field::ScalarField;
use crate::hash;

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Linear interpolation from `a` to `b` by `t`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Samples value noise at `(x, y)` for `seed`. Returns a value in `[0, 1)`.
pub fn value_noise(x: f64, y: f64, seed: u64) -> f64 {
    let xf = x.floor();
    let yf = y.floor();
    let x0 = xf as i64;
    let y0 = yf as i64;
    let x1 = x0.wrapping_add(1);
    let y1 = y0.wrapping_add(1);

    let sx = fade(x - xf);
    let sy = fade(y - yf);

    let n00 = hash::unit(x0, y0, seed);
    let n10 = hash::unit(x1, y0, seed);
    let n01 = hash::unit(x0, y1, seed);
    let n11 = hash::unit(x1, y1, seed);

    let ix0 = lerp(n00, n10, sx);
    let ix1 = lerp(n01, n11, sx);
    lerp(ix0, ix1, sy)
}

/// Single-layer value noise bound to one seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueNoise {
    seed: u64,
}

impl ValueNoise {
    /// Binds the lattice to `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Returns the lattice seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl ScalarField for ValueNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        value_noise(x, y, self.seed)
    }
}
