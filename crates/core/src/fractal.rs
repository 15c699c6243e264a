//! Fractal Brownian motion over [`value_noise`].
//!
//! Octave `o` samples at frequency `lacunarity^o` with amplitude `gain^o`
//! and its own seed `seed + 1013 * o`, so fine octaves are not rescaled
//! copies of the base lattice. The sum is divided by the total amplitude,
//! keeping the result in `[0, 1]` for any non-negative gain.

use crate::error::EngineError;
use crate::field::ScalarField;
use crate::noise::value_noise;
use serde::{Deserialize, Serialize};

/// Seed stride between successive octaves.
pub const OCTAVE_SEED_STRIDE: u64 = 1013;

/// Lower bound for the amplitude sum before division.
const NORM_EPSILON: f64 = 1e-9;

const DEFAULT_OCTAVES: u32 = 5;
const DEFAULT_LACUNARITY: f64 = 2.0;
const DEFAULT_GAIN: f64 = 0.5;

/// Octave layout of a fractal field.
///
/// Immutable once a [`FractalField`] is built from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldParams {
    /// Number of noise layers, at least 1.
    pub octaves: u32,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
    /// Amplitude multiplier per octave, normally in (0, 1).
    ///
    /// Any finite value is accepted. A negative gain flips the sign of odd
    /// octaves, so the weighted sum is no longer a convex combination and
    /// the output leaves `[0, 1]`; when the amplitudes cancel, the epsilon
    /// guard turns the division into a very large value.
    pub gain: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            octaves: DEFAULT_OCTAVES,
            lacunarity: DEFAULT_LACUNARITY,
            gain: DEFAULT_GAIN,
        }
    }
}

impl FieldParams {
    /// Default lacunarity and gain with the given octave count.
    pub fn with_octaves(octaves: u32) -> Self {
        Self {
            octaves,
            ..Self::default()
        }
    }

    /// Rejects layouts that cannot produce a field.
    ///
    /// `gain` is deliberately not checked here; see
    /// [`quality_warnings`](Self::quality_warnings).
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.octaves < 1 {
            return Err(EngineError::InvalidOctaves(self.octaves));
        }
        if !self.lacunarity.is_finite() || self.lacunarity <= 0.0 {
            return Err(EngineError::invalid_param(
                "lacunarity",
                format!("must be finite and positive, got {}", self.lacunarity),
            ));
        }
        if !self.gain.is_finite() {
            return Err(EngineError::invalid_param(
                "gain",
                format!("must be finite, got {}", self.gain),
            ));
        }
        Ok(())
    }

    /// Human-readable notes about layouts that are legal but degenerate.
    ///
    /// Returns an empty vector for gains in (0, 1).
    pub fn quality_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.gain < 0.0 {
            warnings.push(format!(
                "gain {} < 0: octaves alternate in sign and the field is no longer normalized to [0, 1]",
                self.gain
            ));
        } else if self.gain == 0.0 {
            warnings.push(format!(
                "gain {} == 0: only the first octave contributes detail",
                self.gain
            ));
        } else if self.gain >= 1.0 {
            warnings.push(format!(
                "gain {} >= 1: fine octaves dominate and the field looks like static",
                self.gain
            ));
        }
        warnings
    }
}

/// Samples fBm at `(x, y)`. Assumes `params` has been validated.
pub fn fbm(x: f64, y: f64, seed: u64, params: &FieldParams) -> f64 {
    let mut amp = 1.0;
    let mut freq = 1.0;
    let mut total = 0.0;
    let mut norm = 0.0;
    for o in 0..u64::from(params.octaves) {
        let octave_seed = seed.wrapping_add(OCTAVE_SEED_STRIDE.wrapping_mul(o));
        total += amp * value_noise(x * freq, y * freq, octave_seed);
        norm += amp;
        amp *= params.gain;
        freq *= params.lacunarity;
    }
    total / f64::max(norm, NORM_EPSILON)
}

/// A seeded multi-octave noise field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalField {
    seed: u64,
    params: FieldParams,
}

impl FractalField {
    /// Builds a field, failing fast on invalid octave layouts.
    pub fn new(seed: u64, params: FieldParams) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self { seed, params })
    }

    /// Returns the base seed; octave `o` uses `seed + 1013 * o`.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the octave layout this field was built with.
    pub fn params(&self) -> &FieldParams {
        &self.params
    }
}

impl ScalarField for FractalField {
    fn sample(&self, x: f64, y: f64) -> f64 {
        fbm(x, y, self.seed, &self.params)
    }
}
