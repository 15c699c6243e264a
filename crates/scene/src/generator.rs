//! The `Generator` trait every scene generator implements.
//!
//! The trait is object-safe so generators can be held as `dyn Generator`
//! and picked by name at runtime.

use organic_core::EngineError;
use serde_json::Value;

use crate::scene::Scene;

/// A configured generator that turns a canvas size and a seed into a scene.
///
/// Configuration is fixed at construction; `compose` is a pure function of
/// `(width, height, seed)`, so the same inputs always give the same scene.
pub trait Generator: Send + Sync {
    /// Registry name, e.g. `"flowfield"`.
    fn name(&self) -> &'static str;

    /// Builds the scene for one seed.
    ///
    /// Returns `EngineError::InvalidDimensions` for a zero-sized canvas, or
    /// `EngineError::InvalidParameter` when the margin does not fit.
    fn compose(&self, width: usize, height: usize, seed: u64) -> Result<Scene, EngineError>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// Accepted but unusual settings, as human-readable messages.
    fn quality_warnings(&self) -> Vec<String> {
        Vec::new()
    }
}
