//! Error types for the organic geometry engine.

use thiserror::Error;

/// Errors produced by field construction, tracing, blob generation and
/// the scene collaborators built on top of them.
///
/// Every variant is derived from caller input; nothing here is transient
/// or worth retrying.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A fractal field was configured with zero octaves.
    #[error("invalid octave count {0}: at least one octave is required")]
    InvalidOctaves(u32),

    /// Too few ring points for the four-point Catmull-Rom stencil.
    #[error("invalid point count {n_points}: need at least {min} points")]
    InvalidPointCount { n_points: usize, min: usize },

    /// A numeric parameter was non-finite or outside its allowed range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Canvas width or height was zero.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// No generator is registered under the requested name.
    #[error("unknown generator: {0}")]
    UnknownGenerator(String),

    /// Writing an artifact failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidParameter`].
    pub fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}
