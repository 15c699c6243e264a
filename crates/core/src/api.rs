//! One-call entry points for collaborators that do not want to hold
//! fields or tracers themselves.
//!
//! Each function builds the field it needs from `seed` and the octave
//! layout, so calls are independent and safe to run from any thread.

use crate::blob::{BlobContour, BlobOutline, BlobParams};
use crate::error::EngineError;
use crate::flow::{FlowParams, FlowTracer};
use crate::fractal::{fbm, FieldParams, FractalField};
use crate::geometry::{Point2D, Polyline};

/// Samples fractal noise at `(x, y)`. The result lies in `[0, 1]` for any
/// non-negative `gain`.
///
/// Returns `EngineError::InvalidOctaves` when `octaves` is zero, or
/// `EngineError::InvalidParameter` for a non-positive `lacunarity` or a
/// non-finite `gain`.
pub fn noise(
    x: f64,
    y: f64,
    seed: u64,
    octaves: u32,
    lacunarity: f64,
    gain: f64,
) -> Result<f64, EngineError> {
    let params = FieldParams {
        octaves,
        lacunarity,
        gain,
    };
    params.validate()?;
    Ok(fbm(x, y, seed, &params))
}

/// Traces one flow line from `start` through the field `(seed, field_params)`.
///
/// Returns the traced polyline, a single point when `start` fails
/// `in_bounds`, or the field/flow validation error.
pub fn trace_flow_line(
    start: Point2D,
    seed: u64,
    field_params: FieldParams,
    flow: FlowParams,
    in_bounds: impl Fn(Point2D) -> bool,
) -> Result<Polyline, EngineError> {
    let field = FractalField::new(seed, field_params)?;
    let tracer = FlowTracer::new(field, flow)?;
    Ok(tracer.trace(start, in_bounds))
}

/// Builds one closed blob outline around `center`.
///
/// Returns `EngineError::InvalidPointCount` when `blob.n_points` is below 4.
pub fn build_blob_outline(
    center: Point2D,
    base_radius: f64,
    seed: u64,
    field_params: FieldParams,
    blob: &BlobParams,
) -> Result<BlobOutline, EngineError> {
    let field = FractalField::new(seed, field_params)?;
    BlobContour::new(field).generate(center, base_radius, blob)
}
