//! Flow-field line tracing.
//!
//! A particle starts at a point and repeatedly steps along the heading
//! `2π * angle_turns * n`, where `n` is the field value at the scaled
//! current position. Tracing stops when the step budget runs out or the
//! next position leaves the bounds; the out-of-bounds point is dropped.
//!
//! Each trace is sequential (every step depends on the previous position)
//! but independent traces share nothing beyond the read-only field.

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::field::ScalarField;
use crate::geometry::{Point2D, Polyline};

/// Traces shorter than this are too faint to be worth drawing.
pub const MIN_RENDER_POINTS: usize = 8;

const DEFAULT_STEPS: usize = 180;
const DEFAULT_STEP_LENGTH: f64 = 3.2;
const DEFAULT_FIELD_SCALE: f64 = 0.0048;
const DEFAULT_ANGLE_TURNS: f64 = 1.0;

/// Integration settings for one family of traces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowParams {
    /// Maximum number of steps; the trace has at most `steps + 1` points.
    pub steps: usize,
    /// Distance advanced per step.
    pub step_length: f64,
    /// Multiplier from canvas coordinates to field coordinates. Smaller
    /// values give larger swirls.
    pub field_scale: f64,
    /// Full turns of heading spanned by the field's [0, 1] range.
    pub angle_turns: f64,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            step_length: DEFAULT_STEP_LENGTH,
            field_scale: DEFAULT_FIELD_SCALE,
            angle_turns: DEFAULT_ANGLE_TURNS,
        }
    }
}

impl FlowParams {
    pub fn validate(&self) -> Result<(), EngineError> {
        positive("step_length", self.step_length)?;
        positive("field_scale", self.field_scale)?;
        positive("angle_turns", self.angle_turns)?;
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid_param(
            name,
            format!("must be finite and positive, got {value}"),
        ))
    }
}

/// Advances particles through a scalar field.
#[derive(Debug, Clone)]
pub struct FlowTracer<F> {
    field: F,
    params: FlowParams,
}

impl<F: ScalarField> FlowTracer<F> {
    /// Builds a tracer, rejecting non-positive or non-finite step settings.
    pub fn new(field: F, params: FlowParams) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self { field, params })
    }

    /// Returns the step settings this tracer was built with.
    pub fn params(&self) -> &FlowParams {
        &self.params
    }

    /// Returns the field that steers the trace.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Heading in radians at `p`: the field sampled at `p * field_scale`,
    /// scaled to `angle_turns` full turns.
    pub fn heading(&self, p: Point2D) -> f64 {
        let scaled = p * self.params.field_scale;
        let n = self.field.sample(scaled.x, scaled.y);
        TAU * self.params.angle_turns * n
    }

    /// Traces one line from `start`.
    ///
    /// Returns at most `steps + 1` points. The walk stops before the first
    /// step that fails `in_bounds`.
    ///
    /// The start point is always the first point, even when it is already
    /// out of bounds; such a trace has exactly one point.
    pub fn trace(&self, start: Point2D, in_bounds: impl Fn(Point2D) -> bool) -> Polyline {
        let mut points = Vec::with_capacity(self.params.steps + 1);
        points.push(start);
        if !in_bounds(start) {
            return Polyline::new(points);
        }

        let mut p = start;
        for _ in 0..self.params.steps {
            let angle = self.heading(p);
            p += DVec2::new(angle.cos(), angle.sin()) * self.params.step_length;
            if !in_bounds(p) {
                break;
            }
            points.push(p);
        }
        Polyline::new(points)
    }
}
