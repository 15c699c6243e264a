//! Plane geometry shared by the tracer, the blob generator and the
//! serialization layer.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A point in the plane.
pub type Point2D = DVec2;

/// An open, ordered run of points produced by one flow trace.
///
/// A renderable polyline has at least two points. The tracer may return a
/// single point when the start is out of bounds or no steps were requested;
/// callers filter with [`is_renderable`](Self::is_renderable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline(Vec<Point2D>);

impl Polyline {
    /// Wraps `points` in trace order.
    pub fn new(points: Vec<Point2D>) -> Self {
        Self(points)
    }

    /// Returns the points in trace order.
    pub fn points(&self) -> &[Point2D] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the polyline has at least `min_points` points (and never
    /// fewer than two).
    pub fn is_renderable(&self, min_points: usize) -> bool {
        self.0.len() >= min_points.max(2)
    }
}

/// One cubic Bézier segment: start, two control points, end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierSegment {
    pub p0: Point2D,
    pub c1: Point2D,
    pub c2: Point2D,
    pub p1: Point2D,
}

impl BezierSegment {
    pub fn new(p0: Point2D, c1: Point2D, c2: Point2D, p1: Point2D) -> Self {
        Self { p0, c1, c2, p1 }
    }

    /// Returns the point the segment starts at.
    pub fn start(&self) -> Point2D {
        self.p0
    }

    /// Returns the point the segment ends at, shared with the next segment's
    /// start in a closed outline.
    pub fn end(&self) -> Point2D {
        self.p1
    }
}

/// Axis-aligned rectangle with inclusive edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point2D,
    pub max: Point2D,
}

impl Bounds {
    /// A rectangle from its lower-left and upper-right corners.
    pub fn new(min: Point2D, max: Point2D) -> Self {
        Self { min, max }
    }

    /// The drawable area of a `width` x `height` canvas inset by `margin`
    /// on every side.
    ///
    /// Returns `EngineError::InvalidDimensions` for a zero-sized canvas and
    /// `EngineError::InvalidParameter` when the margin swallows the canvas.
    pub fn canvas(width: usize, height: usize, margin: f64) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let (w, h) = (width as f64, height as f64);
        if !margin.is_finite() || margin < 0.0 || 2.0 * margin > w || 2.0 * margin > h {
            return Err(EngineError::invalid_param(
                "margin",
                format!("{margin} does not fit a {width}x{height} canvas"),
            ));
        }
        Ok(Self::new(
            DVec2::splat(margin),
            DVec2::new(w - margin, h - margin),
        ))
    }

    /// True when `p` lies inside or on the edge. NaN coordinates are outside.
    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
