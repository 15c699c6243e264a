//! Catmull-Rom to cubic Bézier conversion.
//!
//! Each span `p1 -> p2` of a Catmull-Rom spline with neighbours `p0`, `p3`
//! becomes the Bézier segment `(p1, p1 + t(p2-p0)/6, p2 - t(p3-p1)/6, p2)`
//! where `t` is the tension (1.0 is the standard spline, smaller is
//! tighter).

use crate::error::EngineError;
use crate::geometry::{BezierSegment, Point2D};

/// Smallest point count the four-point stencil accepts.
pub const MIN_SPLINE_POINTS: usize = 4;

/// Converts `points` into Bézier segments.
///
/// Closed curves wrap indices cyclically and yield `n` segments ending where
/// they began. Open curves clamp neighbour indices at the ends and yield
/// `n - 1` segments.
///
/// Returns `EngineError::InvalidPointCount` for fewer than four points.
pub fn catmull_rom_to_beziers(
    points: &[Point2D],
    closed: bool,
    tension: f64,
) -> Result<Vec<BezierSegment>, EngineError> {
    let n = points.len();
    if n < MIN_SPLINE_POINTS {
        return Err(EngineError::InvalidPointCount {
            n_points: n,
            min: MIN_SPLINE_POINTS,
        });
    }

    let span = |i: usize| -> BezierSegment {
        let (p0, p1, p2, p3) = if closed {
            (
                points[(i + n - 1) % n],
                points[i],
                points[(i + 1) % n],
                points[(i + 2) % n],
            )
        } else {
            (
                points[i.saturating_sub(1)],
                points[i],
                points[(i + 1).min(n - 1)],
                points[(i + 2).min(n - 1)],
            )
        };
        let c1 = p1 + (p2 - p0) * (tension / 6.0);
        let c2 = p2 - (p3 - p1) * (tension / 6.0);
        BezierSegment::new(p1, c1, c2, p2)
    };

    let count = if closed { n } else { n - 1 };
    Ok((0..count).map(span).collect())
}
