//! Organic blob outlines.
//!
//! A circle of `n_points` vertices has each radius scaled by
//! `1 + (2n - 1) * roughness`, where `n` is the field sampled at the
//! vertex's undisplaced position on the circle. Neighbouring vertices hit
//! nearby field coordinates, so the wobble is smooth rather than jittery.
//! The ring is then closed with a cyclic Catmull-Rom spline.

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::field::ScalarField;
use crate::geometry::{BezierSegment, Point2D};
use crate::spline::{catmull_rom_to_beziers, MIN_SPLINE_POINTS};

const DEFAULT_NOISE_SCALE: f64 = 0.006;
const DEFAULT_N_POINTS: usize = 14;
const DEFAULT_ROUGHNESS: f64 = 0.55;
const DEFAULT_TENSION: f64 = 0.9;

/// Shape settings for one blob.
///
/// `roughness` (nominally [0, 1]) and `tension` are not range-checked:
/// extreme values give odd shapes, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlobParams {
    /// Multiplier from canvas coordinates to field coordinates.
    pub noise_scale: f64,
    /// Ring vertex count, at least 4.
    pub n_points: usize,
    /// Radius variation as a fraction of the base radius.
    pub roughness: f64,
    /// Catmull-Rom tension.
    pub tension: f64,
    /// Angle of the first vertex in radians.
    pub angle_offset: f64,
}

impl Default for BlobParams {
    fn default() -> Self {
        Self {
            noise_scale: DEFAULT_NOISE_SCALE,
            n_points: DEFAULT_N_POINTS,
            roughness: DEFAULT_ROUGHNESS,
            tension: DEFAULT_TENSION,
            angle_offset: 0.0,
        }
    }
}

impl BlobParams {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.n_points < MIN_SPLINE_POINTS {
            return Err(EngineError::InvalidPointCount {
                n_points: self.n_points,
                min: MIN_SPLINE_POINTS,
            });
        }
        if !self.noise_scale.is_finite() || self.noise_scale <= 0.0 {
            return Err(EngineError::invalid_param(
                "noise_scale",
                format!("must be finite and positive, got {}", self.noise_scale),
            ));
        }
        Ok(())
    }
}

/// A closed blob: its vertex ring and the spline through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobOutline {
    pub ring: Vec<Point2D>,
    pub segments: Vec<BezierSegment>,
}

impl BlobOutline {
    /// True when the last segment ends exactly where the first begins.
    pub fn is_closed(&self) -> bool {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => last.end() == first.start(),
            _ => false,
        }
    }
}

/// Generates blob outlines from a scalar field.
#[derive(Debug, Clone)]
pub struct BlobContour<F> {
    field: F,
}

impl<F: ScalarField> BlobContour<F> {
    /// Wraps the field that perturbs each ring radius.
    pub fn new(field: F) -> Self {
        Self { field }
    }

    /// Returns the perturbing field.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// The perturbed vertex ring around `center`.
    ///
    /// Returns exactly `n_points` vertices at evenly spaced angles, each at
    /// `base_radius * (1 + (2v - 1) * roughness)` for field value `v`.
    pub fn ring(
        &self,
        center: Point2D,
        base_radius: f64,
        params: &BlobParams,
    ) -> Result<Vec<Point2D>, EngineError> {
        params.validate()?;
        let n = params.n_points;
        let ring = (0..n)
            .map(|i| {
                let a = params.angle_offset + TAU * (i as f64 / n as f64);
                let dir = DVec2::new(a.cos(), a.sin());
                let nominal = (center + dir * base_radius) * params.noise_scale;
                let v = self.field.sample(nominal.x, nominal.y);
                let deviation = (v - 0.5) * 2.0;
                let r = base_radius * (1.0 + deviation * params.roughness);
                center + dir * r
            })
            .collect();
        Ok(ring)
    }

    /// A closed outline around `center` with exactly `n_points` segments.
    ///
    /// Returns `EngineError::InvalidPointCount` when `n_points < 4`.
    pub fn generate(
        &self,
        center: Point2D,
        base_radius: f64,
        params: &BlobParams,
    ) -> Result<BlobOutline, EngineError> {
        let ring = self.ring(center, base_radius, params)?;
        let segments = catmull_rom_to_beziers(&ring, true, params.tension)?;
        Ok(BlobOutline { ring, segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ConstantField;
    use crate::fractal::{FieldParams, FractalField};

    fn params(n_points: usize, roughness: f64) -> BlobParams {
        BlobParams {
            n_points,
            roughness,
            ..BlobParams::default()
        }
    }

    #[test]
    fn zero_roughness_is_a_circle() {
        let field = FractalField::new(11, FieldParams::default()).unwrap();
        let blob = BlobContour::new(field);
        let outline = blob.generate(DVec2::ZERO, 10.0, &params(4, 0.0)).unwrap();
        assert_eq!(outline.ring.len(), 4);
        for p in &outline.ring {
            assert!((p.length() - 10.0).abs() < 1e-9, "{p:?} is off the circle");
        }
    }

    #[test]
    fn three_points_rejected() {
        let blob = BlobContour::new(ConstantField(0.5));
        let result = blob.generate(DVec2::ZERO, 10.0, &params(3, 0.5));
        assert!(matches!(
            result,
            Err(EngineError::InvalidPointCount { n_points: 3, .. })
        ));
    }

    #[test]
    fn bad_noise_scale_rejected() {
        let blob = BlobContour::new(ConstantField(0.5));
        let mut p = params(8, 0.5);
        p.noise_scale = 0.0;
        assert!(blob.generate(DVec2::ZERO, 10.0, &p).is_err());
    }

    #[test]
    fn constant_high_field_inflates_radius() {
        // n = 1.0 -> deviation +1 -> r = base * (1 + roughness).
        let blob = BlobContour::new(ConstantField(1.0));
        let ring = blob.ring(DVec2::new(5.0, 5.0), 20.0, &params(6, 0.5)).unwrap();
        for p in &ring {
            let r = p.distance(DVec2::new(5.0, 5.0));
            assert!((r - 30.0).abs() < 1e-9, "radius {r}");
        }
    }

    #[test]
    fn angle_offset_rotates_first_vertex() {
        let blob = BlobContour::new(ConstantField(0.5));
        let mut p = params(4, 0.0);
        p.angle_offset = std::f64::consts::FRAC_PI_2;
        let ring = blob.ring(DVec2::ZERO, 1.0, &p).unwrap();
        assert!(ring[0].x.abs() < 1e-12 && (ring[0].y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn outline_is_closed_with_n_segments() {
        let field = FractalField::new(42 + 9991, FieldParams::with_octaves(6)).unwrap();
        let blob = BlobContour::new(&field);
        let outline = blob
            .generate(DVec2::new(600.0, 600.0), 90.0, &params(18, 0.7))
            .unwrap();
        assert_eq!(outline.segments.len(), 18);
        assert!(outline.is_closed());
        assert_eq!(outline.segments[0].start(), outline.ring[0]);
    }

    #[test]
    fn empty_outline_is_not_closed() {
        let outline = BlobOutline {
            ring: vec![],
            segments: vec![],
        };
        assert!(!outline.is_closed());
    }

    #[test]
    fn default_params_validate() {
        assert!(BlobParams::default().validate().is_ok());
        assert_eq!(BlobParams::default().n_points, 14);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn segments_link_cyclically(
                seed: u64,
                n_points in 4_usize..40,
                roughness in 0.0_f64..1.0,
                tension in 0.0_f64..1.5,
                cx in 0.0_f64..1200.0,
                cy in 0.0_f64..1200.0,
                radius in 1.0_f64..200.0,
            ) {
                let field = FractalField::new(seed, FieldParams::default()).unwrap();
                let blob = BlobContour::new(field);
                let p = BlobParams { n_points, roughness, tension, ..BlobParams::default() };
                let outline = blob.generate(DVec2::new(cx, cy), radius, &p).unwrap();
                prop_assert_eq!(outline.ring.len(), n_points);
                prop_assert_eq!(outline.segments.len(), n_points);
                for i in 0..n_points {
                    let next = (i + 1) % n_points;
                    prop_assert_eq!(outline.segments[i].end(), outline.segments[next].start());
                }
            }

            #[test]
            fn radius_stays_within_roughness_band(
                seed: u64,
                roughness in 0.0_f64..1.0,
                radius in 1.0_f64..200.0,
            ) {
                let field = FractalField::new(seed, FieldParams::default()).unwrap();
                let blob = BlobContour::new(field);
                let center = DVec2::new(300.0, 300.0);
                let p = BlobParams { n_points: 16, roughness, ..BlobParams::default() };
                for v in blob.ring(center, radius, &p).unwrap() {
                    let r = v.distance(center);
                    prop_assert!(r >= radius * (1.0 - roughness) - 1e-6);
                    prop_assert!(r <= radius * (1.0 + roughness) + 1e-6);
                }
            }
        }
    }
}
