//! The two drawable layers generators are assembled from: a family of
//! flow-line strokes and a scatter of filled blobs.
//!
//! Each layer draws its placements (start points, radii, palette picks,
//! opacities) sequentially from the caller's [`Xorshift64`], then builds the
//! geometry for every placement in parallel. Shape order follows draw order,
//! so a scene is identical for any rayon thread count.

use std::f64::consts::TAU;

use organic_core::params::{param_f64, param_u32, param_usize};
use organic_core::{
    BlobContour, BlobParams, Bounds, EngineError, FieldParams, FlowParams, FlowTracer,
    FractalField, Point2D, MIN_RENDER_POINTS,
};
use rayon::prelude::*;
use serde_json::{json, Map, Value};

use crate::color::Srgb;
use crate::prng::Xorshift64;
use crate::scene::Shape;

/// Offset between a scene seed and the noise seed its blobs sample, so blob
/// outlines never share a field with the flow lines of the same scene.
pub const BLOB_SEED_OFFSET: u64 = 9991;

fn opacity_range(prefix: &str, min: f64, max: f64) -> Result<(), EngineError> {
    let ok = min.is_finite() && max.is_finite() && 0.0 <= min && min <= max && max <= 1.0;
    if ok {
        Ok(())
    } else {
        Err(EngineError::invalid_param(
            &format!("{prefix}opacity_min"),
            format!("opacity range [{min}, {max}] must satisfy 0 <= min <= max <= 1"),
        ))
    }
}

/// Flow-line strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineLayer {
    pub n_lines: usize,
    /// Shorter traces are dropped.
    pub min_points: usize,
    pub stroke_width: f64,
    pub opacity_min: f64,
    pub opacity_max: f64,
    pub field: FieldParams,
    pub flow: FlowParams,
}

impl Default for LineLayer {
    fn default() -> Self {
        Self {
            n_lines: 1400,
            min_points: MIN_RENDER_POINTS,
            stroke_width: 0.8,
            opacity_min: 0.06,
            opacity_max: 0.20,
            field: FieldParams::default(),
            flow: FlowParams::default(),
        }
    }
}

impl LineLayer {
    /// Reads overrides from `params`, falling back to `defaults` per key.
    ///
    /// Returns `EngineError::InvalidParameter` for a key of the wrong type.
    pub fn from_json(params: &Value, defaults: &LineLayer) -> Result<Self, EngineError> {
        Ok(Self {
            n_lines: param_usize(params, "n_lines", defaults.n_lines)?,
            min_points: param_usize(params, "min_points", defaults.min_points)?,
            stroke_width: param_f64(params, "stroke_width", defaults.stroke_width)?,
            opacity_min: param_f64(params, "opacity_min", defaults.opacity_min)?,
            opacity_max: param_f64(params, "opacity_max", defaults.opacity_max)?,
            field: FieldParams {
                octaves: param_u32(params, "octaves", defaults.field.octaves)?,
                lacunarity: param_f64(params, "lacunarity", defaults.field.lacunarity)?,
                gain: param_f64(params, "gain", defaults.field.gain)?,
            },
            flow: FlowParams {
                steps: param_usize(params, "steps", defaults.flow.steps)?,
                step_length: param_f64(params, "step_length", defaults.flow.step_length)?,
                field_scale: param_f64(params, "field_scale", defaults.flow.field_scale)?,
                angle_turns: param_f64(params, "angle_turns", defaults.flow.angle_turns)?,
            },
        })
    }

    /// Checks field, flow, stroke width and opacity range.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.field.validate()?;
        self.flow.validate()?;
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(EngineError::invalid_param(
                "stroke_width",
                format!("must be finite and positive, got {}", self.stroke_width),
            ));
        }
        opacity_range("", self.opacity_min, self.opacity_max)
    }

    /// Returns the effective settings under their JSON keys.
    pub fn params(&self) -> Map<String, Value> {
        let value = json!({
            "n_lines": self.n_lines,
            "min_points": self.min_points,
            "stroke_width": self.stroke_width,
            "opacity_min": self.opacity_min,
            "opacity_max": self.opacity_max,
            "octaves": self.field.octaves,
            "lacunarity": self.field.lacunarity,
            "gain": self.field.gain,
            "steps": self.flow.steps,
            "step_length": self.flow.step_length,
            "field_scale": self.flow.field_scale,
            "angle_turns": self.flow.angle_turns,
        });
        into_map(value)
    }

    /// Parameter schema with `defaults` as the advertised default values.
    pub fn schema(defaults: &LineLayer) -> Map<String, Value> {
        let value = json!({
            "n_lines": {
                "type": "integer",
                "default": defaults.n_lines,
                "min": 0,
                "max": 20000,
                "description": "Number of flow lines started"
            },
            "min_points": {
                "type": "integer",
                "default": defaults.min_points,
                "min": 2,
                "max": 200,
                "description": "Traces with fewer points are dropped"
            },
            "stroke_width": {
                "type": "number",
                "default": defaults.stroke_width,
                "min": 0.05,
                "max": 10.0,
                "description": "Line stroke width"
            },
            "opacity_min": {
                "type": "number",
                "default": defaults.opacity_min,
                "min": 0.0,
                "max": 1.0,
                "description": "Lower bound of the per-line stroke opacity"
            },
            "opacity_max": {
                "type": "number",
                "default": defaults.opacity_max,
                "min": 0.0,
                "max": 1.0,
                "description": "Upper bound of the per-line stroke opacity"
            },
            "octaves": {
                "type": "integer",
                "default": defaults.field.octaves,
                "min": 1,
                "max": 12,
                "description": "Noise layers in the flow field"
            },
            "lacunarity": {
                "type": "number",
                "default": defaults.field.lacunarity,
                "min": 1.0,
                "max": 4.0,
                "description": "Frequency multiplier per octave"
            },
            "gain": {
                "type": "number",
                "default": defaults.field.gain,
                "min": 0.0,
                "max": 1.0,
                "description": "Amplitude multiplier per octave"
            },
            "steps": {
                "type": "integer",
                "default": defaults.flow.steps,
                "min": 1,
                "max": 2000,
                "description": "Maximum steps per line"
            },
            "step_length": {
                "type": "number",
                "default": defaults.flow.step_length,
                "min": 0.1,
                "max": 20.0,
                "description": "Distance advanced per step"
            },
            "field_scale": {
                "type": "number",
                "default": defaults.flow.field_scale,
                "min": 0.0005,
                "max": 0.05,
                "description": "Canvas to field scale; smaller gives larger swirls"
            },
            "angle_turns": {
                "type": "number",
                "default": defaults.flow.angle_turns,
                "min": 0.1,
                "max": 4.0,
                "description": "Full turns of heading spanned by the field range"
            }
        });
        into_map(value)
    }

    /// Traces `n_lines` lines through the fractal field seeded with `seed`.
    ///
    /// Start points are uniform inside `bounds`; traces stop at its edge.
    pub fn draw(
        &self,
        seed: u64,
        bounds: &Bounds,
        color: Srgb,
        rng: &mut Xorshift64,
    ) -> Result<Vec<Shape>, EngineError> {
        let field = FractalField::new(seed, self.field)?;
        let tracer = FlowTracer::new(field, self.flow)?;

        let starts: Vec<(Point2D, f64)> = (0..self.n_lines)
            .map(|_| {
                let x = rng.next_range(bounds.min.x, bounds.max.x);
                let y = rng.next_range(bounds.min.y, bounds.max.y);
                let opacity = rng.next_range(self.opacity_min, self.opacity_max);
                (Point2D::new(x, y), opacity)
            })
            .collect();

        let shapes = starts
            .into_par_iter()
            .filter_map(|(start, opacity)| {
                let polyline = tracer.trace(start, |p| bounds.contains(p));
                polyline
                    .is_renderable(self.min_points)
                    .then_some(Shape::Stroke {
                        polyline,
                        color,
                        width: self.stroke_width,
                        opacity,
                    })
            })
            .collect();
        Ok(shapes)
    }
}

/// Filled blobs scattered over the canvas.
///
/// Keys are read with a prefix so a generator that also carries a line
/// layer can keep both sets apart (`blob_octaves` next to `octaves`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobLayer {
    pub n_blobs: usize,
    pub min_r: f64,
    pub max_r: f64,
    pub points_min: usize,
    pub points_max: usize,
    pub roughness: f64,
    pub tension: f64,
    pub noise_scale: f64,
    pub opacity_min: f64,
    pub opacity_max: f64,
    pub field: FieldParams,
}

impl Default for BlobLayer {
    fn default() -> Self {
        Self {
            n_blobs: 35,
            min_r: 35.0,
            max_r: 160.0,
            points_min: 14,
            points_max: 24,
            roughness: 0.70,
            tension: 0.75,
            noise_scale: 0.006,
            opacity_min: 0.30,
            opacity_max: 0.70,
            field: FieldParams::with_octaves(6),
        }
    }
}

struct Placement {
    center: Point2D,
    base_radius: f64,
    shape: BlobParams,
    color: Srgb,
    opacity: f64,
}

impl BlobLayer {
    /// Reads overrides from `params`, with every key except `n_blobs`
    /// looked up under `prefix`.
    ///
    /// Returns `EngineError::InvalidParameter` for a key of the wrong type.
    pub fn from_json(params: &Value, prefix: &str, defaults: &BlobLayer) -> Result<Self, EngineError> {
        let key = |name: &str| format!("{prefix}{name}");
        Ok(Self {
            n_blobs: param_usize(params, "n_blobs", defaults.n_blobs)?,
            min_r: param_f64(params, &key("min_r"), defaults.min_r)?,
            max_r: param_f64(params, &key("max_r"), defaults.max_r)?,
            points_min: param_usize(params, &key("points_min"), defaults.points_min)?,
            points_max: param_usize(params, &key("points_max"), defaults.points_max)?,
            roughness: param_f64(params, &key("roughness"), defaults.roughness)?,
            tension: param_f64(params, &key("tension"), defaults.tension)?,
            noise_scale: param_f64(params, &key("noise_scale"), defaults.noise_scale)?,
            opacity_min: param_f64(params, &key("opacity_min"), defaults.opacity_min)?,
            opacity_max: param_f64(params, &key("opacity_max"), defaults.opacity_max)?,
            field: FieldParams {
                octaves: param_u32(params, &key("octaves"), defaults.field.octaves)?,
                lacunarity: param_f64(params, &key("lacunarity"), defaults.field.lacunarity)?,
                gain: param_f64(params, &key("gain"), defaults.field.gain)?,
            },
        })
    }

    /// Checks radii, point counts and opacities. Errors name the key with
    /// `prefix` applied.
    pub fn validate(&self, prefix: &str) -> Result<(), EngineError> {
        self.field.validate()?;
        let radii_ok = self.min_r.is_finite()
            && self.max_r.is_finite()
            && 0.0 < self.min_r
            && self.min_r <= self.max_r;
        if !radii_ok {
            return Err(EngineError::invalid_param(
                &format!("{prefix}min_r"),
                format!(
                    "radius range [{}, {}] must satisfy 0 < min <= max",
                    self.min_r, self.max_r
                ),
            ));
        }
        if self.points_max < self.points_min {
            return Err(EngineError::invalid_param(
                &format!("{prefix}points_max"),
                format!("{} is below points_min {}", self.points_max, self.points_min),
            ));
        }
        // The smallest ring the layer can draw must still be a valid blob.
        self.blob_params(self.points_min, 0.0).validate()?;
        opacity_range(prefix, self.opacity_min, self.opacity_max)
    }

    fn blob_params(&self, n_points: usize, angle_offset: f64) -> BlobParams {
        BlobParams {
            noise_scale: self.noise_scale,
            n_points,
            roughness: self.roughness,
            tension: self.tension,
            angle_offset,
        }
    }

    /// Returns the effective settings under their (prefixed) JSON keys.
    pub fn params(&self, prefix: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("n_blobs".into(), json!(self.n_blobs));
        let entries = [
            ("min_r", json!(self.min_r)),
            ("max_r", json!(self.max_r)),
            ("points_min", json!(self.points_min)),
            ("points_max", json!(self.points_max)),
            ("roughness", json!(self.roughness)),
            ("tension", json!(self.tension)),
            ("noise_scale", json!(self.noise_scale)),
            ("opacity_min", json!(self.opacity_min)),
            ("opacity_max", json!(self.opacity_max)),
            ("octaves", json!(self.field.octaves)),
            ("lacunarity", json!(self.field.lacunarity)),
            ("gain", json!(self.field.gain)),
        ];
        for (name, value) in entries {
            map.insert(format!("{prefix}{name}"), value);
        }
        map
    }

    pub fn schema(prefix: &str, defaults: &BlobLayer) -> Map<String, Value> {
        let entry = |kind: &str, default: Value, min: f64, max: f64, description: &str| {
            json!({
                "type": kind,
                "default": default,
                "min": min,
                "max": max,
                "description": description,
            })
        };
        let mut map = Map::new();
        map.insert(
            "n_blobs".into(),
            entry("integer", json!(defaults.n_blobs), 0.0, 500.0, "Number of blobs"),
        );
        let entries = [
            ("min_r", entry("number", json!(defaults.min_r), 1.0, 1000.0, "Smallest base radius")),
            ("max_r", entry("number", json!(defaults.max_r), 1.0, 1000.0, "Largest base radius")),
            ("points_min", entry("integer", json!(defaults.points_min), 4.0, 64.0, "Fewest ring points per blob")),
            ("points_max", entry("integer", json!(defaults.points_max), 4.0, 64.0, "Most ring points per blob")),
            ("roughness", entry("number", json!(defaults.roughness), 0.0, 1.0, "Radius variation as a fraction of the base radius")),
            ("tension", entry("number", json!(defaults.tension), 0.0, 2.0, "Catmull-Rom tension of the outline")),
            ("noise_scale", entry("number", json!(defaults.noise_scale), 0.0005, 0.05, "Canvas to field scale for the radius wobble")),
            ("opacity_min", entry("number", json!(defaults.opacity_min), 0.0, 1.0, "Lower bound of the per-blob fill opacity")),
            ("opacity_max", entry("number", json!(defaults.opacity_max), 0.0, 1.0, "Upper bound of the per-blob fill opacity")),
            ("octaves", entry("integer", json!(defaults.field.octaves), 1.0, 12.0, "Noise layers in the blob field")),
            ("lacunarity", entry("number", json!(defaults.field.lacunarity), 1.0, 4.0, "Frequency multiplier per octave")),
            ("gain", entry("number", json!(defaults.field.gain), 0.0, 1.0, "Amplitude multiplier per octave")),
        ];
        for (name, value) in entries {
            map.insert(format!("{prefix}{name}"), value);
        }
        map
    }

    /// Scatters `n_blobs` blobs with centers uniform inside `bounds`, each
    /// filled with a color picked from `fills`.
    ///
    /// `seed` is the noise seed of the radius field, already offset from
    /// the scene seed by the caller.
    pub fn draw(
        &self,
        seed: u64,
        bounds: &Bounds,
        fills: &[Srgb],
        rng: &mut Xorshift64,
    ) -> Result<Vec<Shape>, EngineError> {
        let contour = BlobContour::new(FractalField::new(seed, self.field)?);

        let mut placements = Vec::with_capacity(self.n_blobs);
        for _ in 0..self.n_blobs {
            let x = rng.next_range(bounds.min.x, bounds.max.x);
            let y = rng.next_range(bounds.min.y, bounds.max.y);
            let base_radius = rng.next_range(self.min_r, self.max_r);
            let n_points = rng.next_int_inclusive(self.points_min, self.points_max);
            let color = *rng
                .choose(fills)
                .ok_or_else(|| EngineError::InvalidColor("fill palette is empty".into()))?;
            let opacity = rng.next_range(self.opacity_min, self.opacity_max);
            let angle_offset = rng.next_range(0.0, TAU);
            placements.push(Placement {
                center: Point2D::new(x, y),
                base_radius,
                shape: self.blob_params(n_points, angle_offset),
                color,
                opacity,
            });
        }

        placements
            .into_par_iter()
            .map(|p| -> Result<Shape, EngineError> {
                let outline = contour.generate(p.center, p.base_radius, &p.shape)?;
                Ok(Shape::Fill {
                    outline,
                    color: p.color,
                    opacity: p.opacity,
                })
            })
            .collect()
    }
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
