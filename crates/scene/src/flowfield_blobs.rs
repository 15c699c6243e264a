//! `flowfield-blobs`: a layer of blobs under a dense layer of flow lines.
//!
//! Blob keys carry a `blob_` prefix (`blob_octaves`, `blob_min_r`, ...) so
//! they can sit next to the line keys in one params object. Both layers
//! draw from one placement stream, blobs first; `blobs_on_top` only changes
//! the paint order.

use organic_core::params::param_bool;
use organic_core::{Bounds, EngineError, FieldParams, FlowParams};
use serde_json::{json, Value};

use crate::color::SceneColors;
use crate::generator::Generator;
use crate::layers::{BlobLayer, LineLayer, BLOB_SEED_OFFSET};
use crate::margin::{margin_from_json, margin_schema, validate_margin};
use crate::prng::Xorshift64;
use crate::scene::Scene;

const BLOB_PREFIX: &str = "blob_";

fn default_lines() -> LineLayer {
    LineLayer {
        opacity_max: 0.18,
        field: FieldParams::with_octaves(6),
        flow: FlowParams {
            steps: 190,
            step_length: 3.0,
            field_scale: 0.0046,
            ..FlowParams::default()
        },
        ..LineLayer::default()
    }
}

fn default_blobs() -> BlobLayer {
    BlobLayer {
        n_blobs: 22,
        min_r: 30.0,
        max_r: 120.0,
        points_min: 10,
        points_max: 18,
        roughness: 0.60,
        tension: 0.90,
        opacity_min: 0.45,
        opacity_max: 0.80,
        field: FieldParams::with_octaves(5),
        ..BlobLayer::default()
    }
}

#[derive(Debug, Clone)]
pub struct FlowfieldBlobs {
    margin: f64,
    blobs: BlobLayer,
    lines: LineLayer,
    blobs_on_top: bool,
    colors: SceneColors,
}

impl FlowfieldBlobs {
    pub const NAME: &'static str = "flowfield-blobs";

    /// Builds the layered generator. Blob settings are validated under
    /// their `blob_` names so errors point at the key the user wrote.
    pub fn new(
        margin: f64,
        blobs: BlobLayer,
        lines: LineLayer,
        blobs_on_top: bool,
        colors: SceneColors,
    ) -> Result<Self, EngineError> {
        validate_margin(margin)?;
        blobs.validate(BLOB_PREFIX)?;
        lines.validate()?;
        Ok(Self {
            margin,
            blobs,
            lines,
            blobs_on_top,
            colors,
        })
    }

    /// Builds from a JSON params object; blob keys other than `n_blobs` are
    /// read with the `blob_` prefix.
    ///
    /// Returns `EngineError::InvalidParameter` for a key of the wrong type.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        Self::new(
            margin_from_json(params, 0.0)?,
            BlobLayer::from_json(params, BLOB_PREFIX, &default_blobs())?,
            LineLayer::from_json(params, &default_lines())?,
            param_bool(params, "blobs_on_top", false)?,
            SceneColors::from_json(params)?,
        )
    }

    pub fn blobs(&self) -> &BlobLayer {
        &self.blobs
    }

    pub fn lines(&self) -> &LineLayer {
        &self.lines
    }
}

impl Generator for FlowfieldBlobs {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn compose(&self, width: usize, height: usize, seed: u64) -> Result<Scene, EngineError> {
        let bounds = Bounds::canvas(width, height, self.margin)?;
        let mut rng = Xorshift64::new(seed);
        let blobs = self.blobs.draw(
            seed.wrapping_add(BLOB_SEED_OFFSET),
            &bounds,
            &self.colors.fills,
            &mut rng,
        )?;
        // Lines are stroked in c2.
        let lines = self
            .lines
            .draw(seed, &bounds, self.colors.fills[1], &mut rng)?;

        let mut scene = Scene::new(width, height, self.colors.bg);
        if self.blobs_on_top {
            scene.shapes = lines;
            scene.shapes.extend(blobs);
        } else {
            scene.shapes = blobs;
            scene.shapes.extend(lines);
        }
        Ok(scene)
    }

    fn params(&self) -> Value {
        let mut map = self.lines.params();
        map.extend(self.blobs.params(BLOB_PREFIX));
        map.insert("margin".into(), json!(self.margin));
        map.insert("blobs_on_top".into(), json!(self.blobs_on_top));
        if let Value::Object(colors) = self.colors.to_json() {
            map.extend(colors);
        }
        Value::Object(map)
    }

    fn param_schema(&self) -> Value {
        let mut map = LineLayer::schema(&default_lines());
        map.extend(BlobLayer::schema(BLOB_PREFIX, &default_blobs()));
        map.extend(margin_schema(0.0));
        map.insert(
            "blobs_on_top".into(),
            json!({
                "type": "boolean",
                "default": false,
                "description": "Paint blobs over the lines instead of under them"
            }),
        );
        Value::Object(map)
    }

    fn quality_warnings(&self) -> Vec<String> {
        let mut warnings = self.lines.field.quality_warnings();
        warnings.extend(
            self.blobs
                .field
                .quality_warnings()
                .into_iter()
                .map(|w| format!("blob field: {w}")),
        );
        warnings
    }
}
