//! `blobs`: soft filled color blobs without outlines.

use organic_core::{Bounds, EngineError};
use serde_json::{json, Value};

use crate::color::SceneColors;
use crate::generator::Generator;
use crate::layers::{BlobLayer, BLOB_SEED_OFFSET};
use crate::margin::{margin_from_json, margin_schema, validate_margin};
use crate::prng::Xorshift64;
use crate::scene::Scene;

const DEFAULT_MARGIN: f64 = 40.0;

#[derive(Debug, Clone)]
pub struct Blobs {
    margin: f64,
    blobs: BlobLayer,
    colors: SceneColors,
}

impl Blobs {
    pub const NAME: &'static str = "blobs";

    /// Builds a blobs-only generator.
    ///
    /// Returns `EngineError::InvalidParameter` for a negative margin or an
    /// invalid blob layer.
    pub fn new(margin: f64, blobs: BlobLayer, colors: SceneColors) -> Result<Self, EngineError> {
        validate_margin(margin)?;
        blobs.validate("")?;
        Ok(Self {
            margin,
            blobs,
            colors,
        })
    }

    /// Builds from a JSON params object; missing keys use the defaults and
    /// the margin defaults to 40.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        Self::new(
            margin_from_json(params, DEFAULT_MARGIN)?,
            BlobLayer::from_json(params, "", &BlobLayer::default())?,
            SceneColors::from_json(params)?,
        )
    }

    /// Returns the blob layer configuration.
    pub fn blobs(&self) -> &BlobLayer {
        &self.blobs
    }
}

impl Generator for Blobs {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn compose(&self, width: usize, height: usize, seed: u64) -> Result<Scene, EngineError> {
        let bounds = Bounds::canvas(width, height, self.margin)?;
        let mut rng = Xorshift64::new(seed);
        let mut scene = Scene::new(width, height, self.colors.bg);
        scene.shapes = self.blobs.draw(
            seed.wrapping_add(BLOB_SEED_OFFSET),
            &bounds,
            &self.colors.fills,
            &mut rng,
        )?;
        Ok(scene)
    }

    fn params(&self) -> Value {
        let mut map = self.blobs.params("");
        map.insert("margin".into(), json!(self.margin));
        if let Value::Object(colors) = self.colors.to_json() {
            map.extend(colors);
        }
        Value::Object(map)
    }

    fn param_schema(&self) -> Value {
        let mut map = BlobLayer::schema("", &BlobLayer::default());
        map.extend(margin_schema(DEFAULT_MARGIN));
        Value::Object(map)
    }

    fn quality_warnings(&self) -> Vec<String> {
        self.blobs.field.quality_warnings()
    }
}
