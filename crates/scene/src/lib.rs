#![deny(unsafe_code)]
//! Generator registry and SVG output for organic vector art.
//!
//! This crate sits between `organic-core` (fields, traces, blob outlines)
//! and the `organic` CLI. It places shapes on a canvas with a seeded PRNG,
//! collects them into a [`Scene`] and serializes scenes as SVG.

pub mod batch;
pub mod blobs;
pub mod color;
pub mod flowfield;
pub mod flowfield_blobs;
pub mod generator;
pub mod layers;
pub mod margin;
pub mod prng;
pub mod recipe;
pub mod scene;
pub mod svg;

pub use batch::render_batch;
pub use color::{SceneColors, Srgb};
pub use generator::Generator;
pub use recipe::{random_seedlist, resolve_seed, Recipe};
pub use scene::{Scene, Shape};
pub use svg::{render_svg, write_svg};

use organic_core::EngineError;
use serde_json::Value;

use blobs::Blobs;
use flowfield::Flowfield;
use flowfield_blobs::FlowfieldBlobs;

/// All available generator names.
const GENERATOR_NAMES: &[&str] = &[Flowfield::NAME, Blobs::NAME, FlowfieldBlobs::NAME];

/// Enumeration of all available generators.
///
/// Wraps each generator and delegates `Generator` trait methods.
/// Use [`GeneratorKind::from_name`] for string-based construction.
#[derive(Debug, Clone)]
pub enum GeneratorKind {
    Flowfield(Flowfield),
    Blobs(Blobs),
    FlowfieldBlobs(FlowfieldBlobs),
}

impl GeneratorKind {
    /// Constructs a generator by name from a JSON params object.
    ///
    /// Returns `EngineError::UnknownGenerator` if the name is not recognized.
    pub fn from_name(name: &str, params: &Value) -> Result<Self, EngineError> {
        match name {
            Flowfield::NAME => Ok(GeneratorKind::Flowfield(Flowfield::from_json(params)?)),
            Blobs::NAME => Ok(GeneratorKind::Blobs(Blobs::from_json(params)?)),
            FlowfieldBlobs::NAME => Ok(GeneratorKind::FlowfieldBlobs(
                FlowfieldBlobs::from_json(params)?,
            )),
            _ => Err(EngineError::UnknownGenerator(name.to_string())),
        }
    }

    /// Returns a slice of all recognized generator names.
    pub fn list_generators() -> &'static [&'static str] {
        GENERATOR_NAMES
    }
}

impl Generator for GeneratorKind {
    fn name(&self) -> &'static str {
        match self {
            GeneratorKind::Flowfield(g) => g.name(),
            GeneratorKind::Blobs(g) => g.name(),
            GeneratorKind::FlowfieldBlobs(g) => g.name(),
        }
    }

    fn compose(&self, width: usize, height: usize, seed: u64) -> Result<Scene, EngineError> {
        match self {
            GeneratorKind::Flowfield(g) => g.compose(width, height, seed),
            GeneratorKind::Blobs(g) => g.compose(width, height, seed),
            GeneratorKind::FlowfieldBlobs(g) => g.compose(width, height, seed),
        }
    }

    fn params(&self) -> Value {
        match self {
            GeneratorKind::Flowfield(g) => g.params(),
            GeneratorKind::Blobs(g) => g.params(),
            GeneratorKind::FlowfieldBlobs(g) => g.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            GeneratorKind::Flowfield(g) => g.param_schema(),
            GeneratorKind::Blobs(g) => g.param_schema(),
            GeneratorKind::FlowfieldBlobs(g) => g.param_schema(),
        }
    }

    fn quality_warnings(&self) -> Vec<String> {
        match self {
            GeneratorKind::Flowfield(g) => g.quality_warnings(),
            GeneratorKind::Blobs(g) => g.quality_warnings(),
            GeneratorKind::FlowfieldBlobs(g) => g.quality_warnings(),
        }
    }
}
