//! What a generator hands to the serializer: a sized canvas, a background
//! and an ordered list of styled shapes, painted first to last.

use organic_core::{BlobOutline, Polyline};
use serde::Serialize;

use crate::color::Srgb;

/// A styled shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// An open traced line, stroked without fill.
    Stroke {
        polyline: Polyline,
        color: Srgb,
        width: f64,
        opacity: f64,
    },
    /// A closed blob, filled without stroke.
    Fill {
        outline: BlobOutline,
        color: Srgb,
        opacity: f64,
    },
}

/// One composed piece.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    pub background: Srgb,
    pub shapes: Vec<Shape>,
}

impl Scene {
    /// An empty scene over a solid background.
    pub fn new(width: usize, height: usize, background: Srgb) -> Self {
        Self {
            width,
            height,
            background,
            shapes: Vec::new(),
        }
    }

    /// Returns the number of flow-line strokes.
    pub fn stroke_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Stroke { .. }))
            .count()
    }

    /// Returns the number of filled blobs.
    pub fn fill_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Fill { .. }))
            .count()
    }
}
