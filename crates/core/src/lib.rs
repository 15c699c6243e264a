#![deny(unsafe_code)]
//! Procedural geometry engine for organic vector art.
//!
//! A seeded lattice hash feeds smooth value noise, which is layered into a
//! fractal field (fBm). The field steers flow-line traces and perturbs the
//! radius of blob outlines that are smoothed into closed cubic splines.
//! Everything here is a pure function of its inputs: no I/O, no shared
//! mutable state.

pub mod api;
pub mod blob;
pub mod error;
pub mod field;
pub mod flow;
pub mod fractal;
pub mod geometry;
pub mod hash;
pub mod noise;
pub mod params;
pub mod spline;

pub use api::{build_blob_outline, noise, trace_flow_line};
pub use blob::{BlobContour, BlobOutline, BlobParams};
pub use error::EngineError;
pub use field::ScalarField;
pub use flow::{FlowParams, FlowTracer, MIN_RENDER_POINTS};
pub use fractal::{FieldParams, FractalField};
pub use geometry::{BezierSegment, Bounds, Point2D, Polyline};
pub use noise::ValueNoise;
