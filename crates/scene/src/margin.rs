//! The canvas margin shared by every generator: start points and blob
//! centers are drawn inside it, and traces stop at it.

use organic_core::params::param_f64;
use organic_core::EngineError;
use serde_json::{json, Map, Value};

/// Reads `margin`, or `default` when absent.
pub fn margin_from_json(params: &Value, default: f64) -> Result<f64, EngineError> {
    param_f64(params, "margin", default)
}

/// Rejects negative or non-finite margins. Whether the margin fits the
/// canvas is only known at compose time.
pub fn validate_margin(margin: f64) -> Result<(), EngineError> {
    if margin.is_finite() && margin >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid_param(
            "margin",
            format!("must be finite and non-negative, got {margin}"),
        ))
    }
}

/// Schema entry for `margin` advertising `default`.
pub fn margin_schema(default: f64) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(
        "margin".into(),
        json!({
            "type": "number",
            "default": default,
            "min": 0.0,
            "max": 500.0,
            "description": "Inset from the canvas edge for starts, centers and trace bounds"
        }),
    );
    map
}
