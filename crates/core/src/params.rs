//! Typed lookups into a `serde_json::Value` parameter object.
//!
//! Generator configs are assembled from user-supplied JSON. A missing key
//! (or an explicit `null`) takes the caller's default. A key that is
//! present but cannot be read as the requested type is an
//! `EngineError::InvalidParameter` naming the key, never a silent default.
//! Range checks happen later, in each config's `validate`.

use crate::error::EngineError;
use serde_json::Value;

/// Looks up `name`, treating `null` like a missing key.
fn lookup<'a>(params: &'a Value, name: &str) -> Option<&'a Value> {
    params.get(name).filter(|v| !v.is_null())
}

/// Converts a present value with `read`, or returns `default` when absent.
///
/// Returns `EngineError::InvalidParameter` mentioning `expected` when the
/// value is present but `read` rejects it.
fn read_or<T>(
    params: &Value,
    name: &str,
    default: T,
    expected: &str,
    read: impl FnOnce(&Value) -> Option<T>,
) -> Result<T, EngineError> {
    match lookup(params, name) {
        None => Ok(default),
        Some(value) => read(value)
            .ok_or_else(|| EngineError::invalid_param(name, format!("expected {expected}, got {value}"))),
    }
}

/// `params[name]` as `f64`. Integers are widened.
///
/// Returns an error for any present non-numeric value.
pub fn param_f64(params: &Value, name: &str, default: f64) -> Result<f64, EngineError> {
    read_or(params, name, default, "a number", Value::as_f64)
}

/// `params[name]` as `usize`, for non-negative integers only.
///
/// Returns an error for negative, fractional or non-numeric values.
pub fn param_usize(params: &Value, name: &str, default: usize) -> Result<usize, EngineError> {
    read_or(params, name, default, "a non-negative integer", |v| {
        v.as_u64().and_then(|n| usize::try_from(n).ok())
    })
}

/// `params[name]` as `u32`, for non-negative integers that fit.
///
/// Returns an error for negative, fractional, oversized or non-numeric
/// values.
pub fn param_u32(params: &Value, name: &str, default: u32) -> Result<u32, EngineError> {
    read_or(params, name, default, "a non-negative 32-bit integer", |v| {
        v.as_u64().and_then(|n| u32::try_from(n).ok())
    })
}

/// `params[name]` as `bool`. Only JSON booleans are accepted.
pub fn param_bool(params: &Value, name: &str, default: bool) -> Result<bool, EngineError> {
    read_or(params, name, default, "a boolean", Value::as_bool)
}

/// `params[name]` as an owned `String`.
pub fn param_string(params: &Value, name: &str, default: &str) -> Result<String, EngineError> {
    read_or(params, name, default.to_owned(), "a string", |v| {
        v.as_str().map(String::from)
    })
}
