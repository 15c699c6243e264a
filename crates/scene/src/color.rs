//! Scene colors: hex parsing and the five-slot scene palette.

use organic_core::params::param_string;
use organic_core::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

/// sRGB color with components in [0, 1]. Serializes as `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    /// Parses `"#ff00aa"` or `"ff00aa"`, case insensitive.
    ///
    /// Returns `EngineError::InvalidColor` for anything else.
    pub fn from_hex(hex: &str) -> Result<Srgb, EngineError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 hex digits in '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, label: &str| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| EngineError::InvalidColor(format!("invalid {label} in '{hex}': {e}")))
        };
        Ok(Srgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// `"#rrggbb"`, quantized to 8 bits per channel.
    pub fn to_hex(self) -> String {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

const DEFAULT_BG: &str = "#0b0c10";
const DEFAULT_STROKE: &str = "#f5f5f5";
const DEFAULT_C1: &str = "#161e54";
const DEFAULT_C2: &str = "#f16d34";
const DEFAULT_C3: &str = "#ff986a";

/// Background, line stroke, and the three fill colors blobs pick from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneColors {
    pub bg: Srgb,
    pub stroke: Srgb,
    pub fills: [Srgb; 3],
}

impl Default for SceneColors {
    fn default() -> Self {
        Self::from_json(&Value::Null).expect("default scene hex values are valid")
    }
}

impl SceneColors {
    /// Reads `bg`, `stroke`, `c1`, `c2`, `c3` from a params object.
    ///
    /// Missing keys use the defaults; present but malformed colors fail.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        let read = |key: &str, default: &str| Srgb::from_hex(&param_string(params, key, default)?);
        Ok(Self {
            bg: read("bg", DEFAULT_BG)?,
            stroke: read("stroke", DEFAULT_STROKE)?,
            fills: [
                read("c1", DEFAULT_C1)?,
                read("c2", DEFAULT_C2)?,
                read("c3", DEFAULT_C3)?,
            ],
        })
    }

    /// Returns the five colors as hex strings under their param keys.
    pub fn to_json(&self) -> Value {
        json!({
            "bg": self.bg.to_hex(),
            "stroke": self.stroke.to_hex(),
            "c1": self.fills[0].to_hex(),
            "c2": self.fills[1].to_hex(),
            "c3": self.fills[2].to_hex(),
        })
    }
}
