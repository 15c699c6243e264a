//! Failures of the `organic` binary and the exit code each one maps to.
//!
//! | code | meaning |
//! |---|---|
//! | 0 | success |
//! | 2 | argument parse error, reported by clap before `run` |
//! | 10 | generator or geometry rejected its configuration |
//! | 11 | an SVG or recipe file could not be read or written |
//! | 12 | the invocation is incomplete or its JSON is malformed |
//! | 13 | a result could not be serialized |

use std::path::Path;

use organic_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Unknown generator, out-of-range or mistyped parameter, bad canvas.
    #[error("{0}")]
    Engine(EngineError),
    /// File access, with the offending path in the message.
    #[error("{0}")]
    Io(String),
    /// Missing generator, seed or seeds; malformed `--params` or recipe.
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }

    /// An input error for a value the invocation never supplied, listing
    /// where it could have come from.
    pub fn missing(what: &str, sources: &str) -> Self {
        CliError::Input(format!("missing {what}: {sources}"))
    }

    /// An I/O error prefixed with the path it concerns.
    pub fn file(path: &Path, err: impl std::fmt::Display) -> Self {
        CliError::Io(format!("{}: {err}", path.display()))
    }

    /// A recipe file that exists but does not describe a recipe.
    pub fn bad_recipe(path: &Path, err: impl std::fmt::Display) -> Self {
        CliError::Input(format!("invalid recipe {}: {err}", path.display()))
    }
}

impl From<EngineError> for CliError {
    /// Failed SVG writes surface from the scene crate as `EngineError::Io`
    /// and keep the I/O exit code.
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Io(msg),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use organic_scene::{random_seedlist, GeneratorKind, Recipe};
    use std::error::Error as _;

    #[test]
    fn missing_seed_is_input_error_naming_sources() {
        let err = CliError::missing("seed", "pass --seed or set GEN_SEED");
        assert_eq!(err.exit_code(), 12);
        assert_eq!(err.to_string(), "missing seed: pass --seed or set GEN_SEED");
    }

    #[test]
    fn unparsable_recipe_is_input_error_with_path() {
        let parse = serde_json::from_str::<Recipe>(r#"{"generator": "blobs"}"#).unwrap_err();
        let err = CliError::bad_recipe(Path::new("piece.json"), parse);
        assert_eq!(err.exit_code(), 12);
        let msg = err.to_string();
        assert!(msg.starts_with("invalid recipe piece.json:"), "{msg}");
        assert!(msg.contains("width"), "{msg}");
    }

    #[test]
    fn unreadable_recipe_is_io_error_with_path() {
        let err = CliError::file(Path::new("/no/such/recipe.json"), "not found");
        assert_eq!(err.exit_code(), 11);
        assert_eq!(err.to_string(), "/no/such/recipe.json: not found");
    }

    #[test]
    fn unknown_generator_keeps_engine_code() {
        let err: CliError = GeneratorKind::from_name("line-cuts", &serde_json::json!({}))
            .unwrap_err()
            .into();
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("line-cuts"));
    }

    #[test]
    fn mistyped_param_keeps_engine_code() {
        let err: CliError = GeneratorKind::from_name("flowfield", &serde_json::json!({"steps": -10}))
            .unwrap_err()
            .into();
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("steps"));
    }

    #[test]
    fn svg_write_failure_routes_to_io_code() {
        let err = CliError::from(EngineError::Io("out/blobs_7.svg: disk full".into()));
        assert!(matches!(err, CliError::Io(_)));
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn inverted_seed_range_message_survives_conversion() {
        let engine = random_seedlist(5, 100, 3, 42).unwrap_err();
        let err = CliError::Input(engine.to_string());
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("100 is greater than max 3"));
    }

    #[test]
    fn serialization_error_code_and_std_error_impl() {
        let err = CliError::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert_eq!(err.exit_code(), 13);
        assert!(err.source().is_none());
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(!boxed.to_string().is_empty());
    }
}
