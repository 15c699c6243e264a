//! `flowfield`: light strokes traced through a fractal field on a dark
//! background.

use organic_core::{Bounds, EngineError};
use serde_json::{json, Value};

use crate::color::SceneColors;
use crate::generator::Generator;
use crate::layers::LineLayer;
use crate::margin::{margin_from_json, margin_schema, validate_margin};
use crate::prng::Xorshift64;
use crate::scene::Scene;

/// Flow lines only, stroked in the scene's `stroke` color.
#[derive(Debug, Clone)]
pub struct Flowfield {
    margin: f64,
    lines: LineLayer,
    colors: SceneColors,
}

impl Flowfield {
    pub const NAME: &'static str = "flowfield";

    /// Builds a lines-only generator.
    ///
    /// Returns an error for a negative margin or an invalid line layer.
    pub fn new(margin: f64, lines: LineLayer, colors: SceneColors) -> Result<Self, EngineError> {
        validate_margin(margin)?;
        lines.validate()?;
        Ok(Self {
            margin,
            lines,
            colors,
        })
    }

    /// Builds from a JSON params object; missing keys use the defaults.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        Self::new(
            margin_from_json(params, 0.0)?,
            LineLayer::from_json(params, &LineLayer::default())?,
            SceneColors::from_json(params)?,
        )
    }

    /// Returns the line layer configuration.
    pub fn lines(&self) -> &LineLayer {
        &self.lines
    }
}

impl Generator for Flowfield {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn compose(&self, width: usize, height: usize, seed: u64) -> Result<Scene, EngineError> {
        let bounds = Bounds::canvas(width, height, self.margin)?;
        let mut rng = Xorshift64::new(seed);
        let mut scene = Scene::new(width, height, self.colors.bg);
        scene.shapes = self
            .lines
            .draw(seed, &bounds, self.colors.stroke, &mut rng)?;
        Ok(scene)
    }

    fn params(&self) -> Value {
        let mut map = self.lines.params();
        map.insert("margin".into(), json!(self.margin));
        if let Value::Object(colors) = self.colors.to_json() {
            map.extend(colors);
        }
        Value::Object(map)
    }

    fn param_schema(&self) -> Value {
        let mut map = LineLayer::schema(&LineLayer::default());
        map.extend(margin_schema(0.0));
        Value::Object(map)
    }

    fn quality_warnings(&self) -> Vec<String> {
        self.lines.field.quality_warnings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Shape;

    fn small(extra: Value) -> Flowfield {
        let mut params = json!({"n_lines": 80});
        if let (Value::Object(base), Value::Object(more)) = (&mut params, extra) {
            base.extend(more);
        }
        Flowfield::from_json(&params).unwrap()
    }

    #[test]
    fn empty_json_uses_defaults() {
        let generator = Flowfield::from_json(&json!({})).unwrap();
        assert_eq!(generator.lines().n_lines, 1400);
        assert_eq!(generator.lines().field.octaves, 5);
        assert_eq!(generator.params()["margin"], 0.0);
        assert_eq!(generator.params()["stroke"], "#f5f5f5");
    }

    #[test]
    fn compose_strokes_in_stroke_color_on_background() {
        let generator = small(json!({"stroke": "#ffffff", "bg": "#000000"}));
        let scene = generator.compose(320, 240, 42).unwrap();
        assert_eq!(scene.background.to_hex(), "#000000");
        assert_eq!(scene.fill_count(), 0);
        assert!(scene.stroke_count() > 0);
        for shape in &scene.shapes {
            if let Shape::Stroke { color, width, .. } = shape {
                assert_eq!(color.to_hex(), "#ffffff");
                assert_eq!(*width, 0.8);
            }
        }
    }

    #[test]
    fn same_seed_same_scene() {
        let generator = small(json!({}));
        let a = generator.compose(200, 200, 7).unwrap();
        let b = generator.compose(200, 200, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let generator = small(json!({}));
        let a = generator.compose(200, 200, 7).unwrap();
        let b = generator.compose(200, 200, 8).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn margin_keeps_lines_off_the_edge() {
        let generator = small(json!({"margin": 30.0}));
        let scene = generator.compose(200, 200, 3).unwrap();
        for shape in &scene.shapes {
            if let Shape::Stroke { polyline, .. } = shape {
                assert!(polyline
                    .points()
                    .iter()
                    .all(|p| (30.0..=170.0).contains(&p.x) && (30.0..=170.0).contains(&p.y)));
            }
        }
    }

    #[test]
    fn oversized_margin_fails_at_compose() {
        let generator = small(json!({"margin": 150.0}));
        assert!(matches!(
            generator.compose(200, 200, 1),
            Err(EngineError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let generator = small(json!({}));
        assert!(matches!(
            generator.compose(0, 200, 1),
            Err(EngineError::InvalidDimensions)
        ));
    }

    #[test]
    fn bad_color_is_rejected() {
        assert!(matches!(
            Flowfield::from_json(&json!({"stroke": "#12"})),
            Err(EngineError::InvalidColor(_))
        ));
    }

    #[test]
    fn high_gain_warns_but_builds() {
        let generator = Flowfield::from_json(&json!({"gain": 1.2})).unwrap();
        assert_eq!(generator.quality_warnings().len(), 1);
    }

    #[test]
    fn schema_covers_every_numeric_param() {
        let generator = small(json!({}));
        let schema = generator.param_schema();
        for (key, value) in generator.params().as_object().unwrap() {
            if value.is_number() {
                assert!(schema.get(key).is_some(), "schema missing parameter: {key}");
            }
        }
    }
}
