//! SVG serialization of a [`Scene`].

use std::path::Path;

use organic_core::{BezierSegment, EngineError, Point2D, Polyline};

use crate::scene::{Scene, Shape};

/// Decimal places used by [`render_svg`]. Path data never uses fewer.
pub const DEFAULT_PRECISION: usize = 2;

fn coord(p: Point2D, precision: usize) -> String {
    format!("{:.*},{:.*}", precision, p.x, precision, p.y)
}

/// `M x,y C c1x,c1y c2x,c2y px,py ... Z` for a closed outline, one `C`
/// command per segment in order. Empty input gives an empty string.
pub fn path_data(segments: &[BezierSegment], precision: usize) -> String {
    let precision = precision.max(DEFAULT_PRECISION);
    let Some(first) = segments.first() else {
        return String::new();
    };
    let mut parts = Vec::with_capacity(segments.len() + 2);
    parts.push(format!("M {}", coord(first.start(), precision)));
    for seg in segments {
        parts.push(format!(
            "C {} {} {}",
            coord(seg.c1, precision),
            coord(seg.c2, precision),
            coord(seg.p1, precision)
        ));
    }
    parts.push("Z".to_owned());
    parts.join(" ")
}

/// Space-separated `x,y` pairs for a `<polyline points="...">` attribute.
pub fn points_attr(polyline: &Polyline) -> String {
    polyline
        .points()
        .iter()
        .map(|p| coord(*p, DEFAULT_PRECISION))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the scene as a standalone SVG document. Shapes are emitted in
/// order, so later shapes paint over earlier ones.
pub fn render_svg(scene: &Scene) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = scene.width,
        h = scene.height
    ));
    out.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
        scene.background.to_hex()
    ));
    for shape in &scene.shapes {
        match shape {
            Shape::Stroke {
                polyline,
                color,
                width,
                opacity,
            } => out.push_str(&format!(
                "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{width}\" \
                 stroke-opacity=\"{opacity:.3}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>\n",
                points_attr(polyline),
                color.to_hex()
            )),
            Shape::Fill {
                outline,
                color,
                opacity,
            } => out.push_str(&format!(
                "<path d=\"{}\" fill=\"{}\" fill-opacity=\"{opacity:.3}\" stroke=\"none\"/>\n",
                path_data(&outline.segments, DEFAULT_PRECISION),
                color.to_hex()
            )),
        }
    }
    out.push_str("</svg>\n");
    out
}

/// Writes [`render_svg`] output to `path`.
///
/// Returns `EngineError::Io` on write failure.
pub fn write_svg(scene: &Scene, path: &Path) -> Result<(), EngineError> {
    std::fs::write(path, render_svg(scene))
        .map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Srgb;
    use glam::DVec2;
    use organic_core::spline::catmull_rom_to_beziers;
    use organic_core::BlobOutline;

    fn square_segments() -> Vec<BezierSegment> {
        let pts = [
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(0.0, 10.0),
        ];
        catmull_rom_to_beziers(&pts, true, 0.0).unwrap()
    }

    fn color(hex: &str) -> Srgb {
        Srgb::from_hex(hex).unwrap()
    }

    #[test]
    fn path_data_for_zero_tension_square() {
        // Tension 0 puts both control points on the segment endpoints.
        let d = path_data(&square_segments(), 2);
        assert_eq!(
            d,
            "M 0.00,0.00 \
             C 0.00,0.00 10.00,0.00 10.00,0.00 \
             C 10.00,0.00 10.00,10.00 10.00,10.00 \
             C 10.00,10.00 0.00,10.00 0.00,10.00 \
             C 0.00,10.00 0.00,0.00 0.00,0.00 Z"
        );
    }

    #[test]
    fn path_data_has_one_curve_per_segment() {
        let segs = square_segments();
        let d = path_data(&segs, 3);
        assert!(d.starts_with("M 0.000,0.000"));
        assert!(d.ends_with(" Z"));
        assert_eq!(d.matches('C').count(), segs.len());
    }

    #[test]
    fn path_data_precision_floor_is_two() {
        let d = path_data(&square_segments(), 0);
        assert!(d.starts_with("M 0.00,0.00"));
    }

    #[test]
    fn path_data_empty() {
        assert_eq!(path_data(&[], 2), "");
    }

    #[test]
    fn points_attr_formats_pairs() {
        let line = Polyline::new(vec![DVec2::new(1.0, 2.5), DVec2::new(3.126, -4.0)]);
        assert_eq!(points_attr(&line), "1.00,2.50 3.13,-4.00");
    }

    fn sample_scene() -> Scene {
        let mut scene = Scene::new(120, 80, color("#0b0c10"));
        scene.shapes.push(Shape::Fill {
            outline: BlobOutline {
                ring: vec![],
                segments: square_segments(),
            },
            color: color("#f16d34"),
            opacity: 0.5,
        });
        scene.shapes.push(Shape::Stroke {
            polyline: Polyline::new(vec![DVec2::new(1.0, 1.0), DVec2::new(2.0, 2.0)]),
            color: color("#f5f5f5"),
            width: 0.8,
            opacity: 0.125,
        });
        scene
    }

    #[test]
    fn render_svg_structure() {
        let svg = render_svg(&sample_scene());
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"120\" height=\"80\""));
        assert!(svg.contains("fill=\"#0b0c10\""));
        assert!(svg.contains("<path d=\"M 0.00,0.00 C"));
        assert!(svg.contains("fill=\"#f16d34\" fill-opacity=\"0.500\" stroke=\"none\""));
        assert!(svg.contains("points=\"1.00,1.00 2.00,2.00\" fill=\"none\" stroke=\"#f5f5f5\""));
        assert!(svg.contains("stroke-width=\"0.8\""));
        assert!(svg.contains("stroke-linecap=\"round\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn render_svg_keeps_shape_order() {
        let svg = render_svg(&sample_scene());
        let path_at = svg.find("<path").unwrap();
        let line_at = svg.find("<polyline").unwrap();
        assert!(path_at < line_at);
    }

    #[test]
    fn write_svg_round_trip() {
        let scene = sample_scene();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("piece.svg");

        write_svg(&scene, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_svg(&scene));
    }

    #[test]
    fn write_svg_to_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("piece.svg");
        assert!(matches!(
            write_svg(&sample_scene(), &path),
            Err(EngineError::Io(_))
        ));
    }
}
