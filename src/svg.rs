//! SVG export of a rendered surface

use crate::render::{Element, Surface};
use crate::scene::ShapePath;
use std::fmt::Write;

fn path_data(paths: &[ShapePath]) -> String {
    let mut d = String::new();
    for path in paths {
        for (i, p) in path.points.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{}{:.2},{:.2}", cmd, p.x, p.y);
        }
        if path.closed {
            d.push('Z');
        }
    }
    d
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Serialize the surface: base shapes group first, markers group on top
pub fn to_svg(surface: &Surface, title: &str) -> String {
    let (width, height) = surface.size();
    let origin = surface.origin();

    let mut base = String::new();
    let mut markers = String::new();
    for element in surface.elements() {
        match element {
            Element::BaseShape { paths, style } => {
                let _ = writeln!(
                    base,
                    r#"    <path class="{}" d="{}" fill="{}" stroke="{}"/>"#,
                    element.class(),
                    path_data(paths),
                    style.fill.hex(),
                    style.stroke.hex(),
                );
            }
            Element::Marker { center, style } => {
                let _ = writeln!(
                    markers,
                    r#"    <circle class="{}" cx="{:.2}" cy="{:.2}" r="{}" fill="{}" opacity="{}"/>"#,
                    element.class(),
                    center.x,
                    center.y,
                    style.radius,
                    style.fill.hex(),
                    style.opacity,
                );
            }
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        width, height
    );
    let _ = writeln!(out, "<title>{}</title>", escape(title));
    let _ = writeln!(out, r#"<g transform="translate({}, {})">"#, origin.x, origin.y);
    let _ = write!(out, "  <g>\n{}  </g>\n", base);
    let _ = write!(out, "  <g>\n{}  </g>\n", markers);
    out.push_str("</g>\n</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::map::MapView;
    use crate::scene::fixtures;
    use crate::world;

    #[test]
    fn svg_has_surface_size_and_classes_in_paint_order() {
        let mut view = MapView::new(&MapConfig::default());
        view.load(&world::continents(), &fixtures::sites());
        let svg = to_svg(view.surface(), "Launch sites");

        assert!(svg.contains(r#"width="750" height="540""#));
        assert!(svg.contains(r#"translate(100, 20)"#));
        assert_eq!(svg.matches(r#"class="marker""#).count(), 3);
        assert_eq!(svg.matches(r#"class="base-shape""#).count(), world::continents().len());

        let last_base = svg.rfind("base-shape").unwrap();
        let first_marker = svg.find(r#"class="marker""#).unwrap();
        assert!(last_base < first_marker);
    }

    #[test]
    fn closed_rings_end_with_z() {
        let paths = vec![ShapePath {
            points: vec![
                crate::projection::Point::new(0.0, 0.0),
                crate::projection::Point::new(1.0, 0.5),
            ],
            closed: true,
        }];
        assert_eq!(path_data(&paths), "M0.00,0.00L1.00,0.50Z");
    }

    #[test]
    fn title_is_escaped() {
        let view = MapView::new(&MapConfig::default());
        let svg = to_svg(view.surface(), "a < b & c");
        assert!(svg.contains("<title>a &lt; b &amp; c</title>"));
    }
}
