use svg::node::element::path::Data;
use svg::node::element::{Group, Text};

use super::axis::ViewBounds;
use super::render::SvgContext;
use super::style::path_open;

/// Round a tick value for display, dropping trailing zeros.
///
/// # Examples
///
/// ```
/// # use scattertk::plot::component::format_tick;
/// assert_eq!(format_tick(2.0), "2");
/// assert_eq!(format_tick(0.12345), "0.123");
/// ```
pub fn format_tick(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}

fn tick_label(x: f64, y: f64, anchor: &str, value: f64) -> Text {
    Text::new(format_tick(value))
        .set("font-family", "Roboto, Open sans, sans-serif")
        .set("font-size", 16)
        .set("text-anchor", anchor)
        .set("dominant-baseline", "middle")
        .set("stroke", "none")
        .set("fill", "black")
        .set("x", x)
        .set("y", y)
}

/// Box around the 2D plot area with the view limits at its corners.
pub fn frame_2d(ctx: &SvgContext, bounds: &ViewBounds) -> Group {
    let (left, bottom) = ctx.to_pixels(0.0, 0.0);
    let (right, top) = ctx.to_pixels(1.0, 1.0);
    let outline = Data::new()
        .move_to((left, top))
        .line_to((right, top))
        .line_to((right, bottom))
        .line_to((left, bottom))
        .close();
    let mut group = Group::new().add(path_open(outline, None, Some(2.0)));
    if bounds.xmin.is_finite() && bounds.xmax.is_finite() {
        group = group
            .add(tick_label(left, bottom + 20.0, "middle", bounds.xmin))
            .add(tick_label(right, bottom + 20.0, "middle", bounds.xmax));
    }
    if bounds.ymin.is_finite() && bounds.ymax.is_finite() {
        group = group
            .add(tick_label(left - 10.0, bottom, "end", bounds.ymin))
            .add(tick_label(left - 10.0, top, "end", bounds.ymax));
    }
    group
}

/// Edges of the 3D view cube as seen from the context's view angles.
pub fn frame_3d(ctx: &SvgContext) -> Group {
    let corner = |x: f64, y: f64, z: f64| {
        let (u, v) = ctx.project(x, y, z);
        ctx.to_pixels(u, v)
    };
    let mut edges = Data::new();
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            edges = edges
                .move_to(corner(-1.0, a, b))
                .line_to(corner(1.0, a, b))
                .move_to(corner(a, -1.0, b))
                .line_to(corner(a, 1.0, b))
                .move_to(corner(a, b, -1.0))
                .line_to(corner(a, b, 1.0));
        }
    }
    Group::new().add(path_open(edges, Some("#999999"), Some(1.0)))
}
