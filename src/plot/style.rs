use svg::node::element::path::Data;
use svg::node::element::{Circle, Path};

use super::color::Rgb;

pub fn point_marker(cx: f64, cy: f64, radius: f64, color: &Rgb) -> Circle {
    Circle::new()
        .set("cx", cx)
        .set("cy", cy)
        .set("r", radius)
        .set("stroke", "none")
        .set("fill", color.to_hex())
}

pub fn path_open(path_data: Data, color: Option<&str>, weight: Option<f64>) -> Path {
    let col = color.unwrap_or("black");
    let stroke_width = weight.unwrap_or(1.0);
    Path::new()
        .set("stroke", col)
        .set("fill", "none")
        .set("stroke-width", stroke_width)
        .set("d", path_data)
}
