use svg::node::element::{Circle, Group};

use super::chart::Dimensions;
use super::color::Rgb;
use super::style::point_marker;

/// Immediate-mode drawing primitives for point batches.
///
/// Coordinates arrive already transformed by the axes: `[0, 1]` for 2D
/// vertices and `[-1, 1]` for 3D vertices.
pub trait RenderContext {
    fn begin_points(&mut self);
    fn point_size(&mut self, size: f64);
    fn color(&mut self, rgb: Rgb);
    fn vertex2(&mut self, x: f64, y: f64);
    fn vertex3(&mut self, x: f64, y: f64, z: f64);
    fn end(&mut self);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    BeginPoints,
    PointSize(f64),
    Color(Rgb),
    Vertex2(f64, f64),
    Vertex3(f64, f64, f64),
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedPoint {
    pub color: Rgb,
    pub size: f64,
    pub position: [f64; 3],
}

/// Keeps every call it receives, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingContext {
    pub calls: Vec<DrawCall>,
}

impl RecordingContext {
    pub fn new() -> RecordingContext {
        RecordingContext { calls: vec![] }
    }

    /// Replay the calls into the points they would produce.
    pub fn points(&self) -> Vec<RecordedPoint> {
        let mut color = Rgb::BLACK;
        let mut size = 1.0;
        let mut points = vec![];
        for call in self.calls.iter() {
            match call {
                DrawCall::PointSize(s) => size = *s,
                DrawCall::Color(c) => color = *c,
                DrawCall::Vertex2(x, y) => points.push(RecordedPoint {
                    color,
                    size,
                    position: [*x, *y, 0.0],
                }),
                DrawCall::Vertex3(x, y, z) => points.push(RecordedPoint {
                    color,
                    size,
                    position: [*x, *y, *z],
                }),
                DrawCall::BeginPoints | DrawCall::End => (),
            }
        }
        points
    }
}

impl RenderContext for RecordingContext {
    fn begin_points(&mut self) {
        self.calls.push(DrawCall::BeginPoints);
    }
    fn point_size(&mut self, size: f64) {
        self.calls.push(DrawCall::PointSize(size));
    }
    fn color(&mut self, rgb: Rgb) {
        self.calls.push(DrawCall::Color(rgb));
    }
    fn vertex2(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::Vertex2(x, y));
    }
    fn vertex3(&mut self, x: f64, y: f64, z: f64) {
        self.calls.push(DrawCall::Vertex3(x, y, z));
    }
    fn end(&mut self) {
        self.calls.push(DrawCall::End);
    }
}

/// Default 3D view, in degrees: azimuth, elevation.
pub const DEFAULT_VIEW: [f64; 2] = [-37.5, 30.0];

/// Renders point batches as SVG circles.
#[derive(Clone, Debug)]
pub struct SvgContext {
    pub dimensions: Dimensions,
    pub view: [f64; 2],
    size: f64,
    color: Rgb,
    batches: Vec<Vec<Circle>>,
}

impl SvgContext {
    pub fn new(dimensions: Dimensions) -> SvgContext {
        SvgContext {
            dimensions,
            view: DEFAULT_VIEW,
            size: 1.0,
            color: Rgb::BLACK,
            batches: vec![],
        }
    }

    pub fn point_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.len()).sum()
    }

    /// Normalized viewport units to pixels, y pointing down.
    pub fn to_pixels(&self, x: f64, y: f64) -> (f64, f64) {
        let [top, right, bottom, left] = self.dimensions.padding;
        let plot_width = self.dimensions.width - left - right;
        let plot_height = self.dimensions.height - top - bottom;
        (left + x * plot_width, top + (1.0 - y) * plot_height)
    }

    /// Orthographic projection of the view cube onto the viewport.
    pub fn project(&self, x: f64, y: f64, z: f64) -> (f64, f64) {
        let az = self.view[0].to_radians();
        let el = self.view[1].to_radians();
        let u = az.cos() * x + az.sin() * y;
        let v = -el.sin() * az.sin() * x + el.sin() * az.cos() * y + el.cos() * z;
        let half_diagonal = 3f64.sqrt();
        (
            (u / half_diagonal + 1.0) / 2.0,
            (v / half_diagonal + 1.0) / 2.0,
        )
    }

    fn push_point(&mut self, x: f64, y: f64) {
        let (cx, cy) = self.to_pixels(x, y);
        let marker = point_marker(cx, cy, self.size / 2.0, &self.color);
        match self.batches.last_mut() {
            Some(batch) => batch.push(marker),
            None => self.batches.push(vec![marker]),
        }
    }

    pub fn into_group(self) -> Group {
        let mut group = Group::new();
        for batch in self.batches {
            let mut batch_group = Group::new();
            for circle in batch {
                batch_group = batch_group.add(circle);
            }
            group = group.add(batch_group);
        }
        group
    }
}

impl RenderContext for SvgContext {
    fn begin_points(&mut self) {
        self.batches.push(vec![]);
    }
    fn point_size(&mut self, size: f64) {
        self.size = size;
    }
    fn color(&mut self, rgb: Rgb) {
        self.color = rgb;
    }
    fn vertex2(&mut self, x: f64, y: f64) {
        self.push_point(x, y);
    }
    fn vertex3(&mut self, x: f64, y: f64, z: f64) {
        let (px, py) = self.project(x, y, z);
        self.push_point(px, py);
    }
    fn end(&mut self) {}
}
