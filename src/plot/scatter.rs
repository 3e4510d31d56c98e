//! A scatter series: point coordinates, optional per-point colors and the
//! point style, drawn as a batch of point primitives.

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::PlotConfig;
use crate::error;
use crate::utils::extent;

use super::axis::{AxesMode, AxisName, SharedAxes};
use super::color::{resolve_color, ColorSpec, Rgb};
use super::data::{Channels, PointData, ScatterKind};
use super::render::RenderContext;

/// Value passed to [`Scatter::set`].
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Number(f64),
}

impl PropertyValue {
    fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Text(_) => "text",
            PropertyValue::Number(_) => "numeric",
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        PropertyValue::Number(value as f64)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Number(value as f64)
    }
}

#[derive(Clone, Debug)]
struct ScatterState {
    kind: ScatterKind,
    data: PointData,
    point_color: String,
    point_size: f64,
}

/// One plotted point series bound to a set of axes.
///
/// Every public operation holds the series lock for its whole body. When
/// the axes are needed too, they are locked after the series.
#[derive(Debug)]
pub struct Scatter {
    axes: SharedAxes,
    state: Mutex<ScatterState>,
}

/// Map index colors to true colors through the axes color map.
///
/// When the color limits are degenerate they are first set to the extent
/// of `values`.
pub fn index_to_true_color(axes: &SharedAxes, values: &[f64]) -> Vec<Channels> {
    let mut axes = axes.write();
    if axes.clim_is_degenerate() {
        if let Some(limits) = extent(values) {
            debug!("auto-scaling color limits to {:?}", limits);
            axes.clim = limits;
        }
    }
    values
        .iter()
        .map(|value| axes.map_to_color(*value).to_channels())
        .collect()
}

impl Scatter {
    pub fn new(axes: SharedAxes) -> Scatter {
        Scatter {
            axes,
            state: Mutex::new(ScatterState {
                kind: ScatterKind::TwoD,
                data: PointData::default(),
                point_color: String::from("b"),
                point_size: 1.0,
            }),
        }
    }

    /// Create a series with the point style taken from `config`.
    pub fn with_config(axes: SharedAxes, config: &PlotConfig) -> Scatter {
        let scatter = Scatter::new(axes);
        {
            let mut state = scatter.state.lock();
            state.point_color = config.point_color.clone();
            state.point_size = config.point_size;
        }
        scatter
    }

    pub fn axes(&self) -> &SharedAxes {
        &self.axes
    }

    fn replace(&self, kind: ScatterKind, data: PointData) {
        let mut state = self.state.lock();
        debug!(
            "replacing {:?} scatter data: {} x, {} y, {} z, {} colors",
            kind,
            data.x.len(),
            data.y.len(),
            data.z.len(),
            data.color.len()
        );
        state.kind = kind;
        state.data = data;
    }

    /// Plot points with a single color.
    pub fn scatter(&self, x: Vec<f64>, y: Vec<f64>) -> &Self {
        self.replace(
            ScatterKind::TwoD,
            PointData {
                x,
                y,
                ..Default::default()
            },
        );
        self
    }

    /// Plot points colored through the axes color map.
    pub fn scatter_indexed(&self, x: Vec<f64>, y: Vec<f64>, c: &[f64]) -> &Self {
        let mut state = self.state.lock();
        state.kind = ScatterKind::TwoD;
        state.data = PointData {
            x,
            y,
            z: vec![],
            color: index_to_true_color(&self.axes, c),
        };
        debug!("plotted {} index colored points", state.data.x.len());
        self
    }

    /// Plot points with one RGB entry per point.
    pub fn scatter_rgb(&self, x: Vec<f64>, y: Vec<f64>, c: Vec<Channels>) -> &Self {
        self.replace(
            ScatterKind::TwoD,
            PointData {
                x,
                y,
                z: vec![],
                color: c,
            },
        );
        self
    }

    /// Plot 3D points with a single color.
    pub fn scatter3(&self, x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> &Self {
        let mut state = self.state.lock();
        self.axes.write().mode = AxesMode::ThreeD;
        state.kind = ScatterKind::ThreeD;
        state.data = PointData {
            x,
            y,
            z,
            color: vec![],
        };
        self
    }

    pub fn scatter3_indexed(&self, x: Vec<f64>, y: Vec<f64>, z: Vec<f64>, c: &[f64]) -> &Self {
        let mut state = self.state.lock();
        self.axes.write().mode = AxesMode::ThreeD;
        state.kind = ScatterKind::ThreeD;
        state.data = PointData {
            x,
            y,
            z,
            color: index_to_true_color(&self.axes, c),
        };
        debug!("plotted {} index colored 3D points", state.data.x.len());
        self
    }

    pub fn scatter3_rgb(&self, x: Vec<f64>, y: Vec<f64>, z: Vec<f64>, c: Vec<Channels>) -> &Self {
        let mut state = self.state.lock();
        self.axes.write().mode = AxesMode::ThreeD;
        state.kind = ScatterKind::ThreeD;
        state.data = PointData { x, y, z, color: c };
        self
    }

    /// Map index colors through the axes this series is bound to.
    pub fn index_to_true_color(&self, values: &[f64]) -> Vec<Channels> {
        index_to_true_color(&self.axes, values)
    }

    /// Set a style property. `COLOR` and `PointColor` take a color spec,
    /// `PointSize` a number. Anything else is ignored.
    pub fn set(&self, name: &str, value: impl Into<PropertyValue>) -> &Self {
        let value = value.into();
        let mut state = self.state.lock();
        match (name, value) {
            ("COLOR" | "PointColor", PropertyValue::Text(spec)) => state.point_color = spec,
            ("PointSize", PropertyValue::Number(size)) => state.point_size = size,
            (name, value) => debug!("ignoring property {} = {:?}", name, value),
        }
        self
    }

    /// Like [`Scatter::set`], but rejects unknown names, values of the
    /// wrong type, invalid color specs and non-positive sizes.
    pub fn try_set(&self, name: &str, value: impl Into<PropertyValue>) -> Result<&Self, error::Error> {
        let value = value.into();
        let mut state = self.state.lock();
        match (name, value) {
            ("COLOR" | "PointColor", PropertyValue::Text(spec)) => {
                ColorSpec::parse(&spec)?;
                state.point_color = spec;
            }
            ("PointSize", PropertyValue::Number(size)) => {
                if !(size.is_finite() && size > 0.0) {
                    return Err(error::Error::InvalidPointSize(size));
                }
                state.point_size = size;
            }
            ("COLOR" | "PointColor" | "PointSize", value) => {
                return Err(error::Error::PropertyType(
                    name.to_string(),
                    value.type_name().to_string(),
                ))
            }
            (name, _) => return Err(error::Error::UnknownProperty(name.to_string())),
        }
        Ok(self)
    }

    /// Check that the coordinate arrays, and the colors when present, all
    /// have the same length.
    pub fn validate(&self) -> Result<(), error::Error> {
        let state = self.state.lock();
        match state.data.length_mismatch(state.kind) {
            Some(detail) => Err(error::Error::LengthMismatch(detail)),
            None => Ok(()),
        }
    }

    /// Remove all data, keeping the series type and style.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.data.clear();
    }

    pub fn kind(&self) -> ScatterKind {
        self.state.lock().kind
    }

    pub fn point_count(&self) -> usize {
        let state = self.state.lock();
        state.data.point_count(state.kind)
    }

    pub fn point_color(&self) -> String {
        self.state.lock().point_color.clone()
    }

    pub fn point_size(&self) -> f64 {
        self.state.lock().point_size
    }

    /// A copy of the stored arrays.
    pub fn data(&self) -> PointData {
        self.state.lock().data.clone()
    }

    /// Emit the points into `ctx`. Must run on the thread that owns the
    /// rendering context.
    pub fn draw(&self, ctx: &mut dyn RenderContext) {
        let state = self.state.lock();
        let data = &state.data;
        let required_empty = match state.kind {
            ScatterKind::TwoD => data.x.is_empty() || data.y.is_empty(),
            ScatterKind::ThreeD => data.x.is_empty() || data.y.is_empty() || data.z.is_empty(),
        };
        if required_empty {
            return;
        }
        let fallback = if state.point_color == "none" {
            Rgb::BLACK
        } else {
            resolve_color(&state.point_color)
        };
        let count = data.point_count(state.kind);
        trace!("drawing {} {:?} points", count, state.kind);

        let axes = self.axes.read();
        ctx.point_size(state.point_size);
        ctx.begin_points();
        for i in 0..count {
            ctx.color(data.color_at(i).unwrap_or(fallback));
            match state.kind {
                ScatterKind::TwoD => ctx.vertex2(axes.ctx(data.x[i]), axes.cty(data.y[i])),
                ScatterKind::ThreeD => ctx.vertex3(
                    axes.ct3x(data.x[i]),
                    axes.ct3y(data.y[i]),
                    axes.ct3z(data.z[i]),
                ),
            }
        }
        ctx.end();
    }

    /// Fold the extents of this series into the axes view bounds.
    pub fn config(&self) {
        let state = self.state.lock();
        let mut axes = self.axes.write();
        let columns = [
            (AxisName::X, &state.data.x),
            (AxisName::Y, &state.data.y),
            (AxisName::Z, &state.data.z),
        ];
        for (axis, values) in columns.iter() {
            if let Some(limits) = extent(values) {
                axes.bounds.include(axis, limits);
            }
        }
        debug!("view bounds now {:?}", axes.bounds);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::plot::axis::Axes;
    use crate::plot::color::Colormap;
    use crate::plot::render::{DrawCall, RecordingContext};

    fn new_scatter() -> Scatter {
        Scatter::new(Axes::new().shared())
    }

    fn drawn(scatter: &Scatter) -> RecordingContext {
        let mut ctx = RecordingContext::new();
        scatter.draw(&mut ctx);
        ctx
    }

    #[test]
    fn test_defaults() {
        let scatter = new_scatter();
        assert_eq!(scatter.kind(), ScatterKind::TwoD);
        assert_eq!(scatter.point_color(), "b");
        assert_eq!(scatter.point_size(), 1.0);
        assert_eq!(scatter.data(), PointData::default());
    }

    #[test]
    fn test_scatter_truncates_to_shorter_array() {
        let scatter = new_scatter();
        scatter.scatter(vec![0.0, 1.0, 2.0, 3.0, 4.0], vec![0.0, 1.0, 2.0]);
        assert_eq!(scatter.kind(), ScatterKind::TwoD);
        assert_eq!(scatter.point_count(), 3);
        assert_eq!(drawn(&scatter).points().len(), 3);
    }

    #[test]
    fn test_scatter3_truncates_to_shortest_array() {
        let scatter = new_scatter();
        scatter.scatter3_rgb(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.0, 1.0],
            vec![],
        );
        assert_eq!(scatter.kind(), ScatterKind::ThreeD);
        assert_eq!(scatter.axes().read().mode, AxesMode::ThreeD);
        let points = drawn(&scatter).points();
        assert_eq!(points.len(), 2);
        assert!(drawn(&scatter)
            .calls
            .iter()
            .all(|call| !matches!(call, DrawCall::Vertex2(..))));
    }

    #[test]
    fn test_scatter_replaces_previous_data() {
        let scatter = new_scatter();
        scatter.scatter3_rgb(
            vec![1.0],
            vec![1.0],
            vec![1.0],
            vec![vec![1.0, 0.0, 0.0]],
        );
        scatter.scatter(vec![2.0, 3.0], vec![4.0, 5.0]);
        let data = scatter.data();
        assert_eq!(scatter.kind(), ScatterKind::TwoD);
        assert_eq!(data.x, vec![2.0, 3.0]);
        assert!(data.z.is_empty());
        assert!(data.color.is_empty());
    }

    #[test]
    fn test_draw_single_color() {
        let scatter = new_scatter();
        scatter.scatter(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]);
        scatter.config();
        let ctx = drawn(&scatter);
        let points = ctx.points();
        assert_eq!(points.len(), 3);
        let axes = scatter.axes().read();
        for (point, value) in points.iter().zip([0.0, 1.0, 2.0]) {
            assert_eq!(point.color, Rgb::new(0.0, 0.0, 1.0));
            assert_eq!(point.position, [axes.ctx(value), axes.cty(value), 0.0]);
        }
        assert_eq!(points[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(points[1].position, [0.5, 0.5, 0.0]);
        assert_eq!(points[2].position, [1.0, 1.0, 0.0]);
        assert_eq!(ctx.calls.first(), Some(&DrawCall::PointSize(1.0)));
        assert_eq!(ctx.calls.last(), Some(&DrawCall::End));
    }

    #[test]
    fn test_index_colors_auto_scale_clim() {
        let axes = Axes {
            colormap: Colormap::Gray,
            ..Default::default()
        }
        .shared();
        let scatter = Scatter::new(axes.clone());
        scatter.scatter_indexed(vec![0.0, 1.0], vec![0.0, 1.0], &[2.0, 5.0]);
        assert_eq!(axes.read().clim, [2.0, 5.0]);
        let data = scatter.data();
        assert_eq!(data.color.len(), 2);
        let points = drawn(&scatter).points();
        assert_eq!(points[0].color, Rgb::new(0.0, 0.0, 0.0));
        assert_eq!(points[1].color, Rgb::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_index_colors_keep_existing_clim() {
        let axes = Axes {
            colormap: Colormap::Gray,
            clim: [0.0, 10.0],
            ..Default::default()
        }
        .shared();
        let scatter = Scatter::new(axes.clone());
        scatter.scatter_indexed(vec![0.0], vec![0.0], &[5.0]);
        assert_eq!(axes.read().clim, [0.0, 10.0]);
        assert_eq!(scatter.data().color, vec![vec![0.5, 0.5, 0.5]]);
    }

    #[test]
    fn test_index_colors_empty_input() {
        let scatter = new_scatter();
        assert!(scatter.index_to_true_color(&[]).is_empty());
        assert_eq!(scatter.axes().read().clim, [0.0, 0.0]);
    }

    #[test]
    fn test_scatter3_indexed() {
        let axes = Axes {
            colormap: Colormap::Gray,
            ..Default::default()
        }
        .shared();
        let scatter = Scatter::new(axes.clone());
        scatter.scatter3_indexed(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0, 1.0], &[1.0, 3.0]);
        assert_eq!(axes.read().mode, AxesMode::ThreeD);
        assert_eq!(axes.read().clim, [1.0, 3.0]);
        scatter.config();
        let points = drawn(&scatter).points();
        assert_eq!(points[0].position, [-1.0, -1.0, -1.0]);
        assert_eq!(points[1].position, [1.0, 1.0, 1.0]);
        assert_eq!(points[1].color, Rgb::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_short_color_entries_fall_back() {
        let scatter = new_scatter();
        scatter
            .scatter_rgb(
                vec![0.0, 1.0, 2.0],
                vec![0.0, 1.0, 2.0],
                vec![vec![0.0, 1.0, 0.0], vec![1.0, 0.0]],
            )
            .set("COLOR", "r");
        let points = drawn(&scatter).points();
        assert_eq!(points[0].color, Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(points[1].color, Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(points[2].color, Rgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_clear_then_draw_is_noop() {
        let scatter = new_scatter();
        scatter
            .scatter_rgb(vec![0.0], vec![0.0], vec![vec![1.0, 1.0, 1.0]])
            .set("PointSize", 3.0);
        scatter.clear();
        assert!(drawn(&scatter).calls.is_empty());
        assert_eq!(scatter.kind(), ScatterKind::TwoD);
        assert_eq!(scatter.point_size(), 3.0);

        scatter.scatter3(vec![0.0], vec![0.0], vec![0.0]);
        scatter.clear();
        assert!(drawn(&scatter).calls.is_empty());
        assert_eq!(scatter.kind(), ScatterKind::ThreeD);
    }

    #[test]
    fn test_draw_requires_z_in_3d() {
        let scatter = new_scatter();
        scatter.scatter3(vec![0.0, 1.0], vec![0.0, 1.0], vec![]);
        assert!(drawn(&scatter).calls.is_empty());
    }

    #[test]
    fn test_point_size_applies_to_every_point() {
        let scatter = new_scatter();
        scatter
            .scatter(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0])
            .set("PointSize", 6.5);
        let points = drawn(&scatter).points();
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|point| point.size == 6.5));
    }

    #[test]
    fn test_color_none_draws_black() {
        let scatter = new_scatter();
        scatter
            .scatter_rgb(
                vec![0.0, 1.0],
                vec![0.0, 1.0],
                vec![vec![0.0, 0.0, 1.0]],
            )
            .set("COLOR", "none");
        let points = drawn(&scatter).points();
        assert_eq!(points[0].color, Rgb::new(0.0, 0.0, 1.0));
        assert_eq!(points[1].color, Rgb::BLACK);
    }

    #[test]
    fn test_set_ignores_unknown_properties() {
        let scatter = new_scatter();
        scatter
            .set("LineWidth", 2.0)
            .set("Marker", "o")
            .set("PointSize", "big")
            .set("PointColor", 1.0);
        assert_eq!(scatter.point_color(), "b");
        assert_eq!(scatter.point_size(), 1.0);
        scatter.set("PointColor", "g");
        assert_eq!(scatter.point_color(), "g");
    }

    #[test]
    fn test_try_set() {
        let scatter = new_scatter();
        assert!(scatter.try_set("COLOR", "#00ff00").is_ok());
        assert_eq!(scatter.point_color(), "#00ff00");
        assert_eq!(
            scatter.try_set("LineWidth", 2.0).unwrap_err(),
            error::Error::UnknownProperty("LineWidth".to_string())
        );
        assert_eq!(
            scatter.try_set("COLOR", "chartreuse").unwrap_err(),
            error::Error::InvalidColorSpec("chartreuse".to_string())
        );
        assert_eq!(
            scatter.try_set("PointSize", 0.0).unwrap_err(),
            error::Error::InvalidPointSize(0.0)
        );
        assert_eq!(
            scatter.try_set("PointSize", "big").unwrap_err(),
            error::Error::PropertyType("PointSize".to_string(), "text".to_string())
        );
        assert_eq!(scatter.point_color(), "#00ff00");
        assert_eq!(scatter.point_size(), 1.0);
    }

    #[test]
    fn test_validate() {
        let scatter = new_scatter();
        scatter.scatter(vec![0.0, 1.0], vec![0.0, 1.0]);
        assert!(scatter.validate().is_ok());
        scatter.scatter(vec![0.0, 1.0], vec![0.0]);
        assert_eq!(
            scatter.validate(),
            Err(error::Error::LengthMismatch("x=2, y=1".to_string()))
        );
    }

    #[test]
    fn test_config_folds_extents() {
        let axes = Axes::new().shared();
        let first = Scatter::new(axes.clone());
        let second = Scatter::new(axes.clone());
        first.scatter(vec![1.0, 3.0], vec![-2.0, 2.0]);
        second.scatter3(vec![-1.0, 2.0], vec![0.0, 5.0], vec![f64::NAN, 7.0]);
        first.config();
        second.config();
        let bounds = axes.read().bounds;
        assert_eq!([bounds.xmin, bounds.xmax], [-1.0, 3.0]);
        assert_eq!([bounds.ymin, bounds.ymax], [-2.0, 5.0]);
        assert_eq!([bounds.zmin, bounds.zmax], [7.0, 7.0]);
    }

    #[test]
    fn test_config_with_empty_data_keeps_bounds() {
        let axes = Axes::new().shared();
        let scatter = Scatter::new(axes.clone());
        scatter.config();
        assert_eq!(axes.read().bounds, crate::plot::axis::ViewBounds::empty());
    }

    #[test]
    fn test_with_config() {
        let config = PlotConfig {
            point_color: String::from("k"),
            point_size: 2.0,
            ..Default::default()
        };
        let scatter = Scatter::with_config(Axes::new().shared(), &config);
        assert_eq!(scatter.point_color(), "k");
        assert_eq!(scatter.point_size(), 2.0);
    }

    #[test]
    fn test_concurrent_update_and_draw() {
        let scatter = Arc::new(new_scatter());
        let writer = {
            let scatter = Arc::clone(&scatter);
            thread::spawn(move || {
                for i in 0..100 {
                    let n = i % 7 + 1;
                    let values: Vec<f64> = (0..n).map(|v| v as f64).collect();
                    scatter.scatter(values.clone(), values);
                    scatter.config();
                }
            })
        };
        for _ in 0..100 {
            let ctx = drawn(&scatter);
            let points = ctx.points();
            if !points.is_empty() {
                assert_eq!(ctx.calls.len(), points.len() * 2 + 3);
            }
        }
        writer.join().unwrap();
        assert_eq!(scatter.point_count(), 99 % 7 + 1);
    }

    #[test]
    fn test_set_point_size_from_other_numbers() {
        let scatter = Scatter::new(Axes::new().shared());
        scatter.set("PointSize", 2.5f32);
        assert_eq!(scatter.point_size(), 2.5);
        scatter.set("PointSize", 3);
        assert_eq!(scatter.point_size(), 3.0);
    }
}
