use std::sync::Arc;

use clap::ValueEnum;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::utils::{max_float, min_float, scale_floats};

use super::color::{Colormap, Rgb};

/// Axes shared by every series drawn onto them.
///
/// Series lock their own data before taking this lock, never the reverse.
pub type SharedAxes = Arc<RwLock<Axes>>;

/// Whether the axes render in 2D or 3D.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxesMode {
    #[default]
    TwoD,
    ThreeD,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    #[value(name = "linear")]
    #[serde(rename = "linear")]
    LINEAR,
    #[value(name = "sqrt")]
    #[serde(rename = "sqrt")]
    SQRT,
    #[value(name = "log")]
    #[serde(rename = "log")]
    LOG,
}

#[derive(Clone, Debug)]
pub enum AxisName {
    X,
    Y,
    Z,
}

/// Data limits of the view along each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub zmin: f64,
    pub zmax: f64,
}

impl ViewBounds {
    /// Bounds that any fold will overwrite.
    pub fn empty() -> ViewBounds {
        ViewBounds {
            xmin: f64::INFINITY,
            xmax: f64::NEG_INFINITY,
            ymin: f64::INFINITY,
            ymax: f64::NEG_INFINITY,
            zmin: f64::INFINITY,
            zmax: f64::NEG_INFINITY,
        }
    }

    pub fn domain(&self, axis: &AxisName) -> [f64; 2] {
        match axis {
            AxisName::X => [self.xmin, self.xmax],
            AxisName::Y => [self.ymin, self.ymax],
            AxisName::Z => [self.zmin, self.zmax],
        }
    }

    /// Widen the limits of one axis to include `[lo, hi]`.
    pub fn include(&mut self, axis: &AxisName, extent: [f64; 2]) {
        let (min, max) = match axis {
            AxisName::X => (&mut self.xmin, &mut self.xmax),
            AxisName::Y => (&mut self.ymin, &mut self.ymax),
            AxisName::Z => (&mut self.zmin, &mut self.zmax),
        };
        *min = min_float(extent[0], *min);
        *max = max_float(extent[1], *max);
    }
}

impl Default for ViewBounds {
    fn default() -> ViewBounds {
        ViewBounds::empty()
    }
}

/// The plotting surface: view bounds, color limits, color map and the
/// coordinate transforms used by every series drawn onto it.
#[derive(Clone, Debug)]
pub struct Axes {
    pub bounds: ViewBounds,
    pub clim: [f64; 2],
    pub colormap: Colormap,
    pub mode: AxesMode,
    pub x_scale: Scale,
    pub y_scale: Scale,
    pub z_scale: Scale,
}

impl Default for Axes {
    fn default() -> Axes {
        Axes {
            bounds: ViewBounds::empty(),
            clim: [0.0, 0.0],
            colormap: Colormap::Jet,
            mode: AxesMode::TwoD,
            x_scale: Scale::LINEAR,
            y_scale: Scale::LINEAR,
            z_scale: Scale::LINEAR,
        }
    }
}

impl Axes {
    pub fn new() -> Axes {
        Axes {
            ..Default::default()
        }
    }

    pub fn shared(self) -> SharedAxes {
        Arc::new(RwLock::new(self))
    }

    pub fn reset_limits(&mut self) {
        self.bounds = ViewBounds::empty();
    }

    pub fn clim_is_degenerate(&self) -> bool {
        self.clim[0] == self.clim[1]
    }

    /// Map an index color through the color limits and the color map.
    ///
    /// Values outside the limits are clamped; a degenerate range maps
    /// everything to the bottom of the map.
    pub fn map_to_color(&self, value: f64) -> Rgb {
        let span = self.clim[1] - self.clim[0];
        let t = if span == 0.0 || !span.is_finite() || value.is_nan() {
            0.0
        } else {
            ((value - self.clim[0]) / span).clamp(0.0, 1.0)
        };
        self.colormap.eval(t)
    }

    fn scale_of(&self, axis: &AxisName) -> &Scale {
        match axis {
            AxisName::X => &self.x_scale,
            AxisName::Y => &self.y_scale,
            AxisName::Z => &self.z_scale,
        }
    }

    fn transform(&self, value: f64, axis: AxisName, range: &[f64; 2]) -> f64 {
        let domain = self.bounds.domain(&axis);
        let clamp = match self.scale_of(&axis) {
            Scale::LOG => Some(f64::MIN_POSITIVE),
            Scale::SQRT => Some(0.0),
            Scale::LINEAR => None,
        };
        scale_floats(value, &domain, range, self.scale_of(&axis), clamp)
    }

    /// x in data units to normalized 2D viewport units, `[0, 1]`.
    pub fn ctx(&self, x: f64) -> f64 {
        self.transform(x, AxisName::X, &[0.0, 1.0])
    }

    /// y in data units to normalized 2D viewport units, `[0, 1]`.
    pub fn cty(&self, y: f64) -> f64 {
        self.transform(y, AxisName::Y, &[0.0, 1.0])
    }

    /// x in data units to the 3D view cube, `[-1, 1]`.
    pub fn ct3x(&self, x: f64) -> f64 {
        self.transform(x, AxisName::X, &[-1.0, 1.0])
    }

    pub fn ct3y(&self, y: f64) -> f64 {
        self.transform(y, AxisName::Y, &[-1.0, 1.0])
    }

    pub fn ct3z(&self, z: f64) -> f64 {
        self.transform(z, AxisName::Z, &[-1.0, 1.0])
    }
}
