//! Plot defaults, loadable from YAML or JSON.

use serde::{Deserialize, Serialize};

use crate::error;
use crate::plot::axis::Scale;
use crate::plot::color::Colormap;
use crate::plot::render::DEFAULT_VIEW;

fn default_point_color() -> String {
    String::from("b")
}

fn default_point_size() -> f64 {
    1.0
}

fn default_view() -> [f64; 2] {
    DEFAULT_VIEW
}

fn default_width() -> f64 {
    900.0
}

fn default_height() -> f64 {
    900.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Color spec for points without their own color.
    #[serde(default = "default_point_color")]
    pub point_color: String,
    #[serde(default = "default_point_size")]
    pub point_size: f64,
    pub colormap: Colormap,
    /// Fixed color limits; auto-scaled from index colors when unset.
    pub clim: Option<[f64; 2]>,
    pub x_scale: Scale,
    pub y_scale: Scale,
    pub z_scale: Scale,
    /// Azimuth and elevation of the 3D view, in degrees.
    #[serde(default = "default_view")]
    pub view: [f64; 2],
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Report unknown properties, invalid colors and mismatched lengths
    /// instead of ignoring them.
    pub strict: bool,
}

impl Default for PlotConfig {
    fn default() -> PlotConfig {
        PlotConfig {
            point_color: default_point_color(),
            point_size: default_point_size(),
            colormap: Colormap::default(),
            clim: None,
            x_scale: Scale::LINEAR,
            y_scale: Scale::LINEAR,
            z_scale: Scale::LINEAR,
            view: default_view(),
            width: default_width(),
            height: default_height(),
            strict: false,
        }
    }
}

impl PlotConfig {
    pub fn from_yaml_str(input: &str) -> Result<PlotConfig, error::Error> {
        let config: PlotConfig = serde_yaml::from_str(input)?;
        Ok(config)
    }

    pub fn from_json_str(input: &str) -> Result<PlotConfig, error::Error> {
        let config: PlotConfig = serde_json::from_str(input)?;
        Ok(config)
    }

    /// Parse as JSON when the input looks like an object, YAML otherwise.
    pub fn parse(input: &str) -> Result<PlotConfig, error::Error> {
        if input.trim_start().starts_with('{') {
            PlotConfig::from_json_str(input)
        } else {
            PlotConfig::from_yaml_str(input)
        }
    }
}
