use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::plot::axis::Scale;
use crate::plot::color::Colormap;

fn positive_float(s: &str) -> Result<f64, String> {
    let val = s.parse::<f64>().map_err(|e| e.to_string())?;
    if val.is_finite() && val > 0.0 {
        Ok(val)
    } else {
        Err(format!("{} is not a positive number", s))
    }
}

/// Top level arguments to `scattertk`
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[clap(subcommand)]
    pub cmd: SubCommand,
}

/// `scattertk` subcommands
#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Read CSV point records from stdin and write an SVG scatter plot to stdout.
    /// Called as `scattertk plot`
    Plot(PlotOptions),
}

/// Options to pass to `scattertk plot`
#[derive(Parser, Debug, Default)]
pub struct PlotOptions {
    /// Path to a YAML or JSON file with plot defaults
    #[arg(long, short = 'C')]
    pub config: Option<PathBuf>,
    /// Color spec for points without their own color (e.g. b, red, #ff7f00, none)
    #[arg(long = "point-color", short = 'c')]
    pub point_color: Option<String>,
    /// Rendered point size
    #[arg(long = "point-size", short = 's', value_parser = positive_float)]
    pub point_size: Option<f64>,
    /// Color map for index colors
    #[arg(long, value_enum)]
    pub colormap: Option<Colormap>,
    /// Fixed color limits (min max)
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    pub clim: Option<Vec<f64>>,
    /// Scale function for the x axis
    #[arg(long = "x-scale", value_enum)]
    pub x_scale: Option<Scale>,
    /// Scale function for the y axis
    #[arg(long = "y-scale", value_enum)]
    pub y_scale: Option<Scale>,
    /// Scale function for the z axis
    #[arg(long = "z-scale", value_enum)]
    pub z_scale: Option<Scale>,
    /// 3D view angles in degrees (azimuth elevation)
    #[arg(long, num_args = 2, value_names = ["AZ", "EL"], allow_negative_numbers = true)]
    pub view: Option<Vec<f64>>,
    /// Reject invalid colors and mismatched column lengths
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

/// Command line argument parser
pub fn parse() -> Arguments {
    Arguments::parse()
}
