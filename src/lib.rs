//! `scattertk` draws scatter series for a MATLAB-like 2D/3D plotting
//! toolkit: point data with optional per-point colors, drawn as point
//! primitives into a rendering context through shared axes.

/// The ScatterTk Command Line Interface.
pub mod cli;

/// Plot defaults.
pub mod config;

/// Error types.
pub mod error;

/// Scatter series, axes, colors and rendering.
pub mod plot;

/// Run a parsed command.
pub mod run;

/// Utility functions.
pub mod utils;

pub use plot::axis::{Axes, SharedAxes};
pub use plot::color::Rgb;
pub use plot::render::RenderContext;
pub use plot::scatter::Scatter;
