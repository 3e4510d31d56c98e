use std::sync::Arc;

use svg::node::element::Rectangle;
use svg::Document;
use tracing::debug;

use crate::config::PlotConfig;

use super::axis::{Axes, AxesMode, SharedAxes};
use super::component::{frame_2d, frame_3d};
use super::render::{RenderContext, SvgContext, DEFAULT_VIEW};
use super::scatter::Scatter;

#[derive(Clone, Debug, PartialEq)]
pub struct Dimensions {
    pub height: f64,
    pub width: f64,
    pub padding: [f64; 4],
}

impl Default for Dimensions {
    fn default() -> Dimensions {
        Dimensions {
            height: 900.0,
            width: 900.0,
            padding: [50.0, 50.0, 100.0, 100.0],
        }
    }
}

/// A set of axes and the scatter series drawn onto them.
#[derive(Debug)]
pub struct Chart {
    pub axes: SharedAxes,
    pub series: Vec<Arc<Scatter>>,
    pub dimensions: Dimensions,
    pub view: [f64; 2],
    config: PlotConfig,
}

impl Default for Chart {
    fn default() -> Chart {
        Chart::new(Dimensions {
            ..Default::default()
        })
    }
}

impl Chart {
    pub fn new(dimensions: Dimensions) -> Chart {
        Chart {
            axes: Axes::new().shared(),
            series: vec![],
            dimensions,
            view: DEFAULT_VIEW,
            config: PlotConfig::default(),
        }
    }

    /// Build a chart whose axes and new series follow `config`.
    pub fn from_config(config: &PlotConfig) -> Chart {
        let axes = Axes {
            colormap: config.colormap,
            clim: config.clim.unwrap_or([0.0, 0.0]),
            x_scale: config.x_scale,
            y_scale: config.y_scale,
            z_scale: config.z_scale,
            ..Default::default()
        };
        Chart {
            axes: axes.shared(),
            series: vec![],
            dimensions: Dimensions {
                width: config.width,
                height: config.height,
                ..Default::default()
            },
            view: config.view,
            config: config.clone(),
        }
    }

    /// Add a new series bound to this chart's axes.
    pub fn scatter(&mut self) -> Arc<Scatter> {
        let scatter = Arc::new(Scatter::with_config(self.axes.clone(), &self.config));
        self.series.push(Arc::clone(&scatter));
        scatter
    }

    /// Recompute the view bounds from every series.
    pub fn config(&self) {
        self.axes.write().reset_limits();
        for series in self.series.iter() {
            series.config();
        }
    }

    pub fn draw(&self, ctx: &mut dyn RenderContext) {
        for series in self.series.iter() {
            series.draw(ctx);
        }
    }

    /// Configure, draw every series and wrap the result in a document.
    pub fn svg(&self) -> Document {
        self.config();
        let mut ctx = SvgContext::new(self.dimensions.clone());
        ctx.view = self.view;
        self.draw(&mut ctx);
        debug!(
            "rendered {} points from {} series",
            ctx.point_count(),
            self.series.len()
        );

        let (mode, bounds) = {
            let axes = self.axes.read();
            (axes.mode, axes.bounds)
        };
        let frame = match mode {
            AxesMode::TwoD => frame_2d(&ctx, &bounds),
            AxesMode::ThreeD => frame_3d(&ctx),
        };
        let width = self.dimensions.width;
        let height = self.dimensions.height;
        Document::new()
            .set("viewBox", (0.0, 0.0, width, height))
            .set("width", width)
            .set("height", height)
            .add(
                Rectangle::new()
                    .set("fill", "#ffffff")
                    .set("stroke", "none")
                    .set("width", width)
                    .set("height", height),
            )
            .add(frame)
            .add(ctx.into_group())
    }
}
