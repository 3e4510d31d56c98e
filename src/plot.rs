//!
//! Invoked by calling:
//! `scattertk plot <args>`

use std::io::{Read, Write};

use anyhow;
use tracing::warn;

use crate::cli;
use crate::config::PlotConfig;
use crate::error;

use self::chart::Chart;
use self::data::{Channels, ColorColumn, PointRecord, RecordColumns};
use self::scatter::Scatter;

/// Axes, view bounds and coordinate transforms.
pub mod axis;

/// Chart holding the axes and their series.
pub mod chart;

/// Colors, color specs and color maps.
pub mod color;

/// Chart components.
pub mod component;

/// Point data containers.
pub mod data;

/// Rendering contexts.
pub mod render;

/// Scatter series.
pub mod scatter;

/// SVG styling functions.
pub mod style;

/// Read point records as CSV with a header row.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<PointRecord>, error::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = vec![];
    for result in csv_reader.deserialize() {
        let record: PointRecord = result?;
        records.push(record);
    }
    Ok(records)
}

/// Merge command line options over the loaded config.
pub fn resolve_config(options: &cli::PlotOptions) -> Result<PlotConfig, error::Error> {
    let mut config = match &options.config {
        Some(path) => PlotConfig::parse(&std::fs::read_to_string(path)?)?,
        None => PlotConfig::default(),
    };
    if let Some(color) = &options.point_color {
        config.point_color = color.clone();
    }
    if let Some(size) = options.point_size {
        config.point_size = size;
    }
    if let Some(colormap) = options.colormap {
        config.colormap = colormap;
    }
    if let Some(clim) = &options.clim {
        if let [lo, hi] = clim.as_slice() {
            config.clim = Some([*lo, *hi]);
        }
    }
    if let Some(scale) = options.x_scale {
        config.x_scale = scale;
    }
    if let Some(scale) = options.y_scale {
        config.y_scale = scale;
    }
    if let Some(scale) = options.z_scale {
        config.z_scale = scale;
    }
    if let Some(view) = &options.view {
        if let [azimuth, elevation] = view.as_slice() {
            config.view = [*azimuth, *elevation];
        }
    }
    if options.strict {
        config.strict = true;
    }
    Ok(config)
}

/// Index colors for records that may lack one. Missing entries stay empty
/// and draw in the series point color.
fn index_channels(series: &Scatter, values: &[Option<f64>]) -> Vec<Channels> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let mut mapped = series.index_to_true_color(&present).into_iter();
    values
        .iter()
        .map(|value| match value {
            Some(_) => mapped.next().unwrap_or_default(),
            None => vec![],
        })
        .collect()
}

/// Build a chart holding one series from the given records.
pub fn chart_from_records(
    records: &[PointRecord],
    config: &PlotConfig,
) -> Result<Chart, error::Error> {
    let mut chart = Chart::from_config(config);
    let series = chart.scatter();
    if config.strict {
        let styled = series
            .try_set("PointColor", config.point_color.as_str())
            .and_then(|series| series.try_set("PointSize", config.point_size));
        if let Err(err) = styled {
            warn!("rejecting point style: {}", err);
            return Err(err);
        }
    }
    let RecordColumns { x, y, z, color } = RecordColumns::from_records(records);
    match (z, color) {
        (None, ColorColumn::Uniform) => series.scatter(x, y),
        (None, ColorColumn::Index(c)) => match c.iter().copied().collect::<Option<Vec<f64>>>() {
            Some(values) => series.scatter_indexed(x, y, &values),
            None => series.scatter_rgb(x, y, index_channels(&series, &c)),
        },
        (None, ColorColumn::True(c)) => series.scatter_rgb(x, y, c),
        (Some(z), ColorColumn::Uniform) => series.scatter3(x, y, z),
        (Some(z), ColorColumn::Index(c)) => match c.iter().copied().collect::<Option<Vec<f64>>>() {
            Some(values) => series.scatter3_indexed(x, y, z, &values),
            None => series.scatter3_rgb(x, y, z, index_channels(&series, &c)),
        },
        (Some(z), ColorColumn::True(c)) => series.scatter3_rgb(x, y, z, c),
    };
    if config.strict {
        if let Err(err) = series.validate() {
            warn!("rejecting point records: {}", err);
            return Err(err);
        }
    }
    Ok(chart)
}

/// Execute the `plot` subcommand from `scattertk`.
pub fn plot(options: &cli::PlotOptions) -> Result<(), anyhow::Error> {
    let config = resolve_config(options)?;
    let records = read_records(std::io::stdin().lock())?;
    let chart = chart_from_records(&records, &config)?;
    let document = chart.svg();
    let mut stdout = std::io::stdout().lock();
    svg::write(&mut stdout, &document)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::axis::AxesMode;
    use crate::plot::color::{Colormap, Rgb};
    use crate::plot::render::RecordingContext;

    #[test]
    fn test_read_records() {
        let input = "x, y, c\n0, 0, 2\n1, 1, 5\n";
        let records = read_records(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].c, Some(5.0));
        assert_eq!(records[1].z, None);
    }

    #[test]
    fn test_read_records_error() {
        let input = "x,y\n0,oops\n";
        assert!(matches!(
            read_records(input.as_bytes()),
            Err(error::Error::ReaderError(_))
        ));
    }

    #[test]
    fn test_chart_from_index_records() {
        let records = read_records("x,y,c\n0,0,2\n1,1,5\n".as_bytes()).unwrap();
        let config = PlotConfig {
            colormap: Colormap::Gray,
            ..Default::default()
        };
        let chart = chart_from_records(&records, &config).unwrap();
        assert_eq!(chart.axes.read().clim, [2.0, 5.0]);
        assert_eq!(chart.series[0].data().color.len(), 2);
    }

    #[test]
    fn test_chart_from_3d_records() {
        let records = read_records("x,y,z\n0,0,0\n1,1,1\n".as_bytes()).unwrap();
        let chart = chart_from_records(&records, &PlotConfig::default()).unwrap();
        assert_eq!(chart.axes.read().mode, AxesMode::ThreeD);
        assert_eq!(chart.series[0].point_count(), 2);
    }

    #[test]
    fn test_strict_rejects_bad_color() {
        let records = read_records("x,y\n0,0\n".as_bytes()).unwrap();
        let config = PlotConfig {
            point_color: String::from("chartreuse"),
            strict: true,
            ..Default::default()
        };
        assert_eq!(
            chart_from_records(&records, &config).unwrap_err(),
            error::Error::InvalidColorSpec("chartreuse".to_string())
        );
        let permissive = PlotConfig {
            strict: false,
            ..config
        };
        assert!(chart_from_records(&records, &permissive).is_ok());
    }

    #[test]
    fn test_strict_accepts_missing_color_channels() {
        let records = read_records("x,y,r,g,b\n0,0,1,0,0\n1,1,,,\n".as_bytes()).unwrap();
        let config = PlotConfig {
            strict: true,
            ..Default::default()
        };
        let chart = chart_from_records(&records, &config).unwrap();
        assert_eq!(chart.series[0].data().color, vec![vec![1.0, 0.0, 0.0], vec![]]);
    }

    #[test]
    fn test_index_records_with_gaps_fall_back_per_point() {
        let records = read_records("x,y,c\n0,0,2\n1,1,\n2,2,6\n".as_bytes()).unwrap();
        let config = PlotConfig {
            colormap: Colormap::Gray,
            ..Default::default()
        };
        let chart = chart_from_records(&records, &config).unwrap();
        assert_eq!(chart.axes.read().clim, [2.0, 6.0]);
        let mut ctx = RecordingContext::new();
        chart.series[0].draw(&mut ctx);
        let colors: Vec<Rgb> = ctx.points().iter().map(|point| point.color).collect();
        assert_eq!(
            colors,
            vec![
                Rgb::new(0.0, 0.0, 0.0),
                Rgb::new(0.0, 0.0, 1.0),
                Rgb::new(1.0, 1.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_strict_rejects_bad_point_size() {
        let records = read_records("x,y\n0,0\n".as_bytes()).unwrap();
        let config = PlotConfig {
            point_size: -1.0,
            strict: true,
            ..Default::default()
        };
        assert_eq!(
            chart_from_records(&records, &config).unwrap_err(),
            error::Error::InvalidPointSize(-1.0)
        );
    }
}
