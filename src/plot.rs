//! Trajectory Plotting
//!
//! Renders a finished [`StateHistory`] as an SVG line chart: one series
//! per population against the time grid, with title, axis labels and
//! legend. Purely a consumer of the history; the model knows nothing
//! about rendering.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::model::{Population, StateHistory};
use crate::{NeuromassError, Result};

/// Figure styling, supplied by the caller
#[derive(Clone, Debug, PartialEq)]
pub struct PlotStyle {
    /// Chart caption
    pub title: String,
    /// X axis description
    pub x_label: String,
    /// Y axis description
    pub y_label: String,
    /// Width (px)
    pub width: u32,
    /// Height (px)
    pub height: u32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            title: "Time evolution of parameters".to_string(),
            x_label: "Time (s)".to_string(),
            y_label: "Membrane potential (mV)".to_string(),
            width: 1000,
            height: 600,
        }
    }
}

/// Line colour per population
fn series_color(population: Population) -> RGBColor {
    match population {
        Population::First => BLUE,
        Population::Second => RED,
    }
}

/// (time, activity) points for one population
pub fn series(history: &StateHistory, population: Population) -> Vec<(f64, f64)> {
    history
        .time_grid()
        .into_iter()
        .zip(history.row(population).iter().copied())
        .collect()
}

/// Padded y-range covering both populations, never empty
pub fn value_range(history: &StateHistory) -> (f64, f64) {
    let (lo, hi) = history
        .columns()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !lo.is_finite() || !hi.is_finite() {
        return (-0.1, 0.1);
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.1 };
    (lo - pad, hi + pad)
}

/// Right edge of the time axis
fn time_extent(history: &StateHistory) -> f64 {
    let last = history.time_at(history.len().saturating_sub(1));
    last.max(history.dt())
}

fn plot_err<E: std::fmt::Display>(e: E) -> NeuromassError {
    NeuromassError::Plot(e.to_string())
}

/// Render to an SVG file
pub fn render_svg<P: AsRef<Path>>(history: &StateHistory, style: &PlotStyle, path: P) -> Result<()> {
    let path = path.as_ref();
    log::debug!("Rendering {} steps to {}", history.len(), path.display());

    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    draw(&root, history, style)?;
    root.present().map_err(plot_err)
}

/// Render to an in-memory SVG document
pub fn render_svg_string(history: &StateHistory, style: &PlotStyle) -> Result<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        draw(&root, history, style)?;
        root.present().map_err(plot_err)?;
    }
    Ok(buffer)
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    history: &StateHistory,
    style: &PlotStyle,
) -> Result<()> {
    let (y_min, y_max) = value_range(history);

    root.fill(&WHITE).map_err(plot_err)?;
    let mut chart = ChartBuilder::on(root)
        .caption(&style.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..time_extent(history), y_min..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(style.x_label.as_str())
        .y_desc(style.y_label.as_str())
        .draw()
        .map_err(plot_err)?;

    for population in Population::ALL {
        let color = series_color(population);
        chart
            .draw_series(LineSeries::new(series(history, population), color.stroke_width(2)))
            .map_err(plot_err)?
            .label(population.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}
