//! gnuplot rendering of a finished run.
//!
//! Three stacked panels share the time axis: organic acids, methane and pH.
//! Rendering only reads the series.

use std::path::PathBuf;

use gnuplot::*;

use crate::error::{DigesterError, Result};
use crate::recorder::TimeSeries;

const PNG_WIDTH_PX: u32 = 1000;
const PNG_HEIGHT_PX: u32 = 600;

/// Where the figure goes.
#[derive(Debug, Clone)]
pub enum PlotTarget {
    /// Write a PNG file
    Png(PathBuf),
    /// Open an interactive gnuplot window
    Window,
}

/// Builds the three-panel figure without rendering it.
pub fn build_figure(series: &TimeSeries) -> Figure {
    let mut fg = Figure::new();
    let x_max = series.len().max(1) as f64;
    let time = series.time();

    let panels: [(&[f64], &str, &str); 3] = [
        (series.organic_acids(), "Organic Acids", "Organic Acids Production"),
        (series.methane_production(), "Methane", "Methane Production"),
        (series.ph(), "pH", "pH"),
    ];

    for (row, (values, caption, y_label)) in panels.into_iter().enumerate() {
        fg.axes2d()
            .set_pos_grid(3, 1, row as u32)
            .set_x_range(Fix(0.), Fix(x_max))
            .set_x_label("Time", &[])
            .set_y_label(y_label, &[])
            .lines(time, values, &[Caption(caption)]);
    }
    fg
}

/// Renders the series to `target`.
pub fn render(series: &TimeSeries, target: &PlotTarget) -> Result<()> {
    let mut fg = build_figure(series);
    match target {
        PlotTarget::Png(path) => {
            fg.save_to_png(path, PNG_WIDTH_PX, PNG_HEIGHT_PX)
                .map_err(|e| DigesterError::Plot(e.to_string()))?;
            log::info!("Plot saved: {}", path.display());
        }
        PlotTarget::Window => {
            fg.show().map_err(|e| DigesterError::Plot(e.to_string()))?;
        }
    }
    Ok(())
}
