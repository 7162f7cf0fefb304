//! CSV time-series and JSON summary export.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::recorder::TimeSeries;
use crate::simulation::RunSummary;

/// Writes the series as CSV, one row per tick.
pub fn write_csv<P: AsRef<Path>>(series: &TimeSeries, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_csv_to(series, file)?;
    log::info!("CSV export completed: {}", path.as_ref().display());
    Ok(())
}

/// Writes the series as CSV into any writer.
pub fn write_csv_to<W: Write>(series: &TimeSeries, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in series.records() {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the run summary as pretty-printed JSON.
pub fn write_summary_json<P: AsRef<Path>>(summary: &RunSummary, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, summary)?;
    log::info!("Summary exported: {}", path.as_ref().display());
    Ok(())
}
