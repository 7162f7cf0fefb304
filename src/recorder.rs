//! Append-only time series of the digester state.

use serde::Serialize;

use crate::state::DigesterState;

/// One row of the recorded series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesRecord {
    /// Tick index
    pub time: f64,
    pub organic_acids: f64,
    pub methane_production: f64,
    pub ph: f64,
}

/// Four parallel series, one entry per tick.
///
/// Entries are only ever appended; readers get slices.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    time: Vec<f64>,
    organic_acids: Vec<f64>,
    methane_production: Vec<f64>,
    ph: Vec<f64>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(ticks: usize) -> Self {
        Self {
            time: Vec::with_capacity(ticks),
            organic_acids: Vec::with_capacity(ticks),
            methane_production: Vec::with_capacity(ticks),
            ph: Vec::with_capacity(ticks),
        }
    }

    /// Appends the state as observed at `tick`.
    pub fn record(&mut self, tick: usize, state: &DigesterState) {
        self.time.push(tick as f64);
        self.organic_acids.push(state.organic_acids());
        self.methane_production.push(state.methane_production());
        self.ph.push(state.ph());
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn organic_acids(&self) -> &[f64] {
        &self.organic_acids
    }

    pub fn methane_production(&self) -> &[f64] {
        &self.methane_production
    }

    pub fn ph(&self) -> &[f64] {
        &self.ph
    }

    /// Last recorded row, if any.
    pub fn last(&self) -> Option<TimeSeriesRecord> {
        self.records().last()
    }

    /// Rows in tick order.
    pub fn records(&self) -> impl DoubleEndedIterator<Item = TimeSeriesRecord> + ExactSizeIterator + '_ {
        (0..self.len()).map(move |i| TimeSeriesRecord {
            time: self.time[i],
            organic_acids: self.organic_acids[i],
            methane_production: self.methane_production[i],
            ph: self.ph[i],
        })
    }
}
