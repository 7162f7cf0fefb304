//! Fixed-tick scheduling loop.
//!
//! Every tick the clock moves forward by one unit, the state is updated with
//! the run's feedstock and temperature, any periodic activity that has come
//! due is fired, and the state is appended to the series. Ticks never overlap
//! or reorder.

use crate::error::{DigesterError, Result};
use crate::recorder::TimeSeries;
use crate::state::DigesterState;
use crate::updater::{StateUpdater, TICK};

// Slack when comparing a due time against the clock.
const DUE_EPSILON: f64 = 1e-9;

/// Hook fired at a fixed simulated-time interval.
///
/// Activities see the state read-only and cannot change the outcome of a run.
pub trait PeriodicActivity {
    fn name(&self) -> &str;

    /// Time between firings. Read once when a run starts. Intervals shorter
    /// than a tick still fire at most once per tick.
    fn interval(&self, state: &DigesterState) -> f64;

    fn fire(&mut self, now: f64, state: &DigesterState);
}

/// Digestion cycle, due once per retention time.
#[derive(Debug, Default)]
pub struct ReactorActivity;

impl PeriodicActivity for ReactorActivity {
    fn name(&self) -> &str {
        "reactor"
    }

    fn interval(&self, state: &DigesterState) -> f64 {
        state.retention_time()
    }

    fn fire(&mut self, now: f64, state: &DigesterState) {
        log::trace!(
            "reactor cycle at t={:.2}: acids={:.4}, methane={:.4}",
            now,
            state.organic_acids(),
            state.methane_production()
        );
    }
}

/// Gas storage, due every tick.
#[derive(Debug, Default)]
pub struct GasStorageActivity;

impl PeriodicActivity for GasStorageActivity {
    fn name(&self) -> &str {
        "gas_storage"
    }

    fn interval(&self, _state: &DigesterState) -> f64 {
        TICK
    }

    fn fire(&mut self, now: f64, state: &DigesterState) {
        log::trace!("gas storage at t={:.2}: methane={:.4}", now, state.methane_production());
    }
}

struct ScheduledActivity {
    activity: Box<dyn PeriodicActivity>,
    interval: f64,
    next_due: f64,
    firings: usize,
}

/// Drives a [`StateUpdater`] for a fixed number of ticks.
pub struct Scheduler {
    updater: StateUpdater,
    organic_matter: f64,
    temperature: f64,
    horizon: usize,
    clock: f64,
    activities: Vec<ScheduledActivity>,
}

impl Scheduler {
    pub fn new(updater: StateUpdater, organic_matter: f64, temperature: f64, horizon: usize) -> Self {
        Self {
            updater,
            organic_matter,
            temperature,
            horizon,
            clock: 0.0,
            activities: Vec::new(),
        }
    }

    /// Registers a periodic activity. Activities fire in registration order.
    pub fn with_activity<A: PeriodicActivity + 'static>(mut self, activity: A) -> Self {
        self.activities.push(ScheduledActivity {
            activity: Box::new(activity),
            interval: 0.0,
            next_due: 0.0,
            firings: 0,
        });
        self
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Current simulated time.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Number of times each activity fired during the last run.
    pub fn activity_firings(&self) -> Vec<(String, usize)> {
        self.activities
            .iter()
            .map(|a| (a.activity.name().to_string(), a.firings))
            .collect()
    }

    /// Runs all ticks from time zero and returns the recorded series.
    ///
    /// Any error aborts the run; no partial series is returned.
    pub fn run(&mut self, state: &mut DigesterState) -> Result<TimeSeries> {
        self.reset(state)?;
        let mut series = TimeSeries::with_capacity(self.horizon);

        for tick in 0..self.horizon {
            self.step(tick, state, &mut series)?;
        }

        debug_assert_eq!(series.len(), self.horizon);
        Ok(series)
    }

    fn reset(&mut self, state: &DigesterState) -> Result<()> {
        self.clock = 0.0;
        for scheduled in &mut self.activities {
            let interval = scheduled.activity.interval(state);
            if !(interval.is_finite() && interval > 0.0) {
                return Err(DigesterError::Config(format!(
                    "activity '{}' has invalid interval {}",
                    scheduled.activity.name(),
                    interval
                )));
            }
            scheduled.interval = interval;
            scheduled.next_due = interval;
            scheduled.firings = 0;
        }
        Ok(())
    }

    fn step(&mut self, tick: usize, state: &mut DigesterState, series: &mut TimeSeries) -> Result<()> {
        // 1. Advance the clock
        self.clock += TICK;

        // 2. Feed the digester
        let rates = self.updater.update(state, self.organic_matter, self.temperature)?;

        // 3. Periodic activities due by now, at most once per tick
        for scheduled in &mut self.activities {
            if scheduled.next_due <= self.clock + DUE_EPSILON {
                scheduled.activity.fire(scheduled.next_due, state);
                scheduled.firings += 1;
                // Cycles shorter than a tick collapse into this firing.
                scheduled.next_due += scheduled.interval;
                if scheduled.next_due <= self.clock + DUE_EPSILON {
                    scheduled.next_due = self.clock + scheduled.interval;
                }
            }
        }

        // 4. Record
        series.record(tick, state);

        log::debug!(
            "tick {}: acids={:.4} (+{:.4}), methane={:.4} (+{:.4}), pH={:.2}",
            tick,
            state.organic_acids(),
            rates.organic_acids,
            state.methane_production(),
            rates.methane,
            state.ph()
        );
        Ok(())
    }
}
