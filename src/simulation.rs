//! End-to-end run: configuration in, series and summary out.

use serde::Serialize;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::recorder::TimeSeries;
use crate::scheduler::{GasStorageActivity, ReactorActivity, Scheduler};
use crate::state::DigesterState;
use crate::updater::StateUpdater;

/// Firing count for one periodic activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityFirings {
    pub name: String,
    pub count: usize,
}

/// Headline numbers for a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub config: SimulationConfig,
    pub ticks: usize,
    pub final_organic_acids: f64,
    pub final_methane_production: f64,
    pub final_ph: f64,
    /// Mean organic-acid production per tick
    pub mean_organic_acids_rate: f64,
    /// Mean methane production per tick
    pub mean_methane_rate: f64,
    pub activity_firings: Vec<ActivityFirings>,
}

/// Output of [`Simulation::run`].
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub series: TimeSeries,
    pub state: DigesterState,
    pub summary: RunSummary,
}

/// A configured digester with the reactor and gas-storage activities attached.
pub struct Simulation {
    config: SimulationConfig,
    state: DigesterState,
    scheduler: Scheduler,
}

impl Simulation {
    /// Validates `config` and builds the state, updater and scheduler.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let state = DigesterState::new(config.initial_ph, config.retention_time)?;
        let updater = StateUpdater::new(config.method)?;
        let scheduler = Scheduler::new(updater, config.organic_matter, config.temperature, config.horizon)
            .with_activity(ReactorActivity)
            .with_activity(GasStorageActivity);

        Ok(Self {
            config,
            state,
            scheduler,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &DigesterState {
        &self.state
    }

    /// Mutable access before the run starts, e.g. to override pH.
    pub fn state_mut(&mut self) -> &mut DigesterState {
        &mut self.state
    }

    pub fn run(mut self) -> Result<SimulationRun> {
        log::info!(
            "Starting digester run: pH={}, retention={}, feedstock={}, T={}°C, {} ticks ({:?})",
            self.config.initial_ph,
            self.config.retention_time,
            self.config.organic_matter,
            self.config.temperature,
            self.config.horizon,
            self.config.method
        );

        let series = self.scheduler.run(&mut self.state)?;

        let ticks = series.len();
        let summary = RunSummary {
            config: self.config,
            ticks,
            final_organic_acids: self.state.organic_acids(),
            final_methane_production: self.state.methane_production(),
            final_ph: self.state.ph(),
            mean_organic_acids_rate: self.state.organic_acids() / ticks as f64,
            mean_methane_rate: self.state.methane_production() / ticks as f64,
            activity_firings: self
                .scheduler
                .activity_firings()
                .into_iter()
                .map(|(name, count)| ActivityFirings { name, count })
                .collect(),
        };

        log::info!(
            "Run complete after {} ticks: organic acids={:.4}, methane={:.4}",
            ticks,
            summary.final_organic_acids,
            summary.final_methane_production
        );

        Ok(SimulationRun {
            series,
            state: self.state,
            summary,
        })
    }
}

/// Builds and runs a simulation in one call.
pub fn simulate(config: SimulationConfig) -> Result<SimulationRun> {
    Simulation::new(config)?.run()
}
