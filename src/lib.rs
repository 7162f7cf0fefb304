//! Biogas digester - time-stepped anaerobic digestion simulator
//!
//! Feeds a constant amount of organic matter into a digester at a fixed
//! temperature and pH, and tracks accumulated organic acids and methane tick
//! by tick. Production follows Gaussian temperature/pH responses with a
//! sub-linear substrate term; methane additionally scales with the inverse of
//! the retention time.
//!
//! ```no_run
//! use biogas_digester::{SimulationConfig, simulate};
//!
//! let run = simulate(SimulationConfig::default())?;
//! println!("methane after {} ticks: {:.2}", run.summary.ticks, run.summary.final_methane_production);
//! # Ok::<(), biogas_digester::DigesterError>(())
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod plot;
pub mod rates;
pub mod recorder;
pub mod scheduler;
pub mod simulation;
pub mod state;
pub mod updater;

pub use config::SimulationConfig;
pub use error::{DigesterError, Result};
pub use rates::{methane_rate, organic_acids_rate};
pub use recorder::{TimeSeries, TimeSeriesRecord};
pub use scheduler::{GasStorageActivity, PeriodicActivity, ReactorActivity, Scheduler};
pub use simulation::{ActivityFirings, RunSummary, Simulation, SimulationRun, simulate};
pub use state::DigesterState;
pub use updater::{IntegrationMethod, StateUpdater, TickRates};
