//! Per-tick state update.
//!
//! The two cumulative products form a tiny ODE system whose right-hand side
//! is the pair of production rates:
//!
//!   d(acids)/dt   = organic_acids_rate(F, T, pH)
//!   d(methane)/dt = methane_rate(F, T, pH, R)
//!
//! Each tick integrates it over one unit of time with `russell_ode`. The rates
//! are held constant for the whole tick, so forward Euler and RK4 both land on
//! `total + rate` exactly.

use clap::ValueEnum;
use russell_lab::Vector;
use russell_ode::{Method, OdeSolver, Params, System};
use serde::{Deserialize, Serialize};

use crate::error::{DigesterError, Result};
use crate::rates::{methane_rate, organic_acids_rate};
use crate::state::DigesterState;

// Number of state variables: accumulated organic acids and methane.
const N_STATES: usize = 2;

/// Length of one tick in simulated time units.
pub const TICK: f64 = 1.0;

/// Integration scheme used for each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMethod {
    #[default]
    ForwardEuler,
    RungeKutta4,
}

impl From<IntegrationMethod> for Method {
    fn from(method: IntegrationMethod) -> Self {
        match method {
            IntegrationMethod::ForwardEuler => Method::FwEuler,
            IntegrationMethod::RungeKutta4 => Method::Rk4,
        }
    }
}

/// Production rates for the tick being integrated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickRates {
    pub organic_acids: f64,
    pub methane: f64,
}

impl TickRates {
    /// Evaluates both rate formulas against the state's pH and retention time.
    pub fn evaluate(state: &DigesterState, organic_matter: f64, temperature: f64) -> Result<Self> {
        Ok(Self {
            organic_acids: organic_acids_rate(organic_matter, temperature, state.ph())?,
            methane: methane_rate(
                organic_matter,
                temperature,
                state.ph(),
                state.retention_time(),
            )?,
        })
    }
}

/// Applies one tick of production to a [`DigesterState`].
pub struct StateUpdater {
    solver: OdeSolver<'static, TickRates>,
    method: IntegrationMethod,
}

impl StateUpdater {
    pub fn new(method: IntegrationMethod) -> Result<Self> {
        let system = System::new(N_STATES, |dydt: &mut Vector, _t: f64, _y: &Vector, rates: &mut TickRates| {
            dydt[0] = rates.organic_acids;
            dydt[1] = rates.methane;
            Ok(())
        });

        let params = Params::new(method.into());
        let solver = OdeSolver::new(params, system)
            .map_err(|e| DigesterError::Solver(format!("initialization failed: {e}")))?;

        Ok(Self { solver, method })
    }

    pub fn method(&self) -> IntegrationMethod {
        self.method
    }

    /// Advances `state` by one tick of feedstock `organic_matter` at
    /// `temperature`, returning the rates that were applied.
    ///
    /// Rates are evaluated before anything is written, so a domain error
    /// leaves `state` exactly as it was.
    pub fn update(
        &mut self,
        state: &mut DigesterState,
        organic_matter: f64,
        temperature: f64,
    ) -> Result<TickRates> {
        let mut rates = TickRates::evaluate(state, organic_matter, temperature)?;

        let mut y = Vector::from(&[state.organic_acids(), state.methane_production()]);
        self.solver
            .solve(&mut y, 0.0, TICK, Some(TICK), &mut rates, None)
            .map_err(|e| DigesterError::Solver(e.to_string()))?;

        state.set_totals(y[0], y[1]);
        Ok(rates)
    }
}
