//! Digester state.
//!
//! One value per run. Organic acids and methane accumulate; pH and retention
//! time are exogenous and stay fixed unless the caller overrides pH.

use serde::Serialize;

use crate::error::{Result, require_finite, require_positive};

/// Accumulated products plus the exogenous operating parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigesterState {
    organic_acids: f64,
    methane_production: f64,
    ph: f64,
    retention_time: f64,
}

impl DigesterState {
    /// Fresh digester with nothing produced yet.
    ///
    /// # Errors
    /// `Domain` if `retention_time` is not finite and positive, or
    /// `initial_ph` is not finite.
    pub fn new(initial_ph: f64, retention_time: f64) -> Result<Self> {
        Ok(Self {
            organic_acids: 0.0,
            methane_production: 0.0,
            ph: require_finite("initial_ph", initial_ph)?,
            retention_time: require_positive("retention_time", retention_time)?,
        })
    }

    pub fn organic_acids(&self) -> f64 {
        self.organic_acids
    }

    pub fn methane_production(&self) -> f64 {
        self.methane_production
    }

    pub fn ph(&self) -> f64 {
        self.ph
    }

    pub fn retention_time(&self) -> f64 {
        self.retention_time
    }

    /// Overrides the exogenous pH. The simulation never calls this itself.
    pub fn set_ph(&mut self, ph: f64) -> Result<()> {
        self.ph = require_finite("ph", ph)?;
        Ok(())
    }

    /// Stores integrated totals. Totals never decrease.
    pub(crate) fn set_totals(&mut self, organic_acids: f64, methane_production: f64) {
        debug_assert!(organic_acids >= self.organic_acids);
        debug_assert!(methane_production >= self.methane_production);
        self.organic_acids = organic_acids;
        self.methane_production = methane_production;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = DigesterState::new(7.0, 5.0).unwrap();
        assert_eq!(state.organic_acids(), 0.0);
        assert_eq!(state.methane_production(), 0.0);
        assert_eq!(state.ph(), 7.0);
        assert_eq!(state.retention_time(), 5.0);
    }

    #[test]
    fn test_rejects_non_positive_retention() {
        assert!(DigesterState::new(7.0, 0.0).unwrap_err().is_domain());
        assert!(DigesterState::new(7.0, -5.0).unwrap_err().is_domain());
    }

    #[test]
    fn test_set_ph() {
        let mut state = DigesterState::new(7.0, 5.0).unwrap();
        state.set_ph(6.5).unwrap();
        assert_eq!(state.ph(), 6.5);
        assert!(state.set_ph(f64::NAN).is_err());
        assert_eq!(state.ph(), 6.5);
    }
}
