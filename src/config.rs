//! Run configuration.
//!
//! Defaults reproduce the reference run: neutral pH, 5-unit retention,
//! 100 units of feedstock per tick at 35 °C for 100 ticks.

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DigesterError, Result, require_finite, require_non_negative, require_positive};
use crate::updater::IntegrationMethod;

/// Parameters for a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// pH at run start (held constant unless overridden)
    pub initial_ph: f64,
    /// Retention time in ticks, must be > 0
    pub retention_time: f64,
    /// Feedstock supplied every tick, must be >= 0
    pub organic_matter: f64,
    /// Digester temperature (°C)
    pub temperature: f64,
    /// Number of ticks to simulate
    pub horizon: usize,
    pub method: IntegrationMethod,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_ph: 7.0,
            retention_time: 5.0,
            organic_matter: 100.0,
            temperature: 35.0,
            horizon: 100,
            method: IntegrationMethod::ForwardEuler,
        }
    }
}

impl SimulationConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&contents)?;
        log::info!("Loaded simulation config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Load from a JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(DigesterError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                log::info!("Config file {:?} not found, using defaults", path.as_ref());
                Self::default()
            }
            Err(DigesterError::Io(e)) => {
                log::warn!("Failed to read config {:?}: {}, using defaults", path.as_ref(), e);
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to parse config {:?}: {}, using defaults", path.as_ref(), e);
                Self::default()
            }
        }
    }

    /// Checks every parameter, reporting the first violation.
    pub fn validate(&self) -> Result<()> {
        require_finite("initial_ph", self.initial_ph)?;
        require_positive("retention_time", self.retention_time)?;
        require_non_negative("organic_matter", self.organic_matter)?;
        require_finite("temperature", self.temperature)?;
        if self.horizon == 0 {
            return Err(DigesterError::Config("horizon must be at least one tick".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_reference_run() {
        let config = SimulationConfig::default();
        assert_eq!(config.initial_ph, 7.0);
        assert_eq!(config.retention_time, 5.0);
        assert_eq!(config.horizon, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_names_failing_parameter() {
        let config = SimulationConfig {
            retention_time: 0.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.is_domain());
        assert!(err.to_string().contains("retention_time"));

        let config = SimulationConfig {
            organic_matter: -3.0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("organic_matter"));

        let config = SimulationConfig {
            horizon: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DigesterError::Config(_))));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"temperature": 30.0, "horizon": 12, "method": "runge_kutta4"}}"#).unwrap();

        let config = SimulationConfig::load(file.path()).unwrap();
        assert_eq!(config.temperature, 30.0);
        assert_eq!(config.horizon, 12);
        assert_eq!(config.method, IntegrationMethod::RungeKutta4);
        assert_eq!(config.initial_ph, 7.0);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = SimulationConfig::load_or_default(dir.path().join("absent.json"));
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_load_or_default_on_unreadable_path() {
        let dir = tempfile::TempDir::new().unwrap();
        match SimulationConfig::load(dir.path()) {
            Err(DigesterError::Io(e)) => assert_ne!(e.kind(), ErrorKind::NotFound),
            other => panic!("expected I/O error, got {other:?}"),
        }
        assert_eq!(SimulationConfig::load_or_default(dir.path()), SimulationConfig::default());
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(SimulationConfig::load(file.path()), Err(DigesterError::Json(_))));
        assert_eq!(SimulationConfig::load_or_default(file.path()), SimulationConfig::default());
    }
}
