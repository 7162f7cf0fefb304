//! Error types for the digester simulator.

use thiserror::Error;

/// Everything that can abort a simulation run or its outputs.
#[derive(Error, Debug)]
pub enum DigesterError {
    /// A physical parameter outside its valid domain.
    #[error("invalid {parameter} = {value}: must be {constraint}")]
    Domain {
        parameter: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// Configuration that is unusable for reasons other than physics
    #[error("configuration error: {0}")]
    Config(String),

    /// The ODE solver refused to take a step
    #[error("solver error: {0}")]
    Solver(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// gnuplot could not be started or could not write its output
    #[error("plot error: {0}")]
    Plot(String),
}

impl DigesterError {
    /// Creates a domain error for `parameter`.
    pub fn domain(parameter: &'static str, value: f64, constraint: &'static str) -> Self {
        DigesterError::Domain {
            parameter,
            value,
            constraint,
        }
    }

    /// True for invalid physical parameters.
    pub fn is_domain(&self) -> bool {
        matches!(self, DigesterError::Domain { .. })
    }
}

pub type Result<T> = std::result::Result<T, DigesterError>;

/// Fails unless `value` is finite and `>= 0`.
pub(crate) fn require_non_negative(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DigesterError::domain(parameter, value, "finite and >= 0"))
    }
}

/// Fails unless `value` is finite and `> 0`.
pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DigesterError::domain(parameter, value, "finite and > 0"))
    }
}

/// Fails unless `value` is finite.
pub(crate) fn require_finite(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DigesterError::domain(parameter, value, "finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_message_names_parameter() {
        let err = require_positive("retention_time", 0.0).unwrap_err();
        assert!(err.is_domain());
        assert_eq!(err.to_string(), "invalid retention_time = 0: must be finite and > 0");
    }

    #[test]
    fn test_non_negative_accepts_zero() {
        assert_eq!(require_non_negative("organic_matter", 0.0).unwrap(), 0.0);
        assert!(require_non_negative("organic_matter", -1.0).is_err());
        assert!(require_non_negative("organic_matter", f64::NAN).is_err());
    }
}
