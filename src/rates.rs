//! Production-rate model for anaerobic digestion.
//!
//! Both rates share the same environmental response: a Gaussian bell in
//! temperature and another in pH, each peaking at 1.0 at the optimum and
//! falling off smoothly on either side. Substrate response is sub-linear,
//! with a different saturation exponent for acidogenesis (0.5) and
//! methanogenesis (0.7).

use crate::error::{Result, require_finite, require_non_negative, require_positive};

// --- Model Parameters ---

/// Peak organic-acid production per tick, reached at optimal conditions.
pub const MAX_ORGANIC_ACIDS_RATE: f64 = 0.5;

/// Peak methane production per tick before the retention-time scaling.
pub const MAX_METHANE_RATE: f64 = 0.8;

/// Mesophilic optimum (°C).
pub const TEMPERATURE_OPTIMAL: f64 = 35.0;

/// Width (standard deviation) of the temperature bell (°C).
pub const TEMPERATURE_SPREAD: f64 = 5.0;

pub const PH_OPTIMAL: f64 = 7.0;

/// Width (standard deviation) of the pH bell.
pub const PH_SPREAD: f64 = 1.0;

pub const ACID_SUBSTRATE_EXPONENT: f64 = 0.5;
pub const METHANE_SUBSTRATE_EXPONENT: f64 = 0.7;

fn gaussian(x: f64, optimum: f64, spread: f64) -> f64 {
    (-(x - optimum).powi(2) / (2.0 * spread.powi(2))).exp()
}

/// Temperature factor in `(0, 1]`, equal to 1.0 at [`TEMPERATURE_OPTIMAL`].
pub fn temperature_influence(temperature: f64) -> f64 {
    gaussian(temperature, TEMPERATURE_OPTIMAL, TEMPERATURE_SPREAD)
}

/// pH factor in `(0, 1]`, equal to 1.0 at [`PH_OPTIMAL`].
pub fn ph_influence(ph: f64) -> f64 {
    gaussian(ph, PH_OPTIMAL, PH_SPREAD)
}

/// Organic-acid production for one tick.
///
/// `0.5 * f(T) * g(pH) * sqrt(organic_matter)`
///
/// # Errors
/// `Domain` if `organic_matter` is negative or any input is not finite.
pub fn organic_acids_rate(organic_matter: f64, temperature: f64, ph: f64) -> Result<f64> {
    let organic_matter = require_non_negative("organic_matter", organic_matter)?;
    let temperature = require_finite("temperature", temperature)?;
    let ph = require_finite("ph", ph)?;

    Ok(MAX_ORGANIC_ACIDS_RATE
        * temperature_influence(temperature)
        * ph_influence(ph)
        * organic_matter.powf(ACID_SUBSTRATE_EXPONENT))
}

/// Methane production for one tick.
///
/// `0.8 * f(T) * g(pH) * (1 / retention_time) * organic_matter^0.7`
///
/// Shorter retention means faster throughput, so the rate scales inversely
/// with it: halving `retention_time` doubles the result.
///
/// # Errors
/// `Domain` if `organic_matter < 0`, `retention_time <= 0`, or any input is
/// not finite.
pub fn methane_rate(
    organic_matter: f64,
    temperature: f64,
    ph: f64,
    retention_time: f64,
) -> Result<f64> {
    let organic_matter = require_non_negative("organic_matter", organic_matter)?;
    let retention_time = require_positive("retention_time", retention_time)?;
    let temperature = require_finite("temperature", temperature)?;
    let ph = require_finite("ph", ph)?;

    let retention_time_factor = 1.0 / retention_time;
    Ok(MAX_METHANE_RATE
        * temperature_influence(temperature)
        * ph_influence(ph)
        * retention_time_factor
        * organic_matter.powf(METHANE_SUBSTRATE_EXPONENT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_influences_peak_at_optimum() {
        assert_eq!(temperature_influence(TEMPERATURE_OPTIMAL), 1.0);
        assert_eq!(ph_influence(PH_OPTIMAL), 1.0);
        assert!(temperature_influence(30.0) < 1.0);
        assert!(ph_influence(6.0) < 1.0);
    }

    #[test]
    fn test_influences_symmetric() {
        for d in [0.5, 1.0, 3.0, 10.0] {
            assert_relative_eq!(
                temperature_influence(TEMPERATURE_OPTIMAL - d),
                temperature_influence(TEMPERATURE_OPTIMAL + d),
                epsilon = 1e-15
            );
            assert_relative_eq!(
                ph_influence(PH_OPTIMAL - d),
                ph_influence(PH_OPTIMAL + d),
                epsilon = 1e-15
            );
        }
    }

    #[test]
    fn test_one_sigma_is_exp_minus_half() {
        let expected = (-0.5f64).exp();
        assert_relative_eq!(temperature_influence(40.0), expected, epsilon = 1e-12);
        assert_relative_eq!(ph_influence(8.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_rates() {
        let acids = organic_acids_rate(100.0, 35.0, 7.0).unwrap();
        assert_relative_eq!(acids, 5.0, epsilon = 1e-12);

        // 0.8 / 5 * 100^0.7
        let methane = methane_rate(100.0, 35.0, 7.0, 5.0).unwrap();
        assert_relative_eq!(methane, 0.16 * 10f64.powf(1.4), epsilon = 1e-12);
        assert_relative_eq!(methane, 4.019, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_substrate_gives_zero() {
        assert_eq!(organic_acids_rate(0.0, 35.0, 7.0).unwrap(), 0.0);
        assert_eq!(methane_rate(0.0, 35.0, 7.0, 5.0).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_substrate_rejected() {
        let err = organic_acids_rate(-1.0, 35.0, 7.0).unwrap_err();
        assert!(err.to_string().contains("organic_matter"));
        assert!(methane_rate(-1.0, 35.0, 7.0, 5.0).unwrap_err().is_domain());
    }

    #[test]
    fn test_bad_retention_rejected() {
        for retention in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let err = methane_rate(100.0, 35.0, 7.0, retention).unwrap_err();
            assert!(err.is_domain());
            assert!(err.to_string().contains("retention_time"));
        }
    }

    #[test]
    fn test_non_finite_environment_rejected() {
        assert!(organic_acids_rate(10.0, f64::NAN, 7.0).is_err());
        assert!(methane_rate(10.0, 35.0, f64::INFINITY, 5.0).is_err());
    }
}
