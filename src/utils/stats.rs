//! Statistical utility functions.

use statrs::distribution::{ContinuousCDF, Normal};

/// Cumulative distribution function of the standard normal distribution.
///
/// # Example
/// ```
/// use stationarizer::utils::normal_cdf;
///
/// assert!((normal_cdf(1.96) - 0.975).abs() < 1e-3);
/// ```
pub fn normal_cdf(x: f64) -> f64 {
    match Normal::new(0.0, 1.0) {
        Ok(normal) => normal.cdf(x),
        Err(_) => f64::NAN,
    }
}

/// Arithmetic mean, NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Whether every value equals the first one.
pub fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_cdf_known_values() {
        assert_relative_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(normal_cdf(1.644854), 0.95, epsilon = 1e-5);
        assert_relative_eq!(normal_cdf(-1.644854), 0.05, epsilon = 1e-5);
    }

    #[test]
    fn mean_of_series() {
        assert_relative_eq!(mean(&[2.0, -1.0, 4.5, 0.5]), 1.5, epsilon = 1e-12);
        assert_relative_eq!(mean(&[-3.0]), -3.0, epsilon = 1e-12);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn constant_detection() {
        assert!(is_constant(&[2.0, 2.0, 2.0]));
        assert!(is_constant(&[]));
        assert!(!is_constant(&[2.0, 2.0, 2.1]));
    }
}
