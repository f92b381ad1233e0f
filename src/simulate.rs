//! Seeded generators for common stochastic processes.
//!
//! Handy for exercising the pipeline on series with known properties.
//!
//! # Example
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use stationarizer::simulate::{unit_root, white_noise};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let noise = white_noise(100, 1.0, &mut rng).unwrap();
//! let walk = unit_root(100, 1.0, &mut rng).unwrap();
//! assert_eq!(noise.len(), walk.len());
//! ```

use crate::error::{Result, StationarizeError};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Gaussian white noise with zero mean: `y(t) = e(t)`.
pub fn white_noise<R: Rng + ?Sized>(steps: usize, std: f64, rng: &mut R) -> Result<Vec<f64>> {
    let normal = Normal::new(0.0, std).map_err(|e| {
        StationarizeError::InvalidParameter(format!("noise std {std} rejected: {e}"))
    })?;
    Ok((0..steps).map(|_| normal.sample(rng)).collect())
}

/// Trend stationary process: `y(t) = slope * t + e(t)`.
pub fn trend_stationary<R: Rng + ?Sized>(
    steps: usize,
    slope: f64,
    std: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let noise = white_noise(steps, std, rng)?;
    Ok(noise
        .into_iter()
        .enumerate()
        .map(|(t, e)| slope * t as f64 + e)
        .collect())
}

/// Unit root process (random walk): `y(t) = y(t-1) + e(t)`.
pub fn unit_root<R: Rng + ?Sized>(steps: usize, std: f64, rng: &mut R) -> Result<Vec<f64>> {
    Ok(cumulative_sum(&white_noise(steps, std, rng)?))
}

/// Unit root process with a deterministic drift growing in time:
/// `y(t) = y(t-1) + slope * t + e(t)`.
pub fn trend_stationary_unit_root<R: Rng + ?Sized>(
    steps: usize,
    slope: f64,
    std: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    Ok(cumulative_sum(&trend_stationary(steps, slope, std, rng)?))
}

fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, &v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn generators_have_requested_length() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(white_noise(25, 1.0, &mut rng).unwrap().len(), 25);
        assert_eq!(trend_stationary(25, 3.0, 1.0, &mut rng).unwrap().len(), 25);
        assert_eq!(unit_root(25, 1.0, &mut rng).unwrap().len(), 25);
        assert_eq!(
            trend_stationary_unit_root(25, 3.0, 1.0, &mut rng)
                .unwrap()
                .len(),
            25
        );
    }

    #[test]
    fn same_seed_same_series() {
        let a = unit_root(50, 1.0, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = unit_root(50, 1.0, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_std_gives_deterministic_paths() {
        let mut rng = StdRng::seed_from_u64(0);
        let trend = trend_stationary(4, 2.0, 0.0, &mut rng).unwrap();
        assert_eq!(trend, vec![0.0, 2.0, 4.0, 6.0]);

        let integrated = trend_stationary_unit_root(4, 1.0, 0.0, &mut rng).unwrap();
        assert_eq!(integrated, vec![0.0, 1.0, 3.0, 6.0]);
    }

    #[test]
    fn white_noise_moments() {
        let mut rng = StdRng::seed_from_u64(11);
        let noise = white_noise(20_000, 2.0, &mut rng).unwrap();
        let mean = noise.iter().sum::<f64>() / noise.len() as f64;
        let var = noise.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / noise.len() as f64;
        assert_relative_eq!(mean, 0.0, epsilon = 0.1);
        assert_relative_eq!(var, 4.0, epsilon = 0.2);
    }

    #[test]
    fn invalid_std_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            white_noise(10, -1.0, &mut rng),
            Err(StationarizeError::InvalidParameter(_))
        ));
    }
}
