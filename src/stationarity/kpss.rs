//! KPSS test for trend (or level) stationarity.
//!
//! Tests the null hypothesis that a series is stationary around a
//! deterministic trend. A small p-value is evidence against stationarity.

use super::{check_series, CriticalValues, Regression, StationarityTest, TestResult};
use crate::error::TestError;
use crate::utils::{mean, ols};

/// Tabulated p-values matching the critical value rows below.
const P_VALUES: [f64; 4] = [0.10, 0.05, 0.025, 0.01];
const CRITICAL_CONSTANT: [f64; 4] = [0.347, 0.463, 0.574, 0.739];
const CRITICAL_CONSTANT_TREND: [f64; 4] = [0.119, 0.146, 0.176, 0.216];

/// Residual sum of squares below this share of the total counts as a perfect fit.
const PERFECT_FIT_TOL: f64 = 1e-20;

/// KPSS test (Kwiatkowski, Phillips, Schmidt and Shin, 1992).
///
/// The statistic compares the partial sums of the regression residuals with
/// a Bartlett-kernel estimate of their long-run variance. P-values are
/// interpolated in the published table and therefore bounded to
/// [0.01, 0.10].
#[derive(Debug, Clone, Default)]
pub struct Kpss {
    /// Deterministic terms
    pub regression: Regression,
    /// Bartlett bandwidth (default: Hobijn et al. 1998 automatic selection)
    pub lags: Option<usize>,
}

impl Kpss {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set deterministic terms.
    pub fn regression(mut self, regression: Regression) -> Self {
        self.regression = regression;
        self
    }

    /// Set a fixed bandwidth.
    pub fn lags(mut self, lags: usize) -> Self {
        self.lags = Some(lags);
        self
    }

    /// Minimum series length for the configured regression.
    pub fn min_length(&self) -> usize {
        self.regression.n_terms() + 2
    }

    fn residuals(&self, series: &[f64]) -> Result<Vec<f64>, TestError> {
        let level = mean(series);
        let residuals = match self.regression {
            Regression::Constant => series.iter().map(|x| x - level).collect(),
            Regression::ConstantTrend => {
                ols(series, &self.regression.design(series.len()))?.residuals
            }
        };

        let tss: f64 = series.iter().map(|x| (x - level).powi(2)).sum();
        let ssr: f64 = residuals.iter().map(|r| r * r).sum();
        if ssr <= PERFECT_FIT_TOL * tss {
            return Err(TestError::Singular);
        }

        Ok(residuals)
    }

    fn critical_row(&self) -> &'static [f64; 4] {
        match self.regression {
            Regression::Constant => &CRITICAL_CONSTANT,
            Regression::ConstantTrend => &CRITICAL_CONSTANT_TREND,
        }
    }
}

impl StationarityTest for Kpss {
    fn name(&self) -> &str {
        "KPSS"
    }

    fn run(&self, series: &[f64]) -> Result<TestResult, TestError> {
        check_series(series, self.min_length())?;

        let n = series.len();
        let residuals = self.residuals(series)?;

        let lags = self
            .lags
            .unwrap_or_else(|| automatic_bandwidth(&residuals))
            .min(n - 1);

        // Partial sums of the residuals
        let eta = residuals
            .iter()
            .scan(0.0, |acc, &r| {
                *acc += r;
                Some(*acc * *acc)
            })
            .sum::<f64>()
            / (n * n) as f64;

        let variance = long_run_variance(&residuals, lags);
        if variance <= 0.0 || !variance.is_finite() {
            return Err(TestError::Singular);
        }

        let statistic = eta / variance;
        let critical = self.critical_row();

        Ok(TestResult {
            statistic,
            p_value: interpolate_p_value(statistic, critical),
            lags,
            n_obs: n,
            critical_values: CriticalValues {
                cv_1pct: critical[3],
                cv_5pct: critical[1],
                cv_10pct: critical[0],
            },
        })
    }
}

/// Sum of lag-`lag` products of the residuals.
fn autocovariance_sum(residuals: &[f64], lag: usize) -> f64 {
    residuals[lag..]
        .iter()
        .zip(residuals.iter())
        .map(|(a, b)| a * b)
        .sum()
}

/// Newey-West long-run variance with a Bartlett kernel.
fn long_run_variance(residuals: &[f64], lags: usize) -> f64 {
    let n = residuals.len() as f64;
    let mut s = autocovariance_sum(residuals, 0);
    for lag in 1..=lags {
        let weight = 1.0 - lag as f64 / (lags as f64 + 1.0);
        s += 2.0 * weight * autocovariance_sum(residuals, lag);
    }
    s / n
}

/// Data-dependent bandwidth of Hobijn, Franses and Ooms (1998).
fn automatic_bandwidth(residuals: &[f64]) -> usize {
    let n = residuals.len();
    let nf = n as f64;
    let cov_lags = nf.powf(2.0 / 9.0) as usize;

    let mut s0 = autocovariance_sum(residuals, 0) / nf;
    let mut s1 = 0.0;
    for lag in 1..=cov_lags.min(n - 1) {
        let product = autocovariance_sum(residuals, lag) / (nf / 2.0);
        s0 += product;
        s1 += lag as f64 * product;
    }

    let s_hat = s1 / s0;
    let gamma_hat = 1.1447 * (s_hat * s_hat).powf(1.0 / 3.0);
    let bandwidth = gamma_hat * nf.powf(1.0 / 3.0);
    if bandwidth.is_finite() && bandwidth > 0.0 {
        bandwidth as usize
    } else {
        0
    }
}

/// Linear interpolation in the KPSS table, clamped to its end points.
fn interpolate_p_value(statistic: f64, critical: &[f64; 4]) -> f64 {
    if statistic <= critical[0] {
        return P_VALUES[0];
    }
    if statistic >= critical[3] {
        return P_VALUES[3];
    }
    for i in 1..critical.len() {
        if statistic <= critical[i] {
            let frac = (statistic - critical[i - 1]) / (critical[i] - critical[i - 1]);
            return P_VALUES[i - 1] + frac * (P_VALUES[i] - P_VALUES[i - 1]);
        }
    }
    P_VALUES[3]
}
