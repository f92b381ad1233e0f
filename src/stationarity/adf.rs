//! Augmented Dickey-Fuller unit root test.
//!
//! Tests the null hypothesis that a series has a unit root. A small p-value
//! is evidence against the unit root.

use super::{check_series, CriticalValues, Regression, StationarityTest, TestResult};
use crate::error::TestError;
use crate::transform::difference;
use crate::utils::{normal_cdf, ols, OlsFit};
use serde::Deserialize;

/// Lag order selection for the augmented regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Autolag {
    /// Minimize the Akaike information criterion.
    #[default]
    Aic,
    /// Minimize the Bayesian information criterion.
    Bic,
    /// Use the maximum lag order as is.
    Fixed,
}

/// Augmented Dickey-Fuller test.
///
/// Regresses the first difference on the deterministic terms, the lagged
/// level, and lagged differences:
///
/// Δy_t = α + δ t + β y_{t-1} + Σ γ_i Δy_{t-i} + ε_t
///
/// The statistic is the t-value of β. P-values follow MacKinnon (1994),
/// critical values MacKinnon (2010).
#[derive(Debug, Clone, Default)]
pub struct Adf {
    /// Deterministic terms
    pub regression: Regression,
    /// Maximum lag order (default: ceil(12 (n/100)^(1/4)))
    pub max_lags: Option<usize>,
    /// Lag selection
    pub autolag: Autolag,
}

impl Adf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set deterministic terms.
    pub fn regression(mut self, regression: Regression) -> Self {
        self.regression = regression;
        self
    }

    /// Set maximum lag order.
    pub fn max_lags(mut self, max_lags: usize) -> Self {
        self.max_lags = Some(max_lags);
        self
    }

    /// Set lag selection.
    pub fn autolag(mut self, autolag: Autolag) -> Self {
        self.autolag = autolag;
        self
    }

    /// Minimum series length for the configured regression.
    pub fn min_length(&self) -> usize {
        2 * (self.regression.n_terms() + 1)
    }

    /// Select the lag order on the common sample that the largest lag allows.
    fn select_lag(
        &self,
        series: &[f64],
        diff: &[f64],
        max_lags: usize,
    ) -> Result<usize, TestError> {
        let mut best: Option<(f64, usize)> = None;

        for lag in 0..=max_lags {
            let (y, design) = build_design(series, diff, max_lags, lag, self.regression);
            let Ok(fit) = ols(&y, &design) else {
                continue;
            };
            let ic = match self.autolag {
                Autolag::Bic => fit.bic(),
                Autolag::Aic | Autolag::Fixed => fit.aic(),
            };
            if !ic.is_finite() {
                continue;
            }
            // Strict comparison keeps the smallest lag on ties
            if best.map_or(true, |(best_ic, _)| ic < best_ic) {
                best = Some((ic, lag));
            }
        }

        best.map(|(_, lag)| lag).ok_or(TestError::Singular)
    }
}

impl StationarityTest for Adf {
    fn name(&self) -> &str {
        "ADF"
    }

    fn run(&self, series: &[f64]) -> Result<TestResult, TestError> {
        check_series(series, self.min_length())?;

        let n = series.len();
        let n_terms = self.regression.n_terms();
        let bound = n / 2 - n_terms - 1;
        let default_lags = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize;
        let max_lags = self.max_lags.unwrap_or(default_lags).min(bound);

        let diff = difference(series);
        let lags = match self.autolag {
            Autolag::Fixed => max_lags,
            Autolag::Aic | Autolag::Bic => self.select_lag(series, &diff, max_lags)?,
        };

        let (y, design) = build_design(series, &diff, lags, lags, self.regression);
        let fit: OlsFit = ols(&y, &design)?;
        let statistic = fit.t_value(n_terms);
        if !statistic.is_finite() {
            return Err(TestError::Singular);
        }

        Ok(TestResult {
            statistic,
            p_value: mackinnon_p_value(statistic, self.regression),
            lags,
            n_obs: fit.n_obs,
            critical_values: mackinnon_critical_values(self.regression, fit.n_obs),
        })
    }
}

/// Build the ADF regression on rows `start..diff.len()` with `lags` lagged
/// differences. Columns: deterministic terms, lagged level, lagged differences.
fn build_design(
    series: &[f64],
    diff: &[f64],
    start: usize,
    lags: usize,
    regression: Regression,
) -> (Vec<f64>, Vec<Vec<f64>>) {
    debug_assert!(start >= lags);
    let rows = start..diff.len();
    let nobs = rows.len();

    let y = diff[rows.clone()].to_vec();

    let mut design = regression.design(nobs);
    // diff[t] = series[t + 1] - series[t], so the lagged level is series[t]
    design.push(series[rows.clone()].to_vec());
    for lag in 1..=lags {
        design.push(rows.clone().map(|t| diff[t - lag]).collect());
    }

    (y, design)
}

/// MacKinnon (1994) response surface for one regression type, N = 1.
struct ResponseSurface {
    tau_max: f64,
    tau_min: f64,
    tau_star: f64,
    small_p: [f64; 3],
    large_p: [f64; 4],
}

fn response_surface(regression: Regression) -> ResponseSurface {
    match regression {
        Regression::Constant => ResponseSurface {
            tau_max: 2.74,
            tau_min: -18.83,
            tau_star: -1.61,
            small_p: [2.1659, 1.4412, 3.8269e-2],
            large_p: [1.7339, 9.3202e-1, -1.2745e-1, -1.0368e-2],
        },
        Regression::ConstantTrend => ResponseSurface {
            tau_max: 0.7,
            tau_min: -16.18,
            tau_star: -2.89,
            small_p: [3.2512, 1.6047, 4.9588e-2],
            large_p: [2.5261, 6.1654e-1, -3.7956e-1, -6.0285e-2],
        },
    }
}

/// Evaluate c0 + c1 x + c2 x^2 + ...
fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Approximate p-value of an ADF statistic (MacKinnon 1994).
pub fn mackinnon_p_value(statistic: f64, regression: Regression) -> f64 {
    let surface = response_surface(regression);

    if statistic > surface.tau_max {
        1.0
    } else if statistic < surface.tau_min {
        0.0
    } else if statistic <= surface.tau_star {
        normal_cdf(polyval(&surface.small_p, statistic))
    } else {
        normal_cdf(polyval(&surface.large_p, statistic))
    }
}

/// Finite-sample critical values (MacKinnon 2010) for `nobs` observations.
pub fn mackinnon_critical_values(regression: Regression, nobs: usize) -> CriticalValues {
    let table: [[f64; 4]; 3] = match regression {
        Regression::Constant => [
            [-3.43035, -6.5393, -16.786, -79.433],
            [-2.86154, -2.8903, -4.234, -40.040],
            [-2.56677, -1.5384, -2.809, 0.0],
        ],
        Regression::ConstantTrend => [
            [-3.95877, -9.0531, -28.428, -134.155],
            [-3.41049, -4.3904, -9.036, -45.374],
            [-3.12705, -2.5856, -3.925, -22.380],
        ],
    };
    let inv_n = 1.0 / nobs as f64;

    CriticalValues {
        cv_1pct: polyval(&table[0], inv_n),
        cv_5pct: polyval(&table[1], inv_n),
        cv_10pct: polyval(&table[2], inv_n),
    }
}
