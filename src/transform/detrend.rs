//! Linear detrending.
//!
//! Regresses a series on an intercept and the integer time index and keeps
//! the residual.

use crate::utils::mean;

/// Intercept and slope of a least squares line over the time index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendFit {
    /// Value of the fitted line at t = 0
    pub intercept: f64,
    /// Change per time step
    pub slope: f64,
}

impl TrendFit {
    /// Fitted value at time index `t`.
    pub fn at(&self, t: usize) -> f64 {
        self.intercept + self.slope * t as f64
    }
}

/// Fit `y = intercept + slope * t` with t = 0, 1, 2, ...
///
/// A series with fewer than two observations has no slope; its fit is the
/// flat line through its mean (or zero when empty).
pub fn fit_linear_trend(series: &[f64]) -> TrendFit {
    let n = series.len();
    if n < 2 {
        return TrendFit {
            intercept: series.first().copied().unwrap_or(0.0),
            slope: 0.0,
        };
    }

    let nf = n as f64;
    let mean_t = (nf - 1.0) / 2.0;
    let mean_y = mean(series);

    let mut ss_tt = 0.0;
    let mut ss_ty = 0.0;
    for (i, &y) in series.iter().enumerate() {
        let dt = i as f64 - mean_t;
        ss_tt += dt * dt;
        ss_ty += dt * (y - mean_y);
    }

    let slope = ss_ty / ss_tt;
    TrendFit {
        intercept: mean_y - slope * mean_t,
        slope,
    }
}

/// Remove the least squares linear trend from a series.
///
/// The result has the same length as the input, zero mean, and no linear
/// trend left in it.
pub fn detrend(series: &[f64]) -> Vec<f64> {
    let fit = fit_linear_trend(series);
    series
        .iter()
        .enumerate()
        .map(|(t, &y)| y - fit.at(t))
        .collect()
}
