//! Stationarizing transformations.
//!
//! Applies a [`Decision`] to a series: detrending first, then differencing.
//!
//! # Example
//!
//! ```
//! use stationarizer::decision::Decision;
//! use stationarizer::transform::apply;
//!
//! let series = vec![1.0, 3.0, 6.0, 10.0];
//! let decision = Decision { difference: true, detrend: false };
//!
//! let out = apply(series, decision);
//! assert_eq!(out.values, vec![2.0, 3.0, 4.0]);
//! assert!(out.differenced && !out.detrended);
//! ```

pub mod detrend;
pub mod difference;

pub use detrend::{detrend, fit_linear_trend, TrendFit};
pub use difference::difference;

use crate::decision::Decision;

/// A series after its decision has been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    /// Transformed values
    pub values: Vec<f64>,
    /// Whether a linear trend was removed
    pub detrended: bool,
    /// Whether the series was differenced (and lost its first observation)
    pub differenced: bool,
}

impl Transformed {
    /// Wrap an untouched series.
    pub fn unchanged(values: Vec<f64>) -> Self {
        Self {
            values,
            detrended: false,
            differenced: false,
        }
    }
}

/// Apply a decision to a series.
///
/// Detrending keeps the length; differencing drops the earliest
/// observation. When neither is scheduled the input vector is returned
/// as-is without copying.
pub fn apply(series: Vec<f64>, decision: Decision) -> Transformed {
    let mut values = series;
    if decision.detrend {
        values = detrend(&values);
    }
    if decision.difference {
        values = difference(&values);
    }
    Transformed {
        values,
        detrended: decision.detrend,
        differenced: decision.difference,
    }
}
