//! Diagnostic stationarity tests.
//!
//! Two complementary tests are run on every series:
//!
//! - a unit-root test ([`Adf`]), null hypothesis: the series has a unit root;
//! - a trend-stationarity test ([`Kpss`]), null hypothesis: the series is
//!   stationary around a deterministic trend.
//!
//! Both sit behind the [`StationarityTest`] trait so either can be swapped.
//!
//! # Example
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use stationarizer::simulate::white_noise;
//! use stationarizer::stationarity::{Adf, Kpss, StationarityTest};
//!
//! let mut rng = StdRng::seed_from_u64(3);
//! let series = white_noise(120, 1.0, &mut rng).unwrap();
//! let adf = Adf::default().run(&series).unwrap();
//! let kpss = Kpss::default().run(&series).unwrap();
//! assert!((0.0..=1.0).contains(&adf.p_value));
//! assert!((0.0..=1.0).contains(&kpss.p_value));
//! ```

pub mod adf;
pub mod kpss;
pub mod runner;

pub use adf::{Adf, Autolag};
pub use kpss::Kpss;
pub use runner::{SeriesTests, TestRunner};

use crate::error::TestError;
use crate::utils::is_constant;
use serde::Deserialize;
use std::fmt;

/// The two families of hypotheses tested per series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestFamily {
    UnitRoot,
    TrendStationarity,
}

impl TestFamily {
    pub fn null_hypothesis(&self) -> &'static str {
        match self {
            TestFamily::UnitRoot => "the series has a unit root",
            TestFamily::TrendStationarity => {
                "the series is stationary around a deterministic trend"
            }
        }
    }
}

impl fmt::Display for TestFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestFamily::UnitRoot => write!(f, "unit root"),
            TestFamily::TrendStationarity => write!(f, "trend stationarity"),
        }
    }
}

/// Deterministic terms included in the test regressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Regression {
    /// Constant only.
    Constant,
    /// Constant and linear time trend.
    #[default]
    ConstantTrend,
}

impl Regression {
    /// Number of deterministic regressors.
    pub fn n_terms(self) -> usize {
        match self {
            Regression::Constant => 1,
            Regression::ConstantTrend => 2,
        }
    }

    /// Deterministic design columns for `nobs` observations, time running 1..=nobs.
    pub(crate) fn design(self, nobs: usize) -> Vec<Vec<f64>> {
        let mut columns = vec![vec![1.0; nobs]];
        if self == Regression::ConstantTrend {
            columns.push((1..=nobs).map(|t| t as f64).collect());
        }
        columns
    }
}

/// Critical values for a test statistic.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CriticalValues {
    /// Critical value at 1% significance
    pub cv_1pct: f64,
    /// Critical value at 5% significance
    pub cv_5pct: f64,
    /// Critical value at 10% significance
    pub cv_10pct: f64,
}

/// Outcome of a single diagnostic test on a single series.
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    /// Test statistic (informational)
    pub statistic: f64,
    /// P-value in [0, 1]
    pub p_value: f64,
    /// Number of lags used
    pub lags: usize,
    /// Number of observations in the test regression
    pub n_obs: usize,
    /// Critical values at common significance levels
    pub critical_values: CriticalValues,
}

/// A diagnostic test mapping a series to a statistic and a p-value.
///
/// Implementations must be deterministic and must fail with a [`TestError`]
/// rather than return a NaN statistic.
pub trait StationarityTest: Send + Sync {
    /// Short display name of the test.
    fn name(&self) -> &str;

    /// Run the test on a series.
    fn run(&self, series: &[f64]) -> Result<TestResult, TestError>;
}

/// Reject series that no test can handle.
pub(crate) fn check_series(series: &[f64], needed: usize) -> Result<(), TestError> {
    if series.len() < needed {
        return Err(TestError::TooShort {
            needed,
            got: series.len(),
        });
    }
    if series.iter().any(|x| !x.is_finite()) {
        return Err(TestError::NonFinite);
    }
    if is_constant(series) {
        return Err(TestError::ZeroVariance);
    }
    Ok(())
}
