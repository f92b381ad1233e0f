//! Grouping of p-values into correction batches.

use super::{correct, Correction, PValueCorrection};
use crate::decision::Decision;
use crate::error::Result;
use crate::stationarity::{SeriesTests, TestFamily};
use serde::Deserialize;

/// How p-values are grouped before correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoolingMode {
    /// Unit-root and trend-stationarity p-values are corrected separately.
    #[default]
    PerFamily,
    /// All p-values of both families form one batch.
    Joint,
}

/// Corrected outcome of one test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectedResult {
    pub adjusted_p_value: f64,
    pub reject_null: bool,
}

/// Corrected outcomes of both tests for one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectedPair {
    pub unit_root: CorrectedResult,
    pub trend_stationarity: CorrectedResult,
}

impl CorrectedPair {
    pub fn get(&self, family: TestFamily) -> &CorrectedResult {
        match family {
            TestFamily::UnitRoot => &self.unit_root,
            TestFamily::TrendStationarity => &self.trend_stationarity,
        }
    }

    /// Transformation implied by the two rejections.
    pub fn decision(&self) -> Decision {
        Decision::from_rejections(
            self.unit_root.reject_null,
            self.trend_stationarity.reject_null,
        )
    }
}

/// Correct the p-values of every series, one pair per input.
///
/// The output is in input order. An empty input gives an empty output.
///
/// # Errors
/// `DimensionMismatch` when the procedure returns the wrong number of
/// adjusted p-values.
pub fn correct_families(
    tests: &[SeriesTests],
    alpha: f64,
    method: &dyn PValueCorrection,
    pooling: PoolingMode,
) -> Result<Vec<CorrectedPair>> {
    let unit_root: Vec<f64> = tests.iter().map(|t| t.unit_root.p_value).collect();
    let trend: Vec<f64> = tests.iter().map(|t| t.trend_stationarity.p_value).collect();

    let (unit_root, trend) = match pooling {
        PoolingMode::PerFamily => (
            correct(&unit_root, alpha, method)?,
            correct(&trend, alpha, method)?,
        ),
        PoolingMode::Joint => {
            let n = unit_root.len();
            let pooled: Vec<f64> = unit_root.into_iter().chain(trend).collect();
            let mut joint = correct(&pooled, alpha, method)?;
            let trend = Correction {
                adjusted: joint.adjusted.split_off(n),
                reject: joint.reject.split_off(n),
            };
            (joint, trend)
        }
    };

    let pairs = unit_root
        .adjusted
        .into_iter()
        .zip(unit_root.reject)
        .zip(trend.adjusted.into_iter().zip(trend.reject))
        .map(|((ur_p, ur_reject), (ts_p, ts_reject))| CorrectedPair {
            unit_root: CorrectedResult {
                adjusted_p_value: ur_p,
                reject_null: ur_reject,
            },
            trend_stationarity: CorrectedResult {
                adjusted_p_value: ts_p,
                reject_null: ts_reject,
            },
        })
        .collect();
    Ok(pairs)
}
