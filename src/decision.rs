//! Interpretation of corrected test outcomes into transformation decisions.
//!
//! Each flag follows from one test: a unit root that could not be rejected
//! schedules differencing, and trend-stationarity that could not be rejected
//! schedules detrending. The flags are independent and compose.

use std::fmt;

/// Transformations scheduled for one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decision {
    /// Replace the series by its first difference.
    pub difference: bool,
    /// Remove a least squares linear trend.
    pub detrend: bool,
}

impl Decision {
    /// Leave the series unchanged.
    pub const NONE: Decision = Decision {
        difference: false,
        detrend: false,
    };

    /// Derive the decision from the corrected rejection of each null hypothesis.
    ///
    /// # Example
    /// ```
    /// use stationarizer::decision::Decision;
    ///
    /// // Unit root kept, trend-stationarity rejected: difference only.
    /// let d = Decision::from_rejections(false, true);
    /// assert!(d.difference && !d.detrend);
    /// ```
    pub fn from_rejections(reject_unit_root: bool, reject_trend_stationarity: bool) -> Self {
        Self {
            difference: !reject_unit_root,
            detrend: !reject_trend_stationarity,
        }
    }

    /// Whether the series is left unchanged.
    pub fn is_identity(&self) -> bool {
        !self.difference && !self.detrend
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.detrend, self.difference) {
            (false, false) => write!(f, "none"),
            (true, false) => write!(f, "detrend"),
            (false, true) => write!(f, "difference"),
            (true, true) => write!(f, "detrend, difference"),
        }
    }
}

/// Descriptive reading of the two corrected test outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Conclusion {
    /// Both nulls rejected: no unit root, yet not trend-stationary.
    Contradiction,
    /// Unit root rejected, trend-stationarity kept.
    TrendStationary,
    /// Unit root kept, trend-stationarity rejected.
    UnitRoot,
    /// Neither null rejected.
    NoRejection,
}

impl Conclusion {
    pub fn from_rejections(reject_unit_root: bool, reject_trend_stationarity: bool) -> Self {
        match (reject_unit_root, reject_trend_stationarity) {
            (true, true) => Conclusion::Contradiction,
            (true, false) => Conclusion::TrendStationary,
            (false, true) => Conclusion::UnitRoot,
            (false, false) => Conclusion::NoRejection,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Conclusion::Contradiction => {
                "contradictory results regarding the existence of a unit root"
            }
            Conclusion::TrendStationary => {
                "the series likely has no unit root but is trend stationary"
            }
            Conclusion::UnitRoot => "the series likely has a unit root",
            Conclusion::NoRejection => "not enough evidence to reject either null hypothesis",
        }
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
