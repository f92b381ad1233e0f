//! Runs both diagnostic tests over every column of a table.

use super::{Adf, Kpss, StationarityTest, TestFamily, TestResult};
use crate::error::{Result, StationarizeError};
use rayon::prelude::*;
use tracing::debug;

/// Unit-root and trend-stationarity outcomes for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTests {
    pub unit_root: TestResult,
    pub trend_stationarity: TestResult,
}

impl SeriesTests {
    /// Result for one test family.
    pub fn get(&self, family: TestFamily) -> &TestResult {
        match family {
            TestFamily::UnitRoot => &self.unit_root,
            TestFamily::TrendStationarity => &self.trend_stationarity,
        }
    }
}

/// Pair of diagnostic tests applied to each series.
pub struct TestRunner {
    unit_root: Box<dyn StationarityTest>,
    trend_stationarity: Box<dyn StationarityTest>,
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new(Box::new(Adf::default()), Box::new(Kpss::default()))
    }
}

impl std::fmt::Debug for TestRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestRunner")
            .field("unit_root", &self.unit_root.name())
            .field("trend_stationarity", &self.trend_stationarity.name())
            .finish()
    }
}

impl TestRunner {
    pub fn new(
        unit_root: Box<dyn StationarityTest>,
        trend_stationarity: Box<dyn StationarityTest>,
    ) -> Self {
        Self {
            unit_root,
            trend_stationarity,
        }
    }

    pub fn set_unit_root(&mut self, test: Box<dyn StationarityTest>) {
        self.unit_root = test;
    }

    pub fn set_trend_stationarity(&mut self, test: Box<dyn StationarityTest>) {
        self.trend_stationarity = test;
    }

    /// Name of the test used for a family.
    pub fn test_name(&self, family: TestFamily) -> &str {
        match family {
            TestFamily::UnitRoot => self.unit_root.name(),
            TestFamily::TrendStationarity => self.trend_stationarity.name(),
        }
    }

    /// Run both tests on one named series.
    ///
    /// # Errors
    /// `InsufficientData` naming the column when either test cannot be
    /// computed.
    pub fn run(&self, column: &str, series: &[f64]) -> Result<SeriesTests> {
        let wrap = |source| StationarizeError::InsufficientData {
            column: column.to_string(),
            source,
        };

        let unit_root = self.unit_root.run(series).map_err(wrap)?;
        let trend_stationarity = self.trend_stationarity.run(series).map_err(wrap)?;

        debug!(
            column,
            test = self.unit_root.name(),
            statistic = unit_root.statistic,
            p_value = unit_root.p_value,
            lags = unit_root.lags,
            "unit root test"
        );
        debug!(
            column,
            test = self.trend_stationarity.name(),
            statistic = trend_stationarity.statistic,
            p_value = trend_stationarity.p_value,
            lags = trend_stationarity.lags,
            "trend stationarity test"
        );

        Ok(SeriesTests {
            unit_root,
            trend_stationarity,
        })
    }

    /// Run both tests on every series in parallel.
    ///
    /// Results are returned in input order, one per series.
    pub fn run_all(&self, columns: &[(String, Vec<f64>)]) -> Vec<Result<SeriesTests>> {
        columns
            .par_iter()
            .map(|(name, series)| self.run(name, series))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TestError;
    use crate::stationarity::CriticalValues;

    /// Returns a fixed p-value regardless of input.
    struct Constant(f64);

    impl StationarityTest for Constant {
        fn name(&self) -> &str {
            "constant"
        }

        fn run(&self, series: &[f64]) -> std::result::Result<TestResult, TestError> {
            Ok(TestResult {
                statistic: 0.0,
                p_value: self.0,
                lags: 0,
                n_obs: series.len(),
                critical_values: CriticalValues::default(),
            })
        }
    }

    #[test]
    fn run_uses_each_family_test() {
        let runner = TestRunner::new(Box::new(Constant(0.2)), Box::new(Constant(0.7)));
        let tests = runner.run("x", &[1.0, 2.0]).unwrap();

        assert_eq!(tests.get(TestFamily::UnitRoot).p_value, 0.2);
        assert_eq!(tests.get(TestFamily::TrendStationarity).p_value, 0.7);
    }

    #[test]
    fn failure_names_the_column() {
        let runner = TestRunner::default();
        let err = runner.run("short", &[1.0, 2.0, 3.0]).unwrap_err();

        assert_eq!(
            err,
            StationarizeError::InsufficientData {
                column: "short".to_string(),
                source: TestError::TooShort { needed: 6, got: 3 },
            }
        );
    }

    #[test]
    fn run_all_preserves_order() {
        let runner = TestRunner::new(Box::new(Constant(0.5)), Box::new(Constant(0.5)));
        let columns: Vec<(String, Vec<f64>)> = (0..16)
            .map(|i| (format!("c{i}"), vec![0.0; i + 1]))
            .collect();

        let results = runner.run_all(&columns);

        assert_eq!(results.len(), 16);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.as_ref().unwrap().unit_root.n_obs, i + 1);
        }
    }

    #[test]
    fn default_runner_names() {
        let runner = TestRunner::default();
        assert_eq!(runner.test_name(TestFamily::UnitRoot), "ADF");
        assert_eq!(runner.test_name(TestFamily::TrendStationarity), "KPSS");
    }
}
