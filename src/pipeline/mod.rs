//! End-to-end stationarization of a table.
//!
//! Stages: validate the input, run both diagnostic tests on every column,
//! correct the p-values across columns, turn the corrected outcomes into
//! decisions, transform, and reconcile lengths.
//!
//! # Example
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use stationarizer::core::Table;
//! use stationarizer::pipeline::{stationarize, StationarizeConfig};
//! use stationarizer::simulate::{unit_root, white_noise};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let table = Table::from_series(vec![
//!     ("walk", unit_root(200, 1.0, &mut rng).unwrap()),
//!     ("noise", white_noise(200, 1.0, &mut rng).unwrap()),
//! ])
//! .unwrap();
//!
//! let out = stationarize(&table, &StationarizeConfig::default()).unwrap();
//! assert_eq!(out.n_columns(), 2);
//! ```

pub mod config;
pub mod reconcile;
pub mod report;

pub use config::{InsufficientDataPolicy, StationarizeConfig};
pub use reconcile::{reconcile, Reconciled};
pub use report::{ColumnReport, StationarizeReport, StationarizeWarning};

use crate::core::{Column, Table};
use crate::correction::{correct_families, PValueCorrection};
use crate::decision::Decision;
use crate::error::{Result, StationarizeError};
use crate::stationarity::{SeriesTests, StationarityTest, TestFamily, TestRunner};
use crate::transform::apply;
use crate::validation::validate_table;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Stationarize every column of a table with the given configuration.
///
/// # Errors
/// See [`Stationarizer::run`].
pub fn stationarize(table: &Table, config: &StationarizeConfig) -> Result<Table> {
    Stationarizer::new(config.clone())
        .run(table)
        .map(StationarizeReport::into_table)
}

/// Configurable stationarization pipeline.
///
/// The diagnostic tests and the correction default to those named by the
/// configuration and can be replaced.
pub struct Stationarizer {
    config: StationarizeConfig,
    runner: TestRunner,
    correction: Box<dyn PValueCorrection>,
}

impl std::fmt::Debug for Stationarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stationarizer")
            .field("config", &self.config)
            .field("runner", &self.runner)
            .field("correction", &self.correction.name())
            .finish()
    }
}

impl Default for Stationarizer {
    fn default() -> Self {
        Self::new(StationarizeConfig::default())
    }
}

impl Stationarizer {
    pub fn new(config: StationarizeConfig) -> Self {
        let runner = TestRunner::new(Box::new(config.adf()), Box::new(config.kpss()));
        let correction = Box::new(config.multitest_method);
        Self {
            config,
            runner,
            correction,
        }
    }

    /// Replace the unit-root test.
    pub fn with_unit_root_test(mut self, test: impl StationarityTest + 'static) -> Self {
        self.runner.set_unit_root(Box::new(test));
        self
    }

    /// Replace the trend-stationarity test.
    pub fn with_trend_stationarity_test(mut self, test: impl StationarityTest + 'static) -> Self {
        self.runner.set_trend_stationarity(Box::new(test));
        self
    }

    /// Replace the p-value correction.
    pub fn with_correction(mut self, correction: impl PValueCorrection + 'static) -> Self {
        self.correction = Box::new(correction);
        self
    }

    pub fn config(&self) -> &StationarizeConfig {
        &self.config
    }

    /// Run the pipeline on a table. The input is not modified.
    ///
    /// # Errors
    /// - `InvalidParameter` for an alpha outside (0, 1).
    /// - `EmptyTable` or `InputType` from input validation.
    /// - `InsufficientData` for the first column (in table order) whose
    ///   tests fail, unless the policy is `Skip`.
    /// - `DimensionMismatch` when the correction returns the wrong number
    ///   of adjusted p-values.
    #[tracing::instrument(skip_all, fields(columns = table.n_columns(), rows = table.n_rows()))]
    pub fn run(&self, table: &Table) -> Result<StationarizeReport> {
        self.config.validate()?;
        let mut warnings = validate_table(table)?;

        let series = table
            .columns()
            .iter()
            .map(|c| {
                c.values()
                    .to_f64()
                    .map(|values| (c.name().to_string(), values))
                    .ok_or_else(|| StationarizeError::InputType {
                        columns: vec![c.name().to_string()],
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            unit_root = self.runner.test_name(TestFamily::UnitRoot),
            trend_stationarity = self.runner.test_name(TestFamily::TrendStationarity),
            "running diagnostic tests"
        );
        let mut tests: Vec<Option<SeriesTests>> = Vec::with_capacity(series.len());
        for ((name, _), result) in series.iter().zip(self.runner.run_all(&series)) {
            match result {
                Ok(t) => tests.push(Some(t)),
                Err(err) => match self.config.on_insufficient_data {
                    InsufficientDataPolicy::Abort => return Err(err),
                    InsufficientDataPolicy::Skip => {
                        let reason = match &err {
                            StationarizeError::InsufficientData { source, .. } => {
                                source.to_string()
                            }
                            other => other.to_string(),
                        };
                        warn!(column = name.as_str(), %reason, "skipping column");
                        warnings.push(StationarizeWarning::SkippedColumn {
                            column: name.clone(),
                            reason,
                        });
                        tests.push(None);
                    }
                },
            }
        }

        info!(
            method = self.correction.name(),
            alpha = self.config.alpha,
            pooling = ?self.config.pooling,
            "correcting p-values"
        );
        let tested: Vec<SeriesTests> = tests.iter().flatten().cloned().collect();
        let mut corrected = correct_families(
            &tested,
            self.config.alpha,
            self.correction.as_ref(),
            self.config.pooling,
        )?
        .into_iter();
        let corrected: Vec<_> = tests
            .iter()
            .map(|t| t.as_ref().and_then(|_| corrected.next()))
            .collect();

        let decisions: Vec<Decision> = corrected
            .iter()
            .map(|pair| pair.map(|p| p.decision()).unwrap_or(Decision::NONE))
            .collect();
        for ((name, _), (pair, decision)) in series.iter().zip(corrected.iter().zip(&decisions)) {
            if let Some(pair) = pair {
                debug!(
                    column = name.as_str(),
                    unit_root_p = pair.unit_root.adjusted_p_value,
                    trend_stationarity_p = pair.trend_stationarity.adjusted_p_value,
                    %decision,
                    "corrected"
                );
            }
        }

        info!("transforming columns");
        let names: Vec<String> = series.iter().map(|(name, _)| name.clone()).collect();
        let transformed: Vec<Vec<f64>> = series
            .into_par_iter()
            .zip(decisions.par_iter())
            .map(|((_, values), &decision)| apply(values, decision).values)
            .collect();

        let reconciled = reconcile(transformed, table.index());
        let length = reconciled.columns.first().map_or(0, Vec::len);
        info!(length, "reconciled column lengths");

        let columns: Vec<ColumnReport> = names
            .iter()
            .zip(tests)
            .zip(corrected)
            .zip(decisions)
            .zip(&reconciled.trimmed)
            .map(|((((name, tests), corrected), decision), &trimmed)| ColumnReport {
                name: name.clone(),
                tests,
                corrected,
                decision,
                trimmed,
                length,
            })
            .collect();

        let output = Table::from_parts(
            names
                .into_iter()
                .zip(reconciled.columns)
                .map(|(name, values)| Column::float(name, values))
                .collect(),
            reconciled.index,
        );

        let report = StationarizeReport {
            table: output,
            columns,
            warnings,
        };
        let percentages = report.conclusion_percentages();
        for (conclusion, count) in report.conclusion_counts() {
            let percent = percentages.get(&conclusion).copied().unwrap_or(0.0);
            info!(count, percent, "{conclusion}");
        }

        Ok(report)
    }
}
