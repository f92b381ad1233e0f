//! Per-column outcome of a stationarization run.

use crate::core::Table;
use crate::correction::CorrectedPair;
use crate::decision::{Conclusion, Decision};
use crate::stationarity::SeriesTests;
use std::collections::BTreeMap;
use std::fmt;

/// Non-fatal notices raised during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationarizeWarning {
    /// The table has no more rows than columns and may be transposed.
    Orientation { rows: usize, columns: usize },
    /// A column could not be tested and was left untransformed.
    SkippedColumn { column: String, reason: String },
}

impl fmt::Display for StationarizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationarizeWarning::Orientation { rows, columns } => write!(
                f,
                "table has {rows} rows and {columns} columns; rows should be time steps"
            ),
            StationarizeWarning::SkippedColumn { column, reason } => {
                write!(f, "column '{column}' skipped: {reason}")
            }
        }
    }
}

/// What happened to one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReport {
    pub name: String,
    /// Raw test outcomes; `None` for a skipped column
    pub tests: Option<SeriesTests>,
    /// Corrected p-values and rejections; `None` for a skipped column
    pub corrected: Option<CorrectedPair>,
    /// Transformations applied
    pub decision: Decision,
    /// Leading observations dropped during reconciliation
    pub trimmed: usize,
    /// Length in the output table
    pub length: usize,
}

impl ColumnReport {
    /// Reading of the corrected outcomes, if the column was tested.
    pub fn conclusion(&self) -> Option<Conclusion> {
        self.corrected.map(|pair| {
            Conclusion::from_rejections(
                pair.unit_root.reject_null,
                pair.trend_stationarity.reject_null,
            )
        })
    }

    pub fn is_skipped(&self) -> bool {
        self.tests.is_none()
    }
}

/// Output table plus per-column details.
#[derive(Debug, Clone, PartialEq)]
pub struct StationarizeReport {
    pub table: Table,
    /// One entry per input column, in table order
    pub columns: Vec<ColumnReport>,
    pub warnings: Vec<StationarizeWarning>,
}

impl StationarizeReport {
    pub fn column(&self, name: &str) -> Option<&ColumnReport> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Conclusion per tested column.
    pub fn conclusions(&self) -> Vec<(&str, Conclusion)> {
        self.columns
            .iter()
            .filter_map(|c| c.conclusion().map(|conclusion| (c.name.as_str(), conclusion)))
            .collect()
    }

    /// Transformations applied per column.
    pub fn actions(&self) -> Vec<(&str, Decision)> {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.decision))
            .collect()
    }

    /// Number of tested columns per conclusion.
    pub fn conclusion_counts(&self) -> BTreeMap<Conclusion, usize> {
        let mut counts = BTreeMap::new();
        for (_, conclusion) in self.conclusions() {
            *counts.entry(conclusion).or_insert(0) += 1;
        }
        counts
    }

    /// Percentage of tested columns per conclusion.
    pub fn conclusion_percentages(&self) -> BTreeMap<Conclusion, f64> {
        let counts = self.conclusion_counts();
        let tested: usize = counts.values().sum();
        counts
            .into_iter()
            .map(|(conclusion, count)| (conclusion, 100.0 * count as f64 / tested as f64))
            .collect()
    }

    pub fn into_table(self) -> Table {
        self.table
    }
}
