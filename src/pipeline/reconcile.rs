//! Length reconciliation across transformed columns.
//!
//! Differencing shortens a column by one. Every column is cut from the
//! front to the shortest length so the output rows stay aligned in time.

use chrono::{DateTime, Utc};

/// Columns and index trimmed to a common length.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub columns: Vec<Vec<f64>>,
    /// Leading observations dropped from each column
    pub trimmed: Vec<usize>,
    pub index: Option<Vec<DateTime<Utc>>>,
}

/// Trim every column and the index to the shortest column length by
/// dropping leading observations.
pub fn reconcile(columns: Vec<Vec<f64>>, index: Option<&[DateTime<Utc>]>) -> Reconciled {
    let min_length = columns.iter().map(Vec::len).min().unwrap_or(0);

    let (columns, trimmed) = columns
        .into_iter()
        .map(|mut values| {
            let excess = values.len() - min_length;
            values.drain(..excess);
            (values, excess)
        })
        .unzip();

    let index = index.map(|index| index[index.len().saturating_sub(min_length)..].to_vec());

    Reconciled {
        columns,
        trimmed,
        index,
    }
}
