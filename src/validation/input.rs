//! Input table checks run before any test.

use crate::core::Table;
use crate::error::{Result, StationarizeError};
use crate::pipeline::StationarizeWarning;
use tracing::warn;

/// Check that a table can be stationarized.
///
/// # Errors
/// - `EmptyTable` when the table has no columns.
/// - `InputType` listing every non-numeric column in table order.
///
/// A table with no more rows than columns is suspicious (it may be
/// transposed) and yields an `Orientation` warning, but is accepted.
pub fn validate_table(table: &Table) -> Result<Vec<StationarizeWarning>> {
    if table.is_empty() {
        return Err(StationarizeError::EmptyTable);
    }

    let offending: Vec<String> = table
        .columns()
        .iter()
        .filter(|c| !c.dtype().is_numeric())
        .map(|c| c.name().to_string())
        .collect();
    if !offending.is_empty() {
        return Err(StationarizeError::InputType { columns: offending });
    }

    let (rows, columns) = table.shape();
    let mut warnings = Vec::new();
    if rows <= columns {
        warn!(
            rows,
            columns, "table has no more rows than columns; rows should be time steps"
        );
        warnings.push(StationarizeWarning::Orientation { rows, columns });
    }

    Ok(warnings)
}
