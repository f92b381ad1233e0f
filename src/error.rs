//! Error types for the stationarizer library.

use thiserror::Error;

/// Result type alias for stationarizer operations.
pub type Result<T> = std::result::Result<T, StationarizeError>;

/// Errors that can occur while stationarizing a table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StationarizeError {
    /// The input table has no columns.
    #[error("empty input table")]
    EmptyTable,

    /// One or more columns hold non-numeric values.
    #[error("all columns must be numeric; offending columns: {}", .columns.join(", "))]
    InputType { columns: Vec<String> },

    /// A diagnostic test could not be computed for a column.
    #[error("insufficient data in column '{column}': {source}")]
    InsufficientData {
        column: String,
        #[source]
        source: TestError,
    },

    /// Unrecognized multiple testing correction method name.
    #[error("unknown multiple testing correction method: '{0}'")]
    UnknownCorrectionMethod(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two columns share the same name.
    #[error("duplicate column name: '{0}'")]
    DuplicateColumn(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Failure of a single diagnostic test on a single series.
///
/// Column agnostic; the test runner attaches the column name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TestError {
    /// Series is shorter than the test's minimum sample size.
    #[error("need at least {needed} observations, got {got}")]
    TooShort { needed: usize, got: usize },

    /// Series is constant.
    #[error("series has zero variance")]
    ZeroVariance,

    /// Series contains NaN or infinite values.
    #[error("series contains non-finite values")]
    NonFinite,

    /// The test regression has no unique solution or a perfect fit.
    #[error("test regression is singular")]
    Singular,
}
