//! Table data structure: named columns of observations over a shared time axis.

use crate::error::{Result, StationarizeError};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Element type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Float,
    Integer,
    Boolean,
    Text,
}

impl DataType {
    /// Whether values of this type can be tested and transformed.
    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Float | DataType::Integer)
    }
}

/// Values of a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Float(Vec<f64>),
    Integer(Vec<i64>),
    Boolean(Vec<bool>),
    Text(Vec<String>),
}

impl ColumnValues {
    pub fn dtype(&self) -> DataType {
        match self {
            ColumnValues::Float(_) => DataType::Float,
            ColumnValues::Integer(_) => DataType::Integer,
            ColumnValues::Boolean(_) => DataType::Boolean,
            ColumnValues::Text(_) => DataType::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Float(v) => v.len(),
            ColumnValues::Integer(v) => v.len(),
            ColumnValues::Boolean(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric view of the values, or `None` for non-numeric columns.
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            ColumnValues::Float(v) => Some(v.clone()),
            ColumnValues::Integer(v) => Some(v.iter().map(|&x| x as f64).collect()),
            ColumnValues::Boolean(_) | ColumnValues::Text(_) => None,
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Create a floating-point column.
    pub fn float(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, ColumnValues::Float(values))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub fn dtype(&self) -> DataType {
        self.values.dtype()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Floating-point values, if the column is stored as floats.
    pub fn as_f64(&self) -> Option<&[f64]> {
        match &self.values {
            ColumnValues::Float(v) => Some(v),
            _ => None,
        }
    }
}

/// Ordered collection of uniquely named columns.
///
/// Rows represent time steps and columns represent variables. Columns
/// nominally share one length, but this is not enforced. An optional
/// timestamp index labels the rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    index: Option<Vec<DateTime<Utc>>>,
}

impl Table {
    /// Create a table from columns, rejecting duplicate names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(StationarizeError::DuplicateColumn(column.name().to_string()));
            }
        }
        Ok(Self {
            columns,
            index: None,
        })
    }

    /// Create a table of floating-point columns.
    ///
    /// # Example
    /// ```
    /// use stationarizer::core::Table;
    ///
    /// let table = Table::from_series(vec![
    ///     ("a", vec![1.0, 2.0, 3.0]),
    ///     ("b", vec![0.5, 0.1, 0.3]),
    /// ])
    /// .unwrap();
    /// assert_eq!(table.shape(), (3, 2));
    /// ```
    pub fn from_series<N, I>(series: I) -> Result<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Vec<f64>)>,
    {
        Self::new(
            series
                .into_iter()
                .map(|(name, values)| Column::float(name, values))
                .collect(),
        )
    }

    /// Attach a timestamp index. Its length must equal the row count.
    pub fn with_index(mut self, index: Vec<DateTime<Utc>>) -> Result<Self> {
        let rows = self.n_rows();
        if index.len() != rows {
            return Err(StationarizeError::DimensionMismatch {
                expected: rows,
                got: index.len(),
            });
        }
        self.index = Some(index);
        Ok(self)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn index(&self) -> Option<&[DateTime<Utc>]> {
        self.index.as_deref()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of time steps: the length of the longest column.
    pub fn n_rows(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }

    /// `(rows, columns)`, rows being the time dimension.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_columns())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub(crate) fn from_parts(columns: Vec<Column>, index: Option<Vec<DateTime<Utc>>>) -> Self {
        Self { columns, index }
    }
}
