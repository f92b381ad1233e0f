//! Core data structures.

mod table;

pub use table::{Column, ColumnValues, DataType, Table};
