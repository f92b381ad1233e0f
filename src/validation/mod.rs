//! Checks applied to the input table before stationarization.

pub mod input;

pub use input::validate_table;
