//! Numerical helpers shared by the diagnostic tests and transformations.

pub mod ols;
pub mod stats;

pub use ols::{ols, OlsFit};
pub use stats::{is_constant, mean, normal_cdf};
