//! # stationarizer
//!
//! Makes every column of a table of time series stationary.
//!
//! Each column is checked with an Augmented Dickey-Fuller test (null: unit
//! root) and a KPSS test (null: trend-stationarity). The p-values of each
//! test family are corrected for multiple testing across columns, by
//! default with Benjamini-Yekutieli. A column whose unit root is not
//! rejected is differenced, and one whose trend-stationarity is not
//! rejected is detrended. Finally all columns are trimmed from the front
//! to a common length.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use stationarizer::prelude::*;
//! use stationarizer::simulate::unit_root;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let table = Table::from_series(vec![("walk", unit_root(150, 1.0, &mut rng)?)])?;
//!
//! let report = Stationarizer::new(StationarizeConfig::default()).run(&table)?;
//! assert_eq!(report.columns.len(), 1);
//! assert_eq!(report.table.n_rows(), report.columns[0].length);
//! # Ok::<(), StationarizeError>(())
//! ```

#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod correction;
pub mod decision;
pub mod error;
pub mod pipeline;
pub mod simulate;
pub mod stationarity;
pub mod transform;
pub mod utils;
pub mod validation;

pub use error::{Result, StationarizeError, TestError};
pub use pipeline::{stationarize, StationarizeConfig, StationarizeReport, Stationarizer};

pub mod prelude {
    pub use crate::core::{Column, ColumnValues, Table};
    pub use crate::correction::{CorrectionMethod, PValueCorrection, PoolingMode};
    pub use crate::decision::{Conclusion, Decision};
    pub use crate::error::{Result, StationarizeError};
    pub use crate::pipeline::{
        stationarize, InsufficientDataPolicy, StationarizeConfig, StationarizeReport,
        StationarizeWarning, Stationarizer,
    };
    pub use crate::stationarity::{Adf, Kpss, Regression, StationarityTest, TestResult};
}
