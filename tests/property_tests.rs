//! Property-based tests for the pipeline.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated tables.

use proptest::prelude::*;
use stationarizer::core::Table;
use stationarizer::correction::CorrectionMethod;
use stationarizer::decision::Decision;
use stationarizer::pipeline::{InsufficientDataPolicy, StationarizeConfig, Stationarizer};
use stationarizer::transform::{apply, detrend, difference};

/// Strategy for a random-walk-like series built from bounded increments.
fn walk_strategy(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0..1.0_f64, len).prop_map(|steps| {
        steps
            .iter()
            .scan(0.0, |level, step| {
                *level += step;
                Some(*level)
            })
            .collect()
    })
}

/// Strategy for a table of 1 to 4 equally long columns.
fn table_strategy() -> impl Strategy<Value = (usize, Vec<Vec<f64>>)> {
    (30usize..80, 1usize..5).prop_flat_map(|(len, cols)| {
        (Just(len), prop::collection::vec(walk_strategy(len), cols))
    })
}

fn config() -> StationarizeConfig {
    StationarizeConfig::default().on_insufficient_data(InsufficientDataPolicy::Skip)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// All output columns share one length, at most one shorter than the input.
    #[test]
    fn output_lengths_are_uniform((len, columns) in table_strategy()) {
        let n_cols = columns.len();
        let table = Table::from_series(
            columns.into_iter().enumerate().map(|(i, c)| (format!("c{i}"), c)),
        )
        .unwrap();

        let report = Stationarizer::new(config()).run(&table).unwrap();

        let lengths: Vec<usize> = report.table.columns().iter().map(|c| c.len()).collect();
        prop_assert_eq!(lengths.len(), n_cols);
        prop_assert!(lengths.iter().all(|&l| l == lengths[0]));
        prop_assert!(lengths[0] >= len - 1);

        let any_differenced = report.columns.iter().any(|c| c.decision.difference);
        prop_assert_eq!(lengths[0], if any_differenced { len - 1 } else { len });
    }

    /// Column names and order survive the run.
    #[test]
    fn column_order_preserved((_, columns) in table_strategy()) {
        let names: Vec<String> = (0..columns.len()).map(|i| format!("series_{i}")).collect();
        let table = Table::from_series(names.iter().cloned().zip(columns)).unwrap();

        let config = config().correction(CorrectionMethod::Holm);
        let out = Stationarizer::new(config).run(&table).unwrap().table;

        prop_assert_eq!(out.column_names(), names.iter().map(String::as_str).collect::<Vec<_>>());
    }

    /// Applying a decision matches composing the individual transforms.
    #[test]
    fn apply_composes_transforms(
        series in walk_strategy(40),
        diff in any::<bool>(),
        trend in any::<bool>(),
    ) {
        let decision = Decision {
            difference: diff,
            detrend: trend,
        };
        let out = apply(series.clone(), decision);

        let mut expected = series;
        if trend {
            expected = detrend(&expected);
        }
        if diff {
            expected = difference(&expected);
        }
        prop_assert_eq!(out.values, expected);
    }
}
