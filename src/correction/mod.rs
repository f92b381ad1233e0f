//! Multiple-testing correction of p-values.
//!
//! Every series contributes one p-value per test family. Testing many series
//! at the same level inflates false rejections, so p-values are adjusted
//! before they are compared with alpha.

pub mod methods;
pub mod pooling;

pub use pooling::{correct_families, CorrectedPair, CorrectedResult, PoolingMode};

use crate::error::{Result, StationarizeError};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Error rate a procedure controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorRate {
    /// Family-wise error rate
    Fwer,
    /// False discovery rate
    Fdr,
}

/// A p-value adjustment procedure.
pub trait PValueCorrection: Send + Sync {
    /// Procedure name for reporting.
    fn name(&self) -> &str;

    /// Adjusted p-values, in input order and clipped to [0, 1].
    fn adjust(&self, p_values: &[f64]) -> Vec<f64>;
}

/// Built-in adjustment procedures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum CorrectionMethod {
    Bonferroni,
    Sidak,
    Holm,
    HolmSidak,
    SimesHochberg,
    Hommel,
    BenjaminiHochberg,
    #[default]
    BenjaminiYekutieli,
}

impl CorrectionMethod {
    pub const ALL: [CorrectionMethod; 8] = [
        CorrectionMethod::Bonferroni,
        CorrectionMethod::Sidak,
        CorrectionMethod::Holm,
        CorrectionMethod::HolmSidak,
        CorrectionMethod::SimesHochberg,
        CorrectionMethod::Hommel,
        CorrectionMethod::BenjaminiHochberg,
        CorrectionMethod::BenjaminiYekutieli,
    ];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrectionMethod::Bonferroni => "bonferroni",
            CorrectionMethod::Sidak => "sidak",
            CorrectionMethod::Holm => "holm",
            CorrectionMethod::HolmSidak => "holm-sidak",
            CorrectionMethod::SimesHochberg => "simes-hochberg",
            CorrectionMethod::Hommel => "hommel",
            CorrectionMethod::BenjaminiHochberg => "benjamini-hochberg",
            CorrectionMethod::BenjaminiYekutieli => "benjamini-yekutieli",
        }
    }

    pub fn controls(&self) -> ErrorRate {
        match self {
            CorrectionMethod::BenjaminiHochberg | CorrectionMethod::BenjaminiYekutieli => {
                ErrorRate::Fdr
            }
            _ => ErrorRate::Fwer,
        }
    }
}

impl fmt::Display for CorrectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrectionMethod {
    type Err = StationarizeError;

    fn from_str(s: &str) -> Result<Self> {
        let method = match s.trim().to_ascii_lowercase().as_str() {
            "bonferroni" | "b" => CorrectionMethod::Bonferroni,
            "sidak" | "s" => CorrectionMethod::Sidak,
            "holm" | "h" => CorrectionMethod::Holm,
            "holm-sidak" | "hs" => CorrectionMethod::HolmSidak,
            "simes-hochberg" | "sh" => CorrectionMethod::SimesHochberg,
            "hommel" | "ho" => CorrectionMethod::Hommel,
            "benjamini-hochberg" | "fdr_bh" | "bh" | "i" | "indep" | "p" | "poscorr" => {
                CorrectionMethod::BenjaminiHochberg
            }
            "benjamini-yekutieli" | "fdr_by" | "by" | "n" | "negcorr" => {
                CorrectionMethod::BenjaminiYekutieli
            }
            _ => return Err(StationarizeError::UnknownCorrectionMethod(s.to_string())),
        };
        Ok(method)
    }
}

impl TryFrom<String> for CorrectionMethod {
    type Error = StationarizeError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl PValueCorrection for CorrectionMethod {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn adjust(&self, p_values: &[f64]) -> Vec<f64> {
        match self {
            CorrectionMethod::Bonferroni => methods::bonferroni(p_values),
            CorrectionMethod::Sidak => methods::sidak(p_values),
            CorrectionMethod::Holm => methods::holm(p_values),
            CorrectionMethod::HolmSidak => methods::holm_sidak(p_values),
            CorrectionMethod::SimesHochberg => methods::simes_hochberg(p_values),
            CorrectionMethod::Hommel => methods::hommel(p_values),
            CorrectionMethod::BenjaminiHochberg => methods::benjamini_hochberg(p_values),
            CorrectionMethod::BenjaminiYekutieli => methods::benjamini_yekutieli(p_values),
        }
    }
}

/// Adjusted p-values and rejection flags for one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub adjusted: Vec<f64>,
    pub reject: Vec<bool>,
}

/// Adjust a batch of p-values and reject where `adjusted <= alpha`.
///
/// # Errors
/// `DimensionMismatch` when the procedure does not return one adjusted
/// p-value per input.
pub fn correct(
    p_values: &[f64],
    alpha: f64,
    method: &dyn PValueCorrection,
) -> Result<Correction> {
    let adjusted = method.adjust(p_values);
    if adjusted.len() != p_values.len() {
        return Err(StationarizeError::DimensionMismatch {
            expected: p_values.len(),
            got: adjusted.len(),
        });
    }
    let reject = adjusted.iter().map(|&p| p <= alpha).collect();
    Ok(Correction { adjusted, reject })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    // ==================== names ====================

    #[test]
    fn parses_canonical_names_and_aliases() {
        let cases = [
            ("bonferroni", CorrectionMethod::Bonferroni),
            ("b", CorrectionMethod::Bonferroni),
            ("s", CorrectionMethod::Sidak),
            ("holm", CorrectionMethod::Holm),
            ("hs", CorrectionMethod::HolmSidak),
            ("sh", CorrectionMethod::SimesHochberg),
            ("ho", CorrectionMethod::Hommel),
            ("fdr_bh", CorrectionMethod::BenjaminiHochberg),
            ("poscorr", CorrectionMethod::BenjaminiHochberg),
            ("fdr_by", CorrectionMethod::BenjaminiYekutieli),
            ("negcorr", CorrectionMethod::BenjaminiYekutieli),
            ("Benjamini-Yekutieli", CorrectionMethod::BenjaminiYekutieli),
        ];
        for (name, expected) in cases {
            assert_eq!(name.parse::<CorrectionMethod>().unwrap(), expected, "{name}");
        }
    }

    #[test]
    fn canonical_names_round_trip() {
        for method in CorrectionMethod::ALL {
            assert_eq!(method.as_str().parse::<CorrectionMethod>().unwrap(), method);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "fdr_xyz".parse::<CorrectionMethod>().unwrap_err(),
            StationarizeError::UnknownCorrectionMethod("fdr_xyz".to_string())
        );
    }

    #[test]
    fn default_is_benjamini_yekutieli() {
        let method = CorrectionMethod::default();
        assert_eq!(method, CorrectionMethod::BenjaminiYekutieli);
        assert_eq!(method.controls(), ErrorRate::Fdr);
        assert_eq!(CorrectionMethod::Holm.controls(), ErrorRate::Fwer);
    }

    // ==================== correct ====================

    #[test]
    fn reject_uses_adjusted_p_values() {
        let p = [0.01, 0.04, 0.03, 0.005, 0.2];
        let result = correct(&p, 0.05, &CorrectionMethod::BenjaminiHochberg).unwrap();

        assert_eq!(result.reject, vec![true, true, true, true, false]);

        let result = correct(&p, 0.05, &CorrectionMethod::Bonferroni).unwrap();
        assert_relative_eq!(result.adjusted[3], 0.025, epsilon = 1e-12);
        assert_eq!(result.reject, vec![true, false, false, true, false]);
    }

    struct DropsLast;

    impl PValueCorrection for DropsLast {
        fn name(&self) -> &str {
            "drops-last"
        }

        fn adjust(&self, p_values: &[f64]) -> Vec<f64> {
            p_values[..p_values.len().saturating_sub(1)].to_vec()
        }
    }

    #[test]
    fn wrong_adjustment_length_is_an_error() {
        let err = correct(&[0.01, 0.2, 0.3], 0.05, &DropsLast).unwrap_err();
        assert_eq!(
            err,
            StationarizeError::DimensionMismatch {
                expected: 3,
                got: 2,
            }
        );
    }

    #[test]
    fn adjusted_never_below_raw() {
        let mut rng = StdRng::seed_from_u64(5);
        let p: Vec<f64> = (0..40).map(|_| rng.gen::<f64>()).collect();

        for method in CorrectionMethod::ALL {
            let adjusted = method.adjust(&p);
            for (a, raw) in adjusted.iter().zip(&p) {
                assert!(*a >= *raw - 1e-12, "{method}");
                assert!(*a <= 1.0, "{method}");
            }
        }
    }

    #[test]
    fn fwer_controlled_under_global_null() {
        // All nulls true: p-values uniform. Any rejection is a family-wise error.
        let alpha = 0.05;
        let trials = 2000;
        let mut rng = StdRng::seed_from_u64(17);

        for method in CorrectionMethod::ALL {
            let errors = (0..trials)
                .filter(|_| {
                    let p: Vec<f64> = (0..20).map(|_| rng.gen::<f64>()).collect();
                    correct(&p, alpha, &method)
                        .unwrap()
                        .reject
                        .iter()
                        .any(|&r| r)
                })
                .count();
            let rate = errors as f64 / trials as f64;
            // Under the global null FDR equals FWER, so every method applies.
            assert!(rate <= alpha + 0.02, "{method}: rate {rate}");
        }
    }

    #[test]
    fn fdr_controlled_with_true_signals() {
        let alpha = 0.1;
        let trials = 1000;
        let mut rng = StdRng::seed_from_u64(23);

        let mut total_fdp = 0.0;
        for _ in 0..trials {
            // 10 true nulls (uniform) followed by 10 strong signals
            let mut p: Vec<f64> = (0..10).map(|_| rng.gen::<f64>()).collect();
            p.extend((0..10).map(|_| rng.gen::<f64>() * 1e-4));

            let reject = correct(&p, alpha, &CorrectionMethod::BenjaminiYekutieli)
                .unwrap()
                .reject;
            let rejected = reject.iter().filter(|&&r| r).count();
            let false_rejections = reject[..10].iter().filter(|&&r| r).count();
            if rejected > 0 {
                total_fdp += false_rejections as f64 / rejected as f64;
            }
        }

        let fdr = total_fdp / trials as f64;
        assert!(fdr <= alpha, "empirical FDR {fdr}");
    }
}
