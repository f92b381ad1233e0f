//! P-value adjustment procedures.
//!
//! Each function takes raw p-values in any order and returns adjusted
//! p-values in the same order, clipped to [0, 1]. A hypothesis is rejected
//! at level alpha when its adjusted p-value is at most alpha.

/// Indices that sort `p` ascending.
fn ascending_order(p: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..p.len()).collect();
    order.sort_by(|&a, &b| p[a].total_cmp(&p[b]));
    order
}

/// Scatter values computed on the sorted p-values back to input order.
fn unsort(sorted_values: Vec<f64>, order: &[usize]) -> Vec<f64> {
    let mut out = vec![0.0; sorted_values.len()];
    for (value, &idx) in sorted_values.into_iter().zip(order) {
        out[idx] = value.clamp(0.0, 1.0);
    }
    out
}

/// Running maximum from the front (step-down procedures).
fn cumulative_max(values: &mut [f64]) {
    for i in 1..values.len() {
        values[i] = values[i].max(values[i - 1]);
    }
}

/// Running minimum from the back (step-up procedures).
fn reverse_cumulative_min(values: &mut [f64]) {
    for i in (0..values.len().saturating_sub(1)).rev() {
        values[i] = values[i].min(values[i + 1]);
    }
}

/// `1 - (1 - p)^m` without cancellation for tiny `p`.
fn sidak_step(p: f64, m: f64) -> f64 {
    -(m * (-p).ln_1p()).exp_m1()
}

/// Bonferroni: `m * p`.
pub fn bonferroni(p: &[f64]) -> Vec<f64> {
    let m = p.len() as f64;
    p.iter().map(|&pi| (pi * m).min(1.0)).collect()
}

/// Sidak: `1 - (1 - p)^m`.
pub fn sidak(p: &[f64]) -> Vec<f64> {
    let m = p.len() as f64;
    p.iter().map(|&pi| sidak_step(pi, m)).collect()
}

/// Holm step-down with Bonferroni steps.
pub fn holm(p: &[f64]) -> Vec<f64> {
    let m = p.len();
    let order = ascending_order(p);
    let mut adjusted: Vec<f64> = order
        .iter()
        .enumerate()
        .map(|(i, &idx)| ((m - i) as f64 * p[idx]).min(1.0))
        .collect();
    cumulative_max(&mut adjusted);
    unsort(adjusted, &order)
}

/// Holm step-down with Sidak steps.
pub fn holm_sidak(p: &[f64]) -> Vec<f64> {
    let m = p.len();
    let order = ascending_order(p);
    let mut adjusted: Vec<f64> = order
        .iter()
        .enumerate()
        .map(|(i, &idx)| sidak_step(p[idx], (m - i) as f64))
        .collect();
    cumulative_max(&mut adjusted);
    unsort(adjusted, &order)
}

/// Simes-Hochberg step-up.
pub fn simes_hochberg(p: &[f64]) -> Vec<f64> {
    let m = p.len();
    let order = ascending_order(p);
    let mut adjusted: Vec<f64> = order
        .iter()
        .enumerate()
        .map(|(i, &idx)| (m - i) as f64 * p[idx])
        .collect();
    reverse_cumulative_min(&mut adjusted);
    unsort(adjusted, &order)
}

/// Hommel closed testing procedure based on Simes tests.
pub fn hommel(p: &[f64]) -> Vec<f64> {
    let n = p.len();
    let order = ascending_order(p);
    let sorted: Vec<f64> = order.iter().map(|&i| p[i]).collect();
    let mut adjusted = sorted.clone();

    for m in (2..=n).rev() {
        let tail = n - m;
        let cim = sorted[tail..]
            .iter()
            .enumerate()
            .map(|(j, &pj)| m as f64 * pj / (j + 1) as f64)
            .fold(f64::INFINITY, f64::min);
        for value in adjusted[tail..].iter_mut() {
            *value = value.max(cim);
        }
        for (value, &pj) in adjusted[..tail].iter_mut().zip(&sorted[..tail]) {
            *value = value.max((m as f64 * pj).min(cim));
        }
    }

    unsort(adjusted, &order)
}

/// Step-up false discovery rate adjustment with a dependence constant.
fn step_up_fdr(p: &[f64], constant: f64) -> Vec<f64> {
    let m = p.len();
    let order = ascending_order(p);
    let mut adjusted: Vec<f64> = order
        .iter()
        .enumerate()
        .map(|(i, &idx)| p[idx] * m as f64 * constant / (i + 1) as f64)
        .collect();
    reverse_cumulative_min(&mut adjusted);
    unsort(adjusted, &order)
}

/// Benjamini-Hochberg, valid under independence or positive dependence.
pub fn benjamini_hochberg(p: &[f64]) -> Vec<f64> {
    step_up_fdr(p, 1.0)
}

/// Benjamini-Yekutieli, valid under arbitrary dependence.
///
/// Benjamini-Hochberg scaled by the harmonic number `c(m) = Σ 1/i`.
pub fn benjamini_yekutieli(p: &[f64]) -> Vec<f64> {
    let harmonic: f64 = (1..=p.len()).map(|i| 1.0 / i as f64).sum();
    step_up_fdr(p, harmonic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const P: [f64; 5] = [0.01, 0.04, 0.03, 0.005, 0.2];

    fn assert_all_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_relative_eq!(*a, *e, epsilon = 1e-10);
        }
    }

    #[test]
    fn bonferroni_scales_and_clips() {
        assert_all_close(&bonferroni(&P), &[0.05, 0.2, 0.15, 0.025, 1.0]);
    }

    #[test]
    fn sidak_values() {
        let adjusted = sidak(&[0.01]);
        assert_relative_eq!(adjusted[0], 0.01, epsilon = 1e-12);
        let adjusted = sidak(&[0.1, 0.5]);
        assert_relative_eq!(adjusted[0], 0.19, epsilon = 1e-12);
        assert_relative_eq!(adjusted[1], 0.75, epsilon = 1e-12);
    }

    #[test]
    fn sidak_keeps_precision_for_tiny_p() {
        let p = [1e-18, 0.5];

        let adjusted = sidak(&p);
        assert_relative_eq!(adjusted[0], 2e-18, max_relative = 1e-12);
        assert_relative_eq!(adjusted[1], 0.75, epsilon = 1e-12);

        let adjusted = holm_sidak(&p);
        assert_relative_eq!(adjusted[0], 2e-18, max_relative = 1e-12);
        assert_relative_eq!(adjusted[1], 0.5, epsilon = 1e-12);
        for (a, raw) in adjusted.iter().zip(&p) {
            assert!(*a >= *raw);
        }
    }

    #[test]
    fn holm_values() {
        // sorted: 0.005*5, 0.01*4, 0.03*3, 0.04*2, 0.2*1 -> 0.025, 0.04, 0.09, 0.09, 0.2
        assert_all_close(&holm(&P), &[0.04, 0.09, 0.09, 0.025, 0.2]);
    }

    #[test]
    fn simes_hochberg_values() {
        // sorted raw: 0.025, 0.04, 0.09, 0.08, 0.2 -> reverse cummin: 0.025, 0.04, 0.08, 0.08, 0.2
        assert_all_close(&simes_hochberg(&P), &[0.04, 0.08, 0.08, 0.025, 0.2]);
    }

    #[test]
    fn benjamini_hochberg_values() {
        // sorted raw: 0.005*5/1, 0.01*5/2, 0.03*5/3, 0.04*5/4, 0.2*5/5
        //           = 0.025, 0.025, 0.05, 0.05, 0.2
        assert_all_close(&benjamini_hochberg(&P), &[0.025, 0.05, 0.05, 0.025, 0.2]);
    }

    #[test]
    fn benjamini_yekutieli_scales_bh_by_harmonic_number() {
        let c = 1.0 + 0.5 + 1.0 / 3.0 + 0.25 + 0.2;
        let expected: Vec<f64> = benjamini_hochberg(&P)
            .iter()
            .map(|v| (v * c).min(1.0))
            .collect();
        assert_all_close(&benjamini_yekutieli(&P), &expected);
    }

    #[test]
    fn single_test_is_unadjusted_for_fdr() {
        assert_all_close(&benjamini_yekutieli(&[0.03]), &[0.03]);
        assert_all_close(&benjamini_hochberg(&[0.03]), &[0.03]);
        assert_all_close(&hommel(&[0.03]), &[0.03]);
    }

    #[test]
    fn hommel_between_hochberg_and_raw() {
        let hommel = hommel(&P);
        let hochberg = simes_hochberg(&P);
        for ((h, sh), raw) in hommel.iter().zip(hochberg.iter()).zip(P.iter()) {
            assert!(*h <= *sh + 1e-12);
            assert!(*h >= *raw - 1e-12);
        }
    }

    #[test]
    fn hommel_two_tests() {
        // m = 2: cim = min(2*0.01, 2*0.04/2) = 0.02 -> [0.02, 0.04]
        assert_all_close(&hommel(&[0.04, 0.01]), &[0.04, 0.02]);
    }

    #[test]
    fn empty_input() {
        assert!(bonferroni(&[]).is_empty());
        assert!(holm(&[]).is_empty());
        assert!(benjamini_yekutieli(&[]).is_empty());
        assert!(hommel(&[]).is_empty());
    }
}
