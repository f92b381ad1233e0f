//! First differencing.

/// First difference of a series: `y[t] = x[t] - x[t-1]` for t = 1..T-1.
///
/// The result is one observation shorter than the input; the earliest
/// observation has no predecessor and is lost. Series with fewer than two
/// observations difference to an empty series.
pub fn difference(series: &[f64]) -> Vec<f64> {
    series.windows(2).map(|w| w[1] - w[0]).collect()
}
