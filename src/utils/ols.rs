//! Ordinary Least Squares (OLS) regression utilities.
//!
//! Used by the diagnostic test regressions. The design matrix is passed
//! column-major and must contain the intercept column explicitly if one is
//! wanted.

use crate::error::TestError;

/// Relative pivot below which the normal equations are treated as singular.
const SINGULAR_TOL: f64 = 1e-12;

/// Fitted OLS regression.
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Coefficients, one per design column.
    pub coefficients: Vec<f64>,
    /// Standard errors of the coefficients.
    pub std_errors: Vec<f64>,
    /// Residuals y - X @ beta.
    pub residuals: Vec<f64>,
    /// Residual sum of squares.
    pub ssr: f64,
    /// Number of observations.
    pub n_obs: usize,
}

impl OlsFit {
    /// Number of estimated parameters.
    pub fn n_params(&self) -> usize {
        self.coefficients.len()
    }

    /// t-value of coefficient `j`.
    pub fn t_value(&self, j: usize) -> f64 {
        self.coefficients[j] / self.std_errors[j]
    }

    /// Gaussian log-likelihood at the fitted coefficients.
    pub fn log_likelihood(&self) -> f64 {
        let n = self.n_obs as f64;
        -n / 2.0 * ((2.0 * std::f64::consts::PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    /// Akaike information criterion.
    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood() + 2.0 * self.n_params() as f64
    }

    /// Bayesian information criterion.
    pub fn bic(&self) -> f64 {
        -2.0 * self.log_likelihood() + (self.n_obs as f64).ln() * self.n_params() as f64
    }
}

/// Fit `y = X @ beta` by solving the normal equations with a Cholesky
/// decomposition.
///
/// # Arguments
/// * `y` - Target values (length n)
/// * `design` - Design matrix columns (each length n)
///
/// # Errors
/// `TooShort` when there are not more observations than parameters,
/// `Singular` when the columns are (numerically) collinear.
pub fn ols(y: &[f64], design: &[Vec<f64>]) -> Result<OlsFit, TestError> {
    let n = y.len();
    let k = design.len();

    if n <= k {
        return Err(TestError::TooShort {
            needed: k + 1,
            got: n,
        });
    }
    debug_assert!(design.iter().all(|col| col.len() == n));

    // X'X and X'y
    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];
    for i in 0..k {
        for j in 0..=i {
            let dot: f64 = design[i].iter().zip(&design[j]).map(|(a, b)| a * b).sum();
            xtx[i][j] = dot;
            xtx[j][i] = dot;
        }
        xty[i] = design[i].iter().zip(y).map(|(a, b)| a * b).sum();
    }

    let l = cholesky(&xtx).ok_or(TestError::Singular)?;
    let beta = cholesky_solve(&l, &xty);

    let residuals: Vec<f64> = (0..n)
        .map(|obs| {
            let fitted: f64 = design.iter().zip(&beta).map(|(col, b)| col[obs] * b).sum();
            y[obs] - fitted
        })
        .collect();
    let ssr: f64 = residuals.iter().map(|r| r * r).sum();

    let sigma_sq = ssr / (n - k) as f64;
    let std_errors = inverse_diagonal(&l)
        .into_iter()
        .map(|d| (sigma_sq * d).sqrt())
        .collect();

    Ok(OlsFit {
        coefficients: beta,
        std_errors,
        residuals,
        ssr,
        n_obs: n,
    })
}

/// Cholesky decomposition A = L @ L'.
///
/// Returns `None` when A is not (numerically) positive definite.
fn cholesky(a: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let n = a.len();
    let mut l = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }

            if i == j {
                if sum <= SINGULAR_TOL * a[i][i] || sum <= 0.0 {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    Some(l)
}

/// Solve L @ L' @ x = b given the Cholesky factor L.
fn cholesky_solve(l: &[Vec<f64>], b: &[f64]) -> Vec<f64> {
    let n = b.len();

    // Forward substitution: L @ y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Backward substitution: L' @ x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    x
}

/// Diagonal of (L @ L')^-1 = L^-T @ L^-1.
fn inverse_diagonal(l: &[Vec<f64>]) -> Vec<f64> {
    let n = l.len();

    // Columns of L^-1 by forward substitution against the identity
    let mut l_inv = vec![vec![0.0; n]; n];
    for col in 0..n {
        for i in col..n {
            let mut sum = if i == col { 1.0 } else { 0.0 };
            for j in col..i {
                sum -= l[i][j] * l_inv[j][col];
            }
            l_inv[i][col] = sum / l[i][i];
        }
    }

    (0..n)
        .map(|j| (j..n).map(|i| l_inv[i][j] * l_inv[i][j]).sum())
        .collect()
}
