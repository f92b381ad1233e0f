//! Pipeline configuration.

use crate::correction::{CorrectionMethod, PoolingMode};
use crate::error::{Result, StationarizeError};
use crate::stationarity::{Adf, Autolag, Kpss, Regression};
use serde::Deserialize;

/// What to do with a column whose tests cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsufficientDataPolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Leave the column untransformed and keep going.
    Skip,
}

/// Settings for a stationarization run.
///
/// # Example
/// ```
/// use stationarizer::pipeline::StationarizeConfig;
///
/// let config = StationarizeConfig::from_toml_str(
///     r#"
///     alpha = 0.1
///     multitest_method = "fdr_bh"
///     pooling = "joint"
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.alpha, 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationarizeConfig {
    /// Level at which corrected p-values are rejected.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Multiple testing correction.
    #[serde(default)]
    pub multitest_method: CorrectionMethod,
    /// Grouping of p-values into correction batches.
    #[serde(default)]
    pub pooling: PoolingMode,
    #[serde(default)]
    pub on_insufficient_data: InsufficientDataPolicy,
    /// Deterministic terms of both diagnostic tests.
    #[serde(default)]
    pub regression: Regression,
    #[serde(default)]
    pub adf_max_lags: Option<usize>,
    #[serde(default)]
    pub adf_autolag: Autolag,
    /// KPSS bandwidth; `None` selects it from the data.
    #[serde(default)]
    pub kpss_lags: Option<usize>,
}

fn default_alpha() -> f64 {
    0.05
}

impl Default for StationarizeConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            multitest_method: CorrectionMethod::default(),
            pooling: PoolingMode::default(),
            on_insufficient_data: InsufficientDataPolicy::default(),
            regression: Regression::default(),
            adf_max_lags: None,
            adf_autolag: Autolag::default(),
            kpss_lags: None,
        }
    }
}

impl StationarizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rejection level.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the correction method by name.
    ///
    /// # Errors
    /// `UnknownCorrectionMethod` for an unrecognized name.
    pub fn multitest_method(mut self, name: &str) -> Result<Self> {
        self.multitest_method = name.parse()?;
        Ok(self)
    }

    /// Set the correction method.
    pub fn correction(mut self, method: CorrectionMethod) -> Self {
        self.multitest_method = method;
        self
    }

    pub fn pooling(mut self, pooling: PoolingMode) -> Self {
        self.pooling = pooling;
        self
    }

    pub fn on_insufficient_data(mut self, policy: InsufficientDataPolicy) -> Self {
        self.on_insufficient_data = policy;
        self
    }

    pub fn regression(mut self, regression: Regression) -> Self {
        self.regression = regression;
        self
    }

    pub fn adf_max_lags(mut self, max_lags: usize) -> Self {
        self.adf_max_lags = Some(max_lags);
        self
    }

    pub fn adf_autolag(mut self, autolag: Autolag) -> Self {
        self.adf_autolag = autolag;
        self
    }

    pub fn kpss_lags(mut self, lags: usize) -> Self {
        self.kpss_lags = Some(lags);
        self
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    ///
    /// # Errors
    /// `Config` when the text is not valid TOML or holds unknown keys or
    /// values, `InvalidParameter` when it fails [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| StationarizeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(StationarizeError::InvalidParameter(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        Ok(())
    }

    /// Unit-root test described by this configuration.
    pub fn adf(&self) -> Adf {
        let adf = Adf::new()
            .regression(self.regression)
            .autolag(self.adf_autolag);
        match self.adf_max_lags {
            Some(lags) => adf.max_lags(lags),
            None => adf,
        }
    }

    /// Trend-stationarity test described by this configuration.
    pub fn kpss(&self) -> Kpss {
        let kpss = Kpss::new().regression(self.regression);
        match self.kpss_lags {
            Some(lags) => kpss.lags(lags),
            None => kpss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = StationarizeConfig::default();
        assert_eq!(config.alpha, 0.05);
        assert_eq!(config.multitest_method, CorrectionMethod::BenjaminiYekutieli);
        assert_eq!(config.pooling, PoolingMode::PerFamily);
        assert_eq!(config.on_insufficient_data, InsufficientDataPolicy::Abort);
        assert_eq!(config.regression, Regression::ConstantTrend);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let config = StationarizeConfig::new()
            .alpha(0.1)
            .multitest_method("holm")
            .unwrap()
            .pooling(PoolingMode::Joint)
            .kpss_lags(4);

        assert_eq!(config.alpha, 0.1);
        assert_eq!(config.multitest_method, CorrectionMethod::Holm);
        assert_eq!(config.kpss().lags, Some(4));
        assert_eq!(config.adf().max_lags, None);
    }

    #[test]
    fn unknown_method_fails_at_configuration() {
        let err = StationarizeConfig::new().multitest_method("magic").unwrap_err();
        assert_eq!(err, StationarizeError::UnknownCorrectionMethod("magic".to_string()));
    }

    #[test]
    fn alpha_out_of_range() {
        for alpha in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            let err = StationarizeConfig::new().alpha(alpha).validate().unwrap_err();
            assert!(matches!(err, StationarizeError::InvalidParameter(_)));
        }
    }

    #[test]
    fn toml_full() {
        let config = StationarizeConfig::from_toml_str(
            r#"
            alpha = 0.01
            multitest_method = "hommel"
            pooling = "joint"
            on_insufficient_data = "skip"
            regression = "constant"
            adf_max_lags = 8
            adf_autolag = "bic"
            kpss_lags = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.multitest_method, CorrectionMethod::Hommel);
        assert_eq!(config.on_insufficient_data, InsufficientDataPolicy::Skip);
        assert_eq!(config.regression, Regression::Constant);
        assert_eq!(config.adf().max_lags, Some(8));
        assert_eq!(config.adf().autolag, Autolag::Bic);
    }

    #[test]
    fn toml_empty_is_default() {
        assert_eq!(
            StationarizeConfig::from_toml_str("").unwrap(),
            StationarizeConfig::default()
        );
    }

    #[test]
    fn toml_errors() {
        assert!(matches!(
            StationarizeConfig::from_toml_str("alfa = 0.1").unwrap_err(),
            StationarizeError::Config(_)
        ));
        assert!(matches!(
            StationarizeConfig::from_toml_str(r#"multitest_method = "magic""#).unwrap_err(),
            StationarizeError::Config(_)
        ));
        assert!(matches!(
            StationarizeConfig::from_toml_str("alpha = 2.0").unwrap_err(),
            StationarizeError::InvalidParameter(_)
        ));
    }
}
