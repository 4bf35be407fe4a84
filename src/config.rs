//! Evaluator configuration.
//!
//! ```
//! use u_hypotest::config::EvaluatorConfig;
//! use u_hypotest::distributions::Alternative;
//!
//! let cfg = EvaluatorConfig::from_json(r#"{ "alpha": 0.01 }"#).unwrap();
//! assert_eq!(cfg.alpha, 0.01);
//! assert_eq!(cfg.alternative, Alternative::TwoSided);
//! ```

use serde::{Deserialize, Serialize};

use crate::distributions::Alternative;
use crate::error::{HypothesisError, Result};

/// Significance level used when none is configured.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Settings applied to every evaluation made by an
/// [`Evaluator`](crate::evaluator::Evaluator).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluatorConfig {
    /// Significance level α; the null is rejected when p < α.
    /// Must lie in (0, 1). Default: 0.05.
    pub alpha: f64,

    /// Tail(s) counted as extreme. Default: two-sided.
    pub alternative: Alternative,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            alternative: Alternative::TwoSided,
        }
    }
}

impl EvaluatorConfig {
    /// Sets the significance level.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the alternative hypothesis.
    pub fn with_alternative(mut self, alternative: Alternative) -> Self {
        self.alternative = alternative;
        self
    }

    /// Checks that every field is in range.
    ///
    /// # Errors
    /// [`HypothesisError::InvalidInput`] if `alpha` is outside (0, 1).
    pub fn validate(&self) -> Result<()> {
        validate_alpha(self.alpha)
    }

    /// Parses and validates a JSON configuration. Missing fields take
    /// their defaults; unknown fields are rejected.
    ///
    /// # Errors
    /// [`HypothesisError::ParseError`] on malformed JSON,
    /// [`HypothesisError::InvalidInput`] if validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| HypothesisError::ParseError(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serializes the configuration to pretty-printed JSON.
    ///
    /// # Errors
    /// [`HypothesisError::ParseError`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| HypothesisError::ParseError(e.to_string()))
    }
}

/// Checks that a significance level lies in the open interval (0, 1).
pub(crate) fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha.is_nan() || alpha <= 0.0 || alpha >= 1.0 {
        return Err(HypothesisError::invalid(format!(
            "alpha must lie in (0, 1), got {alpha}"
        )));
    }
    Ok(())
}
