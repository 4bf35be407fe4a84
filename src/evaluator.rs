//! Z-test and one-sample t-test evaluation.
//!
//! A test takes observed data (raw values or summary statistics) and a
//! hypothesized population mean, computes a standardized statistic, looks
//! up its p-value under the null distribution and compares it with a
//! significance level.
//!
//! # Examples
//!
//! ```
//! use u_hypotest::evaluator::{decide, evaluate_t, evaluate_z};
//!
//! // Known σ: Z = (1045 − 1060) / 3 = −5
//! let z = evaluate_z(1045.0, 1060.0, 3.0, true).unwrap();
//! assert_eq!(z.statistic, -5.0);
//! assert!(decide(&z, 0.05).unwrap());
//!
//! // Unknown σ, estimated from the sample
//! let t = evaluate_t(&[1035.0, 1050.0, 1020.0, 1055.0, 1046.0], 1060.0, true).unwrap();
//! assert_eq!(t.df, Some(4.0));
//! assert!(!decide(&t, 0.01).unwrap());
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{validate_alpha, EvaluatorConfig};
use crate::distributions::{Alternative, ReferenceDistribution, StudentT};
use crate::error::{HypothesisError, Result};
use crate::special;
use crate::stats::Sample;

/// Which test to run, with its null-hypothesis parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HypothesisTest {
    /// Population standard deviation `sigma` is known. H₀: μ = `mu`.
    ZTest { mu: f64, sigma: f64 },
    /// Standard deviation estimated from the sample. H₀: μ = `mu`.
    TTest { mu: f64 },
}

impl HypothesisTest {
    /// Z-test against `mu` with known `sigma`.
    ///
    /// # Errors
    /// [`HypothesisError::InvalidInput`] if `sigma ≤ 0` or a parameter is
    /// not finite.
    pub fn z(mu: f64, sigma: f64) -> Result<Self> {
        let test = HypothesisTest::ZTest { mu, sigma };
        test.validate()?;
        Ok(test)
    }

    /// t-test against `mu`.
    ///
    /// # Errors
    /// [`HypothesisError::InvalidInput`] if `mu` is not finite.
    pub fn t(mu: f64) -> Result<Self> {
        let test = HypothesisTest::TTest { mu };
        test.validate()?;
        Ok(test)
    }

    /// Hypothesized population mean.
    pub fn mu(&self) -> f64 {
        match *self {
            HypothesisTest::ZTest { mu, .. } | HypothesisTest::TTest { mu } => mu,
        }
    }

    /// Smallest sample the test accepts.
    pub fn min_sample_size(&self) -> usize {
        match self {
            HypothesisTest::ZTest { .. } => 1,
            HypothesisTest::TTest { .. } => 2,
        }
    }

    /// Checks the parameter invariants.
    pub fn validate(&self) -> Result<()> {
        match *self {
            HypothesisTest::ZTest { mu, sigma } => {
                check_finite("mu", mu)?;
                check_sigma(sigma)
            }
            HypothesisTest::TTest { mu } => check_finite("mu", mu),
        }
    }

    /// Runs the test on raw observations with the default configuration.
    ///
    /// For `ZTest` the statistic is `(x̄ − μ)/(σ/√n)`, which reduces to
    /// [`evaluate_z`] for a single observation.
    pub fn evaluate(&self, sample: &[f64], alternative: Alternative) -> Result<TestResult> {
        Evaluator::from_alternative(alternative).evaluate(self, sample)
    }
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Standardized statistic (Z or T), signed as `x̄ − μ`.
    pub statistic: f64,
    /// Probability under H₀ of a statistic at least as extreme; in [0, 1].
    pub p_value: f64,
    /// Degrees of freedom of the t reference distribution; `None` for Z.
    pub df: Option<f64>,
    /// Tail(s) the p-value covers.
    pub alternative: Alternative,
    /// Significance level `reject` was decided at.
    pub alpha: f64,
    /// Whether H₀ is rejected at `alpha`.
    pub reject: bool,
}

/// Decides whether to reject H₀ at significance `alpha`: true iff
/// `result.p_value < alpha`.
///
/// # Errors
/// [`HypothesisError::InvalidInput`] if `alpha` is outside (0, 1).
///
/// # Examples
/// ```
/// use u_hypotest::evaluator::{decide, evaluate_z};
/// let r = evaluate_z(101.0, 100.0, 0.5, true).unwrap(); // Z = 2
/// assert!(decide(&r, 0.05).unwrap());
/// assert!(!decide(&r, 0.01).unwrap());
/// assert!(decide(&r, 1.0).is_err());
/// ```
pub fn decide(result: &TestResult, alpha: f64) -> Result<bool> {
    validate_alpha(alpha)?;
    Ok(result.p_value < alpha)
}

/// Z-test from a sample mean and the known standard deviation of that mean.
///
/// `Z = (sample_mean − mu) / sigma`. `reject` uses the default α = 0.05.
///
/// # Errors
/// [`HypothesisError::InvalidInput`] if `sigma ≤ 0` or any input is not
/// finite.
pub fn evaluate_z(sample_mean: f64, mu: f64, sigma: f64, two_sided: bool) -> Result<TestResult> {
    Evaluator::from_alternative(Alternative::from_two_sided(two_sided))
        .evaluate_z(sample_mean, mu, sigma)
}

/// One-sample Student's t-test.
///
/// `T = (x̄ − mu) / (s/√n)` with `s` the sample standard deviation (n − 1
/// denominator) and `n − 1` degrees of freedom. `reject` uses the default
/// α = 0.05.
///
/// # Errors
/// [`HypothesisError::InvalidInput`] if the sample has fewer than 2
/// observations, contains non-finite values, or has zero variance.
pub fn evaluate_t(sample: &[f64], mu: f64, two_sided: bool) -> Result<TestResult> {
    Evaluator::from_alternative(Alternative::from_two_sided(two_sided)).evaluate_t(sample, mu)
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Runs tests with a fixed significance level and alternative.
///
/// ```
/// use u_hypotest::config::EvaluatorConfig;
/// use u_hypotest::distributions::Alternative;
/// use u_hypotest::evaluator::Evaluator;
///
/// let ev = Evaluator::new(
///     EvaluatorConfig::default()
///         .with_alpha(0.01)
///         .with_alternative(Alternative::OneSided),
/// )
/// .unwrap();
/// let r = ev.evaluate_z(102.5, 100.0, 1.0).unwrap();
/// assert!(r.reject);
/// assert_eq!(r.alpha, 0.01);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Creates an evaluator after validating `config`.
    ///
    /// # Errors
    /// [`HypothesisError::InvalidInput`] if the configuration is out of range.
    pub fn new(config: EvaluatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    fn from_alternative(alternative: Alternative) -> Self {
        Self {
            config: EvaluatorConfig::default().with_alternative(alternative),
        }
    }

    /// The configuration every evaluation uses.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Z-test: `Z = (sample_mean − mu) / sigma`.
    ///
    /// # Errors
    /// [`HypothesisError::InvalidInput`] if `sigma ≤ 0` or any input is not
    /// finite.
    pub fn evaluate_z(&self, sample_mean: f64, mu: f64, sigma: f64) -> Result<TestResult> {
        check_finite("sample mean", sample_mean)?;
        check_finite("mu", mu)?;
        check_sigma(sigma)?;

        let z = (sample_mean - mu) / sigma;
        Ok(self.conclude(z, ReferenceDistribution::StandardNormal))
    }

    /// One-sample t-test on raw observations.
    ///
    /// # Errors
    /// [`HypothesisError::InvalidInput`] if the sample has fewer than 2
    /// observations, contains non-finite values, or has zero variance.
    pub fn evaluate_t(&self, sample: &[f64], mu: f64) -> Result<TestResult> {
        if sample.len() < 2 {
            return Err(HypothesisError::invalid(format!(
                "t-test needs at least 2 observations, got {}",
                sample.len()
            )));
        }
        let sample = Sample::new(sample)?;
        let sd = sample
            .std_dev()
            .ok_or_else(|| HypothesisError::invalid("sample standard deviation undefined"))?;
        if sd == 0.0 {
            return Err(HypothesisError::invalid(
                "t-test is undefined for a sample with zero variance",
            ));
        }
        if !sd.is_finite() {
            return Err(HypothesisError::invalid(format!(
                "sample standard deviation is not representable as f64 (n = {})",
                sample.len()
            )));
        }
        self.evaluate_t_summary(sample.mean(), sd, sample.len(), mu)
    }

    /// One-sample t-test from summary statistics: mean, sample standard
    /// deviation (n − 1 denominator) and size.
    ///
    /// # Errors
    /// [`HypothesisError::InvalidInput`] if `n < 2`, `sample_std_dev ≤ 0`,
    /// or any input is not finite.
    pub fn evaluate_t_summary(
        &self,
        sample_mean: f64,
        sample_std_dev: f64,
        n: usize,
        mu: f64,
    ) -> Result<TestResult> {
        if n < 2 {
            return Err(HypothesisError::invalid(format!(
                "t-test needs at least 2 observations, got {n}"
            )));
        }
        check_finite("sample mean", sample_mean)?;
        check_finite("mu", mu)?;
        if !sample_std_dev.is_finite() || sample_std_dev <= 0.0 {
            return Err(HypothesisError::invalid(format!(
                "t-test needs a positive sample standard deviation, got {sample_std_dev}"
            )));
        }

        let se = sample_std_dev / (n as f64).sqrt();
        let t = (sample_mean - mu) / se;
        let dist = StudentT::new((n - 1) as f64)?;
        Ok(self.conclude(t, ReferenceDistribution::StudentT(dist)))
    }

    /// Runs `test` on raw observations.
    ///
    /// # Errors
    /// [`HypothesisError::InvalidInput`] if the test parameters are invalid
    /// or the sample is smaller than [`HypothesisTest::min_sample_size`].
    pub fn evaluate(&self, test: &HypothesisTest, sample: &[f64]) -> Result<TestResult> {
        test.validate()?;
        match *test {
            HypothesisTest::ZTest { mu, sigma } => {
                let sample = Sample::new(sample)?;
                let se = sigma / (sample.len() as f64).sqrt();
                self.evaluate_z(sample.mean(), mu, se)
            }
            HypothesisTest::TTest { mu } => self.evaluate_t(sample, mu),
        }
    }

    /// Smallest `|statistic|` rejected under the configured α and
    /// alternative. `df` selects Student's t; `None` selects the normal.
    /// Accurate for every α the configuration accepts, however small.
    ///
    /// # Errors
    /// [`HypothesisError::InvalidInput`] if `df` is not positive.
    pub fn critical_value(&self, df: Option<f64>) -> Result<f64> {
        let dist = match df {
            Some(df) => ReferenceDistribution::StudentT(StudentT::new(df)?),
            None => ReferenceDistribution::StandardNormal,
        };
        dist.critical_value(self.config.alpha, self.config.alternative)
            .ok_or_else(|| {
                HypothesisError::invalid(format!("alpha must lie in (0, 1), got {}", self.config.alpha))
            })
    }

    /// Two-sided t confidence interval for the mean at level `1 − α`.
    ///
    /// # Errors
    /// Same conditions as [`mean_confidence_interval`].
    pub fn confidence_interval(&self, sample: &[f64]) -> Result<ConfidenceInterval> {
        mean_confidence_interval(sample, 1.0 - self.config.alpha)
    }

    fn conclude(&self, statistic: f64, dist: ReferenceDistribution) -> TestResult {
        let alpha = self.config.alpha;
        let alternative = self.config.alternative;
        let df = dist.df();
        let p_value = dist.p_value(statistic, alternative);
        if p_value == 0.0 {
            warn!(statistic, "p-value underflowed; saturating at 0");
        }
        let reject = p_value < alpha;
        debug!(statistic, p_value, ?df, ?alternative, alpha, reject, "hypothesis test evaluated");

        TestResult {
            statistic,
            p_value,
            df,
            alternative,
            alpha,
            reject,
        }
    }
}

// ---------------------------------------------------------------------------
// Confidence intervals
// ---------------------------------------------------------------------------

/// Closed interval estimate for a population mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Confidence level in (0, 1), e.g. 0.95.
    pub level: f64,
}

impl ConfidenceInterval {
    /// Whether `x` lies within `[lower, upper]`.
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    /// Length of the interval, `upper − lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// t-based confidence interval `x̄ ± t_{(1+level)/2, n−1} · s/√n`.
///
/// # Errors
/// [`HypothesisError::InvalidInput`] if `level` is outside (0, 1), the
/// sample has fewer than 2 observations, or contains non-finite values.
///
/// # Examples
/// ```
/// use u_hypotest::evaluator::mean_confidence_interval;
/// let ci = mean_confidence_interval(&[1035.0, 1050.0, 1020.0, 1055.0, 1046.0], 0.95).unwrap();
/// assert!(ci.contains(1041.2));
/// assert!(!ci.contains(1060.0));
/// ```
pub fn mean_confidence_interval(sample: &[f64], level: f64) -> Result<ConfidenceInterval> {
    check_level(level)?;
    if sample.len() < 2 {
        return Err(HypothesisError::invalid(format!(
            "confidence interval needs at least 2 observations, got {}",
            sample.len()
        )));
    }
    let sample = Sample::new(sample)?;
    let se = sample
        .standard_error()
        .ok_or_else(|| HypothesisError::invalid("standard error undefined"))?;
    let dist = StudentT::new((sample.len() - 1) as f64)?;
    let q = dist
        .quantile(0.5 + level / 2.0)
        .ok_or_else(|| HypothesisError::invalid(format!("level out of range: {level}")))?;
    Ok(ConfidenceInterval {
        lower: sample.mean() - q * se,
        upper: sample.mean() + q * se,
        level,
    })
}

/// Normal confidence interval `x̄ ± z_{(1+level)/2} · sigma` for a mean
/// whose standard deviation `sigma` is known.
///
/// # Errors
/// [`HypothesisError::InvalidInput`] if `level` is outside (0, 1),
/// `sigma ≤ 0`, or an input is not finite.
pub fn z_confidence_interval(sample_mean: f64, sigma: f64, level: f64) -> Result<ConfidenceInterval> {
    check_level(level)?;
    check_finite("sample mean", sample_mean)?;
    check_sigma(sigma)?;
    let q = special::inverse_normal_cdf(0.5 + level / 2.0);
    Ok(ConfidenceInterval {
        lower: sample_mean - q * sigma,
        upper: sample_mean + q * sigma,
        level,
    })
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(HypothesisError::invalid(format!(
            "{name} must be finite, got {value}"
        )));
    }
    Ok(())
}

fn check_sigma(sigma: f64) -> Result<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(HypothesisError::invalid(format!(
            "sigma must be finite and > 0, got {sigma}"
        )));
    }
    Ok(())
}

fn check_level(level: f64) -> Result<()> {
    if level.is_nan() || level <= 0.0 || level >= 1.0 {
        return Err(HypothesisError::invalid(format!(
            "confidence level must lie in (0, 1), got {level}"
        )));
    }
    Ok(())
}
