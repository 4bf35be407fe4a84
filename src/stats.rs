//! Descriptive statistics for sample summaries.
//!
//! All functions handle edge cases explicitly and use numerically stable
//! algorithms so that large offsets (e.g. measurements around 1000 with
//! spread of a few units) do not lose precision.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier compensated summation, O(ε) error independent of n.
//! - **Variance**: Welford's online algorithm.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//! - **Extreme scale**: when a sum or s² overflows or underflows, the
//!   computation is repeated on data divided by `max |x|` and scaled back.

use crate::error::{HypothesisError, Result};

/// Computes the arithmetic mean using compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use u_hypotest::stats::mean;
/// let v = [1035.0, 1050.0, 1020.0, 1055.0, 1046.0];
/// assert!((mean(&v).unwrap() - 1041.2).abs() < 1e-12);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let n = data.len() as f64;
    let sum = kahan_sum(data);
    if sum.is_finite() {
        return Some(sum / n);
    }
    let scale = max_abs(data);
    Some(kahan_sum(&scaled(data, scale)) / n * scale)
}

/// Computes the sample variance (Bessel's correction, denominator `n − 1`).
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_hypotest::stats::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let var = welford_variance(data)?;
    if var.is_finite() {
        return Some(var);
    }
    // Deviations overflowed; the result may still be +∞, but never NaN.
    let scale = max_abs(data);
    welford_variance(&scaled(data, scale)).map(|v| v * scale * scale)
}

/// Computes the sample standard deviation, `sqrt(variance(data))`.
///
/// Stays finite and positive when s² itself is not representable, e.g.
/// for observations around 1e-300 or 1e308.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_hypotest::stats::std_dev;
/// // s² = 1e-600 underflows, s = 1e-300 does not
/// let s = std_dev(&[1e-300, 2e-300, 3e-300]).unwrap();
/// assert!((s / 1e-300 - 1.0).abs() < 1e-12);
/// ```
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let var = variance(data)?;
    if var.is_finite() && var >= f64::MIN_POSITIVE {
        return Some(var.sqrt());
    }
    let scale = max_abs(data);
    if scale == 0.0 {
        return Some(0.0);
    }
    welford_variance(&scaled(data, scale)).map(|v| v.sqrt() * scale)
}

fn welford_variance(data: &[f64]) -> Option<f64> {
    let mut acc = WelfordAccumulator::new();
    for &x in data {
        acc.update(x);
    }
    acc.sample_variance()
}

fn max_abs(data: &[f64]) -> f64 {
    data.iter().fold(0.0_f64, |m, x| m.max(x.abs()))
}

fn scaled(data: &[f64], scale: f64) -> Vec<f64> {
    data.iter().map(|x| x / scale).collect()
}

/// Neumaier compensated summation.
///
/// An improved Kahan summation that also handles the case where the
/// addend is larger in magnitude than the running sum.
///
/// Reference: Neumaier (1974), *Zeitschrift für Angewandte Mathematik und
/// Mechanik* 54(1), pp. 39–51.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

// ---------------------------------------------------------------------------
// Welford online accumulator
// ---------------------------------------------------------------------------

/// Streaming accumulator for mean and variance.
///
/// Single pass, O(1) memory. Maintains the running mean and the sum of
/// squared deviations M₂.
///
/// # Examples
/// ```
/// use u_hypotest::stats::WelfordAccumulator;
/// let mut acc = WelfordAccumulator::new();
/// for &x in &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.update(x);
/// }
/// assert!((acc.mean().unwrap() - 5.0).abs() < 1e-15);
/// assert!((acc.sample_variance().unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WelfordAccumulator {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl WelfordAccumulator {
    /// Creates a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a new value into the accumulator.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let n = self.count as f64;
        let delta = value - self.mean_acc;
        self.mean_acc += delta / n;
        self.m2 += delta * (value - self.mean_acc);
    }

    /// Returns the number of values seen so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the running mean, or `None` if nothing has been added.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.mean_acc)
        }
    }

    /// Returns the sample variance (n − 1 denominator), or `None` if fewer
    /// than 2 values have been added.
    pub fn sample_variance(&self) -> Option<f64> {
        if self.count < 2 {
            None
        } else {
            Some(self.m2 / (self.count - 1) as f64)
        }
    }

    /// Returns the sample standard deviation, or `None` if fewer than 2
    /// values have been added.
    pub fn sample_std_dev(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }
}

// ---------------------------------------------------------------------------
// Sample
// ---------------------------------------------------------------------------

/// An ordered, validated sequence of finite observations with its
/// summary statistics precomputed.
///
/// # Examples
/// ```
/// use u_hypotest::stats::Sample;
/// let s = Sample::new(&[1035.0, 1050.0, 1020.0, 1055.0, 1046.0]).unwrap();
/// assert_eq!(s.len(), 5);
/// assert!((s.mean() - 1041.2).abs() < 1e-12);
/// assert!((s.variance().unwrap() - 194.7).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
    mean: f64,
    variance: Option<f64>,
    std_dev: Option<f64>,
}

impl Sample {
    /// Builds a sample from raw observations.
    ///
    /// # Errors
    /// [`HypothesisError::InvalidInput`] if `values` is empty or contains
    /// a NaN/Inf.
    pub fn new(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(HypothesisError::invalid("sample is empty"));
        }
        if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(HypothesisError::invalid(format!(
                "sample value at index {i} is not finite: {v}"
            )));
        }
        let mean = mean(values).ok_or_else(|| HypothesisError::invalid("sample mean undefined"))?;
        Ok(Self {
            values: values.to_vec(),
            mean,
            variance: variance(values),
            std_dev: std_dev(values),
        })
    }

    /// Number of observations, n.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; an empty sample cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The observations in their original order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Arithmetic mean x̄.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance with n − 1 denominator; `None` when n < 2.
    pub fn variance(&self) -> Option<f64> {
        self.variance
    }

    /// Sample standard deviation s; `None` when n < 2.
    pub fn std_dev(&self) -> Option<f64> {
        self.std_dev
    }

    /// Estimated standard error of the mean, s/√n; `None` when n < 2.
    pub fn standard_error(&self) -> Option<f64> {
        self.std_dev().map(|s| s / (self.len() as f64).sqrt())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- mean ---

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_mean_non_finite() {
        assert_eq!(mean(&[1.0, f64::NAN, 3.0]), None);
        assert_eq!(mean(&[1.0, f64::INFINITY, 3.0]), None);
    }

    // --- variance ---

    #[test]
    fn test_variance_basic() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
    }

    #[test]
    fn test_variance_single() {
        assert_eq!(variance(&[42.0]), None);
    }

    #[test]
    fn test_variance_large_offset() {
        // Same spread as [1, 2, 3] shifted by 1e9
        let v = [1e9 + 1.0, 1e9 + 2.0, 1e9 + 3.0];
        assert!((variance(&v).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_std_dev_matches_reference() {
        let v = [1035.0, 1050.0, 1020.0, 1055.0, 1046.0];
        assert!((std_dev(&v).unwrap() - 13.9534941860453).abs() < 1e-10);
    }

    #[test]
    fn test_std_dev_tiny_scale() {
        // s² = 1e-600 is below the smallest subnormal
        let v = [1e-300, 2e-300, 3e-300];
        assert_eq!(variance(&v), Some(0.0));
        let s = std_dev(&v).unwrap();
        assert!((s / 1e-300 - 1.0).abs() < 1e-12, "s = {s}");
    }

    #[test]
    fn test_std_dev_huge_scale() {
        // deviations of 2e308 overflow during accumulation
        let v = [1e308, -1e308, 1e308];
        let s = std_dev(&v).unwrap();
        let expected = (4.0_f64 / 3.0).sqrt() * 1e308;
        assert!((s / expected - 1.0).abs() < 1e-12, "s = {s}");
        assert!(!variance(&v).unwrap().is_nan());
        assert!((mean(&v).unwrap() / (1e308 / 3.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_sum_overflow() {
        assert_eq!(mean(&[1.5e308, 1.5e308]), Some(1.5e308));
    }

    #[test]
    fn test_std_dev_constant_is_zero() {
        assert_eq!(std_dev(&[4.0, 4.0, 4.0]), Some(0.0));
        assert_eq!(std_dev(&[0.0, 0.0]), Some(0.0));
    }

    // --- kahan_sum ---

    #[test]
    fn test_kahan_sum_cancellation() {
        assert_eq!(kahan_sum(&[1.0, 1e100, 1.0, -1e100]), 2.0);
    }

    // --- WelfordAccumulator ---

    #[test]
    fn test_welford_empty() {
        let acc = WelfordAccumulator::new();
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.mean(), None);
        assert_eq!(acc.sample_variance(), None);
    }

    #[test]
    fn test_welford_single() {
        let mut acc = WelfordAccumulator::new();
        acc.update(7.5);
        assert_eq!(acc.mean(), Some(7.5));
        assert_eq!(acc.sample_std_dev(), None);
    }

    // --- Sample ---

    #[test]
    fn test_sample_rejects_empty() {
        assert!(matches!(
            Sample::new(&[]),
            Err(HypothesisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_sample_rejects_nan() {
        let err = Sample::new(&[1.0, f64::NAN]).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_sample_single_has_no_variance() {
        let s = Sample::new(&[3.0]).unwrap();
        assert_eq!(s.mean(), 3.0);
        assert_eq!(s.variance(), None);
        assert_eq!(s.standard_error(), None);
    }

    #[test]
    fn test_sample_standard_error() {
        let s = Sample::new(&[2.0, 4.0, 6.0, 8.0]).unwrap();
        // s² = 20/3, se = sqrt(20/3 / 4)
        let expected = (20.0_f64 / 3.0 / 4.0).sqrt();
        assert!((s.standard_error().unwrap() - expected).abs() < 1e-12);
        assert_eq!(s.values(), &[2.0, 4.0, 6.0, 8.0]);
    }
}
