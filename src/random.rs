//! Seeded sampling and Monte-Carlo checks of test behavior.
//!
//! Draws synthetic normal samples with `rand_distr` and measures how
//! often a test rejects H₀ across many of them. Under H₀ the rejection
//! rate estimates the type I error (≈ α); away from H₀ it estimates power.
//!
//! # Reproducibility
//!
//! Use [`create_rng`] with a fixed seed. The underlying algorithm
//! (SmallRng) is deterministic for a given seed on the same platform.

use rand::Rng;
use rand_distr::Distribution;
use tracing::debug;

use crate::distributions::Normal;
use crate::error::{HypothesisError, Result};
use crate::evaluator::{Evaluator, HypothesisTest};

/// Creates a fast, seeded random number generator.
///
/// # Examples
/// ```
/// use u_hypotest::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Sampler for `dist`, backed by [`rand_distr::Normal`].
///
/// # Errors
/// [`HypothesisError::InvalidInput`] if `rand_distr` rejects the
/// parameters.
pub fn normal_sampler(dist: &Normal) -> Result<rand_distr::Normal<f64>> {
    rand_distr::Normal::new(dist.mu(), dist.sigma())
        .map_err(|e| HypothesisError::invalid(format!("normal sampler: {e}")))
}

/// Draws `n` independent values from `dist`.
///
/// # Errors
/// Same conditions as [`normal_sampler`].
///
/// # Examples
/// ```
/// use u_hypotest::distributions::Normal;
/// use u_hypotest::random::{create_rng, normal_sample};
/// let mut rng = create_rng(7);
/// let xs = normal_sample(&Normal::new(1060.0, 3.0).unwrap(), 5, &mut rng).unwrap();
/// assert_eq!(xs.len(), 5);
/// ```
pub fn normal_sample<R: Rng>(dist: &Normal, n: usize, rng: &mut R) -> Result<Vec<f64>> {
    let sampler = normal_sampler(dist)?;
    Ok((0..n).map(|_| sampler.sample(rng)).collect())
}

/// Fraction of `trials` simulated samples of size `n`, drawn from
/// `population`, for which `evaluator` rejects `test`.
///
/// # Errors
/// [`HypothesisError::InvalidInput`] if `trials == 0`, `n` is below
/// [`HypothesisTest::min_sample_size`], or the test parameters are invalid.
///
/// # Examples
/// ```
/// use u_hypotest::distributions::Normal;
/// use u_hypotest::evaluator::{Evaluator, HypothesisTest};
/// use u_hypotest::random::{create_rng, rejection_rate};
///
/// let test = HypothesisTest::t(0.0).unwrap();
/// let population = Normal::new(3.0, 1.0).unwrap();
/// let mut rng = create_rng(1);
/// let power = rejection_rate(&test, &population, 10, 200, &Evaluator::default(), &mut rng).unwrap();
/// assert!(power > 0.95);
/// ```
pub fn rejection_rate<R: Rng>(
    test: &HypothesisTest,
    population: &Normal,
    n: usize,
    trials: usize,
    evaluator: &Evaluator,
    rng: &mut R,
) -> Result<f64> {
    test.validate()?;
    if trials == 0 {
        return Err(HypothesisError::invalid("trials must be > 0"));
    }
    if n < test.min_sample_size() {
        return Err(HypothesisError::invalid(format!(
            "sample size {n} is below the minimum {} for {test:?}",
            test.min_sample_size()
        )));
    }

    let sampler = normal_sampler(population)?;
    let mut rejected = 0_usize;
    for _ in 0..trials {
        let sample: Vec<f64> = (0..n).map(|_| sampler.sample(rng)).collect();
        if evaluator.evaluate(test, &sample)?.reject {
            rejected += 1;
        }
    }

    let rate = rejected as f64 / trials as f64;
    debug!(rejected, trials, rate, "simulated rejection rate");
    Ok(rate)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn normal_sample_is_finite(seed in 0_u64..10000, mu in -1e3_f64..1e3, sigma in 0.01_f64..100.0) {
            let dist = Normal::new(mu, sigma).unwrap();
            let xs = normal_sample(&dist, 100, &mut create_rng(seed)).unwrap();
            prop_assert!(xs.iter().all(|x| x.is_finite()));
        }

        #[test]
        fn same_seed_same_sample(seed in 0_u64..10000, n in 0_usize..50) {
            let dist = Normal::standard();
            let a = normal_sample(&dist, n, &mut create_rng(seed)).unwrap();
            let b = normal_sample(&dist, n, &mut create_rng(seed)).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
