//! # u-hypotest
//!
//! Statistical hypothesis evaluation for a population mean.
//!
//! Given sample data (or summary statistics) and a hypothesized mean, this
//! crate computes a Z or Student's t statistic, its p-value under the null
//! distribution, and a reject/retain decision at a significance level.
//!
//! ## Modules
//!
//! - [`evaluator`] — `evaluate_z`, `evaluate_t`, `decide`, configured [`Evaluator`], confidence intervals
//! - [`distributions`] — Normal and Student's t reference distributions, p-values and critical values
//! - [`special`] — erf/erfc, normal and t CDFs, incomplete gamma and beta functions
//! - [`stats`] — Compensated mean, Welford variance, validated [`Sample`]
//! - [`config`] — Significance level and alternative, loadable from JSON
//! - [`random`] — Seeded normal sampling and Monte-Carlo rejection rates
//!
//! ## Example
//!
//! ```
//! use u_hypotest::{decide, evaluate_t, evaluate_z};
//!
//! let z = evaluate_z(1045.0, 1060.0, 3.0, true).unwrap();
//! assert!((z.p_value - 5.733e-7).abs() < 1e-9);
//!
//! let t = evaluate_t(&[1035.0, 1050.0, 1020.0, 1055.0, 1046.0], 1060.0, true).unwrap();
//! assert!(decide(&t, 0.05).unwrap());
//! ```
//!
//! ## Design Philosophy
//!
//! - **Tail-accurate**: p-values come from survival functions, never `1 − CDF`,
//!   and saturate at `0.0` instead of going negative
//! - **Explicit failure**: invalid input is an error, never a silent `NaN`
//! - **Pure**: every evaluation is a function of its inputs; no shared state

pub mod config;
pub mod distributions;
pub mod error;
pub mod evaluator;
pub mod random;
pub mod special;
pub mod stats;

pub use config::EvaluatorConfig;
pub use distributions::Alternative;
pub use error::{HypothesisError, Result};
pub use evaluator::{
    decide, evaluate_t, evaluate_z, mean_confidence_interval, z_confidence_interval,
    ConfidenceInterval, Evaluator, HypothesisTest, TestResult,
};
pub use stats::Sample;
