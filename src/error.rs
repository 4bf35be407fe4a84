//! Error type shared by every fallible operation in the crate.

/// Errors raised when evaluating a hypothesis test.
///
/// The numeric kernels in [`special`](crate::special) never return this
/// type; they signal bad input with `NaN`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HypothesisError {
    /// Input violates a precondition of the requested test.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),
}

impl HypothesisError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        HypothesisError::InvalidInput(msg.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HypothesisError>;
