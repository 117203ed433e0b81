//! Error type shared by the pricer and the implied-volatility solver.

use thiserror::Error;

/// Failures raised before any numerical work is attempted.
///
/// Non-convergence of the solver is deliberately *not* an error; it is reported
/// through [`SolveStatus`](crate::SolveStatus) on a successful result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A pricing input lies outside the domain of the closed-form model
    /// (non-positive spot, strike, maturity or volatility, or a non-finite value).
    #[error("invalid {field}: {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Solver settings that cannot produce a meaningful search.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}

impl PricingError {
    pub(crate) fn not_positive(field: &'static str, value: f64) -> Self {
        PricingError::InvalidInput {
            field,
            value,
            reason: "must be > 0 and finite",
        }
    }

    pub(crate) fn not_finite(field: &'static str, value: f64) -> Self {
        PricingError::InvalidInput {
            field,
            value,
            reason: "must be finite",
        }
    }
}

/// Convenience alias used across the core modules.
pub type PricingResult<T> = std::result::Result<T, PricingError>;
