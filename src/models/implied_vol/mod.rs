//! Implied volatility module
//!
//! Recovers the Black-Scholes volatility that reproduces an observed call price
//! by bisection over a fixed volatility bracket. Non-convergence is reported on
//! the returned [`IvSolution`] rather than hidden behind a best-effort number.

pub mod bisection;
pub mod types;

pub use bisection::*;
pub use types::*;
