//! # Smile-Lib: Black-Scholes Implied Volatility and Synthetic Smiles
//!
//! `smile-lib` prices European call options with the closed-form Black-Scholes
//! model and inverts that model to recover implied volatility from an observed
//! price. A small driver layer builds a synthetic volatility smile across a
//! strike grid to exercise both.
//!
//! ## Core Features
//!
//! - **Pricing**: [`bs_call_price`] with the normal CDF evaluated through `erfc`
//! - **Implied volatility**: bisection over the fixed bracket
//!   `[VOL_LOWER_BOUND, VOL_UPPER_BOUND]` with an explicit convergence status
//! - **Smile generation**: [`build_smile`] over a configurable strike grid,
//!   tolerant of individual strike failures
//!
//! ## Quick Start
//!
//! ```rust
//! use smile_lib::{bs_call_price, default_configs, implied_volatility};
//!
//! let price = bs_call_price(100.0, 100.0, 0.5, 0.01, 0.2)?;
//! let config = default_configs::standard();
//! let solution = implied_volatility(price, 100.0, 100.0, 0.5, 0.01, &config)?;
//!
//! assert!(solution.is_converged());
//! assert!((solution.volatility - 0.2).abs() < 1e-4);
//! # Ok::<(), smile_lib::PricingError>(())
//! ```
//!
//! ## Known Constraint
//!
//! The search bracket is fixed to (0.01%, 200%). A market price implying a
//! volatility outside it comes back with [`SolveStatus::IterationLimit`] and an
//! estimate pinned to the nearest bracket edge.

// ================================================================================================
// MODULES
// ================================================================================================

pub mod error;
pub mod models;
pub mod smile;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use error::{PricingError, PricingResult};

// Pricer
pub use models::bs::{bs_call_price, norm_cdf, BlackScholes, MarketInputs};
pub use models::traits::CallPricer;

// Solver
pub use models::implied_vol::{
    implied_volatility, implied_volatility_with, IvSolution, SolveStatus, SolverConfig,
    VOL_LOWER_BOUND, VOL_UPPER_BOUND,
};

// Smile driver
pub use smile::{
    config::{SmileConfig, StrikeGrid, MAX_STRIKES},
    pipeline::{build_smile, build_smile_with},
    report::{write_csv, write_marked_table, write_table},
    synthetic::{QuadraticSmile, SmileModel},
    types::{SkippedStrike, SmilePoint, SmileReport},
};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured solver settings.
///
/// - [`standard()`]: tolerance 1e-5, 100 iterations
/// - [`fast()`]: tolerance 1e-4, 50 iterations
/// - [`precise()`]: tolerance 1e-10, 200 iterations
pub mod default_configs {
    use crate::models::implied_vol::SolverConfig;

    /// Price tolerance of 1e-5 with a budget of 100 iterations.
    ///
    /// Each bisection step halves the 2.0-wide bracket, so 100 steps are far
    /// more than f64 can resolve; in practice the tolerance ends the search.
    ///
    /// # Example
    ///
    /// ```rust
    /// use smile_lib::default_configs;
    ///
    /// let config = default_configs::standard();
    /// assert_eq!(config.max_iterations, 100);
    /// ```
    pub fn standard() -> SolverConfig {
        SolverConfig::standard()
    }

    /// Looser settings for quick scans over many strikes.
    pub fn fast() -> SolverConfig {
        SolverConfig::fast()
    }

    /// Tight settings for validation and round-trip checks.
    pub fn precise() -> SolverConfig {
        SolverConfig::precise()
    }
}
