use crate::error::{PricingError, PricingResult};
use serde::{Deserialize, Serialize};

/// Lower edge of the volatility search bracket (0.01%).
///
/// The bracket is fixed: market prices implying a volatility outside
/// `[VOL_LOWER_BOUND, VOL_UPPER_BOUND]` cannot be recovered and come back as an
/// [`SolveStatus::IterationLimit`] result pinned to the nearest edge.
pub const VOL_LOWER_BOUND: f64 = 1e-4;

/// Upper edge of the volatility search bracket (200%).
pub const VOL_UPPER_BOUND: f64 = 2.0;

/// Stopping rules for the implied-volatility search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Absolute price difference below which a candidate volatility is accepted
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Maximum number of pricer evaluations
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl SolverConfig {
    /// Price tolerance 1e-5, at most 100 iterations.
    pub fn standard() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }

    /// Looser tolerance and a shorter budget for quick scans.
    pub fn fast() -> Self {
        Self {
            tolerance: 1e-4,
            max_iterations: 50,
        }
    }

    /// Tight tolerance for validation work. 200 halvings exhaust f64 resolution
    /// of the bracket long before the budget runs out.
    pub fn precise() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 200,
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(PricingError::InvalidConfig(format!(
                "tolerance must be > 0 and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(PricingError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_tolerance() -> f64 {
    1e-5
}

fn default_max_iterations() -> usize {
    100
}

/// How the search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// The repriced value matched the market price within tolerance.
    Converged,
    /// The iteration budget ran out; the estimate is the final bracket midpoint.
    IterationLimit,
}

/// Result of an implied-volatility search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IvSolution {
    /// Volatility estimate
    pub volatility: f64,
    /// Convergence outcome
    pub status: SolveStatus,
    /// Number of pricer evaluations performed
    pub iterations: usize,
    /// Final search bracket `(low, high)`
    pub bracket: (f64, f64),
    /// `|model price − market price|` at the last evaluated candidate
    pub price_error: f64,
}

impl IvSolution {
    pub fn is_converged(&self) -> bool {
        self.status == SolveStatus::Converged
    }

    /// Width of the final bracket, the implicit confidence interval.
    pub fn bracket_width(&self) -> f64 {
        self.bracket.1 - self.bracket.0
    }

    /// True when the search never converged and its final bracket still has
    /// one of the fixed bounds as an edge: every step moved the same side, as
    /// happens when the market price lies outside the range reachable within
    /// `[VOL_LOWER_BOUND, VOL_UPPER_BOUND]`. Holds for any iteration budget.
    pub fn at_bracket_edge(&self) -> bool {
        !self.is_converged()
            && (self.bracket.0 == VOL_LOWER_BOUND || self.bracket.1 == VOL_UPPER_BOUND)
    }
}
