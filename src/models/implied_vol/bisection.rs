use tracing::{debug, trace};

use super::types::*;
use crate::error::{PricingError, PricingResult};
use crate::models::bs::{BlackScholes, MarketInputs};
use crate::models::traits::CallPricer;

/// Implied volatility of a European call under Black-Scholes.
///
/// Validates the market inputs and `config`, then bisects the volatility over
/// `[VOL_LOWER_BOUND, VOL_UPPER_BOUND]`.
///
/// # Errors
///
/// * [`PricingError::InvalidInput`] if `S`, `K` or `T` is not strictly positive,
///   or `r` / `market_price` is not finite
/// * [`PricingError::InvalidConfig`] if `config` fails [`SolverConfig::validate`]
///
/// Running out of iterations is not an error; check [`IvSolution::is_converged`].
///
/// # Example
///
/// ```rust
/// use smile_lib::{implied_volatility, SolverConfig};
///
/// let solution = implied_volatility(5.876, 100.0, 100.0, 0.5, 0.01, &SolverConfig::default())?;
/// assert!(solution.is_converged());
/// assert!((solution.volatility - 0.20).abs() < 1e-3);
/// # Ok::<(), smile_lib::PricingError>(())
/// ```
#[allow(non_snake_case)]
pub fn implied_volatility(
    market_price: f64,
    S: f64,
    K: f64,
    T: f64,
    r: f64,
    config: &SolverConfig,
) -> PricingResult<IvSolution> {
    let inputs = MarketInputs::new(S, K, T, r)?;
    implied_volatility_with(&BlackScholes, market_price, &inputs, config)
}

/// Bisection search against an arbitrary [`CallPricer`].
///
/// Each step halves the bracket around `mid`: a model price above the market
/// means the candidate volatility is too high, so the upper edge moves down,
/// otherwise the lower edge moves up. The first candidate priced within
/// `config.tolerance` of the market is returned as converged. The pricer is
/// called at most `config.max_iterations` times.
pub fn implied_volatility_with<P: CallPricer>(
    pricer: &P,
    market_price: f64,
    inputs: &MarketInputs,
    config: &SolverConfig,
) -> PricingResult<IvSolution> {
    inputs.validate()?;
    config.validate()?;
    if !market_price.is_finite() {
        return Err(PricingError::not_finite("market price", market_price));
    }

    let mut low = VOL_LOWER_BOUND;
    let mut high = VOL_UPPER_BOUND;
    let mut price_error = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let mid = 0.5 * (low + high);
        let price = pricer.call_price(inputs, mid);
        price_error = (price - market_price).abs();

        trace!(iteration, sigma = mid, price, market_price, "bisection step");

        if price_error < config.tolerance {
            debug!(
                pricer = pricer.name(),
                iterations = iteration,
                sigma = mid,
                "implied volatility converged"
            );
            return Ok(IvSolution {
                volatility: mid,
                status: SolveStatus::Converged,
                iterations: iteration,
                bracket: (low, high),
                price_error,
            });
        }

        if price > market_price {
            high = mid;
        } else {
            low = mid;
        }
    }

    let estimate = 0.5 * (low + high);
    debug!(
        pricer = pricer.name(),
        iterations = config.max_iterations,
        low,
        high,
        price_error,
        strike = inputs.strike,
        "implied volatility hit the iteration limit"
    );

    Ok(IvSolution {
        volatility: estimate,
        status: SolveStatus::IterationLimit,
        iterations: config.max_iterations,
        bracket: (low, high),
        price_error,
    })
}
