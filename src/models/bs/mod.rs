// Closed-form Black-Scholes pricing for European calls, plus the market-input
// container shared with the implied-volatility solver. Puts, dividends and
// Greeks are outside the scope of smile-lib.

use crate::error::{PricingError, PricingResult};
use crate::models::traits::CallPricer;
use std::f64::consts::SQRT_2;

/// Standard normal cumulative distribution function.
///
/// Evaluated through the complementary error function, `Φ(x) = 0.5·erfc(−x/√2)`,
/// which keeps full precision in the lower tail where `1 + erf(x)` would cancel.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x / SQRT_2)
}

/// Everything the closed-form model needs except the volatility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketInputs {
    /// Spot price of the underlying
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Time to maturity in years
    pub maturity: f64,
    /// Continuously compounded risk-free rate
    pub rate: f64,
}

impl MarketInputs {
    /// Creates a validated input set.
    ///
    /// Spot, strike and maturity must be strictly positive and finite; the rate
    /// may take any sign but must be finite.
    pub fn new(spot: f64, strike: f64, maturity: f64, rate: f64) -> PricingResult<Self> {
        let inputs = Self {
            spot,
            strike,
            maturity,
            rate,
        };
        inputs.validate()?;
        Ok(inputs)
    }

    /// Re-checks the domain constraints, for values built with struct literals.
    pub fn validate(&self) -> PricingResult<()> {
        check_positive("spot", self.spot)?;
        check_positive("strike", self.strike)?;
        check_positive("maturity", self.maturity)?;
        if !self.rate.is_finite() {
            return Err(PricingError::not_finite("rate", self.rate));
        }
        Ok(())
    }

    /// Discount factor `e^(−rT)`.
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// No-arbitrage lower bound of a call: `max(0, S − K·e^(−rT))`.
    pub fn intrinsic_value(&self) -> f64 {
        (self.spot - self.strike * self.discount_factor()).max(0.0)
    }

    /// No-arbitrage upper bound of a call: the spot itself.
    pub fn upper_bound(&self) -> f64 {
        self.spot
    }

    /// Call price at `sigma`, failing fast on a non-positive volatility.
    pub fn call_price(&self, sigma: f64) -> PricingResult<f64> {
        self.validate()?;
        check_positive("volatility", sigma)?;
        Ok(black_scholes_call(self, sigma))
    }
}

fn check_positive(field: &'static str, value: f64) -> PricingResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::not_positive(field, value))
    }
}

/// Price of a European call option under Black-Scholes assumptions.
///
/// Returns [`PricingError::InvalidInput`] when `S`, `K`, `T` or `sigma` is not
/// strictly positive, or when any argument is not finite.
#[allow(non_snake_case)]
pub fn bs_call_price(S: f64, K: f64, T: f64, r: f64, sigma: f64) -> PricingResult<f64> {
    MarketInputs::new(S, K, T, r)?.call_price(sigma)
}

// Unchecked formula; callers guarantee the domain.
pub(crate) fn black_scholes_call(inputs: &MarketInputs, sigma: f64) -> f64 {
    let MarketInputs {
        spot,
        strike,
        maturity,
        rate,
    } = *inputs;
    let vol_sqrt_t = sigma * maturity.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * sigma * sigma) * maturity) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;
    spot * norm_cdf(d1) - strike * inputs.discount_factor() * norm_cdf(d2)
}

/// The closed-form Black-Scholes call pricer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackScholes;

impl CallPricer for BlackScholes {
    fn name(&self) -> &str {
        "black-scholes"
    }

    fn call_price(&self, inputs: &MarketInputs, sigma: f64) -> f64 {
        black_scholes_call(inputs, sigma)
    }
}
