pub mod bs;
pub mod implied_vol;

/// Common traits used by the pricing and solving layers
pub mod traits {
    use crate::models::bs::MarketInputs;

    /// A call pricing function the implied-volatility solver can invert.
    ///
    /// Bisection is only valid when `call_price` is strictly increasing in
    /// `sigma` for fixed market inputs; any replacement pricer must keep that
    /// property. Inputs reaching `call_price` have already been validated.
    pub trait CallPricer: Send + Sync {
        /// Short identifier used in log output
        fn name(&self) -> &str;

        /// Theoretical call value at volatility `sigma > 0`
        fn call_price(&self, inputs: &MarketInputs, sigma: f64) -> f64;
    }
}
