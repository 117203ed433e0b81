use anyhow::Result;
use tracing::{info, warn};

use crate::error::PricingResult;
use crate::models::bs::{BlackScholes, MarketInputs};
use crate::models::implied_vol::{implied_volatility_with, SolverConfig};
use crate::models::traits::CallPricer;
use crate::smile::config::SmileConfig;
use crate::smile::synthetic::SmileModel;
use crate::smile::types::{SkippedStrike, SmilePoint, SmileReport};

/// Builds a synthetic smile using the quadratic model from `config.synthetic`.
pub fn build_smile(config: &SmileConfig) -> Result<SmileReport> {
    build_smile_with(config, &config.synthetic)
}

/// Builds a synthetic smile from an arbitrary volatility generator.
///
/// For each strike of the grid the generator's volatility is turned into a
/// market price with the Black-Scholes pricer and then solved back. A strike
/// that fails (invalid strike, non-positive generated volatility) is recorded
/// in [`SmileReport::skipped`] and the run carries on.
///
/// # Errors
///
/// Only run-wide problems fail the call: an invalid spot, maturity, rate,
/// strike grid or solver configuration.
pub fn build_smile_with(config: &SmileConfig, model: &dyn SmileModel) -> Result<SmileReport> {
    config.validate()?;

    let strikes = config.strikes.strikes();
    let mut report = SmileReport {
        spot: config.spot,
        maturity: config.maturity,
        rate: config.rate,
        points: Vec::with_capacity(strikes.len()),
        skipped: Vec::new(),
    };

    for strike in strikes {
        let true_vol = model.volatility(strike, config.spot);
        match solve_strike(config, strike, true_vol, &config.solver) {
            Ok(point) => report.points.push(point),
            Err(e) => {
                warn!(strike, true_vol, error = %e, "Skipping strike");
                report.skipped.push(SkippedStrike {
                    strike,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        points = report.points.len(),
        converged = report.converged_count(),
        skipped = report.skipped.len(),
        "Smile complete"
    );

    Ok(report)
}

fn solve_strike(
    config: &SmileConfig,
    strike: f64,
    true_vol: f64,
    solver: &SolverConfig,
) -> PricingResult<SmilePoint> {
    let inputs = MarketInputs::new(config.spot, strike, config.maturity, config.rate)?;
    let market_price = inputs.call_price(true_vol)?;
    let solution = implied_volatility_with(&BlackScholes, market_price, &inputs, solver)?;

    if !solution.is_converged() {
        warn!(
            strike,
            true_vol,
            implied_vol = solution.volatility,
            at_bracket_edge = solution.at_bracket_edge(),
            pricer = BlackScholes.name(),
            "Implied volatility did not converge"
        );
    }

    Ok(SmilePoint {
        strike,
        true_vol,
        market_price,
        implied_vol: solution.volatility,
        converged: solution.is_converged(),
        iterations: solution.iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smile::config::StrikeGrid;

    #[derive(Debug)]
    struct FlatSmile(f64);

    impl SmileModel for FlatSmile {
        fn volatility(&self, _strike: f64, _spot: f64) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_flat_smile_recovers_constant_vol() {
        let config = SmileConfig {
            strikes: StrikeGrid {
                start: 80.0,
                end: 120.0,
                step: 5.0,
            },
            ..SmileConfig::default()
        };
        let report = build_smile_with(&config, &FlatSmile(0.3)).unwrap();

        assert_eq!(report.points.len(), 9);
        assert!(report.skipped.is_empty());
        for point in &report.points {
            assert!(point.converged, "strike {} did not converge", point.strike);
            assert!(point.vol_error() < 1e-3, "strike {}", point.strike);
        }
    }

    #[test]
    fn test_bad_strikes_are_skipped_not_fatal() {
        let config = SmileConfig {
            strikes: StrikeGrid {
                start: -4.0,
                end: 10.0,
                step: 2.0,
            },
            ..SmileConfig::default()
        };
        let report = build_smile_with(&config, &FlatSmile(0.2)).unwrap();

        // -4, -2 and 0 are outside the pricing domain
        assert_eq!(report.skipped.len(), 3);
        assert_eq!(report.points.len(), 5);
        assert!(report.skipped.iter().all(|s| s.reason.contains("strike")));
    }

    #[test]
    fn test_non_positive_generated_vol_is_skipped() {
        let report = build_smile_with(&SmileConfig::default(), &FlatSmile(-0.1)).unwrap();
        assert!(report.points.is_empty());
        assert_eq!(report.skipped.len(), 41);
    }

    #[test]
    fn test_run_wide_errors_fail() {
        let config = SmileConfig {
            maturity: 0.0,
            ..SmileConfig::default()
        };
        assert!(build_smile(&config).is_err());
    }
}
