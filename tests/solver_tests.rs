
use smile_lib::{
    bs_call_price, implied_volatility, implied_volatility_with, BlackScholes, CallPricer,
    MarketInputs, SolveStatus, SolverConfig, VOL_LOWER_BOUND, VOL_UPPER_BOUND,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use test_utils::{atm_inputs, brent_implied_vol, random_scenario, seeded_rng};

/// Reference scenario: a price of 5.876 at the money solves back to ~20%.
#[test]
fn test_reference_atm_solve() {
    let solution =
        implied_volatility(5.876, 100.0, 100.0, 0.5, 0.01, &SolverConfig::default()).unwrap();

    assert_eq!(solution.status, SolveStatus::Converged);
    assert!(
        (solution.volatility - 0.20).abs() < 1e-3,
        "expected ~0.20, got {}",
        solution.volatility
    );
    assert!(solution.volatility >= solution.bracket.0 && solution.volatility <= solution.bracket.1);
}

/// Pricing then solving recovers the volatility for random inputs.
#[test]
fn test_round_trip_recovers_volatility() {
    let mut rng = seeded_rng();
    let config = SolverConfig::default();
    let mut checked = 0;

    for _ in 0..1000 {
        let scenario = random_scenario(&mut rng);
        // With a price tolerance of 1e-5 the volatility is only pinned down
        // to ~1e-5 / vega.
        if scenario.vega() < 0.1 {
            continue;
        }
        let inputs = scenario.inputs;
        let solution = implied_volatility(
            scenario.price(),
            inputs.spot,
            inputs.strike,
            inputs.maturity,
            inputs.rate,
            &config,
        )
        .unwrap();

        assert!(solution.is_converged(), "no convergence for {:?}", scenario);
        assert!(
            (solution.volatility - scenario.sigma).abs() < 1e-4,
            "recovered {} instead of {} for {:?}",
            solution.volatility,
            scenario.sigma,
            scenario
        );
        checked += 1;
    }

    assert!(checked > 400, "only {} scenarios had usable vega", checked);
}

/// Bisection agrees with Brent's method on the same pricing function.
#[test]
fn test_agrees_with_brent() {
    let mut rng = seeded_rng();
    let config = SolverConfig::precise();

    for _ in 0..200 {
        let scenario = random_scenario(&mut rng);
        if scenario.vega() < 0.1 {
            continue;
        }
        let price = scenario.price();
        let Some(reference) = brent_implied_vol(price, &scenario.inputs) else {
            continue;
        };
        let solution = implied_volatility_with(&BlackScholes, price, &scenario.inputs, &config)
            .unwrap();

        assert!(
            (solution.volatility - reference).abs() < 1e-6,
            "bisection {} vs brent {} for {:?}",
            solution.volatility,
            reference,
            scenario
        );
    }
}

struct TallyPricer {
    calls: AtomicUsize,
}

impl CallPricer for TallyPricer {
    fn name(&self) -> &str {
        "tally"
    }

    fn call_price(&self, inputs: &MarketInputs, sigma: f64) -> f64 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        BlackScholes.call_price(inputs, sigma)
    }
}

/// The pricer is never evaluated more than `max_iterations` times.
#[test]
fn test_iteration_budget() {
    let inputs = atm_inputs();
    for max_iterations in [1, 5, 20, 100] {
        for market_price in [-1.0, 0.2, 5.876, 99.0, 250.0] {
            let pricer = TallyPricer {
                calls: AtomicUsize::new(0),
            };
            let config = SolverConfig {
                tolerance: 1e-12,
                max_iterations,
            };
            let solution =
                implied_volatility_with(&pricer, market_price, &inputs, &config).unwrap();

            assert!(pricer.calls.load(Ordering::Relaxed) <= max_iterations);
            assert_eq!(pricer.calls.load(Ordering::Relaxed), solution.iterations);
        }
    }
}

/// A price above the spot pushes the estimate to the 200% ceiling.
#[test]
fn test_price_above_spot_pins_upper_edge() {
    let solution =
        implied_volatility(120.0, 100.0, 100.0, 0.5, 0.01, &SolverConfig::default()).unwrap();

    assert_eq!(solution.status, SolveStatus::IterationLimit);
    assert!((solution.volatility - VOL_UPPER_BOUND).abs() < 1e-6);
    assert!(solution.at_bracket_edge());
    assert_eq!(solution.iterations, 100);
}

/// A price below intrinsic value pushes the estimate to the 0.01% floor.
#[test]
fn test_price_below_intrinsic_pins_lower_edge() {
    let inputs = MarketInputs::new(100.0, 90.0, 0.5, 0.01).unwrap();
    let below = inputs.intrinsic_value() - 1.0;
    let solution =
        implied_volatility_with(&BlackScholes, below, &inputs, &SolverConfig::default()).unwrap();

    assert_eq!(solution.status, SolveStatus::IterationLimit);
    assert!((solution.volatility - VOL_LOWER_BOUND).abs() < 1e-6);
    assert!(solution.at_bracket_edge());
}

/// Out-of-bracket smile point: K=140 priced at σ=2.55 solves to the 2.0 ceiling.
#[test]
fn test_synthetic_vol_above_bracket() {
    let true_vol = 0.15 + 0.0015 * (140.0_f64 - 100.0).powi(2);
    assert!((true_vol - 2.55).abs() < 1e-12);

    let price = bs_call_price(100.0, 140.0, 0.5, 0.01, true_vol).unwrap();
    assert!(price < 100.0 && price > 50.0, "price {}", price);

    let solution =
        implied_volatility(price, 100.0, 140.0, 0.5, 0.01, &SolverConfig::default()).unwrap();

    assert!(!solution.is_converged());
    assert!(
        (solution.volatility - 2.0).abs() < 1e-3,
        "expected the 2.0 ceiling, got {}",
        solution.volatility
    );
    assert!(solution.at_bracket_edge());
}

/// Unreachable prices are flagged at either edge even with a small budget.
#[test]
fn test_bracket_edge_with_small_budget() {
    let config = SolverConfig {
        tolerance: 1e-5,
        max_iterations: 10,
    };

    let above = implied_volatility(120.0, 100.0, 100.0, 0.5, 0.01, &config).unwrap();
    assert_eq!(above.status, SolveStatus::IterationLimit);
    assert_eq!(above.bracket.1, VOL_UPPER_BOUND);
    assert!(above.at_bracket_edge(), "estimate {}", above.volatility);

    let below = implied_volatility(0.1, 100.0, 90.0, 0.5, 0.01, &config).unwrap();
    assert_eq!(below.bracket.0, VOL_LOWER_BOUND);
    assert!(below.at_bracket_edge(), "estimate {}", below.volatility);

    // An in-range price that runs out of budget has moved both edges
    let tight = SolverConfig {
        tolerance: 1e-12,
        max_iterations: 10,
    };
    let interior = implied_volatility(5.876, 100.0, 100.0, 0.5, 0.01, &tight).unwrap();
    assert!(!interior.is_converged());
    assert!(!interior.at_bracket_edge());
}

/// A single-step budget returns the first midpoint of the bracket.
#[test]
fn test_single_iteration_returns_bracket_half() {
    let config = SolverConfig {
        tolerance: 1e-12,
        max_iterations: 1,
    };
    let solution = implied_volatility(5.876, 100.0, 100.0, 0.5, 0.01, &config).unwrap();
    let first_mid = 0.5 * (VOL_LOWER_BOUND + VOL_UPPER_BOUND);

    // ATM price at σ≈1 is far above 5.876, so the upper edge drops to the midpoint.
    assert_eq!(solution.bracket, (VOL_LOWER_BOUND, first_mid));
    assert!((solution.volatility - 0.5 * (VOL_LOWER_BOUND + first_mid)).abs() < 1e-15);
    assert!((solution.bracket_width() - (first_mid - VOL_LOWER_BOUND)).abs() < 1e-15);
}

/// Independent solves can run concurrently without coordination.
#[test]
fn test_concurrent_solves() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let sigma = 0.1 + 0.05 * i as f64;
                let price = bs_call_price(100.0, 105.0, 1.0, 0.02, sigma).unwrap();
                let solution =
                    implied_volatility(price, 100.0, 105.0, 1.0, 0.02, &SolverConfig::precise())
                        .unwrap();
                (sigma, solution.volatility)
            })
        })
        .collect();

    for handle in handles {
        let (expected, recovered) = handle.join().unwrap();
        assert!((expected - recovered).abs() < 1e-8);
    }
}
