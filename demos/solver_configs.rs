use smile_lib::{bs_call_price, default_configs, implied_volatility, PricingError, SolverConfig};

fn main() -> Result<(), PricingError> {
    println!("Smile-lib Solver Configuration Examples\n");

    // Reference at-the-money option: S=100, K=100, T=0.5y, r=1%, σ=20%
    let (spot, strike, maturity, rate, sigma) = (100.0, 100.0, 0.5, 0.01, 0.2);
    let market_price = bs_call_price(spot, strike, maturity, rate, sigma)?;
    println!("Reference call price at σ={:.2}: {:.6}\n", sigma, market_price);

    let presets: [(&str, SolverConfig); 3] = [
        ("standard", default_configs::standard()),
        ("fast", default_configs::fast()),
        ("precise", default_configs::precise()),
    ];

    println!(
        "{:<10} {:>10} {:>8} {:>14} {:>6} {:>12}",
        "Preset", "Tolerance", "MaxIter", "Implied vol", "Iter", "Price error"
    );
    println!("{}", "-".repeat(66));

    for (name, config) in presets {
        let solution = implied_volatility(market_price, spot, strike, maturity, rate, &config)?;
        println!(
            "{:<10} {:>10.1e} {:>8} {:>14.10} {:>6} {:>12.2e}",
            name,
            config.tolerance,
            config.max_iterations,
            solution.volatility,
            solution.iterations,
            solution.price_error
        );
    }

    // A price above the spot cannot be reached by any volatility in the bracket
    println!("\nUnreachable market price (120 > spot):");
    let standard = default_configs::standard();
    let stuck = implied_volatility(120.0, spot, strike, maturity, rate, &standard)?;
    println!(
        "  status={:?} estimate={:.6} at_bracket_edge={}",
        stuck.status,
        stuck.volatility,
        stuck.at_bracket_edge()
    );

    Ok(())
}
