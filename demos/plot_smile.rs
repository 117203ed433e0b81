// Example: plot_smile.rs
// Builds the synthetic smile and writes an SVG comparing the generating
// volatility with the volatility recovered by the solver.
//
// Usage:
//     cargo run --example plot_smile [-- <config.toml>]
//
// The output image is written to vol_smile.svg in the working directory.

use std::env;
use std::error::Error;

use plotters::prelude::*;
use smile_lib::{build_smile, SmileConfig, VOL_UPPER_BOUND};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = match env::args().nth(1) {
        Some(path) => SmileConfig::from_file(path)?,
        None => SmileConfig::default(),
    };
    let report = build_smile(&config)?;

    if report.points.is_empty() {
        return Err("No strikes could be solved".into());
    }

    // Volatilities in percent
    let true_line: Vec<(f64, f64)> = report
        .points
        .iter()
        .map(|p| (p.strike, p.true_vol * 100.0))
        .collect();
    let converged: Vec<(f64, f64)> = report
        .points
        .iter()
        .filter(|p| p.converged)
        .map(|p| (p.strike, p.implied_vol * 100.0))
        .collect();
    let stuck: Vec<(f64, f64)> = report
        .non_converged()
        .map(|p| (p.strike, p.implied_vol * 100.0))
        .collect();

    let strikes: Vec<f64> = report.points.iter().map(|p| p.strike).collect();
    let min_strike = strikes.iter().copied().fold(f64::INFINITY, f64::min);
    let max_strike = strikes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let max_vol = true_line
        .iter()
        .map(|&(_, v)| v)
        .fold(VOL_UPPER_BOUND * 100.0, f64::max);

    // 5% headroom above the highest curve
    let y_max = max_vol * 1.05;

    let root = SVGBackend::new("vol_smile.svg", (1280, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            format!(
                "Synthetic smile vs implied vol | S={:.2} T={:.2}y r={:.2}%",
                report.spot,
                report.maturity,
                report.rate * 100.0
            ),
            ("sans-serif", 30),
        )
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(min_strike..max_strike, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Strike")
        .y_desc("Volatility (%)")
        .draw()?;

    chart
        .draw_series(std::iter::once(PathElement::new(true_line, BLACK)))?
        .label("generating vol")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

    // Solver ceiling
    chart.draw_series(std::iter::once(PathElement::new(
        vec![
            (min_strike, VOL_UPPER_BOUND * 100.0),
            (max_strike, VOL_UPPER_BOUND * 100.0),
        ],
        BLACK.mix(0.3).stroke_width(1),
    )))?;

    chart
        .draw_series(converged.iter().map(|pt| Circle::new(*pt, 4, BLUE.filled())))?
        .label("implied (converged)")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, BLUE.filled()));
    chart
        .draw_series(stuck.iter().map(|pt| Circle::new(*pt, 4, RED.filled())))?
        .label("implied (iteration limit)")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    println!(
        "Chart saved to vol_smile.svg ({} strikes, {} at the bracket ceiling)",
        report.points.len(),
        stuck.len()
    );
    Ok(())
}
