// demos/volatility_smile.rs

//! Synthetic volatility smile
//!
//! Generates call prices from a quadratic smile, solves each back to an
//! implied volatility and prints the tab-separated table to stdout.
//!
//! Usage:
//!     cargo run --example volatility_smile [-- <config.toml>] [--mark] [--csv <out.csv>]
//!
//! `--mark` appends `*` to rows whose solve hit the iteration limit.
//!
//! Set `RUST_LOG=smile_lib=debug` to see per-strike solver diagnostics.

use anyhow::{Context, Result};
use smile_lib::{build_smile, write_csv, write_marked_table, write_table, SmileConfig};
use std::env;
use std::fs::File;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = match args.first().filter(|a| !a.starts_with("--")) {
        Some(path) => SmileConfig::from_file(path)?,
        None => SmileConfig::default(),
    };

    let report = build_smile(&config)?;
    if args.iter().any(|a| a == "--mark") {
        write_marked_table(&report, io::stdout().lock())?;
    } else {
        write_table(&report, io::stdout().lock())?;
    }

    if let Some(pos) = args.iter().position(|a| a == "--csv") {
        let path = args.get(pos + 1).context("--csv needs an output path")?;
        let file = File::create(path).with_context(|| format!("Failed to create {}", path))?;
        write_csv(&report, file)?;
        eprintln!("CSV written to {}", path);
    }

    let stuck = report.points.len() - report.converged_count();
    if stuck > 0 || !report.skipped.is_empty() {
        eprintln!(
            "{} strikes did not converge (volatility outside the solver bracket), {} skipped",
            stuck,
            report.skipped.len()
        );
    }

    Ok(())
}
