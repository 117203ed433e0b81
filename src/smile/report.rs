use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::smile::types::SmileReport;

/// Header line of the tab-separated smile table.
pub const TABLE_HEADER: &str = "Strike\tMarketPrice\tImpliedVol";

/// Marker appended by [`write_marked_table`] to rows that hit the iteration limit.
pub const ITERATION_LIMIT_MARK: &str = "*";

/// Writes the smile as a tab-separated table.
///
/// Strike and market price use 2 decimals, implied volatility 4 decimals;
/// the price column is followed by two tabs so the volatility column lines up
/// under its header. The layout carries no convergence information: use
/// [`write_marked_table`] or [`write_csv`] when it matters.
pub fn write_table<W: Write>(report: &SmileReport, writer: W) -> Result<()> {
    write_rows(report, writer, false)
}

/// Same layout as [`write_table`], with [`ITERATION_LIMIT_MARK`] in a trailing
/// tab-separated column on every row whose solve did not converge.
pub fn write_marked_table<W: Write>(report: &SmileReport, writer: W) -> Result<()> {
    write_rows(report, writer, true)
}

fn write_rows<W: Write>(report: &SmileReport, mut writer: W, mark: bool) -> Result<()> {
    writeln!(writer, "{}", TABLE_HEADER)?;
    for point in &report.points {
        write!(
            writer,
            "{:.2}\t{:.2}\t\t{:.4}",
            point.strike, point.market_price, point.implied_vol
        )?;
        if mark && !point.converged {
            write!(writer, "\t{}", ITERATION_LIMIT_MARK)?;
        }
        writeln!(writer)?;
    }
    writer.flush().context("Failed to flush smile table")?;
    Ok(())
}

#[derive(Serialize)]
struct CsvRow {
    strike: f64,
    true_vol: f64,
    market_price: f64,
    implied_vol: f64,
    converged: bool,
    iterations: usize,
}

/// Writes every solved point as CSV, including the generating volatility and
/// the convergence flag.
pub fn write_csv<W: Write>(report: &SmileReport, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for point in &report.points {
        wtr.serialize(CsvRow {
            strike: point.strike,
            true_vol: point.true_vol,
            market_price: point.market_price,
            implied_vol: point.implied_vol,
            converged: point.converged,
            iterations: point.iterations,
        })
        .with_context(|| format!("Failed to write CSV row for strike {}", point.strike))?;
    }
    wtr.flush().context("Failed to flush smile CSV")?;
    Ok(())
}
