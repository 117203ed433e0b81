//! Synthetic volatility smile generation.
//!
//! Manufactures market prices from a parametric smile over a strike grid and
//! solves each one back to an implied volatility, tolerating individual strike
//! failures.

pub mod config;
pub mod pipeline;
pub mod report;
pub mod synthetic;
pub mod types;
