use serde::{Deserialize, Serialize};

/// One solved strike of a synthetic smile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmilePoint {
    /// Strike price
    pub strike: f64,
    /// Volatility the market price was generated with
    pub true_vol: f64,
    /// Synthetic market price of the call
    pub market_price: f64,
    /// Volatility recovered by the solver
    pub implied_vol: f64,
    /// Whether the solver met its tolerance
    pub converged: bool,
    /// Pricer evaluations spent on this strike
    pub iterations: usize,
}

impl SmilePoint {
    /// Absolute difference between the recovered and the generating volatility.
    pub fn vol_error(&self) -> f64 {
        (self.implied_vol - self.true_vol).abs()
    }
}

/// A strike that could not be priced or solved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedStrike {
    pub strike: f64,
    pub reason: String,
}

/// Output of a smile run, ordered by strike
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmileReport {
    pub spot: f64,
    pub maturity: f64,
    pub rate: f64,
    pub points: Vec<SmilePoint>,
    pub skipped: Vec<SkippedStrike>,
}

impl SmileReport {
    pub fn converged_count(&self) -> usize {
        self.points.iter().filter(|p| p.converged).count()
    }

    /// Points where the solver exhausted its budget, typically strikes whose
    /// generating volatility lies outside the solver bracket.
    pub fn non_converged(&self) -> impl Iterator<Item = &SmilePoint> {
        self.points.iter().filter(|p| !p.converged)
    }
}
