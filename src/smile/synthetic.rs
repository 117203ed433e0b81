use serde::{Deserialize, Serialize};

/// A volatility generator used to manufacture market prices per strike.
pub trait SmileModel: Send + Sync + std::fmt::Debug {
    /// Annualised volatility assigned to `strike` when the underlying trades at `spot`.
    fn volatility(&self, strike: f64, spot: f64) -> f64;
}

/// Quadratic smile centred on the spot:
///
/// ```text
/// σ(K) = base_vol + curvature · (K − S)²
/// ```
///
/// With the defaults (0.15, 0.0015) the smile exceeds the solver's 200%
/// ceiling once `|K − S| > ~35`, which the demo grid deliberately reaches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticSmile {
    /// Volatility at the money
    #[serde(default = "default_base_vol")]
    pub base_vol: f64,
    /// Quadratic growth per squared unit of strike distance
    #[serde(default = "default_curvature")]
    pub curvature: f64,
}

impl Default for QuadraticSmile {
    fn default() -> Self {
        Self {
            base_vol: default_base_vol(),
            curvature: default_curvature(),
        }
    }
}

impl SmileModel for QuadraticSmile {
    fn volatility(&self, strike: f64, spot: f64) -> f64 {
        let distance = strike - spot;
        self.base_vol + self.curvature * distance * distance
    }
}

fn default_base_vol() -> f64 {
    0.15
}

fn default_curvature() -> f64 {
    0.0015
}
