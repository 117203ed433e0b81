use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::implied_vol::SolverConfig;
use crate::smile::synthetic::QuadraticSmile;

/// Largest number of strikes a grid may produce.
pub const MAX_STRIKES: usize = 100_000;

/// Evenly spaced strikes from `start` to `end` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeGrid {
    #[serde(default = "default_strike_start")]
    pub start: f64,
    #[serde(default = "default_strike_end")]
    pub end: f64,
    #[serde(default = "default_strike_step")]
    pub step: f64,
}

impl Default for StrikeGrid {
    fn default() -> Self {
        Self {
            start: default_strike_start(),
            end: default_strike_end(),
            step: default_strike_step(),
        }
    }
}

impl StrikeGrid {
    pub fn validate(&self) -> Result<()> {
        if !(self.start.is_finite() && self.end.is_finite()) {
            return Err(anyhow!(
                "Strike grid bounds must be finite, got [{}, {}]",
                self.start,
                self.end
            ));
        }
        if !(self.step > 0.0 && self.step.is_finite()) {
            return Err(anyhow!(
                "Strike grid step must be > 0 and finite, got {}",
                self.step
            ));
        }
        if self.end < self.start {
            return Err(anyhow!(
                "Strike grid end ({}) is below start ({})",
                self.end,
                self.start
            ));
        }
        let intervals = (self.end - self.start) / self.step;
        if !intervals.is_finite() || intervals >= MAX_STRIKES as f64 {
            return Err(anyhow!(
                "Strike grid [{}, {}] step {} exceeds {} strikes",
                self.start,
                self.end,
                self.step,
                MAX_STRIKES
            ));
        }
        Ok(())
    }

    /// Number of grid points, or `None` for a grid that fails [`validate`](Self::validate).
    pub fn point_count(&self) -> Option<usize> {
        self.validate().ok()?;
        let intervals = ((self.end - self.start) / self.step + 1e-9).floor() as usize;
        intervals.checked_add(1)
    }

    /// Grid points computed as `start + i·step`, so long grids do not drift.
    /// Invalid grids yield no strikes.
    pub fn strikes(&self) -> Vec<f64> {
        let Some(count) = self.point_count() else {
            return Vec::new();
        };
        (0..count)
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }
}

/// Settings for a synthetic smile run.
///
/// Every field has a default matching the reference demo (S = 100, T = 0.5y,
/// r = 1%, strikes 60..=140 step 2), so an empty TOML document is valid.
///
/// ```rust
/// use smile_lib::SmileConfig;
///
/// let config = SmileConfig::from_toml_str(r#"
///     spot = 250.0
///
///     [strikes]
///     start = 200.0
///     end = 300.0
///     step = 5.0
///
///     [solver]
///     tolerance = 1e-8
/// "#)?;
/// assert_eq!(config.strikes.strikes().len(), 21);
/// assert_eq!(config.solver.max_iterations, 100);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmileConfig {
    #[serde(default = "default_spot")]
    pub spot: f64,

    /// Time to maturity in years
    #[serde(default = "default_maturity")]
    pub maturity: f64,

    #[serde(default = "default_rate")]
    pub rate: f64,

    #[serde(default)]
    pub strikes: StrikeGrid,

    #[serde(default)]
    pub synthetic: QuadraticSmile,

    #[serde(default)]
    pub solver: SolverConfig,
}

impl Default for SmileConfig {
    fn default() -> Self {
        Self {
            spot: default_spot(),
            maturity: default_maturity(),
            rate: default_rate(),
            strikes: StrikeGrid::default(),
            synthetic: QuadraticSmile::default(),
            solver: SolverConfig::default(),
        }
    }
}

impl SmileConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SmileConfig =
            toml::from_str(source).context("Failed to parse smile configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read smile configuration {}", path.display()))?;
        Self::from_toml_str(&source)
    }

    /// Checks the run-wide settings. Individual strikes are not checked here;
    /// a bad strike is skipped at solve time.
    pub fn validate(&self) -> Result<()> {
        if !(self.spot > 0.0 && self.spot.is_finite()) {
            return Err(anyhow!("Spot must be > 0 and finite, got {}", self.spot));
        }
        if !(self.maturity > 0.0 && self.maturity.is_finite()) {
            return Err(anyhow!(
                "Maturity must be > 0 and finite, got {}",
                self.maturity
            ));
        }
        if !self.rate.is_finite() {
            return Err(anyhow!("Rate must be finite, got {}", self.rate));
        }
        self.strikes.validate()?;
        self.solver.validate()?;
        Ok(())
    }
}

fn default_spot() -> f64 {
    100.0
}

fn default_maturity() -> f64 {
    0.5
}

fn default_rate() -> f64 {
    0.01
}

fn default_strike_start() -> f64 {
    60.0
}

fn default_strike_end() -> f64 {
    140.0
}

fn default_strike_step() -> f64 {
    2.0
}
