//! # Portfolio Types
//!
//! $$
//! S=\frac{\mathbb E[R_p]-r_f}{\sigma_p},\qquad \mathrm{VaR}_{95}=1.645\,\sigma_p
//! $$
//!
//! Inputs, per-portfolio statistics and the aggregate handed to consumers.

use std::collections::BTreeMap;

use ndarray::Array2;
use serde::Deserialize;
use serde::Serialize;

use crate::data::FallbackReason;
use crate::error::FrontierError;
use crate::error::Result;
use crate::stats::AssetStatistics;

/// One-tailed 95% standard-normal quantile used for parametric VaR.
pub const VAR95_Z: f64 = 1.645;

/// A holding as entered by the user: ticker and a raw percentage weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetPosition {
  pub ticker: String,
  pub raw_weight: f64,
}

impl AssetPosition {
  pub fn new(ticker: impl Into<String>, raw_weight: f64) -> Self {
    Self {
      ticker: ticker.into(),
      raw_weight,
    }
  }
}

/// Risk/return profile of one weight vector.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PortfolioStats {
  pub annualized_return: f64,
  /// Annualized standard deviation.
  pub annualized_risk: f64,
  pub sharpe_ratio: f64,
  /// Fractions summing to 1, in asset order.
  pub weights: Vec<f64>,
  pub var95: Option<f64>,
}

/// Normalizes raw percentages into fractions summing to one.
///
/// Weights must be finite and non-negative with a positive total.
pub fn normalize_weights(positions: &[AssetPosition]) -> Result<Vec<f64>> {
  if positions.is_empty() {
    return Err(FrontierError::EmptyUniverse);
  }

  if let Some(p) = positions
    .iter()
    .find(|p| !p.raw_weight.is_finite() || p.raw_weight < 0.0)
  {
    return Err(FrontierError::InvalidWeights(format!(
      "{} has weight {}, expected a finite non-negative value",
      p.ticker, p.raw_weight
    )));
  }

  let total: f64 = positions.iter().map(|p| p.raw_weight).sum();
  if total <= 0.0 {
    return Err(FrontierError::InvalidWeights("weights sum to zero".to_string()));
  }

  Ok(positions.iter().map(|p| p.raw_weight / total).collect())
}

/// Everything computed for one request.
#[derive(Clone, Debug, Serialize)]
pub struct OptimizationResult {
  pub assets: Vec<String>,
  pub statistics: AssetStatistics,
  /// Every sampled portfolio, in draw order.
  pub frontier: Vec<PortfolioStats>,
  pub current: PortfolioStats,
  pub min_variance: PortfolioStats,
  pub max_sharpe: PortfolioStats,
  /// Fraction of current portfolio risk attributed to each asset.
  pub risk_contributions: Vec<f64>,
  pub is_simulation: bool,
  pub fallback: Option<FallbackReason>,
  pub benchmark: Option<PortfolioStats>,
  pub benchmark_ticker: Option<String>,
  pub display_names: Option<BTreeMap<String, String>>,
  pub risk_free: f64,
}

impl OptimizationResult {
  /// Asset correlation matrix, in asset order.
  pub fn correlation(&self) -> &Array2<f64> {
    &self.statistics.corr
  }

  /// Return on the capital market line at `risk`.
  pub fn capital_market_line(&self, risk: f64) -> f64 {
    self.risk_free + self.max_sharpe.sharpe_ratio * risk
  }

  /// Upper boundary of the sampled cloud, ordered by risk.
  pub fn efficient_frontier(&self) -> Vec<PortfolioStats> {
    super::frontier::upper_hull(&self.frontier)
  }

  pub fn display_name<'a>(&'a self, ticker: &'a str) -> &'a str {
    self
      .display_names
      .as_ref()
      .and_then(|m| m.get(ticker))
      .map(String::as_str)
      .unwrap_or(ticker)
  }
}
