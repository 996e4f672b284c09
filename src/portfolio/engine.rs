//! # Portfolio Engine
//!
//! $$
//! (\text{positions},\text{range})\to R\to(\mu,\Sigma,\rho)\to
//! \{\text{frontier},\ \text{current},\ \text{risk split}\}
//! $$
//!
//! High-level entry point: fetch, align, estimate, sample and decompose.

use ndarray::Axis;
use serde::Deserialize;
use serde::Serialize;
use tracing::info;

use super::evaluator::evaluate;
use super::frontier::FrontierSampler;
use super::frontier::DEFAULT_RISK_FREE;
use super::frontier::DEFAULT_TRIALS;
use super::risk::risk_contributions;
use super::types::normalize_weights;
use super::types::AssetPosition;
use super::types::OptimizationResult;
use super::types::PortfolioStats;
use crate::data::provider::MIN_COMMON_DATES;
use crate::data::range::TRADING_DAYS_PER_YEAR;
use crate::data::BenchmarkReturns;
use crate::data::ReturnsBundle;
use crate::data::TimeRange;
use crate::data::TimeSeriesProvider;
use crate::error::FrontierError;
use crate::error::Result;
use crate::stats::compute_statistics_with;
use crate::traits::QuoteSource;

/// Broad-market index used as the default benchmark.
pub const DEFAULT_BENCHMARK: &str = "SPY";

/// Runtime configuration for [`PortfolioEngine`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioEngineConfig {
  /// Monte-Carlo trials drawn by the frontier sampler.
  pub trials: usize,
  /// Risk-free rate used in Sharpe computations.
  pub risk_free: f64,
  /// Annualization factor for means and covariances.
  pub trading_days_per_year: usize,
  /// Fewer common trading dates than this triggers synthetic fallback.
  pub min_common_dates: usize,
  /// Benchmark ticker; `None` skips the benchmark fetch.
  pub benchmark: Option<String>,
  /// Seed for synthetic data and sampling; `None` draws from the OS.
  pub seed: Option<u64>,
}

impl Default for PortfolioEngineConfig {
  fn default() -> Self {
    Self {
      trials: DEFAULT_TRIALS,
      risk_free: DEFAULT_RISK_FREE,
      trading_days_per_year: TRADING_DAYS_PER_YEAR,
      min_common_dates: MIN_COMMON_DATES,
      benchmark: Some(DEFAULT_BENCHMARK.to_string()),
      seed: None,
    }
  }
}

impl PortfolioEngineConfig {
  pub fn validate(&self) -> Result<()> {
    if self.trials == 0 {
      return Err(FrontierError::InvalidConfig("trials must be positive".to_string()));
    }
    if !self.risk_free.is_finite() {
      return Err(FrontierError::InvalidConfig("risk_free must be finite".to_string()));
    }
    if self.trading_days_per_year == 0 {
      return Err(FrontierError::InvalidConfig(
        "trading_days_per_year must be positive".to_string(),
      ));
    }
    if self.min_common_dates < 3 {
      return Err(FrontierError::InvalidConfig(
        "min_common_dates must be at least 3".to_string(),
      ));
    }
    Ok(())
  }
}

/// Single entry-point engine for portfolio statistics requests.
#[derive(Clone, Debug)]
pub struct PortfolioEngine<S> {
  config: PortfolioEngineConfig,
  provider: TimeSeriesProvider<S>,
  sampler: FrontierSampler,
}

impl<S: QuoteSource> PortfolioEngine<S> {
  /// Construct a new engine with explicit configuration.
  pub fn new(source: S, config: PortfolioEngineConfig) -> Result<Self> {
    config.validate()?;

    let provider = TimeSeriesProvider::new(source)
      .with_min_common_dates(config.min_common_dates)
      .with_seed(config.seed);
    // sampling draws from a stream independent of the synthetic generator
    let sampler = FrontierSampler::new(config.trials, config.risk_free)
      .with_seed(config.seed.map(|s| s.rotate_left(32) ^ 0x9e37_79b9_7f4a_7c15));

    Ok(Self {
      config,
      provider,
      sampler,
    })
  }

  /// Borrow engine configuration.
  pub fn config(&self) -> &PortfolioEngineConfig {
    &self.config
  }

  pub fn provider(&self) -> &TimeSeriesProvider<S> {
    &self.provider
  }

  /// Full analysis of `positions` over `range`.
  pub async fn optimize(
    &self,
    positions: &[AssetPosition],
    range: TimeRange,
  ) -> Result<OptimizationResult> {
    let weights = normalize_weights(positions)?;
    let tickers: Vec<String> = positions.iter().map(|p| p.ticker.trim().to_string()).collect();

    let (bundle, benchmark) = self
      .provider
      .obtain_with_benchmark(&tickers, range, self.config.benchmark.as_deref())
      .await?;

    self.analyze(bundle, &weights, benchmark)
  }

  /// Statistics, frontier and risk split for already-obtained returns.
  pub fn analyze(
    &self,
    bundle: ReturnsBundle,
    weights: &[f64],
    benchmark: Option<BenchmarkReturns>,
  ) -> Result<OptimizationResult> {
    let n = bundle.tickers.len();
    if weights.len() != n {
      return Err(FrontierError::DimensionMismatch {
        expected: n,
        actual: weights.len(),
      });
    }

    let rf = self.config.risk_free;
    let stats = compute_statistics_with(bundle.returns.view(), self.config.trading_days_per_year)?;
    let frontier = self.sampler.sample(&stats)?;
    let current = evaluate(weights, &stats.mean_annual, &stats.cov_annual, rf)?;
    let contributions =
      risk_contributions(&current.weights, &stats.cov_annual, current.annualized_risk)?;

    let (benchmark_ticker, benchmark_stats) = match benchmark {
      Some(b) => match self.benchmark_stats(&b) {
        Ok(stats) => (Some(b.ticker), Some(stats)),
        Err(err) => {
          info!(ticker = %b.ticker, %err, "benchmark statistics unavailable");
          (None, None)
        }
      },
      None => (None, None),
    };

    info!(
      assets = n,
      simulation = bundle.is_simulation,
      current_risk = current.annualized_risk,
      min_risk = frontier.min_variance.annualized_risk,
      max_sharpe = frontier.max_sharpe.sharpe_ratio,
      "portfolio analysis complete"
    );

    let display_names = (!bundle.display_names.is_empty()).then_some(bundle.display_names);

    Ok(OptimizationResult {
      assets: bundle.tickers,
      statistics: stats,
      frontier: frontier.cloud,
      current,
      min_variance: frontier.min_variance,
      max_sharpe: frontier.max_sharpe,
      risk_contributions: contributions,
      is_simulation: bundle.is_simulation,
      fallback: bundle.fallback,
      benchmark: benchmark_stats,
      benchmark_ticker,
      display_names,
      risk_free: rf,
    })
  }

  fn benchmark_stats(&self, benchmark: &BenchmarkReturns) -> Result<PortfolioStats> {
    let returns = benchmark.returns.view().insert_axis(Axis(0));
    let stats = compute_statistics_with(returns, self.config.trading_days_per_year)?;
    evaluate(&[1.0], &stats.mean_annual, &stats.cov_annual, self.config.risk_free)
  }
}
