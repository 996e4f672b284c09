//! # Time Series Provider
//!
//! $$
//! \{\text{fetch}(s_i)\}_{i=1}^n\ \xrightarrow{\text{classify}}\
//! R\in\mathbb R^{n\times(|\mathcal T|-1)}
//! $$
//!
//! Turns a ticker list into an aligned return matrix. Every fetch is awaited
//! before the batch is classified:
//!
//! - any unknown symbol aborts with [`FrontierError::InvalidSymbol`];
//! - any transient failure replaces the whole set with synthetic series;
//! - a common calendar shorter than the configured minimum does the same.
//!
//! Real and synthetic series are never mixed in one matrix.

use std::collections::BTreeMap;

use futures_util::future::join;
use futures_util::future::join_all;
use ndarray::Array1;
use ndarray::Array2;
use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::align::aligned_returns;
use super::align::common_calendar;
use super::align::has_valid_prices;
use super::align::price_map;
use super::align::simple_returns;
use super::range::TimeRange;
use super::source::FetchOutcome;
use super::source::PriceSeries;
use super::synthetic::synthetic_returns;
use crate::distributions::seeded_rng;
use crate::error::FrontierError;
use crate::error::Result;
use crate::traits::QuoteSource;

/// Minimum number of common trading dates before live data is trusted.
pub const MIN_COMMON_DATES: usize = 50;

/// Why live data was replaced by synthetic series.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackReason {
  /// These tickers failed for network, proxy or decoding reasons.
  TransientFailure { tickers: Vec<String> },
  /// The series overlap on too few dates.
  InsufficientOverlap { common: usize, required: usize },
}

/// Aligned return matrix for a ticker list.
#[derive(Clone, Debug)]
pub struct ReturnsBundle {
  pub tickers: Vec<String>,
  /// Assets × periods, rows in ticker order.
  pub returns: Array2<f64>,
  pub is_simulation: bool,
  pub display_names: BTreeMap<String, String>,
  pub fallback: Option<FallbackReason>,
}

/// Benchmark index returns on the benchmark's own calendar.
#[derive(Clone, Debug)]
pub struct BenchmarkReturns {
  pub ticker: String,
  pub returns: Array1<f64>,
  pub display_name: Option<String>,
}

/// Fetches, classifies and aligns quote series from a [`QuoteSource`].
#[derive(Clone, Debug)]
pub struct TimeSeriesProvider<S> {
  source: S,
  min_common_dates: usize,
  seed: Option<u64>,
}

impl<S: QuoteSource> TimeSeriesProvider<S> {
  pub fn new(source: S) -> Self {
    Self {
      source,
      min_common_dates: MIN_COMMON_DATES,
      seed: None,
    }
  }

  pub fn with_min_common_dates(mut self, min_common_dates: usize) -> Self {
    self.min_common_dates = min_common_dates;
    self
  }

  /// Makes synthetic fallback reproducible.
  pub fn with_seed(mut self, seed: Option<u64>) -> Self {
    self.seed = seed;
    self
  }

  pub fn source(&self) -> &S {
    &self.source
  }

  /// Aligned returns for `tickers` over `range`.
  pub async fn obtain_returns(
    &self,
    tickers: &[String],
    range: TimeRange,
  ) -> Result<ReturnsBundle> {
    if tickers.is_empty() {
      return Err(FrontierError::EmptyUniverse);
    }
    let outcomes = self.fetch_all(tickers, range).await;
    self.classify(tickers, outcomes, range)
  }

  /// Asset returns and the benchmark, fetched together.
  ///
  /// A benchmark failure of any kind only drops the benchmark.
  pub async fn obtain_with_benchmark(
    &self,
    tickers: &[String],
    range: TimeRange,
    benchmark: Option<&str>,
  ) -> Result<(ReturnsBundle, Option<BenchmarkReturns>)> {
    if tickers.is_empty() {
      return Err(FrontierError::EmptyUniverse);
    }

    let bench_fut = async {
      match benchmark {
        Some(ticker) => Some((ticker, self.source.fetch(ticker, range).await)),
        None => None,
      }
    };
    let (outcomes, bench) = join(self.fetch_all(tickers, range), bench_fut).await;

    let bundle = self.classify(tickers, outcomes, range)?;
    let bench = bench.and_then(|(ticker, outcome)| benchmark_returns(ticker, outcome));
    Ok((bundle, bench))
  }

  async fn fetch_all(&self, tickers: &[String], range: TimeRange) -> Vec<FetchOutcome> {
    debug!(count = tickers.len(), %range, "fetching quote series");
    join_all(tickers.iter().map(|t| self.source.fetch(t, range))).await
  }

  fn classify(
    &self,
    tickers: &[String],
    outcomes: Vec<FetchOutcome>,
    range: TimeRange,
  ) -> Result<ReturnsBundle> {
    let mut invalid: Vec<String> = Vec::new();
    let mut transient: Vec<String> = Vec::new();
    let mut series: Vec<PriceSeries> = Vec::with_capacity(tickers.len());
    let mut display_names: BTreeMap<String, String> = BTreeMap::new();

    for (ticker, outcome) in tickers.iter().zip(outcomes) {
      match outcome {
        FetchOutcome::Ok(s) if has_valid_prices(&s) => {
          if let Some(name) = &s.display_name {
            display_names.insert(ticker.clone(), name.clone());
          }
          series.push(s);
        }
        FetchOutcome::Ok(_) => {
          warn!(%ticker, "series contains non-positive or non-finite prices");
          transient.push(ticker.clone());
        }
        FetchOutcome::SymbolNotFound(reason) => {
          debug!(%ticker, %reason, "symbol not found");
          if !invalid.iter().any(|t| t.eq_ignore_ascii_case(ticker)) {
            invalid.push(ticker.clone());
          }
        }
        FetchOutcome::TransientFailure(reason) => {
          debug!(%ticker, %reason, "transient fetch failure");
          transient.push(ticker.clone());
        }
      }
    }

    if !invalid.is_empty() {
      warn!(tickers = ?invalid, "rejecting request with unknown symbols");
      return Err(FrontierError::InvalidSymbol { tickers: invalid });
    }

    if !transient.is_empty() {
      info!(tickers = ?transient, "transient fetch failures, generating synthetic series");
      return Ok(self.synthetic(
        tickers,
        range,
        display_names,
        FallbackReason::TransientFailure { tickers: transient },
      ));
    }

    let maps: Vec<_> = series.iter().map(price_map).collect();
    let calendar = common_calendar(&maps);
    if calendar.len() < self.min_common_dates {
      info!(
        common = calendar.len(),
        required = self.min_common_dates,
        "insufficient common trading dates, generating synthetic series"
      );
      return Ok(self.synthetic(
        tickers,
        range,
        display_names,
        FallbackReason::InsufficientOverlap {
          common: calendar.len(),
          required: self.min_common_dates,
        },
      ));
    }

    debug!(dates = calendar.len(), "aligned live series");
    Ok(ReturnsBundle {
      tickers: tickers.to_vec(),
      returns: aligned_returns(&maps, &calendar),
      is_simulation: false,
      display_names,
      fallback: None,
    })
  }

  fn synthetic(
    &self,
    tickers: &[String],
    range: TimeRange,
    display_names: BTreeMap<String, String>,
    reason: FallbackReason,
  ) -> ReturnsBundle {
    let mut rng = seeded_rng(self.seed);
    let periods = range.trading_days() - 1;
    ReturnsBundle {
      tickers: tickers.to_vec(),
      returns: synthetic_returns(tickers, periods, &mut rng),
      is_simulation: true,
      display_names,
      fallback: Some(reason),
    }
  }
}

fn benchmark_returns(ticker: &str, outcome: FetchOutcome) -> Option<BenchmarkReturns> {
  let series = match outcome {
    FetchOutcome::Ok(s) if has_valid_prices(&s) => s,
    FetchOutcome::Ok(_) => {
      warn!(%ticker, "benchmark series has invalid prices, omitting benchmark");
      return None;
    }
    FetchOutcome::SymbolNotFound(reason) | FetchOutcome::TransientFailure(reason) => {
      warn!(%ticker, %reason, "benchmark unavailable, omitting benchmark");
      return None;
    }
  };

  let prices: Vec<f64> = price_map(&series).into_values().collect();
  let returns = simple_returns(&prices);
  if returns.len() < 2 {
    warn!(%ticker, "benchmark series too short, omitting benchmark");
    return None;
  }

  Some(BenchmarkReturns {
    ticker: ticker.to_string(),
    returns: Array1::from(returns),
    display_name: series.display_name,
  })
}
