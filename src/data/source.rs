//! # Quote Source Boundary
//!
//! $$
//! \text{fetch}:(\text{ticker},\text{range})\mapsto
//! \text{Ok}(d,p)\ \vert\ \text{SymbolNotFound}\ \vert\ \text{TransientFailure}
//! $$
//!
//! Raw price series and the tagged outcome a quote source reports. No transport
//! logic lives here; see [`crate::traits::QuoteSource`] for the contract.

use std::future::Future;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::range::TimeRange;
use crate::traits::QuoteSource;

/// Dated closing prices for one ticker, as returned by a quote source.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceSeries {
  /// Trading dates, one per price. Order is not assumed.
  pub dates: Vec<NaiveDate>,
  /// Closing prices aligned with `dates`.
  pub prices: Vec<f64>,
  /// Human-readable instrument name, when the source knows it.
  pub display_name: Option<String>,
}

impl PriceSeries {
  pub fn new(dates: Vec<NaiveDate>, prices: Vec<f64>) -> Self {
    Self {
      dates,
      prices,
      display_name: None,
    }
  }

  pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
    self.display_name = Some(name.into());
    self
  }

  pub fn len(&self) -> usize {
    self.dates.len().min(self.prices.len())
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Classified result of a single fetch.
///
/// The two failure kinds are handled differently by the provider: an unknown
/// symbol aborts the request, a transient failure triggers synthetic fallback.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
  Ok(PriceSeries),
  SymbolNotFound(String),
  TransientFailure(String),
}

impl FetchOutcome {
  pub fn is_ok(&self) -> bool {
    matches!(self, FetchOutcome::Ok(_))
  }

  pub fn into_series(self) -> Option<PriceSeries> {
    match self {
      FetchOutcome::Ok(series) => Some(series),
      _ => None,
    }
  }
}

/// Adapter turning an async closure into a [`QuoteSource`].
///
/// ```ignore
/// let source = QuoteFn::new(|ticker, range| async move { my_fetch(&ticker, range).await });
/// ```
pub struct QuoteFn<F> {
  f: F,
}

impl<F> QuoteFn<F> {
  pub fn new(f: F) -> Self {
    Self { f }
  }
}

#[async_trait]
impl<F, Fut> QuoteSource for QuoteFn<F>
where
  F: Fn(String, TimeRange) -> Fut + Send + Sync,
  Fut: Future<Output = FetchOutcome> + Send,
{
  async fn fetch(&self, ticker: &str, range: TimeRange) -> FetchOutcome {
    (self.f)(ticker.to_string(), range).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
  }

  #[test]
  fn series_len_uses_shorter_side() {
    let s = PriceSeries::new(vec![day(2), day(3), day(4)], vec![1.0, 2.0]);
    assert_eq!(s.len(), 2);
    assert!(!s.is_empty());
    assert!(PriceSeries::default().is_empty());
  }

  #[test]
  fn quote_fn_forwards_ticker_and_range() {
    let source = QuoteFn::new(|ticker: String, range: TimeRange| async move {
      if ticker == "BAD" {
        FetchOutcome::SymbolNotFound(format!("{ticker} not listed"))
      } else {
        FetchOutcome::Ok(
          PriceSeries::new(vec![day(2)], vec![range.trading_days() as f64])
            .with_display_name(ticker),
        )
      }
    });

    let ok = tokio_test::block_on(source.fetch("AAA", TimeRange::TwoYears));
    let series = ok.into_series().unwrap();
    assert_eq!(series.prices, vec![504.0]);
    assert_eq!(series.display_name.as_deref(), Some("AAA"));

    let bad = tokio_test::block_on(source.fetch("BAD", TimeRange::OneYear));
    assert_eq!(bad, FetchOutcome::SymbolNotFound("BAD not listed".to_string()));
  }
}
