//! # Traits
//!
//! $$
//! \text{Trait contracts: }\mathcal{Q}:(\text{ticker},\text{range})\to\text{outcome}
//! $$
//!
use async_trait::async_trait;

use crate::data::range::TimeRange;
use crate::data::source::FetchOutcome;

/// Quote-fetching collaborator.
///
/// Implementations own the transport (HTTP, proxy, cache) and must classify
/// every failure: [`FetchOutcome::SymbolNotFound`] when the ticker does not
/// resolve, [`FetchOutcome::TransientFailure`] for anything else. Fetches for
/// different tickers run concurrently, so implementations must be `Send + Sync`
/// and must not rely on call order.
#[async_trait]
pub trait QuoteSource: Send + Sync {
  async fn fetch(&self, ticker: &str, range: TimeRange) -> FetchOutcome;
}

#[async_trait]
impl<T: QuoteSource + ?Sized> QuoteSource for Box<T> {
  async fn fetch(&self, ticker: &str, range: TimeRange) -> FetchOutcome {
    (**self).fetch(ticker, range).await
  }
}

#[async_trait]
impl<T: QuoteSource + ?Sized> QuoteSource for std::sync::Arc<T> {
  async fn fetch(&self, ticker: &str, range: TimeRange) -> FetchOutcome {
    (**self).fetch(ticker, range).await
  }
}
