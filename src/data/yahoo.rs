//! # Yahoo Quotes
//!
//! $$
//! \text{Yahoo chart API}\to(d_t,\ \text{adjclose}_t)
//! $$
//!
//! Live [`QuoteSource`] backed by `yahoo_finance_api`. Adjusted closes are used
//! so splits and dividends do not show up as returns.

use anyhow::Context;
use async_trait::async_trait;
use chrono::DateTime;
use time::Duration;
use time::OffsetDateTime;
use tracing::debug;
use yahoo_finance_api as yahoo;

use super::range::TimeRange;
use super::source::FetchOutcome;
use super::source::PriceSeries;
use crate::traits::QuoteSource;

/// Error fragments Yahoo uses for tickers it does not know.
const NOT_FOUND_HINTS: [&str; 5] = [
  "not found",
  "no data found",
  "delisted",
  "no quotes",
  "no result",
];

pub struct YahooQuotes {
  connector: yahoo::YahooConnector,
}

impl YahooQuotes {
  pub fn new() -> anyhow::Result<Self> {
    let connector = yahoo::YahooConnector::new().context("failed to build yahoo connector")?;
    Ok(Self { connector })
  }

  async fn history(&self, ticker: &str, range: TimeRange) -> anyhow::Result<PriceSeries> {
    let end = OffsetDateTime::now_utc();
    let start = end - Duration::days(range.calendar_days());

    let response = self
      .connector
      .get_quote_history(ticker, start, end)
      .await
      .with_context(|| format!("quote history request failed for {ticker}"))?;
    let quotes = response
      .quotes()
      .with_context(|| format!("no quotes for {ticker}"))?;

    let mut dates = Vec::with_capacity(quotes.len());
    let mut prices = Vec::with_capacity(quotes.len());
    for q in quotes {
      let ts = DateTime::from_timestamp(q.timestamp as i64, 0)
        .with_context(|| format!("invalid timestamp {} for {ticker}", q.timestamp))?;
      dates.push(ts.date_naive());
      prices.push(q.adjclose);
    }

    Ok(PriceSeries::new(dates, prices))
  }
}

fn classify(err: &anyhow::Error) -> FetchOutcome {
  let message = format!("{err:#}");
  let lower = message.to_ascii_lowercase();
  if NOT_FOUND_HINTS.iter().any(|h| lower.contains(h)) {
    FetchOutcome::SymbolNotFound(message)
  } else {
    FetchOutcome::TransientFailure(message)
  }
}

#[async_trait]
impl QuoteSource for YahooQuotes {
  async fn fetch(&self, ticker: &str, range: TimeRange) -> FetchOutcome {
    match self.history(ticker, range).await {
      Ok(series) if series.is_empty() => {
        FetchOutcome::SymbolNotFound(format!("no quotes for {ticker}"))
      }
      Ok(series) => {
        debug!(%ticker, points = series.len(), "yahoo history fetched");
        FetchOutcome::Ok(series)
      }
      Err(err) => classify(&err),
    }
  }
}
