//! # Data
//!
//! $$
//! p_{i,t}\ \to\ r_{i,t}=\frac{p_{i,t}-p_{i,t-1}}{p_{i,t-1}}
//! $$
//!
//! Quote acquisition, calendar alignment and synthetic fallback.

pub mod align;
pub mod provider;
pub mod range;
pub mod source;
pub mod synthetic;
#[cfg(feature = "yahoo")]
pub mod yahoo;

pub use provider::BenchmarkReturns;
pub use provider::FallbackReason;
pub use provider::ReturnsBundle;
pub use provider::TimeSeriesProvider;
pub use range::TimeRange;
pub use source::FetchOutcome;
pub use source::PriceSeries;
pub use source::QuoteFn;
pub use synthetic::SyntheticMarket;
pub use synthetic::TickerProfile;
#[cfg(feature = "yahoo")]
pub use yahoo::YahooQuotes;
