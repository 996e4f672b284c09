//! # Error
//!
//! $$
//! \text{request}\to\text{Ok}(\text{result})\ \vert\ \text{Err}(\text{fatal})
//! $$
//!
//! Only conditions that abort a computation live here. Transient data trouble
//! is recovered inside the provider and never becomes an error value.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FrontierError>;

/// Fatal failures of a portfolio-statistics request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrontierError {
  /// One or more tickers do not resolve at the quote source.
  #[error("invalid symbol(s): {}", .tickers.join(", "))]
  InvalidSymbol { tickers: Vec<String> },

  #[error("no assets supplied")]
  EmptyUniverse,

  #[error("invalid weights: {0}")]
  InvalidWeights(String),

  #[error("dimension mismatch: expected {expected}, got {actual}")]
  DimensionMismatch { expected: usize, actual: usize },

  #[error("invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("insufficient data: need at least {required} observations, got {actual}")]
  InsufficientData { required: usize, actual: usize },
}
