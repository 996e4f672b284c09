//! # frontier-rs
//!
//! $$
//! \max_{\mathbf w\in\Delta^{n-1}}\ \frac{\mathbf w^\top\mu-r_f}{\sqrt{\mathbf w^\top\Sigma\mathbf w}}
//! $$
//!
//! Portfolio statistics over historical or synthetic daily returns.
//!
//! ## Modules
//!
//! | Module | Description |
//! |---|---|
//! | [`data`] | Quote fetching, calendar alignment and the synthetic one-factor fallback. |
//! | [`distributions`] | Box–Muller normal sampler and seeded generators. |
//! | [`error`] | Crate error type. |
//! | [`portfolio`] | Evaluation, Monte-Carlo frontier, risk decomposition and the engine facade. |
//! | [`stats`] | Annualized mean vector, covariance and correlation matrices. |
//! | [`traits`] | The [`traits::QuoteSource`] seam for price providers. |
//!
//! ## Features
//!
//! - `yahoo`: Yahoo Finance quote source
//! - `cli`: the `frontier` command-line binary
//!
//! ## Parallelism
//!
//! Frontier trials are evaluated with `rayon` in fixed-size chunks, each drawing
//! from its own generator, so a seeded run gives the same cloud on any thread count.

pub mod data;
pub mod distributions;
pub mod error;
pub mod portfolio;
pub mod stats;
pub mod traits;

pub use data::TimeRange;
pub use data::TimeSeriesProvider;
pub use error::FrontierError;
pub use error::Result;
pub use portfolio::AssetPosition;
pub use portfolio::OptimizationResult;
pub use portfolio::PortfolioEngine;
pub use portfolio::PortfolioEngineConfig;
pub use portfolio::PortfolioStats;
pub use stats::compute_statistics;
pub use stats::AssetStatistics;
pub use traits::QuoteSource;
