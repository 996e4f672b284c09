//! # Portfolio
//!
//! $$
//! \sigma_p^2 = \mathbf{w}^\top \Sigma \mathbf{w}
//! $$
//!
//! Portfolio evaluation, Monte-Carlo frontier sampling and risk attribution.

pub mod engine;
pub mod evaluator;
pub mod frontier;
pub mod risk;
pub mod types;

pub use engine::PortfolioEngine;
pub use engine::PortfolioEngineConfig;
pub use engine::DEFAULT_BENCHMARK;
pub use evaluator::evaluate;
pub use evaluator::portfolio_variance;
pub use frontier::random_weights;
pub use frontier::upper_hull;
pub use frontier::FrontierSample;
pub use frontier::FrontierSampler;
pub use frontier::DEFAULT_RISK_FREE;
pub use frontier::DEFAULT_TRIALS;
pub use risk::marginal_contributions;
pub use risk::risk_contributions;
pub use types::normalize_weights;
pub use types::AssetPosition;
pub use types::OptimizationResult;
pub use types::PortfolioStats;
pub use types::VAR95_Z;
