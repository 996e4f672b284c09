//! # Portfolio Evaluator
//!
//! $$
//! \mu_p=\mathbf w^\top\mu,\qquad \sigma_p=\sqrt{\mathbf w^\top\Sigma\mathbf w}
//! $$
//!
use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView1;

use super::types::PortfolioStats;
use super::types::VAR95_Z;
use crate::error::FrontierError;
use crate::error::Result;
use crate::stats::ZERO_VOL;

/// `wᵀΣw`, floored at zero against rounding.
pub fn portfolio_variance(weights: ArrayView1<f64>, cov: &Array2<f64>) -> f64 {
  weights.dot(&cov.dot(&weights)).max(0.0)
}

/// Statistics of `weights` against annualized moments.
///
/// Sharpe is 0 when risk is zero, so degenerate portfolios never carry
/// non-finite ratios.
pub fn evaluate(
  weights: &[f64],
  mean_annual: &Array1<f64>,
  cov_annual: &Array2<f64>,
  risk_free: f64,
) -> Result<PortfolioStats> {
  let n = mean_annual.len();
  if weights.len() != n {
    return Err(FrontierError::DimensionMismatch {
      expected: n,
      actual: weights.len(),
    });
  }
  if cov_annual.dim() != (n, n) {
    return Err(FrontierError::DimensionMismatch {
      expected: n,
      actual: cov_annual.nrows(),
    });
  }

  Ok(stats_for(weights.to_vec(), mean_annual, cov_annual, risk_free))
}

/// Unchecked evaluation; dimensions must already agree.
pub(crate) fn stats_for(
  weights: Vec<f64>,
  mean_annual: &Array1<f64>,
  cov_annual: &Array2<f64>,
  risk_free: f64,
) -> PortfolioStats {
  let w = ArrayView1::from(&weights);
  let annualized_return = w.dot(mean_annual);
  let annualized_risk = portfolio_variance(w, cov_annual).sqrt();
  let sharpe_ratio = if annualized_risk > ZERO_VOL {
    (annualized_return - risk_free) / annualized_risk
  } else {
    0.0
  };

  PortfolioStats {
    annualized_return,
    annualized_risk,
    sharpe_ratio,
    var95: Some(VAR95_Z * annualized_risk),
    weights,
  }
}
