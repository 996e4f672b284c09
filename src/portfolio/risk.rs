//! # Risk Decomposition
//!
//! $$
//! \sigma_p=\sum_i w_i\frac{\partial\sigma_p}{\partial w_i}
//! =\sum_i \frac{w_i(\Sigma\mathbf w)_i}{\sigma_p}
//! $$
//!
//! Euler attribution of portfolio volatility to holdings, reported as
//! fractions of the total.

use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView1;

use crate::error::FrontierError;
use crate::error::Result;
use crate::stats::ZERO_VOL;

/// `(Σw)_i`, the covariance of each asset with the portfolio.
pub fn marginal_contributions(weights: &[f64], cov: &Array2<f64>) -> Array1<f64> {
  cov.dot(&ArrayView1::from(weights))
}

/// Share of `total_risk` carried by each asset; all zero when the total is zero.
pub fn risk_contributions(weights: &[f64], cov: &Array2<f64>, total_risk: f64) -> Result<Vec<f64>> {
  let n = weights.len();
  if cov.dim() != (n, n) {
    return Err(FrontierError::DimensionMismatch {
      expected: n,
      actual: cov.nrows(),
    });
  }
  if total_risk <= ZERO_VOL {
    return Ok(vec![0.0; n]);
  }

  let marginal = marginal_contributions(weights, cov);
  Ok(
    weights
      .iter()
      .zip(marginal.iter())
      .map(|(w, m)| {
        let contribution = w * m / total_risk;
        contribution / total_risk
      })
      .collect(),
  )
}
