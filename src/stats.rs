//! # Stats
//!
//! $$
//! \mu_i = 252\,\bar r_i,\qquad
//! \Sigma_{ij} = \frac{252}{n-1}\sum_t (r_{i,t}-\bar r_i)(r_{j,t}-\bar r_j),\qquad
//! \rho_{ij} = \frac{\Sigma_{ij}}{\sigma_i\sigma_j}
//! $$
//!
//! Annualized mean, covariance and correlation of an aligned return matrix
//! (assets × periods).

use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView2;
use ndarray::Axis;
use ndarray_stats::CorrelationExt;
use serde::Serialize;

use crate::data::range::TRADING_DAYS_PER_YEAR;
use crate::error::FrontierError;
use crate::error::Result;

/// Volatilities at or below this are treated as zero.
pub const ZERO_VOL: f64 = 1e-15;

/// Annualized moments of a set of assets, indexed in asset order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssetStatistics {
  pub mean_annual: Array1<f64>,
  pub cov_annual: Array2<f64>,
  pub corr: Array2<f64>,
}

impl AssetStatistics {
  pub fn n_assets(&self) -> usize {
    self.mean_annual.len()
  }

  /// Annualized volatility per asset.
  pub fn volatilities(&self) -> Array1<f64> {
    self.cov_annual.diag().mapv(|v| v.max(0.0).sqrt())
  }
}

pub fn annualize_mean(daily_mean: f64, periods_per_year: usize) -> f64 {
  daily_mean * periods_per_year as f64
}

pub fn deannualize_mean(annual_mean: f64, periods_per_year: usize) -> f64 {
  annual_mean / periods_per_year as f64
}

/// Statistics with the standard 252-day annualization.
pub fn compute_statistics(returns: ArrayView2<f64>) -> Result<AssetStatistics> {
  compute_statistics_with(returns, TRADING_DAYS_PER_YEAR)
}

pub fn compute_statistics_with(
  returns: ArrayView2<f64>,
  periods_per_year: usize,
) -> Result<AssetStatistics> {
  let (n_assets, n_obs) = returns.dim();
  if n_assets == 0 {
    return Err(FrontierError::EmptyUniverse);
  }
  if n_obs < 2 {
    return Err(FrontierError::InsufficientData {
      required: 2,
      actual: n_obs,
    });
  }

  let factor = periods_per_year as f64;
  let mean_daily = returns
    .mean_axis(Axis(1))
    .ok_or(FrontierError::InsufficientData {
      required: 2,
      actual: n_obs,
    })?;
  let cov_daily = returns.cov(1.0).map_err(|_| FrontierError::InsufficientData {
    required: 2,
    actual: n_obs,
  })?;

  let mut cov_annual = cov_daily * factor;
  symmetrize(&mut cov_annual);
  let corr = corr_from_cov(&cov_annual);

  Ok(AssetStatistics {
    mean_annual: mean_daily * factor,
    cov_annual,
    corr,
  })
}

fn symmetrize(m: &mut Array2<f64>) {
  let n = m.nrows();
  for i in 0..n {
    for j in (i + 1)..n {
      let v = 0.5 * (m[[i, j]] + m[[j, i]]);
      m[[i, j]] = v;
      m[[j, i]] = v;
    }
  }
}

/// Correlation from covariance; rows and columns of zero-volatility assets are 0.
pub fn corr_from_cov(cov: &Array2<f64>) -> Array2<f64> {
  let n = cov.nrows();
  let sd: Vec<f64> = cov.diag().iter().map(|v| v.max(0.0).sqrt()).collect();
  let mut corr = Array2::<f64>::zeros((n, n));

  for i in 0..n {
    if sd[i] <= ZERO_VOL {
      continue;
    }
    corr[[i, i]] = 1.0;
    for j in (i + 1)..n {
      if sd[j] <= ZERO_VOL {
        continue;
      }
      let r = (cov[[i, j]] / (sd[i] * sd[j])).clamp(-1.0, 1.0);
      corr[[i, j]] = r;
      corr[[j, i]] = r;
    }
  }

  corr
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use approx::assert_relative_eq;
  use ndarray::array;

  use super::*;

  #[test]
  fn two_asset_reference_values() {
    let returns = array![[0.01, -0.02, 0.015, 0.005], [0.02, -0.01, 0.01, 0.0]];
    let stats = compute_statistics(returns.view()).unwrap();

    assert_relative_eq!(stats.mean_annual[0] / 252.0, 0.0025, epsilon = 1e-15);
    assert_relative_eq!(stats.mean_annual[1] / 252.0, 0.005, epsilon = 1e-15);
    assert_relative_eq!(stats.cov_annual[[0, 1]] / 252.0, 0.0005 / 3.0, epsilon = 1e-15);
    assert_abs_diff_eq!(stats.cov_annual[[0, 1]], 0.042, epsilon = 1e-12);
    assert_eq!(stats.cov_annual[[0, 1]], stats.cov_annual[[1, 0]]);
  }

  #[test]
  fn annualization_round_trips() {
    for daily in [0.0025, -0.0013, 1e-9, 0.0] {
      let annual = annualize_mean(daily, TRADING_DAYS_PER_YEAR);
      assert_relative_eq!(deannualize_mean(annual, TRADING_DAYS_PER_YEAR), daily, epsilon = 1e-18);
    }
  }

  #[test]
  fn correlation_is_unit_diagonal_symmetric_and_bounded() {
    let returns = array![
      [0.010, -0.020, 0.015, 0.005, 0.002, -0.004],
      [0.020, -0.010, 0.010, 0.000, 0.003, -0.001],
      [-0.010, 0.020, -0.015, -0.005, -0.002, 0.004],
    ];
    let stats = compute_statistics(returns.view()).unwrap();
    let c = &stats.corr;

    for i in 0..3 {
      assert_eq!(c[[i, i]], 1.0);
      for j in 0..3 {
        assert_eq!(c[[i, j]], c[[j, i]]);
        assert!((-1.0..=1.0).contains(&c[[i, j]]));
      }
    }
    // third asset mirrors the first
    assert_abs_diff_eq!(c[[0, 2]], -1.0, epsilon = 1e-12);
  }

  #[test]
  fn zero_volatility_asset_has_zero_correlation() {
    let returns = array![[0.01, -0.02, 0.015, 0.005], [0.0, 0.0, 0.0, 0.0]];
    let stats = compute_statistics(returns.view()).unwrap();

    assert_eq!(stats.corr[[1, 1]], 0.0);
    assert_eq!(stats.corr[[0, 1]], 0.0);
    assert_eq!(stats.corr[[1, 0]], 0.0);
    assert_eq!(stats.corr[[0, 0]], 1.0);
    assert!(stats.corr.iter().all(|x| x.is_finite()));
    assert_eq!(stats.volatilities()[1], 0.0);
  }

  #[test]
  fn custom_annualization_factor() {
    let returns = array![[0.01, 0.03], [0.02, 0.0]];
    let stats = compute_statistics_with(returns.view(), 12).unwrap();
    assert_relative_eq!(stats.mean_annual[0], 0.24, epsilon = 1e-12);
  }

  #[test]
  fn single_observation_is_rejected() {
    let returns = array![[0.01], [0.02]];
    assert_eq!(
      compute_statistics(returns.view()).unwrap_err(),
      FrontierError::InsufficientData {
        required: 2,
        actual: 1
      }
    );
  }
}
