//! # Frontier Sampler
//!
//! $$
//! \mathbf w=\frac{\mathbf u}{\mathbf 1^\top\mathbf u},\ u_i\sim\mathcal U(0,1],\qquad
//! \mathbf w_{\min}=\arg\min_k\sigma_k,\quad \mathbf w_{\text{tan}}=\arg\max_k S_k
//! $$
//!
//! Monte-Carlo approximation of the long-only, fully invested efficient
//! frontier. Trials run in parallel chunks, each with its own generator, and
//! the two extremes are combined by an associative reduction.

use std::cmp::Ordering;

use ndarray::Array1;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::debug;

use super::evaluator::stats_for;
use super::types::PortfolioStats;
use crate::distributions::seeded_rng;
use crate::error::FrontierError;
use crate::error::Result;
use crate::stats::AssetStatistics;

pub const DEFAULT_TRIALS: usize = 15_000;
pub const DEFAULT_RISK_FREE: f64 = 0.02;

/// Trials drawn from one generator.
const CHUNK: usize = 512;

/// Random point on the probability simplex.
pub fn random_weights<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<f64> {
  let raw: Vec<f64> = (0..n).map(|_| 1.0 - rng.random::<f64>()).collect();
  let total: f64 = raw.iter().sum();
  raw.into_iter().map(|x| x / total).collect()
}

/// Indices of the best samples seen so far.
///
/// `merge` keeps the lower index on ties, so the outcome does not depend on
/// how a parallel reduction groups the trials.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extremes {
  min_risk: Option<(usize, f64)>,
  max_sharpe: Option<(usize, f64)>,
}

impl Extremes {
  pub fn push(self, index: usize, stats: &PortfolioStats) -> Self {
    self.merge(Extremes {
      min_risk: Some((index, stats.annualized_risk)),
      max_sharpe: Some((index, stats.sharpe_ratio)),
    })
  }

  pub fn merge(self, other: Self) -> Self {
    Self {
      min_risk: pick(self.min_risk, other.min_risk, Ordering::Less),
      max_sharpe: pick(self.max_sharpe, other.max_sharpe, Ordering::Greater),
    }
  }

  pub fn min_risk_index(&self) -> Option<usize> {
    self.min_risk.map(|(i, _)| i)
  }

  pub fn max_sharpe_index(&self) -> Option<usize> {
    self.max_sharpe.map(|(i, _)| i)
  }
}

fn pick(
  a: Option<(usize, f64)>,
  b: Option<(usize, f64)>,
  better: Ordering,
) -> Option<(usize, f64)> {
  match (a, b) {
    (Some(x), Some(y)) => {
      let ord = x.1.total_cmp(&y.1);
      if ord == better || (ord == Ordering::Equal && x.0 <= y.0) {
        Some(x)
      } else {
        Some(y)
      }
    }
    (x, None) => x,
    (None, y) => y,
  }
}

/// Sampled cloud plus its two distinguished portfolios.
#[derive(Clone, Debug)]
pub struct FrontierSample {
  pub cloud: Vec<PortfolioStats>,
  pub min_variance: PortfolioStats,
  pub max_sharpe: PortfolioStats,
}

impl FrontierSample {
  pub fn efficient_frontier(&self) -> Vec<PortfolioStats> {
    upper_hull(&self.cloud)
  }
}

/// Samples sorted by risk, keeping each one whose return beats every
/// lower-risk sample.
pub fn upper_hull(cloud: &[PortfolioStats]) -> Vec<PortfolioStats> {
  let mut sorted: Vec<&PortfolioStats> = cloud.iter().collect();
  sorted.sort_by(|a, b| a.annualized_risk.total_cmp(&b.annualized_risk));

  let mut best = f64::NEG_INFINITY;
  let mut hull = Vec::new();
  for p in sorted {
    if p.annualized_return > best {
      best = p.annualized_return;
      hull.push(p.clone());
    }
  }
  hull
}

/// Monte-Carlo frontier sampler.
#[derive(Clone, Debug)]
pub struct FrontierSampler {
  trials: usize,
  risk_free: f64,
  seed: Option<u64>,
}

impl Default for FrontierSampler {
  fn default() -> Self {
    Self::new(DEFAULT_TRIALS, DEFAULT_RISK_FREE)
  }
}

impl FrontierSampler {
  pub fn new(trials: usize, risk_free: f64) -> Self {
    Self {
      trials,
      risk_free,
      seed: None,
    }
  }

  pub fn with_seed(mut self, seed: Option<u64>) -> Self {
    self.seed = seed;
    self
  }

  pub fn trials(&self) -> usize {
    self.trials
  }

  pub fn sample(&self, stats: &AssetStatistics) -> Result<FrontierSample> {
    self.sample_with(&stats.mean_annual, &stats.cov_annual)
  }

  pub fn sample_with(
    &self,
    mean_annual: &Array1<f64>,
    cov_annual: &Array2<f64>,
  ) -> Result<FrontierSample> {
    let n = mean_annual.len();
    if n == 0 {
      return Err(FrontierError::EmptyUniverse);
    }
    if cov_annual.dim() != (n, n) {
      return Err(FrontierError::DimensionMismatch {
        expected: n,
        actual: cov_annual.nrows(),
      });
    }
    if self.trials == 0 {
      return Err(FrontierError::InvalidConfig("trials must be positive".to_string()));
    }

    let base = match self.seed {
      Some(seed) => seed,
      None => seeded_rng(None).random::<u64>(),
    };
    let trials = self.trials;
    let risk_free = self.risk_free;

    let chunks: Vec<Vec<PortfolioStats>> = (0..trials.div_ceil(CHUNK))
      .into_par_iter()
      .map(|c| {
        let mut rng = StdRng::seed_from_u64(base.wrapping_add(c as u64));
        let len = CHUNK.min(trials - c * CHUNK);
        (0..len)
          .map(|_| stats_for(random_weights(n, &mut rng), mean_annual, cov_annual, risk_free))
          .collect::<Vec<_>>()
      })
      .collect();
    let cloud = chunks.concat();

    let extremes = cloud
      .par_iter()
      .enumerate()
      .fold(Extremes::default, |acc, (i, p)| acc.push(i, p))
      .reduce(Extremes::default, Extremes::merge);

    let (Some(min_idx), Some(max_idx)) =
      (extremes.min_risk_index(), extremes.max_sharpe_index())
    else {
      return Err(FrontierError::InvalidConfig("no trials were evaluated".to_string()));
    };

    debug!(
      trials,
      min_risk = cloud[min_idx].annualized_risk,
      max_sharpe = cloud[max_idx].sharpe_ratio,
      "frontier sampled"
    );

    Ok(FrontierSample {
      min_variance: cloud[min_idx].clone(),
      max_sharpe: cloud[max_idx].clone(),
      cloud,
    })
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;

  use super::*;

  fn three_assets() -> (Array1<f64>, Array2<f64>) {
    let mu = array![0.08, 0.10, 0.12];
    let cov = array![[0.04, 0.01, 0.0], [0.01, 0.09, 0.02], [0.0, 0.02, 0.16]];
    (mu, cov)
  }

  #[test]
  fn sampled_weights_are_long_only_and_fully_invested() {
    let (mu, cov) = three_assets();
    let sample = FrontierSampler::new(3_000, 0.02)
      .with_seed(Some(1))
      .sample_with(&mu, &cov)
      .unwrap();

    assert_eq!(sample.cloud.len(), 3_000);
    for p in &sample.cloud {
      assert_abs_diff_eq!(p.weights.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
      assert!(p.weights.iter().all(|w| *w >= 0.0));
      assert_eq!(p.var95, Some(1.645 * p.annualized_risk));
    }
  }

  #[test]
  fn tracked_extremes_bound_the_cloud() {
    let (mu, cov) = three_assets();
    let sample = FrontierSampler::new(5_000, 0.02)
      .with_seed(Some(2))
      .sample_with(&mu, &cov)
      .unwrap();

    for p in &sample.cloud {
      assert!(sample.min_variance.annualized_risk <= p.annualized_risk);
      assert!(sample.max_sharpe.sharpe_ratio >= p.sharpe_ratio);
    }
    assert!(sample.cloud.contains(&sample.min_variance));
    assert!(sample.cloud.contains(&sample.max_sharpe));
  }

  #[test]
  fn seeded_runs_are_reproducible() {
    let (mu, cov) = three_assets();
    let sampler = FrontierSampler::new(2_000, 0.02).with_seed(Some(99));
    let a = sampler.sample_with(&mu, &cov).unwrap();
    let b = sampler.sample_with(&mu, &cov).unwrap();

    assert_eq!(a.cloud, b.cloud);
    assert_eq!(a.min_variance, b.min_variance);
    assert_eq!(a.max_sharpe, b.max_sharpe);
  }

  #[test]
  fn ties_keep_the_first_sample() {
    let p = PortfolioStats {
      annualized_risk: 0.1,
      sharpe_ratio: 0.5,
      ..Default::default()
    };
    let left = Extremes::default().push(3, &p);
    let right = Extremes::default().push(7, &p);

    assert_eq!(left.merge(right).min_risk_index(), Some(3));
    assert_eq!(right.merge(left).min_risk_index(), Some(3));
    assert_eq!(right.merge(left).max_sharpe_index(), Some(3));
  }

  #[test]
  fn single_asset_has_a_single_portfolio() {
    let sample = FrontierSampler::new(10, 0.0).sample_with(&array![0.1], &array![[0.04]]).unwrap();
    assert!(sample.cloud.iter().all(|p| p.weights == vec![1.0]));
    assert_abs_diff_eq!(sample.min_variance.annualized_risk, 0.2, epsilon = 1e-12);
  }

  #[test]
  fn upper_hull_is_monotone() {
    let (mu, cov) = three_assets();
    let sample = FrontierSampler::new(4_000, 0.02)
      .with_seed(Some(3))
      .sample_with(&mu, &cov)
      .unwrap();
    let hull = sample.efficient_frontier();

    assert!(!hull.is_empty());
    for pair in hull.windows(2) {
      assert!(pair[0].annualized_risk <= pair[1].annualized_risk);
      assert!(pair[0].annualized_return < pair[1].annualized_return);
    }
    assert_eq!(hull[0], {
      let mut sorted = sample.cloud.clone();
      sorted.sort_by(|a, b| a.annualized_risk.total_cmp(&b.annualized_risk));
      sorted[0].clone()
    });
  }

  #[test]
  fn invalid_inputs_are_rejected() {
    let (mu, cov) = three_assets();
    assert!(matches!(
      FrontierSampler::new(0, 0.02).sample_with(&mu, &cov),
      Err(FrontierError::InvalidConfig(_))
    ));
    assert!(matches!(
      FrontierSampler::default().sample_with(&Array1::zeros(0), &Array2::zeros((0, 0))),
      Err(FrontierError::EmptyUniverse)
    ));
    assert!(matches!(
      FrontierSampler::default().sample_with(&mu, &array![[0.04]]),
      Err(FrontierError::DimensionMismatch { .. })
    ));
  }
}
