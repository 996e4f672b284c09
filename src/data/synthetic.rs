//! # Synthetic Market
//!
//! $$
//! r_{i,t}=\alpha_i+\beta_i M_t+\sigma_i\varepsilon_{i,t},\qquad
//! M_t\sim\mathcal N(0.0005,0.01^2),\ \varepsilon_{i,t}\sim\mathcal N(0,1)
//! $$
//!
//! One-factor return generator used when live data cannot be trusted. The
//! shared factor induces plausible cross-asset correlation; per-ticker
//! parameters come from a stable hash so the same ticker always behaves alike.

use ndarray::Array2;
use rand::Rng;
use rand_distr::Distribution;

use crate::distributions::normal::standard_normal;
use crate::distributions::BoxMullerNormal;

/// Mean of the daily market factor.
pub const MARKET_DRIFT: f64 = 0.0005;
/// Daily volatility of the market factor.
pub const MARKET_VOL: f64 = 0.01;

const BETA_MIN: f64 = 0.5;
const BETA_SPAN: f64 = 1.0;
const VOL_MIN: f64 = 0.01;
const VOL_SPAN: f64 = 0.02;
const ALPHA_MIN: f64 = -0.0002;
const ALPHA_SPAN: f64 = 0.0006;

/// 64-bit FNV-1a over the upper-cased ticker.
fn ticker_hash(ticker: &str) -> u64 {
  const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
  const PRIME: u64 = 0x0000_0100_0000_01b3;

  ticker
    .trim()
    .bytes()
    .map(|b| b.to_ascii_uppercase())
    .fold(OFFSET, |h, b| (h ^ b as u64).wrapping_mul(PRIME))
}

/// Maps 16 bits of `h` starting at `shift` onto `[0, 1]`.
fn unit(h: u64, shift: u32) -> f64 {
  ((h >> shift) & 0xffff) as f64 / 0xffff as f64
}

/// Per-ticker synthetic parameters (daily scale).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickerProfile {
  pub alpha: f64,
  /// Sensitivity to the market factor, in `[0.5, 1.5]`.
  pub beta: f64,
  /// Idiosyncratic daily volatility, in `[0.01, 0.03]`.
  pub volatility: f64,
}

impl TickerProfile {
  pub fn from_ticker(ticker: &str) -> Self {
    let h = ticker_hash(ticker);
    Self {
      alpha: ALPHA_MIN + ALPHA_SPAN * unit(h, 32),
      beta: BETA_MIN + BETA_SPAN * unit(h, 0),
      volatility: VOL_MIN + VOL_SPAN * unit(h, 16),
    }
  }
}

/// Shared market-factor path plus the generator built on it.
#[derive(Clone, Debug)]
pub struct SyntheticMarket {
  factor: Vec<f64>,
}

impl SyntheticMarket {
  /// Draws a market factor path of `periods` steps.
  pub fn new<R: Rng + ?Sized>(periods: usize, rng: &mut R) -> Self {
    let dist = BoxMullerNormal::new(MARKET_DRIFT, MARKET_VOL);
    let factor = (0..periods).map(|_| dist.sample(rng)).collect();
    Self { factor }
  }

  pub fn periods(&self) -> usize {
    self.factor.len()
  }

  pub fn factor(&self) -> &[f64] {
    &self.factor
  }

  /// One asset's return path under `profile`.
  pub fn returns_for<R: Rng + ?Sized>(&self, profile: &TickerProfile, rng: &mut R) -> Vec<f64> {
    self
      .factor
      .iter()
      .map(|m| profile.alpha + profile.beta * m + profile.volatility * standard_normal(rng))
      .collect()
  }

  /// Return matrix (profiles × periods).
  pub fn returns<R: Rng + ?Sized>(&self, profiles: &[TickerProfile], rng: &mut R) -> Array2<f64> {
    let mut out = Array2::<f64>::zeros((profiles.len(), self.periods()));
    for (i, profile) in profiles.iter().enumerate() {
      for (t, r) in self.returns_for(profile, rng).into_iter().enumerate() {
        out[[i, t]] = r;
      }
    }
    out
  }
}

/// Synthetic return matrix for `tickers` over `periods` steps.
pub fn synthetic_returns<R: Rng + ?Sized>(
  tickers: &[String],
  periods: usize,
  rng: &mut R,
) -> Array2<f64> {
  let profiles: Vec<TickerProfile> =
    tickers.iter().map(|t| TickerProfile::from_ticker(t)).collect();
  SyntheticMarket::new(periods, rng).returns(&profiles, rng)
}

#[cfg(test)]
mod tests {
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  use super::*;

  fn corr(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let ma = a.iter().sum::<f64>() / n;
    let mb = b.iter().sum::<f64>() / n;
    let cov: f64 = a.iter().zip(b).map(|(x, y)| (x - ma) * (y - mb)).sum();
    let va: f64 = a.iter().map(|x| (x - ma).powi(2)).sum();
    let vb: f64 = b.iter().map(|y| (y - mb).powi(2)).sum();
    cov / (va * vb).sqrt()
  }

  #[test]
  fn profile_is_stable_and_in_bounds() {
    for ticker in ["AAPL", "MSFT", "GLD", "BRK.B", "^GSPC", ""] {
      let p = TickerProfile::from_ticker(ticker);
      assert_eq!(p, TickerProfile::from_ticker(ticker));
      assert!((0.5..=1.5).contains(&p.beta), "{ticker}: beta {}", p.beta);
      assert!((0.01..=0.03).contains(&p.volatility), "{ticker}: vol {}", p.volatility);
      assert!((-0.0002..=0.0004).contains(&p.alpha), "{ticker}: alpha {}", p.alpha);
    }
  }

  #[test]
  fn profile_ignores_case() {
    assert_eq!(TickerProfile::from_ticker("aapl"), TickerProfile::from_ticker("AAPL"));
    assert_ne!(TickerProfile::from_ticker("AAPL"), TickerProfile::from_ticker("MSFT"));
  }

  #[test]
  fn matrix_has_requested_shape() {
    let mut rng = StdRng::seed_from_u64(1);
    let tickers = vec!["AAA".to_string(), "BBB".to_string(), "CCC".to_string()];
    let r = synthetic_returns(&tickers, 251, &mut rng);
    assert_eq!(r.dim(), (3, 251));
    assert!(r.iter().all(|x| x.is_finite()));
  }

  #[test]
  fn shared_factor_induces_positive_correlation() {
    let mut rng = StdRng::seed_from_u64(2024);
    let market = SyntheticMarket::new(1259, &mut rng);
    let profile = TickerProfile {
      alpha: 0.0,
      beta: 1.5,
      volatility: 0.01,
    };
    let a = market.returns_for(&profile, &mut rng);
    let b = market.returns_for(&profile, &mut rng);
    assert!(corr(&a, &b) > 0.4);
  }

  #[test]
  fn seeded_generation_is_reproducible() {
    let tickers = vec!["SPY".to_string(), "TLT".to_string()];
    let a = synthetic_returns(&tickers, 100, &mut StdRng::seed_from_u64(9));
    let b = synthetic_returns(&tickers, 100, &mut StdRng::seed_from_u64(9));
    assert_eq!(a, b);
  }
}
