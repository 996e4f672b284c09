//! # Normal
//!
//! $$
//! Z=\sqrt{-2\ln U}\,\cos(2\pi V),\qquad U,V\sim\mathcal U(0,1]
//! $$
//!
use std::f64::consts::TAU;

use rand::Rng;
use rand_distr::Distribution;

/// Draws a uniform variate in `(0, 1]`, never zero.
#[inline]
fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
  1.0 - rng.random::<f64>()
}

/// One standard-normal variate via the Box–Muller transform.
///
/// Only the cosine branch is used, so every draw consumes exactly two uniforms.
#[inline]
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
  let u = open_unit(rng);
  let v = open_unit(rng);
  (-2.0 * u.ln()).sqrt() * (TAU * v).cos()
}

/// Gaussian distribution `N(mean, std_dev²)` sampled with Box–Muller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxMullerNormal {
  mean: f64,
  std_dev: f64,
}

impl BoxMullerNormal {
  pub fn new(mean: f64, std_dev: f64) -> Self {
    assert!(
      std_dev.is_finite() && std_dev >= 0.0,
      "std_dev must be finite and non-negative"
    );
    Self { mean, std_dev }
  }

  pub fn standard() -> Self {
    Self::new(0.0, 1.0)
  }

  pub fn mean(&self) -> f64 {
    self.mean
  }

  pub fn std_dev(&self) -> f64 {
    self.std_dev
  }

  pub fn fill_slice<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut [f64]) {
    for x in out.iter_mut() {
      *x = self.mean + self.std_dev * standard_normal(rng);
    }
  }
}

impl Default for BoxMullerNormal {
  fn default() -> Self {
    Self::standard()
  }
}

impl Distribution<f64> for BoxMullerNormal {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
    self.mean + self.std_dev * standard_normal(rng)
  }
}
