//! # Distributions
//!
//! $$
//! X\sim\mathcal N(\mu,\sigma^2)
//! $$
//!
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod normal;

pub use normal::standard_normal;
pub use normal::BoxMullerNormal;

/// Seeded generator when `seed` is set, OS-seeded otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
  match seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_os_rng(),
  }
}
