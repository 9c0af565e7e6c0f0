//! The single deterministic random stream threaded through every strategy.

use rand::{Rng, SeedableRng};

pub use rand_pcg::Pcg64;

pub fn seeded(seed: u64) -> Pcg64 {
  Pcg64::seed_from_u64(seed)
}

/// Seed derived from the wall clock, for runs that ask for `seed = 0`.
pub fn time_seed() -> u64 {
  std::time::SystemTime::now()
    .duration_since(std::time::UNIX_EPOCH)
    .map(|t| t.as_secs())
    .unwrap_or(1)
    .max(1)
}

pub trait RandomInt {
  /// Uniform integer in `[low, high)`. Panics if the range is empty.
  fn rand_int(&mut self, low: i32, high: i32) -> i32;
}

impl<R: Rng + ?Sized> RandomInt for R {
  fn rand_int(&mut self, low: i32, high: i32) -> i32 {
    assert!(low < high, "empty random range [{low}, {high})");
    self.gen_range(low..high)
  }
}
