//! 2-D gradient noise, used as a smooth preference or color field.

use {
  euclid::default::Vector2D as V2,
  rand::{seq::SliceRandom, Rng},
  std::f64::consts::TAU
};

#[derive(Clone)]
pub struct PerlinNoise {
  gradients: [V2<f64>; 256],
  permute: [u8; 256],
  octaves: u32,
  grid_size: f64
}

impl PerlinNoise {
  /// Draws the gradient table and the permutation from `rng`.
  pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
    let mut gradients = [V2::zero(); 256];
    for gradient in gradients.iter_mut() {
      let theta = rng.gen_range(0.0..TAU);
      *gradient = V2::new(theta.cos(), theta.sin());
    }
    let mut permute = [0u8; 256];
    permute.iter_mut()
      .enumerate()
      .for_each(|(i, p)| *p = i as u8);
    permute.shuffle(rng);

    Self { gradients, permute, octaves: 1, grid_size: 1.0 }
  }

  /// Number of layers summed, each at twice the frequency and half the amplitude of the previous.
  pub fn with_octaves(mut self, octaves: u32) -> Self {
    self.octaves = octaves;
    self
  }

  /// Cell size of the coarsest layer, in pixels.
  pub fn with_grid_size(mut self, grid_size: f64) -> Self {
    self.grid_size = grid_size;
    self
  }

  pub fn octaves(&self) -> u32 { self.octaves }
  pub fn grid_size(&self) -> f64 { self.grid_size }

  pub fn sample(&self, x: f64, y: f64) -> f64 {
    let mut p = V2::new(x, y) / self.grid_size;
    let mut amplitude = 1.0;
    let mut output = 0.0;
    for _ in 0..self.octaves {
      output += self.base(p) * amplitude;
      amplitude *= 0.5;
      p = p * 2.0;
    }
    output
  }

  fn base(&self, p: V2<f64>) -> f64 {
    let cell = p.floor();
    let (i, j) = (cell.x as i64, cell.y as i64);
    let t = p - cell;

    let v_dd = self.gradient_at(i, j).dot(t);
    let v_du = self.gradient_at(i, j + 1).dot(t - V2::new(0.0, 1.0));
    let v_ud = self.gradient_at(i + 1, j).dot(t - V2::new(1.0, 0.0));
    let v_uu = self.gradient_at(i + 1, j + 1).dot(t - V2::new(1.0, 1.0));

    let v_d = interpolate(v_dd, v_du, t.y);
    let v_u = interpolate(v_ud, v_uu, t.y);
    interpolate(v_d, v_u, t.x)
  }

  fn gradient_at(&self, i: i64, j: i64) -> V2<f64> {
    let hash = self.permute[i.rem_euclid(256) as usize] as i64;
    let hash = self.permute[(hash + j).rem_euclid(256) as usize];
    self.gradients[hash as usize]
  }
}

/// Quintic fade: zero first and second derivative at both ends.
fn interpolate(v0: f64, v1: f64, t: f64) -> f64 {
  let t = t * t * t * (10.0 + t * (-15.0 + t * 6.0));
  (1.0 - t) * v0 + t * v1
}
