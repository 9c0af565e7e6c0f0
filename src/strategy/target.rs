use {
  super::TargetColorGenerator,
  crate::{
    color::Color,
    geometry::Point,
    perlin::PerlinNoise,
    random::{Pcg64, RandomInt}
  }
};

/// Mean of the neighbor colors, or a random color for a cell without filled neighbors.
#[derive(Debug, Default, Copy, Clone)]
pub struct AverageColor;

impl TargetColorGenerator for AverageColor {
  fn target_color(&mut self, rng: &mut Pcg64, neighbors: &[Color], _: Point) -> Color {
    if neighbors.is_empty() {
      return Color::new(
        rng.rand_int(0, 256) as u8,
        rng.rand_int(0, 256) as u8,
        rng.rand_int(0, 256) as u8
      );
    }
    let n = neighbors.len() as u32;
    let mean = |channel: fn(&Color) -> u8| {
      let sum: u32 = neighbors.iter().map(|c| channel(c) as u32).sum();
      ((sum + n / 2) / n) as u8
    };
    Color::new(mean(|c| c.r), mean(|c| c.g), mean(|c| c.b))
  }
}

/// Always black: the palette then hands out colors in order of increasing brightness.
#[derive(Debug, Default, Copy, Clone)]
pub struct BlackTarget;

impl TargetColorGenerator for BlackTarget {
  fn target_color(&mut self, _: &mut Pcg64, _: &[Color], _: Point) -> Color {
    Color::BLACK
  }
}

/// Grey level taken from a noise field.
#[derive(Clone)]
pub struct PerlinColor(pub PerlinNoise);

impl PerlinColor {
  pub fn new(rng: &mut Pcg64, grid_size: f64, octaves: u32) -> Self {
    Self(PerlinNoise::new(rng)
      .with_grid_size(grid_size)
      .with_octaves(octaves))
  }
}

impl TargetColorGenerator for PerlinColor {
  fn target_color(&mut self, _: &mut Pcg64, _: &[Color], p: Point) -> Color {
    let value = 255.0 * (self.0.sample(p.i() as f64, p.j() as f64) + 1.0) / 2.0;
    Color::from_f64(value, value, value)
  }
}
