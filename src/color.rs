use {
  crate::kdtree::KdPoint,
  std::fmt::{self, Display, Formatter}
};

/// 8-bit RGB color.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
  pub r: u8,
  pub g: u8,
  pub b: u8
}

impl Color {
  pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

  pub const fn new(r: u8, g: u8, b: u8) -> Self {
    Color { r, g, b }
  }

  /// Build a color from floating point channels, rounding and clamping to `0..=255`.
  pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
    let channel = |c: f64| c.round().clamp(0.0, 255.0) as u8;
    Color::new(channel(r), channel(g), channel(b))
  }

  pub fn channels(&self) -> [u8; 3] {
    [self.r, self.g, self.b]
  }

  /// Euclidean distance from black.
  pub fn magnitude(&self) -> f64 {
    self.distance2(&Color::BLACK).sqrt()
  }

  pub fn distance2(&self, other: &Color) -> f64 {
    self.channels().iter()
      .zip(other.channels())
      .map(|(&a, b)| (a as f64 - b as f64).powi(2))
      .sum()
  }
}

impl KdPoint for Color {
  type Scalar = u8;
  const DIMENSIONS: usize = 3;

  fn get(&self, dim: usize) -> u8 {
    match dim {
      0 => self.r,
      1 => self.g,
      2 => self.b,
      _ => panic!("Color has no dimension {dim}")
    }
  }
}

impl From<[u8; 3]> for Color {
  fn from([r, g, b]: [u8; 3]) -> Self {
    Color::new(r, g, b)
  }
}

impl From<Color> for [u8; 3] {
  fn from(color: Color) -> Self {
    color.channels()
  }
}

impl Display for Color {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
  }
}
