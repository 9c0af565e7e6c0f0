//! A palette of unique colors, each handed out at most once.

use {
  crate::{
    color::Color,
    kdtree::{KdTree, SearchStats, DEFAULT_LEAF_SIZE},
    random::RandomInt
  },
  anyhow::{ensure, Result},
  rand::Rng
};


/// Largest palette that still fits into 24-bit RGB.
pub const MAX_COLORS: usize = 1 << 24;

#[derive(Debug)]
pub struct UniquePalette {
  index: Option<KdTree<Color>>,
  leaf_size: usize
}

impl Default for UniquePalette {
  fn default() -> Self {
    Self::new()
  }
}

impl UniquePalette {
  pub fn new() -> Self {
    Self { index: None, leaf_size: DEFAULT_LEAF_SIZE }
  }

  /// Bucket size of the spatial index built by subsequent palette loads.
  pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
    self.leaf_size = leaf_size;
    self
  }

  /// Replace the palette. Colors left over from the previous palette are discarded.
  pub fn set_palette(&mut self, colors: Vec<Color>) -> Result<()> {
    let index = KdTree::with_leaf_size(colors, self.leaf_size)?;
    log::debug!("palette loaded: {:?}", index);
    self.index = Some(index);
    Ok(())
  }

  pub fn generate_uniform_palette(&mut self, n_colors: usize) -> Result<()> {
    self.set_palette(uniform_palette(n_colors)?)
  }

  /// 0 when no palette has been loaded yet.
  pub fn colors_remaining(&self) -> usize {
    self.index.as_ref().map_or(0, KdTree::num_leaves)
  }

  pub fn index(&self) -> Option<&KdTree<Color>> {
    self.index.as_ref()
  }

  fn loaded(&mut self) -> &mut KdTree<Color> {
    match self.index.as_mut() {
      Some(index) => index,
      None => panic!("no palette loaded")
    }
  }

  /// Remove and return the remaining color closest to `color`.
  ///
  /// Panics when the palette is empty.
  pub fn pop_closest(&mut self, color: Color, epsilon: f64) -> Color {
    self.loaded().pop_closest(&color, epsilon)
  }

  pub fn pop_closest_with_stats(&mut self, color: Color, epsilon: f64, stats: &mut SearchStats) -> Color {
    self.loaded().pop_closest_with_stats(&color, epsilon, stats)
  }

  /// Some remaining color, chosen cheaply and deterministically: the one closest to black.
  pub fn pop_back(&mut self) -> Color {
    self.pop_closest(Color::BLACK, 0.0)
  }

  /// The remaining color closest to a uniformly random RGB triple.
  ///
  /// Colors next to large empty regions of the color cube are more likely to be picked, so
  /// this is not a uniform draw over the remaining colors.
  pub fn pop_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Color {
    let target = Color::new(
      rng.rand_int(0, 256) as u8,
      rng.rand_int(0, 256) as u8,
      rng.rand_int(0, 256) as u8
    );
    self.pop_closest(target, 0.0)
  }
}

/// `n_colors` distinct colors spread over a cubic grid in RGB space.
///
/// Color `i` takes the base-`side` digits of `i` as its red, green and blue grid
/// coordinates, where `side` is the smallest integer with `side³ >= n_colors`. Grid
/// coordinates are scaled so that the last one lands on 255.
pub fn uniform_palette(n_colors: usize) -> Result<Vec<Color>> {
  ensure!(n_colors > 0, "palette size must be positive");
  ensure!(
    n_colors <= MAX_COLORS,
    "palette size {} exceeds the {} representable RGB colors", n_colors, MAX_COLORS
  );

  let side = cube_side(n_colors);
  let scale = |digit: usize| match side {
    1 => 0,
    _ => (digit * 255 / (side - 1)) as u8
  };

  Ok((0..n_colors)
    .map(|i| Color::new(
      scale(i % side),
      scale(i / side % side),
      scale(i / (side * side))
    ))
    .collect())
}

/// Smallest `side` with `side³ >= n`.
fn cube_side(n: usize) -> usize {
  let mut side = (n as f64).cbrt().round() as usize;
  while side.pow(3) < n {
    side += 1;
  }
  while side > 1 && (side - 1).pow(3) >= n {
    side -= 1;
  }
  side.max(1)
}
