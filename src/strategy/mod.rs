//! Pluggable pieces of the growth process.
//!
//! Every strategy receives the engine's random stream explicitly, so a run is fully
//! determined by its seed. Closures with the matching signature implement the traits too.

use {
  crate::{
    color::Color,
    geometry::Point,
    palette,
    random::{Pcg64, RandomInt},
    tracker::FrontierTracker
  },
  anyhow::Result
};

mod location;
mod preference;
mod target;
#[cfg(test)] mod tests;

pub use {
  location::{RandomFrontier, SequentialLocation, PreferredLocation},
  preference::{NullPreference, LocationPreference, PerlinPreference},
  target::{AverageColor, BlackTarget, PerlinColor}
};

/// Produces the colors a fresh palette is built from.
pub trait PaletteGenerator {
  fn generate(&mut self, rng: &mut Pcg64, n_colors: usize) -> Result<Vec<Color>>;
}

/// Seeds the frontier of an empty canvas.
pub trait InitialLocationGenerator {
  fn initial_locations(&mut self, rng: &mut Pcg64, width: u32, height: u32) -> Vec<Point>;
}

/// Picks the next cell to fill.
///
/// The returned cell must be unfilled and in bounds. If it is in the frontier, the
/// generator removes it.
pub trait LocationGenerator {
  fn next_location(&mut self, rng: &mut Pcg64, tracker: &mut FrontierTracker) -> Point;
}

/// Scores a cell as it enters the frontier. Higher is more desirable.
pub trait PreferenceGenerator {
  fn preference(&mut self, rng: &mut Pcg64, p: Point, tracker: &FrontierTracker) -> f64;
}

/// The color a cell would ideally get, given its already filled neighbors.
pub trait TargetColorGenerator {
  fn target_color(&mut self, rng: &mut Pcg64, neighbors: &[Color], p: Point) -> Color;
}

impl<F> PaletteGenerator for F
  where F: FnMut(&mut Pcg64, usize) -> Result<Vec<Color>> {
  fn generate(&mut self, rng: &mut Pcg64, n_colors: usize) -> Result<Vec<Color>> {
    self(rng, n_colors)
  }
}

impl<F> InitialLocationGenerator for F
  where F: FnMut(&mut Pcg64, u32, u32) -> Vec<Point> {
  fn initial_locations(&mut self, rng: &mut Pcg64, width: u32, height: u32) -> Vec<Point> {
    self(rng, width, height)
  }
}

impl<F> LocationGenerator for F
  where F: FnMut(&mut Pcg64, &mut FrontierTracker) -> Point {
  fn next_location(&mut self, rng: &mut Pcg64, tracker: &mut FrontierTracker) -> Point {
    self(rng, tracker)
  }
}

impl<F> PreferenceGenerator for F
  where F: FnMut(&mut Pcg64, Point, &FrontierTracker) -> f64 {
  fn preference(&mut self, rng: &mut Pcg64, p: Point, tracker: &FrontierTracker) -> f64 {
    self(rng, p, tracker)
  }
}

impl<F> TargetColorGenerator for F
  where F: FnMut(&mut Pcg64, &[Color], Point) -> Color {
  fn target_color(&mut self, rng: &mut Pcg64, neighbors: &[Color], p: Point) -> Color {
    self(rng, neighbors, p)
  }
}

/// Evenly spaced colors, see [`palette::uniform_palette`].
#[derive(Debug, Default, Copy, Clone)]
pub struct UniformPalette;

impl PaletteGenerator for UniformPalette {
  fn generate(&mut self, _: &mut Pcg64, n_colors: usize) -> Result<Vec<Color>> {
    palette::uniform_palette(n_colors)
  }
}

/// One uniformly random cell.
#[derive(Debug, Default, Copy, Clone)]
pub struct RandomStart;

impl InitialLocationGenerator for RandomStart {
  fn initial_locations(&mut self, rng: &mut Pcg64, width: u32, height: u32) -> Vec<Point> {
    vec![Point::new(
      rng.rand_int(0, width as i32),
      rng.rand_int(0, height as i32)
    )]
  }
}

/// A fixed list of seed cells.
#[derive(Debug, Clone)]
pub struct FixedStart(pub Vec<Point>);

impl InitialLocationGenerator for FixedStart {
  fn initial_locations(&mut self, _: &mut Pcg64, _: u32, _: u32) -> Vec<Point> {
    self.0.clone()
  }
}
