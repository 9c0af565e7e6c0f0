//! Grid coordinates.
//!
//! The origin is in the top-left corner; `i` grows to the right and `j` grows downwards.
//! Pixel buffers are row-major, so the cell `(i, j)` lives at offset `j * width + i`.

use {
  std::hash::{Hash, Hasher},
  euclid::{Point2D, Size2D},
  itertools::iproduct
};

/// Pixel coordinate basis
#[derive(Debug, Copy, Clone)]
pub struct PixelSpace;

pub type Location = Point2D<i32, PixelSpace>;
pub type Canvas = Size2D<u32, PixelSpace>;

/// A grid cell, optionally carrying a preference score.
///
/// Equality and hashing only look at the coordinate. A `NaN` preference means
/// the score has not been computed yet.
#[derive(Debug, Copy, Clone)]
pub struct Point {
  pub xy: Location,
  pub preference: f64
}

impl Point {
  pub fn new(i: i32, j: i32) -> Self {
    Self { xy: Point2D::new(i, j), preference: f64::NAN }
  }

  pub fn with_preference(mut self, preference: f64) -> Self {
    self.preference = preference;
    self
  }

  #[inline] pub fn i(&self) -> i32 { self.xy.x }
  #[inline] pub fn j(&self) -> i32 { self.xy.y }

  pub fn has_preference(&self) -> bool {
    !self.preference.is_nan()
  }

  /// The 3x3 block centered on this point, itself included.
  pub fn neighborhood(self) -> impl Iterator<Item = Point> {
    iproduct!(-1..=1, -1..=1)
      .map(move |(di, dj)| Point::new(self.i() + di, self.j() + dj))
  }

  /// 8-connected neighbors.
  pub fn neighbors(self) -> impl Iterator<Item = Point> {
    self.neighborhood().filter(move |p| *p != self)
  }
}

impl From<Location> for Point {
  fn from(xy: Location) -> Self {
    Point { xy, preference: f64::NAN }
  }
}

impl From<(i32, i32)> for Point {
  fn from((i, j): (i32, i32)) -> Self {
    Point::new(i, j)
  }
}

impl PartialEq for Point {
  fn eq(&self, other: &Self) -> bool {
    self.xy == other.xy
  }
}

impl Eq for Point {}

impl Hash for Point {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.xy.x.hash(state);
    self.xy.y.hash(state);
  }
}

/// Row-major offset of `xy`, or `None` when it lies outside of `canvas`.
pub fn offset(canvas: Canvas, xy: Location) -> Option<usize> {
  let inside = xy.x >= 0 && xy.y >= 0
    && (xy.x as u32) < canvas.width
    && (xy.y as u32) < canvas.height;
  inside.then(|| xy.y as usize * canvas.width as usize + xy.x as usize)
}

/// Inverse of [`offset`].
pub fn location(canvas: Canvas, offset: usize) -> Location {
  let width = canvas.width as usize;
  Point2D::new((offset % width) as i32, (offset / width) as i32)
}
