//! Filled region and its growth boundary.
//!
//! The frontier is kept as an unordered vector for O(1) random access, plus a dense
//! `width * height` slot table mapping each cell to its position in that vector. Removal
//! swaps the last entry into the hole.

use {
  crate::geometry::{self, Canvas, Location, Point},
  std::fmt::{Debug, Formatter}
};


/// Slot table entry for cells outside of the frontier.
const NOT_IN_FRONTIER: u32 = u32::MAX;

pub struct FrontierTracker {
  canvas: Canvas,
  filled: Vec<bool>,
  filled_count: usize,
  frontier: Vec<Point>,
  slots: Vec<u32>
}

impl FrontierTracker {
  /// Panics if the canvas has more cells than the slot table can address.
  pub fn new(width: u32, height: u32) -> Self {
    let area = width as usize * height as usize;
    assert!(area < NOT_IN_FRONTIER as usize, "canvas of {width}x{height} cells is too large");
    Self {
      canvas: Canvas::new(width, height),
      filled: vec![false; area],
      filled_count: 0,
      frontier: vec![],
      slots: vec![NOT_IN_FRONTIER; area]
    }
  }

  pub fn width(&self) -> u32 { self.canvas.width }
  pub fn height(&self) -> u32 { self.canvas.height }
  pub fn canvas(&self) -> Canvas { self.canvas }

  pub fn clear(&mut self) {
    self.filled.fill(false);
    self.filled_count = 0;
    self.frontier.clear();
    self.slots.fill(NOT_IN_FRONTIER);
  }

  #[inline]
  fn offset(&self, xy: Location) -> Option<usize> {
    geometry::offset(self.canvas, xy)
  }

  pub fn in_bounds(&self, p: Point) -> bool {
    self.offset(p.xy).is_some()
  }

  pub fn frontier_size(&self) -> usize {
    self.frontier.len()
  }

  pub fn frontier(&self) -> &[Point] {
    &self.frontier
  }

  pub fn filled_count(&self) -> usize {
    self.filled_count
  }

  /// Cells neither filled nor in the frontier.
  pub fn unexplored_count(&self) -> usize {
    self.filled.len() - self.filled_count - self.frontier.len()
  }

  /// Out-of-bounds cells are never filled.
  pub fn is_filled(&self, p: Point) -> bool {
    self.offset(p.xy).map_or(false, |offset| self.filled[offset])
  }

  pub fn is_in_frontier(&self, p: Point) -> bool {
    self.offset(p.xy).map_or(false, |offset| self.slots[offset] != NOT_IN_FRONTIER)
  }

  /// Add `p` unless it is out of bounds, filled, or already in the frontier.
  /// Returns whether it was added.
  pub fn add_to_frontier(&mut self, p: Point) -> bool {
    match self.offset(p.xy) {
      Some(offset) if !self.filled[offset] && self.slots[offset] == NOT_IN_FRONTIER => {
        self.slots[offset] = self.frontier.len() as u32;
        self.frontier.push(p);
        true
      }
      _ => false
    }
  }

  /// Mark `p` as filled and extend the frontier to its unfilled neighbors.
  ///
  /// `preference` is evaluated once for every cell entering the frontier, at insertion time.
  /// Panics if `p` is out of bounds.
  pub fn fill(&mut self, p: Point, mut preference: impl FnMut(Point, &FrontierTracker) -> f64) {
    let offset = match self.offset(p.xy) {
      Some(offset) => offset,
      None => panic!("cannot fill ({}, {}): outside of the {}x{} canvas",
        p.i(), p.j(), self.canvas.width, self.canvas.height)
    };
    self.remove_from_frontier(p);
    if !self.filled[offset] {
      self.filled[offset] = true;
      self.filled_count += 1;
    }

    for neighbor in p.neighborhood() {
      if self.can_enter(neighbor) {
        let preference = preference(neighbor, self);
        self.add_to_frontier(neighbor.with_preference(preference));
      }
    }
  }

  fn can_enter(&self, p: Point) -> bool {
    self.offset(p.xy)
      .map_or(false, |offset| !self.filled[offset] && self.slots[offset] == NOT_IN_FRONTIER)
  }

  pub fn frontier_at_index(&self, index: usize) -> &Point {
    &self.frontier[index]
  }

  /// For strategies that refresh preferences in place.
  pub fn frontier_at_index_mut(&mut self, index: usize) -> &mut Point {
    &mut self.frontier[index]
  }

  /// Remove the frontier entry at `index` in O(1), moving the last entry into its place.
  pub fn pop_frontier_at_index(&mut self, index: usize) -> Point {
    let point = self.frontier.swap_remove(index);
    self.release_slot(point);
    if let Some(moved) = self.frontier.get(index) {
      let offset = self.slot_offset(moved);
      self.slots[offset] = index as u32;
    }
    point
  }

  /// Returns the removed entry, or `None` if `p` was not in the frontier.
  pub fn remove_from_frontier(&mut self, p: Point) -> Option<Point> {
    let offset = self.offset(p.xy)?;
    match self.slots[offset] {
      NOT_IN_FRONTIER => None,
      index => Some(self.pop_frontier_at_index(index as usize))
    }
  }

  fn slot_offset(&self, p: &Point) -> usize {
    self.offset(p.xy)
      .unwrap_or_else(|| unreachable!("frontier only holds in-bounds cells"))
  }

  fn release_slot(&mut self, p: Point) {
    let offset = self.slot_offset(&p);
    self.slots[offset] = NOT_IN_FRONTIER;
  }
}

impl Debug for FrontierTracker {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("FrontierTracker")
      .field("width", &self.canvas.width)
      .field("height", &self.canvas.height)
      .field("filled", &self.filled_count)
      .field("frontier", &self.frontier.len())
      .field("unexplored", &self.unexplored_count())
      .finish()
  }
}
