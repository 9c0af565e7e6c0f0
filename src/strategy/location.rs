use {
  super::LocationGenerator,
  crate::{
    geometry::{self, Point},
    random::{Pcg64, RandomInt},
    tracker::FrontierTracker
  }
};

fn random_index(rng: &mut Pcg64, tracker: &FrontierTracker) -> usize {
  rng.rand_int(0, tracker.frontier_size() as i32) as usize
}

/// Uniformly random frontier cell.
#[derive(Debug, Default, Copy, Clone)]
pub struct RandomFrontier;

impl LocationGenerator for RandomFrontier {
  fn next_location(&mut self, rng: &mut Pcg64, tracker: &mut FrontierTracker) -> Point {
    let index = random_index(rng, tracker);
    tracker.pop_frontier_at_index(index)
  }
}

/// Row-major scan over the canvas, ignoring the frontier shape.
#[derive(Debug, Default, Copy, Clone)]
pub struct SequentialLocation {
  cursor: usize
}

impl LocationGenerator for SequentialLocation {
  fn next_location(&mut self, _: &mut Pcg64, tracker: &mut FrontierTracker) -> Point {
    let canvas = tracker.canvas();
    let area = canvas.area() as usize;
    // restart after the tracker has been cleared
    if tracker.filled_count() == 0 {
      self.cursor = 0;
    }
    let at = |cursor| Point::from(geometry::location(canvas, cursor));
    while self.cursor < area && tracker.is_filled(at(self.cursor)) {
      self.cursor += 1;
    }
    assert!(self.cursor < area, "sequential scan ran past the end of the canvas");

    let p = at(self.cursor);
    self.cursor += 1;
    tracker.remove_from_frontier(p).unwrap_or(p)
  }
}

/// Best of `checks` random frontier samples, by preference.
#[derive(Debug, Copy, Clone)]
pub struct PreferredLocation {
  checks: u32
}

impl PreferredLocation {
  pub fn new(checks: u32) -> Self {
    Self { checks: checks.max(1) }
  }
}

impl Default for PreferredLocation {
  fn default() -> Self {
    Self::new(10)
  }
}

impl LocationGenerator for PreferredLocation {
  fn next_location(&mut self, rng: &mut Pcg64, tracker: &mut FrontierTracker) -> Point {
    let mut best: Option<(usize, f64)> = None;
    for _ in 0..self.checks {
      let index = random_index(rng, tracker);
      let preference = match tracker.frontier_at_index(index).preference {
        p if p.is_nan() => f64::NEG_INFINITY,
        p => p
      };
      if best.map_or(true, |(_, best)| preference > best) {
        best = Some((index, preference));
      }
    }
    let (index, _) = best.unwrap_or_else(|| unreachable!("at least one sample is drawn"));
    tracker.pop_frontier_at_index(index)
  }
}
