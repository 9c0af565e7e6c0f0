use {
  super::PreferenceGenerator,
  crate::{
    geometry::Point,
    perlin::PerlinNoise,
    random::{Pcg64, RandomInt},
    tracker::FrontierTracker
  }
};

/// Every cell is equally desirable.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullPreference;

impl PreferenceGenerator for NullPreference {
  fn preference(&mut self, _: &mut Pcg64, _: Point, _: &FrontierTracker) -> f64 {
    0.0
  }
}

/// Prefers cells close to a goal cell. A new goal is drawn once the current one is filled,
/// which makes the region grow in long tendrils.
#[derive(Debug, Default, Copy, Clone)]
pub struct LocationPreference {
  goal: Option<Point>
}

impl LocationPreference {
  pub fn goal(&self) -> Option<Point> {
    self.goal
  }
}

impl PreferenceGenerator for LocationPreference {
  fn preference(&mut self, rng: &mut Pcg64, p: Point, tracker: &FrontierTracker) -> f64 {
    let goal = match self.goal {
      Some(goal) if !tracker.is_filled(goal) => goal,
      _ => {
        let goal = Point::new(
          rng.rand_int(0, tracker.width() as i32),
          rng.rand_int(0, tracker.height() as i32)
        );
        self.goal = Some(goal);
        goal
      }
    };
    -(p.xy - goal.xy).to_f64().square_length()
  }
}

/// Samples a noise field at the cell.
#[derive(Clone)]
pub struct PerlinPreference(pub PerlinNoise);

impl PerlinPreference {
  pub fn new(rng: &mut Pcg64, grid_size: f64, octaves: u32) -> Self {
    Self(PerlinNoise::new(rng)
      .with_grid_size(grid_size)
      .with_octaves(octaves))
  }
}

impl PreferenceGenerator for PerlinPreference {
  fn preference(&mut self, _: &mut Pcg64, p: Point, _: &FrontierTracker) -> f64 {
    self.0.sample(p.i() as f64, p.j() as f64)
  }
}
