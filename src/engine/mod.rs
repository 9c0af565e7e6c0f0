//! The growth loop: pick a cell, pick a color, paint, extend the frontier.

use {
  crate::{
    color::Color,
    geometry::{self, Point},
    palette::{UniquePalette, MAX_COLORS},
    random::{self, Pcg64},
    strategy::{
      AverageColor, InitialLocationGenerator, LocationGenerator, NullPreference,
      PaletteGenerator, PreferenceGenerator, RandomFrontier, RandomStart,
      TargetColorGenerator, UniformPalette
    },
    tracker::FrontierTracker
  },
  anyhow::{ensure, Result},
  std::fmt::{Debug, Formatter},
  tinyvec::ArrayVec
};

#[cfg(test)] mod tests;

/// Progress is logged every this many iterations.
const PROGRESS_INTERVAL: usize = 100_000;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
  /// Nothing filled yet, the frontier is seeded on the next iteration
  Seeded,
  Growing,
  /// The frontier ran empty; `reset` to start over
  Done
}

pub struct GrowthEngine {
  tracker: FrontierTracker,
  palette: UniquePalette,
  /// Row-major, `width * height`
  pixels: Vec<Color>,
  rng: Pcg64,
  epsilon: f64,
  state: State,

  palette_generator: Box<dyn PaletteGenerator>,
  initial_location_generator: Box<dyn InitialLocationGenerator>,
  location_generator: Box<dyn LocationGenerator>,
  preference_generator: Box<dyn PreferenceGenerator>,
  target_color_generator: Box<dyn TargetColorGenerator>
}

impl GrowthEngine {
  /// An empty canvas with the default strategies: uniform palette, one random seed cell,
  /// random frontier growth and neighbor-average colors.
  pub fn new(width: u32, height: u32, seed: u64) -> Result<Self> {
    ensure!(width > 0 && height > 0, "canvas must not be empty, got {}x{}", width, height);
    let area = width as usize * height as usize;
    ensure!(
      area <= MAX_COLORS,
      "canvas of {}x{} needs more than the {} unique RGB colors", width, height, MAX_COLORS
    );

    Ok(Self {
      tracker: FrontierTracker::new(width, height),
      palette: UniquePalette::new(),
      pixels: vec![Color::BLACK; area],
      rng: random::seeded(seed),
      epsilon: 0.0,
      state: State::Seeded,
      palette_generator: Box::new(UniformPalette),
      initial_location_generator: Box::new(RandomStart),
      location_generator: Box::new(RandomFrontier),
      preference_generator: Box::new(NullPreference),
      target_color_generator: Box::new(AverageColor)
    })
  }

  pub fn with_palette_generator(mut self, generator: impl PaletteGenerator + 'static) -> Self {
    self.palette_generator = Box::new(generator);
    self
  }

  pub fn with_initial_location_generator(mut self, generator: impl InitialLocationGenerator + 'static) -> Self {
    self.initial_location_generator = Box::new(generator);
    self
  }

  pub fn with_location_generator(mut self, generator: impl LocationGenerator + 'static) -> Self {
    self.location_generator = Box::new(generator);
    self
  }

  pub fn with_preference_generator(mut self, generator: impl PreferenceGenerator + 'static) -> Self {
    self.preference_generator = Box::new(generator);
    self
  }

  pub fn with_target_color_generator(mut self, generator: impl TargetColorGenerator + 'static) -> Self {
    self.target_color_generator = Box::new(generator);
    self
  }

  /// Bucket size of the palette's spatial index, applied from the next palette load.
  pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
    self.palette = std::mem::take(&mut self.palette).with_leaf_size(leaf_size);
    self
  }

  pub fn with_epsilon(mut self, epsilon: f64) -> Result<Self> {
    self.set_epsilon(epsilon)?;
    Ok(self)
  }

  /// Allowed relative error of the palette search; 0 is exact.
  pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
    ensure!(epsilon.is_finite() && epsilon >= 0.0, "epsilon must be finite and non-negative, got {}", epsilon);
    self.epsilon = epsilon;
    Ok(())
  }

  pub fn epsilon(&self) -> f64 { self.epsilon }
  pub fn width(&self) -> u32 { self.tracker.width() }
  pub fn height(&self) -> u32 { self.tracker.height() }
  pub fn state(&self) -> State { self.state }
  pub fn tracker(&self) -> &FrontierTracker { &self.tracker }
  pub fn palette(&self) -> &UniquePalette { &self.palette }
  pub fn filled_count(&self) -> usize { self.tracker.filled_count() }

  /// Row-major pixel buffer. Unfilled cells are black.
  pub fn pixels(&self) -> &[Color] {
    &self.pixels
  }

  pub fn pixel(&self, i: i32, j: i32) -> Option<Color> {
    geometry::offset(self.tracker.canvas(), Point::new(i, j).xy)
      .map(|offset| self.pixels[offset])
  }

  /// Restart the random stream.
  pub fn seed(&mut self, seed: u64) {
    self.rng = random::seeded(seed);
  }

  /// The engine's random stream, for building strategies that draw from it.
  pub fn rng_mut(&mut self) -> &mut Pcg64 {
    &mut self.rng
  }

  /// Clear the canvas. The palette keeps its remaining colors.
  pub fn reset(&mut self) {
    self.tracker.clear();
    self.pixels.fill(Color::BLACK);
    self.state = State::Seeded;
  }

  fn load_palette(&mut self) -> Result<()> {
    let area = self.pixels.len();
    if self.tracker.filled_count() > 0 {
      log::warn!(
        "palette ran out after {} of {} pixels, generating a new one",
        self.tracker.filled_count(), area
      );
    }
    let colors = self.palette_generator.generate(&mut self.rng, area)?;
    self.palette.set_palette(colors)
  }

  fn seed_frontier(&mut self) -> Result<()> {
    let (width, height) = (self.width(), self.height());
    let seeds = self.initial_location_generator.initial_locations(&mut self.rng, width, height);
    for seed in seeds {
      self.tracker.add_to_frontier(seed);
    }
    ensure!(
      self.tracker.frontier_size() > 0,
      "initial location generator seeded no cell inside the {}x{} canvas", width, height
    );
    Ok(())
  }

  fn neighbor_colors(&self, p: Point) -> ArrayVec<[Color; 8]> {
    let canvas = self.tracker.canvas();
    p.neighbors()
      .filter(|&n| self.tracker.is_filled(n))
      .filter_map(|n| geometry::offset(canvas, n.xy))
      .map(|offset| self.pixels[offset])
      .collect()
  }

  /// Fill one pixel. Returns whether the frontier is still non-empty afterwards.
  ///
  /// Panics when called on a finished canvas.
  pub fn iterate(&mut self) -> Result<bool> {
    assert!(self.state != State::Done, "the canvas is complete, reset() before iterating again");

    if self.palette.colors_remaining() == 0 {
      self.load_palette()?;
    }
    if self.tracker.frontier_size() == 0 {
      self.seed_frontier()?;
    }

    let location = self.location_generator.next_location(&mut self.rng, &mut self.tracker);
    let offset = match geometry::offset(self.tracker.canvas(), location.xy) {
      Some(offset) if !self.tracker.is_filled(location) => offset,
      _ => panic!("location generator picked ({}, {}), which is not a fillable cell", location.i(), location.j())
    };

    let neighbors = self.neighbor_colors(location);
    let target = self.target_color_generator.target_color(&mut self.rng, &neighbors, location);
    self.pixels[offset] = self.palette.pop_closest(target, self.epsilon);

    let (rng, preference) = (&mut self.rng, &mut self.preference_generator);
    self.tracker.fill(location, |p, tracker| preference.preference(rng, p, tracker));

    let growing = self.tracker.frontier_size() > 0;
    self.state = if growing { State::Growing } else { State::Done };
    Ok(growing)
  }

  /// Iterate until the frontier runs empty, logging coarse progress on the way.
  pub fn iterate_until_done(&mut self) -> Result<()> {
    let mut body_size = self.tracker.filled_count();
    while self.state != State::Done {
      if body_size % PROGRESS_INTERVAL == 0 {
        self.log_progress();
      }
      self.iterate()?;
      body_size += 1;
    }
    self.log_progress();
    Ok(())
  }

  fn log_progress(&self) {
    log::info!(
      "body: {}\tfrontier: {}\tunexplored: {}",
      self.tracker.filled_count(),
      self.tracker.frontier_size(),
      self.tracker.unexplored_count()
    );
  }
}

impl Debug for GrowthEngine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("GrowthEngine")
      .field("state", &self.state)
      .field("epsilon", &self.epsilon)
      .field("tracker", &self.tracker)
      .field("palette", &self.palette)
      .finish()
  }
}
