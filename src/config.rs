//! Run configuration, from the command line or a TOML file.
//!
//! ```toml
//! width = 512
//! height = 256
//! seed = 42
//! location = "preferred"
//! preference = "perlin"
//! perlin_grid_size = 80.0
//! ```
//! Missing keys take their defaults.

use {
  crate::{
    engine::GrowthEngine,
    palette::MAX_COLORS,
    random,
    strategy::{
      AverageColor, BlackTarget, LocationPreference, NullPreference, PerlinColor,
      PerlinPreference, PreferredLocation, RandomFrontier, SequentialLocation
    }
  },
  anyhow::{ensure, Context, Result},
  serde::Deserialize,
  std::path::Path
};

/// How the next cell is picked.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LocationChoice {
  Random,
  Sequential,
  Preferred
}

/// How frontier cells are scored, used by [`LocationChoice::Preferred`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PreferenceChoice {
  Location,
  Perlin,
  Null
}

/// How the wanted color of a cell is derived.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
  /// Average of the filled neighbors
  Nearest,
  /// Palette order, darkest first
  Sequential,
  Perlin
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrowthConfig {
  pub width: u32,
  pub height: u32,
  /// 0 seeds from the wall clock
  pub seed: u64,
  pub epsilon: f64,
  pub location: LocationChoice,
  pub preference: PreferenceChoice,
  pub color: ColorChoice,
  pub preferred_location_iterations: u32,
  pub perlin_octaves: u32,
  pub perlin_grid_size: f64,
  pub leaf_size: usize,
  pub video: bool,
  pub iterations_per_frame: usize
}

impl Default for GrowthConfig {
  fn default() -> Self {
    Self {
      width: 256,
      height: 128,
      seed: 0,
      epsilon: 5.0,
      location: LocationChoice::Random,
      preference: PreferenceChoice::Location,
      color: ColorChoice::Nearest,
      preferred_location_iterations: 10,
      perlin_octaves: 7,
      perlin_grid_size: 50.0,
      leaf_size: crate::kdtree::DEFAULT_LEAF_SIZE,
      video: false,
      iterations_per_frame: 1000
    }
  }
}

impl GrowthConfig {
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: GrowthConfig = toml::from_str(&content)
      .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<()> {
    ensure!(self.width > 0 && self.height > 0, "canvas must not be empty, got {}x{}", self.width, self.height);
    ensure!(
      self.width as usize * self.height as usize <= MAX_COLORS,
      "canvas of {}x{} needs more than the {} unique RGB colors", self.width, self.height, MAX_COLORS
    );
    ensure!(
      self.epsilon.is_finite() && self.epsilon >= 0.0,
      "epsilon must be finite and non-negative, got {}", self.epsilon
    );
    ensure!(self.perlin_octaves > 0, "perlin_octaves must be positive");
    ensure!(
      self.perlin_grid_size.is_finite() && self.perlin_grid_size > 0.0,
      "perlin_grid_size must be positive, got {}", self.perlin_grid_size
    );
    ensure!(self.leaf_size > 0, "leaf_size must be positive");
    ensure!(self.iterations_per_frame > 0, "iterations_per_frame must be positive");
    Ok(())
  }

  /// The seed actually used, resolving 0 to a clock-derived one.
  pub fn resolved_seed(&self) -> u64 {
    match self.seed {
      0 => random::time_seed(),
      seed => seed
    }
  }

  /// A ready to run engine with the selected strategies.
  pub fn build(&self) -> Result<GrowthEngine> {
    self.validate()?;
    let seed = self.resolved_seed();
    log::info!("seed: {}", seed);

    let engine = GrowthEngine::new(self.width, self.height, seed)?
      .with_leaf_size(self.leaf_size)
      .with_epsilon(self.epsilon)?;

    let engine = match self.location {
      LocationChoice::Random => engine.with_location_generator(RandomFrontier),
      LocationChoice::Sequential => engine.with_location_generator(SequentialLocation::default()),
      LocationChoice::Preferred => engine
        .with_location_generator(PreferredLocation::new(self.preferred_location_iterations))
    };

    let mut engine = match self.preference {
      PreferenceChoice::Null => engine.with_preference_generator(NullPreference),
      PreferenceChoice::Location => engine.with_preference_generator(LocationPreference::default()),
      PreferenceChoice::Perlin => {
        let mut engine = engine;
        let perlin = PerlinPreference::new(engine.rng_mut(), self.perlin_grid_size, self.perlin_octaves);
        engine.with_preference_generator(perlin)
      }
    };

    let engine = match self.color {
      ColorChoice::Nearest => engine.with_target_color_generator(AverageColor),
      ColorChoice::Sequential => engine.with_target_color_generator(BlackTarget),
      ColorChoice::Perlin => {
        let perlin = PerlinColor::new(engine.rng_mut(), self.perlin_grid_size, self.perlin_octaves);
        engine.with_target_color_generator(perlin)
      }
    };
    Ok(engine)
  }
}
