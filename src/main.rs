use {
  growth_image::{
    config::{ColorChoice, GrowthConfig, LocationChoice, PreferenceChoice},
    drawing::FrameRecorder,
    engine::GrowthEngine,
    profile
  },
  anyhow::Result,
  clap::Parser,
  std::path::{Path, PathBuf}
};

/// Grow an image from a palette of unique colors.
#[derive(Parser, Debug)]
#[command(name = "growth", version)]
struct Args {
  /// Output filename
  #[arg(short, long)]
  output: PathBuf,

  /// TOML config file, overrides all other options if present
  #[arg(short = 'i', long)]
  config: Option<PathBuf>,

  /// Width of the output image
  #[arg(short, long, default_value_t = 256)]
  width: u32,

  /// Height of the output image
  #[arg(short = 'H', long, default_value_t = 128)]
  height: u32,

  /// Allowed relative error of the palette search, 0 = exact
  #[arg(short, long, default_value_t = 5.0)]
  epsilon: f64,

  /// Render as a video instead of a still image
  #[arg(short, long)]
  video: bool,

  /// Iterations between each video frame
  #[arg(long = "iter-per-frame", default_value_t = 1000)]
  iterations_per_frame: usize,

  /// Algorithm for selecting the next pixel to fill
  #[arg(short, long, value_enum, default_value_t = LocationChoice::Random)]
  location: LocationChoice,

  /// Location preference, used by `--location preferred`
  #[arg(short, long, value_enum, default_value_t = PreferenceChoice::Location)]
  preference: PreferenceChoice,

  /// Algorithm for choosing the wanted color of a pixel
  #[arg(short, long, value_enum, default_value_t = ColorChoice::Nearest)]
  color: ColorChoice,

  /// Number of octaves of perlin noise to add together
  #[arg(long, default_value_t = 7)]
  perlin_octaves: u32,

  /// Size in pixels of the largest perlin noise grid
  #[arg(long = "perlin-grid", default_value_t = 50.0)]
  perlin_grid_size: f64,

  /// Random seed, 0 = seed with the current time
  #[arg(short, long, default_value_t = 0)]
  seed: u64,

  /// Frontier samples per pixel for `--location preferred`
  #[arg(long = "loc-iter", default_value_t = 10)]
  preferred_location_iterations: u32
}

impl Args {
  fn to_config(&self) -> Result<GrowthConfig> {
    if let Some(path) = &self.config {
      log::info!("loading config from {}", path.display());
      return GrowthConfig::load(path);
    }
    Ok(GrowthConfig {
      width: self.width,
      height: self.height,
      seed: self.seed,
      epsilon: self.epsilon,
      location: self.location,
      preference: self.preference,
      color: self.color,
      preferred_location_iterations: self.preferred_location_iterations,
      perlin_octaves: self.perlin_octaves,
      perlin_grid_size: self.perlin_grid_size,
      video: self.video,
      iterations_per_frame: self.iterations_per_frame,
      ..Default::default()
    })
  }
}

fn make_image(engine: &mut GrowthEngine, output: &Path) -> Result<()> {
  engine.iterate_until_done()?;
  engine.save(output)
}

fn make_video(engine: &mut GrowthEngine, output: &Path, iterations_per_frame: usize) -> Result<()> {
  let frames = output.with_extension("frames");
  let mut recorder = FrameRecorder::new(&frames, iterations_per_frame)?;
  recorder.record(engine)?;
  recorder.encode(engine.width(), engine.height(), output)
}

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let args = Args::parse();
  let config = args.to_config()?;
  let mut engine = config.build()?;
  log::debug!("{:?}", engine);

  let result;
  profile!("growth", {
    result = match config.video {
      true => make_video(&mut engine, &args.output, config.iterations_per_frame),
      false => make_image(&mut engine, &args.output)
    };
  });
  result
}
