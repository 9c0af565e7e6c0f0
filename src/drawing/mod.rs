//! Image and animation output.

use {
  crate::engine::GrowthEngine,
  anyhow::{ensure, Context, Result},
  image::RgbImage,
  rayon::prelude::*,
  std::{
    path::{Path, PathBuf},
    process::Command
  }
};


/// Copies of the final frame appended to an animation, so it rests on the finished image.
pub const TRAILING_FRAMES: usize = 24;
pub const FRAMERATE: u32 = 12;
const FRAME_PREFIX: &str = "growth_";

impl GrowthEngine {
  /// The canvas so far; unfilled pixels are black.
  pub fn to_image(&self) -> RgbImage {
    let mut image = RgbImage::new(self.width(), self.height());
    image.par_chunks_mut(3)
      .zip(self.pixels().par_iter())
      .for_each(|(pixel, color)| pixel.copy_from_slice(&color.channels()));
    image
  }

  /// Write the canvas to `path`, format deduced from the extension.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    self.to_image()
      .save(path)
      .with_context(|| format!("failed to save image: {}", path.display()))
  }
}

/// Renders a growth run into numbered PNG frames, and those into a video with `ffmpeg`.
#[derive(Debug)]
pub struct FrameRecorder {
  dir: PathBuf,
  iterations_per_frame: usize,
  frames: usize
}

impl FrameRecorder {
  /// Frames go to `dir`, which is created if needed. Frames left over from an earlier
  /// recording are removed.
  pub fn new(dir: impl Into<PathBuf>, iterations_per_frame: usize) -> Result<Self> {
    ensure!(iterations_per_frame > 0, "iterations per frame must be positive");
    let dir = dir.into();
    std::fs::create_dir_all(&dir)
      .with_context(|| format!("failed to create frame directory: {}", dir.display()))?;

    for entry in std::fs::read_dir(&dir)? {
      let path = entry?.path();
      let stale = path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.starts_with(FRAME_PREFIX) && name.ends_with(".png"));
      if stale {
        std::fs::remove_file(&path)
          .with_context(|| format!("failed to remove stale frame: {}", path.display()))?;
      }
    }
    Ok(Self { dir, iterations_per_frame, frames: 0 })
  }

  pub fn dir(&self) -> &Path { &self.dir }
  pub fn frames(&self) -> usize { self.frames }

  pub fn frame_path(&self, n: usize) -> PathBuf {
    self.dir.join(format!("{}{}.png", FRAME_PREFIX, n))
  }

  /// Save the current canvas as the next frame.
  pub fn capture(&mut self, engine: &GrowthEngine) -> Result<()> {
    engine.save(self.frame_path(self.frames))?;
    self.frames += 1;
    Ok(())
  }

  /// Run `engine` to completion, saving a frame every `iterations_per_frame` iterations,
  /// then the trailing frames.
  pub fn record(&mut self, engine: &mut GrowthEngine) -> Result<()> {
    let area = engine.pixels().len();
    let mut i = 0;
    while engine.iterate()? {
      if i % self.iterations_per_frame == 0 {
        self.capture(engine)?;
        log::info!("iteration: {}/{}", i, area);
      }
      i += 1;
    }
    for _ in 0..TRAILING_FRAMES {
      self.capture(engine)?;
    }
    log::debug!("{} frames in {}", self.frames, self.dir.display());
    Ok(())
  }

  pub fn ffmpeg_command(&self, width: u32, height: u32, output: impl AsRef<Path>) -> Command {
    let mut command = Command::new("ffmpeg");
    command
      .args(["-y", "-f", "image2", "-framerate", FRAMERATE.to_string().as_str()])
      .arg("-i").arg(self.dir.join(format!("{}%d.png", FRAME_PREFIX)))
      .args(["-s", format!("{}x{}", width, height).as_str()])
      .args(["-vcodec", "h264", "-crf", "18", "-pix_fmt", "yuv420p"])
      .arg(output.as_ref());
    command
  }

  /// Encode the recorded frames into `output`.
  pub fn encode(&self, width: u32, height: u32, output: impl AsRef<Path>) -> Result<()> {
    ensure!(self.frames > 0, "no frames recorded");
    let status = self.ffmpeg_command(width, height, output)
      .status()
      .context("failed to run ffmpeg")?;
    ensure!(status.success(), "ffmpeg exited with {}", status);
    Ok(())
  }
}
