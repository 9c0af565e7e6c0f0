//! Grow an image one pixel at a time, from a palette in which every color is used once.
//!
//! The canvas starts empty. Each iteration picks a cell on the *frontier* (unfilled cells
//! touching the filled region), decides which color the cell should ideally get (by default,
//! the average of its filled neighbors), and takes the closest color still left in the
//! palette. The palette is a k-d tree over RGB that supports popping the nearest remaining
//! color, optionally approximately, in roughly logarithmic time.
//!
//! # Basic usage
//! ```no_run
//! # use growth_image::{
//! #   error::Result,
//! #   engine::GrowthEngine,
//! #   strategy::{PreferredLocation, LocationPreference}
//! # };
//! # fn main() -> Result<()> {
//! let mut engine = GrowthEngine::new(256, 128, 42)?
//!   // sample 10 frontier cells, keep the one closest to a wandering goal
//!   .with_location_generator(PreferredLocation::new(10))
//!   .with_preference_generator(LocationPreference::default())
//!   // accept palette colors up to (1 + 5) times farther than the exact nearest one
//!   .with_epsilon(5.0)?;
//! engine.iterate_until_done()?;
//! # #[cfg(feature = "drawing")]
//! engine.save("out.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! Every strategy is a trait with a blanket implementation for closures, so ad-hoc
//! behaviour needs no new types:
//! ```
//! # use growth_image::{engine::GrowthEngine, color::Color, geometry::Point, random::Pcg64};
//! # fn main() -> anyhow::Result<()> {
//! let mut engine = GrowthEngine::new(32, 32, 1)?
//!   .with_target_color_generator(|_: &mut Pcg64, _: &[Color], p: Point| {
//!     Color::new(p.i() as u8 * 8, p.j() as u8 * 8, 128)
//!   });
//! engine.iterate_until_done()?;
//! assert_eq!(engine.filled_count(), 32 * 32);
//! # Ok(())
//! # }
//! ```
//!
//! All randomness flows from the engine's seeded [`Pcg64`](random::Pcg64) stream, so
//! a seed and a strategy set determine the image.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod util;
pub mod geometry;
pub mod color;
pub mod kdtree;
pub mod palette;
pub mod tracker;
pub mod random;
pub mod perlin;
pub mod strategy;
pub mod engine;
pub mod config;
#[cfg(feature = "drawing")]
#[cfg_attr(docsrs, doc(cfg(feature = "drawing")))]
pub mod drawing;
