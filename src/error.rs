//! Errors are [`anyhow`] errors throughout the crate.
//!
//! Misconfiguration (empty palettes, degenerate canvases, bad config values, IO) comes
//! back as `Err`. Broken invariants, such as popping from an exhausted palette or
//! iterating a finished canvas, panic.

pub use anyhow::{bail, ensure, Context, Error, Result};
