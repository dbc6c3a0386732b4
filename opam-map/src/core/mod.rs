//! Core types for the opam-map library.
//!
//! This module provides the fundamental types used throughout the library:
//! - [`WorldPoint`] and [`PixelCoord`]: Coordinate types
//! - [`CellLabel`]: Obstacle / free classification of raster cells
//! - [`Path`] and [`Episode`]: Recorded agent trajectories

mod episode;
mod label;
mod point;

pub use episode::{Episode, Path};
pub use label::CellLabel;
pub use point::{PixelCoord, WorldPoint};
