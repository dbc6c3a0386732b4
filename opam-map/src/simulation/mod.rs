//! Simulator interface.
//!
//! Visitation counts only need trajectories. Producing them is delegated to
//! an [`EpisodeSource`]: a crowd simulator (ORCA-style, configured through
//! [`OrcaConfig`]) or [`RecordedSource`] replaying stored episodes.
//!
//! Obstacles are handed to sources as world-space outlines extracted from
//! the raster by [`obstacle_outlines`].

mod config;
mod obstacles;
mod source;

pub use config::OrcaConfig;
pub use obstacles::{ObstacleOutline, obstacle_outlines};
pub use source::{EpisodeSource, RecordedSource};
