//! # opam-map: Occupancy Prior from Agent Motion
//!
//! Turns recorded multi-agent trajectories into per-pixel visitation counts
//! over a binary traversability raster. The counts estimate how likely each
//! location is to be occupied by a moving agent.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use opam_map::{Environment, EnvironmentSettings, TraversabilityMap};
//! use opam_map::core::{Episode, WorldPoint};
//!
//! let raster = TraversabilityMap::free(200, 200, 0).unwrap();
//! let mut env = Environment::new("hall", raster, EnvironmentSettings::default()).unwrap();
//!
//! let walk = vec![WorldPoint::new(-3.0, 0.0), WorldPoint::new(3.0, 1.0)];
//! let summary = env.accumulate_episode(&Episode::new(vec![walk])).unwrap();
//! println!("{} paths accepted, max count {}",
//!     summary.paths_accepted, env.visitation_counts().max());
//! ```
//!
//! ## Coordinate Frame
//!
//! - World origin at the raster centre `(height / 2, width / 2)`
//! - **X** grows with image columns, **Y** with image rows
//! - Pixels are addressed `(row, col)`, storage is row-major
//!
//! ## Architecture
//!
//! - [`core`]: Points, labels and episode containers
//! - [`grid`]: Raster, transform, rasterizer, footprint mask and count grids
//! - [`environment`]: Per-map accumulation with per-episode rollback
//! - [`aggregation`]: Registry of environments for multi-map runs
//! - [`simulation`]: Episode sources and simulator options
//! - [`io`]: Map images, episode JSON, exports
//! - [`config`]: YAML configuration
//!
//! ## Data Flow
//!
//! ```text
//!   map image ──► TraversabilityMap ──┐
//!                                     ▼
//!   episode JSON ──► Episode ──► Environment ──► VisitationGrid ──► PNG / .opamv
//!                      ▲              │
//!   EpisodeSource ─────┘              └── world→pixel, Bresenham, obstacle check,
//!                                         footprint stamps, per-episode commit
//! ```

pub mod aggregation;
pub mod config;
pub mod core;
pub mod environment;
pub mod error;
pub mod grid;
pub mod io;
pub mod simulation;

pub use aggregation::Aggregator;
pub use config::{ConfigError, ConfigLoadError, OpamConfig};
pub use environment::{
    AccumulationReport, BoundaryPolicy, Environment, EnvironmentSettings, EpisodeSummary,
    PathOutcome,
};
pub use error::{EpisodeError, OpamError, Result};
pub use grid::{
    FootprintMask, PIXEL_LIMIT, PixelTransform, SweptArea, TraversabilityMap, VisitationGrid,
};
pub use simulation::{EpisodeSource, ObstacleOutline, OrcaConfig, RecordedSource};
