//! Error types for opam-map.
//!
//! Two layers:
//! - [`EpisodeError`]: a single episode could not be accumulated. The
//!   episode is skipped and the count grid is left untouched; the run goes on.
//! - [`OpamError`]: everything else (I/O, decoding, invalid inputs). These
//!   abort the operation that raised them.

use std::path::PathBuf;

use crate::config::{ConfigError, ConfigLoadError};

/// Result type alias
pub type Result<T> = std::result::Result<T, OpamError>;

/// Per-episode accumulation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EpisodeError {
    /// Agent paths of one episode have different sample counts
    #[error("Path length mismatch: agent {agent} has {found} samples, expected {expected}")]
    PathLengthMismatch {
        /// Index of the first offending agent
        agent: usize,
        /// Sample count of the first agent
        expected: usize,
        /// Sample count of the offending agent
        found: usize,
    },

    /// Footprint stamp leaves the raster under [`BoundaryPolicy::Reject`](crate::BoundaryPolicy::Reject)
    #[error("Footprint stamp centred at ({row}, {col}) leaves the raster")]
    StampOutOfBounds {
        /// Stamp centre row
        row: i32,
        /// Stamp centre column
        col: i32,
    },
}

impl EpisodeError {
    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PathLengthMismatch { .. } => "DATA_CONSISTENCY",
            Self::StampOutOfBounds { .. } => "STAMP_OUT_OF_BOUNDS",
        }
    }
}

/// Fatal opam-map errors.
#[derive(Debug, thiserror::Error)]
pub enum OpamError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding error
    #[error("Image error at {path}: {source}")]
    Image {
        /// File being read or written
        path: PathBuf,
        /// Underlying decoder error
        #[source]
        source: image::ImageError,
    },

    /// Episode JSON could not be parsed
    #[error("Episode file {path}: {source}")]
    Json {
        /// Episode file
        path: PathBuf,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// Raster does not satisfy the traversability contract
    #[error("Invalid raster: {0}")]
    InvalidRaster(String),

    /// Invalid configuration value
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Configuration file could not be loaded
    #[error(transparent)]
    ConfigLoad(#[from] ConfigLoadError),

    /// No environment registered under this name
    #[error("Unknown map: {0}")]
    UnknownMap(String),

    /// Episode source failed
    #[error("Simulation error: {0}")]
    Simulation(String),

    /// Binary counts file is malformed
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
