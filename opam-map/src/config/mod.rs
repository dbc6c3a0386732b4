//! Unified configuration loading for OPAM.
//!
//! Loads all configuration from a single YAML file.

pub(crate) mod defaults;
mod environment;
mod error;
mod loading;
mod opam;
mod persistence;

// Re-export main types
pub use error::{ConfigError, ConfigLoadError};
pub use opam::OpamConfig;

// Re-export section types
pub use environment::EnvironmentSection;
pub use loading::LoadingSection;
pub use persistence::PersistenceSection;
