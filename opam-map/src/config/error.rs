//! Configuration errors.

use thiserror::Error;

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Value must be strictly positive and finite
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// Integer value must be at least one
    #[error("{field} must be at least 1, got {value}")]
    Zero { field: &'static str, value: usize },

    /// Empty list where at least one entry is needed
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
}
