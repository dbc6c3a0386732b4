//! Main OpamConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::environment::EnvironmentSettings;
use crate::simulation::OrcaConfig;

use super::environment::EnvironmentSection;
use super::error::{ConfigError, ConfigLoadError};
use super::loading::LoadingSection;
use super::persistence::PersistenceSection;

/// Full OPAM configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct OpamConfig {
    /// Raster and footprint settings
    #[serde(default)]
    pub environment: EnvironmentSection,

    /// Input loading settings
    #[serde(default)]
    pub loading: LoadingSection,

    /// Crowd simulator options
    #[serde(default)]
    pub simulation: OrcaConfig,

    /// Output settings
    #[serde(default)]
    pub persistence: PersistenceSection,
}

impl OpamConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string and validate
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_environment_settings().validate()?;
        if self.loading.map_extensions.is_empty() {
            return Err(ConfigError::Empty("loading.map_extensions"));
        }
        self.simulation.validate()
    }

    /// Convert to EnvironmentSettings
    pub fn to_environment_settings(&self) -> EnvironmentSettings {
        self.environment.to_settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::BoundaryPolicy;

    #[test]
    fn test_default_config() {
        let config = OpamConfig::default();
        assert_eq!(config.environment.pix_per_meter, 10.0);
        assert_eq!(config.environment.agent_radius, 1.5);
        assert_eq!(config.environment.boundary, BoundaryPolicy::Clamp);
        assert_eq!(config.loading.num_episodes, 0);
        assert_eq!(config.simulation.num_agents, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = OpamConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = OpamConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.environment.pix_per_meter, config.environment.pix_per_meter);
        assert_eq!(parsed.loading.map_extensions, config.loading.map_extensions);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "environment:\n  pix_per_meter: 100.0\n  boundary: reject\n";
        let config = OpamConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.environment.pix_per_meter, 100.0);
        assert_eq!(config.environment.agent_radius, 1.5);
        assert_eq!(config.environment.boundary, BoundaryPolicy::Reject);
        assert_eq!(config.persistence.output_dir, "./output");

        let settings = config.to_environment_settings();
        assert_eq!(settings.pix_per_meter, 100.0);
        assert_eq!(settings.reference_scale, 10.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let yaml = "environment:\n  agent_radius: -1.0\n";
        assert!(matches!(
            OpamConfig::from_yaml(yaml),
            Err(ConfigLoadError::Invalid(ConfigError::NotPositive { .. }))
        ));

        let yaml = "simulation:\n  max_neighbors: 0\n";
        assert!(matches!(
            OpamConfig::from_yaml(yaml),
            Err(ConfigLoadError::Invalid(ConfigError::Zero { .. }))
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            OpamConfig::from_yaml("environment: [1, 2"),
            Err(ConfigLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_extension_matching() {
        let config = OpamConfig::default();
        assert!(config.loading.accepts_extension("PNG"));
        assert!(config.loading.accepts_extension("pgm"));
        assert!(!config.loading.accepts_extension("json"));
    }
}
