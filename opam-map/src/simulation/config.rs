//! ORCA crowd simulator options.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Options understood by an ORCA (reciprocal velocity obstacle) simulator.
///
/// Times in seconds, distances in meters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrcaConfig {
    /// Simulation step
    #[serde(default = "crate::config::defaults::time_step")]
    pub time_step: f64,

    /// Distance within which other agents are considered
    #[serde(default = "crate::config::defaults::neighbor_dist")]
    pub neighbor_dist: f64,

    /// Maximum number of neighbours taken into account
    #[serde(default = "crate::config::defaults::max_neighbors")]
    pub max_neighbors: usize,

    /// Lookahead for agent-agent avoidance
    #[serde(default = "crate::config::defaults::time_horizon")]
    pub time_horizon: f64,

    /// Lookahead for agent-obstacle avoidance
    #[serde(default = "crate::config::defaults::time_horizon_obst")]
    pub time_horizon_obst: f64,

    /// Agent radius
    #[serde(default = "crate::config::defaults::orca_radius")]
    pub radius: f64,

    /// Maximum agent speed (m/s)
    #[serde(default = "crate::config::defaults::max_speed")]
    pub max_speed: f64,

    /// Agents per episode
    #[serde(default = "crate::config::defaults::num_agents")]
    pub num_agents: usize,
}

impl Default for OrcaConfig {
    fn default() -> Self {
        Self {
            time_step: 1.0 / 60.0,
            neighbor_dist: 1.5,
            max_neighbors: 5,
            time_horizon: 1.5,
            time_horizon_obst: 2.0,
            radius: 0.4,
            max_speed: 2.0,
            num_agents: 5,
        }
    }
}

impl OrcaConfig {
    /// Every float option must be positive and finite, every count non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("simulation.time_step", self.time_step),
            ("simulation.neighbor_dist", self.neighbor_dist),
            ("simulation.time_horizon", self.time_horizon),
            ("simulation.time_horizon_obst", self.time_horizon_obst),
            ("simulation.radius", self.radius),
            ("simulation.max_speed", self.max_speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("simulation.max_neighbors", self.max_neighbors),
            ("simulation.num_agents", self.num_agents),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { field, value });
            }
        }
        Ok(())
    }
}
