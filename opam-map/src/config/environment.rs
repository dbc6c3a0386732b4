//! Environment configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::environment::{BoundaryPolicy, EnvironmentSettings};

/// Raster and footprint settings shared by every map
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnvironmentSection {
    /// Raster resolution (pixels per meter)
    #[serde(default = "defaults::pix_per_meter")]
    pub pix_per_meter: f64,

    /// Agent radius (meters)
    #[serde(default = "defaults::agent_radius")]
    pub agent_radius: f64,

    /// Resolution at which the radius maps 1:1 to pixels
    #[serde(default = "defaults::reference_scale")]
    pub reference_scale: f64,

    /// Raw raster value marking obstacles
    #[serde(default)]
    pub obstacle_label: u8,

    /// Footprint stamps crossing the raster edge: clamp or reject
    #[serde(default)]
    pub boundary: BoundaryPolicy,
}

impl Default for EnvironmentSection {
    fn default() -> Self {
        Self {
            pix_per_meter: defaults::pix_per_meter(),
            agent_radius: defaults::agent_radius(),
            reference_scale: defaults::reference_scale(),
            obstacle_label: 0,
            boundary: BoundaryPolicy::Clamp,
        }
    }
}

impl EnvironmentSection {
    /// Convert to per-environment settings
    pub fn to_settings(&self) -> EnvironmentSettings {
        EnvironmentSettings {
            pix_per_meter: self.pix_per_meter,
            agent_radius: self.agent_radius,
            reference_scale: self.reference_scale,
            obstacle_label: self.obstacle_label,
            boundary: self.boundary,
        }
    }
}
