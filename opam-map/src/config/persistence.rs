//! Output persistence section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Where and what to write after accumulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistenceSection {
    /// Output directory
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,

    /// Write `<map>_visitation.png`
    #[serde(default = "defaults::enabled")]
    pub export_png: bool,

    /// Write `<map>.opamv` raw counts
    #[serde(default = "defaults::enabled")]
    pub export_counts: bool,
}

impl Default for PersistenceSection {
    fn default() -> Self {
        Self {
            output_dir: defaults::output_dir(),
            export_png: true,
            export_counts: true,
        }
    }
}

impl PersistenceSection {
    /// Output directory as a path
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }
}
