//! Input loading section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Map and episode loading settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoadingSection {
    /// Episodes to keep per episode file (0 = all)
    #[serde(default)]
    pub num_episodes: usize,

    /// Image extensions recognised as maps (lowercase, no dot)
    #[serde(default = "defaults::map_extensions")]
    pub map_extensions: Vec<String>,
}

impl Default for LoadingSection {
    fn default() -> Self {
        Self {
            num_episodes: 0,
            map_extensions: defaults::map_extensions(),
        }
    }
}

impl LoadingSection {
    /// Does a file extension name a map image? Case-insensitive.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.map_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}
