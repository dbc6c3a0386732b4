//! Trajectory containers.
//!
//! An [`Episode`] is one multi-agent recording: every agent [`Path`] is
//! sampled at the same timesteps, so all paths of an episode must have the
//! same number of samples (missing samples are NaN, not dropped).

use crate::core::WorldPoint;
use crate::error::EpisodeError;

/// World-coordinate samples of one agent during one episode.
pub type Path = Vec<WorldPoint>;

/// Per-agent paths recorded at synchronized timesteps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Episode {
    /// One path per agent
    pub paths: Vec<Path>,
}

impl Episode {
    /// Create an episode from per-agent paths.
    pub fn new(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    /// Number of agents in the episode
    pub fn agent_count(&self) -> usize {
        self.paths.len()
    }

    /// Number of timesteps (length of the first path, 0 when empty).
    pub fn timesteps(&self) -> usize {
        self.paths.first().map_or(0, Vec::len)
    }

    /// Check that every path has the same number of samples.
    ///
    /// An episode without agents is consistent.
    pub fn check_path_lengths(&self) -> Result<(), EpisodeError> {
        let expected = self.timesteps();
        match self
            .paths
            .iter()
            .enumerate()
            .find(|(_, path)| path.len() != expected)
        {
            Some((agent, path)) => Err(EpisodeError::PathLengthMismatch {
                agent,
                expected,
                found: path.len(),
            }),
            None => Ok(()),
        }
    }
}

impl From<Vec<Path>> for Episode {
    fn from(paths: Vec<Path>) -> Self {
        Self::new(paths)
    }
}
