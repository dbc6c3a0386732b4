//! Episode producers.

use log::debug;

use super::{ObstacleOutline, OrcaConfig};
use crate::core::Episode;

/// Anything that can produce episodes for an environment.
///
/// Call order: [`prepare_obstacles`](Self::prepare_obstacles), then
/// [`spawn_agents`](Self::spawn_agents), then
/// [`collect_trajectories`](Self::collect_trajectories).
pub trait EpisodeSource {
    /// Register the static obstacles of the environment.
    fn prepare_obstacles(&mut self, obstacles: &[ObstacleOutline]);

    /// Place agents; returns how many were spawned.
    fn spawn_agents(&mut self, config: &OrcaConfig) -> usize;

    /// Run (or replay) up to `num_episodes` episodes. 0 means all available.
    fn collect_trajectories(&mut self, num_episodes: usize) -> Vec<Episode>;
}

/// Replays recorded episodes, no agent dynamics involved.
#[derive(Clone, Debug, Default)]
pub struct RecordedSource {
    episodes: Vec<Episode>,
    cursor: usize,
    agents: usize,
    obstacles: usize,
}

impl RecordedSource {
    /// Wrap recorded episodes
    pub fn new(episodes: Vec<Episode>) -> Self {
        Self {
            episodes,
            ..Self::default()
        }
    }

    /// Episodes not replayed yet
    pub fn remaining(&self) -> usize {
        self.episodes.len() - self.cursor
    }

    /// Obstacle outlines received by the last `prepare_obstacles`
    pub fn obstacle_count(&self) -> usize {
        self.obstacles
    }
}

impl EpisodeSource for RecordedSource {
    fn prepare_obstacles(&mut self, obstacles: &[ObstacleOutline]) {
        self.obstacles = obstacles.len();
    }

    fn spawn_agents(&mut self, config: &OrcaConfig) -> usize {
        self.agents = config.num_agents;
        self.agents
    }

    fn collect_trajectories(&mut self, num_episodes: usize) -> Vec<Episode> {
        let end = if num_episodes == 0 {
            self.episodes.len()
        } else {
            (self.cursor + num_episodes).min(self.episodes.len())
        };
        let agents = self.agents;
        let batch: Vec<Episode> = self.episodes[self.cursor..end]
            .iter()
            .map(|episode| Episode::new(episode.paths.iter().take(agents).cloned().collect()))
            .collect();
        debug!(
            "Replayed {} episodes ({} agents each at most)",
            batch.len(),
            agents
        );
        self.cursor = end;
        batch
    }
}
