//! Multi-map aggregation.
//!
//! [`Aggregator`] owns every [`Environment`] of a run, keyed by map name.
//! Maps come from an image directory, episodes from a JSON directory (or an
//! [`EpisodeSource`]), and counts are computed for all maps in parallel.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;

use crate::config::{ConfigError, LoadingSection};
use crate::environment::{AccumulationReport, Environment, EnvironmentSettings};
use crate::error::{OpamError, Result};
use crate::io::{load_episodes, load_raster};
use crate::simulation::{EpisodeSource, OrcaConfig, obstacle_outlines};

/// Registry of environments keyed by map name.
#[derive(Debug, Default)]
pub struct Aggregator {
    environments: BTreeMap<String, Environment>,
}

impl Aggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an environment under its name, returning any replaced one.
    pub fn insert(&mut self, environment: Environment) -> Option<Environment> {
        self.environments
            .insert(environment.name().to_string(), environment)
    }

    /// Environment by name
    pub fn get(&self, name: &str) -> Option<&Environment> {
        self.environments.get(name)
    }

    /// Mutable environment by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Environment> {
        self.environments.get_mut(name)
    }

    /// Map names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.environments.keys().map(String::as_str)
    }

    /// Iterate environments in name order
    pub fn iter(&self) -> impl Iterator<Item = &Environment> {
        self.environments.values()
    }

    /// Number of environments
    pub fn len(&self) -> usize {
        self.environments.len()
    }

    /// True if no environment is registered
    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    /// Load every map image in `dir` with a default extension.
    ///
    /// Returns the number of maps loaded.
    pub fn load_maps<P: AsRef<Path>>(
        &mut self,
        dir: P,
        settings: &EnvironmentSettings,
    ) -> Result<usize> {
        self.load_maps_with(dir, settings, &LoadingSection::default())
    }

    /// Load every image in `dir` accepted by the loading section.
    ///
    /// Each map is named after its file stem.
    pub fn load_maps_with<P: AsRef<Path>>(
        &mut self,
        dir: P,
        settings: &EnvironmentSettings,
        loading: &LoadingSection,
    ) -> Result<usize> {
        if loading.map_extensions.is_empty() {
            return Err(ConfigError::Empty("loading.map_extensions").into());
        }

        let mut loaded = 0;
        for path in sorted_files(dir.as_ref())? {
            let accepted = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| loading.accepts_extension(ext));
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !accepted {
                continue;
            }

            let raster = load_raster(&path, settings.obstacle_label)?;
            let environment = Environment::new(name, raster, settings.clone())?;
            if self.insert(environment).is_some() {
                warn!("Map {} loaded twice, keeping {}", name, path.display());
            }
            loaded += 1;
        }
        info!("Loaded {} maps from {}", loaded, dir.as_ref().display());
        Ok(loaded)
    }

    /// Attach episodes from the `.json` files in `dir`.
    ///
    /// A file belongs to the map whose name is the longest prefix of the
    /// file name. Files are read in name order and their episodes appended,
    /// each file truncated to `num_episodes` (0 = all). Returns the number
    /// of episodes attached per map.
    pub fn load_episodes<P: AsRef<Path>>(
        &mut self,
        dir: P,
        num_episodes: usize,
    ) -> Result<BTreeMap<String, usize>> {
        let mut files: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for path in sorted_files(dir.as_ref())? {
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            let owner = self
                .environments
                .keys()
                .filter(|name| file_name.starts_with(name.as_str()))
                .max_by_key(|name| name.len());
            if let Some(owner) = owner {
                files.entry(owner.clone()).or_default().push(path);
            }
        }

        let mut attached = BTreeMap::new();
        for (name, environment) in &mut self.environments {
            let Some(paths) = files.get(name) else {
                warn!("No episode file found for map {}", name);
                attached.insert(name.clone(), 0);
                continue;
            };
            let mut count = 0;
            for path in paths {
                let episodes = load_episodes(path, num_episodes)?;
                count += episodes.len();
                environment.extend_episodes(episodes);
            }
            info!("Loaded {} episodes for {}", count, name);
            attached.insert(name.clone(), count);
        }
        Ok(attached)
    }

    /// Compute visitation counts for every map, maps in parallel.
    pub fn compute_visitation_counts(&mut self) -> BTreeMap<String, AccumulationReport> {
        self.environments
            .par_iter_mut()
            .map(|(name, environment)| (name.clone(), environment.compute_visitation_counts()))
            .collect()
    }

    /// Produce episodes for one map with an episode source and attach them.
    ///
    /// Returns the number of episodes attached.
    pub fn simulate_episodes(
        &mut self,
        map_name: &str,
        source: &mut dyn EpisodeSource,
        config: &OrcaConfig,
        num_episodes: usize,
    ) -> Result<usize> {
        config.validate()?;
        let environment = self
            .environments
            .get_mut(map_name)
            .ok_or_else(|| OpamError::UnknownMap(map_name.to_string()))?;

        let outlines = obstacle_outlines(environment.raster(), environment.transform());
        source.prepare_obstacles(&outlines);
        let agents = source.spawn_agents(config);
        if agents == 0 {
            return Err(OpamError::Simulation(format!(
                "no agents spawned in {}",
                map_name
            )));
        }

        let episodes = source.collect_trajectories(num_episodes);
        let count = episodes.len();
        environment.extend_episodes(episodes);
        info!(
            "Simulated {} episodes for {} ({} agents, {} obstacle outlines)",
            count,
            map_name,
            agents,
            outlines.len()
        );
        Ok(count)
    }
}

/// Regular files in a directory, sorted by path.
fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Episode, WorldPoint};
    use crate::grid::TraversabilityMap;
    use crate::simulation::RecordedSource;

    fn environment(name: &str) -> Environment {
        let raster = TraversabilityMap::free(20, 20, 0).unwrap();
        Environment::new(name, raster, EnvironmentSettings::default()).unwrap()
    }

    fn crossing() -> Episode {
        Episode::new(vec![vec![WorldPoint::new(-0.3, 0.0), WorldPoint::new(0.3, 0.0)]])
    }

    #[test]
    fn test_registry() {
        let mut aggregator = Aggregator::new();
        assert!(aggregator.is_empty());
        aggregator.insert(environment("b"));
        aggregator.insert(environment("a"));
        assert_eq!(aggregator.len(), 2);
        assert_eq!(aggregator.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(aggregator.get("a").is_some());
        assert!(aggregator.get("c").is_none());
        assert!(aggregator.insert(environment("a")).is_some());
    }

    #[test]
    fn test_compute_all_maps() {
        let mut aggregator = Aggregator::new();
        aggregator.insert(environment("a"));
        aggregator.insert(environment("b"));
        aggregator
            .get_mut("a")
            .unwrap()
            .set_episodes(vec![crossing(), crossing()]);

        let reports = aggregator.compute_visitation_counts();
        assert_eq!(reports["a"].episodes_committed, 2);
        assert_eq!(reports["b"].episodes_committed, 0);
        assert_eq!(aggregator.get("a").unwrap().visitation_counts().max(), 2);
        assert_eq!(aggregator.get("b").unwrap().visitation_counts().total(), 0);
    }

    #[test]
    fn test_simulate_with_recorded_source() {
        let mut aggregator = Aggregator::new();
        aggregator.insert(environment("room"));
        let mut source = RecordedSource::new(vec![crossing(); 4]);
        let count = aggregator
            .simulate_episodes("room", &mut source, &OrcaConfig::default(), 3)
            .unwrap();
        assert_eq!(count, 3);
        assert_eq!(aggregator.get("room").unwrap().episodes().len(), 3);
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_simulate_unknown_map() {
        let mut aggregator = Aggregator::new();
        let mut source = RecordedSource::default();
        let result =
            aggregator.simulate_episodes("nowhere", &mut source, &OrcaConfig::default(), 1);
        assert!(matches!(result, Err(OpamError::UnknownMap(_))));
    }

    #[test]
    fn test_simulate_rejects_invalid_config() {
        let mut aggregator = Aggregator::new();
        aggregator.insert(environment("room"));
        let config = OrcaConfig {
            time_step: -1.0,
            ..Default::default()
        };
        let mut source = RecordedSource::default();
        let result = aggregator.simulate_episodes("room", &mut source, &config, 1);
        assert!(matches!(result, Err(OpamError::Config(_))));
    }
}
