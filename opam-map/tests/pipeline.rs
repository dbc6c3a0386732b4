//! Directory loading, aggregation and export round trips.

mod common;

use common::{crossing_episodes, room_rows, write_file, write_map_image};
use opam_map::core::PixelCoord;
use opam_map::io::{load_counts, load_episodes, load_raster, save_counts, save_episodes};
use opam_map::config::LoadingSection;
use opam_map::{Aggregator, ConfigError, EnvironmentSettings, OpamConfig, OpamError};
use tempfile::TempDir;

fn room_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let rows = room_rows();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    write_map_image(dir.path(), "room.png", &rows);
    write_map_image(dir.path(), "room_large.PNG", &rows);
    write_file(dir.path(), "notes.txt", "not a map");
    dir
}

#[test]
fn load_maps_by_extension() {
    let maps = room_dir();
    let mut aggregator = Aggregator::new();
    let loaded = aggregator
        .load_maps(maps.path(), &EnvironmentSettings::default())
        .unwrap();
    assert_eq!(loaded, 2);
    assert_eq!(
        aggregator.names().collect::<Vec<_>>(),
        vec!["room", "room_large"]
    );

    let room = aggregator.get("room").unwrap();
    assert_eq!(room.dimensions(), (40, 40));
    assert!(room.raster().is_obstacle(PixelCoord::new(5, 15)));
    assert!(!room.raster().is_obstacle(PixelCoord::new(6, 15)));
}

#[test]
fn load_maps_follows_configured_extensions() {
    let maps = room_dir();
    let settings = EnvironmentSettings::default();
    let loading = LoadingSection {
        map_extensions: vec!["PNG".to_string()],
        ..Default::default()
    };
    let mut aggregator = Aggregator::new();
    // Matching ignores case on both sides
    assert_eq!(aggregator.load_maps_with(maps.path(), &settings, &loading).unwrap(), 2);

    let only_bmp = LoadingSection {
        map_extensions: vec!["bmp".to_string()],
        ..Default::default()
    };
    let mut aggregator = Aggregator::new();
    assert_eq!(aggregator.load_maps_with(maps.path(), &settings, &only_bmp).unwrap(), 0);

    let none = LoadingSection {
        map_extensions: Vec::new(),
        ..Default::default()
    };
    assert!(matches!(
        Aggregator::new().load_maps_with(maps.path(), &settings, &none),
        Err(OpamError::Config(ConfigError::Empty("loading.map_extensions")))
    ));
}

#[test]
fn invalid_map_labels_fail_loading() {
    let dir = TempDir::new().unwrap();
    let mut img = image::GrayImage::from_pixel(8, 8, image::Luma([255]));
    img.put_pixel(1, 1, image::Luma([0]));
    img.put_pixel(2, 2, image::Luma([90]));
    let path = dir.path().join("noisy.png");
    img.save(&path).unwrap();

    assert!(matches!(
        load_raster(&path, 0),
        Err(OpamError::InvalidRaster(_))
    ));
}

#[test]
fn episodes_attach_by_longest_prefix() {
    let maps = room_dir();
    let episodes = TempDir::new().unwrap();
    save_episodes(episodes.path().join("room_0.json"), &crossing_episodes(2)).unwrap();
    save_episodes(episodes.path().join("room_1.json"), &crossing_episodes(3)).unwrap();
    save_episodes(episodes.path().join("room_large_0.json"), &crossing_episodes(4)).unwrap();
    write_file(episodes.path(), "room_notes.txt", "ignored");

    let mut aggregator = Aggregator::new();
    aggregator
        .load_maps(maps.path(), &EnvironmentSettings::default())
        .unwrap();
    let attached = aggregator.load_episodes(episodes.path(), 0).unwrap();

    assert_eq!(attached["room"], 5);
    assert_eq!(attached["room_large"], 4);
    assert_eq!(aggregator.get("room").unwrap().episodes().len(), 5);
}

#[test]
fn episode_limit_applies_per_file() {
    let maps = room_dir();
    let episodes = TempDir::new().unwrap();
    save_episodes(episodes.path().join("room_0.json"), &crossing_episodes(6)).unwrap();

    let mut aggregator = Aggregator::new();
    aggregator
        .load_maps(maps.path(), &EnvironmentSettings::default())
        .unwrap();
    let attached = aggregator.load_episodes(episodes.path(), 2).unwrap();
    assert_eq!(attached["room"], 2);
    assert_eq!(attached["room_large"], 0);
}

#[test]
fn python_style_nan_files_load() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "hall_episodes.json",
        r#"{"episodes": [{"pedestrians": [
            {"path": [[0.0, 0.0], [NaN, NaN], [1.0, 0.0]], "id": 3}
        ]}]}"#,
    );
    let episodes = load_episodes(&path, 0).unwrap();
    assert_eq!(episodes.len(), 1);
    assert!(episodes[0].paths[0][1].is_missing());
}

#[test]
fn malformed_episode_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "broken.json", "{\"episodes\": [");
    match load_episodes(&path, 0) {
        Err(OpamError::Json { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected JSON error, got {:?}", other),
    }
}

#[test]
fn full_run_exports_counts() {
    let maps = room_dir();
    let episodes = TempDir::new().unwrap();
    save_episodes(episodes.path().join("room_0.json"), &crossing_episodes(3)).unwrap();
    let output = TempDir::new().unwrap();

    let mut aggregator = Aggregator::new();
    aggregator
        .load_maps(maps.path(), &EnvironmentSettings::default())
        .unwrap();
    aggregator.load_episodes(episodes.path(), 0).unwrap();
    let reports = aggregator.compute_visitation_counts();
    assert_eq!(reports["room"].episodes_committed, 3);
    assert!(reports["room"].is_clean());

    let room = aggregator.get("room").unwrap();
    let counts_path = output.path().join("room.opamv");
    save_counts(room.visitation_counts(), &counts_path).unwrap();
    let reloaded = load_counts(&counts_path).unwrap();
    assert_eq!(&reloaded, room.visitation_counts());

    let png_path = output.path().join("room_visitation.png");
    let img = opam_map::io::render_visitation(room.raster(), room.visitation_counts());
    opam_map::io::save_png(&img, &png_path).unwrap();
    let back = image::open(&png_path).unwrap().into_luma8();
    assert_eq!(back.dimensions(), (40, 40));
    // Wall pixel untouched, busiest pixel saturated
    assert_eq!(back.get_pixel(15, 5)[0], 0);
    assert!(back.pixels().any(|p| p[0] == 255));
}

#[test]
fn config_file_drives_settings() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "config.yaml",
        "environment:\n  pix_per_meter: 20.0\n  agent_radius: 0.5\nloading:\n  num_episodes: 7\n",
    );
    let config = OpamConfig::load(&path).unwrap();
    assert_eq!(config.loading.num_episodes, 7);

    let settings = config.to_environment_settings();
    assert_eq!(settings.pix_per_meter, 20.0);
    // 0.5 m at 20 px/m: radius_px = 1.0
    let mask = opam_map::FootprintMask::new(
        settings.agent_radius,
        settings.pix_per_meter,
        settings.reference_scale,
    );
    assert_eq!(mask.diameter(), 2);
}
