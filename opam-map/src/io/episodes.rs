//! Episode JSON files.
//!
//! Layout:
//!
//! ```json
//! {"episodes": [{"pedestrians": [{"path": [[x, y], [x, y], ...]}, ...]}, ...]}
//! ```
//!
//! Missing samples are written as `null` (a whole sample or one coordinate).
//! Files produced by Python's `json` module use bare `NaN` tokens instead;
//! those are read as missing too. Bare `Infinity` tokens become `±1e308`,
//! which lands off-raster exactly like an infinite in-memory coordinate.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path as FsPath;

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::{Episode, WorldPoint};
use crate::error::{OpamError, Result};

type Sample = Option<[Option<f64>; 2]>;

#[derive(Serialize, Deserialize)]
struct EpisodeFile {
    episodes: Vec<EpisodeRecord>,
}

#[derive(Serialize, Deserialize)]
struct EpisodeRecord {
    pedestrians: Vec<PedestrianRecord>,
}

#[derive(Serialize, Deserialize)]
struct PedestrianRecord {
    path: Vec<Sample>,
}

fn decode_sample(sample: Sample) -> WorldPoint {
    match sample {
        Some([x, y]) => WorldPoint::new(x.unwrap_or(f64::NAN), y.unwrap_or(f64::NAN)),
        None => WorldPoint::MISSING,
    }
}

/// Finite stand-in for an infinite coordinate.
const FAR: f64 = 1.0e308;

fn encode_coordinate(value: f64) -> f64 {
    // serde_json writes infinities as null
    if value.is_infinite() {
        FAR.copysign(value)
    } else {
        value
    }
}

fn encode_sample(point: &WorldPoint) -> Sample {
    if point.is_missing() {
        None
    } else {
        Some([
            Some(encode_coordinate(point.x)),
            Some(encode_coordinate(point.y)),
        ])
    }
}

/// Non-finite literals accepted outside strings and their JSON replacement.
const NON_FINITE_TOKENS: [(&str, &str); 6] = [
    ("-Infinity", "-1e308"),
    ("+Infinity", "1e308"),
    ("Infinity", "1e308"),
    ("-NaN", "null"),
    ("+NaN", "null"),
    ("NaN", "null"),
];

/// Replace bare `NaN` tokens with `null` and `Infinity` with `±1e308`.
///
/// String contents are left alone. Borrows the input when nothing changes.
pub fn sanitize_non_finite(json: &str) -> Cow<'_, str> {
    if !json.contains("NaN") && !json.contains("Infinity") {
        return Cow::Borrowed(json);
    }

    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = json;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some((token, replacement)) =
            NON_FINITE_TOKENS.iter().find(|(t, _)| rest.starts_with(*t))
        {
            out.push_str(replacement);
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    Cow::Owned(out)
}

/// Parse an episode document, keeping the first `num_episodes` (0 = all).
pub fn parse_episodes(
    json: &str,
    num_episodes: usize,
) -> std::result::Result<Vec<Episode>, serde_json::Error> {
    let file: EpisodeFile = serde_json::from_str(&sanitize_non_finite(json))?;
    let limit = if num_episodes == 0 {
        file.episodes.len()
    } else {
        num_episodes
    };

    Ok(file
        .episodes
        .into_iter()
        .take(limit)
        .map(|record| {
            Episode::new(
                record
                    .pedestrians
                    .into_iter()
                    .map(|ped| ped.path.into_iter().map(decode_sample).collect())
                    .collect(),
            )
        })
        .collect())
}

/// Load episodes from a JSON file.
pub fn load_episodes<P: AsRef<FsPath>>(path: P, num_episodes: usize) -> Result<Vec<Episode>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let episodes = parse_episodes(&contents, num_episodes).map_err(|source| OpamError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {} episodes from {}", episodes.len(), path.display());
    Ok(episodes)
}

/// Serialize episodes to the JSON layout, missing samples as `null`.
pub fn episodes_to_json(episodes: &[Episode]) -> std::result::Result<String, serde_json::Error> {
    serde_json::to_string(&to_file(episodes))
}

/// Write episodes to a JSON file.
pub fn save_episodes<P: AsRef<FsPath>>(path: P, episodes: &[Episode]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &to_file(episodes)).map_err(|source| OpamError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush()?;
    Ok(())
}

fn to_file(episodes: &[Episode]) -> EpisodeFile {
    EpisodeFile {
        episodes: episodes
            .iter()
            .map(|episode| EpisodeRecord {
                pedestrians: episode
                    .paths
                    .iter()
                    .map(|path| PedestrianRecord {
                        path: path.iter().map(encode_sample).collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}
