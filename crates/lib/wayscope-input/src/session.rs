//! In-memory session over one loaded record file.

use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;
use thiserror::Error;

use wayscope_core::decoder::decode_scenario;
use wayscope_core::scenario::Scenario;
use wayscope_wire::record::{decode_scenario as decode_frame, RecordError, RecordReader};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("scenario {index} is outside the loaded range of {count}")]
    NotFound { index: usize, count: usize },
    #[error("malformed record in {path}: {source}")]
    MalformedRecord { path: PathBuf, source: RecordError },
}

/// One row of the loaded-file listing.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub index: usize,
    pub scenario_id: String,
    pub track_count: usize,
    pub timestep_count: usize,
}

struct SessionEntry {
    scenario: Scenario,
    // Counts every track in the source message, including those the class
    // bucketing drops.
    track_count: usize,
}

/// An ordered sequence of decoded scenarios from one source file, loaded
/// once at construction and immutable afterwards. Switching files means
/// constructing a new session and discarding this one.
pub struct DatasetSession {
    path: PathBuf,
    entries: Vec<SessionEntry>,
}

impl DatasetSession {
    /// Reads records sequentially from the start of `path`, decoding at most
    /// `cap` scenarios. A shorter file simply yields fewer scenarios; a
    /// malformed record is fatal for the whole load.
    pub fn load(path: &Path, cap: usize) -> Result<Self, SessionError> {
        let wrap = |source: RecordError| SessionError::MalformedRecord {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = RecordReader::open(path).map_err(wrap)?;
        let mut entries = Vec::new();
        while entries.len() < cap {
            let payload = match reader.next() {
                Some(frame) => frame.map_err(wrap)?,
                None => break,
            };
            let message = decode_frame(&payload).map_err(wrap)?;
            entries.push(SessionEntry {
                track_count: message.tracks.len(),
                scenario: decode_scenario(&message),
            });
        }
        info!(
            "Loaded {} scenarios from {}.",
            entries.len(),
            path.display()
        );
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Summary rows in load order; recomputed on each call.
    pub fn summaries(&self) -> impl Iterator<Item = ScenarioSummary> + '_ {
        self.entries.iter().enumerate().map(|(index, entry)| {
            ScenarioSummary {
                index,
                scenario_id: entry.scenario.scenario_id.clone(),
                track_count: entry.track_count,
                timestep_count: entry.scenario.timestamps.len(),
            }
        })
    }

    pub fn get(&self, index: usize) -> Result<&Scenario, SessionError> {
        self.entries
            .get(index)
            .map(|entry| &entry.scenario)
            .ok_or(SessionError::NotFound {
                index,
                count: self.entries.len(),
            })
    }
}
