//! Background-built, searchable index of every scenario ID in the dataset.

use std::sync::{Arc, Mutex};

use log::{error, info, warn};
use serde::Serialize;
use thiserror::Error;

use wayscope_wire::record::{decode_scenario as decode_frame, RecordReader};

use crate::catalog::{DatasetCatalog, PAGE_SIZE};

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("scenario index has not been built yet")]
    NotBuilt,
}

/// Build state machine. A failed pass lands in `Failed` and may be
/// retriggered; per-file failures never fail the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStatus {
    Idle,
    Building,
    Built,
    Failed,
}

/// Outcome of asking the index to start a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStart {
    Started,
    InProgress,
    AlreadyBuilt(usize),
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexEntry {
    pub scenario_id: String,
    pub path: String,
    pub record_index: usize,
    pub folder: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndexSnapshot {
    pub status: IndexStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexSearchPage {
    pub results: Vec<IndexEntry>,
    pub total: usize,
    pub offset: usize,
    pub has_more: bool,
}

struct IndexInner {
    status: IndexStatus,
    entries: Vec<IndexEntry>,
}

/// Shared handle to the scenario index; cheap to clone.
#[derive(Clone)]
pub struct ScenarioIndex {
    inner: Arc<Mutex<IndexInner>>,
}

impl Default for ScenarioIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioIndex {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(IndexInner {
                status: IndexStatus::Idle,
                entries: Vec::new(),
            })),
        }
    }

    pub fn snapshot(&self) -> IndexSnapshot {
        let inner = self.inner.lock().expect("index lock poisoned");
        IndexSnapshot {
            status: inner.status,
            count: inner.entries.len(),
        }
    }

    /// Attempts the `Idle|Failed -> Building` transition. At most one build
    /// is in flight; a finished index is not rebuilt.
    pub fn try_begin(&self) -> BuildStart {
        let mut inner = self.inner.lock().expect("index lock poisoned");
        match inner.status {
            IndexStatus::Building => BuildStart::InProgress,
            IndexStatus::Built => BuildStart::AlreadyBuilt(inner.entries.len()),
            IndexStatus::Idle | IndexStatus::Failed => {
                inner.status = IndexStatus::Building;
                BuildStart::Started
            }
        }
    }

    /// Runs the full-tree pass. Call only after `try_begin` returned
    /// `Started`. Each file's failure is logged and skipped; records decoded
    /// before a broken frame are kept, and the rest of that file is
    /// abandoned since the length-prefixed stream is desynchronized. Only a
    /// failure to enumerate the tree itself fails the pass.
    pub fn run_build(&self, catalog: &DatasetCatalog) {
        let folders = match catalog.folders() {
            Ok(folders) => folders,
            Err(e) => {
                error!("Scenario index build failed to scan the dataset tree: {}", e);
                self.finish(IndexStatus::Failed, Vec::new());
                return;
            }
        };

        let mut entries = Vec::new();
        for folder in folders {
            let paths = match catalog.record_paths(std::path::Path::new(&folder.path)) {
                Ok(paths) => paths,
                Err(e) => {
                    warn!("Skipping folder {}: {}", folder.name, e);
                    continue;
                }
            };
            for path in paths {
                let reader = match RecordReader::open(&path) {
                    Ok(reader) => reader,
                    Err(e) => {
                        warn!("Skipping {}: {}", path.display(), e);
                        continue;
                    }
                };
                for (record_index, frame) in reader.enumerate() {
                    let payload = match frame {
                        Ok(payload) => payload,
                        Err(e) => {
                            warn!(
                                "Abandoning {} after record {}: {}",
                                path.display(),
                                record_index,
                                e
                            );
                            break;
                        }
                    };
                    let message = match decode_frame(&payload) {
                        Ok(message) => message,
                        Err(e) => {
                            warn!(
                                "Abandoning {} after record {}: {}",
                                path.display(),
                                record_index,
                                e
                            );
                            break;
                        }
                    };
                    entries.push(IndexEntry {
                        scenario_id: message.scenario_id().to_owned(),
                        path: path.to_string_lossy().into_owned(),
                        record_index,
                        folder: folder.name.clone(),
                    });
                }
            }
        }

        entries.sort_by(|a, b| a.scenario_id.cmp(&b.scenario_id));
        info!("Scenario index built with {} entries.", entries.len());
        self.finish(IndexStatus::Built, entries);
    }

    fn finish(&self, status: IndexStatus, entries: Vec<IndexEntry>) {
        let mut inner = self.inner.lock().expect("index lock poisoned");
        inner.status = status;
        inner.entries = entries;
    }

    /// Case-insensitive substring search over scenario IDs; entries are
    /// already sorted by ID from the build.
    pub fn search(&self, query: &str, offset: usize) -> Result<IndexSearchPage, IndexError> {
        let inner = self.inner.lock().expect("index lock poisoned");
        if inner.status != IndexStatus::Built {
            return Err(IndexError::NotBuilt);
        }
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(IndexSearchPage {
                results: Vec::new(),
                total: 0,
                offset,
                has_more: false,
            });
        }
        let hits: Vec<&IndexEntry> = inner
            .entries
            .iter()
            .filter(|entry| entry.scenario_id.to_lowercase().contains(&query))
            .collect();
        let total = hits.len();
        let results: Vec<IndexEntry> = hits
            .into_iter()
            .skip(offset)
            .take(PAGE_SIZE)
            .cloned()
            .collect();
        Ok(IndexSearchPage {
            results,
            total,
            offset,
            has_more: offset + PAGE_SIZE < total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{BuildStart, IndexStatus, ScenarioIndex};

    #[test]
    fn build_is_single_flight() {
        let index = ScenarioIndex::new();
        assert_eq!(index.snapshot().status, IndexStatus::Idle);
        assert_eq!(index.try_begin(), BuildStart::Started);
        assert_eq!(index.snapshot().status, IndexStatus::Building);
        assert_eq!(index.try_begin(), BuildStart::InProgress);
    }

    #[test]
    fn searching_before_build_is_rejected() {
        let index = ScenarioIndex::new();
        assert!(index.search("abc", 0).is_err());
    }
}
