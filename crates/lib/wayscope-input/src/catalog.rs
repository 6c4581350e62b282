//! On-disk dataset discovery: folders, files, sizes, and name search.

use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;
use typed_builder::TypedBuilder;

/// Rows returned per page by file listing and search.
pub const PAGE_SIZE: usize = 50;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("dataset folder not found: {0}")]
    FolderNotFound(String),
    #[error("i/o failure while scanning dataset tree: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct FolderEntry {
    pub name: String,
    pub path: String,
    pub file_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    pub size_mb: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilePage {
    pub folder: String,
    pub files: Vec<FileEntry>,
    pub total_count: usize,
    pub offset: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub file_name: String,
    pub folder: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub results: Vec<SearchHit>,
    pub total: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Catalog over one dataset root. Record files are recognized by a name
/// marker, ".tfrecord" unless configured otherwise.
#[derive(Debug, Clone, TypedBuilder)]
pub struct DatasetCatalog {
    root: PathBuf,
    #[builder(default = String::from(".tfrecord"))]
    marker: String,
}

impl DatasetCatalog {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Immediate subdirectories of the root holding at least one record
    /// file, sorted by name.
    pub fn folders(&self) -> Result<Vec<FolderEntry>, CatalogError> {
        let mut folders = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let file_count = self.record_paths(&path)?.len();
            if file_count == 0 {
                continue;
            }
            folders.push(FolderEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: path.to_string_lossy().into_owned(),
                file_count,
            });
        }
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(folders)
    }

    /// One page of a folder's record files, sorted by name.
    pub fn files(&self, folder: &str, offset: usize) -> Result<FilePage, CatalogError> {
        let folder_path = self.root.join(folder);
        if !folder_path.is_dir() {
            return Err(CatalogError::FolderNotFound(folder.to_owned()));
        }
        let paths = self.record_paths(&folder_path)?;
        let total_count = paths.len();
        let files = paths
            .into_iter()
            .skip(offset)
            .take(PAGE_SIZE)
            .map(|path| file_entry(&path))
            .collect::<Result<Vec<_>, std::io::Error>>()?;
        Ok(FilePage {
            folder: folder.to_owned(),
            files,
            total_count,
            offset,
            has_more: offset + PAGE_SIZE < total_count,
        })
    }

    /// Case-insensitive substring search over record file names across all
    /// folders, sorted by file name. An empty query yields an empty page.
    pub fn search(&self, query: &str, offset: usize) -> Result<SearchPage, CatalogError> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(SearchPage {
                results: Vec::new(),
                total: 0,
                offset,
                has_more: false,
            });
        }
        let mut hits = Vec::new();
        for folder in self.folders()? {
            for path in self.record_paths(Path::new(&folder.path))? {
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if file_name.to_lowercase().contains(&query) {
                    hits.push(SearchHit {
                        file_name,
                        folder: folder.name.clone(),
                        path: path.to_string_lossy().into_owned(),
                    });
                }
            }
        }
        hits.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        let total = hits.len();
        let results: Vec<SearchHit> = hits.into_iter().skip(offset).take(PAGE_SIZE).collect();
        Ok(SearchPage {
            results,
            total,
            offset,
            has_more: offset + PAGE_SIZE < total,
        })
    }

    /// Record files of one directory, sorted by file name.
    pub(crate) fn record_paths(&self, folder_path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
        let paths = std::fs::read_dir(folder_path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .map(|name| name.to_string_lossy().contains(&self.marker))
                        .unwrap_or(false)
            })
            .sorted_by_key(|path| path.file_name().map(|name| name.to_os_string()))
            .collect();
        Ok(paths)
    }
}

fn file_entry(path: &Path) -> Result<FileEntry, std::io::Error> {
    let size_bytes = std::fs::metadata(path)?.len();
    Ok(FileEntry {
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        path: path.to_string_lossy().into_owned(),
        size_mb: display_size_mb(size_bytes),
    })
}

/// File size in megabytes, rounded to one decimal for display. The only
/// place in the system that rounds anything.
fn display_size_mb(size_bytes: u64) -> f64 {
    let size_mb = size_bytes as f64 / (1024.0 * 1024.0);
    (size_mb * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::display_size_mb;

    #[test]
    fn size_rounds_to_one_decimal() {
        assert_eq!(display_size_mb(0), 0.0);
        assert_eq!(display_size_mb(1024 * 1024), 1.0);
        assert_eq!(display_size_mb(1_572_864), 1.5);
        assert_eq!(display_size_mb(123_456_789), 117.7);
    }
}
