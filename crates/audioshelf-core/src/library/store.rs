/// Library persistence: the records a frontend keeps between scans.
///
/// A store holds the configured scan folders and the books from the last
/// scan. Each scan replaces the whole book list; there is no merging.
use crate::model::Book;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by a [`LibraryStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scan folder: {0:?}")]
    InvalidScanFolder(String),

    #[error("Invalid book: {0}")]
    InvalidBook(String),

    #[error("File belongs to more than one book: {}", .0.display())]
    DuplicateFile(PathBuf),
}

/// A folder the user asked to be scanned for books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFolder {
    pub path: PathBuf,
}

impl ScanFolder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Everything a store persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryData {
    #[serde(default)]
    pub scan_folders: Vec<ScanFolder>,
    #[serde(default)]
    pub books: Vec<Book>,
    /// When `books` was last replaced by a scan.
    #[serde(default)]
    pub last_scan: Option<DateTime<Utc>>,
}

/// Storage for scan folders and scan results.
///
/// Methods take `&self`; implementations synchronise internally so a store
/// can be shared between a UI thread and a scan worker.
pub trait LibraryStore {
    /// Configured scan folders, in the order they were added.
    fn scan_folders(&self) -> Result<Vec<ScanFolder>, StoreError>;

    /// Add a scan folder. Returns `false` when the exact path is already
    /// configured.
    fn add_scan_folder(&self, path: &Path) -> Result<bool, StoreError>;

    /// Remove a scan folder. Returns `false` when it was not configured.
    fn remove_scan_folder(&self, path: &Path) -> Result<bool, StoreError>;

    /// Books from the last scan.
    fn books(&self) -> Result<Vec<Book>, StoreError>;

    /// Replace all stored books with `books` and stamp the scan time.
    fn replace_books(&self, books: Vec<Book>) -> Result<(), StoreError>;

    /// When the books were last replaced, if ever.
    fn last_scan(&self) -> Result<Option<DateTime<Utc>>, StoreError>;
}

/// Non-persistent store, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryLibraryStore {
    state: RwLock<LibraryData>,
}

impl MemoryLibraryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LibraryStore for MemoryLibraryStore {
    fn scan_folders(&self) -> Result<Vec<ScanFolder>, StoreError> {
        Ok(self.state.read().scan_folders.clone())
    }

    fn add_scan_folder(&self, path: &Path) -> Result<bool, StoreError> {
        insert_scan_folder(&mut self.state.write(), path)
    }

    fn remove_scan_folder(&self, path: &Path) -> Result<bool, StoreError> {
        delete_scan_folder(&mut self.state.write(), path)
    }

    fn books(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.state.read().books.clone())
    }

    fn replace_books(&self, books: Vec<Book>) -> Result<(), StoreError> {
        validate_books(&books)?;
        let mut state = self.state.write();
        state.books = books;
        state.last_scan = Some(Utc::now());
        Ok(())
    }

    fn last_scan(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self.state.read().last_scan)
    }
}

/// Add `path` to `data`. Shared by the store implementations.
pub(crate) fn insert_scan_folder(data: &mut LibraryData, path: &Path) -> Result<bool, StoreError> {
    checked_folder_path(path)?;
    if data.scan_folders.iter().any(|f| f.path == path) {
        return Ok(false);
    }
    data.scan_folders.push(ScanFolder::new(path));
    Ok(true)
}

/// Remove `path` from `data`. Shared by the store implementations.
pub(crate) fn delete_scan_folder(data: &mut LibraryData, path: &Path) -> Result<bool, StoreError> {
    checked_folder_path(path)?;
    let before = data.scan_folders.len();
    data.scan_folders.retain(|f| f.path != path);
    Ok(data.scan_folders.len() != before)
}

/// Reject a blank path.
fn checked_folder_path(path: &Path) -> Result<(), StoreError> {
    let text = path.to_string_lossy();
    if text.trim().is_empty() {
        return Err(StoreError::InvalidScanFolder(text.into_owned()));
    }
    Ok(())
}

/// Every book needs a caption and a folder, and no file may appear twice.
pub(crate) fn validate_books(books: &[Book]) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for book in books {
        if book.caption.trim().is_empty() {
            return Err(StoreError::InvalidBook(format!(
                "blank caption for {}",
                book.folder_path.display()
            )));
        }
        if book.folder_path.as_os_str().is_empty() {
            return Err(StoreError::InvalidBook(format!(
                "blank folder path for {:?}",
                book.caption
            )));
        }
        for file in &book.files {
            if !seen.insert(file.file_path.as_path()) {
                return Err(StoreError::DuplicateFile(file.file_path.clone()));
            }
        }
    }
    Ok(())
}
