/// JSON-file library store.
///
/// The whole library lives in one pretty-printed JSON document. Every
/// mutation is applied to a copy, written to `<file>.tmp`, renamed over the
/// real file, and only then committed in memory. A failed write leaves both
/// the file and the in-memory state untouched.
use super::store::{
    delete_scan_folder, insert_scan_folder, validate_books, LibraryData, LibraryStore, ScanFolder,
    StoreError,
};
use crate::model::Book;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A [`LibraryStore`] persisted to a single JSON file.
#[derive(Debug)]
pub struct JsonLibraryStore {
    path: PathBuf,
    state: RwLock<LibraryData>,
}

impl JsonLibraryStore {
    /// Open the store at `path`. A missing file is an empty library; the
    /// file is created on the first change.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => LibraryData::default(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        debug!("Opened library {}", path.display());
        Ok(Self {
            path,
            state: RwLock::new(data),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the state, persist it, then commit.
    fn update<T>(
        &self,
        change: impl FnOnce(&mut LibraryData) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut state = self.state.write();
        let mut next = state.clone();
        let out = change(&mut next)?;
        self.persist(&next)?;
        *state = next;
        Ok(out)
    }

    fn persist(&self, data: &LibraryData) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(data)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let io_err = |source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl LibraryStore for JsonLibraryStore {
    fn scan_folders(&self) -> Result<Vec<ScanFolder>, StoreError> {
        Ok(self.state.read().scan_folders.clone())
    }

    fn add_scan_folder(&self, path: &Path) -> Result<bool, StoreError> {
        // Avoid rewriting the file for a duplicate.
        if !insert_scan_folder(&mut self.state.read().clone(), path)? {
            return Ok(false);
        }
        self.update(|data| insert_scan_folder(data, path))
    }

    fn remove_scan_folder(&self, path: &Path) -> Result<bool, StoreError> {
        self.update(|data| delete_scan_folder(data, path))
    }

    fn books(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.state.read().books.clone())
    }

    fn replace_books(&self, books: Vec<Book>) -> Result<(), StoreError> {
        validate_books(&books)?;
        self.update(|data| {
            data.books = books;
            data.last_scan = Some(Utc::now());
            Ok(())
        })
    }

    fn last_scan(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self.state.read().last_scan)
    }
}
