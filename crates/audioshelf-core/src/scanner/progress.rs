/// Scan progress reporting: lightweight messages sent from the scan
/// thread to the caller via a crossbeam channel.
use crate::model::Book;
use crate::scanner::listing::ListingError;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// A non-fatal problem met during a scan (e.g. permission denied on one
/// folder). The folder is treated as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanIssue {
    pub path: PathBuf,
    pub message: String,
}

impl From<ListingError> for ScanIssue {
    fn from(err: ListingError) -> Self {
        Self {
            path: err.path,
            message: err.message,
        }
    }
}

/// Everything one scan call produced.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Books in emission order: roots in input order, then flat-folder,
    /// chapter and single-file books within each root.
    pub books: Vec<Book>,
    /// Folders that could not be read.
    pub issues: Vec<ScanIssue>,
    /// Wall-clock time of the whole call.
    pub duration: Duration,
}

impl ScanReport {
    /// Total number of audio files across all books.
    pub fn file_count(&self) -> usize {
        self.books.iter().map(|b| b.files.len()).sum()
    }
}

/// Progress updates sent from the scan thread.
#[derive(Debug)]
pub enum ScanProgress {
    /// Started processing a root.
    RootStarted {
        root: PathBuf,
        /// Zero-based position of the root in the input list.
        index: usize,
        total: usize,
    },
    /// A folder could not be read and was treated as empty.
    Issue(ScanIssue),
    /// Finished a root.
    RootFinished { root: PathBuf, books_found: usize },
    /// Scanning completed. Carries the full report.
    Complete(ScanReport),
}
