/// AudioShelf Core: folder scanning, book matching, and library storage.
///
/// This crate contains all business logic with zero UI dependencies.
/// It is designed to be reusable across different frontends (CLI, GUI, TUI).
///
/// # Modules
///
/// - [`config`]: Audio/image extension sets.
/// - [`model`]: Arena-allocated folder tree and the book records.
/// - [`scanner`]: Folder-tree building, scan orchestration, background scans.
/// - [`matcher`]: Flat-folder, chapter and single-file book matchers.
/// - [`library`]: Scan-folder and book persistence, library refresh.
/// - [`export`]: JSON, CSV and text output of book lists.
pub mod config;
pub mod export;
pub mod library;
pub mod matcher;
pub mod model;
pub mod scanner;

pub use config::ScanConfig;
pub use model::{Book, BookFile};
pub use scanner::progress::{ScanIssue, ScanReport};
pub use scanner::{scan_roots, search_books, start_scan};
