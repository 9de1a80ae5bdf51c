/// Scanner module: orchestrates book scanning.
///
/// For each root, in input order: build the folder tree once, then run the
/// flat-folder, chapter and single-file matchers against it. One
/// [`ProcessedSet`] is shared across all roots of the call, so nested or
/// repeated roots never yield the same file twice.
///
/// A scan call is synchronous and single-threaded. [`start_scan`] moves a
/// whole call onto a background thread and reports progress over a
/// channel; it cannot be interrupted midway.
pub mod builder;
pub mod listing;
pub mod progress;

use crate::config::ScanConfig;
use crate::matcher::{match_chapter_books, match_flat_folders, match_single_files, ProcessedSet};
use crate::model::Book;
use listing::{DirLister, JwalkLister};
use progress::{ScanProgress, ScanReport};

use crossbeam_channel::Receiver;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Maximum number of progress messages that may queue up in the channel.
///
/// A scan sends a handful of messages per root, so this only fills when the
/// receiver stops draining; the scanner then blocks rather than growing the
/// queue without bound.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 1_024;

/// Scan `roots` with the default lister and return the books found.
///
/// Unreadable folders and missing roots are skipped silently (they are
/// logged); use [`scan_roots`] to get them back as issues.
pub fn search_books<P: AsRef<Path>>(roots: &[P], config: &ScanConfig) -> Vec<Book> {
    scan_roots(roots, config, &JwalkLister).books
}

/// Scan `roots` with the given lister and return the full report.
pub fn scan_roots<P, L>(roots: &[P], config: &ScanConfig, lister: &L) -> ScanReport
where
    P: AsRef<Path>,
    L: DirLister + ?Sized,
{
    scan_roots_with_progress(roots, config, lister, |_| {})
}

/// [`scan_roots`], calling `on_progress` as each root starts and finishes
/// and for every unreadable folder. `Complete` is never sent from here.
pub fn scan_roots_with_progress<P, L, F>(
    roots: &[P],
    config: &ScanConfig,
    lister: &L,
    mut on_progress: F,
) -> ScanReport
where
    P: AsRef<Path>,
    L: DirLister + ?Sized,
    F: FnMut(ScanProgress),
{
    let start = Instant::now();
    let mut report = ScanReport::default();
    let mut processed = ProcessedSet::new();

    info!("Starting book scan of {} root(s)", roots.len());

    for (index, root) in roots.iter().enumerate() {
        let root = root.as_ref();
        on_progress(ScanProgress::RootStarted {
            root: root.to_path_buf(),
            index,
            total: roots.len(),
        });

        let issues_before = report.issues.len();
        let tree = builder::build_tree(root, config, lister, &mut report.issues);
        for issue in &report.issues[issues_before..] {
            on_progress(ScanProgress::Issue(issue.clone()));
        }

        let books_before = report.books.len();
        report.books.extend(match_flat_folders(&tree, &mut processed));
        report.books.extend(match_chapter_books(&tree, &mut processed));
        report
            .books
            .extend(match_single_files(&tree, config, &mut processed));

        let books_found = report.books.len() - books_before;
        debug!("Root {} yielded {} books", root.display(), books_found);
        on_progress(ScanProgress::RootFinished {
            root: root.to_path_buf(),
            books_found,
        });
    }

    report.duration = start.elapsed();
    info!(
        "Book scan complete: {} books, {} files, {} unreadable folders in {:?}",
        report.books.len(),
        report.file_count(),
        report.issues.len(),
        report.duration
    );
    report
}

/// Handle to a running or completed background scan.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread. The last message
    /// is always [`ScanProgress::Complete`] unless the thread panicked.
    pub progress_rx: Receiver<ScanProgress>,
    /// Join handle for the scan thread.
    thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// `true` once the scan thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Block until the scan finishes and return its report.
    ///
    /// Drains any progress messages the caller has not consumed. Returns
    /// `None` if the report was already taken from `progress_rx` or the
    /// scan thread panicked.
    pub fn wait(mut self) -> Option<ScanReport> {
        let mut report = None;
        for msg in self.progress_rx.iter() {
            if let ScanProgress::Complete(r) = msg {
                report = Some(r);
            }
        }
        if let Some(t) = self.thread.take() {
            if t.join().is_err() {
                warn!("Scan thread panicked; no report available");
            }
        }
        report
    }
}

/// Start a scan of `roots` on a background thread using the default lister.
///
/// Returns a [`ScanHandle`] for receiving progress and the final report.
pub fn start_scan(roots: Vec<PathBuf>, config: ScanConfig) -> std::io::Result<ScanHandle> {
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);

    let thread = thread::Builder::new()
        .name("audioshelf-scanner".into())
        .spawn(move || {
            let report = scan_roots_with_progress(&roots, &config, &JwalkLister, |msg| {
                let _ = progress_tx.send(msg);
            });
            let _ = progress_tx.send(ScanProgress::Complete(report));
        })?;

    Ok(ScanHandle {
        progress_rx,
        thread: Some(thread),
    })
}
