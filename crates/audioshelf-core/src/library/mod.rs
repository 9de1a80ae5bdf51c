/// Library module: scan-folder configuration, stored books, and refresh.
///
/// A refresh scans every configured folder in one call (so nested folders
/// share the processed set) and replaces the stored books with the result.
pub mod json_store;
pub mod store;

pub use json_store::JsonLibraryStore;
pub use store::{LibraryData, LibraryStore, MemoryLibraryStore, ScanFolder, StoreError};

use crate::config::ScanConfig;
use crate::scanner::listing::{DirLister, JwalkLister};
use crate::scanner::progress::ScanReport;
use crate::scanner::scan_roots;
use tracing::{info, warn};

/// Rescan all configured folders with the default lister.
pub fn refresh_library<S>(store: &S, config: &ScanConfig) -> Result<ScanReport, StoreError>
where
    S: LibraryStore + ?Sized,
{
    refresh_library_with(store, config, &JwalkLister)
}

/// [`refresh_library`] with a caller-supplied lister.
///
/// Unreadable folders do not fail the refresh; they come back in the
/// report's issues. Only a store failure is an error, and then the stored
/// books are left as they were.
pub fn refresh_library_with<S, L>(
    store: &S,
    config: &ScanConfig,
    lister: &L,
) -> Result<ScanReport, StoreError>
where
    S: LibraryStore + ?Sized,
    L: DirLister + ?Sized,
{
    let roots: Vec<_> = store
        .scan_folders()?
        .into_iter()
        .map(|folder| folder.path)
        .collect();
    if roots.is_empty() {
        warn!("No scan folders configured; clearing stored books");
    }

    let report = scan_roots(&roots, config, lister);
    store.replace_books(report.books.clone())?;
    info!("Library refreshed with {} books", report.books.len());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::listing::{DirListing, ListingError};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    #[derive(Default)]
    struct FakeLister {
        dirs: HashMap<PathBuf, DirListing>,
    }

    impl FakeLister {
        fn with(mut self, dir: &str, dirs: &[&str], files: &[&str]) -> Self {
            let base = PathBuf::from(dir);
            self.dirs.insert(
                base.clone(),
                DirListing {
                    dirs: dirs.iter().map(|d| base.join(d)).collect(),
                    files: files.iter().map(|f| base.join(f)).collect(),
                },
            );
            self
        }
    }

    impl DirLister for FakeLister {
        fn list(&self, dir: &Path) -> Result<DirListing, ListingError> {
            self.dirs
                .get(dir)
                .cloned()
                .ok_or_else(|| ListingError::new(dir, "no such directory"))
        }
    }

    #[test]
    fn refresh_replaces_books_from_all_folders() {
        let store = MemoryLibraryStore::new();
        store.add_scan_folder(Path::new("/a")).unwrap();
        store.add_scan_folder(Path::new("/b")).unwrap();
        store.add_scan_folder(Path::new("/gone")).unwrap();

        let lister = FakeLister::default()
            .with("/a", &["Flat"], &[])
            .with("/a/Flat", &[], &["1.mp3", "2.mp3"])
            .with("/b", &[], &["Single.mp3"]);

        let report = refresh_library_with(&store, &ScanConfig::default(), &lister).unwrap();
        assert_eq!(report.books.len(), 2);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].path, PathBuf::from("/gone"));

        let captions: Vec<_> = store.books().unwrap().into_iter().map(|b| b.caption).collect();
        assert_eq!(captions, ["Flat", "Single"]);
        assert!(store.last_scan().unwrap().is_some());
    }

    #[test]
    fn refresh_without_folders_clears_books() {
        let store = MemoryLibraryStore::new();
        store.add_scan_folder(Path::new("/a")).unwrap();
        let lister = FakeLister::default().with("/a", &[], &["x.mp3"]);
        refresh_library_with(&store, &ScanConfig::default(), &lister).unwrap();
        assert_eq!(store.books().unwrap().len(), 1);

        store.remove_scan_folder(Path::new("/a")).unwrap();
        let report = refresh_library_with(&store, &ScanConfig::default(), &lister).unwrap();
        assert!(report.books.is_empty());
        assert!(store.books().unwrap().is_empty());
    }
}
