/// Directory listing: the one filesystem primitive the builder depends on.
///
/// [`DirLister`] returns the direct subdirectories and files of one directory.
/// [`JwalkLister`] is the real implementation; tests substitute scripted
/// listers to simulate permission failures.
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Direct contents of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirListing {
    /// Subdirectory paths.
    pub dirs: Vec<PathBuf>,
    /// File paths (anything that is not a directory).
    pub files: Vec<PathBuf>,
}

/// A directory could not be read.
#[derive(Debug, Clone, Error)]
#[error("cannot list {}: {message}", path.display())]
pub struct ListingError {
    pub path: PathBuf,
    pub message: String,
}

impl ListingError {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Lists the direct children of a directory.
pub trait DirLister {
    fn list(&self, dir: &Path) -> Result<DirListing, ListingError>;
}

/// `jwalk`-backed lister limited to one level.
///
/// Serial, sorted by file name, hidden entries included, symlinks not
/// followed (a linked directory is reported as a file and then ignored for
/// lack of an audio extension).
#[derive(Debug, Clone, Copy, Default)]
pub struct JwalkLister;

impl DirLister for JwalkLister {
    fn list(&self, dir: &Path) -> Result<DirListing, ListingError> {
        // jwalk reports a missing root as an empty walk on some platforms.
        match std::fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(ListingError::new(dir, "not a directory")),
            Err(err) => return Err(ListingError::new(dir, err.to_string())),
        }

        // Depth 0 is `dir` itself. jwalk attaches a failed `read_dir` to
        // that entry instead of yielding an `Err`, so it must be walked.
        let walker = jwalk::WalkDir::new(dir)
            .min_depth(0)
            .max_depth(1)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .parallelism(jwalk::Parallelism::Serial);

        let mut listing = DirListing::default();
        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                    return Err(ListingError::new(path, err.to_string()));
                }
            };

            if entry.depth == 0 {
                if let Some(err) = &entry.read_children_error {
                    return Err(ListingError::new(dir, err.to_string()));
                }
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_dir() {
                listing.dirs.push(path);
            } else {
                listing.files.push(path);
            }
        }
        Ok(listing)
    }
}
