/// Book records produced by the matchers.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One playable audio file of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFile {
    /// File name without extension.
    pub name: String,
    /// Absolute path. Unique across the whole library; downstream code
    /// keys playback progress on it.
    pub file_path: PathBuf,
}

impl BookFile {
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            name: file_stem(&file_path),
            file_path,
        }
    }
}

/// A book found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Display title.
    pub caption: String,
    /// Directory the book is anchored to.
    pub folder_path: PathBuf,
    /// Cover image, if one was found.
    pub cover_image_path: Option<PathBuf>,
    /// Files in play order.
    pub files: Vec<BookFile>,
}

impl Book {
    /// Start an empty book.
    pub fn new(
        caption: impl Into<String>,
        folder_path: PathBuf,
        cover_image_path: Option<PathBuf>,
    ) -> Self {
        Self {
            caption: caption.into(),
            folder_path,
            cover_image_path,
            files: Vec::new(),
        }
    }

    /// Append a file to the end of the play order.
    pub fn add_file(&mut self, file_path: PathBuf) {
        self.files.push(BookFile::new(file_path));
    }

    /// A book with exactly one file takes that file's name as its caption.
    pub fn apply_single_file_caption(&mut self) {
        if let [only] = self.files.as_slice() {
            self.caption = only.name.clone();
        }
    }
}

/// File name without its extension, lossily converted to UTF-8.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
