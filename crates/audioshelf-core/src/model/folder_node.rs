/// A single directory in the arena-allocated folder tree.
///
/// Nodes are stored in a flat `Vec<FolderNode>` and link to their children
/// by index rather than by pointer. No matcher ever walks upward, so there
/// is no parent link.
use compact_str::CompactString;
use std::path::{Path, PathBuf};

/// Lightweight index into the arena `Vec<FolderNode>`.
///
/// Uses `u32` to keep nodes small; supports up to ~4 billion directories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a new `NodeIndex` from a `usize`.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeIndex overflow");
        Self(index as u32)
    }

    /// Return the index as a `usize` for Vec indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One directory of a scanned root.
#[derive(Debug, Clone)]
pub struct FolderNode {
    /// Absolute directory path. Unique within a scan.
    pub path: PathBuf,

    /// Final path segment (the folder name shown as a book caption).
    pub name: CompactString,

    /// `true` when `name` is a plain base-10 integer such as `01` or `12`.
    /// Numeric folders are chapter folders.
    pub is_numeric: bool,

    /// Audio files directly inside this directory, in listing order.
    pub audio_files: Vec<PathBuf>,

    /// Image files directly inside this directory, in listing order.
    pub image_files: Vec<PathBuf>,

    /// First attached child. Children form a singly-linked list via
    /// [`next_sibling`](Self::next_sibling).
    pub first_child: Option<NodeIndex>,

    /// Next sibling under the same parent.
    pub next_sibling: Option<NodeIndex>,
}

impl FolderNode {
    /// Create an empty directory node for `path`.
    ///
    /// The name is the last path segment; for paths without one (a bare
    /// drive or `/`) the whole path is used instead.
    pub fn new(path: PathBuf) -> Self {
        let name = display_name(&path);
        let is_numeric = is_numeric_name(&name);
        Self {
            path,
            name,
            is_numeric,
            audio_files: Vec::new(),
            image_files: Vec::new(),
            first_child: None,
            next_sibling: None,
        }
    }

    /// `true` if at least one audio file sits directly in this directory.
    #[inline]
    pub fn has_audio(&self) -> bool {
        !self.audio_files.is_empty()
    }

    /// `true` if at least one child directory is attached.
    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// A leaf holds audio and has no attached children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.has_audio() && !self.has_children()
    }
}

/// `true` if `name` is a run of ASCII digits.
///
/// Leading zeros are fine (`"01"`). Signs, whitespace and trailing text are
/// not (`"+1"`, `"01 Intro"`). Length is unbounded.
pub fn is_numeric_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

fn display_name(path: &Path) -> CompactString {
    match path.file_name() {
        Some(name) => CompactString::new(name.to_string_lossy()),
        None => {
            let s = path.to_string_lossy();
            let trimmed = s.trim_end_matches(['/', '\\']);
            if trimmed.is_empty() {
                CompactString::new(s)
            } else {
                CompactString::new(trimmed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_names() {
        assert!(is_numeric_name("01"));
        assert!(is_numeric_name("7"));
        assert!(is_numeric_name("000"));
        assert!(!is_numeric_name(""));
        assert!(!is_numeric_name("01 Intro"));
        assert!(!is_numeric_name(" 01"));
        assert!(!is_numeric_name("Chapter 1"));
        assert!(!is_numeric_name("1.5"));
        assert!(!is_numeric_name("+1"));
        assert!(!is_numeric_name("-1"));
        assert!(is_numeric_name("99999999999999999999"));
    }

    #[test]
    fn node_name_is_last_segment() {
        let node = FolderNode::new(PathBuf::from("/books/Dune/02"));
        assert_eq!(node.name, "02");
        assert!(node.is_numeric);
        assert!(!node.is_leaf());
    }

    #[test]
    fn root_path_keeps_whole_path_as_name() {
        let node = FolderNode::new(PathBuf::from("/"));
        assert_eq!(node.name, "/");
        assert!(!node.is_numeric);
    }
}
