/// Book matchers: structural patterns applied over a built folder tree.
///
/// Three layouts are recognised, and the matchers must run in this order
/// because each claims folders the later ones would otherwise also take:
///
/// 1. [`flat_folder`]: `Book/01.mp3, Book/02.mp3`
/// 2. [`chapters`]: `Book/01/a.mp3, Book/02/b.mp3`
/// 3. [`single_file`]: `Book.mp3` loose in any unclaimed folder
///
/// Claimed folders go into a [`ProcessedSet`] shared by all matchers of one
/// scan call, so no audio file lands in two books.
pub mod chapters;
pub mod flat_folder;
pub mod single_file;

pub use chapters::match_chapter_books;
pub use flat_folder::match_flat_folders;
pub use single_file::match_single_files;

use crate::model::FolderNode;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Paths already claimed by a matcher during the current scan call.
#[derive(Debug, Default, Clone)]
pub struct ProcessedSet {
    paths: HashSet<PathBuf>,
}

impl ProcessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once `path` has been claimed.
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Claim `path`. Returns `false` if it was already claimed.
    pub fn mark(&mut self, path: &Path) -> bool {
        self.paths.insert(path.to_path_buf())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// A folder's audio files in play order (lexicographic by full path).
fn sorted_audio_files(node: &FolderNode) -> Vec<PathBuf> {
    let mut files = node.audio_files.clone();
    files.sort();
    files
}

/// Hand-built trees shared by the matcher unit tests.
#[cfg(test)]
pub(crate) mod test_tree {
    use crate::model::{FolderNode, FolderTree, NodeIndex};
    use std::path::PathBuf;

    pub fn tree() -> FolderTree {
        FolderTree::new(PathBuf::from("/lib"))
    }

    /// Attach a folder named `name` under `parent` holding `audio` and
    /// `images` (file names only).
    pub fn folder(
        tree: &mut FolderTree,
        parent: NodeIndex,
        name: &str,
        audio: &[&str],
        images: &[&str],
    ) -> NodeIndex {
        let path = tree.node(parent).path.join(name);
        let mut node = FolderNode::new(path.clone());
        node.audio_files = audio.iter().map(|f| path.join(f)).collect();
        node.image_files = images.iter().map(|f| path.join(f)).collect();
        let idx = tree.add_node(node);
        tree.add_child(parent, idx);
        idx
    }

    /// Put files directly into an existing folder.
    pub fn files(tree: &mut FolderTree, idx: NodeIndex, audio: &[&str], images: &[&str]) {
        let path = tree.node(idx).path.clone();
        let node = tree.node_mut(idx);
        node.audio_files.extend(audio.iter().map(|f| path.join(f)));
        node.image_files.extend(images.iter().map(|f| path.join(f)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processed_set_marks_once() {
        let mut set = ProcessedSet::new();
        assert!(set.is_empty());
        assert!(set.mark(Path::new("/lib/Book")));
        assert!(!set.mark(Path::new("/lib/Book")));
        assert!(set.contains(Path::new("/lib/Book")));
        assert!(!set.contains(Path::new("/lib/Book/01")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn audio_sorted_by_full_path() {
        let mut node = FolderNode::new(PathBuf::from("/lib/Book"));
        node.audio_files = vec![
            PathBuf::from("/lib/Book/10.mp3"),
            PathBuf::from("/lib/Book/02.mp3"),
            PathBuf::from("/lib/Book/01.mp3"),
        ];
        let sorted = sorted_audio_files(&node);
        assert_eq!(
            sorted,
            vec![
                PathBuf::from("/lib/Book/01.mp3"),
                PathBuf::from("/lib/Book/02.mp3"),
                PathBuf::from("/lib/Book/10.mp3"),
            ]
        );
    }
}
