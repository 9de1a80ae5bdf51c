/// Single-file books: each audio file loose in an unclaimed folder.
///
/// Unlike the other matchers this one walks the whole tree from the root,
/// so a lone `Author/Book.mp3` nested at any depth is still picked up once
/// the flat-folder and chapter matchers have had their turn.
use super::ProcessedSet;
use crate::config::ScanConfig;
use crate::model::book::file_stem;
use crate::model::{Book, FolderNode, FolderTree};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Emit one book per audio file in every unclaimed, non-numeric folder.
///
/// Pre-order: a folder's own books come before those of its children,
/// children in name order. A claimed or numeric folder contributes no
/// books, but its children are still visited.
pub fn match_single_files(
    tree: &FolderTree,
    config: &ScanConfig,
    processed: &mut ProcessedSet,
) -> Vec<Book> {
    let mut books = Vec::new();
    let mut stack = vec![tree.root];

    while let Some(idx) = stack.pop() {
        let node = tree.node(idx);

        if !processed.contains(&node.path) && !node.is_numeric {
            for file in &node.audio_files {
                let mut book = Book::new(
                    file_stem(file),
                    node.path.clone(),
                    matching_cover(node, file, config),
                );
                book.add_file(file.clone());
                books.push(book);
            }
            processed.mark(&node.path);
        }

        stack.extend(tree.children_sorted_by_name(idx).into_iter().rev());
    }

    debug!("Single-file matcher found {} books", books.len());
    books
}

/// Find `<stem>.<ext>` among the folder's images, trying the configured
/// image extensions in order. The extension compares case-insensitively;
/// the stem must match exactly.
fn matching_cover(node: &FolderNode, audio: &Path, config: &ScanConfig) -> Option<PathBuf> {
    let stem = audio.file_stem()?;
    config.image_extensions().iter().find_map(|ext| {
        let wanted = ext.strip_prefix('.').unwrap_or(ext);
        node.image_files
            .iter()
            .find(|image| {
                image.file_stem() == Some(stem)
                    && image
                        .extension()
                        .is_some_and(|e| e.to_string_lossy().to_lowercase() == wanted)
            })
            .cloned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::test_tree::{files, folder, tree};
    use crate::matcher::{match_chapter_books, match_flat_folders};

    #[test]
    fn loose_root_file_is_a_book_with_cover() {
        let mut t = tree();
        let root = t.root;
        files(
            &mut t,
            root,
            &["SingleFileBook01.mp3"],
            &["SingleFileBook01.png", "other.jpg"],
        );

        let books = match_single_files(&t, &ScanConfig::default(), &mut ProcessedSet::new());
        assert_eq!(books.len(), 1);
        let b = &books[0];
        assert_eq!(b.caption, "SingleFileBook01");
        assert_eq!(b.folder_path, PathBuf::from("/lib"));
        assert_eq!(
            b.cover_image_path,
            Some(PathBuf::from("/lib/SingleFileBook01.png"))
        );
        assert_eq!(b.files.len(), 1);
        assert_eq!(b.files[0].name, "SingleFileBook01");
    }

    #[test]
    fn cover_missing_when_no_image_shares_the_stem() {
        let mut t = tree();
        let root = t.root;
        files(&mut t, root, &["Book.mp3"], &["cover.jpg", "fileName.jpg"]);

        let books = match_single_files(&t, &ScanConfig::default(), &mut ProcessedSet::new());
        assert_eq!(books[0].cover_image_path, None);
    }

    /// Configured image extension order decides between candidates.
    #[test]
    fn cover_follows_extension_order() {
        let mut t = tree();
        let root = t.root;
        files(&mut t, root, &["Book.mp3"], &["Book.png", "Book.JPG"]);

        let books = match_single_files(&t, &ScanConfig::default(), &mut ProcessedSet::new());
        assert_eq!(
            books[0].cover_image_path,
            Some(PathBuf::from("/lib/Book.JPG"))
        );
    }

    /// Each loose file is its own book, folders visited pre-order by name.
    #[test]
    fn nested_loose_files_preorder() {
        let mut t = tree();
        let root = t.root;
        files(&mut t, root, &["z.mp3"], &[]);
        let author = folder(&mut t, root, "Author", &["a2.mp3", "a1.mp3"], &[]);
        folder(&mut t, author, "Inner", &["i.mp3"], &[]);
        folder(&mut t, root, "Beta", &["b.mp3"], &[]);

        let books = match_single_files(&t, &ScanConfig::default(), &mut ProcessedSet::new());
        let captions: Vec<_> = books.iter().map(|b| b.caption.as_str()).collect();
        // Direct files keep listing order; folders go parent-first.
        assert_eq!(captions, ["z", "a2", "a1", "i", "b"]);
    }

    /// Claimed folders contribute nothing but their children are visited.
    #[test]
    fn claimed_folder_children_still_visited() {
        let mut t = tree();
        let root = t.root;
        let book = folder(&mut t, root, "Book", &["intro.mp3"], &[]);
        let part = folder(&mut t, book, "Part", &["bonus.mp3"], &[]);
        folder(&mut t, part, "01", &["c1.mp3"], &[]);

        let mut processed = ProcessedSet::new();
        processed.mark(Path::new("/lib/Book"));
        processed.mark(Path::new("/lib/Book/Part/01"));

        let books = match_single_files(&t, &ScanConfig::default(), &mut processed);
        let captions: Vec<_> = books.iter().map(|b| b.caption.as_str()).collect();
        assert_eq!(captions, ["bonus"]);
        assert!(processed.contains(Path::new("/lib/Book/Part")));
    }

    #[test]
    fn numeric_folder_files_are_not_single_books() {
        let mut t = tree();
        let root = t.root;
        folder(&mut t, root, "07", &["x.mp3"], &[]);

        let mut processed = ProcessedSet::new();
        let books = match_single_files(&t, &ScanConfig::default(), &mut processed);
        assert!(books.is_empty());
        assert!(!processed.contains(Path::new("/lib/07")));
    }

    /// Running A, B, C in order over all three layouts claims each file once.
    #[test]
    fn full_pipeline_claims_every_file_once() {
        let mut t = tree();
        let root = t.root;
        files(&mut t, root, &["Loose.mp3"], &["Loose.png"]);
        folder(&mut t, root, "Flat", &["1.mp3", "2.mp3"], &["cover.jpg"]);
        let chap = folder(&mut t, root, "Chaptered", &[], &[]);
        folder(&mut t, chap, "01", &["a.mp3"], &[]);
        folder(&mut t, chap, "02", &["b.mp3"], &[]);

        let config = ScanConfig::default();
        let mut processed = ProcessedSet::new();
        let mut books = match_flat_folders(&t, &mut processed);
        books.extend(match_chapter_books(&t, &mut processed));
        books.extend(match_single_files(&t, &config, &mut processed));

        let captions: Vec<_> = books.iter().map(|b| b.caption.as_str()).collect();
        assert_eq!(captions, ["Flat", "Chaptered", "Loose"]);

        let mut all: Vec<_> = books
            .iter()
            .flat_map(|b| b.files.iter().map(|f| f.file_path.clone()))
            .collect();
        let total = all.len();
        all.sort();
        all.dedup();
        assert_eq!(total, 5);
        assert_eq!(all.len(), 5);
    }
}
