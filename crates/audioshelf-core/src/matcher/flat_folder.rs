/// Flat-folder books: `Root/../BookName/file1.mp3, file2.mp3`.
///
/// Every non-numeric leaf under a root's top-level folders becomes one book.
/// Numeric leaves are chapter folders; they are left unclaimed for the
/// chapter matcher.
use super::{sorted_audio_files, ProcessedSet};
use crate::model::{Book, FolderTree};
use tracing::debug;

/// Emit one book per unclaimed, non-numeric leaf below the root's
/// top-level folders. The root itself is never a flat-folder book.
pub fn match_flat_folders(tree: &FolderTree, processed: &mut ProcessedSet) -> Vec<Book> {
    let mut books = Vec::new();

    for top in tree.children_sorted_by_name(tree.root) {
        if processed.contains(&tree.node(top).path) {
            continue;
        }

        for leaf in tree.leaves(top) {
            let node = tree.node(leaf);
            if processed.contains(&node.path) || node.is_numeric {
                continue;
            }

            let mut book = Book::new(
                node.name.as_str(),
                node.path.clone(),
                node.image_files.first().cloned(),
            );
            for file in sorted_audio_files(node) {
                book.add_file(file);
            }
            book.apply_single_file_caption();

            processed.mark(&node.path);
            books.push(book);
        }
    }

    debug!("Flat-folder matcher found {} books", books.len());
    books
}
