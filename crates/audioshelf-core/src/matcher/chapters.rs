/// Two-level chapter books: `Root/../BookName/01/file.mp3, BookName/02/file.mp3`.
///
/// Each unclaimed top-level folder of a root is a candidate. Its numeric
/// leaves are its chapters, played in folder-name order.
use super::{sorted_audio_files, ProcessedSet};
use crate::model::{Book, FolderTree};
use tracing::debug;

/// Emit one chapter book per unclaimed top-level folder that collects at
/// least one file from its numeric leaves.
///
/// The candidate folder is claimed before its leaves are examined, whether
/// or not a book comes out of it. A numeric leaf under a candidate that
/// yields nothing stays unclaimed and is dropped.
pub fn match_chapter_books(tree: &FolderTree, processed: &mut ProcessedSet) -> Vec<Book> {
    let mut books = Vec::new();

    for top in tree.children_sorted_by_name(tree.root) {
        let folder = tree.node(top);
        if processed.contains(&folder.path) {
            continue;
        }

        let mut leaves = tree.leaves(top);
        if leaves.is_empty() {
            continue;
        }

        let mut book = Book::new(
            folder.name.as_str(),
            folder.path.clone(),
            folder.image_files.first().cloned(),
        );
        processed.mark(&folder.path);

        leaves.sort_by(|a, b| tree.node(*a).name.cmp(&tree.node(*b).name));
        for leaf in leaves {
            let node = tree.node(leaf);
            if processed.contains(&node.path) || !node.is_numeric {
                continue;
            }
            for file in sorted_audio_files(node) {
                book.add_file(file);
            }
            processed.mark(&node.path);
        }

        if book.files.is_empty() {
            continue;
        }
        book.apply_single_file_caption();
        books.push(book);
    }

    debug!("Chapter matcher found {} books", books.len());
    books
}
