/// Data model for AudioShelf.
///
/// Re-exports the arena-allocated folder tree and the book records the
/// matchers produce from it.
pub mod book;
pub mod folder_node;
pub mod folder_tree;

pub use book::{Book, BookFile};
pub use folder_node::{FolderNode, NodeIndex};
pub use folder_tree::FolderTree;
