/// Folder-tree builder: turns one root directory into a [`FolderTree`].
///
/// Each directory is listed once. Its files are sorted into audio and image
/// lists by extension; its subdirectories are built recursively and attached
/// only when they hold audio themselves or have an attached child. Anything
/// else is organisational noise and is pruned from the arena on the spot.
///
/// Unreadable directories are treated as empty. The failure is logged and
/// recorded as a [`ScanIssue`]; the walk carries on.
use crate::config::{FileKind, ScanConfig};
use crate::model::{FolderNode, FolderTree, NodeIndex};
use crate::scanner::listing::DirLister;
use crate::scanner::progress::ScanIssue;
use std::path::Path;
use tracing::{debug, warn};

/// Build the folder tree for `root`.
///
/// The root node is always present. A root that cannot be listed (missing,
/// not a directory, access denied) yields a tree holding only the empty root
/// and one entry in `issues`.
pub fn build_tree<L>(
    root: &Path,
    config: &ScanConfig,
    lister: &L,
    issues: &mut Vec<ScanIssue>,
) -> FolderTree
where
    L: DirLister + ?Sized,
{
    let mut tree = FolderTree::new(root.to_path_buf());
    let mut builder = Builder {
        config,
        lister,
        issues,
    };
    let root_idx = tree.root;
    builder.fill(&mut tree, root_idx);

    debug!(
        "Built tree for {}: {} folders, {} audio files",
        root.display(),
        tree.len(),
        tree.audio_file_count()
    );
    tree
}

struct Builder<'a, L: ?Sized> {
    config: &'a ScanConfig,
    lister: &'a L,
    issues: &'a mut Vec<ScanIssue>,
}

impl<L: DirLister + ?Sized> Builder<'_, L> {
    fn fill(&mut self, tree: &mut FolderTree, idx: NodeIndex) {
        let listing = match self.lister.list(&tree.node(idx).path) {
            Ok(listing) => listing,
            Err(err) => {
                warn!("Skipping unreadable folder: {err}");
                self.issues.push(err.into());
                return;
            }
        };

        {
            let node = tree.node_mut(idx);
            for file in listing.files {
                match self.config.classify(&file) {
                    Some(FileKind::Audio) => node.audio_files.push(file),
                    Some(FileKind::Image) => node.image_files.push(file),
                    None => {}
                }
            }
        }

        for dir in listing.dirs {
            let child = tree.add_node(FolderNode::new(dir));
            self.fill(tree, child);

            let child_node = tree.node(child);
            if child_node.has_audio() || child_node.has_children() {
                tree.add_child(idx, child);
            } else {
                tree.discard_from(child);
            }
        }
    }
}
