/// Arena-backed folder tree for one scan root.
///
/// All nodes live in a single `Vec<FolderNode>`. Relationships between nodes
/// use `NodeIndex` (a thin `u32` wrapper) rather than heap pointers. The
/// builder appends nodes depth-first, so every node of a subtree sits after
/// the subtree's own node in the arena.
use super::folder_node::{FolderNode, NodeIndex};
use std::path::PathBuf;

/// The folder tree produced for one root.
#[derive(Debug, Clone)]
pub struct FolderTree {
    /// Arena: every directory node in a flat vector.
    pub nodes: Vec<FolderNode>,

    /// The scan root. Always present, even when nothing was found under it.
    pub root: NodeIndex,
}

impl FolderTree {
    /// Create a tree holding only an empty root node for `root_path`.
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            nodes: vec![FolderNode::new(root_path)],
            root: NodeIndex(0),
        }
    }

    /// Allocate a new node in the arena and return its index.
    pub fn add_node(&mut self, node: FolderNode) -> NodeIndex {
        let idx = NodeIndex::new(self.nodes.len());
        self.nodes.push(node);
        idx
    }

    /// Attach `child` as a child of `parent`, prepending to the sibling list.
    ///
    /// This is O(1). Sibling order is not meaningful; readers go through
    /// [`children_sorted_by_name`](Self::children_sorted_by_name).
    pub fn add_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        let old_first = self.nodes[parent.idx()].first_child;
        self.nodes[child.idx()].next_sibling = old_first;
        self.nodes[parent.idx()].first_child = Some(child);
    }

    /// Drop `index` and every node allocated after it.
    ///
    /// Used to reclaim a pruned subtree: because nodes are appended
    /// depth-first, everything after a subtree's own node belongs to it.
    /// The node must not be attached to a parent.
    pub fn discard_from(&mut self, index: NodeIndex) {
        debug_assert!(index != self.root, "the root is never discarded");
        self.nodes.truncate(index.idx());
    }

    /// Direct children of a node (linked-list order).
    pub fn children(&self, parent: NodeIndex) -> Vec<NodeIndex> {
        let mut children = Vec::new();
        let mut child = self.nodes[parent.idx()].first_child;
        while let Some(idx) = child {
            children.push(idx);
            child = self.nodes[idx.idx()].next_sibling;
        }
        children
    }

    /// Direct children of a node sorted by folder name.
    pub fn children_sorted_by_name(&self, parent: NodeIndex) -> Vec<NodeIndex> {
        let mut children = self.children(parent);
        children.sort_by(|a, b| self.nodes[a.idx()].name.cmp(&self.nodes[b.idx()].name));
        children
    }

    /// Leaves of the subtree rooted at `start`, depth-first with siblings
    /// visited in name order. `start` itself is included when it is a leaf.
    pub fn leaves(&self, start: NodeIndex) -> Vec<NodeIndex> {
        let mut leaves = Vec::new();
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            if self.nodes[idx.idx()].is_leaf() {
                leaves.push(idx);
            }
            // Reverse so the smallest name is popped first.
            stack.extend(self.children_sorted_by_name(idx).into_iter().rev());
        }
        leaves
    }

    /// Total number of audio files anywhere in the tree.
    pub fn audio_file_count(&self) -> usize {
        self.nodes.iter().map(|n| n.audio_files.len()).sum()
    }

    /// Get the node at the given index.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &FolderNode {
        &self.nodes[index.idx()]
    }

    /// Mutable access to the node at the given index.
    #[inline]
    pub fn node_mut(&mut self, index: NodeIndex) -> &mut FolderNode {
        &mut self.nodes[index.idx()]
    }

    /// Total number of nodes in the tree (root included).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when the root has neither audio files nor attached children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        let root = self.node(self.root);
        !root.has_audio() && !root.has_children()
    }
}
