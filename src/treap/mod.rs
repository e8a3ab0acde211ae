//! Intrusive randomized balanced search trees (treaps).
//!
//! A [`Treap`] never owns its nodes. Nodes live in an external store, are
//! addressed by [`NodeId`] handles, and carry one [`Links`] block per tree they
//! belong to. The store exposes the links and key of a node for one particular
//! tree through the [`NodeStore`] capability, selected by a tag type. This is
//! what lets a single record be a member of several trees at once: each tree
//! reads and writes only the links block its tag selects.
//!
//! Every tree is anchored at a sentinel node supplied by the store. The
//! sentinel's left child is the root, its parent and right child are always
//! empty, and it doubles as the past-the-end position of in-order traversal.
//!
//! # Balancing
//!
//! Each links block holds an independent random priority. Besides the search
//! tree order, a treap keeps the heap order over priorities (a parent's
//! priority is never below its children's), which keeps the expected height
//! logarithmic. All shape changes reduce to two primitives: `split`
//! partitions a subtree by a key, and `merge` joins two key-disjoint subtrees.
//!
//! # Complexity
//!
//! | Operation                        | Expected     |
//! |----------------------------------|--------------|
//! | `find`, `lower_bound`, `upper_bound` | O(log N) |
//! | `insert`, `remove`               | O(log N)     |
//! | `first`                          | O(log N)     |
//! | `last`                           | O(1)         |
//! | [`successor`], [`predecessor`]   | O(1) amortized |

mod priority;
mod tree;

pub use priority::{PrioritySource, Seed};
pub use tree::{Treap, TreeShapeError};

/// A stable handle to a node inside a [`NodeStore`].
///
/// Handles are plain indices: they are only meaningful for the store that
/// issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a handle from a raw slot index.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in 32 bits.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(index: usize) -> Self {
        assert!(
            index <= u32::MAX as usize,
            "node index exceeds the 32-bit handle space"
        );
        Self(index as u32)
    }

    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The linkage block of one node in one tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Links {
    /// Parent node, `None` only for the sentinel and for detached nodes.
    pub parent: Option<NodeId>,
    /// Left child.
    pub left: Option<NodeId>,
    /// Right child.
    pub right: Option<NodeId>,
    /// Heap priority, assigned once when the node is created.
    pub priority: u32,
}

impl Links {
    /// Creates a detached links block with the given priority.
    #[inline]
    #[must_use]
    pub const fn detached(priority: u32) -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            priority,
        }
    }

    /// Clears parent and children, keeping the priority.
    #[inline]
    pub const fn detach(&mut self) {
        self.parent = None;
        self.left = None;
        self.right = None;
    }
}

/// Access to the nodes of one tree, selected by `Tag`.
///
/// A store holding nodes that belong to several trees implements this trait
/// once per tag, each time exposing a different links block and key.
pub trait NodeStore<Tag> {
    /// The key the tree selected by `Tag` is ordered by.
    type Key: ?Sized;

    /// Returns the links block of `node` for this tree.
    fn links(&self, node: NodeId) -> &Links;

    /// Returns the mutable links block of `node` for this tree.
    fn links_mut(&mut self, node: NodeId) -> &mut Links;

    /// Returns the key of `node` for this tree.
    ///
    /// Never called with the sentinel.
    fn key(&self, node: NodeId) -> &Self::Key;
}

/// Returns the in-order successor of `node`.
///
/// The successor of the greatest node is the sentinel. The sentinel itself
/// and detached nodes have no successor.
pub fn successor<Tag, S>(store: &S, node: NodeId) -> Option<NodeId>
where
    S: NodeStore<Tag> + ?Sized,
{
    if let Some(right) = store.links(node).right {
        return Some(leftmost::<Tag, S>(store, right));
    }
    let mut current = node;
    let mut parent = store.links(current).parent;
    while let Some(ancestor) = parent {
        if store.links(ancestor).right != Some(current) {
            break;
        }
        current = ancestor;
        parent = store.links(current).parent;
    }
    parent
}

/// Returns the in-order predecessor of `node`.
///
/// The predecessor of the sentinel is the greatest node. The least node and
/// detached nodes have no predecessor.
pub fn predecessor<Tag, S>(store: &S, node: NodeId) -> Option<NodeId>
where
    S: NodeStore<Tag> + ?Sized,
{
    if let Some(left) = store.links(node).left {
        return Some(rightmost::<Tag, S>(store, left));
    }
    let mut current = node;
    let mut parent = store.links(current).parent;
    while let Some(ancestor) = parent {
        if store.links(ancestor).left != Some(current) {
            break;
        }
        current = ancestor;
        parent = store.links(current).parent;
    }
    parent
}

pub(crate) fn leftmost<Tag, S>(store: &S, mut node: NodeId) -> NodeId
where
    S: NodeStore<Tag> + ?Sized,
{
    while let Some(left) = store.links(node).left {
        node = left;
    }
    node
}

pub(crate) fn rightmost<Tag, S>(store: &S, mut node: NodeId) -> NodeId
where
    S: NodeStore<Tag> + ?Sized,
{
    while let Some(right) = store.links(node).right {
        node = right;
    }
    node
}

// =============================================================================
// Test Store
// =============================================================================


#[cfg(test)]
mod tests {
    use super::test_store::{Only, VecStore};
    use super::*;
    use rstest::rstest;

    fn chain() -> VecStore {
        // sentinel(0) <- 2 (root), 2.left = 1, 2.right = 3
        let mut store = VecStore::new();
        let one = store.push(1, 10);
        let two = store.push(2, 30);
        let three = store.push(3, 20);
        let sentinel = NodeId::new(0);
        store.links[0].left = Some(two);
        store.links[two.index()].parent = Some(sentinel);
        store.links[two.index()].left = Some(one);
        store.links[two.index()].right = Some(three);
        store.links[one.index()].parent = Some(two);
        store.links[three.index()].parent = Some(two);
        store
    }

    #[rstest]
    fn test_node_id_round_trips_index() {
        assert_eq!(NodeId::new(42).index(), 42);
    }

    #[rstest]
    fn test_successor_walks_in_order_to_sentinel() {
        let store = chain();
        let walk: Vec<usize> = std::iter::successors(Some(NodeId::new(1)), |node| {
            successor::<Only, _>(&store, *node)
        })
        .map(NodeId::index)
        .collect();
        assert_eq!(walk, vec![1, 2, 3, 0]);
    }

    #[rstest]
    fn test_predecessor_walks_back_from_sentinel() {
        let store = chain();
        let walk: Vec<usize> = std::iter::successors(Some(NodeId::new(0)), |node| {
            predecessor::<Only, _>(&store, *node)
        })
        .map(NodeId::index)
        .collect();
        assert_eq!(walk, vec![0, 3, 2, 1]);
    }

    #[rstest]
    fn test_detached_node_has_no_neighbours() {
        let mut store = VecStore::new();
        let lonely = store.push(7, 1);
        assert_eq!(successor::<Only, _>(&store, lonely), None);
        assert_eq!(predecessor::<Only, _>(&store, lonely), None);
    }

    #[rstest]
    fn test_detach_keeps_priority() {
        let mut links = Links {
            parent: Some(NodeId::new(1)),
            left: Some(NodeId::new(2)),
            right: Some(NodeId::new(3)),
            priority: 99,
        };
        links.detach();
        assert_eq!(links, Links::detached(99));
    }
}
