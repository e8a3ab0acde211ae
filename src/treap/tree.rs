//! The treap algorithms over an external [`NodeStore`].

use std::cmp::Ordering;
use std::marker::PhantomData;

use thiserror::Error;

use super::{Links, NodeId, NodeStore, leftmost, successor};
use crate::order::Order;

/// A structural defect found by [`Treap::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeShapeError {
    /// The sentinel has a parent or a right child.
    #[error("sentinel has a parent or a right child")]
    SentinelLinked,
    /// A node's parent link does not match the node holding it as a child.
    #[error("node {0:?} does not point back to its parent")]
    BrokenParent(NodeId),
    /// A node has a higher priority than its parent.
    #[error("node {0:?} outranks its parent")]
    HeapViolation(NodeId),
    /// In-order traversal is not strictly ascending at this node.
    #[error("node {0:?} is out of order")]
    OutOfOrder(NodeId),
    /// In-order traversal and the tree disagree on the node count.
    #[error("in-order walk visited {walked} nodes, tree holds {linked}")]
    CountMismatch {
        /// Nodes reached by successor steps.
        walked: usize,
        /// Nodes reached from the root through child links.
        linked: usize,
    },
    /// A tree holds a different number of nodes than its owner recorded.
    #[error("tree links {linked} nodes, owner recorded {recorded}")]
    LengthMismatch {
        /// Nodes reachable in the tree.
        linked: usize,
        /// The owner's count.
        recorded: usize,
    },
}

/// A randomized balanced search tree over nodes it does not own.
///
/// The tree itself only knows its ordering relation and its sentinel. Every
/// operation takes the store holding the nodes; `Tag` picks which links block
/// and key of that store the tree works on.
///
/// # Examples
///
/// ```rust
/// use treap_bimap::order::Natural;
/// use treap_bimap::treap::{Links, NodeId, NodeStore, Treap};
///
/// struct Plain;
///
/// struct Store {
///     keys: Vec<u8>,
///     links: Vec<Links>,
/// }
///
/// impl NodeStore<Plain> for Store {
///     type Key = u8;
///     fn links(&self, node: NodeId) -> &Links {
///         &self.links[node.index()]
///     }
///     fn links_mut(&mut self, node: NodeId) -> &mut Links {
///         &mut self.links[node.index()]
///     }
///     fn key(&self, node: NodeId) -> &u8 {
///         &self.keys[node.index()]
///     }
/// }
///
/// let mut store = Store {
///     keys: vec![0, b'b', b'a'],
///     links: vec![Links::detached(u32::MAX), Links::detached(5), Links::detached(9)],
/// };
/// let tree: Treap<Plain, Natural> = Treap::new(Natural, NodeId::new(0));
/// tree.insert(&mut store, NodeId::new(1));
/// tree.insert(&mut store, NodeId::new(2));
///
/// assert_eq!(tree.first(&store), NodeId::new(2));
/// assert_eq!(tree.find(&store, &b'b'), NodeId::new(1));
/// assert_eq!(tree.find(&store, &b'z'), tree.last());
/// ```
pub struct Treap<Tag, O> {
    order: O,
    end: NodeId,
    tag: PhantomData<fn() -> Tag>,
}

impl<Tag, O> Treap<Tag, O> {
    /// Creates a tree anchored at `end`, ordered by `order`.
    ///
    /// The caller keeps the sentinel's links block cleared; an empty tree is a
    /// sentinel without a left child.
    #[inline]
    pub const fn new(order: O, end: NodeId) -> Self {
        Self {
            order,
            end,
            tag: PhantomData,
        }
    }

    /// Returns the ordering relation.
    #[inline]
    pub const fn order(&self) -> &O {
        &self.order
    }

    /// Returns the sentinel, the past-the-end position.
    #[inline]
    pub const fn last(&self) -> NodeId {
        self.end
    }

    /// Returns the root, if the tree is non-empty.
    #[inline]
    pub fn root<S>(&self, store: &S) -> Option<NodeId>
    where
        S: NodeStore<Tag> + ?Sized,
    {
        store.links(self.end).left
    }

    /// Returns the least node, or the sentinel when the tree is empty.
    #[inline]
    pub fn first<S>(&self, store: &S) -> NodeId
    where
        S: NodeStore<Tag> + ?Sized,
    {
        leftmost::<Tag, S>(store, self.end)
    }

    /// Returns `true` if `node` is the sentinel.
    #[inline]
    pub fn is_last(&self, node: NodeId) -> bool {
        node == self.end
    }

    /// Links a detached node into the tree.
    ///
    /// The node's key must not be order-equivalent to any key already in the
    /// tree; uniqueness is the caller's concern.
    pub fn insert<S>(&self, store: &mut S, node: NodeId)
    where
        S: NodeStore<Tag> + ?Sized,
        O: Order<S::Key>,
    {
        let root = self.root(store);
        let root = self.insert_into(store, root, node);
        store.links_mut(self.end).left = Some(root);
        store.links_mut(root).parent = Some(self.end);
    }

    fn insert_into<S>(&self, store: &mut S, subtree: Option<NodeId>, node: NodeId) -> NodeId
    where
        S: NodeStore<Tag> + ?Sized,
        O: Order<S::Key>,
    {
        let Some(top) = subtree else {
            return node;
        };

        if store.links(node).priority > store.links(top).priority {
            let (less, not_less) = self.split(store, Some(top), node);
            let links = store.links_mut(node);
            links.left = less;
            links.right = not_less;
            Self::set_parent(store, less, Some(node));
            Self::set_parent(store, not_less, Some(node));
            return node;
        }

        if self.order.less(store.key(node), store.key(top)) {
            let left = store.links(top).left;
            let child = self.insert_into(store, left, node);
            store.links_mut(top).left = Some(child);
            store.links_mut(child).parent = Some(top);
        } else {
            let right = store.links(top).right;
            let child = self.insert_into(store, right, node);
            store.links_mut(top).right = Some(child);
            store.links_mut(child).parent = Some(top);
        }
        top
    }

    /// Unlinks a live node and returns its in-order successor.
    ///
    /// The successor is computed before unlinking, so it is the sentinel when
    /// `node` was the greatest. The removed node is left detached.
    pub fn remove<S>(&self, store: &mut S, node: NodeId) -> NodeId
    where
        S: NodeStore<Tag> + ?Sized,
    {
        let next = successor::<Tag, S>(store, node).unwrap_or(self.end);
        let Links {
            parent,
            left,
            right,
            ..
        } = *store.links(node);

        let merged = self.merge(store, left, right);
        Self::set_parent(store, merged, parent);
        if let Some(parent) = parent {
            // The sentinel never has a right child, so the root lands in its left slot.
            let links = store.links_mut(parent);
            if links.right == Some(node) {
                links.right = merged;
            } else {
                links.left = merged;
            }
        }
        store.links_mut(node).detach();
        next
    }

    /// Partitions `subtree` by the key of `pivot`.
    ///
    /// Returns the roots of the nodes ordered before the pivot's key and of
    /// the nodes not ordered before it. Both halves keep heap order and have
    /// no parent.
    pub fn split<S>(
        &self,
        store: &mut S,
        subtree: Option<NodeId>,
        pivot: NodeId,
    ) -> (Option<NodeId>, Option<NodeId>)
    where
        S: NodeStore<Tag> + ?Sized,
        O: Order<S::Key>,
    {
        let Some(node) = subtree else {
            return (None, None);
        };

        if self.order.less(store.key(node), store.key(pivot)) {
            let right = store.links(node).right;
            let (less, not_less) = self.split(store, right, pivot);
            let links = store.links_mut(node);
            links.right = less;
            links.parent = None;
            Self::set_parent(store, less, Some(node));
            (Some(node), not_less)
        } else {
            let left = store.links(node).left;
            let (less, not_less) = self.split(store, left, pivot);
            let links = store.links_mut(node);
            links.left = not_less;
            links.parent = None;
            Self::set_parent(store, not_less, Some(node));
            (less, Some(node))
        }
    }

    /// Joins two subtrees into one.
    ///
    /// Every key under `less` must order before every key under `greater`.
    /// The root with the higher priority stays on top.
    pub fn merge<S>(
        &self,
        store: &mut S,
        less: Option<NodeId>,
        greater: Option<NodeId>,
    ) -> Option<NodeId>
    where
        S: NodeStore<Tag> + ?Sized,
    {
        let Some(less_root) = less else {
            return greater;
        };
        let Some(greater_root) = greater else {
            return Some(less_root);
        };

        if store.links(less_root).priority > store.links(greater_root).priority {
            let right = store.links(less_root).right;
            let merged = self.merge(store, right, Some(greater_root));
            store.links_mut(less_root).right = merged;
            Self::set_parent(store, merged, Some(less_root));
            Some(less_root)
        } else {
            let left = store.links(greater_root).left;
            let merged = self.merge(store, Some(less_root), left);
            store.links_mut(greater_root).left = merged;
            Self::set_parent(store, merged, Some(greater_root));
            Some(greater_root)
        }
    }

    /// Returns the node whose key is order-equivalent to `key`, or the
    /// sentinel.
    pub fn find<S>(&self, store: &S, key: &S::Key) -> NodeId
    where
        S: NodeStore<Tag> + ?Sized,
        O: Order<S::Key>,
    {
        let mut current = self.root(store);
        while let Some(node) = current {
            current = match self.order.compare(store.key(node), key) {
                Ordering::Less => store.links(node).right,
                Ordering::Greater => store.links(node).left,
                Ordering::Equal => return node,
            };
        }
        self.end
    }

    /// Returns the least node whose key is not less than `key`, or the
    /// sentinel.
    pub fn lower_bound<S>(&self, store: &S, key: &S::Key) -> NodeId
    where
        S: NodeStore<Tag> + ?Sized,
        O: Order<S::Key>,
    {
        let mut bound = self.end;
        let mut current = self.root(store);
        while let Some(node) = current {
            if self.order.less(store.key(node), key) {
                current = store.links(node).right;
            } else {
                bound = node;
                current = store.links(node).left;
            }
        }
        bound
    }

    /// Returns the least node whose key is strictly greater than `key`, or
    /// the sentinel.
    pub fn upper_bound<S>(&self, store: &S, key: &S::Key) -> NodeId
    where
        S: NodeStore<Tag> + ?Sized,
        O: Order<S::Key>,
    {
        let mut bound = self.end;
        let mut current = self.root(store);
        while let Some(node) = current {
            if self.order.less(key, store.key(node)) {
                bound = node;
                current = store.links(node).left;
            } else {
                current = store.links(node).right;
            }
        }
        bound
    }

    /// Verifies the sentinel, parent links, heap order and key order.
    ///
    /// Returns the number of nodes in the tree.
    ///
    /// # Errors
    ///
    /// Returns the first defect found.
    pub fn check<S>(&self, store: &S) -> Result<usize, TreeShapeError>
    where
        S: NodeStore<Tag> + ?Sized,
        O: Order<S::Key>,
    {
        let sentinel = store.links(self.end);
        if sentinel.parent.is_some() || sentinel.right.is_some() {
            return Err(TreeShapeError::SentinelLinked);
        }

        let mut linked = 0;
        let mut pending = Vec::new();
        if let Some(root) = sentinel.left {
            if store.links(root).parent != Some(self.end) {
                return Err(TreeShapeError::BrokenParent(root));
            }
            pending.push(root);
        }
        while let Some(node) = pending.pop() {
            linked += 1;
            let links = store.links(node);
            for child in [links.left, links.right].into_iter().flatten() {
                let child_links = store.links(child);
                if child_links.parent != Some(node) {
                    return Err(TreeShapeError::BrokenParent(child));
                }
                if child_links.priority > links.priority {
                    return Err(TreeShapeError::HeapViolation(child));
                }
                pending.push(child);
            }
        }

        let mut walked = 0;
        let mut previous: Option<NodeId> = None;
        let mut current = self.first(store);
        while current != self.end {
            if let Some(previous) = previous
                && !self.order.less(store.key(previous), store.key(current))
            {
                return Err(TreeShapeError::OutOfOrder(current));
            }
            walked += 1;
            if walked > linked {
                break;
            }
            previous = Some(current);
            current = successor::<Tag, S>(store, current)
                .ok_or(TreeShapeError::BrokenParent(current))?;
        }

        if walked == linked {
            Ok(linked)
        } else {
            Err(TreeShapeError::CountMismatch { walked, linked })
        }
    }

    #[inline]
    fn set_parent<S>(store: &mut S, child: Option<NodeId>, parent: Option<NodeId>)
    where
        S: NodeStore<Tag> + ?Sized,
    {
        if let Some(child) = child {
            store.links_mut(child).parent = parent;
        }
    }
}

impl<Tag, O: Clone> Clone for Treap<Tag, O> {
    fn clone(&self) -> Self {
        Self::new(self.order.clone(), self.end)
    }
}

impl<Tag, O: std::fmt::Debug> std::fmt::Debug for Treap<Tag, O> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Treap")
            .field("order", &self.order)
            .field("end", &self.end)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
