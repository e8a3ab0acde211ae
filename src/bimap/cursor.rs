//! Cursors into one side of a [`Bimap`](crate::Bimap).

use std::fmt;
use std::marker::PhantomData;

use super::record::SENTINEL;
use super::side::{Left, Right, Side};
use crate::treap::NodeId;

/// A position on side `S` of a bimap.
///
/// A cursor is a plain handle to a record: it borrows nothing, so it stays
/// usable across mutations of the map. Rebalancing never moves it. Erasing
/// the record it names makes it stale, and the map answers stale cursors as
/// it answers the end cursor.
///
/// The end cursors of both sides name the same shared sentinel, which is why
/// [`flip`](Self::flip) maps one end onto the other.
///
/// # Examples
///
/// ```rust
/// use treap_bimap::Bimap;
///
/// let mut map = Bimap::new();
/// let cursor = map.insert("one", 1);
///
/// assert_eq!(map.get(cursor), Some(&"one"));
/// assert_eq!(map.get(cursor.flip()), Some(&1));
/// assert_eq!(cursor.flip().flip(), cursor);
/// assert_eq!(map.end_left().flip(), map.end_right());
/// ```
pub struct Cursor<S> {
    node: NodeId,
    generation: u32,
    side: PhantomData<S>,
}

/// A cursor on the left side.
pub type LeftCursor = Cursor<Left>;

/// A cursor on the right side.
pub type RightCursor = Cursor<Right>;

impl<S: Side> Cursor<S> {
    #[inline]
    pub(crate) const fn new(node: NodeId, generation: u32) -> Self {
        Self {
            node,
            generation,
            side: PhantomData,
        }
    }

    #[inline]
    pub(crate) const fn end() -> Self {
        Self::new(SENTINEL, 0)
    }

    #[inline]
    pub(crate) const fn node(self) -> NodeId {
        self.node
    }

    #[inline]
    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }

    /// Returns the cursor to the same record on the other side.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn flip(self) -> Cursor<S::Other> {
        Cursor::new(self.node, self.generation)
    }

    /// Returns `true` if this is the end cursor.
    #[inline]
    pub fn is_end(self) -> bool {
        self.node == SENTINEL
    }
}

impl<S> Clone for Cursor<S> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Cursor<S> {}

impl<S> PartialEq for Cursor<S> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.generation == other.generation
    }
}

impl<S> Eq for Cursor<S> {}

impl<S> std::hash::Hash for Cursor<S> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.node.hash(state);
        self.generation.hash(state);
    }
}

impl<S: Side> fmt::Debug for Cursor<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            write!(formatter, "Cursor<{}>(end)", S::NAME)
        } else {
            write!(
                formatter,
                "Cursor<{}>({}#{})",
                S::NAME,
                self.node.index(),
                self.generation
            )
        }
    }
}

static_assertions::assert_impl_all!(LeftCursor: Copy, Send, Sync);
static_assertions::assert_impl_all!(RightCursor: Copy, Send, Sync);
