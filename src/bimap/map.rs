//! The bidirectional map.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Bound, RangeBounds};

use tracing::{debug, trace};

use super::config::BimapConfig;
use super::cursor::{Cursor, LeftCursor, RightCursor};
use super::iter::{IntoIter, Iter, Keys, Range};
use super::record::{Records, SENTINEL};
use super::side::{Left, Right, Side};
use crate::error::BimapError;
use crate::order::{Natural, Order};
use crate::treap::{
    NodeId, PrioritySource, Treap, TreeShapeError, leftmost, predecessor, successor,
};

/// An ordered bidirectional map.
///
/// Holds `(L, R)` pairs in which every left key and every right key occurs at
/// most once. Each side is kept sorted under its own order (`LO` for left
/// keys, `RO` for right keys) and can be searched, iterated and edited
/// independently; finding a key on one side yields its partner in O(1).
///
/// Every pair is stored once, in a record that is a node of two treaps at the
/// same time: the left tree orders records by their left key, the right tree
/// by their right key.
///
/// # Examples
///
/// ```rust
/// use treap_bimap::Bimap;
///
/// let mut map = Bimap::new();
/// map.insert(4, 10);
/// map.insert(10, 4);
///
/// let cursor = map.find_right(&4);
/// assert_eq!(map.partner(cursor), Some(&10));
/// assert_eq!(map.at_left(&10), Ok(&4));
///
/// // A pair colliding on either side is refused.
/// assert_eq!(map.insert(4, 99), map.end_left());
/// assert_eq!(map.len(), 2);
/// ```
///
/// # Complexity
///
/// | Operation                          | Expected     |
/// |------------------------------------|--------------|
/// | `insert`, `erase_*`, `remove_*`    | O(log N)     |
/// | `find_*`, `at_*`, bounds           | O(log N)     |
/// | `flip`, `get`, `partner`           | O(1)         |
/// | `next`, `prev`                     | O(1) amortized |
/// | `len`, `is_empty`                  | O(1)         |
pub struct Bimap<L, R, LO = Natural, RO = Natural> {
    records: Records<L, R>,
    left: Treap<Left, LO>,
    right: Treap<Right, RO>,
    length: usize,
    priorities: PrioritySource,
}

static_assertions::assert_impl_all!(Bimap<i32, String>: Send, Sync);

// =============================================================================
// Construction
// =============================================================================

impl<L, R> Bimap<L, R> {
    /// Creates an empty map ordering both sides by [`Ord`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treap_bimap::Bimap;
    ///
    /// let map: Bimap<i32, String> = Bimap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_orders(Natural, Natural)
    }
}

impl<L, R, LO, RO> Bimap<L, R, LO, RO> {
    /// Creates an empty map with the given side orders.
    #[must_use]
    pub fn with_orders(left_order: LO, right_order: RO) -> Self {
        Self::with_config(BimapConfig::new(left_order, right_order))
    }

    /// Creates an empty map from a configuration.
    #[must_use]
    pub fn with_config(config: BimapConfig<LO, RO>) -> Self {
        let BimapConfig {
            left_order,
            right_order,
            seed,
        } = config;
        Self {
            records: Records::with_capacity(0),
            left: Treap::new(left_order, SENTINEL),
            right: Treap::new(right_order, SENTINEL),
            length: 0,
            priorities: PrioritySource::new(seed),
        }
    }

    /// Returns the number of pairs.
    #[inline]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map holds no pairs.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the order of the left side.
    #[inline]
    pub const fn left_order(&self) -> &LO {
        self.left.order()
    }

    /// Returns the order of the right side.
    #[inline]
    pub const fn right_order(&self) -> &RO {
        self.right.order()
    }
}

// =============================================================================
// Cursors
// =============================================================================

impl<L, R, LO, RO> Bimap<L, R, LO, RO> {
    /// Returns a cursor to the least key of side `S`, or the end cursor.
    pub fn begin<S: Side>(&self) -> Cursor<S> {
        self.cursor(leftmost::<S, _>(&self.records, SENTINEL))
    }

    /// Returns the end cursor of side `S`.
    ///
    /// Both sides share one end: `end::<Left>().flip() == end::<Right>()`.
    #[inline]
    pub const fn end<S: Side>(&self) -> Cursor<S> {
        Cursor::end()
    }

    /// Returns a cursor to the pair with the least left key.
    #[inline]
    pub fn begin_left(&self) -> LeftCursor {
        self.begin()
    }

    /// Returns a cursor to the pair with the least right key.
    #[inline]
    pub fn begin_right(&self) -> RightCursor {
        self.begin()
    }

    /// Returns the left end cursor.
    #[inline]
    pub const fn end_left(&self) -> LeftCursor {
        Cursor::end()
    }

    /// Returns the right end cursor.
    #[inline]
    pub const fn end_right(&self) -> RightCursor {
        Cursor::end()
    }

    /// Returns the side-`S` key a cursor points at.
    ///
    /// `None` for the end cursor and for cursors whose pair was erased.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treap_bimap::Bimap;
    ///
    /// let mut map = Bimap::new();
    /// let cursor = map.insert('x', 24);
    /// assert_eq!(map.get(cursor), Some(&'x'));
    /// assert_eq!(map.get(cursor.flip()), Some(&24));
    ///
    /// map.erase_left(cursor);
    /// assert_eq!(map.get(cursor), None);
    /// ```
    pub fn get<S: Side>(&self, cursor: Cursor<S>) -> Option<&S::Key<L, R>> {
        self.records
            .resolve(cursor.node(), cursor.generation())
            .map(S::key)
    }

    /// Returns the partner of the key a cursor points at.
    ///
    /// Same as `self.get(cursor.flip())`.
    pub fn partner<S: Side>(&self, cursor: Cursor<S>) -> Option<&<S::Other as Side>::Key<L, R>> {
        self.records
            .resolve(cursor.node(), cursor.generation())
            .map(S::partner)
    }

    /// Returns the cursor after `cursor` in side-`S` order.
    ///
    /// Stepping from the greatest key, from the end cursor, or from a stale
    /// cursor yields the end cursor.
    pub fn next<S: Side>(&self, cursor: Cursor<S>) -> Cursor<S> {
        if self
            .records
            .resolve(cursor.node(), cursor.generation())
            .is_none()
        {
            return Cursor::end();
        }
        successor::<S, _>(&self.records, cursor.node())
            .map_or_else(Cursor::end, |node| self.cursor(node))
    }

    /// Returns the cursor before `cursor` in side-`S` order.
    ///
    /// Stepping back from the end cursor yields the greatest key. Stepping
    /// back from the least key or from a stale cursor yields the end cursor.
    pub fn prev<S: Side>(&self, cursor: Cursor<S>) -> Cursor<S> {
        if !self.records.is_current(cursor.node(), cursor.generation()) {
            return Cursor::end();
        }
        predecessor::<S, _>(&self.records, cursor.node())
            .map_or_else(Cursor::end, |node| self.cursor(node))
    }

    fn cursor<S: Side>(&self, node: NodeId) -> Cursor<S> {
        Cursor::new(node, self.records.generation(node))
    }
}

// =============================================================================
// Erasure
// =============================================================================

impl<L, R, LO, RO> Bimap<L, R, LO, RO> {
    /// Erases the pair a cursor points at and returns the cursor to the next
    /// key on the same side.
    ///
    /// End and stale cursors leave the map unchanged and yield the end
    /// cursor. Cursors to other pairs stay valid.
    pub fn erase<S: Side>(&mut self, cursor: Cursor<S>) -> Cursor<S> {
        if self
            .records
            .resolve(cursor.node(), cursor.generation())
            .is_none()
        {
            return Cursor::end();
        }
        let (next, _) = self.unlink(cursor.node());
        trace!(side = S::NAME, length = self.length, "erased pair");
        self.cursor(next[S::INDEX])
    }

    /// Erases every pair in `[first, last)` of side `S` and returns `last`.
    ///
    /// `first` must not come after `last`.
    pub fn erase_range<S: Side>(&mut self, first: Cursor<S>, last: Cursor<S>) -> Cursor<S> {
        let mut current = first;
        while current != last && self.get(current).is_some() {
            current = self.erase(current);
        }
        last
    }

    /// Erases the pair a left cursor points at; see [`erase`](Self::erase).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treap_bimap::Bimap;
    ///
    /// let mut map: Bimap<i32, i32> = [(1, 10), (2, 20), (3, 30)].into_iter().collect();
    /// let next = map.erase_left(map.find_left(&2));
    /// assert_eq!(map.get(next), Some(&3));
    /// assert_eq!(map.get_right(&20), None);
    /// ```
    #[inline]
    pub fn erase_left(&mut self, cursor: LeftCursor) -> LeftCursor {
        self.erase(cursor)
    }

    /// Erases the pair a right cursor points at; see [`erase`](Self::erase).
    #[inline]
    pub fn erase_right(&mut self, cursor: RightCursor) -> RightCursor {
        self.erase(cursor)
    }

    /// Erases `[first, last)` in left order and returns `last`.
    #[inline]
    pub fn erase_left_range(&mut self, first: LeftCursor, last: LeftCursor) -> LeftCursor {
        self.erase_range(first, last)
    }

    /// Erases `[first, last)` in right order and returns `last`.
    #[inline]
    pub fn erase_right_range(&mut self, first: RightCursor, last: RightCursor) -> RightCursor {
        self.erase_range(first, last)
    }

    /// Removes every pair.
    ///
    /// All cursors except the end cursors become stale. Allocated capacity
    /// is kept.
    pub fn clear(&mut self) {
        self.records.clear();
        self.length = 0;
        trace!("cleared map");
    }

    /// Unlinks a record from both trees and frees it.
    ///
    /// Returns the successors on the left and right side and the pair.
    fn unlink(&mut self, node: NodeId) -> ([NodeId; 2], (L, R)) {
        let next_left = self.left.remove(&mut self.records, node);
        let next_right = self.right.remove(&mut self.records, node);
        self.length -= 1;
        match self.records.release(node) {
            Some(pair) => ([next_left, next_right], pair),
            None => unreachable!("linked record {node:?} held no pair"),
        }
    }
}

// =============================================================================
// Iteration
// =============================================================================

impl<L, R, LO, RO> Bimap<L, R, LO, RO> {
    /// Iterates over `(left, right)` pairs in ascending left order.
    pub fn iter_left(&self) -> Iter<'_, Left, L, R> {
        Iter::new(&self.records, self.length)
    }

    /// Iterates over `(right, left)` pairs in ascending right order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treap_bimap::Bimap;
    ///
    /// let map: Bimap<&str, u8> = [("b", 1), ("a", 2)].into_iter().collect();
    /// let by_right: Vec<(u8, &str)> = map.iter_right().map(|(r, l)| (*r, *l)).collect();
    /// assert_eq!(by_right, vec![(1, "b"), (2, "a")]);
    /// ```
    pub fn iter_right(&self) -> Iter<'_, Right, L, R> {
        Iter::new(&self.records, self.length)
    }

    /// Iterates over the left keys in ascending order.
    pub fn left_values(&self) -> Keys<'_, Left, L, R> {
        Keys::new(self.iter_left())
    }

    /// Iterates over the right keys in ascending order.
    pub fn right_values(&self) -> Keys<'_, Right, L, R> {
        Keys::new(self.iter_right())
    }
}

// =============================================================================
// Keyed Operations
// =============================================================================

macro_rules! keyed_operations {
    ($side:ident, $Side:ident, $Key:ident, $Partner:ident) => {
        paste::paste! {
            #[doc = "Returns a cursor to the pair whose " $side " key is `key`, or [`end_" $side "`](Self::end_" $side ")."]
            pub fn [<find_ $side>](&self, key: &$Key) -> Cursor<$Side> {
                self.cursor(self.$side.find(&self.records, key))
            }

            #[doc = "Returns `true` if a pair holds `key` on the " $side " side."]
            pub fn [<contains_ $side>](&self, key: &$Key) -> bool {
                !self.$side.is_last(self.$side.find(&self.records, key))
            }

            #[doc = "Returns the partner of the " $side " key `key`, if present."]
            pub fn [<get_ $side>](&self, key: &$Key) -> Option<&$Partner> {
                self.records
                    .pair(self.$side.find(&self.records, key))
                    .map($Side::partner)
            }

            #[doc = "Returns the partner of the " $side " key `key`."]
            ///
            /// # Errors
            ///
            /// Returns [`BimapError::NotFound`] if no pair holds the key.
            pub fn [<at_ $side>](&self, key: &$Key) -> Result<&$Partner, BimapError> {
                self.[<get_ $side>](key).ok_or(BimapError::NotFound {
                    side: $Side::NAME,
                })
            }

            #[doc = "Returns a cursor to the least " $side " key not ordered before `key`, or the end cursor."]
            pub fn [<lower_bound_ $side>](&self, key: &$Key) -> Cursor<$Side> {
                self.cursor(self.$side.lower_bound(&self.records, key))
            }

            #[doc = "Returns a cursor to the least " $side " key ordered after `key`, or the end cursor."]
            pub fn [<upper_bound_ $side>](&self, key: &$Key) -> Cursor<$Side> {
                self.cursor(self.$side.upper_bound(&self.records, key))
            }

            #[doc = "Removes the pair holding the " $side " key `key` and returns it."]
            pub fn [<remove_ $side>](&mut self, key: &$Key) -> Option<(L, R)> {
                let node = self.$side.find(&self.records, key);
                if self.$side.is_last(node) {
                    return None;
                }
                let (_, pair) = self.unlink(node);
                trace!(side = $Side::NAME, length = self.length, "removed pair");
                Some(pair)
            }

            #[doc = "Erases the pair holding the " $side " key `key`."]
            ///
            /// Returns `false` if there is no such pair.
            pub fn [<erase_ $side _key>](&mut self, key: &$Key) -> bool {
                self.[<remove_ $side>](key).is_some()
            }

            #[doc = "Iterates over the pairs whose " $side " key lies in `range`, in " $side " order."]
            ///
            /// Bounds are interpreted under the side's order; a range whose
            /// start comes after its end is empty.
            pub fn [<range_ $side>]<B>(&self, range: B) -> Range<'_, $Side, L, R>
            where
                B: RangeBounds<$Key>,
            {
                let tree = &self.$side;
                if bounds_cross(tree.order(), range.start_bound(), range.end_bound()) {
                    return Range::empty(&self.records);
                }
                let front = match range.start_bound() {
                    Bound::Included(key) => tree.lower_bound(&self.records, key),
                    Bound::Excluded(key) => tree.upper_bound(&self.records, key),
                    Bound::Unbounded => tree.first(&self.records),
                };
                let stop = match range.end_bound() {
                    Bound::Included(key) => tree.upper_bound(&self.records, key),
                    Bound::Excluded(key) => tree.lower_bound(&self.records, key),
                    Bound::Unbounded => tree.last(),
                };
                Range::new(&self.records, front, stop)
            }
        }
    };
}

impl<L, R, LO, RO> Bimap<L, R, LO, RO>
where
    LO: Order<L>,
    RO: Order<R>,
{
    /// Inserts a pair unless either key is already present.
    ///
    /// Returns a left cursor to the new pair. If the left key is already on
    /// the left side or the right key already on the right side, nothing
    /// changes and [`end_left`](Self::end_left) is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treap_bimap::Bimap;
    ///
    /// let mut map = Bimap::new();
    /// let cursor = map.insert(1, "one");
    /// assert_eq!(map.get(cursor), Some(&1));
    ///
    /// assert!(map.insert(1, "uno").is_end());
    /// assert!(map.insert(2, "one").is_end());
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, left: L, right: R) -> LeftCursor {
        if self.contains_left(&left) || self.contains_right(&right) {
            debug!(length = self.length, "refused colliding pair");
            return Cursor::end();
        }
        let node = self.link(left, right);
        trace!(length = self.length, "inserted pair");
        self.cursor(node)
    }

    keyed_operations!(left, Left, L, R);
    keyed_operations!(right, Right, R, L);

    /// Returns the right key paired with `key`, inserting `(key, R::default())`
    /// if `key` is absent.
    ///
    /// When the default right key is already paired with another left key,
    /// that pair is erased first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treap_bimap::Bimap;
    ///
    /// let mut map = Bimap::new();
    /// map.insert(5, 0);
    /// assert_eq!(*map.at_left_or_default(7), 0);
    /// assert!(!map.contains_left(&5));
    /// assert_eq!(map.at_left(&7), Ok(&0));
    /// ```
    pub fn at_left_or_default(&mut self, key: L) -> &R
    where
        R: Default,
    {
        let mut node = self.left.find(&self.records, &key);
        if self.left.is_last(node) {
            let partner = R::default();
            let holder = self.right.find(&self.records, &partner);
            if !self.right.is_last(holder) {
                debug!(side = Left::NAME, "displacing the pair holding the default partner");
                self.unlink(holder);
            }
            node = self.link(key, partner);
        }
        Left::partner(self.records.live(node))
    }

    /// Returns the left key paired with `key`, inserting `(L::default(), key)`
    /// if `key` is absent.
    ///
    /// When the default left key is already paired with another right key,
    /// that pair is erased first.
    pub fn at_right_or_default(&mut self, key: R) -> &L
    where
        L: Default,
    {
        let mut node = self.right.find(&self.records, &key);
        if self.right.is_last(node) {
            let partner = L::default();
            let holder = self.left.find(&self.records, &partner);
            if !self.left.is_last(holder) {
                debug!(side = Right::NAME, "displacing the pair holding the default partner");
                self.unlink(holder);
            }
            node = self.link(partner, key);
        }
        Right::partner(self.records.live(node))
    }

    /// Verifies the shape of both trees and that each holds every pair.
    ///
    /// # Errors
    ///
    /// Returns the first structural defect found.
    pub fn check(&self) -> Result<(), TreeShapeError> {
        for linked in [self.left.check(&self.records)?, self.right.check(&self.records)?] {
            if linked != self.length {
                return Err(TreeShapeError::LengthMismatch {
                    linked,
                    recorded: self.length,
                });
            }
        }
        Ok(())
    }

    /// Allocates a record for a pair known not to collide and links it into
    /// both trees.
    fn link(&mut self, left: L, right: R) -> NodeId {
        let priorities = [
            self.priorities.next_priority(),
            self.priorities.next_priority(),
        ];
        let node = self.records.allocate((left, right), priorities);
        self.left.insert(&mut self.records, node);
        self.right.insert(&mut self.records, node);
        self.length += 1;
        node
    }
}

/// Returns `true` if no key can lie between `start` and `end`.
fn bounds_cross<K, O>(order: &O, start: Bound<&K>, end: Bound<&K>) -> bool
where
    K: ?Sized,
    O: Order<K>,
{
    match (start, end) {
        (Bound::Unbounded, _) | (_, Bound::Unbounded) => false,
        (Bound::Excluded(start), Bound::Excluded(end)) => !order.less(start, end),
        (
            Bound::Included(start) | Bound::Excluded(start),
            Bound::Included(end) | Bound::Excluded(end),
        ) => order.less(end, start),
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<L, R, LO: Default, RO: Default> Default for Bimap<L, R, LO, RO> {
    fn default() -> Self {
        Self::with_orders(LO::default(), RO::default())
    }
}

/// Deep copy, rebuilt in ascending left order.
///
/// If cloning a key panics, the partial copy is dropped during unwinding and
/// the source is untouched.
impl<L, R, LO, RO> Clone for Bimap<L, R, LO, RO>
where
    L: Clone,
    R: Clone,
    LO: Order<L> + Clone,
    RO: Order<R> + Clone,
{
    fn clone(&self) -> Self {
        let mut copy = Self {
            records: Records::with_capacity(self.length),
            left: self.left.clone(),
            right: self.right.clone(),
            length: 0,
            priorities: self.priorities.clone(),
        };
        for (left, right) in self.iter_left() {
            copy.link(left.clone(), right.clone());
        }
        trace!(length = copy.length, "cloned map");
        copy
    }
}

impl<L: PartialEq, R: PartialEq, LO, RO> PartialEq for Bimap<L, R, LO, RO> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter_left().eq(other.iter_left())
    }
}

impl<L: Eq, R: Eq, LO, RO> Eq for Bimap<L, R, LO, RO> {}

/// Hashes the length, then every pair in ascending left order.
impl<L: Hash, R: Hash, LO, RO> Hash for Bimap<L, R, LO, RO> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for (left, right) in self {
            left.hash(state);
            right.hash(state);
        }
    }
}

impl<L: fmt::Debug, R: fmt::Debug, LO, RO> fmt::Debug for Bimap<L, R, LO, RO> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter_left()).finish()
    }
}

impl<L: fmt::Display, R: fmt::Display, LO, RO> fmt::Display for Bimap<L, R, LO, RO> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (left, right) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{left} <> {right}")?;
        }
        write!(formatter, "}}")
    }
}

impl<L, R, LO, RO> FromIterator<(L, R)> for Bimap<L, R, LO, RO>
where
    LO: Order<L> + Default,
    RO: Order<R> + Default,
{
    fn from_iter<I: IntoIterator<Item = (L, R)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

/// Inserts every pair in turn; colliding pairs are skipped like in
/// [`Bimap::insert`].
impl<L, R, LO, RO> Extend<(L, R)> for Bimap<L, R, LO, RO>
where
    LO: Order<L>,
    RO: Order<R>,
{
    fn extend<I: IntoIterator<Item = (L, R)>>(&mut self, iter: I) {
        for (left, right) in iter {
            self.insert(left, right);
        }
    }
}

impl<L, R, LO, RO> IntoIterator for Bimap<L, R, LO, RO> {
    type Item = (L, R);
    type IntoIter = IntoIter<L, R>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.records, self.length)
    }
}

impl<'a, L, R, LO, RO> IntoIterator for &'a Bimap<L, R, LO, RO> {
    type Item = (&'a L, &'a R);
    type IntoIter = Iter<'a, Left, L, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_left()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<L, R, LO, RO> serde::Serialize for Bimap<L, R, LO, RO>
where
    L: serde::Serialize,
    R: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter_left())
    }
}

#[cfg(feature = "serde")]
struct BimapVisitor<L, R, LO, RO> {
    marker: std::marker::PhantomData<fn() -> Bimap<L, R, LO, RO>>,
}

#[cfg(feature = "serde")]
impl<L, R, LO, RO> BimapVisitor<L, R, LO, RO> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, L, R, LO, RO> serde::de::Visitor<'de> for BimapVisitor<L, R, LO, RO>
where
    L: serde::Deserialize<'de>,
    R: serde::Deserialize<'de>,
    LO: Order<L> + Default,
    RO: Order<R> + Default,
{
    type Value = Bimap<L, R, LO, RO>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of pairs")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut map = Bimap::default();
        while let Some((left, right)) = access.next_element::<(L, R)>()? {
            map.insert(left, right);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, L, R, LO, RO> serde::Deserialize<'de> for Bimap<L, R, LO, RO>
where
    L: serde::Deserialize<'de>,
    R: serde::Deserialize<'de>,
    LO: Order<L> + Default,
    RO: Order<R> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(BimapVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Reverse;
    use crate::treap::Seed;
    use rstest::rstest;

    fn seeded() -> Bimap<i32, i32> {
        Bimap::with_config(BimapConfig::default().with_seed(Seed::Fixed(7)))
    }

    #[rstest]
    fn test_insert_links_both_trees() {
        let mut map = seeded();
        for (left, right) in [(3, 30), (1, 10), (2, 20)] {
            assert!(!map.insert(left, right).is_end());
        }
        assert_eq!(map.check(), Ok(()));
        assert_eq!(map.records.generation(SENTINEL), 0);
        assert_eq!(map.left.check(&map.records), Ok(3));
        assert_eq!(map.right.check(&map.records), Ok(3));
    }

    #[rstest]
    fn test_unlink_returns_successors_per_side() {
        let mut map = Bimap::with_orders(Natural, Reverse);
        map.insert(1, 1);
        map.insert(2, 2);
        map.insert(3, 3);
        let node = map.find_left(&2).node();
        let ([next_left, next_right], pair) = map.unlink(node);
        assert_eq!(pair, (2, 2));
        assert_eq!(map.records.pair(next_left), Some(&(3, 3)));
        assert_eq!(map.records.pair(next_right), Some(&(1, 1)));
        assert_eq!(map.check(), Ok(()));
    }

    #[rstest]
    fn test_slot_reuse_does_not_revive_stale_cursor() {
        let mut map = seeded();
        let stale = map.insert(1, 1);
        map.erase_left(stale);
        let fresh = map.insert(2, 2);
        assert_eq!(stale.node(), fresh.node());
        assert_ne!(stale, fresh);
        assert_eq!(map.get(stale), None);
        assert_eq!(map.next(stale), map.end_left());
        assert_eq!(map.erase_left(stale), map.end_left());
        assert_eq!(map.len(), 1);
    }

    #[rstest]
    #[case(Bound::Included(3), Bound::Included(2), true)]
    #[case(Bound::Included(2), Bound::Included(2), false)]
    #[case(Bound::Excluded(2), Bound::Excluded(2), true)]
    #[case(Bound::Included(2), Bound::Excluded(2), false)]
    #[case(Bound::Excluded(1), Bound::Excluded(2), false)]
    #[case(Bound::Unbounded, Bound::Included(0), false)]
    fn test_bounds_cross(
        #[case] start: Bound<i32>,
        #[case] end: Bound<i32>,
        #[case] expected: bool,
    ) {
        assert_eq!(bounds_cross(&Natural, start.as_ref(), end.as_ref()), expected);
    }

    #[rstest]
    fn test_clear_resets_sentinel() {
        let mut map = seeded();
        map.extend((0..16).map(|key| (key, -key)));
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.begin_left(), map.end_left());
        assert_eq!(map.begin_right(), map.end_right());
        assert_eq!(map.check(), Ok(()));
        map.insert(5, 5);
        assert_eq!(map.check(), Ok(()));
    }
}
