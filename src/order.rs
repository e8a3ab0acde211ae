//! Ordering relations used to arrange each side of a [`Bimap`](crate::Bimap).
//!
//! A relation is supplied once, at construction, and stays fixed for the
//! lifetime of the container. It must be a strict total order: two keys that
//! compare [`Ordering::Equal`] are treated as the same key.
//!
//! # Examples
//!
//! ```rust
//! use std::cmp::Ordering;
//! use treap_bimap::order::{Natural, Order, OrderBy, Reverse};
//!
//! assert_eq!(Natural.compare(&1, &2), Ordering::Less);
//! assert_eq!(Reverse.compare(&1, &2), Ordering::Greater);
//!
//! let by_length = OrderBy::new(|a: &&str, b: &&str| a.len().cmp(&b.len()));
//! assert_eq!(by_length.compare(&"abc", &"de"), Ordering::Greater);
//! ```

use std::cmp::Ordering;
use std::fmt;

/// A total order over keys of type `K`.
pub trait Order<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, left: &K, right: &K) -> Ordering;

    /// Returns `true` if `left` orders strictly before `right`.
    #[inline]
    fn less(&self, left: &K, right: &K) -> bool {
        self.compare(left, right) == Ordering::Less
    }
}

/// The order given by the key's own [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Order<K> for Natural {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }
}

/// The reverse of the key's [`Ord`] implementation.
///
/// A side ordered by `Reverse` iterates from the greatest key down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Reverse;

impl<K: Ord + ?Sized> Order<K> for Reverse {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        right.cmp(left)
    }
}

/// An order defined by a comparison function.
///
/// # Examples
///
/// ```rust
/// use treap_bimap::Bimap;
/// use treap_bimap::order::{Natural, OrderBy};
///
/// let by_magnitude = OrderBy::new(|a: &i32, b: &i32| a.abs().cmp(&b.abs()));
/// let mut map = Bimap::with_orders(by_magnitude, Natural);
/// map.insert(-3, 'a');
/// map.insert(1, 'b');
/// map.insert(2, 'c');
///
/// let lefts: Vec<i32> = map.left_values().copied().collect();
/// assert_eq!(lefts, vec![1, 2, -3]);
/// ```
#[derive(Clone, Copy, Default)]
pub struct OrderBy<F> {
    comparator: F,
}

impl<F> OrderBy<F> {
    /// Wraps a comparison function.
    #[inline]
    pub const fn new(comparator: F) -> Self {
        Self { comparator }
    }
}

impl<K: ?Sized, F> Order<K> for OrderBy<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        (self.comparator)(left, right)
    }
}

impl<F> fmt::Debug for OrderBy<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("OrderBy(..)")
    }
}
