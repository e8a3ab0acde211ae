//! Iterators over the pairs of a [`Bimap`](crate::Bimap).

use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::record::{Records, SENTINEL};
use super::side::{Left, Side};
use crate::treap::{NodeId, leftmost, predecessor, successor};

// =============================================================================
// Span
// =============================================================================

/// The part of one side not yet yielded, as an inclusive node range.
struct Span<S> {
    front: NodeId,
    back: NodeId,
    exhausted: bool,
    side: PhantomData<S>,
}

impl<S> Clone for Span<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Span<S> {}

impl<S: Side> Span<S> {
    const fn empty() -> Self {
        Self {
            front: SENTINEL,
            back: SENTINEL,
            exhausted: true,
            side: PhantomData,
        }
    }

    /// Covers the whole side.
    fn full<L, R>(records: &Records<L, R>) -> Self {
        let front = leftmost::<S, _>(records, SENTINEL);
        Self::until(records, front, SENTINEL)
    }

    /// Covers `[front, stop)`; `front` must not come after `stop`.
    fn until<L, R>(records: &Records<L, R>, front: NodeId, stop: NodeId) -> Self {
        if front == stop {
            return Self::empty();
        }
        match predecessor::<S, _>(records, stop) {
            Some(back) => Self {
                front,
                back,
                exhausted: false,
                side: PhantomData,
            },
            None => Self::empty(),
        }
    }

    fn pop_front<L, R>(&mut self, records: &Records<L, R>) -> Option<NodeId> {
        if self.exhausted {
            return None;
        }
        let node = self.front;
        if node == self.back {
            self.exhausted = true;
        } else {
            self.front = successor::<S, _>(records, node).unwrap_or(SENTINEL);
        }
        Some(node)
    }

    fn pop_back<L, R>(&mut self, records: &Records<L, R>) -> Option<NodeId> {
        if self.exhausted {
            return None;
        }
        let node = self.back;
        if node == self.front {
            self.exhausted = true;
        } else {
            self.back = predecessor::<S, _>(records, node).unwrap_or(SENTINEL);
        }
        Some(node)
    }
}

// =============================================================================
// Iter
// =============================================================================

/// An iterator over the pairs of a bimap in the order of side `S`.
///
/// Yields `(key, partner)` references: for [`Left`] that is `(&L, &R)`, for
/// [`Right`](super::side::Right) `(&R, &L)`.
///
/// Created by [`Bimap::iter_left`](crate::Bimap::iter_left) and
/// [`Bimap::iter_right`](crate::Bimap::iter_right).
pub struct Iter<'a, S, L, R> {
    records: &'a Records<L, R>,
    span: Span<S>,
    remaining: usize,
}

impl<'a, S: Side, L, R> Iter<'a, S, L, R> {
    pub(crate) fn new(records: &'a Records<L, R>, length: usize) -> Self {
        Self {
            records,
            span: Span::full(records),
            remaining: length,
        }
    }

    fn project(&self, node: NodeId) -> (&'a S::Key<L, R>, &'a <S::Other as Side>::Key<L, R>) {
        let pair = self.records.live(node);
        (S::key(pair), S::partner(pair))
    }
}

impl<'a, S: Side, L: 'a, R: 'a> Iterator for Iter<'a, S, L, R> {
    type Item = (&'a S::Key<L, R>, &'a <S::Other as Side>::Key<L, R>);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.span.pop_front(self.records)?;
        self.remaining -= 1;
        Some(self.project(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, S: Side, L: 'a, R: 'a> DoubleEndedIterator for Iter<'a, S, L, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let node = self.span.pop_back(self.records)?;
        self.remaining -= 1;
        Some(self.project(node))
    }
}

impl<'a, S: Side, L: 'a, R: 'a> ExactSizeIterator for Iter<'a, S, L, R> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<'a, S: Side, L: 'a, R: 'a> FusedIterator for Iter<'a, S, L, R> {}

impl<S, L, R> Clone for Iter<'_, S, L, R> {
    fn clone(&self) -> Self {
        Self {
            records: self.records,
            span: self.span,
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// Range
// =============================================================================

/// An iterator over the pairs whose side-`S` key lies in a range.
///
/// Created by [`Bimap::range_left`](crate::Bimap::range_left) and
/// [`Bimap::range_right`](crate::Bimap::range_right).
pub struct Range<'a, S, L, R> {
    records: &'a Records<L, R>,
    span: Span<S>,
}

impl<'a, S: Side, L, R> Range<'a, S, L, R> {
    pub(crate) fn new(records: &'a Records<L, R>, front: NodeId, stop: NodeId) -> Self {
        Self {
            records,
            span: Span::until(records, front, stop),
        }
    }

    pub(crate) const fn empty(records: &'a Records<L, R>) -> Self {
        Self {
            records,
            span: Span::empty(),
        }
    }
}

impl<'a, S: Side, L: 'a, R: 'a> Iterator for Range<'a, S, L, R> {
    type Item = (&'a S::Key<L, R>, &'a <S::Other as Side>::Key<L, R>);

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.records.live(self.span.pop_front(self.records)?);
        Some((S::key(pair), S::partner(pair)))
    }
}

impl<'a, S: Side, L: 'a, R: 'a> DoubleEndedIterator for Range<'a, S, L, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let pair = self.records.live(self.span.pop_back(self.records)?);
        Some((S::key(pair), S::partner(pair)))
    }
}

impl<'a, S: Side, L: 'a, R: 'a> FusedIterator for Range<'a, S, L, R> {}

// =============================================================================
// Keys
// =============================================================================

/// An iterator over the keys of side `S`, in that side's order.
///
/// Created by [`Bimap::left_values`](crate::Bimap::left_values) and
/// [`Bimap::right_values`](crate::Bimap::right_values).
pub struct Keys<'a, S, L, R> {
    inner: Iter<'a, S, L, R>,
}

impl<'a, S: Side, L, R> Keys<'a, S, L, R> {
    pub(crate) const fn new(inner: Iter<'a, S, L, R>) -> Self {
        Self { inner }
    }
}

impl<'a, S: Side, L: 'a, R: 'a> Iterator for Keys<'a, S, L, R> {
    type Item = &'a S::Key<L, R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, S: Side, L: 'a, R: 'a> DoubleEndedIterator for Keys<'a, S, L, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<'a, S: Side, L: 'a, R: 'a> ExactSizeIterator for Keys<'a, S, L, R> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a, S: Side, L: 'a, R: 'a> FusedIterator for Keys<'a, S, L, R> {}

// =============================================================================
// IntoIter
// =============================================================================

/// An owning iterator over the pairs of a bimap in left order.
///
/// Created by the [`IntoIterator`] implementation of
/// [`Bimap`](crate::Bimap).
pub struct IntoIter<L, R> {
    records: Records<L, R>,
    span: Span<Left>,
    remaining: usize,
}

impl<L, R> IntoIter<L, R> {
    pub(crate) fn new(records: Records<L, R>, length: usize) -> Self {
        let span = Span::full(&records);
        Self {
            records,
            span,
            remaining: length,
        }
    }
}

impl<L, R> Iterator for IntoIter<L, R> {
    type Item = (L, R);

    fn next(&mut self) -> Option<(L, R)> {
        let node = self.span.pop_front(&self.records)?;
        self.remaining -= 1;
        match self.records.take(node) {
            Some(pair) => Some(pair),
            None => unreachable!("record {node:?} was yielded twice"),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<L, R> DoubleEndedIterator for IntoIter<L, R> {
    fn next_back(&mut self) -> Option<(L, R)> {
        let node = self.span.pop_back(&self.records)?;
        self.remaining -= 1;
        match self.records.take(node) {
            Some(pair) => Some(pair),
            None => unreachable!("record {node:?} was yielded twice"),
        }
    }
}

impl<L, R> ExactSizeIterator for IntoIter<L, R> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<L, R> FusedIterator for IntoIter<L, R> {}
