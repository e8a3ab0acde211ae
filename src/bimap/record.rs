//! The arena of dual-role records.
//!
//! Every stored pair occupies one slot holding two links blocks, one per
//! side, so the same record is a node of the left tree and of the right tree
//! at once. Slot 0 is the sentinel both trees share.

use super::side::Side;
use crate::treap::{Links, NodeId, NodeStore};

/// The shared past-the-end record.
pub(crate) const SENTINEL: NodeId = NodeId::new(0);

struct Record<L, R> {
    links: [Links; 2],
    generation: u32,
    pair: Option<(L, R)>,
}

impl<L, R> Record<L, R> {
    const fn sentinel() -> Self {
        Self {
            links: [Links::detached(u32::MAX); 2],
            generation: 0,
            pair: None,
        }
    }
}

/// Slot storage for the pairs of one map.
///
/// Freed slots are reused. Each slot carries a generation that is bumped
/// whenever its pair is released, so a handle taken before the release no
/// longer resolves.
pub(crate) struct Records<L, R> {
    slots: Vec<Record<L, R>>,
    vacant: Vec<NodeId>,
}

impl<L, R> Records<L, R> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.saturating_add(1));
        slots.push(Record::sentinel());
        Self {
            slots,
            vacant: Vec::new(),
        }
    }

    /// Stores `pair` in a detached record.
    pub(crate) fn allocate(&mut self, pair: (L, R), priorities: [u32; 2]) -> NodeId {
        let links = priorities.map(Links::detached);
        if let Some(node) = self.vacant.pop() {
            let record = &mut self.slots[node.index()];
            record.links = links;
            record.pair = Some(pair);
            node
        } else {
            self.slots.push(Record {
                links,
                generation: 0,
                pair: Some(pair),
            });
            NodeId::new(self.slots.len() - 1)
        }
    }

    /// Frees a record already unlinked from both trees and returns its pair.
    pub(crate) fn release(&mut self, node: NodeId) -> Option<(L, R)> {
        let record = self.slots.get_mut(node.index())?;
        let pair = record.pair.take()?;
        record.generation = record.generation.wrapping_add(1);
        self.vacant.push(node);
        Some(pair)
    }

    /// Moves the pair out of a record without freeing the slot.
    ///
    /// The links stay intact, so traversal can continue past the record.
    pub(crate) fn take(&mut self, node: NodeId) -> Option<(L, R)> {
        self.slots.get_mut(node.index())?.pair.take()
    }

    /// Releases every record and empties both trees. Capacity is kept.
    pub(crate) fn clear(&mut self) {
        self.vacant.clear();
        for (index, record) in self.slots.iter_mut().enumerate().skip(1) {
            if record.pair.take().is_some() {
                record.generation = record.generation.wrapping_add(1);
            }
            record.links.iter_mut().for_each(Links::detach);
            self.vacant.push(NodeId::new(index));
        }
        self.slots[SENTINEL.index()] = Record::sentinel();
    }

    /// Returns the current generation of a slot, 0 for unknown slots.
    pub(crate) fn generation(&self, node: NodeId) -> u32 {
        self.slots
            .get(node.index())
            .map_or(0, |record| record.generation)
    }

    /// Returns `true` if the handle names the sentinel or a slot whose
    /// generation it matches.
    pub(crate) fn is_current(&self, node: NodeId, generation: u32) -> bool {
        self.slots
            .get(node.index())
            .is_some_and(|record| record.generation == generation)
    }

    /// Returns the pair a handle names, if it is still stored there.
    pub(crate) fn resolve(&self, node: NodeId, generation: u32) -> Option<&(L, R)> {
        let record = self.slots.get(node.index())?;
        if record.generation == generation {
            record.pair.as_ref()
        } else {
            None
        }
    }

    /// Returns the pair of a record, `None` for the sentinel.
    pub(crate) fn pair(&self, node: NodeId) -> Option<&(L, R)> {
        self.slots.get(node.index())?.pair.as_ref()
    }

    /// Returns the pair of a record known to be linked.
    pub(crate) fn live(&self, node: NodeId) -> &(L, R) {
        match self.pair(node) {
            Some(pair) => pair,
            None => unreachable!("record {node:?} is linked but holds no pair"),
        }
    }
}

impl<L, R, S: Side> NodeStore<S> for Records<L, R> {
    type Key = S::Key<L, R>;

    #[inline]
    fn links(&self, node: NodeId) -> &Links {
        &self.slots[node.index()].links[S::INDEX]
    }

    #[inline]
    fn links_mut(&mut self, node: NodeId) -> &mut Links {
        &mut self.slots[node.index()].links[S::INDEX]
    }

    #[inline]
    fn key(&self, node: NodeId) -> &S::Key<L, R> {
        S::key(self.live(node))
    }
}
