//! Slab storage for the nodes of a [`LinkedSequence`](crate::LinkedSequence).
//!
//! Nodes live in a `Vec` and refer to each other by slot index. The
//! forward links from the head define the sequence; backward links are
//! navigation only and are always written in the same step as the
//! forward link they mirror. A released slot has its value and both
//! links cleared and its index pushed on the free list; released slots
//! at the end of the `Vec` are popped instead, and `clear` drops the
//! whole slab. Every allocation takes a fresh stamp from a slab-wide
//! counter that survives `clear`, so a [`NodeRef`] taken before the
//! release never matches again.

use weft_core::ContainerId;

/// Stable handle to one live node of a linked sequence.
///
/// Valid until that node is removed; afterwards every use fails with
/// [`SeqError::StaleNode`](weft_core::SeqError::StaleNode), even if the
/// slot has been reused for a new node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub(crate) owner: ContainerId,
    pub(crate) index: usize,
    pub(crate) stamp: u64,
}

impl NodeRef {
    /// Container the node belongs to.
    pub fn owner(&self) -> ContainerId {
        self.owner
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    value: Option<T>,
    next: Option<usize>,
    prev: Option<usize>,
    stamp: u64,
}

/// Slot storage with a free list.
///
/// The free list may hold indices past the end of `nodes` after a
/// trailing run was popped; `alloc` discards those. `nodes` only grows
/// while the free list is empty, so such an index never comes back into
/// range.
#[derive(Clone, Debug)]
pub(crate) struct NodeSlab<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    next_stamp: u64,
}

impl<T> NodeSlab<T> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            next_stamp: 0,
        }
    }

    /// Store `value` in a fresh unlinked node and return its slot.
    pub(crate) fn alloc(&mut self, value: T) -> usize {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        while let Some(index) = self.free.pop() {
            if let Some(node) = self.nodes.get_mut(index) {
                node.value = Some(value);
                node.stamp = stamp;
                return index;
            }
        }
        self.nodes.push(Node {
            value: Some(value),
            next: None,
            prev: None,
            stamp,
        });
        self.nodes.len() - 1
    }

    /// Clear the slot at `index` and return its value.
    pub(crate) fn release(&mut self, index: usize) -> Option<T> {
        let node = self.nodes.get_mut(index)?;
        let value = node.value.take()?;
        node.next = None;
        node.prev = None;
        if index + 1 == self.nodes.len() {
            self.trim();
        } else {
            self.free.push(index);
        }
        Some(value)
    }

    /// Pop released slots off the end and give back spare memory.
    fn trim(&mut self) {
        while self.nodes.last().is_some_and(|node| node.value.is_none()) {
            self.nodes.pop();
        }
        if self.nodes.is_empty() {
            self.free.clear();
        }
        let capacity = self.nodes.capacity();
        if self.nodes.len() < capacity / 4 {
            self.nodes.shrink_to(capacity / 2);
        }
    }

    /// Drop every node and release the storage.
    pub(crate) fn clear(&mut self) {
        self.nodes = Vec::new();
        self.free = Vec::new();
    }

    pub(crate) fn stamp(&self, index: usize) -> u64 {
        self.nodes[index].stamp
    }

    pub(crate) fn is_live(&self, index: usize, stamp: u64) -> bool {
        self.nodes
            .get(index)
            .is_some_and(|node| node.stamp == stamp && node.value.is_some())
    }

    pub(crate) fn value(&self, index: usize) -> Option<&T> {
        self.nodes.get(index)?.value.as_ref()
    }

    pub(crate) fn value_mut(&mut self, index: usize) -> Option<&mut T> {
        self.nodes.get_mut(index)?.value.as_mut()
    }

    pub(crate) fn next(&self, index: usize) -> Option<usize> {
        self.nodes[index].next
    }

    pub(crate) fn prev(&self, index: usize) -> Option<usize> {
        self.nodes[index].prev
    }

    pub(crate) fn set_next(&mut self, index: usize, next: Option<usize>) {
        self.nodes[index].next = next;
    }

    pub(crate) fn set_prev(&mut self, index: usize, prev: Option<usize>) {
        self.nodes[index].prev = prev;
    }

    /// Mutable borrows of the values in `order`, which must list
    /// distinct live slots.
    ///
    /// Allocates in proportion to `order`, not to the slab.
    pub(crate) fn values_mut_in(&mut self, order: &[usize]) -> Vec<&mut T> {
        let mut by_slot: Vec<(usize, usize)> = order
            .iter()
            .enumerate()
            .map(|(rank, &slot)| (slot, rank))
            .collect();
        by_slot.sort_unstable();
        let mut ranked: Vec<Option<&mut T>> = Vec::with_capacity(order.len());
        ranked.resize_with(order.len(), || None);
        let mut wanted = by_slot.into_iter().peekable();
        for (slot, node) in self.nodes.iter_mut().enumerate() {
            match wanted.peek() {
                Some(&(next, rank)) if next == slot => {
                    ranked[rank] = node.value.as_mut();
                    wanted.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        ranked.into_iter().flatten().collect()
    }

    /// Number of slots, live or free.
    #[cfg(test)]
    pub(crate) fn slots(&self) -> usize {
        self.nodes.len()
    }

    /// Number of free slots.
    #[cfg(test)]
    pub(crate) fn free_slots(&self) -> usize {
        self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_bumps_stamp_and_recycles_slot() {
        let mut slab = NodeSlab::new();
        let a = slab.alloc("a");
        let stamp = slab.stamp(a);
        assert!(slab.is_live(a, stamp));
        assert_eq!(slab.release(a), Some("a"));
        assert!(!slab.is_live(a, stamp));
        assert_eq!(slab.release(a), None);
        let b = slab.alloc("b");
        assert_eq!(b, a);
        assert!(!slab.is_live(b, stamp));
        assert!(slab.is_live(b, slab.stamp(b)));
    }

    #[test]
    fn interior_release_goes_on_free_list() {
        let mut slab = NodeSlab::new();
        let slots: Vec<usize> = (0..4).map(|v| slab.alloc(v)).collect();
        slab.release(slots[1]);
        assert_eq!(slab.slots(), 4);
        assert_eq!(slab.free_slots(), 1);
        assert_eq!(slab.alloc(9), slots[1]);
        assert_eq!(slab.free_slots(), 0);
    }

    #[test]
    fn trailing_releases_shrink_the_slab() {
        let mut slab = NodeSlab::new();
        let slots: Vec<usize> = (0..4).map(|v| slab.alloc(v)).collect();
        slab.release(slots[2]);
        slab.release(slots[3]);
        assert_eq!(slab.slots(), 2);
        assert_eq!(slab.value(slots[3]), None);
        slab.release(slots[0]);
        slab.release(slots[1]);
        assert_eq!(slab.slots(), 0);
        assert_eq!(slab.free_slots(), 0);
    }

    #[test]
    fn out_of_range_free_entries_are_skipped() {
        let mut slab = NodeSlab::new();
        let slots: Vec<usize> = (0..3).map(|v| slab.alloc(v)).collect();
        slab.release(slots[1]);
        slab.release(slots[2]);
        assert_eq!(slab.slots(), 1);
        let a = slab.alloc(10);
        let b = slab.alloc(11);
        assert_eq!((a, b), (1, 2));
        assert_eq!(slab.value(a), Some(&10));
        assert_eq!(slab.value(b), Some(&11));
        assert_eq!(slab.free_slots(), 0);
    }

    #[test]
    fn clear_drops_storage_but_keeps_stamps_fresh() {
        let mut slab = NodeSlab::new();
        let first = slab.alloc(0);
        let old = slab.stamp(first);
        for v in 1..100 {
            slab.alloc(v);
        }
        slab.clear();
        assert_eq!(slab.slots(), 0);
        assert_eq!(slab.free_slots(), 0);
        let again = slab.alloc(7);
        assert_eq!(again, first);
        assert!(!slab.is_live(again, old));
        assert!(slab.is_live(again, slab.stamp(again)));
    }

    #[test]
    fn values_in_chain_order() {
        let mut slab = NodeSlab::new();
        let slots: Vec<usize> = (0..5).map(|v| slab.alloc(v * 10)).collect();
        let order = [slots[3], slots[0], slots[4]];
        for value in slab.values_mut_in(&order) {
            *value += 1;
        }
        assert_eq!(slab.value(slots[3]), Some(&31));
        assert_eq!(slab.value(slots[0]), Some(&1));
        assert_eq!(slab.value(slots[1]), Some(&10));
        let seen: Vec<i32> = slab.values_mut_in(&order).into_iter().map(|v| *v).collect();
        assert_eq!(seen, vec![31, 1, 41]);
    }
}
