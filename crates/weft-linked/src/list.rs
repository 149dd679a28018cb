//! The doubly-linked sequence.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::iter::FusedIterator;

use smallvec::SmallVec;
use weft_core::{ContainerId, Deque, Generation, SeqError, Sequence};

use crate::config::BatchPolicy;
use crate::cursor::{DescendingCursor, LinkedCursor};
use crate::node::{NodeRef, NodeSlab};
use crate::split::LinkedSplitCursor;

/// A doubly-linked sequence with O(1) operations at both ends.
///
/// Nodes are stored in an index slab; links are slot indices. Positional
/// operations walk from whichever end is nearer, so they cost
/// O(min(i, len - i)). Inserts hand back a [`NodeRef`] that allows O(1)
/// insertion before, and removal of, that node later.
pub struct LinkedSequence<T> {
    slab: NodeSlab<T>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    generation: Generation,
    id: ContainerId,
}

impl<T> LinkedSequence<T> {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self {
            slab: NodeSlab::new(),
            head: None,
            tail: None,
            len: 0,
            generation: Generation::ZERO,
            id: ContainerId::next(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current structural generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Identity of this sequence instance.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    // ── Link primitives ─────────────────────────────────────────
    //
    // These maintain `len` and the links but leave the generation to
    // the public operation, so bulk operations can bump it once.

    fn link_first(&mut self, value: T) -> usize {
        let node = self.slab.alloc(value);
        let old_head = self.head;
        self.slab.set_next(node, old_head);
        match old_head {
            Some(h) => self.slab.set_prev(h, Some(node)),
            None => self.tail = Some(node),
        }
        self.head = Some(node);
        self.len += 1;
        node
    }

    fn link_last(&mut self, value: T) -> usize {
        let node = self.slab.alloc(value);
        let old_tail = self.tail;
        self.slab.set_prev(node, old_tail);
        match old_tail {
            Some(t) => self.slab.set_next(t, Some(node)),
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
        node
    }

    fn link_before(&mut self, value: T, succ: usize) -> usize {
        let pred = self.slab.prev(succ);
        let node = self.slab.alloc(value);
        self.slab.set_prev(node, pred);
        self.slab.set_next(node, Some(succ));
        self.slab.set_prev(succ, Some(node));
        match pred {
            Some(p) => self.slab.set_next(p, Some(node)),
            None => self.head = Some(node),
        }
        self.len += 1;
        node
    }

    fn unlink(&mut self, node: usize) -> Result<T, SeqError> {
        let prev = self.slab.prev(node);
        let next = self.slab.next(node);
        let value = self.slab.release(node).ok_or(SeqError::StaleNode)?;
        match prev {
            Some(p) => self.slab.set_next(p, next),
            None => self.head = next,
        }
        match next {
            Some(n) => self.slab.set_prev(n, prev),
            None => self.tail = prev,
        }
        self.len -= 1;
        Ok(value)
    }

    /// Slot of the element at `index`, walking from the nearer end.
    fn node(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        if index < self.len / 2 {
            let mut x = self.head?;
            for _ in 0..index {
                x = self.slab.next(x)?;
            }
            Some(x)
        } else {
            let mut x = self.tail?;
            for _ in index + 1..self.len {
                x = self.slab.prev(x)?;
            }
            Some(x)
        }
    }

    fn node_or_err(&self, index: usize) -> Result<usize, SeqError> {
        self.node(index).ok_or(SeqError::IndexOutOfBounds {
            index,
            len: self.len,
        })
    }

    fn check_position(&self, index: usize) -> Result<(), SeqError> {
        if index > self.len {
            return Err(SeqError::PositionOutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    fn check_ref(&self, node: NodeRef) -> Result<usize, SeqError> {
        if node.owner != self.id {
            return Err(SeqError::ForeignContainer {
                expected: node.owner,
                found: self.id,
            });
        }
        if !self.slab.is_live(node.index, node.stamp) {
            return Err(SeqError::StaleNode);
        }
        Ok(node.index)
    }

    fn node_ref(&self, index: usize) -> NodeRef {
        NodeRef {
            owner: self.id,
            index,
            stamp: self.slab.stamp(index),
        }
    }

    fn value_at(&self, node: usize) -> Result<&T, SeqError> {
        self.slab.value(node).ok_or(SeqError::StaleNode)
    }

    // ── Both ends ───────────────────────────────────────────────

    /// Insert `value` at the front.
    pub fn push_front(&mut self, value: T) -> NodeRef {
        let node = self.link_first(value);
        self.generation.advance();
        self.node_ref(node)
    }

    /// Insert `value` at the back.
    pub fn push_back(&mut self, value: T) -> NodeRef {
        let node = self.link_last(value);
        self.generation.advance();
        self.node_ref(node)
    }

    /// Borrow the first element.
    pub fn front(&self) -> Result<&T, SeqError> {
        self.peek_front().ok_or(SeqError::NoSuchElement)
    }

    /// Borrow the last element.
    pub fn back(&self) -> Result<&T, SeqError> {
        self.peek_back().ok_or(SeqError::NoSuchElement)
    }

    /// Borrow the first element, if any.
    pub fn peek_front(&self) -> Option<&T> {
        self.slab.value(self.head?)
    }

    /// Borrow the last element, if any.
    pub fn peek_back(&self) -> Option<&T> {
        self.slab.value(self.tail?)
    }

    /// Remove the first element.
    pub fn remove_front(&mut self) -> Result<T, SeqError> {
        let head = self.head.ok_or(SeqError::NoSuchElement)?;
        let value = self.unlink(head)?;
        self.generation.advance();
        Ok(value)
    }

    /// Remove the last element.
    pub fn remove_back(&mut self) -> Result<T, SeqError> {
        let tail = self.tail.ok_or(SeqError::NoSuchElement)?;
        let value = self.unlink(tail)?;
        self.generation.advance();
        Ok(value)
    }

    /// Remove the first element, if any.
    pub fn pop_front(&mut self) -> Option<T> {
        self.remove_front().ok()
    }

    /// Remove the last element, if any.
    pub fn pop_back(&mut self) -> Option<T> {
        self.remove_back().ok()
    }

    // ── Node handles ────────────────────────────────────────────

    /// Handle to the first node.
    pub fn front_node(&self) -> Option<NodeRef> {
        self.head.map(|node| self.node_ref(node))
    }

    /// Handle to the last node.
    pub fn back_node(&self) -> Option<NodeRef> {
        self.tail.map(|node| self.node_ref(node))
    }

    /// Handle to the node at `index`.
    pub fn node_at(&self, index: usize) -> Result<NodeRef, SeqError> {
        let node = self.node_or_err(index)?;
        Ok(self.node_ref(node))
    }

    /// Borrow the element held by `node`.
    pub fn get_node(&self, node: NodeRef) -> Result<&T, SeqError> {
        let slot = self.check_ref(node)?;
        self.value_at(slot)
    }

    /// Mutably borrow the element held by `node`.
    pub fn get_node_mut(&mut self, node: NodeRef) -> Result<&mut T, SeqError> {
        let slot = self.check_ref(node)?;
        self.slab.value_mut(slot).ok_or(SeqError::StaleNode)
    }

    /// Insert `value` immediately before `anchor` in O(1).
    pub fn insert_before(&mut self, anchor: NodeRef, value: T) -> Result<NodeRef, SeqError> {
        let succ = self.check_ref(anchor)?;
        let node = self.link_before(value, succ);
        self.generation.advance();
        Ok(self.node_ref(node))
    }

    /// Remove the node `anchor` in O(1) and return its element.
    pub fn remove_node(&mut self, anchor: NodeRef) -> Result<T, SeqError> {
        let node = self.check_ref(anchor)?;
        let value = self.unlink(node)?;
        self.generation.advance();
        Ok(value)
    }

    // ── Positional access ───────────────────────────────────────

    /// Borrow the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T, SeqError> {
        let node = self.node_or_err(index)?;
        self.value_at(node)
    }

    /// Mutably borrow the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, SeqError> {
        let node = self.node_or_err(index)?;
        self.slab.value_mut(node).ok_or(SeqError::StaleNode)
    }

    /// Overwrite the element at `index`, returning the old value.
    ///
    /// Not a structural mutation.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, SeqError> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Insert `value` so that it ends up at `index`.
    ///
    /// `insert(0, v)` is `push_front(v)` and `insert(len, v)` is
    /// `push_back(v)`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<NodeRef, SeqError> {
        self.check_position(index)?;
        let node = match self.node(index) {
            Some(succ) => self.link_before(value, succ),
            None => self.link_last(value),
        };
        self.generation.advance();
        Ok(self.node_ref(node))
    }

    /// Remove and return the element at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T, SeqError> {
        let node = self.node_or_err(index)?;
        let value = self.unlink(node)?;
        self.generation.advance();
        Ok(value)
    }

    // ── Bulk operations ─────────────────────────────────────────

    /// Insert every element of `items` starting at `index`, in order.
    ///
    /// The source is collected before the sequence is touched. Inserting
    /// nothing is not a structural change. Returns whether anything was
    /// inserted.
    pub fn insert_all<I>(&mut self, index: usize, items: I) -> Result<bool, SeqError>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_position(index)?;
        let incoming: Vec<T> = items.into_iter().collect();
        if incoming.is_empty() {
            return Ok(false);
        }
        match self.node(index) {
            Some(succ) => {
                for value in incoming {
                    self.link_before(value, succ);
                }
            }
            None => {
                for value in incoming {
                    self.link_last(value);
                }
            }
        }
        self.generation.advance();
        Ok(true)
    }

    /// Append every element of `items`, in order.
    pub fn extend_from<I>(&mut self, items: I) -> Result<bool, SeqError>
    where
        I: IntoIterator<Item = T>,
    {
        let len = self.len;
        self.insert_all(len, items)
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.slab.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
        self.generation.advance();
    }

    /// Remove every element for which `predicate` returns `true`.
    pub fn remove_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        match self.try_remove_if(|item| Ok::<bool, Infallible>(predicate(item))) {
            Ok(removed) => removed,
            Err(never) => match never {},
        }
    }

    /// Remove every element for which a fallible `predicate` returns
    /// `Ok(true)`.
    ///
    /// Every element is evaluated before any node is unlinked; a failing
    /// (or panicking) predicate leaves the sequence untouched.
    pub fn try_remove_if<E, F>(&mut self, mut predicate: F) -> Result<usize, E>
    where
        F: FnMut(&T) -> Result<bool, E>,
    {
        let mut marked: SmallVec<[usize; 16]> = SmallVec::new();
        let mut cursor = self.head;
        while let Some(node) = cursor {
            if let Some(value) = self.slab.value(node) {
                if predicate(value)? {
                    marked.push(node);
                }
            }
            cursor = self.slab.next(node);
        }
        let removed = marked.len();
        for node in marked {
            let unlinked = self.unlink(node);
            debug_assert!(unlinked.is_ok(), "marked slot {node} was not live");
        }
        if removed > 0 {
            self.generation.advance();
        }
        Ok(removed)
    }

    /// Keep only the elements for which `predicate` returns `true`.
    pub fn retain<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.remove_if(|item| !predicate(item))
    }

    /// Remove the first element equal to `value`.
    pub fn remove_item(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let found = self.find_node(self.head, value, |slab, x| slab.next(x));
        self.remove_found(found)
    }

    /// Remove the last element equal to `value`.
    pub fn remove_last_item(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let found = self.find_node(self.tail, value, |slab, x| slab.prev(x));
        self.remove_found(found)
    }

    fn find_node<S>(&self, start: Option<usize>, value: &T, step: S) -> Option<usize>
    where
        T: PartialEq,
        S: Fn(&NodeSlab<T>, usize) -> Option<usize>,
    {
        let mut cursor = start;
        while let Some(node) = cursor {
            if self.slab.value(node) == Some(value) {
                return Some(node);
            }
            cursor = step(&self.slab, node);
        }
        None
    }

    fn remove_found(&mut self, found: Option<usize>) -> bool {
        let Some(node) = found else {
            return false;
        };
        let unlinked = self.unlink(node);
        debug_assert!(unlinked.is_ok(), "found slot {node} was not live");
        if unlinked.is_err() {
            return false;
        }
        self.generation.advance();
        true
    }

    // ── Searching ───────────────────────────────────────────────

    /// Whether any element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|item| item == value)
    }

    /// Position of the last element equal to `value`.
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().rposition(|item| item == value)
    }

    // ── Export and iteration ────────────────────────────────────

    /// An independent copy of the elements, in order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Copy the elements into `dst` if it is large enough and return the
    /// filled prefix; otherwise return a freshly allocated buffer.
    pub fn to_array_into<'a>(&self, dst: &'a mut [T]) -> Cow<'a, [T]>
    where
        T: Clone,
    {
        if dst.len() < self.len {
            return Cow::Owned(self.to_vec());
        }
        let filled = &mut dst[..self.len];
        for (slot, item) in filled.iter_mut().zip(self.iter()) {
            slot.clone_from(item);
        }
        Cow::Borrowed(filled)
    }

    /// Iterate over the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slab: &self.slab,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Iterate mutably over the elements, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let mut order = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(node) = cursor {
            order.push(node);
            cursor = self.slab.next(node);
        }
        IterMut {
            inner: self.slab.values_mut_in(&order).into_iter(),
        }
    }

    // ── Handles ─────────────────────────────────────────────────

    /// A fail-fast cursor before the first element.
    pub fn cursor(&self) -> LinkedCursor {
        LinkedCursor::new(self.id, self.head, 0, self.generation)
    }

    /// A fail-fast cursor before element `index` (`index <= len`).
    pub fn cursor_at(&self, index: usize) -> Result<LinkedCursor, SeqError> {
        self.check_position(index)?;
        Ok(LinkedCursor::new(
            self.id,
            self.node(index),
            index,
            self.generation,
        ))
    }

    /// A fail-fast cursor walking from the last element to the first.
    pub fn descending_cursor(&self) -> DescendingCursor {
        DescendingCursor::new(LinkedCursor::new(self.id, None, self.len, self.generation))
    }

    /// An unbound split cursor with the default batch policy.
    pub fn split_cursor(&self) -> LinkedSplitCursor {
        LinkedSplitCursor::new(self.id, BatchPolicy::default())
    }

    /// An unbound split cursor with a custom batch policy.
    pub fn split_cursor_with(&self, policy: BatchPolicy) -> LinkedSplitCursor {
        LinkedSplitCursor::new(self.id, policy)
    }

    // ── Crate-internal access for cursors ───────────────────────

    pub(crate) fn verify(&self, owner: ContainerId, expected: Generation) -> Result<(), SeqError> {
        if owner != self.id {
            return Err(SeqError::ForeignContainer {
                expected: owner,
                found: self.id,
            });
        }
        if expected != self.generation {
            return Err(SeqError::ConcurrentModification {
                expected,
                found: self.generation,
            });
        }
        Ok(())
    }

    pub(crate) fn head_slot(&self) -> Option<usize> {
        self.head
    }

    pub(crate) fn tail_slot(&self) -> Option<usize> {
        self.tail
    }

    pub(crate) fn next_slot(&self, node: usize) -> Option<usize> {
        self.slab.next(node)
    }

    pub(crate) fn prev_slot(&self, node: usize) -> Option<usize> {
        self.slab.prev(node)
    }

    pub(crate) fn slot_value(&self, node: usize) -> Result<&T, SeqError> {
        self.value_at(node)
    }

    pub(crate) fn replace_slot(&mut self, node: usize, value: T) -> Result<T, SeqError> {
        let slot = self.slab.value_mut(node).ok_or(SeqError::StaleNode)?;
        Ok(std::mem::replace(slot, value))
    }

    pub(crate) fn unlink_slot(&mut self, node: usize) -> Result<T, SeqError> {
        let value = self.unlink(node)?;
        self.generation.advance();
        Ok(value)
    }

    pub(crate) fn link_slot_before(&mut self, value: T, succ: Option<usize>) {
        match succ {
            Some(succ) => self.link_before(value, succ),
            None => self.link_last(value),
        };
        self.generation.advance();
    }

    /// Panics unless the forward and backward chains agree with `len`.
    #[cfg(test)]
    pub(crate) fn assert_links(&self) {
        let mut forward = Vec::new();
        let mut cursor = self.head;
        let mut prev = None;
        while let Some(node) = cursor {
            assert_eq!(self.slab.prev(node), prev, "back link of slot {node}");
            assert!(forward.len() < self.len, "forward chain longer than len");
            forward.push(node);
            prev = Some(node);
            cursor = self.slab.next(node);
        }
        assert_eq!(forward.len(), self.len);
        assert_eq!(self.tail, prev);
        if let Some(h) = self.head {
            assert_eq!(self.slab.prev(h), None);
        }
        if let Some(t) = self.tail {
            assert_eq!(self.slab.next(t), None);
        }
    }
}

/// Borrowing iterator over a [`LinkedSequence`].
pub struct Iter<'a, T> {
    slab: &'a NodeSlab<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        self.front = self.slab.next(node);
        self.remaining -= 1;
        self.slab.value(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        self.back = self.slab.prev(node);
        self.remaining -= 1;
        self.slab.value(node)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            slab: self.slab,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Mutably borrowing iterator over a [`LinkedSequence`].
pub struct IterMut<'a, T> {
    inner: std::vec::IntoIter<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// Owning iterator over a [`LinkedSequence`].
pub struct IntoIter<T> {
    list: LinkedSequence<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedSequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedSequence<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> Default for LinkedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedSequence<T> {
    /// The clone is a new container with a fresh id and generation zero.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedSequence<T> {}

impl<T> FromIterator<T> for LinkedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.link_last(value);
        }
        list
    }
}

impl<T> Extend<T> for LinkedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let before = self.len;
        for value in iter {
            self.link_last(value);
        }
        if self.len != before {
            self.generation.advance();
        }
    }
}

impl<T> Sequence<T> for LinkedSequence<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn generation(&self) -> Generation {
        self.generation
    }

    fn get(&self, index: usize) -> Result<&T, SeqError> {
        LinkedSequence::get(self, index)
    }

    fn set(&mut self, index: usize, value: T) -> Result<T, SeqError> {
        LinkedSequence::set(self, index, value)
    }

    fn insert(&mut self, index: usize, value: T) -> Result<(), SeqError> {
        LinkedSequence::insert(self, index, value).map(|_| ())
    }

    fn remove(&mut self, index: usize) -> Result<T, SeqError> {
        LinkedSequence::remove(self, index)
    }

    fn push(&mut self, value: T) -> Result<(), SeqError> {
        LinkedSequence::push_back(self, value);
        Ok(())
    }

    fn clear(&mut self) {
        LinkedSequence::clear(self)
    }

    fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        LinkedSequence::index_of(self, value)
    }
}

impl<T> Deque<T> for LinkedSequence<T> {
    fn push_front(&mut self, value: T) {
        LinkedSequence::push_front(self, value);
    }

    fn push_back(&mut self, value: T) {
        LinkedSequence::push_back(self, value);
    }

    fn front(&self) -> Result<&T, SeqError> {
        LinkedSequence::front(self)
    }

    fn back(&self) -> Result<&T, SeqError> {
        LinkedSequence::back(self)
    }

    fn peek_front(&self) -> Option<&T> {
        LinkedSequence::peek_front(self)
    }

    fn peek_back(&self) -> Option<&T> {
        LinkedSequence::peek_back(self)
    }

    fn remove_front(&mut self) -> Result<T, SeqError> {
        LinkedSequence::remove_front(self)
    }

    fn remove_back(&mut self) -> Result<T, SeqError> {
        LinkedSequence::remove_back(self)
    }

    fn pop_front(&mut self) -> Option<T> {
        LinkedSequence::pop_front(self)
    }

    fn pop_back(&mut self) -> Option<T> {
        LinkedSequence::pop_back(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> LinkedSequence<char> {
        "abcdef".chars().collect()
    }

    fn text(list: &LinkedSequence<char>) -> String {
        list.iter().collect()
    }

    #[test]
    fn both_ends() {
        let mut list = LinkedSequence::new();
        assert_eq!(list.front(), Err(SeqError::NoSuchElement));
        assert_eq!(list.remove_back(), Err(SeqError::NoSuchElement));
        assert_eq!(list.pop_front(), None);
        list.push_back(2);
        list.push_front(1);
        list.push_back(3);
        assert_eq!(list.front(), Ok(&1));
        assert_eq!(list.back(), Ok(&3));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.remove_back(), Ok(3));
        assert_eq!(list.peek_back(), Some(&2));
        list.assert_links();
    }

    #[test]
    fn positional_access_from_either_end() {
        let list: LinkedSequence<usize> = (0..9).collect();
        for i in 0..9 {
            assert_eq!(list.get(i), Ok(&i));
        }
        assert_eq!(
            list.get(9),
            Err(SeqError::IndexOutOfBounds { index: 9, len: 9 })
        );
    }

    #[test]
    fn insert_at_zero_and_len() {
        let mut a = letters();
        let mut b = letters();
        a.insert(0, 'z').unwrap();
        b.push_front('z');
        assert_eq!(a, b);
        a.insert(a.len(), 'y').unwrap();
        b.push_back('y');
        assert_eq!(a, b);
        assert_eq!(
            a.insert(10, 'q').err(),
            Some(SeqError::PositionOutOfBounds { index: 10, len: 8 })
        );
        a.assert_links();
    }

    #[test]
    fn insert_and_remove_in_the_middle() {
        let mut list = letters();
        list.insert(3, 'X').unwrap();
        assert_eq!(text(&list), "abcXdef");
        assert_eq!(list.remove(1), Ok('b'));
        assert_eq!(list.remove(5), Ok('f'));
        assert_eq!(text(&list), "acXde");
        list.assert_links();
    }

    #[test]
    fn node_refs_allow_constant_time_edits() {
        let mut list = LinkedSequence::new();
        let b = list.push_back('b');
        let d = list.push_back('d');
        list.insert_before(b, 'a').unwrap();
        let c = list.insert_before(d, 'c').unwrap();
        assert_eq!(text(&list), "abcd");
        assert_eq!(list.get_node(c), Ok(&'c'));
        *list.get_node_mut(c).unwrap() = 'C';
        assert_eq!(list.remove_node(b), Ok('b'));
        assert_eq!(text(&list), "aCd");
        list.assert_links();
    }

    #[test]
    fn removed_node_ref_is_stale_even_after_slot_reuse() {
        let mut list = LinkedSequence::new();
        let a = list.push_back(1);
        list.remove_node(a).unwrap();
        assert_eq!(list.get_node(a), Err(SeqError::StaleNode));
        list.push_back(2);
        assert_eq!(list.get_node(a), Err(SeqError::StaleNode));
        assert_eq!(list.remove_node(a), Err(SeqError::StaleNode));
        assert_eq!(list.insert_before(a, 3).err(), Some(SeqError::StaleNode));
    }

    #[test]
    fn cleared_node_ref_is_stale() {
        let mut list = letters();
        let first = list.front_node().unwrap();
        list.clear();
        list.push_back('a');
        assert_eq!(list.get_node(first), Err(SeqError::StaleNode));
    }

    #[test]
    fn node_ref_from_other_list_is_rejected() {
        let a = letters();
        let b = letters();
        let node = a.node_at(2).unwrap();
        assert!(matches!(
            b.get_node(node),
            Err(SeqError::ForeignContainer { .. })
        ));
        assert_eq!(a.get_node(node), Ok(&'c'));
    }

    #[test]
    fn insert_all_bumps_generation_once() {
        let mut list = letters();
        let gen = list.generation();
        assert_eq!(list.insert_all(2, vec!['x', 'y', 'z']), Ok(true));
        assert_eq!(list.generation(), gen.next());
        assert_eq!(text(&list), "abxyzcdef");
        assert_eq!(list.extend_from(Vec::new()), Ok(false));
        assert_eq!(list.generation(), gen.next());
        list.extend_from("gh".chars()).unwrap();
        assert_eq!(text(&list), "abxyzcdefgh");
        list.assert_links();
    }

    #[test]
    fn remove_if_is_all_or_nothing() {
        let mut list: LinkedSequence<u32> = (0..10).collect();
        let gen = list.generation();
        let mut seen = 0;
        let result = list.try_remove_if(|v| {
            seen += 1;
            if seen == 8 {
                Err("boom")
            } else {
                Ok(v % 2 == 0)
            }
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(list.to_vec(), (0..10).collect::<Vec<_>>());
        assert_eq!(list.generation(), gen);

        assert_eq!(list.remove_if(|v| v % 2 == 0), 5);
        assert_eq!(list.to_vec(), vec![1, 3, 5, 7, 9]);
        assert_eq!(list.generation(), gen.next());
        list.assert_links();
    }

    #[test]
    fn first_and_last_occurrence() {
        let mut list: LinkedSequence<u32> = vec![1, 2, 1, 3, 1].into_iter().collect();
        assert_eq!(list.index_of(&1), Some(0));
        assert_eq!(list.last_index_of(&1), Some(4));
        assert!(list.remove_last_item(&1));
        assert_eq!(list.to_vec(), vec![1, 2, 1, 3]);
        assert!(list.remove_item(&1));
        assert_eq!(list.to_vec(), vec![2, 1, 3]);
        assert!(!list.remove_item(&9));
        assert!(list.contains(&3));
        list.assert_links();
    }

    #[test]
    fn iterators_are_double_ended_and_exact() {
        let list = letters();
        let mut iter = list.iter();
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.next(), Some(&'a'));
        assert_eq!(iter.next_back(), Some(&'f'));
        assert_eq!(iter.len(), 4);
        let middle: String = iter.collect();
        assert_eq!(middle, "bcde");
        let reversed: String = list.iter().rev().collect();
        assert_eq!(reversed, "fedcba");
        let owned: String = list.into_iter().rev().collect();
        assert_eq!(owned, "fedcba");
    }

    #[test]
    fn iter_mut_visits_in_list_order() {
        let mut list = LinkedSequence::new();
        list.push_back(2);
        list.push_front(1);
        list.push_back(3);
        let a = list.push_front(0);
        list.remove_node(a).unwrap();
        list.push_front(0);
        for (i, v) in list.iter_mut().enumerate() {
            *v = *v * 10 + i as u32;
        }
        assert_eq!(list.to_vec(), vec![0, 11, 22, 33]);
    }

    #[test]
    fn to_array_into_prefers_caller_buffer() {
        let list: LinkedSequence<u8> = (1..=3).collect();
        let mut buf = [0u8; 4];
        assert!(matches!(list.to_array_into(&mut buf), Cow::Borrowed(b) if b == [1, 2, 3]));
        assert_eq!(buf, [1, 2, 3, 0]);
        let mut small = [0u8; 1];
        assert!(matches!(list.to_array_into(&mut small), Cow::Owned(_)));
    }

    #[test]
    fn clone_is_a_new_container() {
        let mut list = letters();
        list.push_back('g');
        let clone = list.clone();
        assert_eq!(clone, list);
        assert_ne!(clone.id(), list.id());
        assert_eq!(clone.generation(), Generation::ZERO);
    }

    #[test]
    fn clear_gives_back_every_slot() {
        let mut list: LinkedSequence<u32> = (0..100_000).collect();
        let stale = list.front_node().unwrap();
        list.clear();
        assert_eq!(list.slab.slots(), 0);
        let fresh = list.push_back(1);
        assert_eq!(list.slab.slots(), 1);
        assert_eq!(list.get_node(stale), Err(SeqError::StaleNode));
        assert_eq!(list.get_node(fresh), Ok(&1));
    }

    #[test]
    fn draining_from_the_back_shrinks_the_slab() {
        let mut list: LinkedSequence<u32> = (0..1_000).collect();
        while list.len() > 10 {
            list.pop_back();
        }
        assert_eq!(list.slab.slots(), 10);
        list.remove(3).unwrap();
        assert_eq!(list.slab.slots(), 10);
        assert_eq!(list.slab.free_slots(), 1);
        list.push_back(5);
        assert_eq!(list.slab.slots(), 10);
        list.assert_links();
    }

    #[test]
    fn iter_mut_after_churn() {
        let mut list: LinkedSequence<u32> = (0..50).collect();
        list.remove_if(|v| v % 3 == 0);
        list.push_front(100);
        for v in list.iter_mut() {
            *v += 1;
        }
        let mut expected: Vec<u32> = (0..50).filter(|v| v % 3 != 0).map(|v| v + 1).collect();
        expected.insert(0, 101);
        assert_eq!(list.to_vec(), expected);
        assert_eq!(list.iter_mut().rev().map(|v| *v).next(), Some(50));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            PushFront(u8),
            PushBack(u8),
            Insert(usize, u8),
            Remove(usize),
            PopFront,
            PopBack,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                any::<u8>().prop_map(Op::PushFront),
                any::<u8>().prop_map(Op::PushBack),
                (0usize..40, any::<u8>()).prop_map(|(i, v)| Op::Insert(i, v)),
                (0usize..40).prop_map(Op::Remove),
                Just(Op::PopFront),
                Just(Op::PopBack),
            ]
        }

        proptest! {
            #[test]
            fn links_stay_consistent(ops in proptest::collection::vec(op(), 0..200)) {
                let mut list = LinkedSequence::new();
                let mut model = std::collections::VecDeque::new();
                for op in ops {
                    match op {
                        Op::PushFront(v) => { list.push_front(v); model.push_front(v); }
                        Op::PushBack(v) => { list.push_back(v); model.push_back(v); }
                        Op::Insert(i, v) => {
                            let ok = list.insert(i, v).is_ok();
                            prop_assert_eq!(ok, i <= model.len());
                            if ok { model.insert(i, v); }
                        }
                        Op::Remove(i) => {
                            prop_assert_eq!(list.remove(i).ok(), model.remove(i));
                        }
                        Op::PopFront => {
                            prop_assert_eq!(list.pop_front(), model.pop_front());
                        }
                        Op::PopBack => {
                            prop_assert_eq!(list.pop_back(), model.pop_back());
                        }
                    }
                    list.assert_links();
                    prop_assert!(list.iter().eq(model.iter()));
                    if list.is_empty() {
                        prop_assert_eq!(list.slab.slots(), 0);
                    }
                }
            }
        }
    }
}
