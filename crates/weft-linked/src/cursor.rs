//! Fail-fast cursors over a [`LinkedSequence`].

use weft_core::{ContainerId, Generation, SeqError};

use crate::list::LinkedSequence;

/// A detached, fail-fast, bidirectional cursor.
///
/// Holds the slot of the node `next` would return, so stepping is O(1)
/// regardless of position. Every operation receives the sequence and
/// checks its identity and generation first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkedCursor {
    owner: ContainerId,
    next: Option<usize>,
    next_index: usize,
    last_returned: Option<usize>,
    expected: Generation,
}

impl LinkedCursor {
    pub(crate) fn new(
        owner: ContainerId,
        next: Option<usize>,
        next_index: usize,
        expected: Generation,
    ) -> Self {
        Self {
            owner,
            next,
            next_index,
            last_returned: None,
            expected,
        }
    }

    /// Whether [`next`](Self::next) has an element to return.
    pub fn has_next<T>(&self, list: &LinkedSequence<T>) -> bool {
        self.next_index < list.len()
    }

    /// Whether [`previous`](Self::previous) has an element to return.
    pub fn has_previous(&self) -> bool {
        self.next_index > 0
    }

    /// Index of the element a subsequent `next` would return.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Index of the element a subsequent `previous` would return.
    pub fn previous_index(&self) -> Option<usize> {
        self.next_index.checked_sub(1)
    }

    /// Advance and return the next element.
    pub fn next<'a, T>(&mut self, list: &'a LinkedSequence<T>) -> Result<&'a T, SeqError> {
        list.verify(self.owner, self.expected)?;
        if !self.has_next(list) {
            return Err(SeqError::NoSuchElement);
        }
        let node = self.next.ok_or(SeqError::NoSuchElement)?;
        self.last_returned = Some(node);
        self.next = list.next_slot(node);
        self.next_index += 1;
        list.slot_value(node)
    }

    /// Step back and return the previous element.
    pub fn previous<'a, T>(&mut self, list: &'a LinkedSequence<T>) -> Result<&'a T, SeqError> {
        list.verify(self.owner, self.expected)?;
        if !self.has_previous() {
            return Err(SeqError::NoSuchElement);
        }
        let node = match self.next {
            Some(next) => list.prev_slot(next),
            None => list.tail_slot(),
        }
        .ok_or(SeqError::NoSuchElement)?;
        self.next = Some(node);
        self.last_returned = Some(node);
        self.next_index -= 1;
        list.slot_value(node)
    }

    /// Remove the element last returned by `next` or `previous`.
    pub fn remove<T>(&mut self, list: &mut LinkedSequence<T>) -> Result<T, SeqError> {
        list.verify(self.owner, self.expected)?;
        let last = self.last_returned.ok_or(SeqError::IllegalCursorState)?;
        let last_next = list.next_slot(last);
        let value = list.unlink_slot(last)?;
        if self.next == Some(last) {
            self.next = last_next;
        } else {
            self.next_index -= 1;
        }
        self.last_returned = None;
        self.expected = list.generation();
        Ok(value)
    }

    /// Overwrite the element last returned by `next` or `previous`.
    pub fn set<T>(&self, list: &mut LinkedSequence<T>, value: T) -> Result<T, SeqError> {
        list.verify(self.owner, self.expected)?;
        let last = self.last_returned.ok_or(SeqError::IllegalCursorState)?;
        list.replace_slot(last, value)
    }

    /// Insert `value` immediately before the cursor.
    pub fn add<T>(&mut self, list: &mut LinkedSequence<T>, value: T) -> Result<(), SeqError> {
        list.verify(self.owner, self.expected)?;
        self.last_returned = None;
        list.link_slot_before(value, self.next);
        self.next_index += 1;
        self.expected = list.generation();
        Ok(())
    }

    /// Visit every remaining element, leaving the cursor at the end.
    pub fn for_each_remaining<T, F>(
        &mut self,
        list: &LinkedSequence<T>,
        mut visit: F,
    ) -> Result<(), SeqError>
    where
        F: FnMut(&T),
    {
        list.verify(self.owner, self.expected)?;
        while let Some(node) = self.next {
            visit(list.slot_value(node)?);
            self.last_returned = Some(node);
            self.next = list.next_slot(node);
            self.next_index += 1;
        }
        Ok(())
    }
}

/// A fail-fast cursor walking from the back of a [`LinkedSequence`]
/// to the front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescendingCursor {
    inner: LinkedCursor,
}

impl DescendingCursor {
    pub(crate) fn new(inner: LinkedCursor) -> Self {
        Self { inner }
    }

    /// Whether another element remains towards the front.
    pub fn has_next(&self) -> bool {
        self.inner.has_previous()
    }

    /// Return the next element towards the front.
    pub fn next<'a, T>(&mut self, list: &'a LinkedSequence<T>) -> Result<&'a T, SeqError> {
        self.inner.previous(list)
    }

    /// Remove the element last returned by `next`.
    pub fn remove<T>(&mut self, list: &mut LinkedSequence<T>) -> Result<T, SeqError> {
        self.inner.remove(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> LinkedSequence<u32> {
        (0..6).collect()
    }

    #[test]
    fn walks_both_ways() {
        let list = numbers();
        let mut cursor = list.cursor();
        assert_eq!(cursor.next(&list), Ok(&0));
        assert_eq!(cursor.next(&list), Ok(&1));
        assert_eq!(cursor.previous(&list), Ok(&1));
        assert_eq!(cursor.previous(&list), Ok(&0));
        assert_eq!(cursor.previous(&list), Err(SeqError::NoSuchElement));
    }

    #[test]
    fn cursor_at_end_steps_back_from_tail() {
        let list = numbers();
        let mut cursor = list.cursor_at(6).unwrap();
        assert!(!cursor.has_next(&list));
        assert_eq!(cursor.next(&list), Err(SeqError::NoSuchElement));
        assert_eq!(cursor.previous(&list), Ok(&5));
        let mut middle = list.cursor_at(3).unwrap();
        assert_eq!(middle.next(&list), Ok(&3));
    }

    #[test]
    fn direct_mutation_is_detected() {
        let mut list = numbers();
        let mut cursor = list.cursor();
        cursor.next(&list).unwrap();
        list.push_front(9);
        assert!(cursor.next(&list).unwrap_err().is_concurrent_modification());
    }

    #[test]
    fn removal_through_cursor_after_next_and_previous() {
        let mut list = numbers();
        let mut cursor = list.cursor();
        cursor.next(&list).unwrap();
        cursor.next(&list).unwrap();
        assert_eq!(cursor.remove(&mut list), Ok(1));
        assert_eq!(cursor.next_index(), 1);
        assert_eq!(cursor.next(&list), Ok(&2));
        cursor.previous(&list).unwrap();
        assert_eq!(cursor.remove(&mut list), Ok(2));
        assert_eq!(cursor.next(&list), Ok(&3));
        assert_eq!(list.to_vec(), vec![0, 3, 4, 5]);
        list.assert_links();
    }

    #[test]
    fn remove_and_set_need_a_returned_element() {
        let mut list = numbers();
        let mut cursor = list.cursor();
        assert_eq!(cursor.remove(&mut list), Err(SeqError::IllegalCursorState));
        assert_eq!(cursor.set(&mut list, 1), Err(SeqError::IllegalCursorState));
        cursor.next(&list).unwrap();
        cursor.add(&mut list, 42).unwrap();
        assert_eq!(cursor.remove(&mut list), Err(SeqError::IllegalCursorState));
    }

    #[test]
    fn add_and_set_through_cursor() {
        let mut list = numbers();
        let mut cursor = list.cursor();
        cursor.add(&mut list, 100).unwrap();
        cursor.next(&list).unwrap();
        assert_eq!(cursor.set(&mut list, 10), Ok(0));
        let mut end = list.cursor_at(list.len()).unwrap();
        end.add(&mut list, 200).unwrap();
        assert_eq!(list.to_vec(), vec![100, 10, 1, 2, 3, 4, 5, 200]);
        list.assert_links();
    }

    #[test]
    fn descending_walk_and_remove() {
        let mut list = numbers();
        let mut cursor = list.descending_cursor();
        let mut seen = vec![];
        while cursor.has_next() {
            let v = *cursor.next(&list).unwrap();
            seen.push(v);
            if v % 2 == 0 {
                cursor.remove(&mut list).unwrap();
            }
        }
        assert_eq!(seen, vec![5, 4, 3, 2, 1, 0]);
        assert_eq!(list.to_vec(), vec![1, 3, 5]);
        list.assert_links();
    }

    #[test]
    fn descending_cursor_detects_interference() {
        let mut list = numbers();
        let mut cursor = list.descending_cursor();
        list.pop_back();
        assert!(cursor.next(&list).unwrap_err().is_concurrent_modification());
    }

    #[test]
    fn for_each_remaining_then_remove_last() {
        let mut list = numbers();
        let mut cursor = list.cursor_at(4).unwrap();
        let mut seen = vec![];
        cursor.for_each_remaining(&list, |v| seen.push(*v)).unwrap();
        assert_eq!(seen, vec![4, 5]);
        assert_eq!(cursor.remove(&mut list), Ok(5));
    }
}
