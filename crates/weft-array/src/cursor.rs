//! Fail-fast bidirectional cursor over a [`DynamicArray`].

use weft_core::{ContainerId, Generation, SeqError};

use crate::array::DynamicArray;

/// A detached, fail-fast list cursor.
///
/// The cursor sits between two elements: `next_index()` is the index of
/// the element the next [`next`](Self::next) call returns. It remembers
/// which array it was taken from and the generation it observed; every
/// operation receives the array explicitly and checks both before doing
/// anything else. [`remove`](Self::remove), [`set`](Self::set) and
/// [`add`](Self::add) are the only ways to mutate the array without
/// invalidating the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayCursor {
    owner: ContainerId,
    cursor: usize,
    last_returned: Option<usize>,
    expected: Generation,
}

impl ArrayCursor {
    pub(crate) fn new(owner: ContainerId, cursor: usize, expected: Generation) -> Self {
        Self {
            owner,
            cursor,
            last_returned: None,
            expected,
        }
    }

    /// Whether [`next`](Self::next) has an element to return.
    pub fn has_next<T>(&self, array: &DynamicArray<T>) -> bool {
        self.cursor < array.len()
    }

    /// Whether [`previous`](Self::previous) has an element to return.
    pub fn has_previous(&self) -> bool {
        self.cursor != 0
    }

    /// Index of the element a subsequent `next` would return.
    pub fn next_index(&self) -> usize {
        self.cursor
    }

    /// Index of the element a subsequent `previous` would return, or
    /// `None` at the start.
    pub fn previous_index(&self) -> Option<usize> {
        self.cursor.checked_sub(1)
    }

    /// Generation the cursor expects the array to be at.
    pub fn expected_generation(&self) -> Generation {
        self.expected
    }

    /// Advance and return the next element.
    pub fn next<'a, T>(&mut self, array: &'a DynamicArray<T>) -> Result<&'a T, SeqError> {
        array.verify(self.owner, self.expected)?;
        let i = self.cursor;
        let item = array.as_slice().get(i).ok_or(SeqError::NoSuchElement)?;
        self.cursor = i + 1;
        self.last_returned = Some(i);
        Ok(item)
    }

    /// Step back and return the previous element.
    pub fn previous<'a, T>(&mut self, array: &'a DynamicArray<T>) -> Result<&'a T, SeqError> {
        array.verify(self.owner, self.expected)?;
        let i = self.cursor.checked_sub(1).ok_or(SeqError::NoSuchElement)?;
        let item = array.as_slice().get(i).ok_or(SeqError::NoSuchElement)?;
        self.cursor = i;
        self.last_returned = Some(i);
        Ok(item)
    }

    /// Remove the element last returned by `next` or `previous`.
    ///
    /// The cursor re-captures the array's generation, so it stays valid
    /// while every other outstanding handle is invalidated.
    pub fn remove<T>(&mut self, array: &mut DynamicArray<T>) -> Result<T, SeqError> {
        array.verify(self.owner, self.expected)?;
        let last = self.last_returned.ok_or(SeqError::IllegalCursorState)?;
        let value = array.remove(last)?;
        self.cursor = last;
        self.last_returned = None;
        self.expected = array.generation();
        Ok(value)
    }

    /// Overwrite the element last returned by `next` or `previous`.
    pub fn set<T>(&self, array: &mut DynamicArray<T>, value: T) -> Result<T, SeqError> {
        array.verify(self.owner, self.expected)?;
        let last = self.last_returned.ok_or(SeqError::IllegalCursorState)?;
        array.set(last, value)
    }

    /// Insert `value` immediately before the cursor.
    ///
    /// A following `next` is unaffected; a following `previous` returns
    /// the new element.
    pub fn add<T>(&mut self, array: &mut DynamicArray<T>, value: T) -> Result<(), SeqError> {
        array.verify(self.owner, self.expected)?;
        array.insert(self.cursor, value)?;
        self.cursor += 1;
        self.last_returned = None;
        self.expected = array.generation();
        Ok(())
    }

    /// Visit every remaining element, leaving the cursor at the end.
    ///
    /// The array is borrowed for the whole pass, so the generation is
    /// checked once rather than per element.
    pub fn for_each_remaining<T, F>(
        &mut self,
        array: &DynamicArray<T>,
        mut visit: F,
    ) -> Result<(), SeqError>
    where
        F: FnMut(&T),
    {
        array.verify(self.owner, self.expected)?;
        let len = array.len();
        if self.cursor >= len {
            return Ok(());
        }
        for item in &array.as_slice()[self.cursor..] {
            visit(item);
        }
        self.cursor = len;
        self.last_returned = Some(len - 1);
        Ok(())
    }
}
