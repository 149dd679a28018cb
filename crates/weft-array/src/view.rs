//! Live range views over a [`DynamicArray`].
//!
//! A [`RangeView`] is a detached description of a window `[offset,
//! offset + len)` into its parent. To read or write through it, bind it
//! to the parent with [`RangeView::bind`], which checks that the parent
//! is the same container and has not been structurally modified since
//! the view last observed it. The resulting [`BoundView`] translates
//! every index into the root array's coordinates.
//!
//! Views nest: a [`BoundView`] is itself a [`RangeParent`], so a view
//! taken from a bound view binds to that bound view. Structural
//! mutations through a nested view update the recorded length of every
//! enclosing view and re-capture the root generation at each level;
//! sibling views and the root's other handles are invalidated.
//!
//! Each view also records which parent it was taken from (the root
//! array or one particular bound view), and binding it anywhere else
//! fails with [`SeqError::ForeignContainer`].

use weft_core::{ContainerId, Generation, SeqError};

use crate::array::DynamicArray;
use crate::split::ArraySplitCursor;

/// Something a [`RangeView`] can be taken from and bound to.
///
/// Implemented by [`DynamicArray`] (the root) and by [`BoundView`].
pub trait RangeParent {
    /// Element type of the root array.
    type Item;

    /// Identity of the root array.
    fn owner(&self) -> ContainerId;

    /// Identity of this level of the view chain: the array's own id for
    /// the root, the view's id for a bound view.
    fn scope(&self) -> ContainerId;

    /// Live generation of the root array.
    fn generation(&self) -> Generation;

    /// Number of elements visible through this parent.
    fn len(&self) -> usize;

    /// Whether this parent shows no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of this parent's first element in the root array.
    fn base_offset(&self) -> usize;

    /// The root array.
    fn root(&self) -> &DynamicArray<Self::Item>;

    /// The root array, mutably.
    ///
    /// Structural changes made directly through this reference are not
    /// reflected in enclosing views and invalidate them.
    fn root_mut(&mut self) -> &mut DynamicArray<Self::Item>;

    /// Record that `grown` elements were inserted into and `shrunk`
    /// elements removed from this parent's window, and re-capture the
    /// root generation.
    fn resync(&mut self, grown: usize, shrunk: usize);
}

impl<T> RangeParent for DynamicArray<T> {
    type Item = T;

    fn owner(&self) -> ContainerId {
        self.id()
    }

    fn scope(&self) -> ContainerId {
        self.id()
    }

    fn generation(&self) -> Generation {
        DynamicArray::generation(self)
    }

    fn len(&self) -> usize {
        DynamicArray::len(self)
    }

    fn base_offset(&self) -> usize {
        0
    }

    fn root(&self) -> &DynamicArray<T> {
        self
    }

    fn root_mut(&mut self) -> &mut DynamicArray<T> {
        self
    }

    fn resync(&mut self, _grown: usize, _shrunk: usize) {}
}

/// A detached window `[offset, offset + len)` into a parent.
///
/// `offset` is relative to the parent the view was taken from, and the
/// view only binds to that parent. A clone shares the original's
/// identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeView {
    owner: ContainerId,
    id: ContainerId,
    parent: ContainerId,
    offset: usize,
    len: usize,
    expected: Generation,
}

impl RangeView {
    /// Describe `[from, to)` of `parent`.
    pub fn over<P: RangeParent + ?Sized>(
        parent: &P,
        from: usize,
        to: usize,
    ) -> Result<Self, SeqError> {
        let len = parent.len();
        if to > len {
            return Err(SeqError::PositionOutOfBounds { index: to, len });
        }
        if from > to {
            return Err(SeqError::InvalidRange { from, to });
        }
        Ok(Self {
            owner: parent.owner(),
            id: ContainerId::next(),
            parent: parent.scope(),
            offset: from,
            len: to - from,
            expected: parent.generation(),
        })
    }

    /// Number of elements in the window as last observed.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Start of the window in the parent's coordinates.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Root generation the view expects.
    pub fn expected_generation(&self) -> Generation {
        self.expected
    }

    fn verify<P: RangeParent + ?Sized>(&self, parent: &P) -> Result<(), SeqError> {
        if self.owner != parent.owner() {
            return Err(SeqError::ForeignContainer {
                expected: self.owner,
                found: parent.owner(),
            });
        }
        if self.parent != parent.scope() {
            return Err(SeqError::ForeignContainer {
                expected: self.parent,
                found: parent.scope(),
            });
        }
        if self.expected != parent.generation() {
            return Err(SeqError::ConcurrentModification {
                expected: self.expected,
                found: parent.generation(),
            });
        }
        Ok(())
    }

    /// Attach the view to its parent for reading and writing.
    pub fn bind<'a, P: RangeParent>(
        &'a mut self,
        parent: &'a mut P,
    ) -> Result<BoundView<'a, P>, SeqError> {
        self.verify(&*parent)?;
        Ok(BoundView { view: self, parent })
    }

    /// Borrow the window's elements without binding mutably.
    pub fn window<'p, P: RangeParent>(&self, parent: &'p P) -> Result<&'p [P::Item], SeqError> {
        self.verify(parent)?;
        window_of(parent.root(), parent.base_offset() + self.offset, self.len)
    }
}

fn window_of<T>(root: &DynamicArray<T>, start: usize, len: usize) -> Result<&[T], SeqError> {
    let end = start.saturating_add(len);
    root.as_slice()
        .get(start..end)
        .ok_or(SeqError::IndexOutOfBounds {
            index: end,
            len: root.len(),
        })
}

/// A [`RangeView`] attached to its parent.
///
/// Indices passed to a bound view are relative to the window. The
/// binding holds the parent exclusively, but every operation still
/// re-checks the root generation so that changes made through
/// [`RangeParent::root_mut`] are caught.
pub struct BoundView<'a, P: RangeParent> {
    view: &'a mut RangeView,
    parent: &'a mut P,
}

impl<'a, P: RangeParent> BoundView<'a, P> {
    /// Number of elements in the window.
    pub fn len(&self) -> usize {
        self.view.len
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.view.len == 0
    }

    fn check(&self) -> Result<(), SeqError> {
        self.view.verify(&*self.parent)
    }

    fn check_index(&self, index: usize) -> Result<(), SeqError> {
        self.check()?;
        if index >= self.view.len {
            return Err(SeqError::IndexOutOfBounds {
                index,
                len: self.view.len,
            });
        }
        Ok(())
    }

    fn check_position(&self, index: usize) -> Result<(), SeqError> {
        self.check()?;
        if index > self.view.len {
            return Err(SeqError::PositionOutOfBounds {
                index,
                len: self.view.len,
            });
        }
        Ok(())
    }

    fn absolute(&self, index: usize) -> usize {
        self.base_offset() + index
    }

    /// Borrow the element at `index`.
    pub fn get(&self, index: usize) -> Result<&P::Item, SeqError> {
        self.check_index(index)?;
        self.parent.root().get(self.absolute(index))
    }

    /// Mutably borrow the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut P::Item, SeqError> {
        self.check_index(index)?;
        let at = self.absolute(index);
        self.parent.root_mut().get_mut(at)
    }

    /// Overwrite the element at `index`, returning the old value.
    pub fn set(&mut self, index: usize, value: P::Item) -> Result<P::Item, SeqError> {
        self.check_index(index)?;
        let at = self.absolute(index);
        self.parent.root_mut().set(at, value)
    }

    /// Insert `value` at `index` within the window.
    pub fn insert(&mut self, index: usize, value: P::Item) -> Result<(), SeqError> {
        self.check_position(index)?;
        let at = self.absolute(index);
        self.parent.root_mut().insert(at, value)?;
        self.resync(1, 0);
        Ok(())
    }

    /// Append `value` at the end of the window.
    pub fn push(&mut self, value: P::Item) -> Result<(), SeqError> {
        let len = self.view.len;
        self.insert(len, value)
    }

    /// Remove and return the element at `index` within the window.
    pub fn remove(&mut self, index: usize) -> Result<P::Item, SeqError> {
        self.check_index(index)?;
        let at = self.absolute(index);
        let value = self.parent.root_mut().remove(at)?;
        self.resync(0, 1);
        Ok(value)
    }

    /// Remove `[from, to)` of the window with one shift of the root's tail.
    pub fn remove_range(&mut self, from: usize, to: usize) -> Result<(), SeqError> {
        self.check_position(to)?;
        if from > to {
            return Err(SeqError::InvalidRange { from, to });
        }
        let (start, end) = (self.absolute(from), self.absolute(to));
        self.parent.root_mut().remove_range(start, end)?;
        self.resync(0, to - from);
        Ok(())
    }

    /// Insert every element of `items` at `index` within the window.
    ///
    /// An empty source is not a structural change.
    pub fn insert_all<I>(&mut self, index: usize, items: I) -> Result<bool, SeqError>
    where
        I: IntoIterator<Item = P::Item>,
    {
        self.check_position(index)?;
        let incoming: Vec<P::Item> = items.into_iter().collect();
        let count = incoming.len();
        if count == 0 {
            return Ok(false);
        }
        let at = self.absolute(index);
        self.parent.root_mut().insert_all(at, incoming)?;
        self.resync(count, 0);
        Ok(true)
    }

    /// Append every element of `items` at the end of the window.
    pub fn extend<I>(&mut self, items: I) -> Result<bool, SeqError>
    where
        I: IntoIterator<Item = P::Item>,
    {
        let len = self.view.len;
        self.insert_all(len, items)
    }

    /// Remove every element of the window from the root.
    pub fn clear(&mut self) -> Result<(), SeqError> {
        let len = self.view.len;
        self.remove_range(0, len)
    }

    /// Borrow the window as a slice.
    pub fn as_slice(&self) -> Result<&[P::Item], SeqError> {
        self.check()?;
        window_of(self.parent.root(), self.base_offset(), self.view.len)
    }

    /// Iterate over the window.
    pub fn iter(&self) -> Result<std::slice::Iter<'_, P::Item>, SeqError> {
        Ok(self.as_slice()?.iter())
    }

    /// Position of the first element in the window equal to `value`.
    pub fn index_of(&self, value: &P::Item) -> Result<Option<usize>, SeqError>
    where
        P::Item: PartialEq,
    {
        Ok(self.as_slice()?.iter().position(|item| item == value))
    }

    /// Whether the window contains `value`.
    pub fn contains(&self, value: &P::Item) -> Result<bool, SeqError>
    where
        P::Item: PartialEq,
    {
        Ok(self.as_slice()?.contains(value))
    }

    /// An independent copy of the window's elements.
    pub fn to_vec(&self) -> Result<Vec<P::Item>, SeqError>
    where
        P::Item: Clone,
    {
        Ok(self.as_slice()?.to_vec())
    }

    /// A view of `[from, to)` within this window.
    pub fn range(&self, from: usize, to: usize) -> Result<RangeView, SeqError> {
        self.check()?;
        RangeView::over(self, from, to)
    }

    /// A fail-fast cursor before the window's first element.
    pub fn cursor(&self) -> Result<ViewCursor, SeqError> {
        self.cursor_at(0)
    }

    /// A fail-fast cursor before element `index` of the window.
    ///
    /// `index` may equal `len()`.
    pub fn cursor_at(&self, index: usize) -> Result<ViewCursor, SeqError> {
        self.check_position(index)?;
        Ok(ViewCursor {
            owner: self.owner(),
            scope: self.view.id,
            cursor: index,
            last_returned: None,
            expected: self.generation(),
        })
    }

    /// A split cursor bound to this window at the current generation.
    pub fn split_cursor(&self) -> Result<ArraySplitCursor, SeqError> {
        self.check()?;
        let start = self.base_offset();
        Ok(ArraySplitCursor::from_range(
            self.owner(),
            start,
            start + self.view.len,
            self.generation(),
        ))
    }
}

impl<P: RangeParent> RangeParent for BoundView<'_, P> {
    type Item = P::Item;

    fn owner(&self) -> ContainerId {
        self.parent.owner()
    }

    fn scope(&self) -> ContainerId {
        self.view.id
    }

    fn generation(&self) -> Generation {
        self.parent.generation()
    }

    fn len(&self) -> usize {
        self.view.len
    }

    fn base_offset(&self) -> usize {
        self.parent.base_offset() + self.view.offset
    }

    fn root(&self) -> &DynamicArray<P::Item> {
        self.parent.root()
    }

    fn root_mut(&mut self) -> &mut DynamicArray<P::Item> {
        self.parent.root_mut()
    }

    fn resync(&mut self, grown: usize, shrunk: usize) {
        self.parent.resync(grown, shrunk);
        self.view.len = self.view.len + grown - shrunk;
        self.view.expected = self.parent.generation();
    }
}

/// A fail-fast cursor over the window of one [`RangeView`].
///
/// Works like [`ArrayCursor`](crate::ArrayCursor) with window-relative
/// positions, and is used with the [`BoundView`] of the view it was
/// taken from. Removal and insertion through the cursor go through the
/// bound view, so every enclosing view's length and generation follow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewCursor {
    owner: ContainerId,
    scope: ContainerId,
    cursor: usize,
    last_returned: Option<usize>,
    expected: Generation,
}

impl ViewCursor {
    fn verify<P: RangeParent>(&self, bound: &BoundView<'_, P>) -> Result<(), SeqError> {
        bound.check()?;
        if self.owner != bound.owner() || self.scope != bound.scope() {
            return Err(SeqError::ForeignContainer {
                expected: self.scope,
                found: bound.scope(),
            });
        }
        if self.expected != bound.generation() {
            return Err(SeqError::ConcurrentModification {
                expected: self.expected,
                found: bound.generation(),
            });
        }
        Ok(())
    }

    /// Whether [`next`](Self::next) has an element to return.
    pub fn has_next<P: RangeParent>(&self, bound: &BoundView<'_, P>) -> bool {
        self.cursor < bound.len()
    }

    /// Whether [`previous`](Self::previous) has an element to return.
    pub fn has_previous(&self) -> bool {
        self.cursor != 0
    }

    /// Window index of the element a subsequent `next` would return.
    pub fn next_index(&self) -> usize {
        self.cursor
    }

    /// Window index of the element a subsequent `previous` would return.
    pub fn previous_index(&self) -> Option<usize> {
        self.cursor.checked_sub(1)
    }

    /// Advance and return the next element.
    pub fn next<'b, P: RangeParent>(
        &mut self,
        bound: &'b BoundView<'_, P>,
    ) -> Result<&'b P::Item, SeqError> {
        self.verify(bound)?;
        let i = self.cursor;
        if i >= bound.len() {
            return Err(SeqError::NoSuchElement);
        }
        let item = bound.get(i)?;
        self.cursor = i + 1;
        self.last_returned = Some(i);
        Ok(item)
    }

    /// Step back and return the previous element.
    pub fn previous<'b, P: RangeParent>(
        &mut self,
        bound: &'b BoundView<'_, P>,
    ) -> Result<&'b P::Item, SeqError> {
        self.verify(bound)?;
        let i = self.cursor.checked_sub(1).ok_or(SeqError::NoSuchElement)?;
        let item = bound.get(i)?;
        self.cursor = i;
        self.last_returned = Some(i);
        Ok(item)
    }

    /// Remove the element last returned by `next` or `previous`.
    pub fn remove<P: RangeParent>(
        &mut self,
        bound: &mut BoundView<'_, P>,
    ) -> Result<P::Item, SeqError> {
        self.verify(bound)?;
        let last = self.last_returned.ok_or(SeqError::IllegalCursorState)?;
        let value = bound.remove(last)?;
        self.cursor = last;
        self.last_returned = None;
        self.expected = bound.generation();
        Ok(value)
    }

    /// Overwrite the element last returned by `next` or `previous`.
    pub fn set<P: RangeParent>(
        &self,
        bound: &mut BoundView<'_, P>,
        value: P::Item,
    ) -> Result<P::Item, SeqError> {
        self.verify(bound)?;
        let last = self.last_returned.ok_or(SeqError::IllegalCursorState)?;
        bound.set(last, value)
    }

    /// Insert `value` immediately before the cursor.
    pub fn add<P: RangeParent>(
        &mut self,
        bound: &mut BoundView<'_, P>,
        value: P::Item,
    ) -> Result<(), SeqError> {
        self.verify(bound)?;
        bound.insert(self.cursor, value)?;
        self.cursor += 1;
        self.last_returned = None;
        self.expected = bound.generation();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> DynamicArray<char> {
        "abcdef".chars().collect()
    }

    fn text(array: &DynamicArray<char>) -> String {
        array.iter().collect()
    }

    #[test]
    fn remove_through_view_updates_both() {
        let mut array = letters();
        let mut view = array.range(2, 5).unwrap();
        {
            let mut bound = view.bind(&mut array).unwrap();
            assert_eq!(bound.remove(0), Ok('c'));
            assert_eq!(bound.to_vec().unwrap(), vec!['d', 'e']);
        }
        assert_eq!(text(&array), "abdef");
        assert_eq!(view.len(), 2);
        assert_eq!(view.window(&array).unwrap(), &['d', 'e']);
    }

    #[test]
    fn range_bounds_are_checked() {
        let array = letters();
        assert_eq!(
            array.range(0, 7),
            Err(SeqError::PositionOutOfBounds { index: 7, len: 6 })
        );
        assert_eq!(
            array.range(4, 2),
            Err(SeqError::InvalidRange { from: 4, to: 2 })
        );
        assert!(array.range(6, 6).unwrap().is_empty());
    }

    #[test]
    fn view_indices_are_window_relative() {
        let mut array = letters();
        let mut view = array.range(1, 4).unwrap();
        let mut bound = view.bind(&mut array).unwrap();
        assert_eq!(bound.get(0), Ok(&'b'));
        assert_eq!(
            bound.get(3),
            Err(SeqError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(bound.set(2, 'D'), Ok('d'));
        bound.push('x').unwrap();
        bound.insert(0, 'y').unwrap();
        assert_eq!(bound.as_slice().unwrap(), &['y', 'b', 'c', 'D', 'x']);
        assert_eq!(bound.index_of(&'x'), Ok(Some(4)));
        assert_eq!(bound.contains(&'a'), Ok(false));
        drop(bound);
        assert_eq!(text(&array), "aybcDxef");
    }

    #[test]
    fn direct_mutation_invalidates_view() {
        let mut array = letters();
        let mut view = array.range(1, 3).unwrap();
        array.push('g').unwrap();
        let err = view.bind(&mut array).err().unwrap();
        assert!(err.is_concurrent_modification());
        assert!(view.window(&array).unwrap_err().is_concurrent_modification());
    }

    #[test]
    fn set_through_root_does_not_invalidate_view() {
        let mut array = letters();
        let mut view = array.range(1, 3).unwrap();
        array.set(1, 'B').unwrap();
        let bound = view.bind(&mut array).unwrap();
        assert_eq!(bound.get(0), Ok(&'B'));
    }

    #[test]
    fn sibling_mutation_invalidates_view() {
        let mut array = letters();
        let mut left = array.range(0, 3).unwrap();
        let mut right = array.range(3, 6).unwrap();
        left.bind(&mut array).unwrap().remove(0).unwrap();
        let err = right.bind(&mut array).err().unwrap();
        assert!(err.is_concurrent_modification());
    }

    #[test]
    fn foreign_parent_is_rejected() {
        let array = letters();
        let mut other = letters();
        let mut view = array.range(0, 2).unwrap();
        assert!(matches!(
            view.bind(&mut other).err(),
            Some(SeqError::ForeignContainer { .. })
        ));
    }

    #[test]
    fn nested_views_propagate_length_changes() {
        let mut array: DynamicArray<u32> = (0..10).collect();
        let mut outer = array.range(2, 8).unwrap();
        {
            let mut outer_bound = outer.bind(&mut array).unwrap();
            let mut inner = outer_bound.range(1, 4).unwrap();
            {
                let mut inner_bound = inner.bind(&mut outer_bound).unwrap();
                assert_eq!(inner_bound.to_vec().unwrap(), vec![3, 4, 5]);
                inner_bound.remove(1).unwrap();
                inner_bound.push(100).unwrap();
                assert_eq!(inner_bound.to_vec().unwrap(), vec![3, 5, 100]);
            }
            assert_eq!(outer_bound.to_vec().unwrap(), vec![2, 3, 5, 100, 6, 7]);
            // The inner view re-binds cleanly after the outer observed its changes.
            assert!(inner.bind(&mut outer_bound).is_ok());
            outer_bound.remove(0).unwrap();
            let err = inner.bind(&mut outer_bound).err().unwrap();
            assert!(err.is_concurrent_modification());
        }
        assert_eq!(outer.len(), 5);
        assert_eq!(array.as_slice(), &[0, 1, 3, 5, 100, 6, 7, 8, 9]);
    }

    #[test]
    fn clear_removes_window_only() {
        let mut array = letters();
        let mut view = array.range(1, 5).unwrap();
        let mut bound = view.bind(&mut array).unwrap();
        bound.clear().unwrap();
        assert_eq!(bound.len(), 0);
        drop(bound);
        assert_eq!(text(&array), "af");
    }

    #[test]
    fn remove_range_within_view() {
        let mut array = letters();
        let mut view = array.range(1, 5).unwrap();
        let mut bound = view.bind(&mut array).unwrap();
        bound.remove_range(1, 3).unwrap();
        assert_eq!(bound.to_vec().unwrap(), vec!['b', 'e']);
        assert_eq!(
            bound.remove_range(2, 1),
            Err(SeqError::InvalidRange { from: 2, to: 1 })
        );
        drop(bound);
        assert_eq!(text(&array), "abef");
    }

    #[test]
    fn insert_all_into_view() {
        let mut array = letters();
        let mut view = array.range(1, 3).unwrap();
        let mut bound = view.bind(&mut array).unwrap();
        let gen = bound.generation();
        assert_eq!(bound.insert_all(1, Vec::new()), Ok(false));
        assert_eq!(bound.generation(), gen);
        assert_eq!(bound.extend(vec!['x', 'y']), Ok(true));
        assert_eq!(bound.to_vec().unwrap(), vec!['b', 'c', 'x', 'y']);
        drop(bound);
        assert_eq!(text(&array), "abcxydef");
    }

    #[test]
    fn split_cursor_covers_window() {
        let mut array: DynamicArray<u32> = (0..10).collect();
        let mut view = array.range(3, 7).unwrap();
        let bound = view.bind(&mut array).unwrap();
        let mut cursor = bound.split_cursor().unwrap();
        drop(bound);
        let mut seen = vec![];
        cursor.for_each_remaining(&array, |v| seen.push(*v)).unwrap();
        assert_eq!(seen, vec![3, 4, 5, 6]);
    }

    #[test]
    fn root_mut_bypass_is_detected() {
        let mut array = letters();
        let mut view = array.range(0, 3).unwrap();
        let mut bound = view.bind(&mut array).unwrap();
        bound.root_mut().push('z').unwrap();
        assert!(bound.get(0).unwrap_err().is_concurrent_modification());
    }

    #[test]
    fn nested_view_rejects_the_root() {
        let mut array: DynamicArray<u32> = (0..10).collect();
        let mut outer = array.range(5, 10).unwrap();
        let outer_bound = outer.bind(&mut array).unwrap();
        let mut inner = outer_bound.range(0, 2).unwrap();
        assert_eq!(inner.window(&outer_bound).unwrap(), &[5, 6]);
        drop(outer_bound);
        assert!(matches!(
            inner.window(&array),
            Err(SeqError::ForeignContainer { .. })
        ));
        assert!(matches!(
            inner.bind(&mut array).err(),
            Some(SeqError::ForeignContainer { .. })
        ));
        assert_eq!(array.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn root_view_rejects_a_nested_parent() {
        let mut array: DynamicArray<u32> = (0..10).collect();
        let mut outer = array.range(5, 10).unwrap();
        let mut stray = array.range(5, 10).unwrap();
        let mut outer_bound = outer.bind(&mut array).unwrap();
        assert!(matches!(
            stray.window(&outer_bound),
            Err(SeqError::ForeignContainer { .. })
        ));
        assert!(matches!(
            stray.bind(&mut outer_bound).err(),
            Some(SeqError::ForeignContainer { .. })
        ));
    }

    #[test]
    fn sibling_bound_view_is_not_a_parent() {
        let mut array: DynamicArray<u32> = (0..10).collect();
        let mut left = array.range(0, 5).unwrap();
        let mut right = array.range(5, 10).unwrap();
        let mut inner;
        {
            let left_bound = left.bind(&mut array).unwrap();
            inner = left_bound.range(0, 5).unwrap();
        }
        let mut right_bound = right.bind(&mut array).unwrap();
        assert!(matches!(
            inner.bind(&mut right_bound).err(),
            Some(SeqError::ForeignContainer { .. })
        ));
    }

    #[test]
    fn view_cursor_walks_the_window() {
        let mut array = letters();
        let mut view = array.range(1, 5).unwrap();
        let bound = view.bind(&mut array).unwrap();
        let mut cursor = bound.cursor().unwrap();
        let mut seen = String::new();
        while cursor.has_next(&bound) {
            seen.push(*cursor.next(&bound).unwrap());
        }
        assert_eq!(seen, "bcde");
        assert_eq!(cursor.next(&bound), Err(SeqError::NoSuchElement));
        assert_eq!(cursor.previous(&bound), Ok(&'e'));
        assert_eq!(cursor.next_index(), 3);
        assert_eq!(
            bound.cursor_at(5).err(),
            Some(SeqError::PositionOutOfBounds { index: 5, len: 4 })
        );
    }

    #[test]
    fn view_cursor_removal_keeps_it_and_the_view_valid() {
        let mut array: DynamicArray<u32> = (0..10).collect();
        let mut view = array.range(2, 8).unwrap();
        {
            let mut bound = view.bind(&mut array).unwrap();
            let mut cursor = bound.cursor().unwrap();
            while cursor.has_next(&bound) {
                if *cursor.next(&bound).unwrap() % 2 == 1 {
                    cursor.remove(&mut bound).unwrap();
                }
            }
            cursor.add(&mut bound, 100).unwrap();
            assert_eq!(cursor.previous(&bound), Ok(&100));
            assert_eq!(cursor.set(&mut bound, 99), Ok(100));
            assert_eq!(bound.to_vec().unwrap(), vec![2, 4, 6, 99]);
        }
        assert_eq!(view.len(), 4);
        assert_eq!(array.as_slice(), &[0, 1, 2, 4, 6, 99, 8, 9]);
        assert!(view.bind(&mut array).is_ok());
    }

    #[test]
    fn view_cursor_detects_interference() {
        let mut array = letters();
        let mut view = array.range(1, 5).unwrap();
        let mut bound = view.bind(&mut array).unwrap();
        let mut first = bound.cursor().unwrap();
        let mut second = bound.cursor().unwrap();
        first.next(&bound).unwrap();
        first.remove(&mut bound).unwrap();
        assert!(second.next(&bound).unwrap_err().is_concurrent_modification());

        bound.push('x').unwrap();
        assert!(first.next(&bound).unwrap_err().is_concurrent_modification());

        let mut fresh = bound.cursor().unwrap();
        bound.root_mut().push('z').unwrap();
        assert!(fresh.next(&bound).unwrap_err().is_concurrent_modification());
    }

    #[test]
    fn view_cursor_belongs_to_its_view() {
        let mut array = letters();
        let mut outer = array.range(0, 6).unwrap();
        let mut outer_bound = outer.bind(&mut array).unwrap();
        let mut cursor = outer_bound.cursor().unwrap();
        let mut inner = outer_bound.range(0, 3).unwrap();
        let inner_bound = inner.bind(&mut outer_bound).unwrap();
        assert!(matches!(
            cursor.next(&inner_bound),
            Err(SeqError::ForeignContainer { .. })
        ));
    }
}
