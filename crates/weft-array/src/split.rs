//! Bisecting split cursor over a [`DynamicArray`].

use weft_core::{ContainerId, Generation, SeqError};

use crate::array::DynamicArray;

/// A late-binding, splittable traversal of `[index, fence)`.
///
/// A cursor obtained from [`DynamicArray::split_cursor`] is unbound: it
/// fixes its fence and captures the array's generation on first use, so
/// mutations between creation and first use are not interference.
/// [`try_split`](Self::try_split) hands the lower half of the remaining
/// range to a new cursor and keeps the upper half.
///
/// The cursor holds no borrow, so it can be moved to another thread and
/// consumed there against a shared `&DynamicArray<T>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArraySplitCursor {
    owner: ContainerId,
    index: usize,
    fence: Option<usize>,
    expected: Generation,
}

impl ArraySplitCursor {
    pub(crate) fn new(owner: ContainerId) -> Self {
        Self {
            owner,
            index: 0,
            fence: None,
            expected: Generation::ZERO,
        }
    }

    /// A cursor already bound to `[from, to)` at generation `expected`.
    pub(crate) fn from_range(
        owner: ContainerId,
        from: usize,
        to: usize,
        expected: Generation,
    ) -> Self {
        Self {
            owner,
            index: from,
            fence: Some(to),
            expected,
        }
    }

    fn bind<T>(&mut self, array: &DynamicArray<T>) -> Result<usize, SeqError> {
        if self.owner != array.id() {
            return Err(SeqError::ForeignContainer {
                expected: self.owner,
                found: array.id(),
            });
        }
        match self.fence {
            Some(fence) => Ok(fence),
            None => {
                let fence = array.len();
                self.expected = array.generation();
                self.fence = Some(fence);
                Ok(fence)
            }
        }
    }

    fn stale<T>(&self, array: &DynamicArray<T>) -> SeqError {
        SeqError::ConcurrentModification {
            expected: self.expected,
            found: array.generation(),
        }
    }

    /// Number of elements left to visit. Binds the cursor.
    pub fn estimate_size<T>(&mut self, array: &DynamicArray<T>) -> Result<usize, SeqError> {
        let fence = self.bind(array)?;
        Ok(fence.saturating_sub(self.index))
    }

    /// Split off the lower half of the remaining range.
    ///
    /// Returns `Ok(None)` when fewer than two elements remain.
    pub fn try_split<T>(&mut self, array: &DynamicArray<T>) -> Result<Option<Self>, SeqError> {
        let hi = self.bind(array)?;
        let lo = self.index;
        let mid = lo + hi.saturating_sub(lo) / 2;
        if lo >= mid {
            return Ok(None);
        }
        self.index = mid;
        Ok(Some(Self {
            owner: self.owner,
            index: lo,
            fence: Some(mid),
            expected: self.expected,
        }))
    }

    /// Visit the next element, if any. Returns whether one was visited.
    ///
    /// The generation is checked after the visit.
    pub fn try_advance<'a, T, F>(
        &mut self,
        array: &'a DynamicArray<T>,
        visit: F,
    ) -> Result<bool, SeqError>
    where
        F: FnOnce(&'a T),
    {
        let hi = self.bind(array)?;
        let i = self.index;
        if i >= hi {
            return Ok(false);
        }
        let item = array.as_slice().get(i).ok_or_else(|| self.stale(array))?;
        self.index = i + 1;
        visit(item);
        array.verify(self.owner, self.expected)?;
        Ok(true)
    }

    /// Visit every remaining element.
    ///
    /// A fence beyond the array's current length fails before anything
    /// is visited; otherwise the generation is checked once, after the
    /// whole pass.
    pub fn for_each_remaining<'a, T, F>(
        &mut self,
        array: &'a DynamicArray<T>,
        mut visit: F,
    ) -> Result<(), SeqError>
    where
        F: FnMut(&'a T),
    {
        let hi = self.bind(array)?;
        if hi > array.len() {
            return Err(self.stale(array));
        }
        let lo = self.index.min(hi);
        self.index = hi;
        for item in &array.as_slice()[lo..hi] {
            visit(item);
        }
        array.verify(self.owner, self.expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T: Copy>(cursor: &mut ArraySplitCursor, array: &DynamicArray<T>) -> Vec<T> {
        let mut out = vec![];
        cursor.for_each_remaining(array, |v| out.push(*v)).unwrap();
        out
    }

    #[test]
    fn binds_late() {
        let mut array: DynamicArray<u32> = (0..4).collect();
        let mut cursor = array.split_cursor();
        array.push(4).unwrap();
        assert_eq!(cursor.estimate_size(&array), Ok(5));
        assert_eq!(drain(&mut cursor, &array), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn split_bisects_and_keeps_upper_half() {
        let array: DynamicArray<u32> = (0..10).collect();
        let mut upper = array.split_cursor();
        let mut lower = upper.try_split(&array).unwrap().unwrap();
        assert_eq!(lower.estimate_size(&array), Ok(5));
        assert_eq!(upper.estimate_size(&array), Ok(5));
        assert_eq!(drain(&mut lower, &array), vec![0, 1, 2, 3, 4]);
        assert_eq!(drain(&mut upper, &array), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn single_element_does_not_split() {
        let array: DynamicArray<u32> = vec![1].into();
        let mut cursor = array.split_cursor();
        assert_eq!(cursor.try_split(&array), Ok(None));
        let empty: DynamicArray<u32> = DynamicArray::new();
        let mut cursor = empty.split_cursor();
        assert_eq!(cursor.try_split(&empty), Ok(None));
    }

    #[test]
    fn try_advance_one_at_a_time() {
        let array: DynamicArray<u32> = (0..3).collect();
        let mut cursor = array.split_cursor();
        let mut seen = vec![];
        while cursor.try_advance(&array, |v| seen.push(*v)).unwrap() {}
        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(cursor.estimate_size(&array), Ok(0));
    }

    #[test]
    fn mutation_after_binding_is_detected() {
        let mut array: DynamicArray<u32> = (0..6).collect();
        let mut cursor = array.split_cursor();
        assert_eq!(cursor.estimate_size(&array), Ok(6));
        array.remove(0).unwrap();
        let err = cursor.try_advance(&array, |_| {}).unwrap_err();
        assert!(err.is_concurrent_modification());
    }

    #[test]
    fn shrunk_array_fails_bulk_pass_before_visiting() {
        let mut array: DynamicArray<u32> = (0..6).collect();
        let mut cursor = array.split_cursor();
        cursor.estimate_size(&array).unwrap();
        array.remove_range(0, 3).unwrap();
        let mut visited = 0;
        let err = cursor
            .for_each_remaining(&array, |_| visited += 1)
            .unwrap_err();
        assert!(err.is_concurrent_modification());
        assert_eq!(visited, 0);
    }

    #[test]
    fn recursive_split_visits_each_element_once_in_order() {
        fn leaves(
            mut cursor: ArraySplitCursor,
            array: &DynamicArray<usize>,
            out: &mut Vec<usize>,
        ) {
            match cursor.try_split(array).unwrap() {
                Some(lower) => {
                    leaves(lower, array, out);
                    leaves(cursor, array, out);
                }
                None => cursor.for_each_remaining(array, |v| out.push(*v)).unwrap(),
            }
        }
        for n in [0usize, 1, 2, 3, 7, 64, 1000] {
            let array: DynamicArray<usize> = (0..n).collect();
            let mut out = vec![];
            leaves(array.split_cursor(), &array, &mut out);
            assert_eq!(out, (0..n).collect::<Vec<_>>());
        }
    }
}
