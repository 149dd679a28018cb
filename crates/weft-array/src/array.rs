//! The growable contiguous array.
//!
//! [`DynamicArray`] owns one buffer and tracks its logical capacity
//! explicitly so that growth follows [`GrowthPolicy`] exactly rather
//! than whatever the allocator rounds up to. Every structural mutation
//! advances the array's [`Generation`]; cursors and views compare
//! against it before acting.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;

use smallvec::SmallVec;
use tracing::trace;
use weft_core::{ContainerId, Generation, RandomAccess, SeqError, Sequence};

use crate::config::GrowthPolicy;
use crate::cursor::ArrayCursor;
use crate::split::ArraySplitCursor;
use crate::view::RangeView;

/// How the array's buffer came to be.
///
/// A default-constructed array allocates nothing until its first
/// mutation, at which point it jumps straight to the policy's default
/// capacity. An array constructed with an explicit capacity (including
/// zero) grows from exactly that.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferOrigin {
    /// Constructed without a capacity; the default applies lazily.
    DefaultUnsized,
    /// Constructed with (or already grown to) an explicit capacity.
    Sized,
}

/// A growable contiguous array with fail-fast interference detection.
///
/// Append is amortized O(1), indexed access is O(1), insertion and
/// removal at `i` cost O(len - i). The array is single-threaded: all
/// mutation goes through `&mut self`.
pub struct DynamicArray<T> {
    data: Vec<T>,
    /// Logical capacity; the backing `Vec` always holds at least this much.
    capacity: usize,
    origin: BufferOrigin,
    policy: GrowthPolicy,
    generation: Generation,
    id: ContainerId,
}

impl<T> DynamicArray<T> {
    /// Create an empty array. No buffer is allocated until the first
    /// mutation, which then reserves [`GrowthPolicy::DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_policy(GrowthPolicy::for_element::<T>())
    }

    /// Create an empty, unallocated array governed by `policy`.
    pub fn with_policy(policy: GrowthPolicy) -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
            origin: BufferOrigin::DefaultUnsized,
            policy,
            generation: Generation::ZERO,
            id: ContainerId::next(),
        }
    }

    /// Create an empty array with room for exactly `capacity` elements.
    ///
    /// Fails with [`SeqError::CapacityExceeded`] if `capacity` is above
    /// the platform limit or the allocator refuses the request.
    pub fn with_capacity(capacity: usize) -> Result<Self, SeqError> {
        let mut array = Self::new();
        array.origin = BufferOrigin::Sized;
        if capacity > 0 {
            array.reallocate(capacity)?;
        }
        Ok(array)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of elements the array can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current structural generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Identity of this array instance.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// The growth policy in effect.
    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    /// Whether the buffer is still the lazily-sized default.
    pub fn origin(&self) -> BufferOrigin {
        self.origin
    }

    // ── Positional access ───────────────────────────────────────

    /// Borrow the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T, SeqError> {
        let len = self.data.len();
        self.data
            .get(index)
            .ok_or(SeqError::IndexOutOfBounds { index, len })
    }

    /// Mutably borrow the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, SeqError> {
        let len = self.data.len();
        self.data
            .get_mut(index)
            .ok_or(SeqError::IndexOutOfBounds { index, len })
    }

    /// Overwrite the element at `index`, returning the old value.
    ///
    /// Not a structural mutation: the generation is unchanged.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, SeqError> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Append `value` at the end.
    pub fn push(&mut self, value: T) -> Result<(), SeqError> {
        let minimum = self.required(1)?;
        self.ensure_capacity_internal(minimum)?;
        self.data.push(value);
        self.generation.advance();
        Ok(())
    }

    /// Insert `value` at `index`, shifting the tail right by one.
    ///
    /// `insert(len, v)` is equivalent to `push(v)`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), SeqError> {
        self.check_position(index)?;
        let minimum = self.required(1)?;
        self.ensure_capacity_internal(minimum)?;
        self.data.insert(index, value);
        self.generation.advance();
        Ok(())
    }

    /// Remove and return the element at `index`, shifting the tail left.
    pub fn remove(&mut self, index: usize) -> Result<T, SeqError> {
        self.check_index(index)?;
        let value = self.data.remove(index);
        self.generation.advance();
        Ok(value)
    }

    /// Remove the first element equal to `value`. Returns whether one was found.
    pub fn remove_item(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(value) {
            Some(index) => {
                self.data.remove(index);
                self.generation.advance();
                true
            }
            None => false,
        }
    }

    // ── Bulk operations ─────────────────────────────────────────

    /// Insert every element of `items` starting at `index`, in order.
    ///
    /// The source is collected into a temporary buffer before the array
    /// is touched, so the capacity check and the generation bump happen
    /// once. Returns whether anything was inserted.
    pub fn insert_all<I>(&mut self, index: usize, items: I) -> Result<bool, SeqError>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_position(index)?;
        let incoming: Vec<T> = items.into_iter().collect();
        let minimum = self.required(incoming.len())?;
        self.ensure_capacity_internal(minimum)?;
        self.generation.advance();
        if incoming.is_empty() {
            return Ok(false);
        }
        self.data.splice(index..index, incoming);
        Ok(true)
    }

    /// Append every element of `items`, in order.
    pub fn extend_from<I>(&mut self, items: I) -> Result<bool, SeqError>
    where
        I: IntoIterator<Item = T>,
    {
        let len = self.data.len();
        self.insert_all(len, items)
    }

    /// Remove the elements in `[from, to)` with a single shift of the tail.
    pub fn remove_range(&mut self, from: usize, to: usize) -> Result<(), SeqError> {
        if from > to {
            return Err(SeqError::InvalidRange { from, to });
        }
        self.check_position(to)?;
        self.data.drain(from..to);
        self.generation.advance();
        Ok(())
    }

    /// Drop every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.data.clear();
        self.generation.advance();
    }

    /// Remove every element for which `predicate` returns `true`.
    ///
    /// Returns the number of elements removed.
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
    /// The predicate is evaluated over every element before anything is
    /// moved. If it fails (or panics) partway, the array is left exactly
    /// as it was and the error is returned. On success the survivors are
    /// compacted in one pass and the generation advances once.
    pub fn try_remove_if<E, F>(&mut self, mut predicate: F) -> Result<usize, E>
    where
        F: FnMut(&T) -> Result<bool, E>,
    {
        let mut marks = RemovalMarks::with_len(self.data.len());
        for (index, item) in self.data.iter().enumerate() {
            if predicate(item)? {
                marks.mark(index);
            }
        }
        Ok(self.commit_removals(&marks))
    }

    /// Keep only the elements for which `predicate` returns `true`.
    pub fn retain<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.remove_if(|item| !predicate(item))
    }

    /// Keep only the elements for which a fallible `predicate` returns
    /// `Ok(true)`, with the same all-or-nothing guarantee as
    /// [`try_remove_if`](Self::try_remove_if).
    pub fn try_retain<E, F>(&mut self, mut predicate: F) -> Result<usize, E>
    where
        F: FnMut(&T) -> Result<bool, E>,
    {
        self.try_remove_if(|item| predicate(item).map(|keep| !keep))
    }

    /// Remove every element that also appears in `other`.
    pub fn remove_all(&mut self, other: &[T]) -> bool
    where
        T: PartialEq,
    {
        self.remove_if(|item| other.contains(item)) > 0
    }

    /// Remove every element that does not appear in `other`.
    pub fn retain_all(&mut self, other: &[T]) -> bool
    where
        T: PartialEq,
    {
        self.remove_if(|item| !other.contains(item)) > 0
    }

    fn commit_removals(&mut self, marks: &RemovalMarks) -> usize {
        let removed = marks.count();
        if removed == 0 {
            return 0;
        }
        let mut index = 0;
        self.data.retain(|_| {
            let keep = !marks.is_marked(index);
            index += 1;
            keep
        });
        self.generation.advance();
        removed
    }

    /// Transform every element in place.
    pub fn replace_all<F>(&mut self, mut transform: F)
    where
        F: FnMut(&mut T),
    {
        for item in &mut self.data {
            transform(item);
        }
        self.generation.advance();
    }

    /// Stable in-place sort by `compare`.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.data.sort_by(compare);
        self.generation.advance();
    }

    /// Stable in-place sort by the elements' natural order.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(Ord::cmp);
    }

    // ── Searching ───────────────────────────────────────────────

    /// Whether any element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.data.contains(value)
    }

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.data.iter().position(|item| item == value)
    }

    /// Position of the last element equal to `value`.
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.data.iter().rposition(|item| item == value)
    }

    // ── Capacity management ─────────────────────────────────────

    /// Release unused capacity so that `capacity() == len()`.
    pub fn compact(&mut self) {
        self.generation.advance();
        if self.data.len() < self.capacity {
            self.data.shrink_to_fit();
            trace!(
                from = self.capacity,
                to = self.data.len(),
                "dynamic array compacted"
            );
            self.capacity = self.data.len();
            self.origin = BufferOrigin::Sized;
        }
    }

    /// Make room for at least `minimum` elements.
    ///
    /// A default-constructed array that has not allocated yet ignores
    /// requests at or below the default capacity: it is going to jump
    /// to that size on first use anyway.
    pub fn ensure_capacity(&mut self, minimum: usize) -> Result<(), SeqError> {
        let min_expand = match self.origin {
            BufferOrigin::Sized => 0,
            BufferOrigin::DefaultUnsized => self.policy.default_capacity,
        };
        if minimum > min_expand {
            self.generation.advance();
            if minimum > self.capacity {
                self.grow(minimum)?;
            }
        }
        Ok(())
    }

    fn required(&self, additional: usize) -> Result<usize, SeqError> {
        self.data
            .len()
            .checked_add(additional)
            .ok_or(SeqError::CapacityOverflow)
    }

    fn ensure_capacity_internal(&mut self, minimum: usize) -> Result<(), SeqError> {
        let minimum = match self.origin {
            BufferOrigin::DefaultUnsized => minimum.max(self.policy.default_capacity),
            BufferOrigin::Sized => minimum,
        };
        if minimum > self.capacity {
            self.grow(minimum)?;
        }
        Ok(())
    }

    fn grow(&mut self, minimum: usize) -> Result<(), SeqError> {
        let new_capacity = self.policy.grown_capacity(self.capacity, minimum)?;
        self.reallocate(new_capacity)?;
        self.origin = BufferOrigin::Sized;
        Ok(())
    }

    fn reallocate(&mut self, new_capacity: usize) -> Result<(), SeqError> {
        let max = self.policy.max_capacity;
        if new_capacity > max {
            return Err(SeqError::CapacityExceeded {
                requested: new_capacity,
                max,
            });
        }
        if new_capacity > self.data.capacity() {
            self.data
                .try_reserve_exact(new_capacity - self.data.len())
                .map_err(|_| SeqError::CapacityExceeded {
                    requested: new_capacity,
                    max,
                })?;
        }
        trace!(
            from = self.capacity,
            to = new_capacity,
            len = self.data.len(),
            "dynamic array reallocated"
        );
        self.capacity = new_capacity;
        Ok(())
    }

    // ── Export and iteration ────────────────────────────────────

    /// An independent copy of the elements, in order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.to_vec()
    }

    /// Copy the elements into `dst` if it is large enough and return the
    /// filled prefix; otherwise return a freshly allocated buffer of
    /// exactly `len()` elements. `dst` beyond the prefix is untouched.
    pub fn to_array_into<'a>(&self, dst: &'a mut [T]) -> Cow<'a, [T]>
    where
        T: Clone,
    {
        let len = self.data.len();
        if dst.len() < len {
            return Cow::Owned(self.data.to_vec());
        }
        let filled = &mut dst[..len];
        filled.clone_from_slice(&self.data);
        Cow::Borrowed(filled)
    }

    /// Borrow the live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterate mutably over the elements in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    // ── Handles ─────────────────────────────────────────────────

    /// A fail-fast cursor positioned before the first element.
    pub fn cursor(&self) -> ArrayCursor {
        ArrayCursor::new(self.id, 0, self.generation)
    }

    /// A fail-fast cursor positioned before element `index`.
    ///
    /// `index` may equal `len()` (cursor at the end).
    pub fn cursor_at(&self, index: usize) -> Result<ArrayCursor, SeqError> {
        self.check_position(index)?;
        Ok(ArrayCursor::new(self.id, index, self.generation))
    }

    /// An unbound split cursor over the whole array.
    ///
    /// The cursor's extent is fixed on its first use, not here.
    pub fn split_cursor(&self) -> ArraySplitCursor {
        ArraySplitCursor::new(self.id)
    }

    /// A live view of `[from, to)`.
    pub fn range(&self, from: usize, to: usize) -> Result<RangeView, SeqError> {
        RangeView::over(self, from, to)
    }

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

    fn check_index(&self, index: usize) -> Result<(), SeqError> {
        let len = self.data.len();
        if index >= len {
            return Err(SeqError::IndexOutOfBounds { index, len });
        }
        Ok(())
    }

    fn check_position(&self, index: usize) -> Result<(), SeqError> {
        let len = self.data.len();
        if index > len {
            return Err(SeqError::PositionOutOfBounds { index, len });
        }
        Ok(())
    }
}

/// Bitset of element positions selected for removal.
///
/// Arrays of up to 256 elements are marked without a heap allocation.
struct RemovalMarks {
    words: SmallVec<[u64; 4]>,
    count: usize,
}

impl RemovalMarks {
    fn with_len(len: usize) -> Self {
        Self {
            words: SmallVec::from_elem(0, len.div_ceil(64)),
            count: 0,
        }
    }

    fn mark(&mut self, index: usize) {
        self.words[index / 64] |= 1 << (index % 64);
        self.count += 1;
    }

    fn is_marked(&self, index: usize) -> bool {
        self.words[index / 64] & (1 << (index % 64)) != 0
    }

    fn count(&self) -> usize {
        self.count
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    /// The clone is a new container: fresh id, generation zero and a
    /// buffer sized exactly to the current length.
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            capacity: self.data.len(),
            origin: BufferOrigin::Sized,
            policy: self.policy,
            generation: Generation::ZERO,
            id: ContainerId::next(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(mut data: Vec<T>) -> Self {
        data.shrink_to_fit();
        let capacity = data.len();
        Self {
            data,
            capacity,
            origin: BufferOrigin::Sized,
            policy: GrowthPolicy::for_element::<T>(),
            generation: Generation::ZERO,
            id: ContainerId::next(),
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

impl<T> Sequence<T> for DynamicArray<T> {
    fn len(&self) -> usize {
        DynamicArray::len(self)
    }

    fn generation(&self) -> Generation {
        self.generation
    }

    fn get(&self, index: usize) -> Result<&T, SeqError> {
        DynamicArray::get(self, index)
    }

    fn set(&mut self, index: usize, value: T) -> Result<T, SeqError> {
        DynamicArray::set(self, index, value)
    }

    fn insert(&mut self, index: usize, value: T) -> Result<(), SeqError> {
        DynamicArray::insert(self, index, value)
    }

    fn remove(&mut self, index: usize) -> Result<T, SeqError> {
        DynamicArray::remove(self, index)
    }

    fn push(&mut self, value: T) -> Result<(), SeqError> {
        DynamicArray::push(self, value)
    }

    fn clear(&mut self) {
        DynamicArray::clear(self)
    }

    fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        DynamicArray::index_of(self, value)
    }
}

impl<T> RandomAccess for DynamicArray<T> {}
