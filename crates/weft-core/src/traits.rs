//! Capability traits implemented by the weft containers.
//!
//! These name only the operations generic code needs (the reference
//! model in `weft-test-utils`, the benchmark workloads). Everything else
//! lives on the concrete container types.

use crate::error::SeqError;
use crate::id::Generation;

/// An ordered, index-addressable, mutable sequence.
pub trait Sequence<T> {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the sequence holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current structural generation.
    fn generation(&self) -> Generation;

    /// Borrow the element at `index`.
    ///
    /// Fails with [`SeqError::IndexOutOfBounds`] unless `index < len`.
    fn get(&self, index: usize) -> Result<&T, SeqError>;

    /// Replace the element at `index`, returning the previous value.
    ///
    /// An in-place overwrite, not a structural mutation.
    fn set(&mut self, index: usize, value: T) -> Result<T, SeqError>;

    /// Insert `value` so that it ends up at `index`.
    ///
    /// Fails with [`SeqError::PositionOutOfBounds`] unless `index <= len`.
    fn insert(&mut self, index: usize, value: T) -> Result<(), SeqError>;

    /// Remove and return the element at `index`.
    fn remove(&mut self, index: usize) -> Result<T, SeqError>;

    /// Append `value` at the end.
    fn push(&mut self, value: T) -> Result<(), SeqError>;

    /// Drop every element.
    fn clear(&mut self);

    /// Position of the first element equal to `value`.
    fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq;
}

/// A double-ended queue: O(1) access at both ends.
///
/// The `front`/`back`/`remove_*` forms fail with
/// [`SeqError::NoSuchElement`] on an empty queue; the `peek_*`/`pop_*`
/// forms report absence with `None` instead.
pub trait Deque<T> {
    /// Insert at the front.
    fn push_front(&mut self, value: T);

    /// Insert at the back.
    fn push_back(&mut self, value: T);

    /// Borrow the first element.
    fn front(&self) -> Result<&T, SeqError>;

    /// Borrow the last element.
    fn back(&self) -> Result<&T, SeqError>;

    /// Borrow the first element, if any.
    fn peek_front(&self) -> Option<&T>;

    /// Borrow the last element, if any.
    fn peek_back(&self) -> Option<&T>;

    /// Remove the first element.
    fn remove_front(&mut self) -> Result<T, SeqError>;

    /// Remove the last element.
    fn remove_back(&mut self) -> Result<T, SeqError>;

    /// Remove the first element, if any.
    fn pop_front(&mut self) -> Option<T>;

    /// Remove the last element, if any.
    fn pop_back(&mut self) -> Option<T>;
}

/// Marker for sequences with O(1) indexed access.
///
/// Generic algorithms may pick an index loop over a cursor walk when
/// this is implemented.
pub trait RandomAccess {}
