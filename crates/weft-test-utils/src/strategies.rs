//! Proptest strategies for replayable operations.

use std::ops::Range;

use proptest::prelude::*;

use crate::model::{DequeOp, SeqOp};

/// A single [`SeqOp`] whose raw indices lie in `0..=max_index`.
///
/// Pick `max_index` a little above the lengths the ops are expected to
/// reach so that out-of-range failures are exercised too.
pub fn seq_op(max_index: usize) -> impl Strategy<Value = SeqOp<i32>> {
    prop_oneof![
        4 => any::<i32>().prop_map(SeqOp::Push),
        3 => (0..=max_index, any::<i32>()).prop_map(|(i, v)| SeqOp::Insert(i, v)),
        3 => (0..=max_index).prop_map(SeqOp::Remove),
        2 => (0..=max_index, any::<i32>()).prop_map(|(i, v)| SeqOp::Set(i, v)),
        2 => (0..=max_index).prop_map(SeqOp::Get),
        1 => Just(SeqOp::Clear),
    ]
}

/// A sequence of [`SeqOp`]s.
pub fn seq_ops(max_index: usize, count: Range<usize>) -> impl Strategy<Value = Vec<SeqOp<i32>>> {
    proptest::collection::vec(seq_op(max_index), count)
}

/// A single [`DequeOp`].
pub fn deque_op() -> impl Strategy<Value = DequeOp<i32>> {
    prop_oneof![
        3 => any::<i32>().prop_map(DequeOp::PushFront),
        3 => any::<i32>().prop_map(DequeOp::PushBack),
        2 => Just(DequeOp::PopFront),
        2 => Just(DequeOp::PopBack),
        1 => Just(DequeOp::RemoveFront),
        1 => Just(DequeOp::RemoveBack),
        1 => Just(DequeOp::Front),
        1 => Just(DequeOp::Back),
    ]
}

/// A sequence of [`DequeOp`]s.
pub fn deque_ops(count: Range<usize>) -> impl Strategy<Value = Vec<DequeOp<i32>>> {
    proptest::collection::vec(deque_op(), count)
}
