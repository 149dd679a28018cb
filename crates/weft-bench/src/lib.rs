//! Workload builders shared by the weft benchmarks.
//!
//! - [`filled_array`] / [`filled_list`]: containers holding `0..n`
//! - [`mixed_workload`]: a seeded, always-valid operation stream
//! - [`run_workload`]: replay a stream against any [`Sequence`]

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use weft_array::DynamicArray;
use weft_core::Sequence;
use weft_linked::LinkedSequence;
use weft_test_utils::{OpStream, SeqOp};

/// Element counts used across the benchmark groups.
pub const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// A default-policy array holding `0..n`.
pub fn filled_array(n: usize) -> DynamicArray<u64> {
    (0..n as u64).collect()
}

/// A linked sequence holding `0..n`.
pub fn filled_list(n: usize) -> LinkedSequence<u64> {
    (0..n as u64).collect()
}

/// `count` operations from a seeded stream, valid against a container
/// that starts with `initial_len` elements.
pub fn mixed_workload(seed: u64, initial_len: usize, count: usize) -> Vec<SeqOp<u64>> {
    OpStream::new(seed, initial_len).take_ops(count)
}

/// Apply every operation, returning how many succeeded.
pub fn run_workload<S: Sequence<u64> + ?Sized>(target: &mut S, ops: &[SeqOp<u64>]) -> usize {
    ops.iter().filter(|op| op.apply(target).is_ok()).count()
}
