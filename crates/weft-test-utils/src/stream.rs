//! Deterministic operation streams.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::SeqOp;

/// Seeded generator of always-valid [`SeqOp`]s.
///
/// Unlike the proptest strategies, every generated index is in range for
/// the length the stream tracks, so a replay never fails. Useful for
/// stress tests and benchmarks that need the same workload every run.
pub struct OpStream {
    rng: ChaCha8Rng,
    len: usize,
}

impl OpStream {
    /// A stream for a container that currently holds `len` elements.
    pub fn new(seed: u64, len: usize) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            len,
        }
    }

    /// Length of the container after every op generated so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.rng.next_u64() % bound as u64) as usize
    }

    /// The next operation.
    pub fn next_op(&mut self) -> SeqOp<u64> {
        let value = self.rng.next_u64();
        let roll = self.below(10);
        if self.len == 0 || roll < 4 {
            self.len += 1;
            return SeqOp::Push(value);
        }
        match roll {
            4 | 5 => {
                let index = self.below(self.len + 1);
                self.len += 1;
                SeqOp::Insert(index, value)
            }
            6 | 7 => {
                let index = self.below(self.len);
                self.len -= 1;
                SeqOp::Remove(index)
            }
            8 => SeqOp::Set(self.below(self.len), value),
            _ => SeqOp::Get(self.below(self.len)),
        }
    }

    /// The next `count` operations.
    pub fn take_ops(&mut self, count: usize) -> Vec<SeqOp<u64>> {
        (0..count).map(|_| self.next_op()).collect()
    }
}
