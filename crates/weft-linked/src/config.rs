//! Batch sizing for [`LinkedSplitCursor`](crate::LinkedSplitCursor).

/// How many elements each successive split of a linked split cursor
/// copies into a batch.
///
/// A linked chain cannot be bisected without walking it, so a split
/// instead peels off the next `batch` elements. The first split takes
/// `unit` elements, each following split `unit` more than the previous,
/// capped at `max` and at the number of elements left. These values only
/// affect how work is divided, never what is visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchPolicy {
    /// Growth step of the batch size.
    ///
    /// Default: 1024.
    pub unit: usize,

    /// Largest batch ever produced.
    ///
    /// Default: 2^25.
    pub max: usize,
}

impl BatchPolicy {
    /// Default batch growth step.
    pub const DEFAULT_UNIT: usize = 1 << 10;

    /// Default batch ceiling.
    pub const DEFAULT_MAX: usize = 1 << 25;

    /// Replace the growth step. Zero is treated as one.
    pub fn with_unit(mut self, unit: usize) -> Self {
        self.unit = unit.max(1);
        self
    }

    /// Replace the batch ceiling. Zero is treated as one.
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = max.max(1);
        self
    }

    /// Size of the batch that follows one of size `previous`, when
    /// `remaining` elements are left.
    pub fn next_batch(&self, previous: usize, remaining: usize) -> usize {
        previous
            .saturating_add(self.unit)
            .min(remaining)
            .min(self.max)
    }
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            unit: Self::DEFAULT_UNIT,
            max: Self::DEFAULT_MAX,
        }
    }
}
