//! Element and predicate fixtures.

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts drops of the [`Tracked`] values it hands out.
#[derive(Clone, Debug, Default)]
pub struct DropCounter {
    drops: Arc<AtomicUsize>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A value whose drop is counted by this counter.
    pub fn track(&self, value: u32) -> Tracked {
        Tracked {
            value,
            drops: Arc::clone(&self.drops),
        }
    }

    /// Number of tracked values dropped so far.
    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }
}

/// A value that reports its drop to a [`DropCounter`].
///
/// Clones report to the same counter, so every clone's drop is counted.
pub struct Tracked {
    pub value: u32,
    drops: Arc<AtomicUsize>,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            drops: Arc::clone(&self.drops),
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Error returned by a predicate built with [`fail_after`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InjectedFailure {
    /// Zero-based evaluation at which the predicate failed.
    pub evaluation: usize,
}

impl fmt::Display for InjectedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "injected failure at evaluation {}", self.evaluation)
    }
}

impl Error for InjectedFailure {}

/// Wrap `predicate` so that its `k`-th evaluation (zero-based) fails.
pub fn fail_after<T, P>(k: usize, mut predicate: P) -> impl FnMut(&T) -> Result<bool, InjectedFailure>
where
    P: FnMut(&T) -> bool,
{
    let mut evaluated = 0;
    move |item| {
        if evaluated == k {
            return Err(InjectedFailure { evaluation: k });
        }
        evaluated += 1;
        Ok(predicate(item))
    }
}
