//! Container identity and generation stamps.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ContainerId`] allocation.
static CONTAINER_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a container.
///
/// Allocated from a monotonic atomic counter via [`ContainerId::next`].
/// Cursors and views record the id of the container they were taken
/// from, so a handle used against a different container is rejected
/// instead of silently reading unrelated data. Cloning a container
/// allocates a fresh id: the clone's handles are not the original's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    /// Allocate a fresh, unique container ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(CONTAINER_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural modification stamp.
///
/// Every container owns one and advances it on each structural
/// mutation. Handles capture the value they observed and compare it
/// against the live value before acting. The check is a best-effort
/// diagnostic for interference, not a synchronization mechanism.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u64);

impl Generation {
    /// The stamp of a freshly constructed container.
    pub const ZERO: Self = Self(0);

    /// Advance to the next stamp.
    ///
    /// Wraps on overflow; at one mutation per nanosecond that takes
    /// several centuries.
    pub fn advance(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    /// The stamp that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Generation {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
