//! Error types shared by every weft container, cursor and view.
//!
//! One enum covers the whole taxonomy: bounds failures (with separate
//! variants for element access and insertion position), exhaustion,
//! interference, cursor misuse and capacity failures.

use std::error::Error;
use std::fmt;

use crate::id::{ContainerId, Generation};

/// Errors from container, cursor and view operations.
///
/// Every variant is fatal to the operation that produced it and is
/// returned to the caller; no operation retries internally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeqError {
    /// An element index outside `[0, len)`.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Length of the sequence (or view) at the time of the call.
        len: usize,
    },
    /// An insertion position outside `[0, len]`.
    PositionOutOfBounds {
        /// The offending position.
        index: usize,
        /// Length of the sequence (or view) at the time of the call.
        len: usize,
    },
    /// A range whose start lies after its end.
    InvalidRange {
        /// Inclusive start of the requested range.
        from: usize,
        /// Exclusive end of the requested range.
        to: usize,
    },
    /// Query or advance on an empty sequence or an exhausted cursor.
    NoSuchElement,
    /// The container was structurally modified behind a cursor or view.
    ConcurrentModification {
        /// Generation captured by the handle.
        expected: Generation,
        /// Live generation of the container.
        found: Generation,
    },
    /// `set` or `remove` on a cursor with no element to act on.
    IllegalCursorState,
    /// Requested capacity exceeds what the platform can address.
    CapacityExceeded {
        /// Number of elements requested.
        requested: usize,
        /// Largest element count the container may hold.
        max: usize,
    },
    /// The requested element count overflowed `usize`.
    CapacityOverflow,
    /// A handle was used with a container other than the one it was taken from.
    ForeignContainer {
        /// Container the handle belongs to.
        expected: ContainerId,
        /// Container the handle was used with.
        found: ContainerId,
    },
    /// A node handle whose node has already been removed.
    StaleNode,
}

impl SeqError {
    /// Whether this error reports a generation mismatch.
    pub fn is_concurrent_modification(&self) -> bool {
        matches!(self, Self::ConcurrentModification { .. })
    }

    /// Whether this error reports a capacity failure of either kind.
    pub fn is_capacity(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. } | Self::CapacityOverflow)
    }
}

impl fmt::Display for SeqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::PositionOutOfBounds { index, len } => {
                write!(f, "insertion position {index} out of bounds for length {len}")
            }
            Self::InvalidRange { from, to } => {
                write!(f, "invalid range: start {from} is after end {to}")
            }
            Self::NoSuchElement => write!(f, "no such element"),
            Self::ConcurrentModification { expected, found } => {
                write!(
                    f,
                    "concurrent structural change: expected generation {expected}, found {found}"
                )
            }
            Self::IllegalCursorState => {
                write!(f, "cursor has no current element (advance before set or remove)")
            }
            Self::CapacityExceeded { requested, max } => {
                write!(f, "capacity exceeded: requested {requested} elements, max {max}")
            }
            Self::CapacityOverflow => write!(f, "capacity overflow"),
            Self::ForeignContainer { expected, found } => {
                write!(
                    f,
                    "handle belongs to container {expected} but was used with container {found}"
                )
            }
            Self::StaleNode => write!(f, "node handle refers to a removed node"),
        }
    }
}

impl Error for SeqError {}
