//! Growable contiguous array for the weft sequence containers.
//!
//! [`DynamicArray`] is a `Vec`-backed array with an explicit growth
//! policy and a generation stamp. All traversal and windowing handles
//! are detached values that receive the array per call:
//!
//! ```text
//! DynamicArray<T>
//! ├── ArrayCursor       (bidirectional, fail-fast, remove/set/add)
//! ├── ArraySplitCursor  (late-binding, bisecting, Send)
//! └── RangeView         (detached window)
//!     └── BoundView     (window bound to its parent; nests)
//!         └── ViewCursor (window-relative, fail-fast)
//! ```
//!
//! # Growth
//!
//! Capacity grows by half of itself, or to the requested minimum if
//! that is larger, until it reaches a ceiling a few slots below the
//! platform maximum; see [`GrowthPolicy`]. A default-constructed array
//! allocates nothing until it is first mutated.
//!
//! # Interference
//!
//! Every structural mutation advances the array's generation. Handles
//! capture it and fail with [`SeqError::ConcurrentModification`] when
//! it has moved. The check is a diagnostic: it catches a cursor used
//! after the array was modified around it, not data races (the borrow
//! checker already rules those out).
//!
//! [`SeqError::ConcurrentModification`]: weft_core::SeqError::ConcurrentModification

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod config;
pub mod cursor;
pub mod split;
pub mod view;

pub use array::{BufferOrigin, DynamicArray};
pub use config::GrowthPolicy;
pub use cursor::ArrayCursor;
pub use split::ArraySplitCursor;
pub use view::{BoundView, RangeParent, RangeView, ViewCursor};
