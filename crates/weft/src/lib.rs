//! Weft: fail-fast sequence containers.
//!
//! Both containers, their cursors and views, and stream persistence are
//! reachable from this one dependency. The [`prelude`] pulls in the names
//! needed day to day; each sub-crate is also mounted as a module below.
//!
//! # Quick start
//!
//! ```rust
//! use weft::prelude::*;
//!
//! let mut array = DynamicArray::new();
//! for v in [10, 20, 30, 40, 50] {
//!     array.push(v)?;
//! }
//!
//! // A live window over positions 1..4; edits show through to the array.
//! let mut view = array.range(1, 4)?;
//! assert_eq!(view.bind(&mut array)?.remove(0)?, 20);
//! assert_eq!(view.len(), 2);
//! assert_eq!(array.to_vec(), vec![10, 30, 40, 50]);
//!
//! // Handles are detached: a direct edit invalidates them.
//! let mut cursor = array.cursor();
//! array.push(60)?;
//! assert!(cursor.next(&array).unwrap_err().is_concurrent_modification());
//!
//! // Both containers share one byte-stream format.
//! let list = LinkedSequence::<i32>::from_bytes(&array.to_bytes()?)?;
//! assert_eq!(list.front(), Ok(&10));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `weft-core` | Errors, identity and generation stamps, container traits |
//! | [`array`] | `weft-array` | `DynamicArray`, its cursors and range views |
//! | [`linked`] | `weft-linked` | `LinkedSequence`, node handles, batching split cursor |
//! | [`codec`] | `weft-codec` | Byte-stream persistence for both containers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Errors, identity, generations and container traits (`weft-core`).
///
/// Every fallible operation in weft returns [`core::SeqError`].
pub use weft_core as core;

/// Growable contiguous array (`weft-array`).
///
/// [`array::DynamicArray`] with fail-fast [`array::ArrayCursor`]s,
/// bisecting [`array::ArraySplitCursor`]s and nestable
/// [`array::RangeView`]s.
pub use weft_array as array;

/// Doubly-linked sequence (`weft-linked`).
///
/// [`linked::LinkedSequence`] doubles as a deque and hands out stable
/// [`linked::NodeRef`] handles.
pub use weft_linked as linked;

/// Byte-stream persistence (`weft-codec`).
pub use weft_codec as codec;

/// Common imports for typical weft usage.
///
/// ```rust
/// use weft::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use weft_core::{ContainerId, Deque, Generation, RandomAccess, SeqError, Sequence};

    // Array
    pub use weft_array::{
        ArrayCursor, ArraySplitCursor, BoundView, DynamicArray, GrowthPolicy, RangeView, ViewCursor,
    };

    // Linked
    pub use weft_linked::{BatchPolicy, LinkedCursor, LinkedSequence, LinkedSplitCursor, NodeRef};

    // Codec
    pub use weft_codec::{CodecError, ElementCodec, Persist};
}
