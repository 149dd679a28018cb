//! Doubly-linked sequence for the weft sequence containers.
//!
//! [`LinkedSequence`] keeps its nodes in an index slab rather than in
//! individually boxed allocations, so the chain needs neither `unsafe`
//! nor reference counting. Forward links define the order; backward
//! links are plain slot indices kept in lockstep with them.
//!
//! ```text
//! LinkedSequence<T>
//! ├── NodeSlab<T>         (slots + free list, stamped)
//! ├── NodeRef             (stable handle to one node)
//! ├── LinkedCursor        (bidirectional, fail-fast)
//! │   └── DescendingCursor
//! └── LinkedSplitCursor   (batching)
//!     └── BatchCursor     (bisecting, borrows elements)
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod cursor;
pub mod list;
pub mod node;
pub mod split;

pub use config::BatchPolicy;
pub use cursor::{DescendingCursor, LinkedCursor};
pub use list::{IntoIter, Iter, IterMut, LinkedSequence};
pub use node::NodeRef;
pub use split::{BatchCursor, LinkedSplitCursor};
