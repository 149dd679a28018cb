//! Core types and traits for the weft sequence containers.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the pieces shared by both container families: the error taxonomy,
//! the generation stamp and container identity used by the interference
//! check, and the capability traits the containers implement.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod traits;

pub use error::SeqError;
pub use id::{ContainerId, Generation};
pub use traits::{Deque, RandomAccess, Sequence};
