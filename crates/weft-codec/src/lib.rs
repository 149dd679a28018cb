//! Byte-stream persistence for the weft sequence containers.
//!
//! Writes a container as its element count followed by each element in
//! order, and restores it from the same layout. Both container kinds
//! share the format, so a stream written from a `DynamicArray` can be
//! restored as a `LinkedSequence` and vice versa.
//!
//! # Architecture
//!
//! - [`Persist`] is implemented by both containers
//! - [`ElementCodec`] encodes a single element
//! - [`codec`] holds the primitive little-endian helpers
//!
//! # Format
//!
//! ```text
//! [count u64 LE] [element 0] [element 1] ... [element count-1]
//! ```
//!
//! Numbers are little-endian at their natural width, `bool` is one
//! byte (`0` or `1`), and `String` is a u32 byte length followed by
//! UTF-8. There is no magic or version header.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod element;
pub mod error;
pub mod persist;

pub use element::ElementCodec;
pub use error::CodecError;
pub use persist::{Persist, MAX_PREALLOCATION};
