//! Test utilities for weft development.
//!
//! Provides a trusted [`ReferenceModel`] that implements the same
//! capability traits as the real containers, operation types that can be
//! replayed against any of them ([`SeqOp`], [`DequeOp`]), proptest
//! strategies generating those operations, a seeded [`OpStream`] for
//! deterministic stress runs and benchmarks, and fixtures for checking
//! element drops and injecting predicate failures.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod model;
pub mod strategies;
pub mod stream;

pub use fixtures::{fail_after, DropCounter, InjectedFailure, Tracked};
pub use model::{DequeOp, Outcome, ReferenceModel, SeqOp};
pub use stream::OpStream;
