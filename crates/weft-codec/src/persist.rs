//! Whole-container persistence.

use std::io::{Read, Write};

use tracing::debug;
use weft_array::DynamicArray;
use weft_linked::LinkedSequence;

use crate::codec::{check_unchanged, read_count, write_count};
use crate::element::ElementCodec;
use crate::error::CodecError;

/// Upper bound on elements preallocated from an untrusted count.
///
/// A corrupt header cannot force a huge allocation up front; past this
/// many elements the array grows as decoded values actually arrive.
pub const MAX_PREALLOCATION: usize = 1 << 16;

/// A container that can be written to and restored from a byte stream.
pub trait Persist: Sized {
    /// Write the element count followed by every element in order.
    ///
    /// Fails with [`weft_core::SeqError::ConcurrentModification`]
    /// (wrapped in [`CodecError::Seq`]) if the container's generation
    /// differs at the end of the pass from the start.
    fn persist(&self, w: &mut dyn Write) -> Result<(), CodecError>;

    /// Rebuild a container from a stream written by [`persist`](Self::persist).
    fn restore(r: &mut dyn Read) -> Result<Self, CodecError>;

    /// Encode into a fresh buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        self.persist(&mut buf)?;
        Ok(buf)
    }

    /// Decode from a buffer that must hold exactly one encoded container.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut r = bytes;
        let value = Self::restore(&mut r)?;
        if !r.is_empty() {
            return Err(CodecError::malformed(format!(
                "{} trailing bytes after container",
                r.len()
            )));
        }
        Ok(value)
    }
}

impl<T: ElementCodec> Persist for DynamicArray<T> {
    fn persist(&self, w: &mut dyn Write) -> Result<(), CodecError> {
        let start = self.generation();
        write_count(w, self.len())?;
        for value in self {
            value.encode(w)?;
        }
        check_unchanged(start, self.generation())?;
        debug!(len = self.len(), "array persisted");
        Ok(())
    }

    fn restore(r: &mut dyn Read) -> Result<Self, CodecError> {
        let count = read_count(r)?;
        let mut array = DynamicArray::with_capacity(count.min(MAX_PREALLOCATION))?;
        for _ in 0..count {
            array.push(T::decode(r)?)?;
        }
        debug!(len = count, "array restored");
        Ok(array)
    }
}

impl<T: ElementCodec> Persist for LinkedSequence<T> {
    fn persist(&self, w: &mut dyn Write) -> Result<(), CodecError> {
        let start = self.generation();
        write_count(w, self.len())?;
        for value in self {
            value.encode(w)?;
        }
        check_unchanged(start, self.generation())?;
        debug!(len = self.len(), "linked sequence persisted");
        Ok(())
    }

    fn restore(r: &mut dyn Read) -> Result<Self, CodecError> {
        let count = read_count(r)?;
        let mut list = LinkedSequence::new();
        for _ in 0..count {
            list.push_back(T::decode(r)?);
        }
        debug!(len = count, "linked sequence restored");
        Ok(list)
    }
}
