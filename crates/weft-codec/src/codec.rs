//! Primitive little-endian readers and writers.
//!
//! All integers are little-endian. Strings are length-prefixed with a
//! `u32` byte length. A read that runs off the end of the input is
//! reported as [`CodecError::Malformed`].

use std::io::{self, Read, Write};

use weft_core::{Generation, SeqError};

use crate::error::CodecError;

fn put(w: &mut dyn Write, bytes: &[u8]) -> Result<(), CodecError> {
    w.write_all(bytes).map_err(CodecError::from)
}

/// Emit one raw byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), CodecError> {
    put(w, &[v])
}

/// Emit `v` as four bytes, low byte first.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), CodecError> {
    put(w, &v.to_le_bytes())
}

/// Emit `v` as eight bytes, low byte first.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), CodecError> {
    put(w, &v.to_le_bytes())
}

/// Container length header; always eight bytes regardless of platform.
pub fn write_count(w: &mut dyn Write, count: usize) -> Result<(), CodecError> {
    write_u64_le(w, count as u64)
}

/// Byte length as a `u32`, then the UTF-8 payload. Strings past
/// `u32::MAX` bytes are `Malformed` and nothing is written.
pub fn write_length_prefixed_str(w: &mut dyn Write, s: &str) -> Result<(), CodecError> {
    let Ok(len) = u32::try_from(s.len()) else {
        return Err(CodecError::malformed(format!(
            "{} byte string exceeds the u32 length prefix",
            s.len()
        )));
    };
    write_u32_le(w, len)?;
    put(w, s.as_bytes())
}

// ── Primitive readers ───────────────────────────────────────────

/// Fill `buf` completely, reporting a short read as malformed input.
pub fn read_exact_or_malformed(r: &mut dyn Read, buf: &mut [u8]) -> Result<(), CodecError> {
    r.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => {
            CodecError::malformed(format!("truncated input: needed {} more bytes", buf.len()))
        }
        _ => CodecError::Io(e),
    })
}

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, CodecError> {
    let mut buf = [0u8; 1];
    read_exact_or_malformed(r, &mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, CodecError> {
    let mut buf = [0u8; 4];
    read_exact_or_malformed(r, &mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, CodecError> {
    let mut buf = [0u8; 8];
    read_exact_or_malformed(r, &mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read an element count written by [`write_count`].
pub fn read_count(r: &mut dyn Read) -> Result<usize, CodecError> {
    let count = read_u64_le(r)?;
    usize::try_from(count)
        .map_err(|_| CodecError::malformed(format!("element count {count} does not fit in usize")))
}

/// Read a length-prefixed UTF-8 string.
pub fn read_length_prefixed_str(r: &mut dyn Read) -> Result<String, CodecError> {
    let len = read_u32_le(r)? as usize;
    let mut buf = Vec::new();
    r.take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(CodecError::malformed(format!(
            "truncated string: expected {len} bytes, got {}",
            buf.len()
        )));
    }
    String::from_utf8(buf)
        .map_err(|e| CodecError::malformed(format!("invalid UTF-8 string: {e}")))
}

/// Fail if a container's generation moved during an encoding pass.
pub fn check_unchanged(before: Generation, after: Generation) -> Result<(), CodecError> {
    if before != after {
        return Err(CodecError::Seq(SeqError::ConcurrentModification {
            expected: before,
            found: after,
        }));
    }
    Ok(())
}
