//! Per-element encoding.

use std::io::{Read, Write};

use crate::codec::{
    read_exact_or_malformed, read_length_prefixed_str, read_u8, write_length_prefixed_str,
    write_u8,
};
use crate::error::CodecError;

/// A value that can be written to and read back from a byte stream.
///
/// Implemented for the fixed-width numeric types (little-endian),
/// `bool` (one byte, `0` or `1`) and `String` (u32 length prefix then
/// UTF-8 bytes).
pub trait ElementCodec: Sized {
    /// Append the encoding of `self` to `w`.
    fn encode(&self, w: &mut dyn Write) -> Result<(), CodecError>;

    /// Read one value from `r`.
    fn decode(r: &mut dyn Read) -> Result<Self, CodecError>;
}

macro_rules! le_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ElementCodec for $ty {
                fn encode(&self, w: &mut dyn Write) -> Result<(), CodecError> {
                    w.write_all(&self.to_le_bytes())?;
                    Ok(())
                }

                fn decode(r: &mut dyn Read) -> Result<Self, CodecError> {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    read_exact_or_malformed(r, &mut buf)?;
                    Ok(<$ty>::from_le_bytes(buf))
                }
            }
        )*
    };
}

le_element!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl ElementCodec for bool {
    fn encode(&self, w: &mut dyn Write) -> Result<(), CodecError> {
        write_u8(w, u8::from(*self))
    }

    fn decode(r: &mut dyn Read) -> Result<Self, CodecError> {
        match read_u8(r)? {
            0 => Ok(false),
            1 => Ok(true),
            b => Err(CodecError::malformed(format!("invalid bool byte {b:#04x}"))),
        }
    }
}

impl ElementCodec for String {
    fn encode(&self, w: &mut dyn Write) -> Result<(), CodecError> {
        write_length_prefixed_str(w, self)
    }

    fn decode(r: &mut dyn Read) -> Result<Self, CodecError> {
        read_length_prefixed_str(r)
    }
}
