//! Length-prefixed header parsing.
//!
//! Blob layout following the 32-bit big-endian length prefix `L`:
//!
//! ```text
//! [1 byte ]  has_password (1 = protected)
//! [32 bytes] SHA-256 password hash   (protected only)
//! [16 bytes] salt                     (protected only)
//! [1 byte ]  extension length `el`
//! [el bytes] extension (UTF-8, invalid sequences dropped)
//! [4 bytes]  data length `dl` (u32 BE)
//! [dl bytes] data
//! ```
//!
//! `L` covers every field above, so the data segment must end exactly at
//! the blob boundary.

use crate::core::{DecodeError, Result};
use crate::extraction::RawBitStream;
use crate::types::{Header, Protection};

pub const PASSWORD_HASH_LEN: usize = 32;
pub const SALT_LEN: usize = 16;

/// Slices the `L`-byte blob out of an extracted bit stream
pub fn read_blob(stream: &RawBitStream) -> Result<&[u8]> {
    let declared = stream.length_prefix()?;
    let invalid = DecodeError::InvalidLength {
        declared,
        available_bits: stream.bit_len(),
    };

    if declared == 0 {
        return Err(invalid);
    }

    match stream.bytes_after_prefix(declared as usize) {
        Some(blob) => Ok(blob),
        None => Err(invalid),
    }
}

/// Parses a bit stream into a validated header
pub fn parse_stream(stream: &RawBitStream) -> Result<Header> {
    parse_header(read_blob(stream)?)
}

struct Cursor<'a> {
    blob: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, field: &'static str, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.blob.len())
            .ok_or_else(|| DecodeError::HeaderCorrupt {
                field,
                offset: self.pos,
                needed: n,
                len: self.blob.len(),
            })?;
        let slice = &self.blob[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn take_u8(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.take(field, 1)?[0])
    }

    fn take_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(field, N)?);
        Ok(out)
    }

    fn rest(&self) -> &'a [u8] {
        &self.blob[self.pos..]
    }
}

/// Parses the header fields of an `L`-byte blob
pub fn parse_header(blob: &[u8]) -> Result<Header> {
    let mut cursor = Cursor { blob, pos: 0 };

    let protection = if cursor.take_u8("password flag")? == 1 {
        Protection::Password {
            password_hash: cursor.take_array::<PASSWORD_HASH_LEN>("password hash")?,
            salt: cursor.take_array::<SALT_LEN>("salt")?,
        }
    } else {
        Protection::None
    };

    let ext_len = cursor.take_u8("extension length")? as usize;
    let ext_bytes = cursor.take("extension", ext_len)?;
    let extension = decode_extension(ext_bytes);

    let payload_length = u32::from_be_bytes(cursor.take_array::<4>("data length")?);

    let data = cursor.rest();
    if data.len() != payload_length as usize {
        return Err(DecodeError::LengthMismatch {
            declared: payload_length,
            actual: data.len(),
        });
    }

    Ok(Header {
        protection,
        extension,
        payload_length,
        payload: data.to_vec(),
    })
}

// Invalid UTF-8 sequences are dropped rather than replaced.
fn decode_extension(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
