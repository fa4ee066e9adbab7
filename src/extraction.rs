//! Bit-plane extraction
//!
//! Reads the low `k` bits of every eligible channel value, in row-major,
//! channel-minor (R,G,B) order, and concatenates them MSB-first into one
//! packed bit stream.

use crate::carrier::CoverImage;
use crate::core::{DecodeError, Result};
use crate::mask::RegionMask;
use crate::types::ExtractionDepth;

/// Width of the leading length prefix, in bits.
pub const LENGTH_PREFIX_BITS: usize = 32;

const CHANNELS: usize = 3;

/// Packed MSB-first bit sequence extracted at one depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBitStream {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl RawBitStream {
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Reads the big-endian length prefix
    pub fn length_prefix(&self) -> Result<u32> {
        if self.bit_len < LENGTH_PREFIX_BITS {
            return Err(DecodeError::InsufficientData {
                bits: self.bit_len,
            });
        }
        Ok(u32::from_be_bytes([
            self.bytes[0],
            self.bytes[1],
            self.bytes[2],
            self.bytes[3],
        ]))
    }

    /// Returns `len` whole bytes following the length prefix, if available
    pub fn bytes_after_prefix(&self, len: usize) -> Option<&[u8]> {
        let start = LENGTH_PREFIX_BITS / 8;
        let needed_bits = len.checked_mul(8)?.checked_add(LENGTH_PREFIX_BITS)?;
        if needed_bits > self.bit_len {
            return None;
        }
        self.bytes.get(start..start + len)
    }
}

struct BitWriter {
    bytes: Vec<u8>,
    acc: u32,
    acc_bits: u32,
    bit_len: usize,
}

impl BitWriter {
    fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            acc: 0,
            acc_bits: 0,
            bit_len: 0,
        }
    }

    #[inline]
    fn push(&mut self, value: u8, count: u32) {
        self.acc = (self.acc << count) | u32::from(value);
        self.acc_bits += count;
        self.bit_len += count as usize;

        while self.acc_bits >= 8 {
            self.acc_bits -= 8;
            self.bytes.push((self.acc >> self.acc_bits) as u8);
        }
        self.acc &= (1 << self.acc_bits) - 1;
    }

    fn finish(mut self) -> RawBitStream {
        if self.acc_bits > 0 {
            // Pad the partial byte on the right; bit_len bounds valid bits.
            self.bytes.push((self.acc << (8 - self.acc_bits)) as u8);
        }
        RawBitStream {
            bytes: self.bytes,
            bit_len: self.bit_len,
        }
    }
}

/// Extracts the full bit stream of a carrier at the given depth
pub fn extract_bits(cover: &CoverImage, depth: ExtractionDepth) -> Result<RawBitStream> {
    let mask = cover.mask();
    let stream = extract_raw(cover.as_raw(), cover.width(), &mask, depth);

    if stream.bit_len() < LENGTH_PREFIX_BITS {
        return Err(DecodeError::InsufficientData {
            bits: stream.bit_len(),
        });
    }

    Ok(stream)
}

fn extract_raw(raw: &[u8], width: u32, mask: &RegionMask, depth: ExtractionDepth) -> RawBitStream {
    let k = depth.bits();
    let low = depth.mask();
    let mut writer = BitWriter::with_capacity(mask.eligible_pixels() * CHANNELS * k as usize);

    let row_len = width as usize * CHANNELS;
    if row_len == 0 {
        return writer.finish();
    }

    for (y, row) in raw.chunks_exact(row_len).enumerate() {
        for (x, pixel) in row.chunks_exact(CHANNELS).enumerate() {
            if mask.is_excluded(x as u32, y as u32) {
                continue;
            }
            for &value in pixel {
                writer.push(value & low, k);
            }
        }
    }

    writer.finish()
}
