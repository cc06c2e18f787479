//! Sentinel-padded bit packing
//!
//! A payload of `L` bits is prefixed with `padding - 1` zero bits and a single `1`
//! sentinel, where `padding = 8 - (L % 8)` lies in `1..=8`. The result is a whole
//! number of bytes, packed most-significant bit first. The unpacker finds the
//! first `1` in the leading byte and returns everything after it, so the padding
//! length never has to be stored.

use crate::error::{HuffmanError, Result};
use std::io::Read;

/// Values the packer accepts as bits.
///
/// `bool` is always a bit; `u8` must be `0` or `1`; `char` must be `'0'` or `'1'`.
pub trait BitValue {
    /// The bit this value stands for, or `None` if it is not a bit
    fn bit_value(&self) -> Option<bool>;
}

impl BitValue for bool {
    #[inline]
    fn bit_value(&self) -> Option<bool> {
        Some(*self)
    }
}

impl BitValue for u8 {
    #[inline]
    fn bit_value(&self) -> Option<bool> {
        match self {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    }
}

impl BitValue for char {
    #[inline]
    fn bit_value(&self) -> Option<bool> {
        match self {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        }
    }
}

/// Number of leading bits (zeros plus the sentinel) for a payload of `bit_len` bits
#[inline]
pub fn padding_len(bit_len: usize) -> usize {
    8 - bit_len % 8
}

/// Number of bytes [`pack_bits`] produces for a payload of `bit_len` bits
#[inline]
pub fn packed_len(bit_len: usize) -> usize {
    (bit_len + padding_len(bit_len)) / 8
}

/// Pack a bit sequence behind the padding sentinel.
///
/// Fails with [`HuffmanError::InvalidBit`] at the first element that is not a bit.
pub fn pack_bits<B: BitValue>(bits: &[B]) -> Result<Vec<u8>> {
    let padding = padding_len(bits.len());
    let mut bytes = vec![0u8; packed_len(bits.len())];

    // The sentinel is the last padding bit
    set_bit(&mut bytes, padding - 1);

    for (index, value) in bits.iter().enumerate() {
        let bit = value
            .bit_value()
            .ok_or_else(|| HuffmanError::invalid_bit(index))?;
        if bit {
            set_bit(&mut bytes, padding + index);
        }
    }

    log::debug!(
        "Packed {} bits into {} bytes ({} padding bits)",
        bits.len(),
        bytes.len(),
        padding
    );
    Ok(bytes)
}

/// Pack a string of `0` and `1` characters
pub fn pack_bit_string(bits: &str) -> Result<Vec<u8>> {
    let chars: Vec<char> = bits.chars().collect();
    pack_bits(&chars)
}

#[inline]
fn set_bit(bytes: &mut [u8], position: usize) {
    bytes[position / 8] |= 0x80 >> (position % 8);
}

/// Recover the payload bits from packed bytes.
///
/// Empty input yields an empty payload. A leading byte without any `1` bit is
/// skipped whole; well-formed packer output never has one.
pub fn unpack_bits(bytes: &[u8]) -> Vec<bool> {
    let Some(&first) = bytes.first() else {
        return Vec::new();
    };

    let start = if first == 0 {
        log::warn!("No padding sentinel in the first byte, skipping 8 bits");
        8
    } else {
        first.leading_zeros() as usize + 1
    };

    let total = bytes.len() * 8;
    (start..total)
        .map(|position| bytes[position / 8] & (0x80 >> (position % 8)) != 0)
        .collect()
}

/// Read packed bytes to the end of `reader` and unpack them.
///
/// Read failures surface as [`HuffmanError::Io`].
pub fn unpack_reader<R: Read>(mut reader: R) -> Result<Vec<bool>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(unpack_bits(&bytes))
}

/// Render bits as a string of `0` and `1` characters
pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}
