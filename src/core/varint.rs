//! Unsigned LEB128 varints.
//!
//! Seven payload bits per byte, least significant group first, high bit set on
//! every byte except the last.

use crate::config::MAX_VARINT_LEN;
use std::io::{self, Read};

/// Encode `value` into `buf`, returning the number of bytes used.
pub fn encode_uvarint(mut value: u64, buf: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut i = 0;
    while value >= 0x80 {
        buf[i] = (value as u8) | 0x80;
        value >>= 7;
        i += 1;
    }
    buf[i] = value as u8;
    i + 1
}

/// Number of bytes `encode_uvarint` uses for `value`.
pub fn uvarint_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Read a varint one byte at a time, returning the value and the bytes consumed.
///
/// Stops after `MAX_VARINT_LEN` bytes even if the last one still carries the
/// continuation bit. In that case the bits accumulated so far are returned
/// without an error; peers rely on this, so it is kept as is.
pub fn read_uvarint<R: Read + ?Sized>(r: &mut R) -> io::Result<(u64, usize)> {
    let mut value = 0u64;
    let mut byte = [0u8; 1];
    let mut consumed = 0;

    for shift in (0..64).step_by(7) {
        r.read_exact(&mut byte)?;
        consumed += 1;
        let b = u64::from(byte[0]);
        value |= (b & 0x7F) << shift;
        if b & 0x80 == 0 {
            return Ok((value, consumed));
        }
    }

    Ok((value, consumed))
}
