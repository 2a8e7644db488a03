//! CompactInteger: the variable-length unsigned integer used in signed payloads.
//!
//! | value range            | encoding                     | length |
//! |------------------------|------------------------------|--------|
//! | `n < 250`              | `n`                          | 1      |
//! | `250 <= n < 2^16`      | `0xFA` + u16 little-endian   | 3      |
//! | `2^16 <= n < 2^32`     | `0xFB` + u32 little-endian   | 5      |
//! | `n >= 2^32`            | `0xFC` + u64 little-endian   | 9      |
//!
//! The encoder always emits the minimal form and the decoder rejects anything
//! else, so every value has exactly one valid encoding.

use crate::CryptoError;

/// Marker for a 2-byte value.
pub const MARKER_U16: u8 = 250;
/// Marker for a 4-byte value.
pub const MARKER_U32: u8 = 251;
/// Marker for an 8-byte value.
pub const MARKER_U64: u8 = 252;

/// Largest value that encodes as a single byte.
const MAX_SINGLE_BYTE: u64 = (MARKER_U16 as u64) - 1;

/// Encode `n` into a fresh buffer.
pub fn encode(n: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(n));
    encode_into(n, &mut out);
    out
}

/// Append the encoding of `n` to `out`.
pub fn encode_into(n: u64, out: &mut Vec<u8>) {
    if n <= MAX_SINGLE_BYTE {
        out.push(n as u8);
    } else if n <= u64::from(u16::MAX) {
        out.push(MARKER_U16);
        out.extend_from_slice(&(n as u16).to_le_bytes());
    } else if n <= u64::from(u32::MAX) {
        out.push(MARKER_U32);
        out.extend_from_slice(&(n as u32).to_le_bytes());
    } else {
        out.push(MARKER_U64);
        out.extend_from_slice(&n.to_le_bytes());
    }
}

/// Number of bytes `encode(n)` produces.
pub fn encoded_len(n: u64) -> usize {
    if n <= MAX_SINGLE_BYTE {
        1
    } else if n <= u64::from(u16::MAX) {
        3
    } else if n <= u64::from(u32::MAX) {
        5
    } else {
        9
    }
}

/// Decode one CompactInteger from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed. Trailing bytes are
/// left for the caller.
pub fn decode(bytes: &[u8]) -> Result<(u64, usize), CryptoError> {
    let Some((&marker, rest)) = bytes.split_first() else {
        return Err(CryptoError::InvalidEncoding("empty input".into()));
    };

    let (value, width, min) = match marker {
        m if m < MARKER_U16 => return Ok((u64::from(m), 1)),
        MARKER_U16 => (u64::from(u16::from_le_bytes(take(rest)?)), 2, MAX_SINGLE_BYTE + 1),
        MARKER_U32 => (
            u64::from(u32::from_le_bytes(take(rest)?)),
            4,
            u64::from(u16::MAX) + 1,
        ),
        MARKER_U64 => (u64::from_le_bytes(take(rest)?), 8, u64::from(u32::MAX) + 1),
        other => {
            return Err(CryptoError::InvalidEncoding(format!(
                "unassigned marker byte {other}"
            )))
        }
    };

    if value < min {
        return Err(CryptoError::InvalidEncoding(format!(
            "non-minimal encoding: {value} does not need marker {marker}"
        )));
    }

    Ok((value, 1 + width))
}

/// Copy the first `N` bytes of `rest`, failing if fewer remain.
fn take<const N: usize>(rest: &[u8]) -> Result<[u8; N], CryptoError> {
    rest.get(..N)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| {
            CryptoError::InvalidEncoding(format!(
                "truncated: need {N} bytes after marker, have {}",
                rest.len()
            ))
        })
}
