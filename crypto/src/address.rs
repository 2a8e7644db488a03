//! Wallet address derivation from public keys.
//!
//! Address format (25 bytes, shown as `0x` + 50 hex chars):
//!
//! ```text
//! network_byte || RIPEMD160(SHA256(0x04 || x || y)) || checksum4
//! ```
//!
//! Checksum: first 4 bytes of SHA256(SHA256(network_byte || ripemd160_digest)).

use mhc_types::encoding::strip_hex_prefix;
use mhc_types::{Address, PublicKey, PublicPoint};

use crate::hash::{double_sha256, hash160};
use crate::CryptoError;

/// Number of checksum bytes appended to the body.
pub const CHECKSUM_LEN: usize = 4;

/// Shortest byte length `validate_address` will consider: one body byte plus the checksum.
const MIN_ADDRESS_LEN: usize = CHECKSUM_LEN + 1;

/// First 4 bytes of the double SHA-256 of `body`.
pub fn checksum(body: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = double_sha256(body);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Derive the address of a public-key point on the given network.
///
/// Process:
/// 1. Serialize the point uncompressed: `0x04 || x || y`
/// 2. body = network_byte || RIPEMD160(SHA256(serialized))
/// 3. Address = body || checksum(body)
pub fn derive_address(point: &PublicPoint, network_byte: u8) -> Address {
    let digest = hash160(&point.to_uncompressed());
    let mut bytes = Vec::with_capacity(Address::LEN);
    bytes.push(network_byte);
    bytes.extend_from_slice(&digest);
    let sum = checksum(&bytes);
    bytes.extend_from_slice(&sum);
    Address::from_bytes(bytes)
}

/// Derive the address of a DER public key.
pub fn address_from_public_key(
    public_key: &PublicKey,
    network_byte: u8,
) -> Result<Address, CryptoError> {
    let point = crate::keys::public_point(public_key)?;
    Ok(derive_address(&point, network_byte))
}

/// Validate that an address string is well-formed and its checksum is correct.
///
/// Never panics: odd-length or non-hex input (surrounding whitespace
/// included), anything shorter than five bytes, and any checksum mismatch
/// all yield `false`.
pub fn validate_address(address: &str) -> bool {
    let hex_part = strip_hex_prefix(address);
    if hex_part.len() % 2 != 0 {
        return false;
    }
    let Ok(bytes) = hex::decode(hex_part) else {
        return false;
    };
    if bytes.len() < MIN_ADDRESS_LEN {
        return false;
    }
    let (body, sum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    checksum(body) == sum
}
