//! SHA-256 and RIPEMD-160 helpers for address derivation.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let result = Sha256::digest(data);
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// SHA-256 applied twice, as used by the address checksum.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute the RIPEMD-160 digest of arbitrary data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let result = Ripemd160::digest(data);
    let mut output = [0u8; 20];
    output.copy_from_slice(&result);
    output
}

/// `RIPEMD160(SHA256(data))`.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}
