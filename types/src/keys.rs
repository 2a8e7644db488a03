//! Key material and signature types.
//!
//! All of these are DER encodings on NIST P-256. They are opaque byte
//! containers here; `mhc-crypto` is the only crate that interprets them.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding::{decode_hex, encode_hex_prefixed};
use crate::TypesError;

/// A DER `SubjectPublicKeyInfo` public key (uncompressed point).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub Vec<u8>);

/// A DER SEC1 `ECPrivateKey`.
///
/// This type intentionally does not implement `Debug`, `Serialize`, or `Clone`
/// to prevent accidental exposure. Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub Vec<u8>);

/// A DER-encoded ECDSA `(r, s)` signature.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(pub Vec<u8>);

/// Affine coordinates of a curve point, each 32 bytes big-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicPoint {
    pub x: [u8; 32],
    pub y: [u8; 32],
}

/// A P-256 key pair (public + private).
///
/// Use `mhc_crypto::generate_keypair()` or `mhc_crypto::keypair_from_private()`
/// to construct key pairs. This struct is intentionally just data.
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        decode_hex(s).map(Self)
    }

    pub fn to_hex(&self) -> String {
        encode_hex_prefixed(&self.0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl PrivateKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        decode_hex(s).map(Self)
    }

    /// Hex export for the wallet record. Callers own the secrecy of the result.
    pub fn to_hex(&self) -> String {
        encode_hex_prefixed(&self.0)
    }
}

impl Signature {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        decode_hex(s).map(Self)
    }

    pub fn to_hex(&self) -> String {
        encode_hex_prefixed(&self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl PublicPoint {
    /// SEC1 uncompressed serialization: `0x04 || x || y`.
    pub fn to_uncompressed(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x);
        out[33..].copy_from_slice(&self.y);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncompressed_layout() {
        let point = PublicPoint {
            x: [0x11; 32],
            y: [0x22; 32],
        };
        let bytes = point.to_uncompressed();
        assert_eq!(bytes[0], 0x04);
        assert!(bytes[1..33].iter().all(|&b| b == 0x11));
        assert!(bytes[33..].iter().all(|&b| b == 0x22));
    }

    #[test]
    fn key_hex_roundtrip() {
        let pk = PublicKey(vec![0x30, 0x59, 0x01]);
        assert_eq!(pk.to_hex(), "0x305901");
        assert_eq!(PublicKey::from_hex("305901").unwrap(), pk);
    }
}
