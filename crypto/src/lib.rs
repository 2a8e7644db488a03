//! Cryptographic primitives for the MHC light client.
//!
//! - **ECDSA over NIST P-256** for key generation, signing and verification,
//!   with RFC 6979 deterministic nonces by default
//! - **SHA-256** and **RIPEMD-160** for address derivation and checksums
//! - **CompactInteger** encoding used inside signed transaction payloads
//! - Address derivation: `network_byte || hash160(point) || checksum4`

pub mod address;
pub mod compact;
pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{address_from_public_key, checksum, derive_address, validate_address};
pub use error::CryptoError;
pub use hash::{double_sha256, hash160, ripemd160, sha256};
pub use keys::{generate_keypair, keypair_from_private, public_from_private, public_point};
pub use sign::{sign_message, verify_signature, P256Signer, Signer, SignerBackend};
