//! Fundamental types for the MHC light client.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! addresses, DER key material, signatures, the network selector, and the hex
//! conventions used wherever bytes cross the process boundary.

pub mod address;
pub mod error;
pub mod encoding;
pub mod keys;
pub mod network;

pub use address::Address;
pub use error::TypesError;
pub use keys::{KeyPair, PrivateKey, PublicKey, PublicPoint, Signature};
pub use network::NetworkId;
