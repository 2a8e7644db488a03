//! The signing pre-image of a transfer.
//!
//! Layout, in this exact order:
//!
//! ```text
//! address_bytes || CI(value) || CI(fee) || CI(nonce) || CI(len(data)) || data
//! ```
//!
//! where `CI` is the CompactInteger encoding. The remote network recomputes
//! this byte string to check signatures, so nothing here may be normalized.

use mhc_crypto::compact;
use mhc_types::Address;

/// The bytes fed to the signer for one transfer. Built fresh per transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionPayload(Vec<u8>);

impl TransactionPayload {
    /// Assemble the payload for a transfer to `address`.
    pub fn build(address: &Address, value: u64, fee: u64, nonce: u64, data: &[u8]) -> Self {
        let address_bytes = address.as_bytes();
        let mut bytes = Vec::with_capacity(
            address_bytes.len()
                + compact::encoded_len(value)
                + compact::encoded_len(fee)
                + compact::encoded_len(nonce)
                + compact::encoded_len(data.len() as u64)
                + data.len(),
        );
        bytes.extend_from_slice(address_bytes);
        compact::encode_into(value, &mut bytes);
        compact::encode_into(fee, &mut bytes);
        compact::encode_into(nonce, &mut bytes);
        compact::encode_into(data.len() as u64, &mut bytes);
        bytes.extend_from_slice(data);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for TransactionPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
