//! Signed transfer: the unit submitted through `mhc_send`.

use mhc_crypto::Signer;
use mhc_types::{Address, KeyPair, PublicKey, Signature};
use serde::Serialize;

use crate::payload::TransactionPayload;
use crate::TransactionError;

/// A transfer together with the signature over its payload.
#[derive(Clone, Debug)]
pub struct SendTx {
    pub to: Address,
    pub value: u64,
    pub fee: u64,
    pub nonce: u64,
    pub data: Vec<u8>,
    /// Sender public key (DER), derived from the signing key.
    pub public_key: PublicKey,
    pub signature: Signature,
}

/// The `params` object of an `mhc_send` request.
///
/// Amounts are decimal strings, `data` is bare hex, key and signature are
/// `0x`-prefixed hex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SendParams {
    pub to: String,
    pub value: String,
    pub fee: String,
    pub nonce: String,
    pub data: String,
    pub pubkey: String,
    pub sign: String,
}

/// Fee charged when the caller does not set one: one unit per data byte.
pub fn default_fee(data: &[u8]) -> u64 {
    data.len() as u64
}

impl SendTx {
    /// Build the payload for this transfer and sign it with `keys`.
    ///
    /// The stored public key must be the one derived from the private key;
    /// a mismatching pair is rejected rather than silently re-derived.
    #[allow(clippy::too_many_arguments)]
    pub fn sign(
        to: Address,
        value: u64,
        fee: u64,
        nonce: u64,
        data: Vec<u8>,
        keys: &KeyPair,
        signer: &dyn Signer,
        deterministic: bool,
    ) -> Result<Self, TransactionError> {
        let derived = signer.derive_public(&keys.private)?;
        if derived != keys.public {
            return Err(TransactionError::KeyMismatch);
        }

        let payload = TransactionPayload::build(&to, value, fee, nonce, &data);
        let signature = signer.sign(payload.as_bytes(), &keys.private, deterministic)?;

        Ok(Self {
            to,
            value,
            fee,
            nonce,
            data,
            public_key: derived,
            signature,
        })
    }

    /// The exact bytes that were signed.
    pub fn payload(&self) -> TransactionPayload {
        TransactionPayload::build(&self.to, self.value, self.fee, self.nonce, &self.data)
    }

    /// Re-check the signature against the embedded public key.
    pub fn verify(&self, signer: &dyn Signer) -> Result<bool, TransactionError> {
        Ok(signer.verify(&self.signature, self.payload().as_bytes(), &self.public_key)?)
    }

    pub fn params(&self) -> SendParams {
        SendParams {
            to: self.to.to_hex(),
            value: self.value.to_string(),
            fee: self.fee.to_string(),
            nonce: self.nonce.to_string(),
            data: hex::encode(&self.data),
            pubkey: self.public_key.to_hex(),
            sign: self.signature.to_hex(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mhc_crypto::{address_from_public_key, P256Signer};
    use mhc_types::PrivateKey;

    fn recipient() -> Address {
        let kp = mhc_crypto::generate_keypair().unwrap();
        address_from_public_key(&kp.public, 0x00).unwrap()
    }

    #[test]
    fn signed_transfer_verifies() {
        let keys = mhc_crypto::generate_keypair().unwrap();
        let tx = SendTx::sign(recipient(), 100, 0, 1, Vec::new(), &keys, &P256Signer, true)
            .unwrap();
        assert!(tx.verify(&P256Signer).unwrap());
        assert!(P256Signer
            .verify(&tx.signature, tx.payload().as_bytes(), &keys.public)
            .unwrap());
    }

    #[test]
    fn tampered_value_fails_verification() {
        let keys = mhc_crypto::generate_keypair().unwrap();
        let mut tx =
            SendTx::sign(recipient(), 100, 0, 1, Vec::new(), &keys, &P256Signer, true).unwrap();
        tx.value = 101;
        assert!(!tx.verify(&P256Signer).unwrap());
    }

    #[test]
    fn deterministic_signing_is_repeatable() {
        let keys = mhc_crypto::generate_keypair().unwrap();
        let to = recipient();
        let a = SendTx::sign(to.clone(), 5, 1, 2, b"memo".to_vec(), &keys, &P256Signer, true)
            .unwrap();
        let b = SendTx::sign(to, 5, 1, 2, b"memo".to_vec(), &keys, &P256Signer, true).unwrap();
        assert_eq!(a.signature, b.signature);
    }

    #[test]
    fn mismatched_public_key_rejected() {
        let keys = mhc_crypto::generate_keypair().unwrap();
        let other = mhc_crypto::generate_keypair().unwrap();
        let forged = KeyPair {
            public: other.public.clone(),
            private: PrivateKey(keys.private.0.clone()),
        };
        let err = SendTx::sign(recipient(), 1, 0, 1, Vec::new(), &forged, &P256Signer, true)
            .unwrap_err();
        assert!(matches!(err, TransactionError::KeyMismatch));
    }

    #[test]
    fn params_render_wire_format() {
        let keys = mhc_crypto::generate_keypair().unwrap();
        let to = recipient();
        let tx = SendTx::sign(to.clone(), 1500, 3, 7, b"abc".to_vec(), &keys, &P256Signer, true)
            .unwrap();
        let params = tx.params();
        assert_eq!(params.to, to.to_hex());
        assert_eq!(params.value, "1500");
        assert_eq!(params.fee, "3");
        assert_eq!(params.nonce, "7");
        assert_eq!(params.data, "616263");
        assert!(params.pubkey.starts_with("0x30"));
        assert!(params.sign.starts_with("0x30"));

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["value"], "1500");
        assert_eq!(json["data"], "616263");
    }

    #[test]
    fn default_fee_counts_data_bytes() {
        assert_eq!(default_fee(b""), 0);
        assert_eq!(default_fee(b"hello"), 5);
    }
}
