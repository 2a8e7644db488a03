//! ECDSA P-256 signing and verification.
//!
//! Messages are hashed with SHA-256 before signing. Deterministic signing
//! derives the nonce per RFC 6979 (HMAC-SHA-256 over the private scalar and the
//! message hash), so the same key and message always yield the same signature.

use mhc_types::{KeyPair, PrivateKey, PublicKey, PublicPoint, Signature};
use p256::ecdsa::signature::{RandomizedSigner, Signer as _, Verifier};
use p256::ecdsa::{Signature as EcdsaSignature, SigningKey, VerifyingKey};
use p256::elliptic_curve::rand_core::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::keys::{decode_private, decode_public};
use crate::CryptoError;

/// The signing capability used by the wallet.
///
/// One implementation is selected at startup through [`SignerBackend`] and
/// handed around as `Box<dyn Signer>`.
pub trait Signer: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    fn generate_keypair(&self) -> Result<KeyPair, CryptoError>;

    fn derive_public(&self, private_key: &PrivateKey) -> Result<PublicKey, CryptoError>;

    fn public_point(&self, public_key: &PublicKey) -> Result<PublicPoint, CryptoError>;

    fn sign(
        &self,
        message: &[u8],
        private_key: &PrivateKey,
        deterministic: bool,
    ) -> Result<Signature, CryptoError>;

    /// `Ok(false)` for a well-formed signature that does not match.
    fn verify(
        &self,
        signature: &Signature,
        message: &[u8],
        public_key: &PublicKey,
    ) -> Result<bool, CryptoError>;
}

/// ECDSA over NIST P-256 with SHA-256.
#[derive(Clone, Copy, Debug, Default)]
pub struct P256Signer;

impl Signer for P256Signer {
    fn name(&self) -> &'static str {
        "p256"
    }

    fn generate_keypair(&self) -> Result<KeyPair, CryptoError> {
        crate::keys::generate_keypair()
    }

    fn derive_public(&self, private_key: &PrivateKey) -> Result<PublicKey, CryptoError> {
        crate::keys::public_from_private(private_key)
    }

    fn public_point(&self, public_key: &PublicKey) -> Result<PublicPoint, CryptoError> {
        crate::keys::public_point(public_key)
    }

    fn sign(
        &self,
        message: &[u8],
        private_key: &PrivateKey,
        deterministic: bool,
    ) -> Result<Signature, CryptoError> {
        sign_message(message, private_key, deterministic)
    }

    fn verify(
        &self,
        signature: &Signature,
        message: &[u8],
        public_key: &PublicKey,
    ) -> Result<bool, CryptoError> {
        verify_signature(signature, message, public_key)
    }
}

/// Which [`Signer`] implementation to use, chosen by configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignerBackend {
    #[default]
    P256,
}

impl SignerBackend {
    pub fn build(self) -> Box<dyn Signer> {
        match self {
            Self::P256 => Box::new(P256Signer),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P256 => "p256",
        }
    }
}

impl fmt::Display for SignerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "p256" | "secp256r1" | "prime256v1" => Ok(Self::P256),
            other => Err(format!("unsupported signer backend: {other}")),
        }
    }
}

/// Sign `message` (SHA-256 hashed internally) and return a DER signature.
///
/// With `deterministic == false` fresh OS entropy is mixed into the nonce.
pub fn sign_message(
    message: &[u8],
    private_key: &PrivateKey,
    deterministic: bool,
) -> Result<Signature, CryptoError> {
    let secret = decode_private(private_key)?;
    let signing_key = SigningKey::from(&secret);
    let sig: EcdsaSignature = if deterministic {
        signing_key.sign(message)
    } else {
        signing_key.sign_with_rng(&mut OsRng, message)
    };
    Ok(Signature(sig.to_der().as_bytes().to_vec()))
}

/// Verify a DER signature over `message` against a DER public key.
///
/// Returns `Ok(false)` if the signature does not match; errors only when the
/// signature or key cannot be decoded.
pub fn verify_signature(
    signature: &Signature,
    message: &[u8],
    public_key: &PublicKey,
) -> Result<bool, CryptoError> {
    let sig = EcdsaSignature::from_der(signature.as_bytes())
        .map_err(|e| CryptoError::MalformedSignature(e.to_string()))?;
    let key = decode_public(public_key)?;
    let verifying_key = VerifyingKey::from(&key);
    Ok(verifying_key.verify(message, &sig).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate_keypair;

    #[test]
    fn sign_and_verify() {
        let kp = generate_keypair().unwrap();
        let msg = b"test message for mhc";
        let sig = sign_message(msg, &kp.private, true).unwrap();
        assert!(verify_signature(&sig, msg, &kp.public).unwrap());
    }

    #[test]
    fn wrong_message_fails() {
        let kp = generate_keypair().unwrap();
        let sig = sign_message(b"correct message", &kp.private, true).unwrap();
        assert!(!verify_signature(&sig, b"wrong message", &kp.public).unwrap());
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = generate_keypair().unwrap();
        let kp2 = generate_keypair().unwrap();
        let sig = sign_message(b"test", &kp1.private, true).unwrap();
        assert!(!verify_signature(&sig, b"test", &kp2.public).unwrap());
    }

    #[test]
    fn deterministic_signatures_repeat() {
        let kp = generate_keypair().unwrap();
        let msg = b"deterministic test";
        let sig1 = sign_message(msg, &kp.private, true).unwrap();
        let sig2 = sign_message(msg, &kp.private, true).unwrap();
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn random_nonce_signatures_differ_but_verify() {
        let kp = generate_keypair().unwrap();
        let msg = b"hedged";
        let sig1 = sign_message(msg, &kp.private, false).unwrap();
        let sig2 = sign_message(msg, &kp.private, false).unwrap();
        assert_ne!(sig1, sig2);
        assert!(verify_signature(&sig1, msg, &kp.public).unwrap());
        assert!(verify_signature(&sig2, msg, &kp.public).unwrap());
    }

    #[test]
    fn empty_message() {
        let kp = generate_keypair().unwrap();
        let sig = sign_message(b"", &kp.private, true).unwrap();
        assert!(verify_signature(&sig, b"", &kp.public).unwrap());
    }

    #[test]
    fn signature_is_der_sequence() {
        let kp = generate_keypair().unwrap();
        let sig = sign_message(b"der", &kp.private, true).unwrap();
        assert_eq!(sig.as_bytes()[0], 0x30);
        assert_eq!(sig.as_bytes()[1] as usize, sig.as_bytes().len() - 2);
    }

    #[test]
    fn malformed_signature_is_reported() {
        let kp = generate_keypair().unwrap();
        let err = verify_signature(&Signature(vec![0x01, 0x02]), b"m", &kp.public).unwrap_err();
        assert!(matches!(err, CryptoError::MalformedSignature(_)));
    }

    #[test]
    fn malformed_key_is_reported_on_sign() {
        let err = sign_message(b"m", &PrivateKey(vec![0x30, 0x01, 0x00]), true).unwrap_err();
        assert!(matches!(err, CryptoError::MalformedKey(_)));
    }

    #[test]
    fn backend_builds_p256() {
        let signer = SignerBackend::default().build();
        assert_eq!(signer.name(), "p256");
        let kp = signer.generate_keypair().unwrap();
        let sig = signer.sign(b"via trait", &kp.private, true).unwrap();
        let public = signer.derive_public(&kp.private).unwrap();
        assert!(signer.verify(&sig, b"via trait", &public).unwrap());
    }

    #[test]
    fn backend_parses_aliases() {
        assert_eq!("P256".parse::<SignerBackend>().unwrap(), SignerBackend::P256);
        assert_eq!("secp256r1".parse::<SignerBackend>().unwrap(), SignerBackend::P256);
        assert!("ed25519".parse::<SignerBackend>().is_err());
    }
}
