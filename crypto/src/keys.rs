//! P-256 key generation and DER (de)serialization.
//!
//! Private keys are SEC1 `ECPrivateKey` DER with named-curve parameters and the
//! embedded public key. Public keys are `SubjectPublicKeyInfo` DER carrying the
//! uncompressed point.

use mhc_types::{KeyPair, PrivateKey, PublicKey, PublicPoint};
use p256::elliptic_curve::rand_core::OsRng;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::pkcs8::{DecodePublicKey, EncodePublicKey, SubjectPublicKeyInfoRef};
use p256::SecretKey;

use crate::CryptoError;

/// Object identifier of the secp256r1 (NIST P-256) named curve.
const SECP256R1_OID: &str = "1.2.840.10045.3.1.7";

/// Generate a new P-256 key pair from the OS random source.
pub fn generate_keypair() -> Result<KeyPair, CryptoError> {
    let secret = SecretKey::random(&mut OsRng);
    Ok(KeyPair {
        public: encode_public(&secret.public_key())?,
        private: encode_private(&secret)?,
    })
}

/// Derive the DER public key from a DER private key.
pub fn public_from_private(private: &PrivateKey) -> Result<PublicKey, CryptoError> {
    let secret = decode_private(private)?;
    encode_public(&secret.public_key())
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> Result<KeyPair, CryptoError> {
    let public = public_from_private(&private)?;
    Ok(KeyPair { public, private })
}

/// Affine coordinates of a DER public key.
pub fn public_point(public: &PublicKey) -> Result<PublicPoint, CryptoError> {
    let key = decode_public(public)?;
    let encoded = key.to_encoded_point(false);
    let bytes = encoded.as_bytes();
    // 0x04 || x || y
    if bytes.len() != 65 {
        return Err(CryptoError::MalformedKey(format!(
            "unexpected uncompressed point length {}",
            bytes.len()
        )));
    }
    let mut point = PublicPoint {
        x: [0u8; 32],
        y: [0u8; 32],
    };
    point.x.copy_from_slice(&bytes[1..33]);
    point.y.copy_from_slice(&bytes[33..65]);
    Ok(point)
}

pub(crate) fn decode_private(private: &PrivateKey) -> Result<SecretKey, CryptoError> {
    SecretKey::from_sec1_der(private.as_bytes()).map_err(|_| classify_private(private.as_bytes()))
}

pub(crate) fn decode_public(public: &PublicKey) -> Result<p256::PublicKey, CryptoError> {
    p256::PublicKey::from_public_key_der(public.as_bytes())
        .map_err(|_| classify_public(public.as_bytes()))
}

fn encode_private(secret: &SecretKey) -> Result<PrivateKey, CryptoError> {
    let der = secret
        .to_sec1_der()
        .map_err(|e| CryptoError::MalformedKey(format!("SEC1 encoding failed: {e}")))?;
    Ok(PrivateKey(der.to_vec()))
}

fn encode_public(public: &p256::PublicKey) -> Result<PublicKey, CryptoError> {
    let der = public
        .to_public_key_der()
        .map_err(|e| CryptoError::MalformedKey(format!("SPKI encoding failed: {e}")))?;
    Ok(PublicKey(der.as_bytes().to_vec()))
}

/// Tell a well-formed key on the wrong curve apart from garbage.
fn classify_private(bytes: &[u8]) -> CryptoError {
    match sec1::EcPrivateKey::try_from(bytes) {
        Ok(key) => match key.parameters.and_then(|params| params.named_curve()) {
            Some(oid) if oid.to_string() != SECP256R1_OID => {
                CryptoError::CurveMismatch(oid.to_string())
            }
            _ => CryptoError::MalformedKey("not a valid P-256 private scalar".into()),
        },
        Err(e) => CryptoError::MalformedKey(format!("invalid SEC1 DER: {e}")),
    }
}

fn classify_public(bytes: &[u8]) -> CryptoError {
    match SubjectPublicKeyInfoRef::try_from(bytes) {
        Ok(spki) => match spki.algorithm.parameters_oid() {
            Ok(oid) if oid.to_string() != SECP256R1_OID => {
                CryptoError::CurveMismatch(oid.to_string())
            }
            _ => CryptoError::MalformedKey("not a valid P-256 public point".into()),
        },
        Err(e) => CryptoError::MalformedKey(format!("invalid SPKI DER: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // SEQUENCE { INTEGER 1, OCTET STRING (48 bytes) }, continued with secp384r1 parameters.
    const P384_SEC1_PREFIX: &str = "303e0201010430";

    #[test]
    fn generate_produces_der_encodings() {
        let kp = generate_keypair().unwrap();
        // SEQUENCE
        assert_eq!(kp.private.as_bytes()[0], 0x30);
        assert_eq!(kp.public.as_bytes()[0], 0x30);
        // SPKI for an uncompressed P-256 point is always 91 bytes.
        assert_eq!(kp.public.as_bytes().len(), 91);
    }

    #[test]
    fn public_from_private_is_deterministic() {
        let kp = generate_keypair().unwrap();
        let pub2 = public_from_private(&kp.private).unwrap();
        assert_eq!(kp.public, pub2);
    }

    #[test]
    fn keypair_from_private_roundtrip() {
        let kp1 = generate_keypair().unwrap();
        let kp2 = keypair_from_private(PrivateKey(kp1.private.0.clone())).unwrap();
        assert_eq!(kp1.public, kp2.public);
    }

    #[test]
    fn different_keys_each_time() {
        let kp1 = generate_keypair().unwrap();
        let kp2 = generate_keypair().unwrap();
        assert_ne!(kp1.public, kp2.public);
    }

    #[test]
    fn public_point_matches_uncompressed_encoding() {
        let kp = generate_keypair().unwrap();
        let point = public_point(&kp.public).unwrap();
        let der = kp.public.as_bytes();
        // The SPKI ends with the 65-byte uncompressed point.
        assert_eq!(&der[der.len() - 65..], &point.to_uncompressed()[..]);
    }

    #[test]
    fn garbage_private_key_is_malformed() {
        let err = public_from_private(&PrivateKey(vec![0xde, 0xad])).unwrap_err();
        assert!(matches!(err, CryptoError::MalformedKey(_)));
    }

    #[test]
    fn garbage_public_key_is_malformed() {
        let err = public_point(&PublicKey(vec![0x30, 0x00])).unwrap_err();
        assert!(matches!(err, CryptoError::MalformedKey(_)));
    }

    #[test]
    fn secp256k1_public_key_is_curve_mismatch() {
        // SPKI: id-ecPublicKey with secp256k1 parameters (1.3.132.0.10) and the
        // generator point of that curve.
        let der = hex_literal(concat!(
            "3056301006072a8648ce3d020106052b8104000a034200",
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
        ));
        let err = public_point(&PublicKey(der)).unwrap_err();
        assert_eq!(err, CryptoError::CurveMismatch("1.3.132.0.10".into()));
    }

    #[test]
    fn secp384r1_private_key_is_curve_mismatch() {
        // ECPrivateKey { version 1, privateKey 48 bytes (= 1), [0] secp384r1 }
        let mut scalar = "00".repeat(47);
        scalar.push_str("01");
        let der = hex_literal(&format!(
            "{P384_SEC1_PREFIX}{scalar}a00706052b81040022"
        ));
        let err = public_from_private(&PrivateKey(der)).unwrap_err();
        assert_eq!(err, CryptoError::CurveMismatch("1.3.132.0.34".into()));
    }

    fn hex_literal(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }
}
