use thiserror::Error;

/// Failures of the cryptographic and encoding primitives.
///
/// None of these are transient: the operations are pure, so callers must not
/// retry them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("malformed key: {0}")]
    MalformedKey(String),

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("key is on curve {0}, expected secp256r1")]
    CurveMismatch(String),

    #[error("invalid compact integer encoding: {0}")]
    InvalidEncoding(String),
}
