use mhc_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("public key does not belong to the signing key")]
    KeyMismatch,
}
