use mhc_crypto::CryptoError;
use mhc_network::NetworkError;
use mhc_transactions::TransactionError;
use mhc_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("address file not found: {0}")]
    RecordNotFound(String),

    #[error("wallet record error: {0}")]
    Record(String),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("node RPC error: {0}")]
    Node(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<TypesError> for WalletError {
    fn from(e: TypesError) -> Self {
        match e {
            TypesError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            TypesError::InvalidHex(msg) => Self::InvalidArgument(format!("invalid hex: {msg}")),
        }
    }
}
