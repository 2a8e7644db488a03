//! MHC transfer construction.
//!
//! - **payload**: the canonical byte string that is hashed and signed
//! - **send**: a signed transfer and the `mhc_send` parameters it renders to

pub mod error;
pub mod payload;
pub mod send;

pub use error::TransactionError;
pub use payload::TransactionPayload;
pub use send::{default_fee, SendParams, SendTx};
