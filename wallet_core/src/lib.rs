//! Wallet core library for the MHC light client.
//!
//! Provides everything the command line needs:
//! - Key generation and `<address>.mh` record storage
//! - TOML configuration
//! - A JSON-RPC client bound to a node directory
//! - Transfer signing and submission

pub mod client;
pub mod config;
pub mod error;
pub mod record;
pub mod wallet;

pub use client::NodeClient;
pub use config::WalletConfig;
pub use error::WalletError;
pub use record::{RecordStore, WalletRecord};
pub use wallet::{SendRequest, Wallet};
