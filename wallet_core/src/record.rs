//! On-disk wallet records.
//!
//! Each wallet lives in `<data_dir>/<address>.mh` as one tab-separated line:
//!
//! ```text
//! 0x<private key DER hex>\t0x<public key DER hex>\t0x<address hex>
//! ```

use mhc_types::{Address, KeyPair, PrivateKey, PublicKey};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::WalletError;

/// File extension of wallet records.
pub const RECORD_EXTENSION: &str = "mh";

/// The three hex strings stored for one wallet.
#[derive(Clone, PartialEq, Eq, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct WalletRecord {
    pub private: String,
    pub public: String,
    pub address: String,
}

impl WalletRecord {
    pub fn new(keys: &KeyPair, address: &Address) -> Self {
        Self {
            private: keys.private.to_hex(),
            public: keys.public.to_hex(),
            address: address.to_hex(),
        }
    }

    pub fn keypair(&self) -> Result<KeyPair, WalletError> {
        let private = PrivateKey::from_hex(&self.private)
            .map_err(|e| WalletError::Record(format!("private key: {e}")))?;
        let public = PublicKey::from_hex(&self.public)
            .map_err(|e| WalletError::Record(format!("public key: {e}")))?;
        Ok(KeyPair { public, private })
    }

    pub fn address(&self) -> Result<Address, WalletError> {
        Address::from_hex(&self.address).map_err(|e| WalletError::Record(format!("address: {e}")))
    }

    fn to_line(&self) -> String {
        format!("{}\t{}\t{}\n", self.private, self.public, self.address)
    }

    fn parse_line(line: &str) -> Result<Self, WalletError> {
        let mut fields = line.trim_end_matches(['\r', '\n']).split('\t');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(private), Some(public), Some(address))
                if !private.is_empty() && !public.is_empty() && !address.is_empty() =>
            {
                Ok(Self {
                    private: private.to_string(),
                    public: public.to_string(),
                    address: address.to_string(),
                })
            }
            _ => Err(WalletError::Record(
                "expected three tab-separated fields".into(),
            )),
        }
    }
}

impl fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletRecord")
            .field("public", &self.public)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Reads and writes wallet records in one directory.
#[derive(Clone, Debug)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `address` (canonical `0x` lowercase form).
    pub fn path_for(&self, address: &Address) -> PathBuf {
        self.dir
            .join(format!("{}.{RECORD_EXTENSION}", address.to_hex()))
    }

    /// Write `record`, replacing any existing file for the same address.
    pub fn save(&self, record: &WalletRecord) -> Result<PathBuf, WalletError> {
        let address = record.address()?;
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            WalletError::Record(format!("cannot create {}: {e}", self.dir.display()))
        })?;
        let path = self.path_for(&address);
        std::fs::write(&path, record.to_line())
            .map_err(|e| WalletError::Record(format!("cannot write {}: {e}", path.display())))?;
        Ok(path)
    }

    /// Load the record for `address`.
    pub fn read(&self, address: &str) -> Result<WalletRecord, WalletError> {
        let parsed = Address::from_hex(address)
            .map_err(|_| WalletError::InvalidAddress(address.to_string()))?;
        let path = self.path_for(&parsed);
        if !path.is_file() {
            return Err(WalletError::RecordNotFound(parsed.to_hex()));
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| WalletError::Record(format!("cannot read {}: {e}", path.display())))?;
        let first = content.lines().next().unwrap_or_default();
        WalletRecord::parse_line(first)
    }

    /// Addresses of every stored record, sorted. A missing directory holds
    /// no records.
    pub fn list(&self) -> Result<Vec<String>, WalletError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(WalletError::Record(format!(
                    "cannot list {}: {e}",
                    self.dir.display()
                )))
            }
        };

        let mut addresses = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| WalletError::Record(e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                addresses.push(stem.to_string());
            }
        }
        addresses.sort();
        Ok(addresses)
    }
}
