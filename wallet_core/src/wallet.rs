//! The wallet facade: key generation, record storage, node reads and
//! signed transfers behind one type.

use mhc_crypto::{derive_address, validate_address, Signer};
use mhc_transactions::{default_fee, SendTx};
use mhc_types::{Address, NetworkId, PublicKey};
use serde_json::Value;
use tracing::{info, warn};

use crate::client::NodeClient;
use crate::config::WalletConfig;
use crate::record::{RecordStore, WalletRecord};
use crate::WalletError;

/// A transfer as requested by the user.
#[derive(Clone, Debug, Default)]
pub struct SendRequest {
    /// Sender address; its record must exist in the data directory.
    pub from: String,
    pub to: String,
    pub value: u64,
    /// Free-form data, sent as the hex of its UTF-8 bytes.
    pub data: Option<String>,
    /// Defaults to one unit per data byte.
    pub fee: Option<u64>,
    /// Defaults to the sender's `count_spent + 1`.
    pub nonce: Option<u64>,
}

pub struct Wallet {
    config: WalletConfig,
    signer: Box<dyn Signer>,
    store: RecordStore,
    client: Option<NodeClient>,
}

impl Wallet {
    /// Build a wallet from configuration. A node client is created only when
    /// a network is configured.
    pub fn new(config: WalletConfig) -> Result<Self, WalletError> {
        let client = match config.network {
            Some(network) => Some(NodeClient::from_config(network, &config)?),
            None => None,
        };
        Ok(Self::with_client(config, client))
    }

    /// Build a wallet around an existing client (or none).
    pub fn with_client(config: WalletConfig, client: Option<NodeClient>) -> Self {
        let signer = config.signer.build();
        let store = RecordStore::new(config.data_dir.clone());
        Self {
            config,
            signer,
            store,
            client,
        }
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    fn client(&self) -> Result<&NodeClient, WalletError> {
        self.config.require_network()?;
        self.client
            .as_ref()
            .ok_or_else(|| WalletError::InvalidArgument("net is empty".into()))
    }

    /// Address of a DER public key under the configured network byte.
    pub fn derive_address(&self, public: &PublicKey) -> Result<Address, WalletError> {
        let point = self.signer.public_point(public)?;
        Ok(derive_address(&point, self.config.network_byte))
    }

    /// Create a key pair, store its record, and optionally announce the new
    /// address to the test network.
    pub async fn generate(&self) -> Result<WalletRecord, WalletError> {
        let keys = self.signer.generate_keypair()?;
        let address = self.derive_address(&keys.public)?;
        let record = WalletRecord::new(&keys, &address);
        let path = self.store.save(&record)?;
        info!(address = %address, path = %path.display(), "generated wallet");

        if self.config.register_on_generate {
            self.register(&address).await;
        }
        Ok(record)
    }

    /// Best-effort registration of `address`; failures are logged only.
    async fn register(&self, address: &Address) {
        let result = match NodeClient::from_config(NetworkId::Test, &self.config) {
            Ok(client) => client.register_wallet(address).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(true) => {}
            Ok(false) => warn!(address = %address, "registration not confirmed"),
            Err(e) => warn!(address = %address, error = %e, "registration failed"),
        }
    }

    pub fn list_addresses(&self) -> Result<Vec<String>, WalletError> {
        self.store.list()
    }

    pub async fn fetch_balance(&self, address: &str) -> Result<Value, WalletError> {
        let client = self.client()?;
        let address = checked_address(address)?;
        client.fetch_balance(&address).await
    }

    pub async fn fetch_history(&self, address: &str) -> Result<Value, WalletError> {
        let client = self.client()?;
        let address = checked_address(address)?;
        client.fetch_history(&address).await
    }

    pub async fn get_tx(&self, hash: &str) -> Result<Value, WalletError> {
        let client = self.client()?;
        let hash = hash.trim();
        if hash.is_empty() {
            return Err(WalletError::InvalidArgument("hash is empty".into()));
        }
        client.get_tx(&hash.to_lowercase()).await
    }

    /// Sign a transfer from a stored record without contacting any node.
    pub fn sign_transfer(
        &self,
        record: &WalletRecord,
        to: &Address,
        value: u64,
        fee: u64,
        nonce: u64,
        data: &[u8],
    ) -> Result<SendTx, WalletError> {
        let keys = record.keypair()?;
        let tx = SendTx::sign(
            to.clone(),
            value,
            fee,
            nonce,
            data.to_vec(),
            &keys,
            self.signer.as_ref(),
            self.config.deterministic_signing,
        )?;
        Ok(tx)
    }

    /// Read the sender record, fill in nonce and fee, sign, and submit.
    pub async fn send_tx(&self, request: &SendRequest) -> Result<Value, WalletError> {
        let client = self.client()?;
        let record = self.store.read(&request.from)?;
        let to = checked_address(&request.to)?;

        let nonce = match request.nonce {
            Some(nonce) => nonce,
            None => client.next_nonce(&record.address()?).await?,
        };
        let data = request.data.as_deref().unwrap_or_default().as_bytes();
        let fee = request.fee.unwrap_or_else(|| default_fee(data));

        let tx = self.sign_transfer(&record, &to, request.value, fee, nonce, data)?;
        info!(
            from = %record.address,
            to = %to,
            value = request.value,
            fee,
            nonce,
            "submitting transfer"
        );
        client.send(&tx.params()).await
    }
}

/// Parse an address that must carry a valid checksum.
fn checked_address(address: &str) -> Result<Address, WalletError> {
    let address = address.trim();
    if !validate_address(address) {
        return Err(WalletError::InvalidAddress(address.to_string()));
    }
    Address::from_hex(address).map_err(|_| WalletError::InvalidAddress(address.to_string()))
}
