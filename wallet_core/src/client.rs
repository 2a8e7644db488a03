//! JSON-RPC client for the MHC submission and query services.

use mhc_network::{DnsResolver, HttpProber, NodeDirectory, NodeRole};
use mhc_transactions::SendParams;
use mhc_types::{Address, NetworkId};
use mhc_utils::unix_secs;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::WalletConfig;
use crate::WalletError;

pub const METHOD_SEND: &str = "mhc_send";
pub const METHOD_FETCH_BALANCE: &str = "fetch-balance";
pub const METHOD_FETCH_HISTORY: &str = "fetch-history";
pub const METHOD_GET_TX: &str = "get-tx";

/// Substring of the registration service's success reply (sic).
pub const REGISTRATION_ACCEPTED: &str = "Transaction accapted.";

/// Timeout for the wallet registration request.
const REGISTRATION_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
struct RpcRequest<'a, P: Serialize> {
    id: u64,
    method: &'a str,
    params: P,
}

/// Talks to whichever nodes the [`NodeDirectory`] selects.
///
/// Submissions go to the submission role, reads to the query role.
pub struct NodeClient {
    http: reqwest::Client,
    directory: NodeDirectory,
}

impl NodeClient {
    pub fn new(
        directory: NodeDirectory,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| WalletError::Node(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, directory })
    }

    /// Client for `network` with DNS discovery and HTTP probes as configured.
    pub fn from_config(network: NetworkId, config: &WalletConfig) -> Result<Self, WalletError> {
        let prober = HttpProber::new(config.probe_connect_timeout(), config.probe_timeout())?;
        let directory = NodeDirectory::new(
            network,
            config.directory_config(),
            Arc::new(DnsResolver::new()),
            Arc::new(prober),
        );
        Self::new(
            directory,
            config.request_connect_timeout(),
            config.request_timeout(),
        )
    }

    pub fn directory(&self) -> &NodeDirectory {
        &self.directory
    }

    /// Send one JSON-RPC request and return the whole reply document.
    async fn call<P: Serialize>(
        &self,
        role: NodeRole,
        method: &str,
        params: P,
    ) -> Result<Value, WalletError> {
        let node = self.directory.endpoint(role).await?;
        let request = RpcRequest {
            id: unix_secs(),
            method,
            params,
        };
        debug!(%role, node = %node.addr, method, "rpc call");

        let response = self
            .http
            .post(node.url())
            .json(&request)
            .send()
            .await
            .map_err(|e| WalletError::Node(format!("{method}: request failed: {e}")))?;
        let reply: Value = response
            .json()
            .await
            .map_err(|e| WalletError::Node(format!("{method}: invalid JSON response: {e}")))?;

        check_rpc_error(method, &reply)?;
        Ok(reply)
    }

    pub async fn fetch_balance(&self, address: &Address) -> Result<Value, WalletError> {
        self.call(
            NodeRole::Query,
            METHOD_FETCH_BALANCE,
            json!({ "address": address.to_hex() }),
        )
        .await
    }

    pub async fn fetch_history(&self, address: &Address) -> Result<Value, WalletError> {
        self.call(
            NodeRole::Query,
            METHOD_FETCH_HISTORY,
            json!({ "address": address.to_hex() }),
        )
        .await
    }

    pub async fn get_tx(&self, hash: &str) -> Result<Value, WalletError> {
        self.call(NodeRole::Query, METHOD_GET_TX, json!({ "hash": hash }))
            .await
    }

    /// Submit a signed transfer.
    pub async fn send(&self, params: &SendParams) -> Result<Value, WalletError> {
        self.call(NodeRole::Submission, METHOD_SEND, params).await
    }

    /// Nonce for the next transfer from `address`.
    pub async fn next_nonce(&self, address: &Address) -> Result<u64, WalletError> {
        let balance = self.fetch_balance(address).await?;
        Ok(next_nonce(&balance))
    }

    /// Announce a new wallet to the submission service.
    ///
    /// Returns whether the service confirmed it.
    pub async fn register_wallet(&self, address: &Address) -> Result<bool, WalletError> {
        let node = self.directory.endpoint(NodeRole::Submission).await?;
        let url = format!("{}?act=addWallet&p_addr={}", node.url(), address.to_hex());
        let body = self
            .http
            .post(&url)
            .timeout(REGISTRATION_TIMEOUT)
            .send()
            .await
            .map_err(|e| WalletError::Node(format!("addWallet: request failed: {e}")))?
            .text()
            .await
            .map_err(|e| WalletError::Node(format!("addWallet: unreadable reply: {e}")))?;
        let accepted = body.contains(REGISTRATION_ACCEPTED);
        info!(address = %address, accepted, "wallet registration");
        Ok(accepted)
    }
}

/// `count_spent + 1` from a `fetch-balance` reply, or 1 if the node did not
/// report it.
pub fn next_nonce(balance: &Value) -> u64 {
    let spent = match balance.get("result").and_then(|r| r.get("count_spent")) {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    spent.map_or(1, |n| n.saturating_add(1))
}

/// Turn a JSON-RPC `error` member into [`WalletError::Node`].
fn check_rpc_error(method: &str, reply: &Value) -> Result<(), WalletError> {
    match reply.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(()),
        Some(Value::String(msg)) => Err(WalletError::Node(format!("{method}: {msg}"))),
        Some(err) => {
            let msg = err
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            Err(WalletError::Node(format!("{method}: {msg}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonce_follows_count_spent() {
        assert_eq!(next_nonce(&json!({ "result": { "count_spent": 4 } })), 5);
        assert_eq!(next_nonce(&json!({ "result": { "count_spent": "9" } })), 10);
    }

    #[test]
    fn nonce_defaults_to_one() {
        assert_eq!(next_nonce(&json!({ "result": {} })), 1);
        assert_eq!(next_nonce(&json!({})), 1);
        assert_eq!(next_nonce(&json!({ "result": { "count_spent": null } })), 1);
    }

    #[test]
    fn rpc_error_shapes() {
        assert!(check_rpc_error("m", &json!({ "result": {} })).is_ok());
        assert!(check_rpc_error("m", &json!({ "error": null })).is_ok());

        let err = check_rpc_error("get-tx", &json!({ "error": "not found" })).unwrap_err();
        assert_eq!(err.to_string(), "node RPC error: get-tx: not found");

        let err = check_rpc_error(
            "mhc_send",
            &json!({ "error": { "code": -32602, "message": "bad sign" } }),
        )
        .unwrap_err();
        assert!(err.to_string().ends_with("mhc_send: bad sign"));
    }

    #[test]
    fn request_envelope() {
        let request = RpcRequest {
            id: 1_700_000_000,
            method: METHOD_GET_TX,
            params: json!({ "hash": "abc" }),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["id"], 1_700_000_000u64);
        assert_eq!(value["method"], "get-tx");
        assert_eq!(value["params"]["hash"], "abc");
    }
}
