//! Liveness and chain-height probes.
//!
//! A probe that fails for any reason (refused, timed out, unparseable reply)
//! reports `None`. Probing never returns an error to the caller.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

use crate::NetworkError;

/// Method name of the height probe.
pub const COUNT_BLOCKS_METHOD: &str = "get-count-blocks";

#[async_trait]
pub trait NodeProber: Send + Sync {
    /// HTTP status of an empty-method request, if any response arrived.
    async fn probe_liveness(&self, addr: SocketAddr) -> Option<u16>;

    /// Chain height reported by the node, if it answered usefully.
    async fn probe_height(&self, addr: SocketAddr) -> Option<u64>;
}

/// Probes nodes with JSON-RPC POSTs over reqwest.
#[derive(Clone)]
pub struct HttpProber {
    http: reqwest::Client,
}

impl HttpProber {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Result<Self, NetworkError> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| NetworkError::Http(format!("failed to create probe client: {e}")))?;
        Ok(Self { http })
    }

    async fn post(&self, addr: SocketAddr, body: &Value) -> Option<reqwest::Response> {
        match self.http.post(format!("http://{addr}/")).json(body).send().await {
            Ok(response) => Some(response),
            Err(e) => {
                debug!(%addr, error = %e, "probe got no response");
                None
            }
        }
    }
}

#[async_trait]
impl NodeProber for HttpProber {
    async fn probe_liveness(&self, addr: SocketAddr) -> Option<u16> {
        let response = self.post(addr, &liveness_request()).await?;
        let status = response.status().as_u16();
        debug!(%addr, status, "liveness probe");
        Some(status)
    }

    async fn probe_height(&self, addr: SocketAddr) -> Option<u64> {
        let response = self.post(addr, &height_request()).await?;
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                debug!(%addr, error = %e, "height probe reply is not JSON");
                return None;
            }
        };
        let height = parse_count_blocks(&body);
        debug!(%addr, ?height, "height probe");
        height
    }
}

pub fn liveness_request() -> Value {
    json!({ "id": "1", "method": "", "params": [] })
}

pub fn height_request() -> Value {
    json!({ "id": "1", "method": COUNT_BLOCKS_METHOD, "params": [] })
}

/// Read `result.count_blocks`, given either as a number or a decimal string.
pub fn parse_count_blocks(body: &Value) -> Option<u64> {
    match body.get("result")?.get("count_blocks")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
