//! Nullable prober: scripted liveness statuses and chain heights.

use async_trait::async_trait;
use mhc_network::NodeProber;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;

use crate::resolver::lock;

/// Which probe was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeKind {
    Liveness,
    Height,
}

/// A prober that returns preset results instead of sending requests.
///
/// Addresses without a scripted result behave like a timeout (`None`).
pub struct NullProber {
    statuses: Mutex<HashMap<SocketAddr, u16>>,
    heights: Mutex<HashMap<SocketAddr, u64>>,
    calls: Mutex<Vec<(ProbeKind, SocketAddr)>>,
}

impl NullProber {
    pub fn new() -> Self {
        Self {
            statuses: Mutex::new(HashMap::new()),
            heights: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Liveness probes of `addr` answer with `status`.
    pub fn with_status(self, addr: SocketAddr, status: u16) -> Self {
        lock(&self.statuses).insert(addr, status);
        self
    }

    /// Height probes of `addr` answer with `height`.
    pub fn with_height(self, addr: SocketAddr, height: u64) -> Self {
        lock(&self.heights).insert(addr, height);
        self
    }

    /// All probes issued so far.
    pub fn calls(&self) -> Vec<(ProbeKind, SocketAddr)> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn reset(&self) {
        lock(&self.calls).clear();
    }
}

impl Default for NullProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodeProber for NullProber {
    async fn probe_liveness(&self, addr: SocketAddr) -> Option<u16> {
        lock(&self.calls).push((ProbeKind::Liveness, addr));
        lock(&self.statuses).get(&addr).copied()
    }

    async fn probe_height(&self, addr: SocketAddr) -> Option<u64> {
        lock(&self.calls).push((ProbeKind::Height, addr));
        lock(&self.heights).get(&addr).copied()
    }
}
