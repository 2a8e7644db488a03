//! Per-role node discovery and caching.

use futures_util::future::join_all;
use futures_util::stream::{self, StreamExt};
use mhc_types::NetworkId;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::probe::NodeProber;
use crate::resolver::HostResolver;
use crate::role::{NodeCandidate, NodeRole, ResolutionState};
use crate::selection::{HeightMaximizing, ReachabilityFirst};
use crate::NetworkError;

/// Placeholder replaced by the network name in host templates.
pub const NET_PLACEHOLDER: &str = "{net}";

pub const DEFAULT_SUBMISSION_HOST: &str = "proxy.net-{net}.metahashnetwork.com";
pub const DEFAULT_SUBMISSION_PORT: u16 = 9999;
pub const DEFAULT_QUERY_HOST: &str = "tor.net-{net}.metahashnetwork.com";
pub const DEFAULT_QUERY_PORT: u16 = 5795;

/// DNS name and port serving one role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEndpoint {
    pub host_template: String,
    pub port: u16,
}

impl RoleEndpoint {
    pub fn new(host_template: impl Into<String>, port: u16) -> Self {
        Self {
            host_template: host_template.into(),
            port,
        }
    }

    pub fn default_submission() -> Self {
        Self::new(DEFAULT_SUBMISSION_HOST, DEFAULT_SUBMISSION_PORT)
    }

    pub fn default_query() -> Self {
        Self::new(DEFAULT_QUERY_HOST, DEFAULT_QUERY_PORT)
    }

    pub fn hostname(&self, network: NetworkId) -> String {
        self.host_template.replace(NET_PLACEHOLDER, network.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub submission: RoleEndpoint,
    pub query: RoleEndpoint,
    pub liveness: ReachabilityFirst,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            submission: RoleEndpoint::default_submission(),
            query: RoleEndpoint::default_query(),
            liveness: ReachabilityFirst::default(),
        }
    }
}

impl DirectoryConfig {
    pub fn endpoint(&self, role: NodeRole) -> &RoleEndpoint {
        match role {
            NodeRole::Submission => &self.submission,
            NodeRole::Query => &self.query,
        }
    }
}

/// Discovers, ranks and remembers the node used for each role.
///
/// Owned by one client session. A successful selection is kept until the
/// directory is dropped; a failed one is not, so the next call retries.
pub struct NodeDirectory {
    network: NetworkId,
    config: DirectoryConfig,
    resolver: Arc<dyn HostResolver>,
    prober: Arc<dyn NodeProber>,
    selected: [OnceCell<NodeCandidate>; 2],
    states: Mutex<[ResolutionState; 2]>,
}

impl NodeDirectory {
    pub fn new(
        network: NetworkId,
        config: DirectoryConfig,
        resolver: Arc<dyn HostResolver>,
        prober: Arc<dyn NodeProber>,
    ) -> Self {
        Self {
            network,
            config,
            resolver,
            prober,
            selected: [OnceCell::new(), OnceCell::new()],
            states: Mutex::new([ResolutionState::Unresolved; 2]),
        }
    }

    pub fn network(&self) -> NetworkId {
        self.network
    }

    /// Hostname queried for `role` on this directory's network.
    pub fn hostname(&self, role: NodeRole) -> String {
        self.config.endpoint(role).hostname(self.network)
    }

    /// The node to use for `role`, resolving and probing on first use.
    pub async fn endpoint(&self, role: NodeRole) -> Result<NodeCandidate, NetworkError> {
        let candidate = self.selected[role.index()]
            .get_or_try_init(|| self.resolve(role))
            .await?;
        Ok(candidate.clone())
    }

    /// The cached selection for `role`, without any network activity.
    pub fn cached(&self, role: NodeRole) -> Option<NodeCandidate> {
        self.selected[role.index()].get().cloned()
    }

    pub fn state(&self, role: NodeRole) -> ResolutionState {
        self.states()[role.index()]
    }

    fn states(&self) -> MutexGuard<'_, [ResolutionState; 2]> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, role: NodeRole, state: ResolutionState) {
        self.states()[role.index()] = state;
    }

    async fn resolve(&self, role: NodeRole) -> Result<NodeCandidate, NetworkError> {
        self.set_state(role, ResolutionState::Resolving);
        let result = self.discover(role).await;
        match &result {
            Ok(candidate) => {
                info!(
                    %role,
                    addr = %candidate.addr,
                    score = candidate.health_score,
                    "selected node"
                );
                self.set_state(role, ResolutionState::Resolved);
            }
            Err(e) => {
                warn!(%role, error = %e, "no node available");
                self.set_state(role, ResolutionState::Unavailable);
            }
        }
        result
    }

    async fn discover(&self, role: NodeRole) -> Result<NodeCandidate, NetworkError> {
        let endpoint = self.config.endpoint(role);
        let hostname = endpoint.hostname(self.network);
        let unavailable = || NetworkError::NodeUnavailable {
            role,
            hostname: hostname.clone(),
        };

        let addrs = match self.resolver.resolve(&hostname, endpoint.port).await {
            Ok(addrs) => addrs,
            Err(e) => {
                warn!(%role, %hostname, error = %e, "DNS resolution failed");
                return Err(unavailable());
            }
        };
        debug!(%role, %hostname, candidates = addrs.len(), "resolved candidates");
        if addrs.is_empty() {
            return Err(unavailable());
        }

        let selected = match role {
            NodeRole::Submission => self.first_reachable(&addrs).await,
            NodeRole::Query => self.highest(&addrs).await,
        };
        selected
            .map(|(addr, health_score)| NodeCandidate {
                addr,
                role,
                health_score,
            })
            .ok_or_else(unavailable)
    }

    /// Probe in DNS order and stop at the first accepted status.
    async fn first_reachable(&self, addrs: &[SocketAddr]) -> Option<(SocketAddr, u64)> {
        let probes = stream::iter(addrs).then(|addr| self.prober.probe_liveness(*addr));
        self.config
            .liveness
            .first_accepted(probes)
            .await
            .map(|(index, status)| (addrs[index], u64::from(status)))
    }

    /// Probe all candidates concurrently and take the tallest chain.
    async fn highest(&self, addrs: &[SocketAddr]) -> Option<(SocketAddr, u64)> {
        let heights = join_all(addrs.iter().map(|addr| self.prober.probe_height(*addr))).await;
        HeightMaximizing
            .select(&heights)
            .map(|(index, height)| (addrs[index], height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_templates() {
        let config = DirectoryConfig::default();
        assert_eq!(
            config.submission.hostname(NetworkId::Main),
            "proxy.net-main.metahashnetwork.com"
        );
        assert_eq!(
            config.query.hostname(NetworkId::Test),
            "tor.net-test.metahashnetwork.com"
        );
        assert_eq!(config.submission.port, 9999);
        assert_eq!(config.query.port, 5795);
    }

    #[test]
    fn template_without_placeholder_is_literal() {
        let endpoint = RoleEndpoint::new("node.local", 80);
        assert_eq!(endpoint.hostname(NetworkId::Dev), "node.local");
    }
}
