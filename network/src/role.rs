//! Node roles, selected candidates, and per-role resolution state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;

/// Which remote service a node is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// The proxy that accepts signed transfers.
    Submission,
    /// The service that answers balance, history and transaction reads.
    Query,
}

impl NodeRole {
    pub const ALL: [NodeRole; 2] = [NodeRole::Submission, NodeRole::Query];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submission => "submission",
            Self::Query => "query",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Submission => 0,
            Self::Query => 1,
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A probed host that won selection for a role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeCandidate {
    pub addr: SocketAddr,
    pub role: NodeRole,
    /// Accepted liveness status for submission, reported chain height for query.
    pub health_score: u64,
}

impl NodeCandidate {
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Base URL for JSON-RPC requests, e.g. `http://10.0.0.1:9999/`.
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

/// Where a role is in its resolution lifecycle.
///
/// `Unresolved -> Resolving -> Resolved | Unavailable`. Only `Resolved` is
/// terminal; `Unavailable` is retried by the next request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionState {
    Unresolved,
    Resolving,
    Resolved,
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_url_includes_port() {
        let c = NodeCandidate {
            addr: "10.1.2.3:9999".parse().unwrap(),
            role: NodeRole::Submission,
            health_score: 200,
        };
        assert_eq!(c.url(), "http://10.1.2.3:9999/");
        assert_eq!(c.host(), "10.1.2.3");
        assert_eq!(c.port(), 9999);
    }

    #[test]
    fn role_names() {
        assert_eq!(NodeRole::Submission.to_string(), "submission");
        assert_eq!(NodeRole::Query.to_string(), "query");
        assert_eq!(
            serde_json::to_string(&ResolutionState::Unavailable).unwrap(),
            "\"unavailable\""
        );
    }
}
