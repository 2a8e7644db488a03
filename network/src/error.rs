use thiserror::Error;

use crate::role::NodeRole;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("no usable {role} node behind {hostname}")]
    NodeUnavailable { role: NodeRole, hostname: String },

    #[error("DNS lookup failed: {0}")]
    Dns(String),

    #[error("HTTP error: {0}")]
    Http(String),
}
