//! Hostname to socket-address resolution.

use async_trait::async_trait;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::{ResolveError, Resolver};
use std::net::{IpAddr, SocketAddr};
use tracing::{debug, warn};

use crate::NetworkError;

/// Turns a role hostname into the candidate addresses to probe, in the
/// order the resolver returned them.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve(&self, hostname: &str, port: u16) -> Result<Vec<SocketAddr>, NetworkError>;
}

/// A-record lookups through hickory.
pub struct DnsResolver {
    resolver: Resolver<TokioConnectionProvider>,
}

impl DnsResolver {
    /// Resolver using the host's configuration, or hickory's built-in
    /// upstreams when that configuration cannot be read.
    pub fn new() -> Self {
        Self::from_system_conf().unwrap_or_else(|e| {
            warn!(error = %e, "system DNS configuration unavailable, using built-in upstreams");
            Self::with_config(ResolverConfig::default())
        })
    }

    /// Resolver built from the host's configuration (`/etc/resolv.conf` on Unix).
    pub fn from_system_conf() -> Result<Self, NetworkError> {
        let resolver = Resolver::builder_tokio()
            .map_err(|e| NetworkError::Dns(format!("system configuration: {e}")))?
            .build();
        Ok(Self { resolver })
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        let resolver =
            Resolver::builder_with_config(config, TokioConnectionProvider::default()).build();
        Self { resolver }
    }
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostResolver for DnsResolver {
    async fn resolve(&self, hostname: &str, port: u16) -> Result<Vec<SocketAddr>, NetworkError> {
        debug!(hostname, "querying DNS A records");
        let lookup = self
            .resolver
            .ipv4_lookup(hostname)
            .await
            .map_err(|e| dns_error(hostname, e))?;
        let addrs: Vec<SocketAddr> = lookup
            .iter()
            .map(|record| SocketAddr::new(IpAddr::V4(record.0), port))
            .collect();
        debug!(hostname, count = addrs.len(), "DNS answered");
        Ok(addrs)
    }
}

fn dns_error(hostname: &str, e: ResolveError) -> NetworkError {
    NetworkError::Dns(format!("{hostname}: {e}"))
}
