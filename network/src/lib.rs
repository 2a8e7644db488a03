//! Node discovery for the MHC light client.
//!
//! Two remote roles are served by separate host pools: a submission proxy
//! that accepts signed transfers and a query service that answers reads.
//! [`NodeDirectory`] resolves each pool over DNS, probes every address and
//! keeps the winner for the rest of its lifetime.

pub mod directory;
pub mod error;
pub mod probe;
pub mod resolver;
pub mod role;
pub mod selection;

pub use directory::{DirectoryConfig, NodeDirectory, RoleEndpoint};
pub use error::NetworkError;
pub use probe::{HttpProber, NodeProber};
pub use resolver::{DnsResolver, HostResolver};
pub use role::{NodeCandidate, NodeRole, ResolutionState};
pub use selection::{HeightMaximizing, ReachabilityFirst};
