//! Nullable infrastructure for deterministic testing.
//!
//! The node directory reaches the outside world through two seams, DNS
//! resolution and node probing. This crate provides scripted
//! implementations of both that:
//! - Return exactly the answers a test configured
//! - Record every call for assertions
//! - Never touch the network
//!
//! Usage: hand them to `NodeDirectory::new` in place of `DnsResolver` and
//! `HttpProber`.

pub mod prober;
pub mod resolver;

pub use prober::{NullProber, ProbeKind};
pub use resolver::NullResolver;
