//! Nullable resolver: scripted DNS answers.

use async_trait::async_trait;
use mhc_network::{HostResolver, NetworkError};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Mutex, MutexGuard, PoisonError};

enum Answer {
    Addrs(Vec<SocketAddr>),
    Failure(String),
}

/// A resolver that answers from a table instead of DNS.
///
/// Unknown hostnames resolve to no records.
pub struct NullResolver {
    answers: Mutex<HashMap<String, Answer>>,
    lookups: Mutex<Vec<String>>,
}

impl NullResolver {
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(HashMap::new()),
            lookups: Mutex::new(Vec::new()),
        }
    }

    /// Answer `hostname` with these addresses, in this order.
    pub fn with_addrs(self, hostname: &str, addrs: Vec<SocketAddr>) -> Self {
        lock(&self.answers).insert(hostname.to_string(), Answer::Addrs(addrs));
        self
    }

    /// Make lookups of `hostname` fail.
    pub fn with_failure(self, hostname: &str, message: &str) -> Self {
        lock(&self.answers).insert(hostname.to_string(), Answer::Failure(message.to_string()));
        self
    }

    /// Every hostname looked up so far, in call order.
    pub fn lookups(&self) -> Vec<String> {
        lock(&self.lookups).clone()
    }
}

impl Default for NullResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostResolver for NullResolver {
    async fn resolve(&self, hostname: &str, port: u16) -> Result<Vec<SocketAddr>, NetworkError> {
        lock(&self.lookups).push(hostname.to_string());
        match lock(&self.answers).get(hostname) {
            Some(Answer::Addrs(addrs)) => Ok(addrs
                .iter()
                .map(|addr| SocketAddr::new(addr.ip(), port))
                .collect()),
            Some(Answer::Failure(message)) => Err(NetworkError::Dns(message.clone())),
            None => Ok(Vec::new()),
        }
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
