//! Wallet configuration with TOML file support.

use mhc_crypto::SignerBackend;
use mhc_network::{DirectoryConfig, ReachabilityFirst, RoleEndpoint};
use mhc_types::NetworkId;
use mhc_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::WalletError;

/// Configuration for the light wallet.
///
/// Can be loaded from a TOML file via [`WalletConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so an
/// empty file is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Network to talk to. Required by every command that contacts a node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkId>,

    /// Directory holding one `<address>.mh` record per wallet.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub signer: SignerBackend,

    /// RFC 6979 nonces when true, OS entropy per signature otherwise.
    #[serde(default = "default_true")]
    pub deterministic_signing: bool,

    /// Leading byte of derived addresses.
    #[serde(default)]
    pub network_byte: u8,

    #[serde(default = "default_probe_timeout_ms")]
    pub probe_connect_timeout_ms: u64,

    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    #[serde(default = "default_request_connect_timeout_ms")]
    pub request_connect_timeout_ms: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Lowest liveness status that counts as reachable.
    #[serde(default = "default_liveness_status_min")]
    pub liveness_status_min: u16,

    /// Highest liveness status that counts as reachable.
    #[serde(default = "default_liveness_status_max")]
    pub liveness_status_max: u16,

    /// Announce freshly generated wallets to the test network.
    #[serde(default = "default_true")]
    pub register_on_generate: bool,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter directive, e.g. `"warn"` or `"info,mhc_network=debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "RoleEndpoint::default_submission")]
    pub submission: RoleEndpoint,

    #[serde(default = "RoleEndpoint::default_query")]
    pub query: RoleEndpoint,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_true() -> bool {
    true
}

fn default_probe_timeout_ms() -> u64 {
    1000
}

fn default_request_connect_timeout_ms() -> u64 {
    1000
}

fn default_request_timeout_ms() -> u64 {
    3000
}

fn default_liveness_status_min() -> u16 {
    1
}

fn default_liveness_status_max() -> u16 {
    499
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl WalletConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| WalletError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        let config: Self = toml::from_str(s).map_err(|e| WalletError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, WalletError> {
        toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), WalletError> {
        if self.liveness_status_min > self.liveness_status_max {
            return Err(WalletError::Config(format!(
                "liveness_status_min ({}) exceeds liveness_status_max ({})",
                self.liveness_status_min, self.liveness_status_max
            )));
        }
        Ok(())
    }

    /// The configured network, or the error every node command reports
    /// when none was given.
    pub fn require_network(&self) -> Result<NetworkId, WalletError> {
        self.network
            .ok_or_else(|| WalletError::InvalidArgument("net is empty".into()))
    }

    pub fn directory_config(&self) -> DirectoryConfig {
        DirectoryConfig {
            submission: self.submission.clone(),
            query: self.query.clone(),
            liveness: ReachabilityFirst::new(self.liveness_status_min, self.liveness_status_max),
        }
    }

    pub fn probe_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_connect_timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn request_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.request_connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: None,
            data_dir: default_data_dir(),
            signer: SignerBackend::default(),
            deterministic_signing: default_true(),
            network_byte: 0x00,
            probe_connect_timeout_ms: default_probe_timeout_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
            request_connect_timeout_ms: default_request_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            liveness_status_min: default_liveness_status_min(),
            liveness_status_max: default_liveness_status_max(),
            register_on_generate: default_true(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            submission: RoleEndpoint::default_submission(),
            query: RoleEndpoint::default_query(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = WalletConfig {
            network: Some(NetworkId::Dev),
            ..WalletConfig::default()
        };
        let toml_str = config.to_toml_string().unwrap();
        let parsed = WalletConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = WalletConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config, WalletConfig::default());
        assert_eq!(config.network, None);
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.probe_timeout(), Duration::from_secs(1));
        assert_eq!(config.submission.port, 9999);
        assert_eq!(config.query.port, 5795);
        assert!(config.deterministic_signing);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            network = "test"
            data_dir = "/var/lib/mhc"
            liveness_status_max = 299
            log_format = "json"

            [query]
            host_template = "tor.{net}.example.org"
            port = 8080
        "#;
        let config = WalletConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.network, Some(NetworkId::Test));
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/mhc"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.query.hostname(NetworkId::Test), "tor.test.example.org");
        assert_eq!(config.submission, RoleEndpoint::default_submission());

        let dir = config.directory_config();
        assert!(dir.liveness.accepts(299));
        assert!(!dir.liveness.accepts(404));
    }

    #[test]
    fn unknown_network_is_rejected() {
        let err = WalletConfig::from_toml_str(r#"network = "staging""#).unwrap_err();
        assert!(matches!(err, WalletError::Config(_)));
    }

    #[test]
    fn inverted_liveness_range_is_rejected() {
        let toml = "liveness_status_min = 500\nliveness_status_max = 100\n";
        assert!(matches!(
            WalletConfig::from_toml_str(toml),
            Err(WalletError::Config(_))
        ));
    }

    #[test]
    fn missing_network_is_reported() {
        let err = WalletConfig::default().require_network().unwrap_err();
        assert_eq!(err.to_string(), "net is empty");
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = WalletConfig::from_toml_file("/nonexistent/mhc.toml");
        assert!(matches!(result, Err(WalletError::Config(_))));
    }
}
