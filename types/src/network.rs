//! Network selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// Identifies which MHC network the client talks to.
///
/// The name is interpolated into the hostname templates of both node roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// The production network.
    Main,
    /// The development network.
    Dev,
    /// The public test network.
    Test,
}

impl NetworkId {
    /// Name used in hostname templates.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Dev => "dev",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "main" => Ok(Self::Main),
            "dev" => Ok(Self::Dev),
            "test" => Ok(Self::Test),
            "" => Err(TypesError::InvalidArgument("net is empty".into())),
            other => Err(TypesError::InvalidArgument(format!(
                "unsupported net value: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_networks_case_insensitively() {
        assert_eq!("main".parse::<NetworkId>().unwrap(), NetworkId::Main);
        assert_eq!("DEV".parse::<NetworkId>().unwrap(), NetworkId::Dev);
        assert_eq!(" Test ".parse::<NetworkId>().unwrap(), NetworkId::Test);
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert!(matches!(
            "live".parse::<NetworkId>(),
            Err(TypesError::InvalidArgument(_))
        ));
        assert!(matches!(
            "".parse::<NetworkId>(),
            Err(TypesError::InvalidArgument(_))
        ));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&NetworkId::Test).unwrap();
        assert_eq!(json, "\"test\"");
        let back: NetworkId = serde_json::from_str("\"main\"").unwrap();
        assert_eq!(back, NetworkId::Main);
    }
}
