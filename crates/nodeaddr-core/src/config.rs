//! Configuration types for address resolution
//!
//! Values arrive as untrusted free-form strings. This module only checks
//! presence; whether a host is an interface name or a literal IP is decided
//! by the resolver at resolution time.

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::traits::SubnetProvider;

/// Main resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeAddrConfig {
    /// `host:port` to listen on; host is an interface name or literal IP
    pub listen_addr: String,

    /// Address to advertise to peers, `host[:port]`
    #[serde(default)]
    pub advertise_addr: Option<String>,

    /// Fallback advertise host when no advertise address is given (no port)
    #[serde(default)]
    pub default_advertise_addr: Option<String>,

    /// Subnets owned by the runtime, never autodetected
    #[serde(default)]
    pub managed_subnets: ManagedSubnets,
}

impl NodeAddrConfig {
    /// Create a configuration with only a listen address
    pub fn new(listen_addr: impl Into<String>) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            advertise_addr: None,
            default_advertise_addr: None,
            managed_subnets: ManagedSubnets::default(),
        }
    }

    /// Set the advertise address
    pub fn with_advertise_addr(mut self, addr: impl Into<String>) -> Self {
        self.advertise_addr = Some(addr.into());
        self
    }

    /// Set the default advertise address
    pub fn with_default_advertise_addr(mut self, addr: impl Into<String>) -> Self {
        self.default_advertise_addr = Some(addr.into());
        self
    }

    /// Set the runtime-owned subnets
    pub fn with_managed_subnets(mut self, subnets: ManagedSubnets) -> Self {
        self.managed_subnets = subnets;
        self
    }

    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.listen_addr.trim().is_empty() {
            return Err(Error::config("listen address cannot be empty"));
        }
        Ok(())
    }

    /// Advertise address, with an empty string treated as absent
    pub fn advertise_addr(&self) -> Option<&str> {
        non_empty(self.advertise_addr.as_deref())
    }

    /// Default advertise address, with an empty string treated as absent
    pub fn default_advertise_addr(&self) -> Option<&str> {
        non_empty(self.default_advertise_addr.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Static list of runtime-owned subnets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedSubnets {
    /// IPv4 subnets
    #[serde(default)]
    pub v4: Vec<Ipv4Net>,
    /// IPv6 subnets
    #[serde(default)]
    pub v6: Vec<Ipv6Net>,
}

impl ManagedSubnets {
    /// Split a mixed list of networks by IP version
    pub fn from_nets(nets: impl IntoIterator<Item = IpNet>) -> Self {
        let mut subnets = Self::default();
        for net in nets {
            match net {
                IpNet::V4(v4) => subnets.v4.push(v4),
                IpNet::V6(v6) => subnets.v6.push(v6),
            }
        }
        subnets
    }

    /// Whether no subnets are configured
    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }
}

impl SubnetProvider for ManagedSubnets {
    fn v4_subnets(&self) -> Vec<Ipv4Net> {
        self.v4.clone()
    }

    fn v6_subnets(&self) -> Vec<Ipv6Net> {
        self.v6.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_json_defaults() {
        let config = NodeAddrConfig::from_json_str(r#"{"listen_addr": "eth0:2377"}"#).unwrap();
        assert_eq!(config.listen_addr, "eth0:2377");
        assert_eq!(config.advertise_addr(), None);
        assert_eq!(config.default_advertise_addr(), None);
        assert!(config.managed_subnets.is_empty());
    }

    #[test]
    fn test_from_json_full() {
        let json = r#"{
            "listen_addr": "0.0.0.0:2377",
            "advertise_addr": "eth0",
            "default_advertise_addr": "10.0.0.5",
            "managed_subnets": { "v4": ["172.17.0.0/16"], "v6": ["fd00:dead::/64"] }
        }"#;
        let config = NodeAddrConfig::from_json_str(json).unwrap();
        assert_eq!(config.advertise_addr(), Some("eth0"));
        assert_eq!(config.default_advertise_addr(), Some("10.0.0.5"));
        assert_eq!(
            config.managed_subnets.v4_subnets(),
            vec!["172.17.0.0/16".parse::<Ipv4Net>().unwrap()]
        );
        assert_eq!(config.managed_subnets.v6_subnets().len(), 1);
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let config = NodeAddrConfig::new("eth0:2377")
            .with_advertise_addr("")
            .with_default_advertise_addr("");
        assert_eq!(config.advertise_addr(), None);
        assert_eq!(config.default_advertise_addr(), None);
    }

    #[test]
    fn test_validate_rejects_empty_listen_addr() {
        let err = NodeAddrConfig::from_json_str(r#"{"listen_addr": " "}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_subnet_is_json_error() {
        let json = r#"{"listen_addr": "eth0:1", "managed_subnets": {"v4": ["nope"]}}"#;
        let err = NodeAddrConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_nets_splits_by_version() {
        let subnets = ManagedSubnets::from_nets([
            "172.17.0.0/16".parse::<IpNet>().unwrap(),
            "fd00::/8".parse::<IpNet>().unwrap(),
            "10.0.0.0/24".parse::<IpNet>().unwrap(),
        ]);
        assert_eq!(subnets.v4.len(), 2);
        assert_eq!(subnets.v6.len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"listen_addr": "[::1]:2377", "default_advertise_addr": "eth1"}}"#
        )
        .unwrap();

        let config = NodeAddrConfig::load(file.path()).unwrap();
        assert_eq!(config.listen_addr, "[::1]:2377");
        assert_eq!(config.default_advertise_addr(), Some("eth1"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = NodeAddrConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
