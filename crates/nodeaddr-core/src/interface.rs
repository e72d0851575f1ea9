//! Host interface data model
//!
//! A [`NetworkInterface`] is a read-only snapshot of one host network
//! attachment point, taken fresh for every resolution call.

use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// IP version (v4 or v6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Version of an address, treating IPv4-mapped IPv6 as IPv4
    pub fn of(ip: IpAddr) -> Self {
        match ip.to_canonical() {
            IpAddr::V4(_) => IpVersion::V4,
            IpAddr::V6(_) => IpVersion::V6,
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpVersion::V4 => f.write_str("IPv4"),
            IpVersion::V6 => f.write_str("IPv6"),
        }
    }
}

/// One address assigned to an interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InterfaceAddress {
    /// An IP address together with its on-link prefix
    Network(IpNet),
    /// A link-layer address (e.g. a MAC); never considered for resolution
    Link(String),
}

impl InterfaceAddress {
    /// The IP network if this is a network-attached address
    pub fn ip_net(&self) -> Option<IpNet> {
        match self {
            InterfaceAddress::Network(net) => Some(*net),
            InterfaceAddress::Link(_) => None,
        }
    }

    /// The bare IP, canonicalised so IPv4-mapped IPv6 reads as IPv4
    pub fn ip(&self) -> Option<IpAddr> {
        self.ip_net().map(|net| net.addr().to_canonical())
    }
}

impl From<IpNet> for InterfaceAddress {
    fn from(net: IpNet) -> Self {
        InterfaceAddress::Network(net)
    }
}

/// Snapshot of a host network interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    /// Interface name, unique per host (e.g. "eth0")
    pub name: String,
    /// Administratively up
    pub is_up: bool,
    /// Loopback interface
    pub is_loopback: bool,
    /// Assigned addresses, in the order the OS reported them
    pub addresses: Vec<InterfaceAddress>,
}

impl NetworkInterface {
    /// Create an interface that is up, not loopback, and has no addresses
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_up: true,
            is_loopback: false,
            addresses: Vec::new(),
        }
    }

    /// Add an IP address with its prefix
    pub fn with_net(mut self, net: IpNet) -> Self {
        self.addresses.push(InterfaceAddress::Network(net));
        self
    }

    /// Add an IP address as a host route (/32 or /128)
    pub fn with_ip(self, ip: IpAddr) -> Self {
        self.with_net(IpNet::from(ip))
    }

    /// Add a link-layer address
    pub fn with_link(mut self, addr: impl Into<String>) -> Self {
        self.addresses.push(InterfaceAddress::Link(addr.into()));
        self
    }

    /// Set the administrative up flag
    pub fn with_up(mut self, is_up: bool) -> Self {
        self.is_up = is_up;
        self
    }

    /// Set the loopback flag
    pub fn with_loopback(mut self, is_loopback: bool) -> Self {
        self.is_loopback = is_loopback;
        self
    }

    /// All IP addresses on this interface, skipping link-layer entries
    pub fn ips(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.addresses.iter().filter_map(InterfaceAddress::ip)
    }
}

/// Whether an address is routable beyond the local link
///
/// Excludes unspecified, loopback, multicast and link-local addresses, plus the
/// IPv4 limited broadcast address. Private and unique-local ranges are global
/// unicast for this purpose.
pub fn is_global_unicast(ip: IpAddr) -> bool {
    match ip.to_canonical() {
        IpAddr::V4(v4) => is_global_unicast_v4(v4),
        IpAddr::V6(v6) => is_global_unicast_v6(v6),
    }
}

fn is_global_unicast_v4(ip: Ipv4Addr) -> bool {
    !(ip.is_unspecified()
        || ip.is_loopback()
        || ip.is_multicast()
        || ip.is_link_local()
        || ip.is_broadcast())
}

fn is_global_unicast_v6(ip: Ipv6Addr) -> bool {
    !(ip.is_unspecified() || ip.is_loopback() || ip.is_multicast() || ip.is_unicast_link_local())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_global_unicast_classification() {
        assert!(is_global_unicast(ip("10.0.0.5")));
        assert!(is_global_unicast(ip("203.0.113.9")));
        assert!(is_global_unicast(ip("2001:db8::1")));
        assert!(is_global_unicast(ip("fd00::1")));

        assert!(!is_global_unicast(ip("127.0.0.1")));
        assert!(!is_global_unicast(ip("169.254.1.1")));
        assert!(!is_global_unicast(ip("224.0.0.1")));
        assert!(!is_global_unicast(ip("255.255.255.255")));
        assert!(!is_global_unicast(ip("0.0.0.0")));
        assert!(!is_global_unicast(ip("::1")));
        assert!(!is_global_unicast(ip("fe80::1")));
        assert!(!is_global_unicast(ip("ff02::1")));
        assert!(!is_global_unicast(ip("::")));
    }

    #[test]
    fn test_mapped_ipv6_is_treated_as_ipv4() {
        let mapped = ip("::ffff:10.1.2.3");
        assert_eq!(IpVersion::of(mapped), IpVersion::V4);
        assert!(is_global_unicast(mapped));
        assert!(!is_global_unicast(ip("::ffff:127.0.0.1")));

        let iface = NetworkInterface::new("eth0").with_ip(mapped);
        assert_eq!(iface.ips().collect::<Vec<_>>(), vec![ip("10.1.2.3")]);
    }

    #[test]
    fn test_link_addresses_are_not_network_attached() {
        let iface = NetworkInterface::new("eth0")
            .with_link("02:42:ac:11:00:02")
            .with_net("10.0.0.5/24".parse().unwrap());

        assert_eq!(iface.addresses.len(), 2);
        assert_eq!(iface.addresses[0].ip_net(), None);
        assert_eq!(iface.ips().collect::<Vec<_>>(), vec![ip("10.0.0.5")]);
    }
}
