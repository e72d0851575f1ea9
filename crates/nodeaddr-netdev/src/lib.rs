// # Netdev Interface Source
//
// This crate provides the live InterfaceSource, enumerating the host's
// network interfaces through the `netdev` crate.
//
// ## Platform Support
//
// `netdev` covers Linux, macOS, Windows, the BSDs, Android and iOS, so this
// crate builds everywhere without platform gates.
//
// ## Snapshot Semantics
//
// Every call to `interfaces()` queries the OS again. Nothing is cached.

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use nodeaddr_core::{InterfaceAddress, InterfaceSource, NetworkInterface, Result};
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::trace;

/// Interface source reading the live host through `netdev`
#[derive(Debug, Clone, Copy, Default)]
pub struct NetdevInterfaceSource;

impl NetdevInterfaceSource {
    pub fn new() -> Self {
        Self
    }
}

impl InterfaceSource for NetdevInterfaceSource {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>> {
        let interfaces: Vec<NetworkInterface> = netdev::get_interfaces()
            .into_iter()
            .map(|iface| {
                let snapshot = InterfaceParts {
                    name: iface.name.clone(),
                    is_up: iface.is_up(),
                    is_loopback: iface.is_loopback(),
                    mac: iface.mac_addr.map(|mac| mac.to_string()),
                    ipv4: iface
                        .ipv4
                        .iter()
                        .map(|net| (net.addr(), net.prefix_len()))
                        .collect(),
                    ipv6: iface
                        .ipv6
                        .iter()
                        .map(|net| (net.addr(), net.prefix_len()))
                        .collect(),
                }
                .into_interface();

                trace!(
                    interface = %snapshot.name,
                    up = snapshot.is_up,
                    loopback = snapshot.is_loopback,
                    addresses = snapshot.addresses.len(),
                    "enumerated interface"
                );
                snapshot
            })
            .collect();

        Ok(interfaces)
    }
}

/// Raw interface data as reported by the OS
///
/// Kept independent of `netdev`'s own types so the conversion can be tested
/// without a live host.
#[derive(Debug, Clone, Default)]
pub struct InterfaceParts {
    pub name: String,
    pub is_up: bool,
    pub is_loopback: bool,
    pub mac: Option<String>,
    pub ipv4: Vec<(Ipv4Addr, u8)>,
    pub ipv6: Vec<(Ipv6Addr, u8)>,
}

impl InterfaceParts {
    /// Convert into the resolver's data model
    ///
    /// An out-of-range prefix length degrades to a host prefix rather than
    /// dropping the address.
    pub fn into_interface(self) -> NetworkInterface {
        let mut addresses = Vec::with_capacity(self.ipv4.len() + self.ipv6.len() + 1);

        if let Some(mac) = self.mac {
            addresses.push(InterfaceAddress::Link(mac));
        }

        addresses.extend(self.ipv4.into_iter().map(|(addr, prefix)| {
            let net = Ipv4Net::new(addr, prefix).unwrap_or_else(|_| Ipv4Net::from(addr));
            InterfaceAddress::Network(IpNet::V4(net))
        }));
        addresses.extend(self.ipv6.into_iter().map(|(addr, prefix)| {
            let net = Ipv6Net::new(addr, prefix).unwrap_or_else(|_| Ipv6Net::from(addr));
            InterfaceAddress::Network(IpNet::V6(net))
        }));

        NetworkInterface {
            name: self.name,
            is_up: self.is_up,
            is_loopback: self.is_loopback,
            addresses,
        }
    }
}
