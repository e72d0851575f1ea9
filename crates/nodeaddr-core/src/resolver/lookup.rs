//! Resolving a named interface to its single address

use std::net::IpAddr;
use tracing::debug;

use super::AddressResolver;
use crate::error::{Error, Result};
use crate::interface::{IpVersion, NetworkInterface};
use crate::traits::InterfaceSource;

impl<S: InterfaceSource> AddressResolver<S> {
    /// Resolve an interface name to that interface's address
    ///
    /// Fails with [`Error::NoSuchInterface`] when no interface has that name,
    /// which callers use to fall back to parsing the name as a literal IP.
    /// Every IP address on the interface counts, whatever its scope; link-layer
    /// addresses are ignored.
    pub fn resolve_interface_addr(&self, name: &str) -> Result<IpAddr> {
        if name.is_empty() {
            return Err(Error::NoSuchInterface(String::new()));
        }

        let iface = self
            .source
            .interface_by_name(name)?
            .ok_or_else(|| Error::NoSuchInterface(name.to_string()))?;

        let addr = interface_addr(&iface)?;
        debug!(interface = %iface.name, addr = %addr, "resolved interface address");
        Ok(addr)
    }
}

/// Pick the one address of an interface, preferring IPv4 over IPv6
pub(crate) fn interface_addr(iface: &NetworkInterface) -> Result<IpAddr> {
    let mut v4 = None;
    let mut v6 = None;

    for ip in iface.ips() {
        let slot = match IpVersion::of(ip) {
            IpVersion::V4 => &mut v4,
            IpVersion::V6 => &mut v6,
        };
        if slot.is_some() {
            return Err(Error::ambiguous(&iface.name, IpVersion::of(ip)));
        }
        *slot = Some(ip);
    }

    v4.or(v6)
        .ok_or_else(|| Error::NoUsableAddress(iface.name.clone()))
}
