//! Autodetecting the system's single advertisable address
//!
//! Candidates come from interfaces that are up and not loopback, and only
//! global unicast addresses count. An interface carrying any address inside a
//! runtime-owned subnet is dropped entirely, for both IP versions.

use ipnet::{Ipv4Net, Ipv6Net};
use std::net::IpAddr;
use tracing::{debug, trace};

use super::AddressResolver;
use crate::error::{Error, Result};
use crate::interface::{NetworkInterface, is_global_unicast};
use crate::traits::InterfaceSource;

/// Outcome of examining one interface during autodetection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Candidate {
    /// The interface does not take part (down, loopback, or runtime-owned)
    Skip(SkipReason),
    /// The interface has no global unicast address
    Empty,
    /// The interface's preferred address
    Addr(IpAddr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SkipReason {
    Down,
    Loopback,
    ManagedSubnet,
}

impl<S: InterfaceSource> AddressResolver<S> {
    /// Find the system's only address, or fail if there is not exactly one
    pub fn resolve_system_addr(&self) -> Result<IpAddr> {
        let interfaces = self.source.interfaces()?;
        let v4_subnets = self.subnets.v4_subnets();
        let v6_subnets = self.subnets.v6_subnets();

        let mut system_addr: Option<IpAddr> = None;

        for iface in &interfaces {
            match classify_interface(iface, &v4_subnets, &v6_subnets)? {
                Candidate::Skip(reason) => {
                    trace!(interface = %iface.name, ?reason, "skipping interface");
                }
                Candidate::Empty => {
                    trace!(interface = %iface.name, "no global unicast address");
                }
                Candidate::Addr(addr) => {
                    if let Some(previous) = system_addr {
                        debug!(
                            interface = %iface.name,
                            addr = %addr,
                            previous = %previous,
                            "more than one system address"
                        );
                        return Err(Error::MultipleIps);
                    }
                    trace!(interface = %iface.name, addr = %addr, "system address candidate");
                    system_addr = Some(addr);
                }
            }
        }

        let addr = system_addr.ok_or(Error::NoIp)?;
        debug!(addr = %addr, "autodetected system address");
        Ok(addr)
    }

    /// Every IP address on every interface, regardless of flags or scope
    pub fn list_system_ips(&self) -> Result<Vec<IpAddr>> {
        Ok(self
            .source
            .interfaces()?
            .iter()
            .flat_map(|iface| iface.ips())
            .collect())
    }
}

/// Decide what a single interface contributes to autodetection
///
/// Fails with [`Error::MultipleIps`] when the interface carries two global
/// unicast addresses of the same version before any managed-subnet address
/// is seen.
pub(crate) fn classify_interface(
    iface: &NetworkInterface,
    v4_subnets: &[Ipv4Net],
    v6_subnets: &[Ipv6Net],
) -> Result<Candidate> {
    if !iface.is_up {
        return Ok(Candidate::Skip(SkipReason::Down));
    }
    if iface.is_loopback {
        return Ok(Candidate::Skip(SkipReason::Loopback));
    }

    let mut v4 = None;
    let mut v6 = None;

    for ip in iface.ips().filter(|ip| is_global_unicast(*ip)) {
        match ip {
            IpAddr::V4(addr) => {
                if v4_subnets.iter().any(|net| net.contains(&addr)) {
                    trace!(interface = %iface.name, addr = %addr, "address in managed subnet");
                    return Ok(Candidate::Skip(SkipReason::ManagedSubnet));
                }
                if v4.replace(ip).is_some() {
                    return Err(Error::MultipleIps);
                }
            }
            IpAddr::V6(addr) => {
                if v6_subnets.iter().any(|net| net.contains(&addr)) {
                    trace!(interface = %iface.name, addr = %addr, "address in managed subnet");
                    return Ok(Candidate::Skip(SkipReason::ManagedSubnet));
                }
                if v6.replace(ip).is_some() {
                    return Err(Error::MultipleIps);
                }
            }
        }
    }

    Ok(v4.or(v6).map_or(Candidate::Empty, Candidate::Addr))
}
