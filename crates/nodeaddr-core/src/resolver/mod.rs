//! Listen and advertise address resolution
//!
//! ## Flow
//!
//! 1. [`AddressResolver::resolve_listen_addr`] splits the mandatory
//!    `host:port` listen address and resolves its host.
//! 2. [`AddressResolver::resolve_advertise_addr`] walks a strict priority
//!    chain, using the listen port whenever no port is given:
//!    explicit advertise address, then the configured default advertise
//!    address, then the autodetected system address. Once a tier is
//!    non-empty its outcome is final, success or failure.
//! 3. [`AddressResolver::resolve_local_addr`] picks the concrete local
//!    address when the node listens on the unspecified address.
//!
//! A host is first tried as an interface name. Only when no interface has
//! that name is it parsed as a literal IP. Any other lookup failure, such as
//! an interface with two IPv4 addresses, is returned as-is.
//!
//! Every call enumerates interfaces afresh and nothing is cached, so repeated
//! calls against an unchanged host give identical results.

mod autodetect;
mod lookup;

use std::net::IpAddr;
use tracing::debug;

use crate::config::NodeAddrConfig;
use crate::error::{Error, Result};
use crate::hostport::{ResolvedAddress, split_host_port};
use crate::traits::{InterfaceSource, SubnetProvider};

/// Addresses a node uses for cluster traffic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAddresses {
    /// Address to bind to
    pub listen: ResolvedAddress,
    /// Address announced to peers
    pub advertise: ResolvedAddress,
    /// Concrete local IP, even when listening on the unspecified address
    pub local: String,
}

/// Resolves listen and advertise addresses against a host's interfaces
pub struct AddressResolver<S> {
    source: S,
    subnets: Box<dyn SubnetProvider>,
    default_advertise_addr: Option<String>,
}

impl<S: InterfaceSource> AddressResolver<S> {
    /// Create a resolver with no default advertise address
    pub fn new(source: S, subnets: impl SubnetProvider + 'static) -> Self {
        Self {
            source,
            subnets: Box::new(subnets),
            default_advertise_addr: None,
        }
    }

    /// Create a resolver from the subnet and default advertise settings of a config
    pub fn from_config(source: S, config: &NodeAddrConfig) -> Self {
        Self {
            source,
            subnets: Box::new(config.managed_subnets.clone()),
            default_advertise_addr: config.default_advertise_addr().map(str::to_string),
        }
    }

    /// Set the default advertise address (a bare host, no port)
    pub fn with_default_advertise_addr(mut self, addr: impl Into<String>) -> Self {
        let addr = addr.into();
        self.default_advertise_addr = (!addr.is_empty()).then_some(addr);
        self
    }

    /// The underlying interface source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve a `host:port` listen address
    pub fn resolve_listen_addr(&self, listen_addr: &str) -> Result<ResolvedAddress> {
        let (host, port) = split_host_port(listen_addr)
            .map_err(|e| Error::malformed_listen_addr(listen_addr, e))?;

        let host = self.resolve_host(host, Error::BadListenAddr)?;
        debug!(host = %host, port = %port, "resolved listen address");
        Ok(ResolvedAddress::new(host, port))
    }

    /// Resolve the advertise address, filling in `listen_port` when none is given
    pub fn resolve_advertise_addr(
        &self,
        advertise_addr: &str,
        listen_port: &str,
    ) -> Result<ResolvedAddress> {
        if !advertise_addr.is_empty() {
            let (host, port) =
                split_host_port(advertise_addr).unwrap_or((advertise_addr, listen_port));

            let host = self.resolve_host(host, Error::BadAdvertiseAddr)?;
            debug!(host = %host, port = %port, "using advertise address");
            return Ok(ResolvedAddress::new(host, port));
        }

        if let Some(default_addr) = self.default_advertise_addr.as_deref() {
            let host = self.resolve_host(default_addr, Error::BadDefaultAdvertiseAddr)?;
            debug!(host = %host, port = %listen_port, "using default advertise address");
            return Ok(ResolvedAddress::new(host, listen_port));
        }

        let system_addr = self.resolve_system_addr()?;
        Ok(ResolvedAddress::new(system_addr.to_string(), listen_port))
    }

    /// Pick the concrete local address for a resolved listen/advertise pair
    ///
    /// A specified listen host is used as-is. For the unspecified address
    /// (`0.0.0.0` or `::`), the advertise host is used if it belongs to this
    /// system, otherwise the autodetected system address. If neither applies
    /// the caller has to give an explicit listen address.
    pub fn resolve_local_addr(&self, listen_host: &str, advertise_host: &str) -> Result<String> {
        let unspecified = listen_host
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.to_canonical().is_unspecified());
        if !unspecified {
            return Ok(listen_host.to_string());
        }

        if let Ok(advertise_ip) = advertise_host.parse::<IpAddr>() {
            let advertise_ip = advertise_ip.to_canonical();
            if self.list_system_ips()?.contains(&advertise_ip) {
                debug!(addr = %advertise_ip, "advertise address is local");
                return Ok(advertise_ip.to_string());
            }
        }

        match self.resolve_system_addr() {
            Ok(ip) => Ok(ip.to_string()),
            Err(e @ Error::Enumeration(_)) => Err(e),
            Err(e) => {
                debug!(error = %e, "no local address for unspecified listen address");
                Err(Error::MustSpecifyListenAddr)
            }
        }
    }

    /// Resolve listen, advertise and local addresses in one go
    ///
    /// All-or-nothing: the first failure is returned and no partial result is
    /// produced.
    pub fn resolve(&self, listen_addr: &str, advertise_addr: &str) -> Result<NodeAddresses> {
        let listen = self.resolve_listen_addr(listen_addr)?;
        let advertise = self.resolve_advertise_addr(advertise_addr, &listen.port)?;
        let local = self.resolve_local_addr(&listen.host, &advertise.host)?;

        Ok(NodeAddresses {
            listen,
            advertise,
            local,
        })
    }

    /// Resolve a host that is either an interface name or a literal IP
    fn resolve_host(&self, host: &str, bad_addr: fn(String) -> Error) -> Result<String> {
        match self.resolve_interface_addr(host) {
            Ok(ip) => Ok(ip.to_string()),
            Err(Error::NoSuchInterface(_)) => match host.parse::<IpAddr>() {
                Ok(_) => Ok(host.to_string()),
                Err(_) => Err(bad_addr(host.to_string())),
            },
            Err(e) => Err(e),
        }
    }
}
