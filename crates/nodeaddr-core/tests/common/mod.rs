//! Test doubles and common utilities for resolution contract tests

#![allow(dead_code)]

use ipnet::{Ipv4Net, Ipv6Net};
use nodeaddr_core::error::Result;
use nodeaddr_core::{InterfaceSource, NetworkInterface, SubnetProvider};
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Interface source that counts enumerations
pub struct CountingInterfaces {
    interfaces: Vec<NetworkInterface>,
    enumerations: Arc<AtomicUsize>,
}

impl CountingInterfaces {
    pub fn new(interfaces: Vec<NetworkInterface>) -> Self {
        Self {
            interfaces,
            enumerations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times interfaces() was called
    pub fn enumeration_count(&self) -> usize {
        self.enumerations.load(Ordering::SeqCst)
    }
}

impl InterfaceSource for CountingInterfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>> {
        self.enumerations.fetch_add(1, Ordering::SeqCst);
        Ok(self.interfaces.clone())
    }
}

/// Interface source whose enumeration always fails
pub struct FailingInterfaces;

impl InterfaceSource for FailingInterfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "getifaddrs denied").into())
    }
}

/// Subnet provider that counts how often it is consulted
#[derive(Clone, Default)]
pub struct CountingSubnets {
    pub v4: Vec<Ipv4Net>,
    pub v6: Vec<Ipv6Net>,
    calls: Arc<AtomicUsize>,
}

impl CountingSubnets {
    pub fn v4(nets: &[&str]) -> Self {
        Self {
            v4: nets.iter().map(|n| n.parse().unwrap()).collect(),
            ..Self::default()
        }
    }

    pub fn v6(nets: &[&str]) -> Self {
        Self {
            v6: nets.iter().map(|n| n.parse().unwrap()).collect(),
            ..Self::default()
        }
    }

    /// Total calls across v4_subnets() and v6_subnets()
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SubnetProvider for CountingSubnets {
    fn v4_subnets(&self) -> Vec<Ipv4Net> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.v4.clone()
    }

    fn v6_subnets(&self) -> Vec<Ipv6Net> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.v6.clone()
    }
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().expect("valid IP literal")
}

pub fn loopback() -> NetworkInterface {
    NetworkInterface::new("lo")
        .with_ip(ip("127.0.0.1"))
        .with_ip(ip("::1"))
        .with_loopback(true)
}

/// An up, non-loopback interface carrying the given addresses
pub fn iface(name: &str, addrs: &[&str]) -> NetworkInterface {
    addrs
        .iter()
        .fold(NetworkInterface::new(name), |iface, addr| iface.with_ip(ip(addr)))
}

/// Docker-style bridge on the default 172.17.0.0/16 network
pub fn docker0() -> NetworkInterface {
    NetworkInterface::new("docker0")
        .with_net("172.17.0.1/16".parse().unwrap())
        .with_link("02:42:7d:3a:10:01")
}
