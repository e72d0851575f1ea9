//! Contract Test: Listen Address Resolution
//!
//! Constraints verified:
//! - The host of `host:port` is tried as an interface, then as a literal IP
//! - The result host is always a literal IP, never an interface name
//! - Lookup errors other than "no such interface" are not swallowed

mod common;

use common::*;
use nodeaddr_core::{AddressResolver, ErrorKind, ManagedSubnets, ResolvedAddress};

fn resolver() -> AddressResolver<CountingInterfaces> {
    AddressResolver::new(
        CountingInterfaces::new(vec![
            loopback(),
            iface("eth0", &["10.0.0.5", "fe80::1"]),
            iface("eth1", &["10.1.0.5", "10.1.0.6"]),
            iface("wg0", &["fd42::7"]),
        ]),
        ManagedSubnets::default(),
    )
}

#[test]
fn interface_name_resolves_to_its_address() {
    assert_eq!(
        resolver().resolve_listen_addr("eth0:7946").unwrap(),
        ResolvedAddress::new("10.0.0.5", "7946")
    );
    assert_eq!(
        resolver().resolve_listen_addr("wg0:7946").unwrap(),
        ResolvedAddress::new("fd42::7", "7946")
    );
}

#[test]
fn literal_ip_is_kept() {
    assert_eq!(
        resolver().resolve_listen_addr("203.0.113.9:7946").unwrap(),
        ResolvedAddress::new("203.0.113.9", "7946")
    );
    assert_eq!(
        resolver().resolve_listen_addr("0.0.0.0:2377").unwrap(),
        ResolvedAddress::new("0.0.0.0", "2377")
    );
    assert_eq!(
        resolver().resolve_listen_addr("[::]:2377").unwrap(),
        ResolvedAddress::new("::", "2377")
    );
}

#[test]
fn empty_port_is_preserved() {
    assert_eq!(
        resolver().resolve_listen_addr("eth0:").unwrap(),
        ResolvedAddress::new("10.0.0.5", "")
    );
}

#[test]
fn unknown_host_is_bad_listen_addr() {
    for addr in ["not-an-addr:7946", ":7946", "example.com:7946", "[fe80::1%eth0]:7946"] {
        assert_eq!(
            resolver().resolve_listen_addr(addr).unwrap_err().kind(),
            ErrorKind::BadListenAddr,
            "{addr}"
        );
    }
}

#[test]
fn unsplittable_addr_is_malformed() {
    for addr in ["eth0", "10.0.0.5", "2001:db8::1", "[::1]", ""] {
        assert_eq!(
            resolver().resolve_listen_addr(addr).unwrap_err().kind(),
            ErrorKind::MalformedListenAddr,
            "{addr}"
        );
    }
}

#[test]
fn ambiguous_interface_fails_fast() {
    assert_eq!(
        resolver().resolve_listen_addr("eth1:7946").unwrap_err().kind(),
        ErrorKind::AmbiguousInterfaceAddress
    );
}

#[test]
fn repeated_resolution_is_identical() {
    let r = resolver();
    let first = r.resolve_listen_addr("eth0:7946").unwrap();
    let second = r.resolve_listen_addr("eth0:7946").unwrap();
    assert_eq!(first, second);
    assert_eq!(r.source().enumeration_count(), 2);
}
