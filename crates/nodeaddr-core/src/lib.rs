// # nodeaddr-core
//
// Core library for choosing the address a clustering daemon binds to and
// announces to its peers.
//
// ## Architecture Overview
//
// - **InterfaceSource**: Trait for enumerating the host's network interfaces
// - **SubnetProvider**: Trait exposing subnets owned by the runtime itself
// - **AddressResolver**: Resolves listen, advertise and local addresses
// - **StaticInterfaces**: Snapshot-backed interface source
// - **NodeAddrConfig**: Serde configuration (addresses and managed subnets)
//
// ## Design Principles
//
// 1. **No guessing**: Ambiguity (several usable addresses) is an error, never
//    silently resolved
// 2. **Strict precedence**: An explicit address that fails to resolve is
//    reported, never replaced by a fallback
// 3. **Fresh snapshots**: Interfaces are enumerated on every call, nothing is
//    cached or persisted
// 4. **Library-First**: Enumeration is injected, so the resolver runs the same
//    against a live host or a fixed snapshot

pub mod config;
pub mod error;
pub mod hostport;
pub mod interface;
pub mod resolver;
pub mod snapshot;
pub mod traits;

// Re-export core types for convenience
pub use config::{ManagedSubnets, NodeAddrConfig};
pub use error::{Error, ErrorKind, Result};
pub use hostport::{ResolvedAddress, SplitError, join_host_port, split_host_port};
pub use interface::{InterfaceAddress, IpVersion, NetworkInterface, is_global_unicast};
pub use resolver::{AddressResolver, NodeAddresses};
pub use snapshot::StaticInterfaces;
pub use traits::{InterfaceSource, SubnetProvider};
