//! Runtime-owned subnets
//!
//! Addresses inside these subnets belong to networks the runtime manages
//! itself (internal bridges, overlay ranges) and are never autodetected.

use ipnet::{Ipv4Net, Ipv6Net};

/// Source of the subnets managed by the host's own runtime
///
/// Both methods must be side-effect free. Autodetection calls each once per
/// resolution.
pub trait SubnetProvider: Send + Sync {
    /// Managed IPv4 subnets
    fn v4_subnets(&self) -> Vec<Ipv4Net>;

    /// Managed IPv6 subnets
    fn v6_subnets(&self) -> Vec<Ipv6Net>;
}
