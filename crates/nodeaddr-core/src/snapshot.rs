// # Static Interface Source
//
// Snapshot-backed implementation of InterfaceSource.
//
// ## Purpose
//
// Serves a fixed list of interfaces. Useful for embedding (the caller already
// holds an interface listing), for replaying a captured host layout, and for
// testing.

use crate::error::Result;
use crate::interface::NetworkInterface;
use crate::traits::InterfaceSource;

/// Interface source backed by a fixed snapshot
///
/// # Example
///
/// ```rust
/// use nodeaddr_core::{InterfaceSource, NetworkInterface, StaticInterfaces};
///
/// let source = StaticInterfaces::new(vec![
///     NetworkInterface::new("eth0").with_ip("10.0.0.5".parse().unwrap()),
/// ]);
///
/// let eth0 = source.interface_by_name("eth0").unwrap();
/// assert!(eth0.is_some());
/// assert!(source.interface_by_name("eth9").unwrap().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct StaticInterfaces {
    interfaces: Vec<NetworkInterface>,
}

impl StaticInterfaces {
    /// Create a source serving the given interfaces
    pub fn new(interfaces: Vec<NetworkInterface>) -> Self {
        Self { interfaces }
    }
}

impl InterfaceSource for StaticInterfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>> {
        Ok(self.interfaces.clone())
    }
}
