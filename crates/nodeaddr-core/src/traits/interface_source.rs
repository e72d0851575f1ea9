// # Interface Source Trait
//
// Defines the interface for enumerating the host's network interfaces.
//
// ## Implementations
//
// - `netdev`-backed live enumeration: `nodeaddr-netdev` crate
// - Fixed snapshot: `StaticInterfaces` in this crate
//
// ## Usage
//
// ```rust,ignore
// use nodeaddr_core::InterfaceSource;
//
// let source = /* InterfaceSource implementation */;
// for iface in source.interfaces()? {
//     println!("{}: {:?}", iface.name, iface.addresses);
// }
// ```

use crate::error::Result;
use crate::interface::NetworkInterface;

/// Trait for host interface enumeration
///
/// Every call returns a fresh snapshot. Implementations must not cache
/// across calls, since resolution is defined against the interfaces present
/// at the moment it runs.
///
/// Enumeration is blocking and synchronous. An OS-level failure is returned
/// as [`Error::Enumeration`](crate::Error::Enumeration) and is fatal to the
/// resolution that triggered it.
pub trait InterfaceSource: Send + Sync {
    /// List all interfaces on the host, in the order the OS reports them
    fn interfaces(&self) -> Result<Vec<NetworkInterface>>;

    /// Look up a single interface by exact name
    ///
    /// Returns `Ok(None)` when no interface has that name.
    fn interface_by_name(&self, name: &str) -> Result<Option<NetworkInterface>> {
        Ok(self
            .interfaces()?
            .into_iter()
            .find(|iface| iface.name == name))
    }
}
