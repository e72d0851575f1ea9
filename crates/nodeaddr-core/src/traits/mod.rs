//! Collaborator traits for address resolution
//!
//! - [`InterfaceSource`]: Enumerate the host's network interfaces
//! - [`SubnetProvider`]: Subnets owned by the container/cluster runtime

pub mod interface_source;
pub mod subnet_provider;

pub use interface_source::InterfaceSource;
pub use subnet_provider::SubnetProvider;
