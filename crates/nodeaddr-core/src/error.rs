//! Error types for address resolution
//!
//! Every resolution failure is terminal and reported to the caller. Nothing in
//! this crate retries or recovers locally.

use thiserror::Error;

use crate::interface::IpVersion;

/// Result type alias for resolution operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for address resolution
#[derive(Error, Debug)]
pub enum Error {
    /// The listen address is not parseable as `host:port`
    #[error("could not parse listen address {addr}: {reason}")]
    MalformedListenAddr {
        /// The address as given
        addr: String,
        /// Why splitting failed
        reason: String,
    },

    /// The name does not match any interface on the host
    ///
    /// Only produced by the interface lookup. The listen and advertise
    /// resolvers turn it into a literal IP parse attempt.
    #[error("no such interface: {0}")]
    NoSuchInterface(String),

    /// Listen host is neither an interface nor a literal IP
    #[error(
        "listen address must be an IP address or network interface (with optional port number), got {0:?}"
    )]
    BadListenAddr(String),

    /// Advertise host is neither an interface nor a literal IP
    #[error(
        "advertise address must be an IP address or network interface (with optional port number), got {0:?}"
    )]
    BadAdvertiseAddr(String),

    /// Default advertise address is neither an interface nor a literal IP
    #[error(
        "default advertise address must be an IP address or network interface (without a port number), got {0:?}"
    )]
    BadDefaultAdvertiseAddr(String),

    /// A named interface carries more than one address of a version
    #[error("interface {interface} has more than one {version} address")]
    AmbiguousInterfaceAddress {
        /// Interface name
        interface: String,
        /// The version with more than one address
        version: IpVersion,
    },

    /// A named interface carries no IP address at all
    #[error("interface {0} has no usable IPv4 or IPv6 address")]
    NoUsableAddress(String),

    /// Autodetection found more than one candidate
    #[error("could not choose an IP address to advertise since this system has multiple addresses")]
    MultipleIps,

    /// Autodetection found no candidate
    #[error("could not find the system's IP address")]
    NoIp,

    /// Listen host is unspecified and the advertise address is not local
    #[error(
        "must specify a listening address because the address to advertise is not recognized as a system address"
    )]
    MustSpecifyListenAddr,

    /// Interface enumeration failed at the OS level
    #[error("interface enumeration failed: {0}")]
    Enumeration(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fieldless discriminant of [`Error`], for comparing errors by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedListenAddr,
    NoSuchInterface,
    BadListenAddr,
    BadAdvertiseAddr,
    BadDefaultAdvertiseAddr,
    AmbiguousInterfaceAddress,
    NoUsableAddress,
    MultipleIps,
    NoIp,
    MustSpecifyListenAddr,
    Enumeration,
    Config,
    Json,
}

impl Error {
    /// Create a malformed listen address error
    pub fn malformed_listen_addr(addr: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedListenAddr {
            addr: addr.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an ambiguous interface address error
    pub fn ambiguous(interface: impl Into<String>, version: IpVersion) -> Self {
        Self::AmbiguousInterfaceAddress {
            interface: interface.into(),
            version,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedListenAddr { .. } => ErrorKind::MalformedListenAddr,
            Self::NoSuchInterface(_) => ErrorKind::NoSuchInterface,
            Self::BadListenAddr(_) => ErrorKind::BadListenAddr,
            Self::BadAdvertiseAddr(_) => ErrorKind::BadAdvertiseAddr,
            Self::BadDefaultAdvertiseAddr(_) => ErrorKind::BadDefaultAdvertiseAddr,
            Self::AmbiguousInterfaceAddress { .. } => ErrorKind::AmbiguousInterfaceAddress,
            Self::NoUsableAddress(_) => ErrorKind::NoUsableAddress,
            Self::MultipleIps => ErrorKind::MultipleIps,
            Self::NoIp => ErrorKind::NoIp,
            Self::MustSpecifyListenAddr => ErrorKind::MustSpecifyListenAddr,
            Self::Enumeration(_) => ErrorKind::Enumeration,
            Self::Config(_) => ErrorKind::Config,
            Self::Json(_) => ErrorKind::Json,
        }
    }
}
