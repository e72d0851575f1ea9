//! `host:port` splitting and joining
//!
//! The port is split off at the last colon. A host containing colons must be
//! bracketed (`[2001:db8::1]:2377`). The port is not validated and may be
//! empty (`host:`).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a string could not be split into host and port
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitError {
    #[error("missing port in address")]
    MissingPort,
    #[error("too many colons in address")]
    TooManyColons,
    #[error("missing ']' in address")]
    MissingCloseBracket,
    #[error("unexpected '[' in address")]
    UnexpectedOpenBracket,
    #[error("unexpected ']' in address")]
    UnexpectedCloseBracket,
}

/// Split `host:port` or `[host]:port` into its parts
pub fn split_host_port(hostport: &str) -> Result<(&str, &str), SplitError> {
    let colon = hostport.rfind(':').ok_or(SplitError::MissingPort)?;

    let (host, host_start, host_end) = if hostport.starts_with('[') {
        let end = hostport.find(']').ok_or(SplitError::MissingCloseBracket)?;
        if end + 1 == hostport.len() {
            return Err(SplitError::MissingPort);
        }
        if end + 1 != colon {
            return Err(if hostport.as_bytes()[end + 1] == b':' {
                SplitError::TooManyColons
            } else {
                SplitError::MissingPort
            });
        }
        (&hostport[1..end], 1, end + 1)
    } else {
        let host = &hostport[..colon];
        if host.contains(':') {
            return Err(SplitError::TooManyColons);
        }
        (host, 0, 0)
    };

    if hostport[host_start..].contains('[') {
        return Err(SplitError::UnexpectedOpenBracket);
    }
    if hostport[host_end..].contains(']') {
        return Err(SplitError::UnexpectedCloseBracket);
    }

    Ok((host, &hostport[colon + 1..]))
}

/// Join a host and port, bracketing hosts that contain colons
pub fn join_host_port(host: &str, port: &str) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// A resolved `(host, port)` pair
///
/// `host` is a literal IP on every resolution path. `port` is empty only when
/// no port was ever specified or implied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub host: String,
    pub port: String,
}

impl ResolvedAddress {
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
        }
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port.is_empty() {
            f.write_str(&self.host)
        } else {
            f.write_str(&join_host_port(&self.host, &self.port))
        }
    }
}
