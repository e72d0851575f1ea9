// # nodeaddr-resolve
//
// Resolves a node's cluster addresses against the live host and prints them.
//
// This binary is a THIN integration layer. All resolution logic lives in
// nodeaddr-core; this file only reads configuration, sets up logging and
// reports the outcome.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `NODEADDR_CONFIG`: Optional JSON config file (env vars below override it)
// - `NODEADDR_LISTEN_ADDR`: `host:port` to listen on (default `0.0.0.0:2377`)
// - `NODEADDR_ADVERTISE_ADDR`: `host[:port]` to advertise
// - `NODEADDR_DEFAULT_ADVERTISE_ADDR`: Fallback advertise host (no port)
// - `NODEADDR_MANAGED_SUBNETS`: Comma-separated runtime-owned CIDRs
// - `NODEADDR_LOG_LEVEL`: trace, debug, info, warn or error (default info)
//
// ## Example
//
// ```bash
// export NODEADDR_LISTEN_ADDR=eth0:2377
// export NODEADDR_MANAGED_SUBNETS=172.17.0.0/16,fd00:dead::/64
//
// nodeaddr-resolve
// ```

use anyhow::{Context, Result};
use ipnet::IpNet;
use nodeaddr_core::{AddressResolver, ManagedSubnets, NodeAddrConfig};
use nodeaddr_netdev::NetdevInterfaceSource;
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:2377";

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum ResolveExitCode {
    /// Addresses resolved
    Resolved = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Resolution failed
    ResolutionError = 2,
}

impl From<ResolveExitCode> for ExitCode {
    fn from(code: ResolveExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application settings
struct Settings {
    config: NodeAddrConfig,
    log_level: String,
}

impl Settings {
    /// Load settings from the optional config file and environment variables
    fn from_env() -> Result<Self> {
        let mut config = match env::var("NODEADDR_CONFIG") {
            Ok(path) => NodeAddrConfig::load(&path)
                .with_context(|| format!("failed to load NODEADDR_CONFIG={path}"))?,
            Err(_) => NodeAddrConfig::new(DEFAULT_LISTEN_ADDR),
        };

        if let Ok(listen) = env::var("NODEADDR_LISTEN_ADDR") {
            config.listen_addr = listen;
        }
        if let Ok(advertise) = env::var("NODEADDR_ADVERTISE_ADDR") {
            config.advertise_addr = Some(advertise);
        }
        if let Ok(default_advertise) = env::var("NODEADDR_DEFAULT_ADVERTISE_ADDR") {
            config.default_advertise_addr = Some(default_advertise);
        }
        if let Ok(subnets) = env::var("NODEADDR_MANAGED_SUBNETS") {
            config.managed_subnets = parse_subnets(&subnets)?;
        }

        Ok(Self {
            config,
            log_level: env::var("NODEADDR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the settings
    fn validate(&self) -> Result<()> {
        self.config.validate()?;

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "NODEADDR_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    fn tracing_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// Parse a comma-separated list of CIDRs of either IP version
fn parse_subnets(list: &str) -> Result<ManagedSubnets> {
    let nets = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<IpNet>()
                .with_context(|| format!("NODEADDR_MANAGED_SUBNETS: invalid subnet '{s}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ManagedSubnets::from_nets(nets))
}

fn main() -> ExitCode {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return ResolveExitCode::ConfigError.into();
        }
    };

    if let Err(e) = settings.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return ResolveExitCode::ConfigError.into();
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(settings.tracing_level())
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return ResolveExitCode::ConfigError.into();
    }

    let config = &settings.config;
    info!(
        listen = %config.listen_addr,
        managed_v4 = config.managed_subnets.v4.len(),
        managed_v6 = config.managed_subnets.v6.len(),
        "resolving node addresses"
    );

    let resolver = AddressResolver::from_config(NetdevInterfaceSource::new(), config);
    match resolver.resolve(&config.listen_addr, config.advertise_addr().unwrap_or_default()) {
        Ok(addrs) => {
            info!(listen = %addrs.listen, advertise = %addrs.advertise, local = %addrs.local, "resolved");
            println!("listen={}", addrs.listen);
            println!("advertise={}", addrs.advertise);
            println!("local={}", addrs.local);
            ResolveExitCode::Resolved.into()
        }
        Err(e) => {
            error!(kind = ?e.kind(), "resolution failed: {}", e);
            ResolveExitCode::ResolutionError.into()
        }
    }
}
