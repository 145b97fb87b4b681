//! Command line and environment configuration.
//!
//! One binary, one subcommand per role. Every flag can also be supplied through the
//! environment variable named next to it.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::discovery::agent::DEFAULT_HEARTBEAT_INTERVAL;
use crate::discovery::balancer::{RandomSelection, RoundRobinSelection, SelectionPolicy};
use crate::registry::store::DEFAULT_TTL;

pub const DEFAULT_REGISTRY_URL: &str = "http://127.0.0.1:8000";

/// Library Mesh - service registry, gateway and library backends
#[derive(Parser, Debug, Clone)]
#[command(name = "library-mesh")]
#[command(about = "Distributed library platform: registry, gateway, catalog, readers, loans")]
pub struct Cli {
    /// Log level or full tracing filter (e.g. "info", "library_mesh=debug")
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the discovery registry
    Registry(RegistryArgs),
    /// Run the reverse-proxy gateway
    Gateway(GatewayArgs),
    /// Run the book catalog service
    Catalog(ServiceArgs),
    /// Run the reader service
    Readers(ServiceArgs),
    /// Run the loan service
    Loans(ServiceArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RegistryArgs {
    /// Address to listen on
    #[arg(long, env = "BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Seconds without a heartbeat after which an instance is dead
    #[arg(long, env = "TTL_SECS", default_value_t = DEFAULT_TTL.as_secs())]
    pub ttl_secs: u64,

    /// Run a background sweep every N seconds (off by default; expiry is lazy)
    #[arg(long, env = "SWEEP_INTERVAL_SECS")]
    pub sweep_interval_secs: Option<u64>,
}

impl RegistryArgs {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        self.sweep_interval_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.ttl_secs == 0 {
            return Err("TTL_SECS must be greater than zero".to_string());
        }

        if self.sweep_interval_secs == Some(0) {
            return Err("SWEEP_INTERVAL_SECS must be greater than zero".to_string());
        }

        Ok(())
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalancerKind {
    #[default]
    Random,
    RoundRobin,
}

impl BalancerKind {
    pub fn policy(self) -> Arc<dyn SelectionPolicy> {
        match self {
            BalancerKind::Random => Arc::new(RandomSelection),
            BalancerKind::RoundRobin => Arc::new(RoundRobinSelection::default()),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct GatewayArgs {
    /// Address to listen on
    #[arg(long, env = "BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Base URL of the discovery registry
    #[arg(long, env = "REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
    pub registry_url: String,

    /// Instance selection policy
    #[arg(long, env = "BALANCER", value_enum, default_value_t = BalancerKind::Random)]
    pub balancer: BalancerKind,
}

impl GatewayArgs {
    pub fn validate(&self) -> Result<(), String> {
        validate_registry_url(&self.registry_url)
    }
}

/// Shared by the catalog, readers and loans subcommands.
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Host to bind and to advertise to the registry
    #[arg(long, env = "SERVICE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind and advertise (defaults per service: 8001, 8002, 8003)
    #[arg(long, env = "SERVICE_PORT")]
    pub port: Option<u16>,

    /// Logical name to register under (defaults to the subcommand name)
    #[arg(long, env = "SERVICE_NAME")]
    pub name: Option<String>,

    /// Base URL of the discovery registry
    #[arg(long, env = "REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
    pub registry_url: String,

    /// Seconds between heartbeats; keep it well below the registry TTL
    #[arg(long, env = "HEARTBEAT_INTERVAL_SECS", default_value_t = DEFAULT_HEARTBEAT_INTERVAL.as_secs())]
    pub heartbeat_interval_secs: u64,

    /// Instance selection policy for outbound calls (loans only)
    #[arg(long, env = "BALANCER", value_enum, default_value_t = BalancerKind::Random)]
    pub balancer: BalancerKind,
}

impl ServiceArgs {
    pub fn port_or(&self, default: u16) -> u16 {
        self.port.unwrap_or(default)
    }

    pub fn name_or(&self, default: &str) -> String {
        self.name.clone().unwrap_or_else(|| default.to_string())
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.heartbeat_interval_secs == 0 {
            return Err("HEARTBEAT_INTERVAL_SECS must be greater than zero".to_string());
        }

        if self.host.trim().is_empty() {
            return Err("SERVICE_HOST must not be empty".to_string());
        }

        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("SERVICE_NAME must not be empty".to_string());
        }

        validate_registry_url(&self.registry_url)
    }
}

fn validate_registry_url(url: &str) -> Result<(), String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(format!(
            "REGISTRY_URL must be an http(s) URL, got '{}'",
            url
        ))
    }
}
