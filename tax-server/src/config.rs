use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::Parser;

/// Progressive personal income tax calculation service.
///
/// Every option can also be supplied through the environment variable shown
/// in `--help`; command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "tax-server", version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Log filter used when `RUST_LOG` is not set.
    /// Accepts a bare level ("info", "debug", ...) or a full filter directive.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Seconds to wait for in-flight requests to finish after a shutdown signal.
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value_t = 10)]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            log_level: "info".to_string(),
            shutdown_timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}
