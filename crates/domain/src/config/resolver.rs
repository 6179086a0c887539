use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

/// DNS server every lookup is sent to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Server address, either `ip` or `ip:port` (default: "8.8.8.8")
    #[serde(default = "default_server")]
    pub server: String,

    /// Port used when `server` does not carry one (default: 53)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-query timeout in milliseconds (default: 2000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retry over TCP when a UDP answer comes back truncated (default: true)
    #[serde(default = "default_true")]
    pub tcp_fallback: bool,
}

impl ResolverConfig {
    /// Resolves `server` + `port` into the socket address to query.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let server = self.server.trim();

        if let Ok(addr) = server.parse::<SocketAddr>() {
            return Ok(addr);
        }

        server
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.port))
            .map_err(|_| {
                ConfigError::Validation(format!(
                    "DNS server '{}' must be an IP address, optionally with a port",
                    self.server
                ))
            })
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            port: default_port(),
            timeout_ms: default_timeout_ms(),
            tcp_fallback: true,
        }
    }
}

fn default_server() -> String {
    "8.8.8.8".to_string()
}

fn default_port() -> u16 {
    53
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_true() -> bool {
    true
}
