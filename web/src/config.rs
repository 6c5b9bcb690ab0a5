//! Configuration management for the web server.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

impl ServerConfig {
    /// Loads configuration from `TICKETLINE_HOST` / `TICKETLINE_PORT`,
    /// falling back to `127.0.0.1:8080`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            host: env::var("TICKETLINE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("TICKETLINE_PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Socket address string to bind the listener to
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }
}
