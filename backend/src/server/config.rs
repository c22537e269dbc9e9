//! Application configuration loaded via OrthoConfig.
//!
//! Values merge from CLI arguments, `MARKETPLACE_`-prefixed environment
//! variables, and configuration files, in that precedence order.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Runtime settings for the HTTP server and storage layer.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MARKETPLACE")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Required.
    pub database_url: Option<String>,
    /// Maximum connections held by the pool.
    pub max_connections: Option<u32>,
}

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

impl AppSettings {
    /// Bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Pool size, falling back to the default.
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = AppSettings {
            bind_addr: None,
            database_url: None,
            max_connections: None,
        };
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080");
        assert_eq!(settings.max_connections(), 10);
    }

    #[rstest]
    fn explicit_values_win() {
        let settings = AppSettings {
            bind_addr: Some("127.0.0.1:9000".to_owned()),
            database_url: Some("postgres://localhost/marketplace".to_owned()),
            max_connections: Some(4),
        };
        assert_eq!(settings.bind_addr(), "127.0.0.1:9000");
        assert_eq!(settings.max_connections(), 4);
    }
}
