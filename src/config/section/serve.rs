//! `[serve]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 5277                 # HTTP port number
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the preview reachable from the LAN.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Preview server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5277,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = test_parse_config("[serve]\nport = 8080");
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.serve.interface, IpAddr::V4(Ipv4Addr::LOCALHOST));

        let config = test_parse_config("[serve]\ninterface = \"::1\"");
        assert_eq!(config.serve.interface, IpAddr::V6(Ipv6Addr::LOCALHOST));
        assert_eq!(config.serve.port, 5277);
    }

    #[test]
    fn test_invalid_interface_rejected() {
        let result = crate::config::SiteConfig::parse_with_ignored("[serve]\ninterface = \"localhost\"");
        assert!(result.is_err());
    }
}
