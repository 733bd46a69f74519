use serde::{Deserialize, Serialize};

/// Dashboard API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// API path prefix.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
        }
    }
}

impl ServerConfig {
    /// Socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_api_prefix() -> String {
    "/_api".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig {
            host: "0.0.0.0".into(),
            port: 9090,
            ..Default::default()
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:9090");
        assert_eq!(config.api_prefix, "/_api");
    }
}
