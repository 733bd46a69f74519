mod server;

pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FlowdashError, Result};

/// Root configuration for a flowdash deployment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowdashConfig {
    /// Dashboard API server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Where persisted settings live.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Outbound n8n client configuration.
    #[serde(default)]
    pub n8n: N8nClientConfig,
}

impl FlowdashConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| FlowdashError::Config(format!("Failed to read config file: {}", e)))?;

        Self::parse_toml(&content)
    }

    /// Load from a file if it exists, otherwise fall back to defaults.
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let content = substitute_env_vars(content);

        toml::from_str(&content)
            .map_err(|e| FlowdashError::Config(format!("Failed to parse config: {}", e)))
    }
}

/// Settings storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON key-value file holding the n8n settings.
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
        }
    }
}

fn default_settings_path() -> PathBuf {
    PathBuf::from(".flowdash/storage.json")
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Outbound HTTP client configuration for the live path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct N8nClientConfig {
    /// Request timeout in seconds. Unset means requests never time out.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Substitute environment variables in the format ${VAR_NAME}.
fn substitute_env_vars(content: &str) -> String {
    let mut result = content.to_string();
    let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
        return result;
    };

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FlowdashConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(config.n8n.timeout_secs.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = FlowdashConfig::parse_toml("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.storage.settings_path,
            PathBuf::from(".flowdash/storage.json")
        );
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 3000

            [storage]
            settings_path = "/var/lib/flowdash/storage.json"

            [logging]
            level = "debug"
            json = true

            [n8n]
            timeout_secs = 15
        "#;

        let config = FlowdashConfig::parse_toml(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.storage.settings_path,
            PathBuf::from("/var/lib/flowdash/storage.json")
        );
        assert!(config.logging.json);
        assert_eq!(config.n8n.timeout_secs, Some(15));
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let err = FlowdashConfig::parse_toml("[server]\nport = \"nope\"").unwrap_err();
        assert!(matches!(err, FlowdashError::Config(_)));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FLOWDASH_TEST_PORT", "4100");

        let toml = r#"
            [server]
            port = ${FLOWDASH_TEST_PORT}
        "#;

        let config = FlowdashConfig::parse_toml(toml).unwrap();
        assert_eq!(config.server.port, 4100);

        std::env::remove_var("FLOWDASH_TEST_PORT");
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = FlowdashConfig::from_file_or_default("/nonexistent/flowdash.toml").unwrap();
        assert_eq!(config.server.port, 8080);
    }
}
