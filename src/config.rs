//! Server configuration

use serde::{Deserialize, Serialize};

/// Request limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum upload size in megabytes
    pub max_upload_mb: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_upload_mb: 10 }
    }
}

impl LimitsConfig {
    /// Get maximum upload size in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

/// Conversion defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Run text correction unless the request says otherwise
    pub correction_enabled: bool,

    /// Attach language detection to conversion results
    pub detect_language: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            correction_enabled: false,
            detect_language: true,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (pretty, json)
    pub log_format: String,

    /// Request limits
    pub limits: LimitsConfig,

    /// Conversion defaults
    pub conversion: ConversionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_enabled: true,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            limits: LimitsConfig::default(),
            conversion: ConversionConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default tracing filter directive for the configured log level
    pub fn log_filter(&self) -> String {
        format!(
            "subvtt_server={level},subvtt_lib={level},tower_http={level}",
            level = self.log_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.limits.max_upload_mb, 10);
        assert!(!config.conversion.correction_enabled);
        assert!(config.conversion.detect_language);
    }

    #[test]
    fn test_max_upload_bytes() {
        let limits = LimitsConfig { max_upload_mb: 2 };
        assert_eq!(limits.max_upload_bytes(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_log_filter() {
        let config = ServerConfig {
            log_level: "debug".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.log_filter(),
            "subvtt_server=debug,subvtt_lib=debug,tower_http=debug"
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ServerConfig = toml::from_str("port = 9000\n[limits]\n").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.limits.max_upload_mb, 10);
    }
}
