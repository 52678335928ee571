//! Configuration file support
//!
//! Loads server configuration from sectioned TOML files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{ConversionConfig, LimitsConfig, ServerConfig};
use crate::error::{Result, ServerError};

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: ServerSettings,
    /// Limits settings
    pub limits: Option<LimitsSettings>,
    /// Conversion settings
    pub conversion: Option<ConversionSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSettings {
    /// Maximum upload size in MB
    pub max_upload_mb: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionSettings {
    /// Run text correction by default
    pub correction_enabled: Option<bool>,
    /// Attach language detection to results
    pub detect_language: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
                cors_enabled: Some(true),
            },
            limits: Some(LimitsSettings {
                max_upload_mb: Some(10),
            }),
            conversion: Some(ConversionSettings {
                correction_enabled: Some(false),
                detect_language: Some(true),
            }),
            logging: Some(LoggingSettings {
                level: "info".to_string(),
                format: Some("pretty".to_string()),
            }),
        }
    }

    /// Convert to ServerConfig
    pub fn into_server_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        let limits = self.limits.map_or(defaults.limits.clone(), |l| LimitsConfig {
            max_upload_mb: l.max_upload_mb.unwrap_or(defaults.limits.max_upload_mb),
        });
        let conversion = self
            .conversion
            .map_or(defaults.conversion.clone(), |c| ConversionConfig {
                correction_enabled: c
                    .correction_enabled
                    .unwrap_or(defaults.conversion.correction_enabled),
                detect_language: c
                    .detect_language
                    .unwrap_or(defaults.conversion.detect_language),
            });
        let (log_level, log_format) = match self.logging {
            Some(logging) => (
                logging.level,
                logging.format.unwrap_or(defaults.log_format.clone()),
            ),
            None => (defaults.log_level.clone(), defaults.log_format.clone()),
        };

        ServerConfig {
            host: self.server.host,
            port: self.server.port,
            cors_enabled: self.server.cors_enabled.unwrap_or(defaults.cors_enabled),
            log_level,
            log_format,
            limits,
            conversion,
        }
    }
}

/// Load the server configuration from `path`; a missing file yields defaults
pub fn load_server_config(path: &str) -> Result<ServerConfig> {
    if !Path::new(path).exists() {
        return Ok(ServerConfig::default());
    }
    Ok(ConfigFile::from_file(path)?.into_server_config())
}
