//! Configuration module
//!
//! Loads `AppConfig` from a TOML file (default
//! `~/.config/parkpoint/config.toml`, overridable with the
//! `PARKPOINT_CONFIG` environment variable). Every section falls back to
//! sane defaults when missing, so an empty file is a valid config.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub lifecycle: LifecycleConfig,
    pub admin: AdminBootstrapConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Path to the SQLite file
    pub path: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: "./parkpoint.db".to_string(),
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path)
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Reservation lifecycle settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Interval of the background no-show sweep, in seconds
    pub sweep_interval_secs: u64,
    /// Set to false to rely only on the opportunistic sweep in the
    /// parked-vehicles read path
    pub background_sweep: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: 60,
            background_sweep: true,
        }
    }
}

/// Bootstrap superadmin created on first start when no admin exists
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminBootstrapConfig {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Default for AdminBootstrapConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            email: "admin@parkpoint.local".to_string(),
            password: "change-me-now".to_string(),
            first_name: "Default".to_string(),
            last_name: "Admin".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }
}

/// Default config file location (~/.config/parkpoint/config.toml)
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("parkpoint")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.api_port, 8080);
        assert_eq!(cfg.database.path, "./parkpoint.db");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.lifecycle.sweep_interval_secs, 60);
        assert!(cfg.lifecycle.background_sweep);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            api_port = 9090

            [lifecycle]
            background_sweep = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.api_port, 9090);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert!(!cfg.lifecycle.background_sweep);
        assert_eq!(cfg.lifecycle.sweep_interval_secs, 60);
    }

    #[test]
    fn connection_url_is_sqlite_rwc() {
        let db = DatabaseSection {
            path: "/tmp/test.db".to_string(),
        };
        assert_eq!(db.connection_url(), "sqlite:///tmp/test.db?mode=rwc");
    }
}
