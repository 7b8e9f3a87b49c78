//! Application configuration structures

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Discord-related configuration
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Web dashboard configuration
    #[serde(default)]
    pub web: WebConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSection,
}

impl Config {
    /// Validate every configuration section
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.discord.validate()?;
        self.database.validate()?;
        self.web.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Discord bot configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiscordConfig {
    /// Discord bot token. Usually supplied via the DISCORD_TOKEN environment
    /// variable rather than the config file.
    #[serde(default)]
    pub token: String,

    /// Default language for bot-authored embeds ("en", "pt" or "es").
    /// Unrecognized codes degrade to English at presentation time.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub request_timeout_seconds: u64,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            default_language: default_language(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default = "default_database_url")]
    #[validate(length(min = 1, message = "Database URL cannot be empty"))]
    pub url: String,

    /// Maximum number of database connections in the pool
    #[serde(default = "default_max_connections")]
    #[validate(range(min = 1, max = 100, message = "Max connections must be between 1 and 100"))]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Web dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WebConfig {
    /// Whether to serve the dashboard and JSON API
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Bind address for the web server
    #[serde(default = "default_bind")]
    #[validate(length(min = 1, message = "Bind address cannot be empty"))]
    pub bind: String,

    /// Port for the web server
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind: default_bind(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingSection {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub level: String,

    /// Optional log file path
    #[serde(default)]
    pub file: Option<String>,

    /// Whether to use colored console output
    #[serde(default = "default_true")]
    pub ansi: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            ansi: true,
        }
    }
}

impl From<LoggingSection> for warden_common::logging::LoggingConfig {
    fn from(section: LoggingSection) -> Self {
        Self {
            level: section.level,
            file_path: section.file,
            ansi: section.ansi,
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_database_url() -> String {
    "sqlite:warden.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate_all().is_ok());
        assert_eq!(config.discord.default_language, "en");
        assert_eq!(config.web.port, 5000);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let mut config = Config::default();
        config.database.max_connections = 0;
        assert!(config.validate_all().is_err());

        let mut config = Config::default();
        config.discord.request_timeout_seconds = 10_000;
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "discord:\n  default_language: pt\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.discord.default_language, "pt");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.web.enabled);
    }
}
