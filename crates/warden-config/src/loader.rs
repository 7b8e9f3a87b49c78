//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::Path;
use thiserror::Error;
use warden_common::Result as WardenResult;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for warden_common::WardenError {
    fn from(err: ConfigError) -> Self {
        warden_common::WardenError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from the default locations.
    ///
    /// Checks `WARDEN_CONFIG_PATH`, then `config.yaml`/`config.yml` in the
    /// working directory, and falls back to built-in defaults with
    /// environment overrides applied.
    pub fn load() -> WardenResult<Config> {
        let config = if let Ok(config_path) = env::var("WARDEN_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate_all().map_err(ConfigError::Validation)?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> WardenResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(token) = env::var("DISCORD_TOKEN") {
            config.discord.token = token;
        }

        if let Ok(language) = env::var("WARDEN_DEFAULT_LANGUAGE") {
            config.discord.default_language = language;
        }

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database.url = url;
        }

        if let Ok(bind) = env::var("WARDEN_WEB_BIND") {
            config.web.bind = bind;
        }

        if let Ok(port) = env::var("WARDEN_WEB_PORT") {
            config.web.port = port.parse().map_err(|e| ConfigError::EnvParse {
                var: "WARDEN_WEB_PORT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(level) = env::var("WARDEN_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(file) = env::var("WARDEN_LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "discord:\n  default_language: es\nweb:\n  port: 8088\n"
        )
        .unwrap();

        let config = ConfigLoader::load_config(file.path()).unwrap();
        assert_eq!(config.discord.default_language, "es");
        assert_eq!(config.web.port, 8088);
        // Untouched sections keep their defaults.
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "discord: [not, a, mapping").unwrap();

        assert!(matches!(
            ConfigLoader::load_config(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_failure_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "database:\n  max_connections: 0\n").unwrap();

        assert!(matches!(
            ConfigLoader::load_config(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_config_error_converts_to_common_error() {
        let err: warden_common::WardenError =
            ConfigError::EnvParse {
                var: "WARDEN_WEB_PORT".to_string(),
                source: "bad port".into(),
            }
            .into();

        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("WARDEN_WEB_PORT"));
    }
}
