//! Error types and utilities for Warden

use thiserror::Error;

/// Result type alias for Warden operations
pub type Result<T> = std::result::Result<T, WardenError>;

/// Main error type for Warden operations
#[derive(Error, Debug)]
pub enum WardenError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Discord API related errors
    #[error("Discord API error: {message}")]
    Discord { message: String },

    /// Database related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Localization related errors
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with custom message
    #[error("{message}")]
    Generic { message: String },
}

impl WardenError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a new Discord API error
    pub fn discord(msg: impl Into<String>) -> Self {
        Self::Discord {
            message: msg.into(),
        }
    }

    /// Create a new localization error
    pub fn localization(msg: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: None,
        }
    }

    /// Create a new localization error scoped to a locale
    pub fn localization_with_locale(msg: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: Some(locale.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let error = WardenError::new("test message");
        assert_eq!(error.to_string(), "test message");

        let config_error = WardenError::config("config issue");
        assert_eq!(config_error.to_string(), "Configuration error: config issue");

        let discord_error = WardenError::discord("rate limited");
        assert_eq!(discord_error.to_string(), "Discord API error: rate limited");

        let validation_error = WardenError::validation_field("Invalid input", "username");
        assert!(validation_error.to_string().contains("Invalid input"));

        let localization_error = WardenError::localization_with_locale("missing key", "pt");
        assert!(localization_error.to_string().contains("Localization error"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let warden_error: WardenError = io_error.into();

        assert!(warden_error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let invalid_json = r#"{"invalid": json}"#;
        let serde_error = serde_json::from_str::<serde_json::Value>(invalid_json).unwrap_err();
        let warden_error: WardenError = serde_error.into();

        assert!(warden_error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Ok("success".to_string())
        }

        fn returns_error() -> Result<String> {
            Err(WardenError::new("failure"))
        }

        assert!(returns_result().is_ok());
        assert!(returns_error().is_err());
    }
}
