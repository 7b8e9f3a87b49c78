//! Configuration loading and validation for Warden

pub mod loader;
pub mod settings;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{Config, DatabaseConfig, DiscordConfig, LoggingSection, WebConfig};
