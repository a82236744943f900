//! Configuration management module for lan-notifier
//!
//! Layered configuration loading with support for TOML files, environment
//! variable overrides and per-environment files.
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local overrides (not committed to version control)
//! 4. `LAN_NOTIFIER_*` environment variables
//! 5. Plain variables such as `PORT` or `SLACK_TOKEN`

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, LoggerSettings, PlatformsConfig, ServerConfig, Settings, SlackConfig,
    TelegramConfig, WhatsAppConfig,
};
