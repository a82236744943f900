//! Configuration loader for lan-notifier
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "LAN_NOTIFIER_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "LAN_NOTIFIER_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "LAN_NOTIFIER";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Unprefixed variables and the keys they override.
///
/// These take precedence over every other source.
const PLAIN_ENV_ALIASES: &[(&str, &str)] = &[
    ("HOST", "server.host"),
    ("PORT", "server.port"),
    ("DEBUG", "application.debug"),
    ("SLACK_TOKEN", "platforms.slack.token"),
    ("SLACK_CHANNEL", "platforms.slack.channel"),
    ("TELEGRAM_TOKEN", "platforms.telegram.token"),
    ("TELEGRAM_CHAT_ID", "platforms.telegram.chat_id"),
    ("TWILIO_ACCOUNT_SID", "platforms.whatsapp.account_sid"),
    ("TWILIO_AUTH_TOKEN", "platforms.whatsapp.auth_token"),
    ("TWILIO_FROM_NUMBER", "platforms.whatsapp.from_number"),
    ("WHATSAPP_TO_NUMBER", "platforms.whatsapp.to_number"),
];

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml` - Base default configuration (optional)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local overrides (optional)
/// 4. `LAN_NOTIFIER_*` environment variables
/// 5. Plain variables such as `PORT` and `SLACK_TOKEN` (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// If set, layered loading is skipped
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// This reads environment variables to determine:
    /// - Configuration directory (`LAN_NOTIFIER_CONFIG_DIR`)
    /// - Specific configuration file (`LAN_NOTIFIER_CONFIG_FILE`)
    /// - Application environment (`LAN_NOTIFIER_APP_ENV`)
    ///
    /// # Errors
    ///
    /// Returns an error if both `LAN_NOTIFIER_CONFIG_DIR` and
    /// `LAN_NOTIFIER_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && config_dir_var.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "LAN_NOTIFIER_CONFIG_DIR and LAN_NOTIFIER_CONFIG_FILE cannot both be set. \
                 Use LAN_NOTIFIER_CONFIG_DIR for layered configuration or \
                 LAN_NOTIFIER_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: config_dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Switch to single-file mode with the given file.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override the environment read from `LAN_NOTIFIER_APP_ENV`.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Load configuration from all sources
    ///
    /// If a config file is set, loads only that file. Otherwise, performs
    /// layered loading from the configuration directory. Debug mode is
    /// applied before validation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The single config file does not exist
    /// - Configuration parsing fails
    /// - Configuration validation fails, including when no platform is configured
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let mut settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.apply_debug_mode();
        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder),
        };

        // LAN_NOTIFIER_SERVER__PORT -> server.port
        let builder = Self::add_env_source(builder);
        let builder = Self::add_plain_env_overrides(builder)?;

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(&self, builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        let layers = [
            "default.toml".to_string(),
            format!("{}.toml", self.environment.as_str()),
            "local.toml".to_string(),
        ];

        layers.iter().fold(builder, |builder, name| {
            let path = self.config_dir.join(name);
            builder.add_source(
                File::new(&path.to_string_lossy(), FileFormat::Toml).required(false),
            )
        })
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(&path.to_string_lossy(), FileFormat::Toml).required(required),
        ))
    }

    /// Environment variables with prefix `LAN_NOTIFIER_` are mapped to
    /// configuration keys, with `__` separating nested keys.
    ///
    /// Values are kept as strings so phone numbers keep their leading `+`;
    /// numeric and boolean fields are converted during deserialization.
    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true),
        )
    }

    fn add_plain_env_overrides(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        PLAIN_ENV_ALIASES
            .iter()
            .try_fold(builder, |builder, (var, key)| {
                let value = std::env::var(var).ok().filter(|v| !v.is_empty());
                builder.set_override_option(*key, value)
            })
            .map_err(ConfigError::from)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::default(),
        })
    }
}
