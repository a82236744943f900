//! Configuration settings structures for lan-notifier
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "lan-notifier".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/lan-notifier.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_slack_channel() -> String {
    "#general".to_string()
}

fn default_slack_api_base_url() -> String {
    "https://slack.com/api".to_string()
}

fn default_telegram_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_twilio_api_base_url() -> String {
    "https://api.twilio.com".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version reported by `/health`
    #[serde(default = "default_app_version")]
    pub version: String,

    /// Debug mode; raises the log level to `debug` when set
    #[serde(default)]
    pub debug: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
            debug: false,
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ============================================================================
// Logger Configuration
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to LoggerConfig
    ///
    /// This method transforms the configuration file representation into
    /// the runtime LoggerConfig used by the logger module.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console_config = self.console.into_console_config();
        let file_config = self.file.into_file_config()?;

        LoggerConfig::new(console_config, file_config, self.level).map_err(|e| {
            ConfigError::ValidationError {
                field: "logger".to_string(),
                message: e.to_string(),
            }
        })
    }
}

impl ConsoleSettings {
    /// Convert ConsoleSettings to ConsoleConfig
    pub fn into_console_config(self) -> ConsoleConfig {
        ConsoleConfig::new(self.enabled, self.colored)
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self.parse_format()?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format).map_err(
            |e| ConfigError::ValidationError {
                field: "logger.file".to_string(),
                message: e.to_string(),
            },
        )
    }

    fn parse_format(&self) -> Result<LogFormat, ConfigError> {
        self.format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })
    }
}

// ============================================================================
// Platform Configuration
// ============================================================================

/// Slack Web API credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Bot token (`xoxb-...`); the platform is disabled while empty
    #[serde(default)]
    pub token: String,

    /// Destination channel
    #[serde(default = "default_slack_channel")]
    pub channel: String,

    /// Web API base URL
    #[serde(default = "default_slack_api_base_url")]
    pub api_base_url: String,
}

impl SlackConfig {
    /// A token alone is not enough; messages need a target channel too.
    pub fn is_enabled(&self) -> bool {
        !self.token.is_empty() && !self.channel.is_empty()
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            channel: default_slack_channel(),
            api_base_url: default_slack_api_base_url(),
        }
    }
}

/// Telegram Bot API credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    #[serde(default)]
    pub token: String,

    /// Destination chat id (numeric id or `@channelusername`)
    #[serde(default)]
    pub chat_id: String,

    /// Bot API base URL
    #[serde(default = "default_telegram_api_base_url")]
    pub api_base_url: String,
}

impl TelegramConfig {
    pub fn is_enabled(&self) -> bool {
        !self.token.is_empty() && !self.chat_id.is_empty()
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            chat_id: String::new(),
            api_base_url: default_telegram_api_base_url(),
        }
    }
}

/// Twilio credentials for WhatsApp delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Twilio account SID
    #[serde(default)]
    pub account_sid: String,

    /// Twilio auth token
    #[serde(default)]
    pub auth_token: String,

    /// Sender number, with or without the `whatsapp:` prefix
    #[serde(default)]
    pub from_number: String,

    /// Recipient number, with or without the `whatsapp:` prefix
    #[serde(default)]
    pub to_number: String,

    /// Twilio REST API base URL
    #[serde(default = "default_twilio_api_base_url")]
    pub api_base_url: String,
}

impl WhatsAppConfig {
    pub fn is_enabled(&self) -> bool {
        !self.account_sid.is_empty()
            && !self.auth_token.is_empty()
            && !self.from_number.is_empty()
            && !self.to_number.is_empty()
    }
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            to_number: String::new(),
            api_base_url: default_twilio_api_base_url(),
        }
    }
}

/// Credentials for every supported platform.
///
/// A platform is enabled iff all of its required fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlatformsConfig {
    #[serde(default)]
    pub slack: SlackConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
}

impl PlatformsConfig {
    /// Number of platforms with complete credentials
    pub fn enabled_count(&self) -> usize {
        [
            self.slack.is_enabled(),
            self.telegram.is_enabled(),
            self.whatsapp.is_enabled(),
        ]
        .into_iter()
        .filter(|enabled| *enabled)
        .count()
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,

    /// Platform credentials
    #[serde(default)]
    pub platforms: PlatformsConfig,
}

impl Settings {
    /// Apply the `debug` flag to the logger level.
    ///
    /// Debug mode always wins over the configured level; CLI flags applied
    /// afterwards may still override it.
    pub fn apply_debug_mode(&mut self) {
        if self.application.debug {
            self.logger.level = "debug".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ========================================================================
    // Arbitrary implementations for property-based testing
    // ========================================================================

    fn arb_application_config() -> impl Strategy<Value = ApplicationConfig> {
        (
            "[a-z][a-z0-9-]{0,20}",
            "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}",
            any::<bool>(),
        )
            .prop_map(|(name, version, debug)| ApplicationConfig {
                name,
                version,
                debug,
            })
    }

    fn arb_server_config() -> impl Strategy<Value = ServerConfig> {
        (
            prop_oneof![
                Just("127.0.0.1".to_string()),
                Just("0.0.0.0".to_string()),
                Just("localhost".to_string()),
            ],
            1u16..=65535u16,
        )
            .prop_map(|(host, port)| ServerConfig { host, port })
    }

    fn arb_file_settings() -> impl Strategy<Value = FileSettings> {
        (
            any::<bool>(),
            prop_oneof![
                Just("logs/lan-notifier.log".to_string()),
                Just("/var/log/lan-notifier.log".to_string()),
            ],
            any::<bool>(),
            prop_oneof![
                Just("json".to_string()),
                Just("full".to_string()),
                Just("compact".to_string()),
            ],
        )
            .prop_map(|(enabled, path, append, format)| FileSettings {
                enabled,
                path,
                append,
                format,
            })
    }

    fn arb_logger_settings() -> impl Strategy<Value = LoggerSettings> {
        (
            prop_oneof![
                Just("trace".to_string()),
                Just("debug".to_string()),
                Just("info".to_string()),
                Just("warn".to_string()),
                Just("error".to_string()),
            ],
            (any::<bool>(), any::<bool>()),
            arb_file_settings(),
        )
            .prop_map(|(level, (enabled, colored), file)| LoggerSettings {
                level,
                console: ConsoleSettings { enabled, colored },
                file,
            })
    }

    fn arb_platforms_config() -> impl Strategy<Value = PlatformsConfig> {
        (
            "(xoxb-[a-z0-9]{8})?",
            "#[a-z]{1,10}",
            "([0-9]{6}:[A-Za-z0-9]{10})?",
            "(-?[0-9]{5,12})?",
            "(AC[a-f0-9]{32})?",
            "([a-f0-9]{32})?",
            "(\\+[0-9]{8,12})?",
            "(whatsapp:\\+[0-9]{8,12})?",
        )
            .prop_map(
                |(slack_token, channel, tg_token, chat_id, sid, auth, from, to)| PlatformsConfig {
                    slack: SlackConfig {
                        token: slack_token,
                        channel,
                        api_base_url: default_slack_api_base_url(),
                    },
                    telegram: TelegramConfig {
                        token: tg_token,
                        chat_id,
                        api_base_url: default_telegram_api_base_url(),
                    },
                    whatsapp: WhatsAppConfig {
                        account_sid: sid,
                        auth_token: auth,
                        from_number: from,
                        to_number: to,
                        api_base_url: default_twilio_api_base_url(),
                    },
                },
            )
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            arb_application_config(),
            arb_server_config(),
            arb_logger_settings(),
            arb_platforms_config(),
        )
            .prop_map(|(application, server, logger, platforms)| Settings {
                application,
                server,
                logger,
                platforms,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Serializing any Settings to TOML and reading it back yields the same value.
        #[test]
        fn prop_settings_round_trip_serialization(settings in arb_settings()) {
            let toml_str = toml::to_string(&settings)
                .expect("Settings should serialize to TOML");

            let deserialized: Settings = toml::from_str(&toml_str)
                .expect("TOML should deserialize back to Settings");

            prop_assert_eq!(settings, deserialized);
        }

        /// The enabled count never exceeds the number of platforms and
        /// matches the individual flags.
        #[test]
        fn prop_enabled_count_matches_flags(platforms in arb_platforms_config()) {
            let expected = usize::from(platforms.slack.is_enabled())
                + usize::from(platforms.telegram.is_enabled())
                + usize::from(platforms.whatsapp.is_enabled());
            prop_assert_eq!(platforms.enabled_count(), expected);
            prop_assert!(platforms.enabled_count() <= 3);
        }
    }

    // ========================================================================
    // Unit tests
    // ========================================================================

    #[test]
    fn test_application_config_defaults() {
        let config = ApplicationConfig::default();
        assert_eq!(config.name, "lan-notifier");
        assert_eq!(config.version, crate::pkg_version());
        assert!(!config.debug);
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_server_config_address() {
        let config = ServerConfig::default();
        assert_eq!(config.address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_logger_settings_defaults() {
        let config = LoggerSettings::default();
        assert_eq!(config.level, "info");
        assert!(config.console.enabled);
        assert!(!config.file.enabled);
        assert_eq!(config.file.format, "json");
    }

    #[test]
    fn test_slack_defaults_and_enablement() {
        let mut slack = SlackConfig::default();
        assert_eq!(slack.channel, "#general");
        assert_eq!(slack.api_base_url, "https://slack.com/api");
        assert!(!slack.is_enabled());

        slack.token = "xoxb-test".to_string();
        assert!(slack.is_enabled());

        slack.channel = String::new();
        assert!(!slack.is_enabled());
    }

    #[test]
    fn test_telegram_requires_token_and_chat_id() {
        let mut telegram = TelegramConfig {
            token: "123:abc".to_string(),
            ..Default::default()
        };
        assert!(!telegram.is_enabled());

        telegram.chat_id = "42".to_string();
        assert!(telegram.is_enabled());
    }

    #[test]
    fn test_whatsapp_requires_all_four_fields() {
        let mut whatsapp = WhatsAppConfig {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            from_number: "+14155238886".to_string(),
            ..Default::default()
        };
        assert!(!whatsapp.is_enabled());

        whatsapp.to_number = "+15005550006".to_string();
        assert!(whatsapp.is_enabled());
    }

    #[test]
    fn test_apply_debug_mode() {
        let mut settings = Settings::default();
        settings.apply_debug_mode();
        assert_eq!(settings.logger.level, "info");

        settings.application.debug = true;
        settings.apply_debug_mode();
        assert_eq!(settings.logger.level, "debug");
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let toml_str = r#"
[server]
port = 8080

[platforms.slack]
token = "xoxb-partial"
"#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.platforms.slack.channel, "#general");
        assert_eq!(settings.platforms.enabled_count(), 1);
        assert!(!settings.platforms.telegram.is_enabled());
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let settings = LoggerSettings::default();
        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "info");
        assert_eq!(config.file.format, LogFormat::Json);
    }

    #[test]
    fn test_logger_settings_invalid_format() {
        let mut settings = LoggerSettings::default();
        settings.file.format = "xml".to_string();
        assert!(settings.into_logger_config().is_err());
    }
}
