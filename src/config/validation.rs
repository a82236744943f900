//! Configuration validation logic
//!
//! Each configuration section validates itself; `Settings::validate` runs
//! them in order and stops at the first failure.

use crate::config::error::ConfigError;
use crate::config::settings::{FileSettings, LoggerSettings, PlatformsConfig, ServerConfig, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Host must not be empty
    /// - Port must be between 1 and 65535
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host is required. Use 0.0.0.0 to listen on every interface.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.file.validate()?;

        Ok(())
    }
}

/// Checks that an API base URL is an absolute http(s) URL.
fn validate_base_url(field: &str, url: &str) -> Result<(), ConfigError> {
    match reqwest::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!(
                "Unsupported URL scheme '{}'. Expected http or https.",
                parsed.scheme()
            ),
        }),
        Err(e) => Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!("Invalid URL '{}': {}", url, e),
        }),
    }
}

impl PlatformsConfig {
    /// Validate platform credentials
    ///
    /// # Validation Rules
    /// - At least one platform must have complete credentials
    /// - Every enabled platform's `api_base_url` must be an http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled_count() == 0 {
            return Err(ConfigError::NoPlatformsConfigured);
        }

        if self.slack.is_enabled() {
            validate_base_url("platforms.slack.api_base_url", &self.slack.api_base_url)?;
        }
        if self.telegram.is_enabled() {
            validate_base_url("platforms.telegram.api_base_url", &self.telegram.api_base_url)?;
        }
        if self.whatsapp.is_enabled() {
            validate_base_url("platforms.whatsapp.api_base_url", &self.whatsapp.api_base_url)?;
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.logger.validate()?;
        self.platforms.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{SlackConfig, TelegramConfig, WhatsAppConfig};

    fn slack_only() -> PlatformsConfig {
        PlatformsConfig {
            slack: SlackConfig {
                token: "xoxb-test".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn assert_field(err: ConfigError, expected: &str) {
        assert!(
            matches!(&err, ConfigError::ValidationError { field, .. } if field == expected),
            "expected validation error on {}, got {:?}",
            expected,
            err
        );
    }

    // ========================================================================
    // ServerConfig validation tests
    // ========================================================================

    #[test]
    fn test_server_config_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_server_config_invalid_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_field(config.validate().unwrap_err(), "server.port");
    }

    #[test]
    fn test_server_config_valid_port_boundaries() {
        for port in [1, 65535] {
            let config = ServerConfig {
                port,
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_server_config_empty_host() {
        let config = ServerConfig {
            host: "  ".to_string(),
            ..Default::default()
        };
        assert_field(config.validate().unwrap_err(), "server.host");
    }

    // ========================================================================
    // LoggerSettings validation tests
    // ========================================================================

    #[test]
    fn test_logger_settings_valid_levels() {
        for level in ["trace", "debug", "info", "warn", "error", "INFO", "Debug"] {
            let settings = LoggerSettings {
                level: level.to_string(),
                ..Default::default()
            };
            assert!(settings.validate().is_ok(), "Level should be valid: {}", level);
        }
    }

    #[test]
    fn test_logger_settings_invalid_level() {
        let settings = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert_field(settings.validate().unwrap_err(), "logger.level");
    }

    #[test]
    fn test_logger_settings_file_enabled_empty_path() {
        let settings = LoggerSettings {
            file: FileSettings {
                enabled: true,
                path: "".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_field(settings.validate().unwrap_err(), "logger.file.path");
    }

    #[test]
    fn test_logger_settings_file_disabled_empty_path_ok() {
        let settings = LoggerSettings {
            file: FileSettings {
                enabled: false,
                path: "".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_logger_settings_formats() {
        for format in ["full", "compact", "json", "FULL", "Compact"] {
            let settings = LoggerSettings {
                file: FileSettings {
                    format: format.to_string(),
                    ..Default::default()
                },
                ..Default::default()
            };
            assert!(settings.validate().is_ok(), "Format should be valid: {}", format);
        }

        let settings = LoggerSettings {
            file: FileSettings {
                format: "xml".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_field(settings.validate().unwrap_err(), "logger.file.format");
    }

    // ========================================================================
    // PlatformsConfig validation tests
    // ========================================================================

    #[test]
    fn test_platforms_none_configured() {
        let err = PlatformsConfig::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::NoPlatformsConfigured));
    }

    #[test]
    fn test_platforms_incomplete_credentials_count_as_none() {
        let config = PlatformsConfig {
            telegram: TelegramConfig {
                chat_id: "42".to_string(),
                ..Default::default()
            },
            whatsapp: WhatsAppConfig {
                account_sid: "AC1".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoPlatformsConfigured)
        ));
    }

    #[test]
    fn test_platforms_single_platform_ok() {
        assert!(slack_only().validate().is_ok());
    }

    #[test]
    fn test_platforms_bad_base_url() {
        let mut config = slack_only();
        config.slack.api_base_url = "not a url".to_string();
        assert_field(config.validate().unwrap_err(), "platforms.slack.api_base_url");

        config.slack.api_base_url = "ftp://slack.example".to_string();
        assert_field(config.validate().unwrap_err(), "platforms.slack.api_base_url");
    }

    #[test]
    fn test_platforms_disabled_base_url_ignored() {
        let mut config = slack_only();
        config.telegram.api_base_url = "not a url".to_string();
        assert!(config.validate().is_ok());
    }

    // ========================================================================
    // Settings validation tests
    // ========================================================================

    #[test]
    fn test_settings_valid() {
        let settings = Settings {
            platforms: slack_only(),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_default_has_no_platforms() {
        assert!(matches!(
            Settings::default().validate(),
            Err(ConfigError::NoPlatformsConfigured)
        ));
    }

    #[test]
    fn test_settings_invalid_server_reported_first() {
        let settings = Settings {
            server: ServerConfig {
                port: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_field(settings.validate().unwrap_err(), "server.port");
    }

    #[test]
    fn test_settings_invalid_logger() {
        let settings = Settings {
            logger: LoggerSettings {
                level: "invalid".to_string(),
                ..Default::default()
            },
            platforms: slack_only(),
            ..Default::default()
        };
        assert_field(settings.validate().unwrap_err(), "logger.level");
    }
}
