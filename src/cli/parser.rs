//! CLI argument parsing with clap
//!
//! Defines the command-line interface: global flags, the `serve`
//! subcommand and the value enums they use.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::build;

/// HTTP gateway that forwards notifications to Slack, Telegram and WhatsApp
#[derive(Parser, Debug)]
#[command(name = "lan-notifier")]
#[command(about = "HTTP gateway that forwards notifications to Slack, Telegram and WhatsApp")]
#[command(long_about = "
lan-notifier accepts notification requests over HTTP on the local network
and relays each message to every configured messaging platform.

EXAMPLES:
    # Start the server with the layered configuration in ./config
    lan-notifier

    # Start server on a custom host and port
    lan-notifier serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    lan-notifier --config /etc/lan-notifier/notifier.toml serve

    # Load config/production.toml on top of config/default.toml
    lan-notifier --env production serve

    # Check configuration and enabled platforms without starting the server
    lan-notifier serve --dry-run

Platform credentials can also come from SLACK_TOKEN, TELEGRAM_TOKEN,
TELEGRAM_CHAT_ID, TWILIO_ACCOUNT_SID and friends.
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load only this TOML file instead of the layered files in the
    /// configuration directory. Environment variables still apply.
    ///
    /// Example: --config /etc/lan-notifier/notifier.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` is layered over `default.toml`.
    /// Takes precedence over LAN_NOTIFIER_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the notification server (default)
    ///
    /// Examples:
    ///   lan-notifier serve                            # Start with defaults
    ///   lan-notifier serve --host 0.0.0.0 --port 5000 # Listen on every interface
    ///   lan-notifier serve --dry-run                  # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept
        /// connections from the whole LAN.
        ///
        /// Default: 0.0.0.0
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Default: 5000
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Overrides configuration files, DEBUG and the global
        /// --verbose/--quiet flags.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Loads the configuration, builds the platform registry and prints
        /// the enabled platforms without binding the port. Exits non-zero
        /// when the configuration is invalid.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Whether this invocation only validates configuration
    pub fn is_dry_run(&self) -> bool {
        matches!(self.command, Some(Commands::Serve { dry_run: true, .. }))
    }

    /// Validate argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
