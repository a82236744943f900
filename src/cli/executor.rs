//! Command executor for dispatching CLI commands
//!
//! Runs after configuration is loaded and the logger is up. Server
//! startup itself stays in `main`.

use super::handlers::ServeCommandHandler;
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// Execute a CLI command with the given settings
///
/// `serve --dry-run` is handled here; a plain `serve` (or no subcommand)
/// returns `Ok(())` so the caller starts the server.
///
/// # Errors
/// Returns errors from command handlers or validation failures
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    validate_command_args(cli, &settings)?;

    match &cli.command {
        Some(Commands::Serve { dry_run: true, .. }) => {
            ServeCommandHandler::new(settings).validate_only().await
        }
        Some(Commands::Serve { .. }) | None => Ok(()),
    }
}

fn validate_command_args(cli: &Cli, settings: &Settings) -> AppResult<()> {
    cli.validate().map_err(|msg| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason: msg,
    })?;

    validate_serve_args(settings);

    Ok(())
}

fn validate_serve_args(settings: &Settings) {
    if settings.server.port < 1024 {
        tracing::warn!(
            port = settings.server.port,
            "Binding to a privileged port usually requires root privileges"
        );
    }
}
