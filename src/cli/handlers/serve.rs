//! Serve command handler
//!
//! Handles `serve --dry-run`: validation plus a registry build, no socket.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::external::HTTP_CLIENT;
use crate::services::notifications::NotifierRegistry;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validate configuration without starting the server
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - `NoPlatformsConfigured` when the registry would be empty
    pub async fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        println!("✓ Configuration is valid");

        let registry = NotifierRegistry::from_config(&self.config.platforms, HTTP_CLIENT.clone())?;
        let enabled: Vec<String> = registry
            .enabled_platforms()
            .iter()
            .map(|p| p.to_string())
            .collect();
        println!("✓ Enabled platforms: {}", enabled.join(", "));

        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Logger configuration is valid (level: {})", self.config.logger.level);

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }
}
