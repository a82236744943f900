//! Application state for Axum web framework.
//!
//! Contains the notification services and the application metadata shared
//! by all request handlers.

use crate::config::error::ConfigError;
use crate::config::settings::{ApplicationConfig, Settings};
use crate::services::Services;

/// Application state shared across handlers.
///
/// Cloning is cheap since the registry sits behind an `Arc`. Nothing in it
/// is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Registry and dispatcher
    pub services: Services,
    /// Name and version reported by `/health`
    pub application: ApplicationConfig,
}

impl AppState {
    /// Builds the registry from `settings.platforms` using `client` for all
    /// outbound platform calls.
    ///
    /// # Errors
    /// Returns `ConfigError::NoPlatformsConfigured` when no platform has
    /// complete credentials.
    ///
    /// # Example
    /// ```ignore
    /// let state = AppState::new(&settings, HTTP_CLIENT.clone())?;
    /// ```
    pub fn new(settings: &Settings, client: reqwest::Client) -> Result<Self, ConfigError> {
        Ok(Self {
            services: Services::new(&settings.platforms, client)?,
            application: settings.application.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::Platform;
    use crate::services::notifications::testing::all_platforms;

    #[test]
    fn test_state_from_settings() {
        let settings = Settings {
            platforms: all_platforms("http://localhost"),
            ..Default::default()
        };

        let state = AppState::new(&settings, reqwest::Client::new()).unwrap();

        assert_eq!(state.services.registry.enabled_platforms(), Platform::ALL.to_vec());
        assert_eq!(state.application.name, "lan-notifier");
    }

    #[test]
    fn test_state_requires_a_platform() {
        let result = AppState::new(&Settings::default(), reqwest::Client::new());
        assert!(matches!(result, Err(ConfigError::NoPlatformsConfigured)));
    }
}
