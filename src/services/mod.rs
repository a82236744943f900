//! Service layer for business logic operations.
//!
//! Services encapsulate the notification pipeline and are shared with the
//! HTTP handlers through `AppState`.

pub mod notifications;

pub use notifications::{NotificationDispatcher, NotifierRegistry};

use crate::config::error::ConfigError;
use crate::config::settings::PlatformsConfig;
use std::sync::Arc;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since the registry sits behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub registry: Arc<NotifierRegistry>,
    pub notifications: NotificationDispatcher,
}

impl Services {
    /// Builds the registry from platform credentials and wires the dispatcher to it.
    ///
    /// # Errors
    /// Returns `ConfigError::NoPlatformsConfigured` when no platform is enabled.
    pub fn new(platforms: &PlatformsConfig, client: reqwest::Client) -> Result<Self, ConfigError> {
        let registry = Arc::new(NotifierRegistry::from_config(platforms, client)?);
        Ok(Self {
            notifications: NotificationDispatcher::new(registry.clone()),
            registry,
        })
    }
}
