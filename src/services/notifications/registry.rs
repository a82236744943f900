//! Startup registry of enabled platform adapters.

use super::platform::Platform;
use super::provider::{Notifier, Outcome};
use super::slack_provider::SlackProvider;
use super::telegram_provider::TelegramProvider;
use super::whatsapp_provider::WhatsAppProvider;
use crate::config::error::ConfigError;
use crate::config::settings::PlatformsConfig;
use async_trait::async_trait;
use futures::future::join_all;
use tracing::info;

/// One configured adapter.
///
/// The set of platforms is closed, so adapters are a tagged enum rather
/// than boxed trait objects.
pub enum PlatformAdapter {
    Slack(SlackProvider),
    Telegram(TelegramProvider),
    WhatsApp(WhatsAppProvider),
}

#[async_trait]
impl Notifier for PlatformAdapter {
    fn platform(&self) -> Platform {
        match self {
            PlatformAdapter::Slack(p) => p.platform(),
            PlatformAdapter::Telegram(p) => p.platform(),
            PlatformAdapter::WhatsApp(p) => p.platform(),
        }
    }

    async fn send(&self, message: &str) -> Outcome {
        match self {
            PlatformAdapter::Slack(p) => p.send(message).await,
            PlatformAdapter::Telegram(p) => p.send(message).await,
            PlatformAdapter::WhatsApp(p) => p.send(message).await,
        }
    }

    async fn test_connection(&self) -> Outcome {
        match self {
            PlatformAdapter::Slack(p) => p.test_connection().await,
            PlatformAdapter::Telegram(p) => p.test_connection().await,
            PlatformAdapter::WhatsApp(p) => p.test_connection().await,
        }
    }
}

/// Adapters for every platform with complete credentials, in canonical
/// platform order. Built once at startup and read-only afterwards.
pub struct NotifierRegistry {
    adapters: Vec<PlatformAdapter>,
}

impl NotifierRegistry {
    /// Builds the registry from platform credentials.
    ///
    /// Platforms with missing credentials are left out entirely.
    ///
    /// # Errors
    /// Returns `ConfigError::NoPlatformsConfigured` when no platform is enabled.
    pub fn from_config(
        config: &PlatformsConfig,
        client: reqwest::Client,
    ) -> Result<Self, ConfigError> {
        let mut adapters = Vec::with_capacity(Platform::ALL.len());

        if config.slack.is_enabled() {
            adapters.push(PlatformAdapter::Slack(SlackProvider::new(
                &config.slack,
                client.clone(),
            )));
            info!(channel = %config.slack.channel, "Slack notifier initialized");
        }

        if config.telegram.is_enabled() {
            adapters.push(PlatformAdapter::Telegram(TelegramProvider::new(
                &config.telegram,
                client.clone(),
            )));
            info!(chat_id = %config.telegram.chat_id, "Telegram notifier initialized");
        }

        if config.whatsapp.is_enabled() {
            adapters.push(PlatformAdapter::WhatsApp(WhatsAppProvider::new(
                &config.whatsapp,
                client,
            )));
            info!("WhatsApp notifier initialized");
        }

        if adapters.is_empty() {
            return Err(ConfigError::NoPlatformsConfigured);
        }

        Ok(Self { adapters })
    }

    /// Enabled platforms in canonical order.
    pub fn enabled_platforms(&self) -> Vec<Platform> {
        self.adapters.iter().map(|a| a.platform()).collect()
    }

    pub fn get(&self, platform: Platform) -> Option<&PlatformAdapter> {
        self.adapters.iter().find(|a| a.platform() == platform)
    }

    /// Runs `test_connection` on every enabled adapter concurrently.
    pub async fn test_all(&self) -> Vec<(Platform, Outcome)> {
        let checks = self.adapters.iter().map(|adapter| async move {
            (adapter.platform(), adapter.test_connection().await)
        });
        join_all(checks).await
    }
}
