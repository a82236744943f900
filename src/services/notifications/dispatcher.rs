//! Fan-out of one message to a set of platforms.

use super::platform::Platform;
use super::provider::{Notifier, Outcome};
use super::registry::NotifierRegistry;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info};

/// Aggregated outcome of one dispatch.
///
/// `results` keeps target order; `total_platforms` equals its length and
/// `successful` counts the successful entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationResult {
    pub total_platforms: usize,
    pub successful: usize,
    pub results: Vec<(Platform, Outcome)>,
}

impl NotificationResult {
    pub fn new(results: Vec<(Platform, Outcome)>) -> Self {
        Self {
            total_platforms: results.len(),
            successful: results.iter().filter(|(_, o)| o.is_success()).count(),
            results,
        }
    }

    pub fn outcome(&self, platform: Platform) -> Option<&Outcome> {
        self.results
            .iter()
            .find(|(p, _)| *p == platform)
            .map(|(_, outcome)| outcome)
    }
}

/// Sends messages through the registry's adapters.
///
/// Cloning is cheap; the registry is shared behind an `Arc`.
#[derive(Clone)]
pub struct NotificationDispatcher {
    registry: Arc<NotifierRegistry>,
}

impl NotificationDispatcher {
    pub fn new(registry: Arc<NotifierRegistry>) -> Self {
        Self { registry }
    }

    /// Sends `message` to `targets`, or to every enabled platform when
    /// `targets` is `None`.
    ///
    /// An explicit empty list sends nothing. Duplicate targets are collapsed
    /// keeping the first occurrence. A target without an adapter yields a
    /// failed outcome and does not stop the others. Sends run concurrently;
    /// results come back in target order.
    pub async fn dispatch(&self, message: &str, targets: Option<&[Platform]>) -> NotificationResult {
        let targets = match targets {
            Some(requested) => dedup_preserving_order(requested),
            None => self.registry.enabled_platforms(),
        };

        debug!(targets = ?targets, "Dispatching notification");

        let sends = targets.iter().map(|platform| async move {
            let outcome = match self.registry.get(*platform) {
                Some(adapter) => adapter.send(message).await,
                None => Outcome::failed(format!("Platform '{}' is not configured", platform)),
            };
            (*platform, outcome)
        });

        let result = NotificationResult::new(join_all(sends).await);

        info!(
            total_platforms = result.total_platforms,
            successful = result.successful,
            "Notification dispatched"
        );

        result
    }
}

fn dedup_preserving_order(platforms: &[Platform]) -> Vec<Platform> {
    let mut unique = Vec::with_capacity(platforms.len());
    for platform in platforms {
        if !unique.contains(platform) {
            unique.push(*platform);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{PlatformsConfig, SlackConfig, TelegramConfig};
    use crate::services::notifications::testing::{
        all_platforms, healthy_platform_api, mixed_platform_api, spawn_mock_api,
    };
    use proptest::prelude::*;

    async fn dispatcher_for(config: &PlatformsConfig) -> NotificationDispatcher {
        let registry = NotifierRegistry::from_config(config, reqwest::Client::new()).unwrap();
        NotificationDispatcher::new(Arc::new(registry))
    }

    /// Slack succeeds, Telegram fails, WhatsApp is not configured.
    fn mixed_config(base_url: &str) -> PlatformsConfig {
        PlatformsConfig {
            slack: SlackConfig {
                token: "xoxb-test".to_string(),
                api_base_url: base_url.to_string(),
                ..Default::default()
            },
            telegram: TelegramConfig {
                token: "123456:test-token".to_string(),
                chat_id: "42".to_string(),
                api_base_url: base_url.to_string(),
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_dispatch_all_enabled_when_targets_omitted() {
        let base = spawn_mock_api(healthy_platform_api()).await;
        let dispatcher = dispatcher_for(&all_platforms(&base)).await;

        let result = dispatcher.dispatch("hello", None).await;

        assert_eq!(result.total_platforms, 3);
        assert_eq!(result.successful, 3);
        let order: Vec<Platform> = result.results.iter().map(|(p, _)| *p).collect();
        assert_eq!(order, Platform::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_dispatch_empty_targets_is_noop() {
        let base = spawn_mock_api(healthy_platform_api()).await;
        let dispatcher = dispatcher_for(&all_platforms(&base)).await;

        let result = dispatcher.dispatch("hello", Some(&[])).await;

        assert_eq!(result.total_platforms, 0);
        assert_eq!(result.successful, 0);
        assert!(result.results.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_unconfigured_platform_fails_without_stopping_others() {
        let base = spawn_mock_api(mixed_platform_api()).await;
        let dispatcher = dispatcher_for(&mixed_config(&base)).await;

        let result = dispatcher
            .dispatch("hello", Some(&[Platform::WhatsApp, Platform::Slack]))
            .await;

        assert_eq!(result.total_platforms, 2);
        assert_eq!(result.successful, 1);
        assert_eq!(
            result.outcome(Platform::WhatsApp),
            Some(&Outcome::failed("Platform 'whatsapp' is not configured"))
        );
        assert_eq!(result.outcome(Platform::Slack), Some(&Outcome::ok()));
        assert_eq!(result.results[0].0, Platform::WhatsApp);
    }

    #[tokio::test]
    async fn test_dispatch_collapses_duplicates() {
        let base = spawn_mock_api(healthy_platform_api()).await;
        let dispatcher = dispatcher_for(&all_platforms(&base)).await;

        let result = dispatcher
            .dispatch(
                "hello",
                Some(&[Platform::Telegram, Platform::Slack, Platform::Telegram]),
            )
            .await;

        let order: Vec<Platform> = result.results.iter().map(|(p, _)| *p).collect();
        assert_eq!(order, vec![Platform::Telegram, Platform::Slack]);
        assert_eq!(result.total_platforms, 2);
    }

    #[tokio::test]
    async fn test_dispatch_failure_carries_platform_error() {
        let base = spawn_mock_api(mixed_platform_api()).await;
        let dispatcher = dispatcher_for(&mixed_config(&base)).await;

        let result = dispatcher.dispatch("hello", None).await;

        assert_eq!(result.total_platforms, 2);
        assert_eq!(result.successful, 1);
        let telegram = result.outcome(Platform::Telegram).unwrap();
        assert!(telegram.error().unwrap().contains("chat not found"));
    }

    #[test]
    fn test_dedup_preserving_order() {
        let deduped = dedup_preserving_order(&[
            Platform::WhatsApp,
            Platform::WhatsApp,
            Platform::Slack,
            Platform::WhatsApp,
        ]);
        assert_eq!(deduped, vec![Platform::WhatsApp, Platform::Slack]);
    }

    fn arb_targets() -> impl Strategy<Value = Vec<Platform>> {
        prop::collection::vec(prop::sample::select(Platform::ALL.to_vec()), 0..8)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// For any target list: totals match the de-duplicated targets,
        /// order is first occurrence, and only Slack succeeds.
        #[test]
        fn prop_dispatch_counts_match_targets(targets in arb_targets()) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let result = runtime.block_on(async {
                let base = spawn_mock_api(mixed_platform_api()).await;
                let dispatcher = dispatcher_for(&mixed_config(&base)).await;
                dispatcher.dispatch("property", Some(&targets)).await
            });

            let expected = dedup_preserving_order(&targets);
            let order: Vec<Platform> = result.results.iter().map(|(p, _)| *p).collect();

            prop_assert_eq!(&order, &expected);
            prop_assert_eq!(result.total_platforms, expected.len());
            prop_assert_eq!(
                result.successful,
                usize::from(expected.contains(&Platform::Slack))
            );
            prop_assert!(result.successful <= result.total_platforms);
            for (platform, outcome) in &result.results {
                prop_assert_eq!(outcome.is_success(), outcome.error().is_none());
                prop_assert_eq!(outcome.is_success(), *platform == Platform::Slack);
            }
        }
    }
}
