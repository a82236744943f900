//! Notification DTOs for API requests and responses.

use crate::services::notifications::{NotificationResult, Outcome, Platform};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use utoipa::ToSchema;
use validator::Validate;

/// Request body of `POST /notify`.
///
/// Omitting `platforms` targets every enabled platform; an empty list
/// targets none.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "message": "Hello from LAN!",
    "platforms": ["slack", "telegram"]
}))]
pub struct NotifyRequest {
    /// Message to send
    #[validate(length(min = 1, message = "Message must not be empty"))]
    pub message: String,
    /// Platforms to send to (defaults to all enabled)
    #[serde(default)]
    pub platforms: Option<Vec<Platform>>,
}

/// Result for a single platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlatformResult {
    pub success: bool,
    /// Failure reason; `null` on success
    pub error: Option<String>,
}

impl From<&Outcome> for PlatformResult {
    fn from(outcome: &Outcome) -> Self {
        Self {
            success: outcome.is_success(),
            error: outcome.error().map(str::to_string),
        }
    }
}

/// Per-platform results serialized as a JSON object in target order.
#[derive(Debug, Clone, PartialEq, Eq, Default, ToSchema)]
#[schema(value_type = HashMap<String, PlatformResult>)]
pub struct PlatformResults(pub Vec<(Platform, PlatformResult)>);

impl PlatformResults {
    pub fn get(&self, platform: Platform) -> Option<&PlatformResult> {
        self.0.iter().find(|(p, _)| *p == platform).map(|(_, r)| r)
    }
}

impl From<&[(Platform, Outcome)]> for PlatformResults {
    fn from(outcomes: &[(Platform, Outcome)]) -> Self {
        Self(
            outcomes
                .iter()
                .map(|(platform, outcome)| (*platform, PlatformResult::from(outcome)))
                .collect(),
        )
    }
}

impl Serialize for PlatformResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (platform, result) in &self.0 {
            map.serialize_entry(platform.as_str(), result)?;
        }
        map.end()
    }
}

/// Response body of `POST /notify`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(example = json!({
    "message": "Notifications sent",
    "total_platforms": 2,
    "successful": 1,
    "results": {
        "slack": {"success": true, "error": null},
        "telegram": {"success": false, "error": "Telegram API error 400: Bad Request: chat not found"}
    }
}))]
pub struct NotifyResponse {
    pub message: String,
    pub total_platforms: usize,
    pub successful: usize,
    pub results: PlatformResults,
}

impl From<NotificationResult> for NotifyResponse {
    fn from(result: NotificationResult) -> Self {
        Self {
            message: "Notifications sent".to_string(),
            total_platforms: result.total_platforms,
            successful: result.successful,
            results: PlatformResults::from(result.results.as_slice()),
        }
    }
}
