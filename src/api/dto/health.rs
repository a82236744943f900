//! Health check DTOs for API responses.

use crate::services::notifications::Platform;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Service status and the platforms the registry was built with.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "enabled_platforms": ["slack", "telegram"],
    "version": "0.2.0"
}))]
pub struct HealthResponse {
    /// Always `healthy` while the process is serving
    #[schema(example = "healthy")]
    pub status: String,
    /// Enabled platforms in canonical order
    pub enabled_platforms: Vec<Platform>,
    /// Application version
    #[schema(example = "0.2.0")]
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(enabled_platforms: Vec<Platform>, version: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            enabled_platforms,
            version: version.into(),
        }
    }
}
