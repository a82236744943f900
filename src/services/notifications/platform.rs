//! Closed set of messaging platforms the gateway can deliver to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// A supported messaging platform.
///
/// The wire form is lower-case (`slack`, `telegram`, `whatsapp`). Declaration
/// order is the canonical order used by the registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Slack,
    Telegram,
    WhatsApp,
}

impl Platform {
    /// All platforms in canonical order.
    pub const ALL: [Platform; 3] = [Platform::Slack, Platform::Telegram, Platform::WhatsApp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Slack => "slack",
            Platform::Telegram => "telegram",
            Platform::WhatsApp => "whatsapp",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slack" => Ok(Platform::Slack),
            "telegram" => Ok(Platform::Telegram),
            "whatsapp" => Ok(Platform::WhatsApp),
            other => Err(format!(
                "Unknown platform '{}'. Valid platforms are: slack, telegram, whatsapp",
                other
            )),
        }
    }
}
