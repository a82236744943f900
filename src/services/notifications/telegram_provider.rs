//! Telegram notifier implementation.
//!
//! Sends messages through the Telegram Bot API. The bot token is part of
//! every request path (`/bot<token>/<method>`), so all error text produced
//! here is scrubbed of it before it leaves the adapter.
//!
//! Bot API reference: https://core.telegram.org/bots/api

use super::platform::Platform;
use super::provider::{Notifier, Outcome, join_url, transport_failure};
use crate::config::settings::TelegramConfig;
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Matches a bot token as it appears in Bot API URLs.
static BOT_TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"bot\d+:[A-Za-z0-9_-]+").expect("bot token pattern is valid")
});

/// Bot API response envelope.
#[derive(Debug, Deserialize)]
struct TelegramResponse<T> {
    ok: bool,
    description: Option<String>,
    error_code: Option<i64>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

#[derive(Debug, Deserialize)]
struct BotUser {
    username: Option<String>,
}

/// Telegram notifier
pub struct TelegramProvider {
    client: reqwest::Client,
    token: String,
    chat_id: String,
    api_base_url: String,
}

impl TelegramProvider {
    /// Creates a new Telegram notifier from configuration
    pub fn new(config: &TelegramConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            token: config.token.clone(),
            chat_id: config.chat_id.clone(),
            api_base_url: config.api_base_url.clone(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        join_url(&self.api_base_url, &format!("bot{}/{}", self.token, method))
    }

    /// Removes the bot token from any text before it is surfaced.
    fn redact(&self, text: &str) -> String {
        let scrubbed = BOT_TOKEN_PATTERN.replace_all(text, "bot<redacted>");
        scrubbed.replace(&self.token, "<redacted>")
    }

    /// Sends a prepared request and unwraps the Bot API envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, Outcome> {
        let response = request
            .send()
            .await
            .map_err(|e| self.scrub(transport_failure(Platform::Telegram, e)))?;

        let status = response.status();
        let parsed = response
            .json::<TelegramResponse<T>>()
            .await
            .map_err(|e| {
                Outcome::failed(self.redact(&format!(
                    "Unexpected response from Telegram API (HTTP {}): {}",
                    status.as_u16(),
                    e.without_url()
                )))
            })?;

        if parsed.ok {
            return Ok(parsed.result);
        }

        let description = parsed
            .description
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        let reason = match parsed.error_code {
            Some(code) => format!("Telegram API error {}: {}", code, description),
            None => format!("Telegram API error: {}", description),
        };
        Err(Outcome::failed(self.redact(&reason)))
    }

    fn scrub(&self, outcome: Outcome) -> Outcome {
        match outcome.error() {
            Some(error) => Outcome::failed(self.redact(error)),
            None => outcome,
        }
    }
}

#[async_trait]
impl Notifier for TelegramProvider {
    fn platform(&self) -> Platform {
        Platform::Telegram
    }

    async fn send(&self, message: &str) -> Outcome {
        debug!(chat_id = %self.chat_id, "Sending message to Telegram");

        let request = self.client.post(self.method_url("sendMessage")).json(&json!({
            "chat_id": self.chat_id,
            "text": message,
        }));

        match self.execute::<SentMessage>(request).await {
            Ok(result) => {
                info!(
                    chat_id = %self.chat_id,
                    message_id = result.map(|m| m.message_id),
                    "Message sent to Telegram"
                );
                Outcome::ok()
            }
            Err(outcome) => {
                warn!(
                    chat_id = %self.chat_id,
                    error = outcome.error().unwrap_or_default(),
                    "Error sending message to Telegram"
                );
                outcome
            }
        }
    }

    /// Verifies the token with `getMe`.
    async fn test_connection(&self) -> Outcome {
        let request = self.client.get(self.method_url("getMe"));

        match self.execute::<BotUser>(request).await {
            Ok(bot) => {
                let username = bot.and_then(|b| b.username).unwrap_or_default();
                info!(bot = %username, "Telegram connection OK");
                Outcome::ok()
            }
            Err(outcome) => {
                warn!(
                    error = outcome.error().unwrap_or_default(),
                    "Telegram connection failed"
                );
                outcome
            }
        }
    }
}
