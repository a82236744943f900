//! WhatsApp notifier implementation using the Twilio REST API.
//!
//! Messages are created with a form-encoded POST to
//! `/2010-04-01/Accounts/{sid}/Messages.json` authenticated with HTTP basic
//! auth (account SID, auth token).

use super::platform::Platform;
use super::provider::{Notifier, Outcome, join_url, transport_failure};
use crate::config::settings::WhatsAppConfig;
use async_trait::async_trait;
use reqwest::Response;
use serde::Deserialize;
use tracing::{debug, info, warn};

const WHATSAPP_PREFIX: &str = "whatsapp:";

#[derive(Debug, Deserialize)]
struct TwilioMessage {
    sid: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwilioAccount {
    friendly_name: Option<String>,
    status: Option<String>,
}

/// Error body returned by Twilio on non-2xx responses.
#[derive(Debug, Deserialize)]
struct TwilioError {
    code: Option<i64>,
    message: Option<String>,
}

/// Prefixes a phone number with `whatsapp:` unless it already carries it.
pub fn whatsapp_address(number: &str) -> String {
    if number.starts_with(WHATSAPP_PREFIX) {
        number.to_string()
    } else {
        format!("{}{}", WHATSAPP_PREFIX, number)
    }
}

/// WhatsApp (Twilio) notifier
pub struct WhatsAppProvider {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    to_number: String,
    api_base_url: String,
}

impl WhatsAppProvider {
    /// Creates a new WhatsApp notifier, normalizing both numbers to the
    /// `whatsapp:` address form.
    pub fn new(config: &WhatsAppConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: whatsapp_address(&config.from_number),
            to_number: whatsapp_address(&config.to_number),
            api_base_url: config.api_base_url.clone(),
        }
    }

    pub fn from_number(&self) -> &str {
        &self.from_number
    }

    pub fn to_number(&self) -> &str {
        &self.to_number
    }

    fn account_url(&self, suffix: &str) -> String {
        join_url(
            &self.api_base_url,
            &format!("2010-04-01/Accounts/{}{}", self.account_sid, suffix),
        )
    }

    /// Builds a failed outcome from a non-2xx Twilio response.
    async fn api_failure(response: Response) -> Outcome {
        let status = response.status().as_u16();
        match response.json::<TwilioError>().await {
            Ok(TwilioError {
                code: Some(code),
                message: Some(message),
            }) => Outcome::failed(format!("Twilio API error {}: {}", code, message)),
            Ok(TwilioError {
                message: Some(message),
                ..
            }) => Outcome::failed(format!("Twilio API error: {}", message)),
            _ => Outcome::failed(format!("Twilio API returned HTTP {}", status)),
        }
    }
}

#[async_trait]
impl Notifier for WhatsAppProvider {
    fn platform(&self) -> Platform {
        Platform::WhatsApp
    }

    async fn send(&self, message: &str) -> Outcome {
        debug!(to = %self.to_number, "Sending message to WhatsApp");

        let form = [
            ("From", self.from_number.as_str()),
            ("To", self.to_number.as_str()),
            ("Body", message),
        ];

        let response = match self
            .client
            .post(self.account_url("/Messages.json"))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let outcome = transport_failure(Platform::WhatsApp, e);
                warn!(
                    to = %self.to_number,
                    error = outcome.error().unwrap_or_default(),
                    "Error sending message to WhatsApp"
                );
                return outcome;
            }
        };

        if !response.status().is_success() {
            let outcome = Self::api_failure(response).await;
            warn!(
                to = %self.to_number,
                error = outcome.error().unwrap_or_default(),
                "Error sending message to WhatsApp"
            );
            return outcome;
        }

        // A 2xx means Twilio accepted the message; the body only feeds the log line
        let created = response.json::<TwilioMessage>().await.ok();
        info!(
            to = %self.to_number,
            sid = created.as_ref().and_then(|m| m.sid.as_deref()).unwrap_or("unknown"),
            status = created.as_ref().and_then(|m| m.status.as_deref()).unwrap_or("unknown"),
            "Message sent to WhatsApp"
        );
        Outcome::ok()
    }

    /// Fetches the account resource to validate the credentials.
    async fn test_connection(&self) -> Outcome {
        let response = match self
            .client
            .get(self.account_url(".json"))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let outcome = transport_failure(Platform::WhatsApp, e);
                warn!(
                    error = outcome.error().unwrap_or_default(),
                    "Twilio connection failed"
                );
                return outcome;
            }
        };

        if !response.status().is_success() {
            let outcome = Self::api_failure(response).await;
            warn!(
                error = outcome.error().unwrap_or_default(),
                "Twilio connection failed"
            );
            return outcome;
        }

        let account = response.json::<TwilioAccount>().await.ok();
        info!(
            account = account.as_ref().and_then(|a| a.friendly_name.as_deref()).unwrap_or("unknown"),
            status = account.as_ref().and_then(|a| a.status.as_deref()).unwrap_or("unknown"),
            "Twilio connection OK"
        );
        Outcome::ok()
    }
}
