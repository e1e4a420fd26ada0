//! Twilio SMS adapter for the notification port.

use crate::task::{
    domain::DeliveryId,
    ports::{DeliveryError, DeliveryResult, NotificationSink},
};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Public Twilio REST endpoint.
pub const DEFAULT_TWILIO_BASE_URL: &str = "https://api.twilio.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Account settings for the Twilio messaging API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwilioSettings {
    /// Account SID, also the basic-auth user name.
    pub account_sid: String,
    /// Auth token, the basic-auth password.
    pub auth_token: String,
    /// Sender number in E.164 form.
    pub from_number: String,
    /// API root, without a trailing path.
    pub base_url: String,
}

impl TwilioSettings {
    /// Creates settings against the public Twilio endpoint.
    #[must_use]
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from_number: from_number.into(),
            base_url: DEFAULT_TWILIO_BASE_URL.to_owned(),
        }
    }

    /// Overrides the API root, typically to point at a local stub.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url.trim_end_matches('/'),
            self.account_sid
        )
    }
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Notification sink that sends SMS through Twilio's Messages resource.
#[derive(Debug, Clone)]
pub struct TwilioNotificationSink {
    client: reqwest::Client,
    settings: TwilioSettings,
}

impl TwilioNotificationSink {
    /// Creates a sink with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Transport`] if the HTTP client cannot be
    /// built (for example, when no TLS backend is available).
    pub fn new(settings: TwilioSettings) -> DeliveryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(DeliveryError::transport)?;
        Ok(Self::with_client(client, settings))
    }

    /// Creates a sink sharing an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, settings: TwilioSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl NotificationSink for TwilioNotificationSink {
    async fn send(&self, recipient: &str, body: &str) -> DeliveryResult<DeliveryId> {
        let form = [
            ("To", recipient),
            ("From", self.settings.from_number.as_str()),
            ("Body", body),
        ];
        let response = self
            .client
            .post(self.settings.messages_url())
            .basic_auth(&self.settings.account_sid, Some(&self.settings.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(DeliveryError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("unknown error").to_owned();
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|error_body| error_body.message)
                .unwrap_or(fallback);
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let resource = response
            .json::<MessageResource>()
            .await
            .map_err(DeliveryError::transport)?;
        debug!(sid = %resource.sid, "twilio accepted message");
        Ok(DeliveryId::new(resource.sid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_url_uses_account_sid() {
        let settings = TwilioSettings::new("AC123", "token", "+15550000");
        assert_eq!(
            settings.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn messages_url_ignores_trailing_slash_on_base() {
        let settings =
            TwilioSettings::new("AC9", "token", "+15550000").with_base_url("http://127.0.0.1:9/");
        assert_eq!(
            settings.messages_url(),
            "http://127.0.0.1:9/2010-04-01/Accounts/AC9/Messages.json"
        );
    }
}
