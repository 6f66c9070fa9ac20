use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{BaseEmailService, OutgoingEmail};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Resend transactional email client
pub struct ResendClient {
    client: Client,
    api_key: String,
    from: String,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct ResendMessage<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: String,
}

impl ResendClient {
    /// `from` is the full sender, e.g. `OpenAlternative <hello@openalternative.co>`
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            from: from.into(),
            endpoint: RESEND_API_URL.to_string(),
        }
    }

    /// Point the client at another Resend-compatible endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn message<'a>(&'a self, email: &'a OutgoingEmail) -> ResendMessage<'a> {
        ResendMessage {
            from: &self.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
            reply_to: email.reply_to.as_deref(),
        }
    }
}

#[async_trait]
impl BaseEmailService for ResendClient {
    async fn send(&self, email: &OutgoingEmail) -> Result<String> {
        info!(to = %email.to, subject = %email.subject, "Sending email");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.message(email))
            .send()
            .await
            .context("Failed to reach Resend")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Resend send failed {}: {}", status, body);
            anyhow::bail!("Resend API error {}: {}", status, body);
        }

        let sent: ResendResponse = response
            .json()
            .await
            .context("Failed to parse Resend response")?;

        info!(id = %sent.id, "Email sent");
        Ok(sent.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_uses_configured_sender() {
        let client = ResendClient::new("re_test", "OpenAlternative <hello@openalternative.co>");
        let email = OutgoingEmail::builder()
            .to("a@b.com")
            .subject("Hi")
            .html("<p>Hi</p>")
            .text("Hi")
            .build();

        let body = serde_json::to_value(client.message(&email)).unwrap();

        assert_eq!(body["from"], "OpenAlternative <hello@openalternative.co>");
        assert_eq!(body["to"], serde_json::json!(["a@b.com"]));
        assert!(body.get("reply_to").is_none());
    }
}
