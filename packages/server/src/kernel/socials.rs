//! Social network publishers (Bluesky, Mastodon, generic webhook)
//!
//! Each publisher is enabled only when its credentials are configured; see
//! [`build_social_publishers`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use super::{BaseSocialPublisher, SocialPlatform};
use crate::config::Config;

// =============================================================================
// Bluesky (AT Protocol)
// =============================================================================

const BLUESKY_SERVICE: &str = "https://bsky.social";

pub struct BlueskyClient {
    client: Client,
    service: String,
    identifier: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct CreateSession<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Session {
    access_jwt: String,
    did: String,
}

#[derive(Debug, Deserialize)]
struct CreatedRecord {
    uri: String,
}

impl BlueskyClient {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            service: BLUESKY_SERVICE.to_string(),
            identifier: identifier.into(),
            password: password.into(),
        }
    }

    async fn create_session(&self) -> Result<Session> {
        let response = self
            .client
            .post(format!("{}/xrpc/com.atproto.server.createSession", self.service))
            .json(&CreateSession {
                identifier: &self.identifier,
                password: &self.password,
            })
            .send()
            .await
            .context("Failed to reach Bluesky")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Bluesky login failed {}: {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse Bluesky session")
    }
}

#[async_trait]
impl BaseSocialPublisher for BlueskyClient {
    fn platform(&self) -> SocialPlatform {
        SocialPlatform::Bluesky
    }

    async fn publish(&self, text: &str) -> Result<String> {
        let session = self.create_session().await?;

        let record = serde_json::json!({
            "repo": session.did,
            "collection": "app.bsky.feed.post",
            "record": {
                "$type": "app.bsky.feed.post",
                "text": text,
                "createdAt": chrono::Utc::now().to_rfc3339(),
            },
        });

        let response = self
            .client
            .post(format!("{}/xrpc/com.atproto.repo.createRecord", self.service))
            .bearer_auth(&session.access_jwt)
            .json(&record)
            .send()
            .await
            .context("Failed to reach Bluesky")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Bluesky post failed {}: {}", status, body);
            anyhow::bail!("Bluesky API error {}: {}", status, body);
        }

        let created: CreatedRecord = response
            .json()
            .await
            .context("Failed to parse Bluesky record")?;

        info!(uri = %created.uri, "Posted to Bluesky");
        Ok(created.uri)
    }
}

// =============================================================================
// Mastodon
// =============================================================================

pub struct MastodonClient {
    client: Client,
    base_url: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    url: Option<String>,
    id: String,
}

impl MastodonClient {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }
}

#[async_trait]
impl BaseSocialPublisher for MastodonClient {
    fn platform(&self) -> SocialPlatform {
        SocialPlatform::Mastodon
    }

    async fn publish(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .post(format!(
                "{}/api/v1/statuses",
                self.base_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({ "status": text }))
            .send()
            .await
            .context("Failed to reach Mastodon")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Mastodon post failed {}: {}", status, body);
            anyhow::bail!("Mastodon API error {}: {}", status, body);
        }

        let status: Status = response
            .json()
            .await
            .context("Failed to parse Mastodon status")?;

        info!(id = %status.id, "Posted to Mastodon");
        Ok(status.url.unwrap_or(status.id))
    }
}

// =============================================================================
// Webhook (hands the rendered post to an automation service, used for X)
// =============================================================================

pub struct WebhookPublisher {
    client: Client,
    url: String,
    platform: SocialPlatform,
}

impl WebhookPublisher {
    pub fn new(url: impl Into<String>, platform: SocialPlatform) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            platform,
        }
    }
}

#[async_trait]
impl BaseSocialPublisher for WebhookPublisher {
    fn platform(&self) -> SocialPlatform {
        self.platform
    }

    async fn publish(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "platform": self.platform, "text": text }))
            .send()
            .await
            .context("Failed to reach social webhook")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Social webhook error {}: {}", status, body);
        }

        info!(platform = %self.platform, "Handed post to social webhook");
        Ok(format!("webhook:{}", self.platform))
    }
}

/// Build every publisher whose credentials are present in the config
pub fn build_social_publishers(config: &Config) -> Vec<Arc<dyn BaseSocialPublisher>> {
    let mut publishers: Vec<Arc<dyn BaseSocialPublisher>> = Vec::new();

    if let Some(url) = &config.social_webhook_url {
        publishers.push(Arc::new(WebhookPublisher::new(url.clone(), SocialPlatform::X)));
    }

    if let (Some(identifier), Some(password)) =
        (&config.bluesky_identifier, &config.bluesky_password)
    {
        publishers.push(Arc::new(BlueskyClient::new(identifier.clone(), password.clone())));
    }

    if let (Some(url), Some(token)) = (&config.mastodon_url, &config.mastodon_token) {
        publishers.push(Arc::new(MastodonClient::new(url.clone(), token.clone())));
    }

    publishers
}
