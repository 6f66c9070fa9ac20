//! Cache tag revalidation against the public web frontend.
//!
//! The frontend owns the cache; we only tell it which tags went stale.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

use super::BaseCacheInvalidator;

#[derive(Debug, Serialize)]
struct RevalidateRequest<'a> {
    tags: &'a [String],
}

/// Posts stale tags to the frontend's revalidation endpoint
pub struct HttpCacheInvalidator {
    client: Client,
    url: String,
    secret: Option<String>,
}

impl HttpCacheInvalidator {
    pub fn new(url: impl Into<String>, secret: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            secret,
        }
    }
}

#[async_trait]
impl BaseCacheInvalidator for HttpCacheInvalidator {
    async fn revalidate_tags(&self, tags: &[String]) -> Result<()> {
        if tags.is_empty() {
            return Ok(());
        }

        let mut request = self
            .client
            .post(&self.url)
            .json(&RevalidateRequest { tags });

        if let Some(secret) = &self.secret {
            request = request.header("x-revalidate-secret", secret);
        }

        debug!(?tags, "Revalidating cache tags");

        let response = request
            .send()
            .await
            .context("Failed to reach revalidation endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Cache revalidation failed {}: {}", status, body);
            anyhow::bail!("Cache revalidation error {}: {}", status, body);
        }

        Ok(())
    }
}

/// Used when no revalidation endpoint is configured (local development)
pub struct NoopCacheInvalidator;

#[async_trait]
impl BaseCacheInvalidator for NoopCacheInvalidator {
    async fn revalidate_tags(&self, tags: &[String]) -> Result<()> {
        debug!(?tags, "Cache revalidation disabled, skipping");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revalidate_request_serializes_tags() {
        let tags = vec!["tools".to_string(), "schedule".to_string()];
        let body = serde_json::to_value(RevalidateRequest { tags: &tags }).unwrap();

        assert_eq!(body, serde_json::json!({ "tags": ["tools", "schedule"] }));
    }

    #[tokio::test]
    async fn noop_invalidator_accepts_any_tags() {
        let invalidator = NoopCacheInvalidator;
        assert!(invalidator.revalidate_tag("tool-acme").await.is_ok());
    }
}
