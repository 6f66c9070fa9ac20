//! Restate workflow client
//!
//! Simple HTTP client for starting Restate workflows through the ingress.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Client for invoking Restate workflows via HTTP
#[derive(Clone)]
pub struct WorkflowClient {
    base_url: String,
    http_client: Arc<reqwest::Client>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendResponse {
    invocation_id: String,
}

impl WorkflowClient {
    /// Create a new workflow client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: Arc::new(reqwest::Client::new()),
        }
    }

    /// Start a workflow's `run` handler without waiting for completion.
    ///
    /// Restate runs a workflow at most once per key, so starting the same key
    /// twice does not create a second run. Returns the invocation id.
    pub async fn start_workflow<Req>(
        &self,
        workflow_name: &str,
        key: &str,
        request: &Req,
    ) -> Result<String>
    where
        Req: Serialize,
    {
        let url = format!("{}/{}/{}/run/send", self.base_url, workflow_name, key);

        tracing::debug!(
            workflow = workflow_name,
            key = key,
            url = %url,
            "Starting Restate workflow (async)"
        );

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to start workflow")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "unknown error".to_string());
            anyhow::bail!("Failed to start workflow ({}): {}", status, body);
        }

        let sent: SendResponse = response
            .json()
            .await
            .context("Failed to parse workflow start response")?;

        Ok(sent.invocation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let client = WorkflowClient::new("http://localhost:8180/");
        assert_eq!(client.base_url, "http://localhost:8180");
    }

    #[test]
    fn send_response_reads_invocation_id() {
        let sent: SendResponse =
            serde_json::from_str(r#"{"invocationId":"inv_123","status":"Accepted"}"#).unwrap();
        assert_eq!(sent.invocation_id, "inv_123");
    }
}
