//! Restate ingress client for calling back office handlers

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Error body returned by the Restate ingress
#[derive(Debug, Deserialize)]
struct IngressError {
    message: String,
}

/// Error type for handler calls
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Handler error ({status}): {message}")]
    Handler { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Client for invoking Restate service handlers
#[derive(Clone)]
pub struct RestateClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RestateClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    /// Create a client with authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn handler_url(&self, service: &str, handler: &str) -> String {
        format!("{}/{}/{}", self.base_url, service, handler)
    }

    /// Call `service/handler` and wait for its response
    pub async fn call<Req, Res>(
        &self,
        service: &str,
        handler: &str,
        request: &Req,
    ) -> Result<Res, ClientError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let mut req = self
            .client
            .post(self.handler_url(service, handler))
            .json(request);

        if let Some(token) = &self.auth_token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Handler {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<IngressError>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.to_string())
}

/// Client for server-side requests, direct to the ingress and without a token.
/// Admin handlers need [`crate::auth::operator_client`] instead.
#[cfg(feature = "server")]
pub fn ingress_client() -> RestateClient {
    let url = std::env::var("RESTATE_INGRESS_URL")
        .unwrap_or_else(|_| "http://localhost:8180".to_string());
    RestateClient::new(url)
}
