//! Server functions for operator sign-in
//!
//! These run on the server and keep the operator's token in a tower-sessions
//! session.

use dioxus::prelude::*;

use crate::types::AdminUser;

#[cfg(feature = "server")]
use super::session::{normalize_token, require_operator, OperatorSession, SESSION_KEY};
#[cfg(feature = "server")]
use crate::api::{ingress_client, RestateClient};

/// Check an admin token against the server and start a session with it
#[server]
pub async fn sign_in(token: String) -> Result<AdminUser, ServerFnError> {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize)]
    struct Request {}

    #[derive(Deserialize)]
    struct Identity {
        email: String,
        is_admin: bool,
    }

    let token = normalize_token(&token).map_err(|e| ServerFnError::new(e.to_string()))?;

    let identity: Identity = ingress_client()
        .with_token(token.clone())
        .call("Auth", "whoami", &Request {})
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if !identity.is_admin {
        return Err(ServerFnError::new("Admin access required"));
    }

    let operator = OperatorSession::new(identity.email, token);
    set_session_operator(&operator).await?;
    tracing::info!(operator = %operator.email, "Operator signed in");

    Ok(operator.user())
}

/// Get the signed-in operator, if any
#[server]
pub async fn get_current_user() -> Result<Option<AdminUser>, ServerFnError> {
    Ok(get_session_operator().await?.map(|operator| operator.user()))
}

#[server]
pub async fn sign_out() -> Result<(), ServerFnError> {
    clear_session().await
}

// ============================================================================
// Server-only helpers (not exposed as server functions)
// ============================================================================

/// Ingress client carrying the signed-in operator's token
#[cfg(feature = "server")]
pub async fn operator_client() -> Result<RestateClient, ServerFnError> {
    let operator = require_operator(get_session_operator().await?)
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(ingress_client().with_token(operator.token))
}

#[cfg(feature = "server")]
async fn current_session() -> Result<tower_sessions::Session, ServerFnError> {
    dioxus::fullstack::extract()
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to get session: {}", e)))
}

#[cfg(feature = "server")]
async fn set_session_operator(operator: &OperatorSession) -> Result<(), ServerFnError> {
    let session = current_session().await?;

    // New id on sign-in so a pre-login session id cannot be reused
    session
        .cycle_id()
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to renew session: {}", e)))?;

    session
        .insert(SESSION_KEY, operator)
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to set session: {}", e)))
}

#[cfg(feature = "server")]
async fn get_session_operator() -> Result<Option<OperatorSession>, ServerFnError> {
    current_session()
        .await?
        .get(SESSION_KEY)
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to read session: {}", e)))
}

#[cfg(feature = "server")]
async fn clear_session() -> Result<(), ServerFnError> {
    current_session()
        .await?
        .flush()
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to clear session: {}", e)))
}
