//! Server functions proxying back office handlers
//!
//! These run on the server with the signed-in operator's token, so the token
//! never reaches the browser.

use dioxus::prelude::*;

use crate::types::{AlternativeDetail, SearchResult};

#[cfg(feature = "server")]
use crate::auth::operator_client;
#[cfg(feature = "server")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
#[derive(Serialize)]
struct SlugRequest {
    slug: String,
}

/// Search every catalog entity type by name or slug
#[server]
pub async fn search_items(query: String) -> Result<SearchResult, ServerFnError> {
    #[derive(Serialize)]
    struct Request {
        query: String,
    }

    operator_client()
        .await?
        .call("Catalog", "search_items", &Request { query })
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[server]
pub async fn get_alternative(slug: String) -> Result<AlternativeDetail, ServerFnError> {
    operator_client()
        .await?
        .call("Catalog", "get_alternative", &SlugRequest { slug })
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Post a tool's launch announcement right away, returning the platforms used
#[server]
pub async fn send_social_post(slug: String) -> Result<Vec<String>, ServerFnError> {
    #[derive(Deserialize)]
    struct Response {
        platforms: Vec<String>,
    }

    let response: Response = operator_client()
        .await?
        .call("Socials", "test_social_posts", &SlugRequest { slug })
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(response.platforms)
}
