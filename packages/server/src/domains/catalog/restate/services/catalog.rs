//! Catalog service (stateless)
//!
//! Admin search across every catalog entity type, plus alternative lookups.

use restate_sdk::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::common::auth::restate_auth::require_admin;
use crate::common::SlugRequest;
use crate::domains::catalog::activities::{
    get_alternative, search_items, AlternativeDetail, SearchResult,
};
use crate::impl_restate_serde;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItemsRequest {
    pub query: String,
}

impl_restate_serde!(SearchItemsRequest);

#[restate_sdk::service]
#[name = "Catalog"]
pub trait CatalogService {
    async fn search_items(req: SearchItemsRequest) -> Result<SearchResult, HandlerError>;
    async fn get_alternative(req: SlugRequest) -> Result<AlternativeDetail, HandlerError>;
}

pub struct CatalogServiceImpl {
    deps: Arc<ServerDeps>,
}

impl CatalogServiceImpl {
    pub fn with_deps(deps: Arc<ServerDeps>) -> Self {
        Self { deps }
    }
}

impl CatalogService for CatalogServiceImpl {
    async fn search_items(
        &self,
        ctx: Context<'_>,
        req: SearchItemsRequest,
    ) -> Result<SearchResult, HandlerError> {
        let _user = require_admin(ctx.headers(), &self.deps.jwt_service)?;

        search_items(&req.query, &self.deps.db_pool)
            .await
            .map_err(|e| TerminalError::new(e.to_string()).into())
    }

    async fn get_alternative(
        &self,
        ctx: Context<'_>,
        req: SlugRequest,
    ) -> Result<AlternativeDetail, HandlerError> {
        let _user = require_admin(ctx.headers(), &self.deps.jwt_service)?;

        get_alternative(&req.slug, &self.deps.db_pool)
            .await
            .map_err(|e| TerminalError::new(e.to_string()))?
            .ok_or_else(|| TerminalError::new(format!("Alternative not found: {}", req.slug)).into())
    }
}
