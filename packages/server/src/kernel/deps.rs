//! Server dependencies for activities (using traits for testability)
//!
//! This module provides the central dependency container used by all domain
//! activities. All external services use trait abstractions to enable testing.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::SiteConfig;
use crate::domains::auth::JwtService;
use crate::kernel::{BaseCacheInvalidator, BaseEmailService, BaseSocialPublisher};

/// Server dependencies accessible to activities and Restate handlers
#[derive(Clone)]
pub struct ServerDeps {
    /// Long-lived pool for request/response handlers (search, lookups)
    pub db_pool: PgPool,
    /// Publish runs open (and close) their own pool from this URL
    pub database_url: String,
    pub jwt_service: Arc<JwtService>,
    pub cache: Arc<dyn BaseCacheInvalidator>,
    /// One publisher per configured social network
    pub social_publishers: Vec<Arc<dyn BaseSocialPublisher>>,
    pub email: Arc<dyn BaseEmailService>,
    pub site: SiteConfig,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        db_pool: PgPool,
        database_url: String,
        jwt_service: Arc<JwtService>,
        cache: Arc<dyn BaseCacheInvalidator>,
        social_publishers: Vec<Arc<dyn BaseSocialPublisher>>,
        email: Arc<dyn BaseEmailService>,
        site: SiteConfig,
    ) -> Self {
        Self {
            db_pool,
            database_url,
            jwt_service,
            cache,
            social_publishers,
            email,
            site,
        }
    }
}
