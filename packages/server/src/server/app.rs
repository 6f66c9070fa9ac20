//! Health server setup.

use axum::{extract::Extension, routing::get, Router};
use sqlx::PgPool;

use crate::server::routes::health_handler;

/// How hourly publish runs are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishMode {
    /// Started as durable workflows through the Restate ingress
    Restate,
    /// Run inside this process by the scheduler
    InProcess,
}

impl PublishMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishMode::Restate => "restate",
            PublishMode::InProcess => "in_process",
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub publish_mode: PublishMode,
}

/// Build the health router
pub fn build_app(db_pool: PgPool, publish_mode: PublishMode) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .layer(Extension(AppState {
            db_pool,
            publish_mode,
        }))
}
