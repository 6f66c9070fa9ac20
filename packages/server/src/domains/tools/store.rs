//! Data access seam for the publish run.
//!
//! The publish workflow owns a dedicated connection pool for the lifetime of
//! one run and releases it at the end. `ToolStore` wraps that pool so the run
//! can be exercised against an in-memory store in tests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::models::Tool;

#[async_trait]
pub trait ToolStore: Send + Sync {
    /// Scheduled tools with `published_at <= now`
    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Tool>>;

    /// Set a scheduled tool to published. `None` when it was not scheduled
    /// anymore, so nothing changed.
    async fn mark_published(&self, id: Uuid) -> Result<Option<Tool>>;

    /// Release the underlying connections
    async fn disconnect(&self);
}

/// PostgreSQL-backed store with its own short-lived pool
pub struct PgToolStore {
    pool: PgPool,
}

impl PgToolStore {
    /// Open a small pool dedicated to one publish run (connections are made lazily)
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_lazy(database_url)
            .context("Invalid DATABASE_URL for publish run")?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl ToolStore for PgToolStore {
    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Tool>> {
        Tool::find_due_for_publishing(now, &self.pool).await
    }

    async fn mark_published(&self, id: Uuid) -> Result<Option<Tool>> {
        Tool::mark_published(id, &self.pool).await
    }

    async fn disconnect(&self) {
        self.pool.close().await;
        info!("Publish run database pool closed");
    }
}
