use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Publication state of a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "tool_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
}

impl std::fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolStatus::Draft => write!(f, "draft"),
            ToolStatus::Scheduled => write!(f, "scheduled"),
            ToolStatus::Published => write!(f, "published"),
        }
    }
}

impl std::str::FromStr for ToolStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(ToolStatus::Draft),
            "scheduled" => Ok(ToolStatus::Scheduled),
            "published" => Ok(ToolStatus::Published),
            _ => Err(anyhow::anyhow!("Invalid tool status: {}", s)),
        }
    }
}

/// Tool model - an open source project listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tool {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub website_url: String,
    pub tagline: Option<String>,
    pub description: Option<String>,

    // Publishing
    pub status: ToolStatus,
    pub published_at: Option<DateTime<Utc>>,

    // Submission
    pub submitter_name: Option<String>,
    pub submitter_email: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tool {
    /// Scheduled and its publication time has come
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == ToolStatus::Scheduled
            && self.published_at.map(|at| at <= now).unwrap_or(false)
    }

    /// Cache tag of the tool's own page
    pub fn cache_tag(&self) -> String {
        format!("tool-{}", self.slug)
    }

    /// Submitter address, ignoring blank values left by the submission form
    pub fn notification_email(&self) -> Option<&str> {
        self.submitter_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    /// Find tool by slug, returning None if not found
    pub async fn find_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        let tool = sqlx::query_as::<_, Self>("SELECT * FROM tools WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(tool)
    }

    /// Scheduled tools whose publication time is at or before `now`
    pub async fn find_due_for_publishing(now: DateTime<Utc>, pool: &PgPool) -> Result<Vec<Self>> {
        let tools = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM tools
            WHERE status = 'scheduled' AND published_at <= $1
            ORDER BY published_at ASC
            "#,
        )
        .bind(now)
        .fetch_all(pool)
        .await?;
        Ok(tools)
    }

    /// Move a scheduled tool to published.
    ///
    /// Returns the updated row only when this call made the change. `None`
    /// means the tool was no longer scheduled (another run got there first).
    pub async fn mark_published(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        let updated = sqlx::query_as::<_, Self>(
            r#"
            UPDATE tools
            SET status = 'published', updated_at = NOW()
            WHERE id = $1 AND status = 'scheduled'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(updated)
    }

    /// Case-insensitive name/slug search for the admin command menu
    pub async fn search(pattern: &str, limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let tools = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM tools
            WHERE name ILIKE $1 OR slug ILIKE $1
            ORDER BY name ASC
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(tools)
    }
}
