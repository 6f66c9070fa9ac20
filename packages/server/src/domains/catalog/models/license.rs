use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Open source license (MIT, AGPL-3.0, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct License {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl License {
    pub async fn search(pattern: &str, limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let licenses = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM licenses
            WHERE name ILIKE $1 OR slug ILIKE $1
            ORDER BY name ASC
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(licenses)
    }
}
