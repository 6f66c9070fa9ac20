use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub async fn search(pattern: &str, limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let categories = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM categories
            WHERE name ILIKE $1 OR slug ILIKE $1
            ORDER BY name ASC
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(categories)
    }
}
