use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Alternative model - a proprietary product that listed tools replace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Alternative {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub website: Option<String>,
    pub description: Option<String>,
    pub favicon_url: Option<String>,

    // Affiliate discount
    pub discount_code: Option<String>,
    pub discount_amount: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Alternative {
    /// Discount call-to-action, present only when an amount is set
    pub fn discount_label(&self) -> Option<String> {
        let amount = self
            .discount_amount
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())?;

        match self
            .discount_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            Some(code) => Some(format!("Use code {} to get {}", code, amount)),
            None => Some(format!("Get {} with this link", amount)),
        }
    }

    pub async fn find_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        let alternative = sqlx::query_as::<_, Self>("SELECT * FROM alternatives WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(alternative)
    }

    pub async fn search(pattern: &str, limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let alternatives = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM alternatives
            WHERE name ILIKE $1 OR slug ILIKE $1
            ORDER BY name ASC
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(alternatives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alternative(code: Option<&str>, amount: Option<&str>) -> Alternative {
        let now = Utc::now();
        Alternative {
            id: Uuid::new_v4(),
            slug: "notion".to_string(),
            name: "Notion".to_string(),
            website: Some("https://notion.so".to_string()),
            description: None,
            favicon_url: None,
            discount_code: code.map(str::to_string),
            discount_amount: amount.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn label_with_code_and_amount() {
        assert_eq!(
            alternative(Some("OPEN20"), Some("20% off")).discount_label().as_deref(),
            Some("Use code OPEN20 to get 20% off")
        );
    }

    #[test]
    fn label_with_amount_only() {
        assert_eq!(
            alternative(None, Some("3 months free")).discount_label().as_deref(),
            Some("Get 3 months free with this link")
        );
    }

    #[test]
    fn no_label_without_amount() {
        assert_eq!(alternative(Some("OPEN20"), None).discount_label(), None);
        assert_eq!(alternative(Some("OPEN20"), Some(" ")).discount_label(), None);
    }
}
