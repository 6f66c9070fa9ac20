//! Alternative detail shown on the admin alternative page

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domains::catalog::models::Alternative;
use crate::impl_restate_serde;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeDetail {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub website: Option<String>,
    pub description: Option<String>,
    /// Affiliate call-to-action, when a discount amount is set
    pub discount_label: Option<String>,
}

impl_restate_serde!(AlternativeDetail);

impl From<Alternative> for AlternativeDetail {
    fn from(alternative: Alternative) -> Self {
        let discount_label = alternative.discount_label();
        Self {
            id: alternative.id,
            slug: alternative.slug,
            name: alternative.name,
            website: alternative.website,
            description: alternative.description,
            discount_label,
        }
    }
}

pub async fn get_alternative(slug: &str, pool: &PgPool) -> Result<Option<AlternativeDetail>> {
    let alternative = Alternative::find_by_slug(slug, pool).await?;
    Ok(alternative.map(AlternativeDetail::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn detail_carries_the_discount_label() {
        let now = Utc::now();
        let alternative = Alternative {
            id: Uuid::new_v4(),
            slug: "notion".to_string(),
            name: "Notion".to_string(),
            website: Some("https://notion.so".to_string()),
            description: Some("All-in-one workspace".to_string()),
            favicon_url: None,
            discount_code: Some("OPEN20".to_string()),
            discount_amount: Some("20% off".to_string()),
            created_at: now,
            updated_at: now,
        };

        let detail = AlternativeDetail::from(alternative);

        assert_eq!(detail.slug, "notion");
        assert_eq!(detail.discount_label.as_deref(), Some("Use code OPEN20 to get 20% off"));
    }
}
