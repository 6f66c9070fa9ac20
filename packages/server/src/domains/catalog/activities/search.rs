//! Cross-entity search backing the admin command menu

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::domains::catalog::models::{Alternative, Category, License};
use crate::domains::tools::models::Tool;
use crate::impl_restate_serde;

/// Rows returned per entity type
pub const SEARCH_LIMIT: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
}

/// Grouped matches, one list per entity type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub tools: Vec<SearchItem>,
    pub alternatives: Vec<SearchItem>,
    pub categories: Vec<SearchItem>,
    pub licenses: Vec<SearchItem>,
}

impl_restate_serde!(SearchResult);

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
            && self.alternatives.is_empty()
            && self.categories.is_empty()
            && self.licenses.is_empty()
    }
}

/// `%query%` with LIKE wildcards in the query escaped
pub fn ilike_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Search tools, alternatives, categories and licenses by name or slug
pub async fn search_items(query: &str, pool: &PgPool) -> Result<SearchResult> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(SearchResult::default());
    }

    let pattern = ilike_pattern(query);
    debug!(%query, "Searching catalog");

    let (tools, alternatives, categories, licenses) = tokio::try_join!(
        Tool::search(&pattern, SEARCH_LIMIT, pool),
        Alternative::search(&pattern, SEARCH_LIMIT, pool),
        Category::search(&pattern, SEARCH_LIMIT, pool),
        License::search(&pattern, SEARCH_LIMIT, pool),
    )?;

    Ok(SearchResult {
        tools: tools
            .into_iter()
            .map(|t| SearchItem { id: t.id, slug: t.slug, name: t.name })
            .collect(),
        alternatives: alternatives
            .into_iter()
            .map(|a| SearchItem { id: a.id, slug: a.slug, name: a.name })
            .collect(),
        categories: categories
            .into_iter()
            .map(|c| SearchItem { id: c.id, slug: c.slug, name: c.name })
            .collect(),
        licenses: licenses
            .into_iter()
            .map(|l| SearchItem { id: l.id, slug: l.slug, name: l.name })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

    #[test]
    fn pattern_wraps_query_in_wildcards() {
        assert_eq!(ilike_pattern("plaus"), "%plaus%");
    }

    #[test]
    fn pattern_escapes_like_metacharacters() {
        assert_eq!(ilike_pattern("100%_off"), r"%100\%\_off%");
        assert_eq!(ilike_pattern(r"a\b"), r"%a\\b%");
    }

    #[tokio::test]
    async fn blank_query_returns_empty_groups_without_querying() {
        // Never connects: the pool is lazy and the query is blank
        let pool = PgPoolOptions::new().connect_lazy_with(PgConnectOptions::new());

        let result = search_items("   ", &pool).await.unwrap();

        assert!(result.is_empty());
    }
}
