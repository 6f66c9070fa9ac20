//! Type definitions for back office API responses
//!
//! These mirror the Restate handler payloads of the server crate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::routes::Route;

// ============================================================================
// Catalog search
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
}

/// Matches grouped by entity type, replaced wholesale on every search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub tools: Vec<SearchItem>,
    pub alternatives: Vec<SearchItem>,
    pub categories: Vec<SearchItem>,
    pub licenses: Vec<SearchItem>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
            && self.alternatives.is_empty()
            && self.categories.is_empty()
            && self.licenses.is_empty()
    }

    /// Non-empty groups in display order
    pub fn groups(&self) -> Vec<(EntityKind, &[SearchItem])> {
        EntityKind::variants()
            .iter()
            .map(|kind| (*kind, self.items(*kind)))
            .filter(|(_, items)| !items.is_empty())
            .collect()
    }

    pub fn items(&self, kind: EntityKind) -> &[SearchItem] {
        match kind {
            EntityKind::Tool => &self.tools,
            EntityKind::Alternative => &self.alternatives,
            EntityKind::Category => &self.categories,
            EntityKind::License => &self.licenses,
        }
    }
}

// ============================================================================
// Catalog detail
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeDetail {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub website: Option<String>,
    pub description: Option<String>,
    pub discount_label: Option<String>,
}

// ============================================================================
// Auth
// ============================================================================

/// Signed-in operator as the browser sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub email: String,
}

// ============================================================================
// Entity kinds
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Tool,
    Alternative,
    Category,
    License,
}

impl EntityKind {
    pub fn variants() -> &'static [EntityKind] {
        &[
            EntityKind::Tool,
            EntityKind::Alternative,
            EntityKind::Category,
            EntityKind::License,
        ]
    }

    /// Path segment under `/admin`
    pub fn segment(&self) -> &'static str {
        match self {
            EntityKind::Tool => "tools",
            EntityKind::Alternative => "alternatives",
            EntityKind::Category => "categories",
            EntityKind::License => "licenses",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Tool => "Tools",
            EntityKind::Alternative => "Alternatives",
            EntityKind::Category => "Categories",
            EntityKind::License => "Licenses",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::Tool => "Tool",
            EntityKind::Alternative => "Alternative",
            EntityKind::Category => "Category",
            EntityKind::License => "License",
        }
    }

    pub fn detail_path(&self, slug: &str) -> String {
        format!("/admin/{}/{}", self.segment(), slug)
    }

    pub fn new_path(&self) -> String {
        format!("/admin/{}/new", self.segment())
    }

    pub fn detail_route(&self, slug: &str) -> Route {
        let slug = slug.to_string();
        match self {
            EntityKind::Tool => Route::ToolDetail { slug },
            EntityKind::Alternative => Route::AlternativeDetail { slug },
            EntityKind::Category => Route::CategoryDetail { slug },
            EntityKind::License => Route::LicenseDetail { slug },
        }
    }

    pub fn new_route(&self) -> Route {
        match self {
            EntityKind::Tool => Route::ToolNew {},
            EntityKind::Alternative => Route::AlternativeNew {},
            EntityKind::Category => Route::CategoryNew {},
            EntityKind::License => Route::LicenseNew {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(slug: &str) -> SearchItem {
        SearchItem {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            name: slug.to_uppercase(),
        }
    }

    #[test]
    fn paths_are_deterministic() {
        assert_eq!(EntityKind::Tool.detail_path("acme"), "/admin/tools/acme");
        assert_eq!(EntityKind::License.new_path(), "/admin/licenses/new");
    }

    #[test]
    fn routes_render_to_the_same_paths() {
        for kind in EntityKind::variants() {
            assert_eq!(kind.detail_route("acme").to_string(), kind.detail_path("acme"));
            assert_eq!(kind.new_route().to_string(), kind.new_path());
        }
    }

    #[test]
    fn groups_skip_empty_kinds_in_display_order() {
        let result = SearchResult {
            tools: vec![item("acme")],
            licenses: vec![item("mit")],
            ..Default::default()
        };

        let kinds: Vec<EntityKind> = result.groups().into_iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![EntityKind::Tool, EntityKind::License]);
    }

    #[test]
    fn search_result_reads_server_payload() {
        let json = r#"{
            "tools": [{"id": "6f1c1a52-7d3c-4c86-9a43-0f5c7f2b1e11", "slug": "acme", "name": "Acme"}],
            "alternatives": [], "categories": [], "licenses": []
        }"#;

        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.tools[0].slug, "acme");
    }

    #[test]
    fn alternative_detail_reads_server_payload() {
        let json = r#"{
            "id": "6f1c1a52-7d3c-4c86-9a43-0f5c7f2b1e11",
            "slug": "notion", "name": "Notion",
            "website": "https://notion.so", "description": null,
            "discount_label": "Use code OPEN20 to get 20% off"
        }"#;

        let detail: AlternativeDetail = serde_json::from_str(json).unwrap();
        assert_eq!(
            detail.discount_label.as_deref(),
            Some("Use code OPEN20 to get 20% off")
        );
    }
}
