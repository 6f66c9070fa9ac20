pub mod detail;
pub mod search;

pub use detail::{get_alternative, AlternativeDetail};
pub use search::{ilike_pattern, search_items, SearchItem, SearchResult, SEARCH_LIMIT};
