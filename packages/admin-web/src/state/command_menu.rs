//! Command menu state machine.
//!
//! Every keystroke and every issued search is stamped with a generation.
//! Work that finishes after a newer generation exists is ignored, so a slow
//! response can never overwrite a later query.

use std::time::Duration;

use crate::routes::Route;
use crate::types::{EntityKind, SearchResult};

/// Quiet period after the last keystroke before searching
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Delay before a closed menu forgets its query and results
pub const CLEAR_DELAY: Duration = Duration::from_millis(250);

/// Shortest trimmed query that triggers a search
pub const MIN_QUERY_CHARS: usize = 2;

/// Tool announced by the "Send Social Post" quick command
pub const SOCIAL_TEST_SLUG: &str = "dub";

/// What to do once the debounce period of a keystroke has elapsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Superseded by a later keystroke, or the query is too short
    Skip,
    Search { generation: u64, query: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandMenuState {
    pub open: bool,
    pub query: String,
    pub results: Option<SearchResult>,
    pub is_searching: bool,
    pub sending_post: bool,
    input_generation: u64,
    search_generation: u64,
    close_generation: u64,
}

impl CommandMenuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with an empty query
    pub fn open(&mut self) {
        self.close_generation += 1;
        self.reset();
        self.open = true;
    }

    /// Close, returning the ticket for the delayed clear
    pub fn close(&mut self) -> u64 {
        self.open = false;
        self.close_generation += 1;
        self.close_generation
    }

    /// Flip between open and closed. Returns a clear ticket when closing.
    pub fn toggle(&mut self) -> Option<u64> {
        if self.open {
            Some(self.close())
        } else {
            self.open();
            None
        }
    }

    /// Forget query and results if the menu is still closed since `ticket`
    pub fn clear_after_close(&mut self, ticket: u64) -> bool {
        if self.open || ticket != self.close_generation {
            return false;
        }
        self.reset();
        true
    }

    /// Record a keystroke, returning its debounce ticket
    pub fn type_input(&mut self, value: impl Into<String>) -> u64 {
        self.query = value.into();
        self.input_generation += 1;
        self.input_generation
    }

    /// Called when the debounce period of keystroke `ticket` has elapsed
    pub fn settle(&mut self, ticket: u64) -> SearchAction {
        if ticket != self.input_generation || !self.open {
            return SearchAction::Skip;
        }

        let query = self.query.trim();
        self.search_generation += 1;

        if query.chars().count() < MIN_QUERY_CHARS {
            self.results = None;
            self.is_searching = false;
            return SearchAction::Skip;
        }

        self.is_searching = true;
        SearchAction::Search {
            generation: self.search_generation,
            query: query.to_string(),
        }
    }

    /// Apply a response. Returns false (and changes nothing) when stale.
    pub fn finish_search(&mut self, generation: u64, result: SearchResult) -> bool {
        if generation != self.search_generation {
            return false;
        }
        self.results = Some(result);
        self.is_searching = false;
        true
    }

    /// A search failed: stop loading, keep whatever was shown before
    pub fn fail_search(&mut self, generation: u64) -> bool {
        if generation != self.search_generation {
            return false;
        }
        self.is_searching = false;
        true
    }

    /// Close and return the detail route of the chosen entity with the clear ticket
    pub fn select(&mut self, kind: EntityKind, slug: &str) -> (Route, u64) {
        let ticket = self.close();
        (kind.detail_route(slug), ticket)
    }

    /// Close and return the create route for an entity type with the clear ticket
    pub fn create(&mut self, kind: EntityKind) -> (Route, u64) {
        let ticket = self.close();
        (kind.new_route(), ticket)
    }

    /// Start the social post quick command, leaving the menu open.
    /// Returns the slug to announce, or `None` while a post is in flight.
    pub fn begin_social_post(&mut self) -> Option<&'static str> {
        if self.sending_post {
            return None;
        }
        self.sending_post = true;
        Some(SOCIAL_TEST_SLUG)
    }

    pub fn finish_social_post(&mut self) {
        self.sending_post = false;
    }

    fn reset(&mut self) {
        self.query.clear();
        self.results = None;
        self.is_searching = false;
        // Retire every in-flight search
        self.search_generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchItem;
    use uuid::Uuid;

    fn result_with_tool(slug: &str) -> SearchResult {
        SearchResult {
            tools: vec![SearchItem {
                id: Uuid::new_v4(),
                slug: slug.to_string(),
                name: slug.to_string(),
            }],
            ..Default::default()
        }
    }

    fn opened() -> CommandMenuState {
        let mut state = CommandMenuState::new();
        state.open();
        state
    }

    fn search(state: &mut CommandMenuState, query: &str) -> u64 {
        let ticket = state.type_input(query);
        match state.settle(ticket) {
            SearchAction::Search { generation, .. } => generation,
            SearchAction::Skip => panic!("expected a search for {query:?}"),
        }
    }

    #[test]
    fn short_queries_issue_no_search_and_clear_results() {
        let mut state = opened();
        let generation = search(&mut state, "acme");
        state.finish_search(generation, result_with_tool("acme"));

        for query in ["", "a", "  a  ", "   "] {
            let ticket = state.type_input(query);
            assert_eq!(state.settle(ticket), SearchAction::Skip);
            assert_eq!(state.results, None);
            assert!(!state.is_searching);
        }
    }

    #[test]
    fn search_uses_trimmed_query_and_shows_loading() {
        let mut state = opened();
        let ticket = state.type_input("  plausible ");

        assert_eq!(
            state.settle(ticket),
            SearchAction::Search {
                generation: state.search_generation,
                query: "plausible".to_string()
            }
        );
        assert!(state.is_searching);
    }

    #[test]
    fn earlier_keystrokes_are_debounced_away() {
        let mut state = opened();
        let first = state.type_input("ac");
        let second = state.type_input("acm");

        assert_eq!(state.settle(first), SearchAction::Skip);
        assert!(matches!(state.settle(second), SearchAction::Search { .. }));
    }

    #[test]
    fn only_the_newest_response_is_applied() {
        let mut state = opened();
        let slow = search(&mut state, "ac");
        let fast = search(&mut state, "acme");

        assert!(state.finish_search(fast, result_with_tool("acme")));
        assert!(!state.finish_search(slow, result_with_tool("acorn")));

        assert_eq!(state.results.as_ref().unwrap().tools[0].slug, "acme");
        assert!(!state.is_searching);
    }

    #[test]
    fn results_are_replaced_not_merged() {
        let mut state = opened();
        let first = search(&mut state, "acme");
        state.finish_search(first, result_with_tool("acme"));
        let second = search(&mut state, "umami");
        state.finish_search(second, result_with_tool("umami"));

        let tools = &state.results.as_ref().unwrap().tools;
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].slug, "umami");
    }

    #[test]
    fn failed_search_clears_loading_and_keeps_previous_results() {
        let mut state = opened();
        let first = search(&mut state, "acme");
        state.finish_search(first, result_with_tool("acme"));
        let failing = search(&mut state, "acme cloud");

        assert!(state.fail_search(failing));
        assert!(!state.is_searching);
        assert_eq!(state.results.as_ref().unwrap().tools[0].slug, "acme");
    }

    #[test]
    fn stale_failure_does_not_stop_current_loading() {
        let mut state = opened();
        let old = search(&mut state, "ac");
        let _current = search(&mut state, "acme");

        assert!(!state.fail_search(old));
        assert!(state.is_searching);
    }

    #[test]
    fn closing_clears_query_and_results_after_delay() {
        let mut state = opened();
        let generation = search(&mut state, "acme");
        state.finish_search(generation, result_with_tool("acme"));

        let ticket = state.toggle().expect("closing yields a clear ticket");
        assert!(!state.open);
        assert_eq!(state.query, "acme");

        assert!(state.clear_after_close(ticket));
        assert!(state.query.is_empty());
        assert_eq!(state.results, None);
    }

    #[test]
    fn response_arriving_after_close_is_ignored() {
        let mut state = opened();
        let generation = search(&mut state, "acme");
        let ticket = state.close();
        state.clear_after_close(ticket);

        assert!(!state.finish_search(generation, result_with_tool("acme")));
        assert_eq!(state.results, None);
        assert!(!state.is_searching);
    }

    #[test]
    fn reopening_cancels_pending_clear_and_starts_empty() {
        let mut state = opened();
        state.type_input("acme");
        let ticket = state.close();

        state.open();
        assert!(state.query.is_empty());

        state.type_input("umami");
        assert!(!state.clear_after_close(ticket));
        assert_eq!(state.query, "umami");
    }

    #[test]
    fn keystroke_settling_after_close_does_not_search() {
        let mut state = opened();
        let ticket = state.type_input("acme");
        state.close();

        assert_eq!(state.settle(ticket), SearchAction::Skip);
    }

    #[test]
    fn selection_closes_and_yields_detail_path() {
        let mut state = opened();
        let (route, ticket) = state.select(EntityKind::Alternative, "notion");

        assert_eq!(route.to_string(), "/admin/alternatives/notion");
        assert!(!state.open);
        assert!(state.clear_after_close(ticket));
    }

    #[test]
    fn create_shortcut_yields_new_path() {
        let mut state = opened();
        let (route, _) = state.create(EntityKind::Category);

        assert_eq!(route.to_string(), "/admin/categories/new");
        assert!(!state.open);
    }

    #[test]
    fn social_post_command_keeps_menu_open() {
        let mut state = opened();
        state.type_input("dub");

        assert_eq!(state.begin_social_post(), Some("dub"));
        assert!(state.open);
        assert_eq!(state.query, "dub");

        // One post at a time
        assert_eq!(state.begin_social_post(), None);
        state.finish_social_post();
        assert_eq!(state.begin_social_post(), Some("dub"));
        assert!(state.open);
    }
}
