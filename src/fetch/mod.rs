//! Remote fetch effect.
//!
//! Watches the search inputs held by [`AppState`], debounces changes, issues recipe
//! search requests through the host and feeds results or errors back into the
//! container.
//!
//! # Flow
//!
//! ```text
//! inputs change ─→ observe() ─→ ArmTimer ─→ host timer ─→ on_timer()
//!                                                          │
//!                        ┌── search text empty ── set_recipes([])
//!                        └── otherwise ── set_loading(true) + WebRequest
//!                                                          │
//! host result ─→ on_response() ─→ stale? drop : set_recipes / set_error
//! ```
//!
//! # Modules
//!
//! - [`request`]: Search text and URL construction
//! - [`response`]: Envelope decoding and error messages
//! - [`debounce`]: Trailing-edge debounce over uncancellable timers
//! - [`tracker`]: Sequence tokens for stale-response discard

pub mod debounce;
pub mod request;
pub mod response;
pub mod tracker;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use request::{build_url, search_text, ApiConfig, DEFAULT_API_BASE};
pub use response::parse_response;
pub use tracker::{RequestTracker, REQUEST_ID_KEY};

use crate::app::actions::Action;
use crate::app::state::AppState;
use crate::domain::search::SearchInputs;
use crate::observability::TraceContext;
use std::collections::BTreeMap;
use std::time::Duration;

/// Debounced, sequence-checked bridge between the container and the recipe API.
#[derive(Debug, Clone)]
pub struct FetchEffect {
    api: ApiConfig,
    debouncer: Debouncer,
    tracker: RequestTracker,
    last_inputs: Option<SearchInputs>,
    enabled: bool,
}

impl FetchEffect {
    /// Creates a disabled effect; see [`FetchEffect::enable`].
    #[must_use]
    pub fn new(api: ApiConfig, debounce: Duration) -> Self {
        Self {
            api,
            debouncer: Debouncer::new(debounce),
            tracker: RequestTracker::new(),
            last_inputs: None,
            enabled: false,
        }
    }

    /// Starts reacting to input changes. Called once web access is granted.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Compares the container's search inputs with the last observed ones and arms
    /// the debounce timer when they differ.
    ///
    /// The first observation after enabling always counts as a change, which is what
    /// triggers the initial search.
    #[must_use]
    pub fn observe(&mut self, state: &AppState) -> Vec<Action> {
        if !self.enabled {
            return vec![];
        }

        let inputs = state.search_inputs();
        if self.last_inputs.as_ref() == Some(&inputs) {
            return vec![];
        }

        tracing::debug!(query = %inputs.query, filters = ?inputs.filters, "search inputs changed");
        self.last_inputs = Some(inputs);

        let window = self.debouncer.arm();
        let millis = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        vec![Action::ArmTimer { millis }]
    }

    /// Handles a fired host timer.
    ///
    /// When the quiet period has elapsed, reads the container's current inputs and
    /// either short-circuits to an empty result or issues a request.
    #[must_use]
    pub fn on_timer(&mut self, state: &mut AppState) -> Vec<Action> {
        if !self.debouncer.on_timer() {
            return vec![];
        }

        let _span = tracing::debug_span!("fetch_recipes").entered();
        let inputs = state.search_inputs();

        let Some(url) = build_url(&self.api, &inputs) else {
            tracing::debug!("empty search, skipping request");
            // A request still in flight must not overwrite the cleared list.
            self.tracker.issue();
            state.set_recipes(vec![]);
            return vec![];
        };

        let request_id = self.tracker.issue();
        let mut context = BTreeMap::new();
        context.insert(REQUEST_ID_KEY.to_string(), request_id.to_string());
        if let Some(trace) = TraceContext::from_current() {
            trace.inject(&mut context);
        }

        tracing::info!(request_id, search = %search_text(&inputs), "issuing recipe search");
        state.set_loading(true);

        vec![Action::WebRequest { url, context }]
    }

    /// Applies a host web-request result to the container.
    ///
    /// # Returns
    ///
    /// `true` if the container changed, `false` if the response was stale.
    pub fn on_response(
        &mut self,
        state: &mut AppState,
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> bool {
        let span = tracing::debug_span!("fetch_response", status);
        if let Some(trace) = TraceContext::extract(context) {
            trace.adopt(&span);
        }
        let _span = span.entered();

        let Some(request_id) = RequestTracker::id_from_context(context) else {
            tracing::debug!("web request result without request id, ignoring");
            return false;
        };

        if !self.tracker.is_current(request_id) {
            tracing::debug!(request_id, latest = ?self.tracker.in_flight(), "discarding stale response");
            return false;
        }
        self.tracker.settle(request_id);

        match parse_response(status, body) {
            Ok(recipes) => {
                tracing::info!(request_id, count = recipes.len(), "recipes received");
                state.set_recipes(recipes);
            }
            Err(e) => {
                tracing::warn!(request_id, error = %e, "recipe search failed");
                // set_recipes clears the error, so it has to run first.
                state.set_recipes(vec![]);
                state.set_error(e.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::FilterPatch;
    use pretty_assertions::assert_eq;

    const HITS: &[u8] = br#"{"hits":[{"recipe":{"uri":"r1","label":"Soup"}}]}"#;

    fn effect() -> FetchEffect {
        let mut effect = FetchEffect::new(
            ApiConfig {
                api_base: "https://recipes.test/v2".to_string(),
                app_id: "id".to_string(),
                app_key: "key".to_string(),
            },
            Duration::from_millis(500),
        );
        effect.enable();
        effect
    }

    fn fire_all(effect: &mut FetchEffect, state: &mut AppState, timers: usize) -> Vec<Action> {
        (0..timers).flat_map(|_| effect.on_timer(state)).collect()
    }

    fn context_of(action: &Action) -> BTreeMap<String, String> {
        match action {
            Action::WebRequest { context, .. } => context.clone(),
            other => panic!("expected web request, got {other:?}"),
        }
    }

    #[test]
    fn disabled_effect_does_nothing() {
        let mut effect = FetchEffect::new(ApiConfig::default(), DEFAULT_DEBOUNCE);
        let state = AppState::new("popular");
        assert_eq!(effect.observe(&state), vec![]);
    }

    #[test]
    fn unchanged_inputs_do_not_rearm() {
        let mut effect = effect();
        let state = AppState::new("popular");
        assert_eq!(effect.observe(&state), vec![Action::ArmTimer { millis: 500 }]);
        assert_eq!(effect.observe(&state), vec![]);
    }

    #[test]
    fn burst_of_changes_issues_one_request_with_final_values() {
        let mut effect = effect();
        let mut state = AppState::new("");

        let mut timers = 0;
        for query in ["p", "pa", "pas", "past", "pasta"] {
            state.set_search_query(query);
            timers += effect.observe(&state).len();
        }
        state.set_filters(&FilterPatch {
            cuisine: Some("italian".into()),
            ..FilterPatch::default()
        });
        timers += effect.observe(&state).len();
        assert_eq!(timers, 6);

        let requests = fire_all(&mut effect, &mut state, timers);
        assert_eq!(requests.len(), 1);
        let Action::WebRequest { url, .. } = &requests[0] else {
            panic!("expected web request");
        };
        assert!(url.contains("q=pasta%20italian"), "{url}");
        assert!(state.is_loading);
    }

    #[test]
    fn empty_search_short_circuits_without_request() {
        let mut effect = effect();
        let mut state = AppState::new("soup");
        state.set_recipes(vec![crate::domain::Recipe::new("old", "Old")]);
        state.set_search_query("");

        let timers = effect.observe(&state).len();
        let actions = fire_all(&mut effect, &mut state, timers);

        assert_eq!(actions, vec![]);
        assert!(state.recipes.is_empty());
        assert!(!state.is_loading);
    }

    #[test]
    fn later_request_wins_regardless_of_arrival_order() {
        let mut effect = effect();
        let mut state = AppState::new("first");

        let timers = effect.observe(&state).len();
        let first = context_of(&fire_all(&mut effect, &mut state, timers)[0]);

        state.set_search_query("second");
        let timers = effect.observe(&state).len();
        let second = context_of(&fire_all(&mut effect, &mut state, timers)[0]);

        let second_body = br#"{"hits":[{"recipe":{"uri":"b","label":"Second"}}]}"#;
        assert!(effect.on_response(&mut state, 200, second_body, &second));
        assert!(!effect.on_response(&mut state, 200, HITS, &first));

        assert_eq!(state.recipes.len(), 1);
        assert_eq!(state.recipes[0].label, "Second");
    }

    #[test]
    fn stale_response_is_dropped_while_newer_is_in_flight() {
        let mut effect = effect();
        let mut state = AppState::new("first");

        let timers = effect.observe(&state).len();
        let first = context_of(&fire_all(&mut effect, &mut state, timers)[0]);

        state.set_search_query("second");
        let timers = effect.observe(&state).len();
        let _ = fire_all(&mut effect, &mut state, timers);

        assert!(!effect.on_response(&mut state, 200, HITS, &first));
        assert!(state.recipes.is_empty());
        assert!(state.is_loading);
    }

    #[test]
    fn failure_leaves_error_visible_and_list_empty() {
        let mut effect = effect();
        let mut state = AppState::new("soup");
        state.set_recipes(vec![crate::domain::Recipe::new("old", "Old")]);

        let timers = effect.observe(&state).len();
        let context = context_of(&fire_all(&mut effect, &mut state, timers)[0]);
        assert!(effect.on_response(&mut state, 429, b"", &context));

        assert!(state.recipes.is_empty());
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Request failed with status code 429"));
    }

    #[test]
    fn next_success_clears_error() {
        let mut effect = effect();
        let mut state = AppState::new("soup");
        state.set_error("Request failed with status code 500");

        let timers = effect.observe(&state).len();
        let context = context_of(&fire_all(&mut effect, &mut state, timers)[0]);
        assert!(effect.on_response(&mut state, 200, HITS, &context));

        assert!(state.error.is_none());
        assert_eq!(state.recipes.len(), 1);
    }
}
