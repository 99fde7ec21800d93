//! Application state container.
//!
//! [`AppState`] is the single mutable state tree of the plugin and the only place
//! where search inputs, results, preferences and session flags change. Each update
//! operation is synchronous and total: it never fails from the caller's point of
//! view.
//!
//! # Persistence
//!
//! Favorites, ratings and the onboarding flag are written through the injected
//! [`PreferenceStore`] immediately after the in-memory change. A failed write is
//! logged at `warn` and the in-memory value stays authoritative. Loads happen once,
//! when a store is attached, and fall back to empty values on any error.
//!
//! # Example
//!
//! ```rust
//! use recipe_box::app::AppState;
//! use recipe_box::storage::MemoryStorage;
//!
//! let mut state = AppState::with_store(Box::new(MemoryStorage::new()), "popular");
//! state.toggle_favorite("recipe_1");
//! assert!(state.is_favorite("recipe_1"));
//! ```

use crate::domain::preferences::{FavoritesSet, RatingsMap};
use crate::domain::recipe::Recipe;
use crate::domain::search::{FilterPatch, Filters, SearchInputs, SortKey, ViewMode};
use crate::storage::{MemoryStorage, PreferenceStore};

/// Query used on first open so that results appear without typing.
pub const DEFAULT_QUERY: &str = "popular";

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Current search query, stored verbatim.
    pub query: String,

    /// Active filters. Together with `query` they determine the fetch request.
    pub filters: Filters,

    /// Client-side ordering of `recipes`.
    pub sort_by: SortKey,

    /// Result layout.
    pub view_mode: ViewMode,

    /// Results of the last accepted fetch, in API order.
    pub recipes: Vec<Recipe>,

    pub is_loading: bool,

    /// Message of the last failed fetch, cleared by the next successful one.
    pub error: Option<String>,

    /// Recipe shown in the detail view.
    pub selected_recipe: Option<Recipe>,

    /// Whether the onboarding panels still need to be shown.
    pub show_onboarding: bool,

    favorites: FavoritesSet,
    ratings: RatingsMap,
    store: Box<dyn PreferenceStore>,
}

impl AppState {
    /// Creates a state backed by a throwaway in-memory store.
    ///
    /// Used until the host grants filesystem access and a real store can be attached
    /// with [`AppState::attach_store`].
    #[must_use]
    pub fn new(initial_query: impl Into<String>) -> Self {
        Self::with_store(Box::new(MemoryStorage::new()), initial_query)
    }

    /// Creates a state and hydrates preferences from `store`.
    ///
    /// # Parameters
    ///
    /// * `store` - Preference backend; loaded once here, written on every mutation
    /// * `initial_query` - Query to search for on first open
    #[must_use]
    pub fn with_store(store: Box<dyn PreferenceStore>, initial_query: impl Into<String>) -> Self {
        let mut state = Self {
            query: initial_query.into(),
            filters: Filters::default(),
            sort_by: SortKey::default(),
            view_mode: ViewMode::default(),
            recipes: Vec::new(),
            is_loading: false,
            error: None,
            selected_recipe: None,
            show_onboarding: true,
            favorites: FavoritesSet::new(),
            ratings: RatingsMap::new(),
            store,
        };
        state.hydrate();
        state
    }

    /// Replaces the preference backend and reloads favorites, ratings and the
    /// onboarding flag from it.
    pub fn attach_store(&mut self, store: Box<dyn PreferenceStore>) {
        self.store = store;
        self.hydrate();
    }

    fn hydrate(&mut self) {
        let _span = tracing::debug_span!("hydrate_preferences").entered();

        self.favorites = self.store.load_favorites().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load favorites, starting empty");
            FavoritesSet::new()
        });

        self.ratings = self.store.load_ratings().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load ratings, starting empty");
            RatingsMap::new()
        });

        self.show_onboarding = !self.store.onboarding_completed().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read onboarding flag");
            false
        });

        tracing::debug!(
            favorites = self.favorites.len(),
            ratings = self.ratings.len(),
            show_onboarding = self.show_onboarding,
            "preferences hydrated"
        );
    }

    /// Replaces the search query verbatim.
    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        tracing::debug!(query = %self.query, "search query set");
    }

    /// Merges `patch` into the filters, keeping keys the patch leaves unset.
    pub fn set_filters(&mut self, patch: &FilterPatch) {
        self.filters.merge(patch);
        tracing::debug!(filters = ?self.filters, "filters updated");
    }

    pub fn clear_filters(&mut self) {
        self.filters = Filters::default();
        tracing::debug!("filters cleared");
    }

    pub fn set_sort_by(&mut self, key: SortKey) {
        self.sort_by = key;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Replaces the held results wholesale and clears loading and error.
    pub fn set_recipes(&mut self, recipes: Vec<Recipe>) {
        tracing::debug!(count = recipes.len(), "recipes replaced");
        self.recipes = recipes;
        self.is_loading = false;
        self.error = None;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Records a fetch failure and clears loading.
    pub fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(error = %message, "fetch error recorded");
        self.error = Some(message);
        self.is_loading = false;
    }

    /// Flips favorite membership of `id` and persists the whole set.
    pub fn toggle_favorite(&mut self, id: &str) {
        let now_favorite = self.favorites.toggle(id);
        tracing::debug!(recipe = %id, now_favorite, "favorite toggled");

        if let Err(e) = self.store.save_favorites(&self.favorites) {
            tracing::warn!(error = %e, "failed to persist favorites");
        }
    }

    /// Sets or overwrites the rating of `id` and persists the whole map.
    ///
    /// Values outside `1..=5` are ignored and logged.
    pub fn set_rating(&mut self, id: &str, value: u8) {
        if let Err(e) = self.ratings.set(id, value) {
            tracing::warn!(recipe = %id, value, error = %e, "ignoring invalid rating");
            return;
        }
        tracing::debug!(recipe = %id, value, "rating set");

        if let Err(e) = self.store.save_ratings(&self.ratings) {
            tracing::warn!(error = %e, "failed to persist ratings");
        }
    }

    pub fn set_selected_recipe(&mut self, recipe: Recipe) {
        self.selected_recipe = Some(recipe);
    }

    pub fn clear_selected_recipe(&mut self) {
        self.selected_recipe = None;
    }

    /// Hides onboarding for good and persists the flag.
    pub fn complete_onboarding(&mut self) {
        self.show_onboarding = false;
        if let Err(e) = self.store.mark_onboarding_completed() {
            tracing::warn!(error = %e, "failed to persist onboarding flag");
        }
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    #[must_use]
    pub fn ratings(&self) -> &RatingsMap {
        &self.ratings
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    #[must_use]
    pub fn rating(&self, id: &str) -> Option<u8> {
        self.ratings.get(id)
    }

    /// Snapshot of the inputs the fetch effect watches.
    #[must_use]
    pub fn search_inputs(&self) -> SearchInputs {
        SearchInputs {
            query: self.query.clone(),
            filters: self.filters.clone(),
        }
    }
}
