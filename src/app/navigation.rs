//! Screen navigation stack.
//!
//! The bottom of the stack is one of the two top-level screens (search results or
//! favorites). The detail view is pushed on top of whichever screen opened it, so
//! going back returns there. Popping a detail route clears the container's selected
//! recipe, keeping the two in step.

use crate::app::state::AppState;

/// A screen of the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Search bar and results.
    Search,
    /// Favorited recipes among the held results.
    Favorites,
    /// Full view of the selected recipe.
    Detail,
}

impl Route {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Search => "Recipes",
            Self::Favorites => "Favorites",
            Self::Detail => "Recipe",
        }
    }
}

/// Stack of routes with a non-removable root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    routes: Vec<Route>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self {
            routes: vec![Route::Search],
        }
    }
}

impl NavigationStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The route currently displayed.
    #[must_use]
    pub fn current(&self) -> Route {
        self.routes.last().copied().unwrap_or(Route::Search)
    }

    /// The top-level screen under any pushed routes.
    #[must_use]
    pub fn root(&self) -> Route {
        self.routes.first().copied().unwrap_or(Route::Search)
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.routes.len()
    }

    /// Pushes `route` unless it is already on top.
    pub fn push(&mut self, route: Route) {
        if self.current() != route {
            tracing::debug!(from = ?self.current(), to = ?route, "navigate");
            self.routes.push(route);
        }
    }

    /// Pops the top route, never the root.
    ///
    /// # Returns
    ///
    /// The popped route, or `None` when already at the root.
    pub fn pop(&mut self, state: &mut AppState) -> Option<Route> {
        if self.routes.len() <= 1 {
            return None;
        }
        let popped = self.routes.pop()?;
        if popped == Route::Detail {
            state.clear_selected_recipe();
        }
        tracing::debug!(popped = ?popped, now = ?self.current(), "navigate back");
        Some(popped)
    }

    /// Switches to a top-level screen, discarding pushed routes.
    pub fn reset_to(&mut self, root: Route, state: &mut AppState) {
        while self.pop(state).is_some() {}
        self.routes = vec![root];
    }
}
