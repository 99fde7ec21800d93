//! The plugin's complete runtime state.
//!
//! [`App`] bundles the state container with the fetch effect that watches it, the
//! presentation state and the active theme. The event handler takes it as a whole.

use super::derived::{favorite_recipes, sorted_recipes};
use super::navigation::Route;
use super::state::AppState;
use super::view::ViewState;
use crate::domain::recipe::Recipe;
use crate::fetch::FetchEffect;
use crate::ui::theme::Theme;

#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub view: ViewState,
    pub fetch: FetchEffect,
    pub theme: Theme,
}

impl App {
    #[must_use]
    pub fn new(state: AppState, fetch: FetchEffect, theme: Theme) -> Self {
        Self {
            state,
            view: ViewState::default(),
            fetch,
            theme,
        }
    }

    /// Recipes listed on the current top-level screen, in display order.
    ///
    /// The search screen applies the active sort. The favorites screen keeps held
    /// order.
    #[must_use]
    pub fn visible_recipes(&self) -> Vec<&Recipe> {
        match self.view.nav.root() {
            Route::Favorites => favorite_recipes(&self.state.recipes, self.state.favorites()),
            Route::Search | Route::Detail => sorted_recipes(&self.state.recipes, self.state.sort_by),
        }
    }

    /// The recipe that favorite, rate and open commands apply to.
    ///
    /// On the detail screen this is the selected recipe, elsewhere the recipe under
    /// the cursor.
    #[must_use]
    pub fn focused_recipe(&self) -> Option<&Recipe> {
        if self.view.nav.current() == Route::Detail {
            return self.state.selected_recipe.as_ref();
        }
        self.visible_recipes().get(self.view.cursor).copied()
    }
}
