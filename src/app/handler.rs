//! Event handling and state transition logic.
//!
//! The plugin shim translates Zellij events into [`Event`]s and passes them to
//! [`handle_event`]. The handler dispatches container operations, moves the
//! presentation state along, and collects the side effects to run.
//!
//! After every event the fetch effect is given a look at the container. Whether the
//! change came from typing, the filter panel or elsewhere, a differing query or
//! filter set arms the debounce timer.
//!
//! # Event Types
//!
//! - **Navigation**: `CursorDown`, `CursorUp`, `OpenDetail`, `Back`, `ShowSearch`, `ShowFavorites`
//! - **Search bar**: `SearchMode`, `Char`, `Backspace`, `SubmitSearch`, `ExitSearch`
//! - **Filter panel**: `FiltersMode`, `NextFilter`, `PreviousFilter`, `CycleFilter`, `ClearFilters`, `ExitFilters`
//! - **Preferences**: `ToggleFavorite`, `Rate`, `CycleSort`, `CycleViewMode`
//! - **Onboarding**: `OnboardingNext`, `OnboardingBack`, `OnboardingSkip`
//! - **Host**: `PermissionsResult`, `Timer`, `WebRequestResult`
//!
//! # Example
//!
//! ```rust
//! use recipe_box::{handle_event, initialize, Config, Event};
//!
//! let mut app = initialize(&Config::default());
//! let (render, actions) = handle_event(&mut app, &Event::CycleSort)?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), recipe_box::RecipeBoxError>(())
//! ```

use super::actions::Action;
use super::modes::{InputMode, OnboardingStep};
use super::navigation::Route;
use super::runtime::App;
use crate::domain::error::Result;
use crate::domain::search::FilterField;
use std::collections::BTreeMap;

/// Message shown when the host refuses the permissions the plugin needs.
pub const PERMISSION_DENIED_MESSAGE: &str =
    "Web access was not granted. Reopen the plugin and allow it to search recipes.";

/// Events triggered by user input or by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor to the next recipe (wraps).
    CursorDown,
    /// Moves the cursor to the previous recipe (wraps).
    CursorUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Opens the detail view for the recipe under the cursor.
    OpenDetail,
    /// Leaves the detail view.
    Back,
    ShowSearch,
    ShowFavorites,

    /// Focuses the search bar, seeded with the current query.
    SearchMode,
    Char(char),
    Backspace,
    /// Applies the search bar contents as the new query, unless blank.
    SubmitSearch,
    /// Leaves the search bar without applying edits.
    ExitSearch,

    /// Opens the filter panel on its first field.
    FiltersMode,
    NextFilter,
    PreviousFilter,
    /// Moves the focused filter to its next or previous option.
    CycleFilter {
        forward: bool,
    },
    ClearFilters,
    ExitFilters,

    CycleSort,
    CycleViewMode,
    /// Toggles favorite on the focused recipe.
    ToggleFavorite,
    /// Rates the focused recipe.
    Rate(u8),
    /// Opens the focused recipe's source page in a browser.
    OpenOriginal,

    OnboardingNext,
    OnboardingBack,
    OnboardingSkip,

    /// Reports whether the host granted the requested permissions.
    PermissionsResult {
        granted: bool,
    },

    /// A host timer armed by [`Action::ArmTimer`] fired.
    Timer,

    /// The host finished a web request issued by [`Action::WebRequest`].
    WebRequestResult {
        status: u16,
        body: Vec<u8>,
        context: BTreeMap<String, String>,
    },
}

impl Event {
    /// Whether the event came from the keyboard.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        !matches!(
            self,
            Self::PermissionsResult { .. } | Self::Timer | Self::WebRequestResult { .. }
        )
    }
}

/// Processes an event, mutates the app, and returns actions to execute.
///
/// # Parameters
///
/// * `app` - Runtime state, mutated in place
/// * `event` - Event to process
///
/// # Returns
///
/// Whether the UI should re-render, and the side effects to run in order.
///
/// # Errors
///
/// Currently infallible in practice; the `Result` lets individual arms propagate
/// with `?`.
#[allow(clippy::too_many_lines)]
pub fn handle_event(app: &mut App, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventName(event)).entered();

    let mut render = false;
    if event.is_input() && app.view.notice.take().is_some() {
        render = true;
    }

    let (changed, mut actions) = dispatch(app, event)?;
    render |= changed;

    actions.extend(app.fetch.observe(&app.state));
    Ok((render, actions))
}

#[allow(clippy::too_many_lines)]
fn dispatch(app: &mut App, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::CursorDown => {
            let len = app.visible_recipes().len();
            app.view.cursor_down(len);
            Ok((true, vec![]))
        }
        Event::CursorUp => {
            let len = app.visible_recipes().len();
            app.view.cursor_up(len);
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::OpenDetail => {
            let Some(recipe) = app.focused_recipe().cloned() else {
                tracing::debug!("no recipe under cursor");
                return Ok((false, vec![]));
            };
            tracing::debug!(recipe = %recipe.uri, label = %recipe.label, "opening detail");
            app.state.set_selected_recipe(recipe);
            app.view.nav.push(Route::Detail);
            Ok((true, vec![]))
        }
        Event::Back => Ok((app.view.nav.pop(&mut app.state).is_some(), vec![])),
        Event::ShowSearch => {
            app.view.nav.reset_to(Route::Search, &mut app.state);
            app.view.cursor = 0;
            Ok((true, vec![]))
        }
        Event::ShowFavorites => {
            app.view.nav.reset_to(Route::Favorites, &mut app.state);
            app.view.input_mode = InputMode::Normal;
            app.view.cursor = 0;
            Ok((true, vec![]))
        }

        Event::SearchMode => {
            app.view.nav.reset_to(Route::Search, &mut app.state);
            app.view.input_mode = InputMode::Search;
            app.view.input.clone_from(&app.state.query);
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if app.view.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            app.view.input.push(*c);
            tracing::trace!(input = %app.view.input, "search input updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if app.view.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            app.view.input.pop();
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            if app.view.input.trim().is_empty() {
                tracing::debug!("ignoring blank search submit");
            } else {
                app.state.set_search_query(app.view.input.clone());
                app.view.cursor = 0;
            }
            app.view.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            app.view.input_mode = InputMode::Normal;
            app.view.input.clear();
            Ok((true, vec![]))
        }

        Event::FiltersMode => {
            app.view.nav.reset_to(Route::Search, &mut app.state);
            app.view.input_mode = InputMode::Filters(FilterField::MealType);
            Ok((true, vec![]))
        }
        Event::NextFilter | Event::PreviousFilter => {
            let InputMode::Filters(field) = app.view.input_mode else {
                return Ok((false, vec![]));
            };
            let field = if *event == Event::NextFilter {
                field.next()
            } else {
                field.previous()
            };
            app.view.input_mode = InputMode::Filters(field);
            Ok((true, vec![]))
        }
        Event::CycleFilter { forward } => {
            let InputMode::Filters(field) = app.view.input_mode else {
                return Ok((false, vec![]));
            };
            let patch = field.cycle(&app.state.filters, *forward);
            app.state.set_filters(&patch);
            app.view.cursor = 0;
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            app.state.clear_filters();
            app.view.cursor = 0;
            Ok((true, vec![]))
        }
        Event::ExitFilters => {
            app.view.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }

        Event::CycleSort => {
            app.state.set_sort_by(app.state.sort_by.next());
            app.view.cursor = 0;
            Ok((true, vec![]))
        }
        Event::CycleViewMode => {
            app.state.set_view_mode(app.state.view_mode.next());
            Ok((true, vec![]))
        }
        Event::ToggleFavorite => {
            let Some(id) = app.focused_recipe().map(|recipe| recipe.uri.clone()) else {
                return Ok((false, vec![]));
            };
            app.state.toggle_favorite(&id);
            app.view.notice = Some(if app.state.is_favorite(&id) {
                "Added to favorites!".to_string()
            } else {
                "Removed from favorites".to_string()
            });
            let len = app.visible_recipes().len();
            app.view.clamp_cursor(len);
            Ok((true, vec![]))
        }
        Event::Rate(value) => {
            let Some(id) = app.focused_recipe().map(|recipe| recipe.uri.clone()) else {
                return Ok((false, vec![]));
            };
            app.state.set_rating(&id, *value);
            if app.state.rating(&id) == Some(*value) {
                app.view.notice = Some(format!("Rated {value} stars!"));
            }
            Ok((true, vec![]))
        }
        Event::OpenOriginal => {
            let url = app.focused_recipe().and_then(|recipe| recipe.url.clone());
            Ok((false, url.map(|url| Action::OpenUrl { url }).into_iter().collect()))
        }

        Event::OnboardingNext => {
            match app.view.onboarding_step.next() {
                Some(step) => app.view.onboarding_step = step,
                None => finish_onboarding(app),
            }
            Ok((true, vec![]))
        }
        Event::OnboardingBack => {
            let Some(step) = app.view.onboarding_step.previous() else {
                return Ok((false, vec![]));
            };
            app.view.onboarding_step = step;
            Ok((true, vec![]))
        }
        Event::OnboardingSkip => {
            finish_onboarding(app);
            Ok((true, vec![]))
        }

        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::info!("permissions granted, enabling recipe search");
                app.fetch.enable();
            } else {
                tracing::warn!("permissions denied, recipe search unavailable");
                app.state.set_error(PERMISSION_DENIED_MESSAGE);
            }
            Ok((true, vec![]))
        }
        Event::Timer => {
            let actions = app.fetch.on_timer(&mut app.state);
            // Loading flips on for a request, or results clear on an empty search.
            Ok((true, actions))
        }
        Event::WebRequestResult {
            status,
            body,
            context,
        } => {
            let applied = app
                .fetch
                .on_response(&mut app.state, *status, body, context);
            if applied {
                app.view.cursor = 0;
            }
            Ok((applied, vec![]))
        }
    }
}

fn finish_onboarding(app: &mut App) {
    tracing::debug!(step = ?app.view.onboarding_step, "onboarding finished");
    app.state.complete_onboarding();
    app.view.onboarding_step = OnboardingStep::FIRST;
}

/// Debug view of an event that leaves response bodies out of span fields.
struct EventName<'a>(&'a Event);

impl std::fmt::Debug for EventName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::WebRequestResult { status, body, .. } => f
                .debug_struct("WebRequestResult")
                .field("status", status)
                .field("body_len", &body.len())
                .finish_non_exhaustive(),
            other => std::fmt::Debug::fmt(other, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::AppState;
    use crate::domain::recipe::Recipe;
    use crate::domain::search::SortKey;
    use crate::fetch::{ApiConfig, FetchEffect, DEFAULT_DEBOUNCE};
    use crate::storage::MemoryStorage;
    use crate::ui::Theme;
    use pretty_assertions::assert_eq;

    fn app_with(recipes: Vec<Recipe>) -> App {
        let mut state = AppState::with_store(Box::new(MemoryStorage::new()), "popular");
        state.set_recipes(recipes);
        App::new(
            state,
            FetchEffect::new(ApiConfig::default(), DEFAULT_DEBOUNCE),
            Theme::default(),
        )
    }

    fn recipe(uri: &str, label: &str) -> Recipe {
        let mut recipe = Recipe::new(uri, label);
        recipe.url = Some(format!("https://recipes.test/{uri}"));
        recipe
    }

    fn send(app: &mut App, event: Event) -> (bool, Vec<Action>) {
        handle_event(app, &event).unwrap()
    }

    #[test]
    fn blank_submit_keeps_query() {
        let mut app = app_with(vec![]);
        send(&mut app, Event::SearchMode);
        assert_eq!(app.view.input, "popular");

        for _ in 0..7 {
            send(&mut app, Event::Backspace);
        }
        send(&mut app, Event::Char(' '));
        send(&mut app, Event::SubmitSearch);

        assert_eq!(app.state.query, "popular");
        assert_eq!(app.view.input_mode, InputMode::Normal);
    }

    #[test]
    fn submit_applies_query_verbatim() {
        let mut app = app_with(vec![]);
        send(&mut app, Event::SearchMode);
        app.view.input.clear();
        for c in " tacos".chars() {
            send(&mut app, Event::Char(c));
        }
        send(&mut app, Event::SubmitSearch);
        assert_eq!(app.state.query, " tacos");
    }

    #[test]
    fn favorite_toggle_sets_notice_until_next_key() {
        let mut app = app_with(vec![recipe("r1", "Soup")]);

        send(&mut app, Event::ToggleFavorite);
        assert!(app.state.is_favorite("r1"));
        assert_eq!(app.view.notice.as_deref(), Some("Added to favorites!"));

        send(&mut app, Event::ToggleFavorite);
        assert_eq!(app.view.notice.as_deref(), Some("Removed from favorites"));

        let (render, _) = send(&mut app, Event::CycleViewMode);
        assert!(render);
        assert_eq!(app.view.notice, None);
    }

    #[test]
    fn rating_notice_only_for_valid_values() {
        let mut app = app_with(vec![recipe("r1", "Soup")]);

        send(&mut app, Event::Rate(4));
        assert_eq!(app.state.rating("r1"), Some(4));
        assert_eq!(app.view.notice.as_deref(), Some("Rated 4 stars!"));

        send(&mut app, Event::Rate(9));
        assert_eq!(app.state.rating("r1"), Some(4));
        assert_eq!(app.view.notice, None);
    }

    #[test]
    fn detail_follows_sorted_cursor_and_back_clears_selection() {
        let mut app = app_with(vec![recipe("b", "Banana"), recipe("a", "Apple")]);
        send(&mut app, Event::CycleSort);
        assert_eq!(app.state.sort_by, SortKey::NameAsc);

        send(&mut app, Event::OpenDetail);
        assert_eq!(app.view.nav.current(), Route::Detail);
        assert_eq!(app.state.selected_recipe.as_ref().map(|r| r.label.as_str()), Some("Apple"));

        let (_, actions) = send(&mut app, Event::OpenOriginal);
        assert_eq!(
            actions,
            vec![Action::OpenUrl {
                url: "https://recipes.test/a".to_string()
            }]
        );

        send(&mut app, Event::Back);
        assert_eq!(app.view.nav.current(), Route::Search);
        assert!(app.state.selected_recipe.is_none());
    }

    #[test]
    fn favorites_screen_lists_only_favorites() {
        let mut app = app_with(vec![recipe("a", "Apple"), recipe("b", "Banana")]);
        send(&mut app, Event::CursorDown);
        send(&mut app, Event::ToggleFavorite);
        send(&mut app, Event::ShowFavorites);

        let labels: Vec<&str> = app.visible_recipes().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Banana"]);

        send(&mut app, Event::ToggleFavorite);
        assert!(app.visible_recipes().is_empty());
        assert_eq!(app.view.cursor, 0);
    }

    #[test]
    fn filter_panel_cycles_focused_field() {
        let mut app = app_with(vec![]);
        send(&mut app, Event::FiltersMode);
        send(&mut app, Event::NextFilter);
        assert_eq!(app.view.input_mode, InputMode::Filters(FilterField::Cuisine));

        send(&mut app, Event::CycleFilter { forward: true });
        assert_eq!(app.state.filters.cuisine, "italian");

        send(&mut app, Event::ClearFilters);
        assert_eq!(app.state.filters.active_count(), 0);
    }

    #[test]
    fn filter_keys_outside_panel_are_ignored() {
        let mut app = app_with(vec![]);
        let (render, _) = send(&mut app, Event::CycleFilter { forward: true });
        assert!(!render);
        assert_eq!(app.state.filters.meal_type, "");
    }

    #[test]
    fn onboarding_walks_panels_then_completes() {
        let mut app = app_with(vec![]);
        assert!(app.state.show_onboarding);

        send(&mut app, Event::OnboardingNext);
        send(&mut app, Event::OnboardingBack);
        assert_eq!(app.view.onboarding_step, OnboardingStep::Welcome);

        for _ in 0..4 {
            send(&mut app, Event::OnboardingNext);
        }
        assert!(!app.state.show_onboarding);
    }

    #[test]
    fn denied_permissions_surface_an_error() {
        let mut app = app_with(vec![]);
        let (_, actions) = send(&mut app, Event::PermissionsResult { granted: false });
        assert!(actions.is_empty());
        assert_eq!(app.state.error.as_deref(), Some(PERMISSION_DENIED_MESSAGE));
    }

    #[test]
    fn granted_permissions_arm_initial_search() {
        let mut app = app_with(vec![]);
        let (_, actions) = send(&mut app, Event::PermissionsResult { granted: true });
        assert_eq!(actions, vec![Action::ArmTimer { millis: 500 }]);
    }
}
