//! View model types representing renderable UI state.
//!
//! View models are computed from [`App`] by [`compute_viewmodel`] and consumed by the
//! renderer. They contain no business logic, only display-ready data: numbers are
//! already divided per serving, label lists already capped and highlight ranges
//! already matched.

use crate::app::{App, InputMode, Route};
use crate::domain::recipe::Recipe;
use crate::domain::search::FilterField;
use crate::ui::helpers::highlight_ranges;

/// Diet labels shown on a card.
pub const CARD_DIET_LABELS: usize = 3;

/// Health labels shown in the detail view.
pub const DETAIL_HEALTH_LABELS: usize = 5;

/// Nutrients listed in the detail view, as (API code, display label).
pub const DETAIL_NUTRIENTS: [(&str, &str); 6] = [
    ("ENERC_KCAL", "Calories"),
    ("PROCNT", "Protein"),
    ("CHOCDF", "Carbs"),
    ("FAT", "Fat"),
    ("FIBTG", "Fiber"),
    ("SUGAR", "Sugar"),
];

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub screen: Screen,
    pub footer: FooterInfo,
}

/// What fills the space between header and footer.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Onboarding(OnboardingPanel),
    Search {
        toolbar: ToolbarInfo,
        body: ResultsBody,
    },
    Favorites {
        /// Favorites saved in total, including ones not in the current results.
        saved: usize,
        body: ResultsBody,
    },
    Detail(Box<DetailInfo>),
}

/// Result area of the search and favorites screens.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsBody {
    Cards {
        items: Vec<CardItem>,
        layout: crate::domain::search::ViewMode,
        selected_index: usize,
    },
    Empty(EmptyState),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Screen name shown after the title.
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
    /// Confirmation replacing the keybindings until the next key.
    pub notice: Option<String>,
}

/// Kind of message in an empty result area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    Info,
    Loading,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub kind: EmptyKind,
    pub message: String,
    pub subtitle: String,
}

/// Search bar plus the filter, sort and layout chips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarInfo {
    pub search: SearchBarInfo,
    pub filters: Vec<FilterChip>,
    pub active_filters: usize,
    /// Whether the filter panel has focus.
    pub filters_open: bool,
    pub sort_label: String,
    pub layout_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Edit buffer while typing, the applied query otherwise.
    pub query: String,
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: String,
    pub value: String,
    pub is_set: bool,
    pub is_focused: bool,
}

/// Display information for one recipe card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardItem {
    pub name: String,
    pub source: String,
    pub is_selected: bool,
    pub is_favorite: bool,
    pub rating: Option<u8>,
    pub minutes: u32,
    pub calories_per_serving: u32,
    pub servings: u32,
    pub diet_labels: Vec<String>,

    /// Character ranges of the name matching the query, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutrientRow {
    pub label: String,
    pub value: String,
}

/// Everything shown for the selected recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailInfo {
    pub name: String,
    pub source: String,
    pub url: Option<String>,
    pub is_favorite: bool,
    pub rating: Option<u8>,
    pub minutes: u32,
    pub calories_per_serving: u32,
    pub servings: u32,
    pub diet_labels: Vec<String>,
    pub health_labels: Vec<String>,
    /// Labels beyond [`DETAIL_HEALTH_LABELS`] that were left out.
    pub hidden_health_labels: usize,
    pub cuisine_types: Vec<String>,
    pub meal_types: Vec<String>,
    pub nutrients: Vec<NutrientRow>,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingPanel {
    /// 1-based position.
    pub position: usize,
    pub total: usize,
    pub title: String,
    pub description: String,
}

/// Computes the view model for the current app state.
///
/// # Parameters
///
/// * `app` - Runtime state
///
/// # Returns
///
/// Display-ready data for the current screen.
#[must_use]
pub fn compute_viewmodel(app: &App) -> UIViewModel {
    let route = app.view.nav.current();
    let header = HeaderInfo {
        title: "Recipe Box".to_string(),
        section: route.title().to_string(),
    };

    let screen = if app.state.show_onboarding {
        Screen::Onboarding(onboarding_panel(app))
    } else {
        match route {
            Route::Detail => app.state.selected_recipe.as_ref().map_or_else(
                || Screen::Search {
                    toolbar: toolbar(app),
                    body: results_body(app),
                },
                |recipe| Screen::Detail(Box::new(detail_info(app, recipe))),
            ),
            Route::Favorites => Screen::Favorites {
                saved: app.state.favorites().len(),
                body: results_body(app),
            },
            Route::Search => Screen::Search {
                toolbar: toolbar(app),
                body: results_body(app),
            },
        }
    };

    UIViewModel {
        header,
        footer: FooterInfo {
            keybindings: keybindings(app).to_string(),
            notice: app.view.notice.clone(),
        },
        screen,
    }
}

fn onboarding_panel(app: &App) -> OnboardingPanel {
    let step = app.view.onboarding_step;
    OnboardingPanel {
        position: step.index() + 1,
        total: crate::app::OnboardingStep::ALL.len(),
        title: step.title().to_string(),
        description: step.description().to_string(),
    }
}

fn toolbar(app: &App) -> ToolbarInfo {
    let editing = app.view.input_mode == InputMode::Search;
    let focused = match app.view.input_mode {
        InputMode::Filters(field) => Some(field),
        InputMode::Normal | InputMode::Search => None,
    };

    let filters = FilterField::ALL
        .iter()
        .map(|&field| {
            let current = field.current(&app.state.filters);
            FilterChip {
                label: field.label().to_string(),
                is_set: !current.is_empty(),
                value: if current.is_empty() {
                    field.any_label().to_string()
                } else {
                    current
                },
                is_focused: focused == Some(field),
            }
        })
        .collect();

    ToolbarInfo {
        search: SearchBarInfo {
            query: if editing {
                app.view.input.clone()
            } else {
                app.state.query.clone()
            },
            editing,
        },
        filters,
        active_filters: app.state.filters.active_count(),
        filters_open: focused.is_some(),
        sort_label: app.state.sort_by.label().to_string(),
        layout_label: app.state.view_mode.as_str().to_string(),
    }
}

fn results_body(app: &App) -> ResultsBody {
    let on_favorites = app.view.nav.root() == Route::Favorites;

    if !on_favorites {
        if app.state.is_loading {
            return ResultsBody::Empty(EmptyState {
                kind: EmptyKind::Loading,
                message: "Searching recipes...".to_string(),
                subtitle: format!("Looking for \"{}\"", app.state.query.trim()),
            });
        }
        if let Some(error) = &app.state.error {
            return ResultsBody::Empty(EmptyState {
                kind: EmptyKind::Error,
                message: error.clone(),
                subtitle: "Try again or adjust your search".to_string(),
            });
        }
    }

    let visible = app.visible_recipes();
    if visible.is_empty() {
        let (message, subtitle) = if on_favorites {
            (
                "No favorites yet",
                "Press * on a recipe to save it here",
            )
        } else {
            (
                "No recipes found",
                "Try a different search or clear some filters",
            )
        };
        return ResultsBody::Empty(EmptyState {
            kind: EmptyKind::Info,
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        });
    }

    let query = app.state.query.trim();
    let items = visible
        .iter()
        .enumerate()
        .map(|(index, recipe)| CardItem {
            name: recipe.label.clone(),
            source: recipe.source.clone().unwrap_or_default(),
            is_selected: index == app.view.cursor,
            is_favorite: app.state.is_favorite(&recipe.uri),
            rating: app.state.rating(&recipe.uri),
            minutes: whole(recipe.effective_total_time()),
            calories_per_serving: whole(recipe.calories_per_serving()),
            servings: whole(recipe.serving_divisor()),
            diet_labels: recipe
                .diet_labels
                .iter()
                .take(CARD_DIET_LABELS)
                .cloned()
                .collect(),
            highlight_ranges: highlight_ranges(&recipe.label, query),
        })
        .collect();

    ResultsBody::Cards {
        items,
        layout: app.state.view_mode,
        selected_index: app.view.cursor,
    }
}

fn detail_info(app: &App, recipe: &Recipe) -> DetailInfo {
    DetailInfo {
        name: recipe.label.clone(),
        source: recipe.source.clone().unwrap_or_default(),
        url: recipe.url.clone(),
        is_favorite: app.state.is_favorite(&recipe.uri),
        rating: app.state.rating(&recipe.uri),
        minutes: whole(recipe.effective_total_time()),
        calories_per_serving: whole(recipe.calories_per_serving()),
        servings: whole(recipe.serving_divisor()),
        diet_labels: recipe.diet_labels.clone(),
        health_labels: recipe
            .health_labels
            .iter()
            .take(DETAIL_HEALTH_LABELS)
            .cloned()
            .collect(),
        hidden_health_labels: recipe.health_labels.len().saturating_sub(DETAIL_HEALTH_LABELS),
        cuisine_types: recipe.cuisine_type.clone(),
        meal_types: recipe.meal_type.clone(),
        nutrients: DETAIL_NUTRIENTS
            .iter()
            .map(|(code, label)| NutrientRow {
                label: (*label).to_string(),
                value: recipe.nutrient_per_serving(code),
            })
            .collect(),
        ingredients: recipe.ingredient_lines.clone(),
    }
}

fn keybindings(app: &App) -> &'static str {
    if app.state.show_onboarding {
        return "Enter/→: next | ←: back | Esc: skip";
    }
    match (app.view.nav.current(), app.view.input_mode) {
        (Route::Detail, _) => "*: favorite | 1-5: rate | o: open original | Esc: back",
        (_, InputMode::Search) => "Enter: search | Esc: cancel",
        (_, InputMode::Filters(_)) => "Tab: next filter | ←/→: change | c: clear all | Esc: done",
        (Route::Favorites, InputMode::Normal) => {
            "j/k: move | Enter: details | *: unfavorite | 1-5: rate | S: search | q: quit"
        }
        (Route::Search, InputMode::Normal) => {
            "/: search | f: filters | s: sort | v: view | *: favorite | Enter: details | F: favorites | q: quit"
        }
    }
}

/// Rounds a non-negative display quantity to a whole number.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppState, Event, handle_event};
    use crate::domain::recipe::Nutrient;
    use crate::fetch::{ApiConfig, FetchEffect, DEFAULT_DEBOUNCE};
    use crate::ui::Theme;
    use pretty_assertions::assert_eq;

    fn app() -> App {
        let mut state = AppState::new("chicken");
        state.complete_onboarding();
        App::new(
            state,
            FetchEffect::new(ApiConfig::default(), DEFAULT_DEBOUNCE),
            Theme::default(),
        )
    }

    fn curry() -> Recipe {
        let mut recipe = Recipe::new("r1", "Chicken Curry");
        recipe.calories = 1200.0;
        recipe.servings = 4.0;
        recipe.diet_labels = vec!["High-Protein".into(), "Low-Carb".into(), "Balanced".into(), "Low-Fat".into()];
        recipe.health_labels = (0..7).map(|i| format!("Label {i}")).collect();
        recipe.total_nutrients.insert(
            "PROCNT".to_string(),
            Nutrient {
                label: "Protein".to_string(),
                quantity: 80.0,
                unit: "g".to_string(),
            },
        );
        recipe
    }

    #[test]
    fn onboarding_takes_over_the_screen() {
        let mut app = app();
        app.state.show_onboarding = true;
        let vm = compute_viewmodel(&app);
        let Screen::Onboarding(panel) = vm.screen else {
            panic!("expected onboarding");
        };
        assert_eq!(panel.position, 1);
        assert_eq!(panel.total, 4);
    }

    #[test]
    fn cards_carry_per_serving_stats_and_capped_labels() {
        let mut app = app();
        app.state.set_recipes(vec![curry()]);
        app.state.set_rating("r1", 4);

        let vm = compute_viewmodel(&app);
        let Screen::Search { body: ResultsBody::Cards { items, .. }, .. } = vm.screen else {
            panic!("expected cards");
        };
        assert_eq!(items[0].calories_per_serving, 300);
        assert_eq!(items[0].servings, 4);
        assert_eq!(items[0].minutes, 30);
        assert_eq!(items[0].diet_labels.len(), CARD_DIET_LABELS);
        assert_eq!(items[0].rating, Some(4));
        assert_eq!(items[0].highlight_ranges, vec![(0, 7)]);
    }

    #[test]
    fn error_replaces_results() {
        let mut app = app();
        app.state.set_error("Request failed with status code 500");
        let vm = compute_viewmodel(&app);
        let Screen::Search { body: ResultsBody::Empty(empty), .. } = vm.screen else {
            panic!("expected empty state");
        };
        assert_eq!(empty.kind, EmptyKind::Error);
        assert_eq!(empty.message, "Request failed with status code 500");
    }

    #[test]
    fn detail_lists_nutrients_and_caps_health_labels() {
        let mut app = app();
        app.state.set_recipes(vec![curry()]);
        handle_event(&mut app, &Event::OpenDetail).unwrap();

        let vm = compute_viewmodel(&app);
        let Screen::Detail(detail) = vm.screen else {
            panic!("expected detail");
        };
        assert_eq!(detail.health_labels.len(), DETAIL_HEALTH_LABELS);
        assert_eq!(detail.hidden_health_labels, 2);
        assert_eq!(detail.nutrients[0].value, "N/A");
        assert_eq!(detail.nutrients[1].value, "20g");
    }

    #[test]
    fn favorites_count_includes_recipes_outside_results() {
        let mut app = app();
        app.state.toggle_favorite("elsewhere");
        handle_event(&mut app, &Event::ShowFavorites).unwrap();

        let vm = compute_viewmodel(&app);
        let Screen::Favorites { saved, body } = vm.screen else {
            panic!("expected favorites");
        };
        assert_eq!(saved, 1);
        assert!(matches!(body, ResultsBody::Empty(_)));
    }

    #[test]
    fn filter_chips_show_any_label_when_unset() {
        let mut app = app();
        handle_event(&mut app, &Event::FiltersMode).unwrap();
        handle_event(&mut app, &Event::CycleFilter { forward: true }).unwrap();

        let vm = compute_viewmodel(&app);
        let Screen::Search { toolbar, .. } = vm.screen else {
            panic!("expected search");
        };
        assert_eq!(toolbar.active_filters, 1);
        assert!(toolbar.filters_open);
        assert_eq!(toolbar.filters[0].value, "breakfast");
        assert!(toolbar.filters[0].is_focused);
        assert_eq!(toolbar.filters[1].value, "All Cuisines");
    }
}
