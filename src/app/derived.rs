//! Derived result ordering.
//!
//! The held result list is never reordered in place. Each render computes the
//! display order from the raw list and the current [`SortKey`].
//!
//! All comparators feed `sort_by`, which is stable, so equal elements keep their API
//! order. Float keys use `partial_cmp` with `Equal` as the fallback for NaN.

use crate::domain::preferences::FavoritesSet;
use crate::domain::recipe::Recipe;
use crate::domain::search::SortKey;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Returns the held recipes in display order for `sort_by`.
///
/// # Parameters
///
/// * `recipes` - Results exactly as the API returned them
/// * `sort_by` - Active sort key
///
/// # Returns
///
/// References into `recipes`, reordered. `recipes` itself is untouched.
///
/// # Examples
///
/// ```
/// use recipe_box::app::derived::sorted_recipes;
/// use recipe_box::domain::{Recipe, SortKey};
///
/// let mut hearty = Recipe::new("a", "Hearty Stew");
/// hearty.calories = 1200.0;
/// hearty.servings = 4.0;
/// let mut salad = Recipe::new("b", "Side Salad");
/// salad.calories = 400.0;
/// salad.servings = 1.0;
///
/// let recipes = vec![salad, hearty];
/// let sorted = sorted_recipes(&recipes, SortKey::CaloriesAsc);
/// assert_eq!(sorted[0].label, "Hearty Stew");
/// ```
#[must_use]
pub fn sorted_recipes(recipes: &[Recipe], sort_by: SortKey) -> Vec<&Recipe> {
    let _span = tracing::trace_span!("sorted_recipes", count = recipes.len(), sort_by = %sort_by).entered();

    let mut ordered: Vec<&Recipe> = recipes.iter().collect();
    match sort_by {
        SortKey::Relevance => {}
        SortKey::NameAsc => ordered.sort_by(|a, b| compare_names(a, b)),
        SortKey::NameDesc => ordered.sort_by(|a, b| compare_names(b, a)),
        SortKey::CaloriesAsc => ordered.sort_by(|a, b| {
            compare_floats(a.calories_per_serving(), b.calories_per_serving())
        }),
        SortKey::CaloriesDesc => ordered.sort_by(|a, b| {
            compare_floats(b.calories_per_serving(), a.calories_per_serving())
        }),
        SortKey::TimeAsc => ordered.sort_by(|a, b| {
            compare_floats(a.effective_total_time(), b.effective_total_time())
        }),
    }
    ordered
}

/// Held recipes that are favorited, in held order.
///
/// Favorites whose recipe is not part of the held results are skipped.
#[must_use]
pub fn favorite_recipes<'a>(recipes: &'a [Recipe], favorites: &FavoritesSet) -> Vec<&'a Recipe> {
    recipes
        .iter()
        .filter(|recipe| favorites.contains(&recipe.uri))
        .collect()
}

/// Orders labels by base letters first, then accents, then case.
fn compare_names(a: &Recipe, b: &Recipe) -> Ordering {
    collation_key(&a.label)
        .cmp(&collation_key(&b.label))
        .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
        .then_with(|| a.label.cmp(&b.label))
}

/// Lowercased label with diacritics removed (`"Crème"` → `"creme"`).
fn collation_key(label: &str) -> String {
    label
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn compare_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn recipe(uri: &str, label: &str, calories: f64, servings: f64, time: Option<f64>) -> Recipe {
        let mut recipe = Recipe::new(uri, label);
        recipe.calories = calories;
        recipe.servings = servings;
        recipe.total_time = time;
        recipe
    }

    fn labels(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.label.clone()).collect()
    }

    fn sample() -> Vec<Recipe> {
        vec![
            recipe("1", "banana bread", 2400.0, 12.0, Some(70.0)),
            recipe("2", "Apple Pie", 3000.0, 8.0, None),
            recipe("3", "Carrot Soup", 600.0, 4.0, Some(25.0)),
            recipe("4", "apple crumble", 1800.0, 6.0, Some(0.0)),
        ]
    }

    #[test]
    fn relevance_keeps_api_order() {
        let recipes = sample();
        assert_eq!(
            labels(&sorted_recipes(&recipes, SortKey::Relevance)),
            vec!["banana bread", "Apple Pie", "Carrot Soup", "apple crumble"]
        );
    }

    #[test]
    fn name_sort_orders_accented_labels_by_base_letters() {
        let recipes = vec![
            recipe("1", "Crepes", 0.0, 1.0, None),
            recipe("2", "Crème Brûlée", 0.0, 1.0, None),
            recipe("3", "Éclair", 0.0, 1.0, None),
            recipe("4", "Jalapeño Poppers", 0.0, 1.0, None),
            recipe("5", "Zucchini Bread", 0.0, 1.0, None),
        ];
        assert_eq!(
            labels(&sorted_recipes(&recipes, SortKey::NameAsc)),
            vec!["Crème Brûlée", "Crepes", "Éclair", "Jalapeño Poppers", "Zucchini Bread"]
        );
        assert_eq!(
            labels(&sorted_recipes(&recipes, SortKey::NameDesc)),
            vec!["Zucchini Bread", "Jalapeño Poppers", "Éclair", "Crepes", "Crème Brûlée"]
        );
    }

    #[test]
    fn accents_break_ties_before_raw_order() {
        let recipes = vec![
            recipe("1", "Pâté", 0.0, 1.0, None),
            recipe("2", "Pate", 0.0, 1.0, None),
        ];
        assert_eq!(
            labels(&sorted_recipes(&recipes, SortKey::NameAsc)),
            vec!["Pate", "Pâté"]
        );
    }

    #[test]
    fn name_sort_ignores_case() {
        let recipes = sample();
        assert_eq!(
            labels(&sorted_recipes(&recipes, SortKey::NameAsc)),
            vec!["apple crumble", "Apple Pie", "banana bread", "Carrot Soup"]
        );
    }

    #[test]
    fn name_desc_is_reverse_of_name_asc() {
        let recipes = sample();
        let mut ascending = labels(&sorted_recipes(&recipes, SortKey::NameAsc));
        ascending.reverse();
        assert_eq!(labels(&sorted_recipes(&recipes, SortKey::NameDesc)), ascending);
    }

    #[test]
    fn sorting_is_deterministic() {
        let recipes = sample();
        for key in SortKey::ALL {
            assert_eq!(
                labels(&sorted_recipes(&recipes, key)),
                labels(&sorted_recipes(&recipes, key))
            );
        }
    }

    #[test]
    fn calories_compare_per_serving() {
        let recipes = vec![
            recipe("light", "Light", 400.0, 1.0, None),
            recipe("big", "Big Batch", 1200.0, 4.0, None),
        ];
        assert_eq!(
            labels(&sorted_recipes(&recipes, SortKey::CaloriesAsc)),
            vec!["Big Batch", "Light"]
        );
        assert_eq!(
            labels(&sorted_recipes(&recipes, SortKey::CaloriesDesc)),
            vec!["Light", "Big Batch"]
        );
    }

    #[test]
    fn missing_time_sorts_as_thirty_minutes() {
        let recipes = sample();
        assert_eq!(
            labels(&sorted_recipes(&recipes, SortKey::TimeAsc)),
            vec!["Carrot Soup", "Apple Pie", "apple crumble", "banana bread"]
        );
    }

    #[test]
    fn sorting_does_not_mutate_source() {
        let recipes = sample();
        let before = recipes.clone();
        let _ = sorted_recipes(&recipes, SortKey::NameDesc);
        assert_eq!(recipes, before);
    }

    #[test]
    fn favorites_filter_keeps_held_order() {
        let recipes = sample();
        let favorites = FavoritesSet::from(vec!["4".to_string(), "missing".to_string(), "2".to_string()]);
        assert_eq!(
            labels(&favorite_recipes(&recipes, &favorites)),
            vec!["Apple Pie", "apple crumble"]
        );
    }
}
