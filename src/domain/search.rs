//! Search state value types: filters, sort keys and layout modes.
//!
//! These are the value types the state container holds for the search bar. Query and
//! filters together form [`SearchInputs`], which is what the fetch effect watches.

use crate::domain::error::{RecipeBoxError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The filter set applied to a search.
///
/// An empty string (or `None` for the calorie ceiling) means the filter is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub meal_type: String,
    pub cuisine: String,
    pub dietary: String,
    pub max_calories: Option<u32>,
    /// Kept for parity with the filter panel; never sent to the API.
    pub category: String,
}

impl Filters {
    /// Merges a partial update: keys present in `patch` replace, the rest are retained.
    pub fn merge(&mut self, patch: &FilterPatch) {
        if let Some(meal_type) = &patch.meal_type {
            self.meal_type.clone_from(meal_type);
        }
        if let Some(cuisine) = &patch.cuisine {
            self.cuisine.clone_from(cuisine);
        }
        if let Some(dietary) = &patch.dietary {
            self.dietary.clone_from(dietary);
        }
        if let Some(max_calories) = patch.max_calories {
            self.max_calories = max_calories;
        }
        if let Some(category) = &patch.category {
            self.category.clone_from(category);
        }
    }

    /// Number of filters currently set.
    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            !self.meal_type.is_empty(),
            !self.cuisine.is_empty(),
            !self.dietary.is_empty(),
            self.max_calories.is_some(),
            !self.category.is_empty(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

/// A partial filter update. `None` fields leave the current value untouched.
///
/// `max_calories` is doubly optional so a patch can explicitly clear the ceiling
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub meal_type: Option<String>,
    pub cuisine: Option<String>,
    pub dietary: Option<String>,
    pub max_calories: Option<Option<u32>>,
    pub category: Option<String>,
}

/// Filters the user can cycle through in the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    MealType,
    Cuisine,
    Dietary,
    MaxCalories,
}

impl FilterField {
    /// Panel order.
    pub const ALL: [Self; 4] = [Self::MealType, Self::Cuisine, Self::Dietary, Self::MaxCalories];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MealType => "Meal Type",
            Self::Cuisine => "Cuisine",
            Self::Dietary => "Dietary",
            Self::MaxCalories => "Max Calories",
        }
    }

    /// Selectable values; the empty string stands for "any".
    #[must_use]
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::MealType => &["", "breakfast", "lunch", "dinner", "snack", "dessert"],
            Self::Cuisine => &[
                "",
                "italian",
                "mexican",
                "asian",
                "indian",
                "mediterranean",
                "american",
            ],
            Self::Dietary => &["", "vegetarian", "vegan", "gluten-free", "keto", "paleo"],
            Self::MaxCalories => &["", "300", "500", "700", "1000"],
        }
    }

    /// Placeholder shown when the filter is unset.
    #[must_use]
    pub const fn any_label(self) -> &'static str {
        match self {
            Self::MealType => "All Meals",
            Self::Cuisine => "All Cuisines",
            Self::Dietary => "No Restrictions",
            Self::MaxCalories => "Any",
        }
    }

    /// Current value of this field as it appears in [`Self::options`].
    #[must_use]
    pub fn current(self, filters: &Filters) -> String {
        match self {
            Self::MealType => filters.meal_type.clone(),
            Self::Cuisine => filters.cuisine.clone(),
            Self::Dietary => filters.dietary.clone(),
            Self::MaxCalories => filters
                .max_calories
                .map(|ceiling| ceiling.to_string())
                .unwrap_or_default(),
        }
    }

    /// Builds a patch setting this field to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeBoxError::Config`] if `value` is not a positive integer for the
    /// calorie ceiling.
    pub fn patch(self, value: &str) -> Result<FilterPatch> {
        let mut patch = FilterPatch::default();
        match self {
            Self::MealType => patch.meal_type = Some(value.to_string()),
            Self::Cuisine => patch.cuisine = Some(value.to_string()),
            Self::Dietary => patch.dietary = Some(value.to_string()),
            Self::MaxCalories => patch.max_calories = Some(parse_calorie_ceiling(value)?),
        }
        Ok(patch)
    }

    /// Builds the patch that moves this field to its next (or previous) option.
    ///
    /// Values not in the option list restart from the beginning.
    #[must_use]
    pub fn cycle(self, filters: &Filters, forward: bool) -> FilterPatch {
        let options = self.options();
        let current = self.current(filters);
        let position = options.iter().position(|option| *option == current);
        let next = match (position, forward) {
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) => options.len() - 1,
            (Some(i), false) => i - 1,
            (None, _) => 0,
        };
        // Catalogue values always parse.
        self.patch(options[next]).unwrap_or_default()
    }

    /// Next field in panel order, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Previous field in panel order, wrapping.
    #[must_use]
    pub fn previous(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Parses a calorie ceiling; empty means unset.
///
/// # Errors
///
/// Returns [`RecipeBoxError::Config`] for anything other than a positive integer.
pub fn parse_calorie_ceiling(raw: &str) -> Result<Option<u32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<u32>() {
        Ok(ceiling) if ceiling > 0 => Ok(Some(ceiling)),
        _ => Err(RecipeBoxError::Config(format!(
            "invalid calorie ceiling: {raw}"
        ))),
    }
}

/// Client-side ordering applied to held results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    /// Keep the order the API returned.
    #[default]
    Relevance,
    NameAsc,
    NameDesc,
    CaloriesAsc,
    CaloriesDesc,
    TimeAsc,
}

impl SortKey {
    pub const ALL: [Self; 6] = [
        Self::Relevance,
        Self::NameAsc,
        Self::NameDesc,
        Self::CaloriesAsc,
        Self::CaloriesDesc,
        Self::TimeAsc,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::CaloriesAsc => "calories-asc",
            Self::CaloriesDesc => "calories-desc",
            Self::TimeAsc => "time-asc",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Relevance => "Most Relevant",
            Self::NameAsc => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::CaloriesAsc => "Calories (Low to High)",
            Self::CaloriesDesc => "Calories (High to Low)",
            Self::TimeAsc => "Cooking Time (Fast First)",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = RecipeBoxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| RecipeBoxError::Config(format!("unknown sort key: {s}")))
    }
}

/// Result layout. Purely presentational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Compact,
}

impl ViewMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
            Self::Compact => "compact",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Compact,
            Self::Compact => Self::Grid,
        }
    }
}

impl FromStr for ViewMode {
    type Err = RecipeBoxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            "compact" => Ok(Self::Compact),
            other => Err(RecipeBoxError::Config(format!("unknown view mode: {other}"))),
        }
    }
}

/// The inputs that jointly determine the remote fetch request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInputs {
    pub query: String,
    pub filters: Filters,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn merge_keeps_unset_keys() {
        let mut filters = Filters {
            cuisine: "italian".into(),
            max_calories: Some(500),
            ..Filters::default()
        };

        filters.merge(&FilterPatch {
            dietary: Some("vegan".into()),
            ..FilterPatch::default()
        });

        assert_eq!(filters.cuisine, "italian");
        assert_eq!(filters.dietary, "vegan");
        assert_eq!(filters.max_calories, Some(500));
        assert_eq!(filters.active_count(), 3);
    }

    #[test]
    fn patch_can_clear_calorie_ceiling() {
        let mut filters = Filters {
            max_calories: Some(300),
            ..Filters::default()
        };
        filters.merge(&FilterField::MaxCalories.patch("").unwrap());
        assert_eq!(filters.max_calories, None);
    }

    #[test]
    fn rejects_non_numeric_calorie_ceiling() {
        assert!(parse_calorie_ceiling("lots").is_err());
        assert!(parse_calorie_ceiling("0").is_err());
        assert_eq!(parse_calorie_ceiling(" 700 ").unwrap(), Some(700));
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        let mut filters = Filters::default();

        filters.merge(&FilterField::Dietary.cycle(&filters, false));
        assert_eq!(filters.dietary, "paleo");

        filters.merge(&FilterField::Dietary.cycle(&filters, true));
        assert_eq!(filters.dietary, "");

        filters.merge(&FilterField::MaxCalories.cycle(&filters, true));
        assert_eq!(filters.max_calories, Some(300));
    }

    #[test]
    fn sort_keys_round_trip_through_strings() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("time-desc".parse::<SortKey>().is_err());
    }
}
