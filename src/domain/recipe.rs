//! Recipe domain model as delivered by the recipe search API.
//!
//! A [`Recipe`] is immutable once received. Its `uri` is the identifier used as the
//! join key for favorites and ratings. Field names follow the API's camelCase JSON so
//! that results deserialize straight out of the response envelope.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cooking time assumed when the API reports none (or zero).
pub const DEFAULT_TOTAL_TIME_MINUTES: f64 = 30.0;

/// Opaque recipe identifier (the API's recipe URI).
pub type RecipeId = String;

/// One entry of a recipe's nutrient table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    /// Human-readable nutrient name, e.g. "Protein".
    #[serde(default)]
    pub label: String,
    /// Total quantity for the whole recipe.
    #[serde(default)]
    pub quantity: f64,
    /// Unit of `quantity`, e.g. "g" or "kcal".
    #[serde(default)]
    pub unit: String,
}

/// A recipe returned by the remote search collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique identifier within a result set.
    pub uri: RecipeId,

    /// Display name.
    #[serde(default)]
    pub label: String,

    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,

    /// Source attribution (publisher name).
    #[serde(default)]
    pub source: Option<String>,

    /// Link to the original recipe page.
    #[serde(default)]
    pub url: Option<String>,

    /// Total calories for the whole recipe.
    #[serde(default)]
    pub calories: f64,

    /// Number of servings.
    #[serde(default, rename = "yield")]
    pub servings: f64,

    /// Total preparation time in minutes.
    #[serde(default)]
    pub total_time: Option<f64>,

    #[serde(default)]
    pub diet_labels: Vec<String>,

    #[serde(default)]
    pub health_labels: Vec<String>,

    /// Nutrient code (e.g. `PROCNT`) to total quantity.
    #[serde(default)]
    pub total_nutrients: BTreeMap<String, Nutrient>,

    #[serde(default)]
    pub ingredient_lines: Vec<String>,

    #[serde(default)]
    pub cuisine_type: Vec<String>,

    #[serde(default)]
    pub meal_type: Vec<String>,

    #[serde(default)]
    pub dish_type: Vec<String>,
}

impl Recipe {
    /// Creates a recipe with only an identifier and a label set.
    #[must_use]
    pub fn new(uri: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            label: label.into(),
            image: None,
            source: None,
            url: None,
            calories: 0.0,
            servings: 0.0,
            total_time: None,
            diet_labels: Vec::new(),
            health_labels: Vec::new(),
            total_nutrients: BTreeMap::new(),
            ingredient_lines: Vec::new(),
            cuisine_type: Vec::new(),
            meal_type: Vec::new(),
            dish_type: Vec::new(),
        }
    }

    /// Serving count used as a divisor; never below one.
    #[must_use]
    pub fn serving_divisor(&self) -> f64 {
        if self.servings >= 1.0 {
            self.servings
        } else {
            1.0
        }
    }

    /// Calories per serving: total calories divided by `max(yield, 1)`.
    ///
    /// ```
    /// use recipe_box::Recipe;
    ///
    /// let mut stew = Recipe::new("r1", "Stew");
    /// stew.calories = 1200.0;
    /// stew.servings = 4.0;
    /// assert_eq!(stew.calories_per_serving(), 300.0);
    /// ```
    #[must_use]
    pub fn calories_per_serving(&self) -> f64 {
        self.calories / self.serving_divisor()
    }

    /// Total time in minutes, treating a missing or zero time as 30.
    #[must_use]
    pub fn effective_total_time(&self) -> f64 {
        match self.total_time {
            Some(minutes) if minutes > 0.0 => minutes,
            _ => DEFAULT_TOTAL_TIME_MINUTES,
        }
    }

    /// Formats a nutrient's per-serving amount (e.g. `"42g"`), or `"N/A"` when absent.
    #[must_use]
    pub fn nutrient_per_serving(&self, code: &str) -> String {
        self.total_nutrients.get(code).map_or_else(
            || "N/A".to_string(),
            |nutrient| {
                let amount = (nutrient.quantity / self.serving_divisor()).round();
                format!("{amount}{}", nutrient.unit)
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_api_shape_with_missing_fields() {
        let json = r#"{
            "uri": "http://www.edamam.com/ontologies/edamam.owl#recipe_abc",
            "label": "Chicken Vesuvio",
            "yield": 4.0,
            "calories": 4228.0,
            "totalTime": 60.0,
            "dietLabels": ["Low-Carb"],
            "totalNutrients": {
                "PROCNT": { "label": "Protein", "quantity": 200.0, "unit": "g" }
            }
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();

        assert_eq!(recipe.label, "Chicken Vesuvio");
        assert_eq!(recipe.servings, 4.0);
        assert_eq!(recipe.total_time, Some(60.0));
        assert_eq!(recipe.diet_labels, vec!["Low-Carb".to_string()]);
        assert!(recipe.ingredient_lines.is_empty());
        assert_eq!(recipe.nutrient_per_serving("PROCNT"), "50g");
        assert_eq!(recipe.nutrient_per_serving("FAT"), "N/A");
    }

    #[test]
    fn zero_yield_divides_by_one() {
        let mut recipe = Recipe::new("r", "Toast");
        recipe.calories = 400.0;
        recipe.servings = 0.0;
        assert_eq!(recipe.calories_per_serving(), 400.0);
    }

    #[test]
    fn missing_or_zero_time_defaults_to_thirty() {
        let mut recipe = Recipe::new("r", "Toast");
        assert_eq!(recipe.effective_total_time(), 30.0);
        recipe.total_time = Some(0.0);
        assert_eq!(recipe.effective_total_time(), 30.0);
        recipe.total_time = Some(12.0);
        assert_eq!(recipe.effective_total_time(), 12.0);
    }
}
