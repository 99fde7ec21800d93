//! User preference collections: favorites and ratings.
//!
//! Both collections are keyed by [`RecipeId`] and may reference recipes that are not
//! part of the currently held results. They serialize transparently, so the on-disk
//! shape is a plain JSON array (favorites) and a plain JSON object (ratings).

use crate::domain::error::{RecipeBoxError, Result};
use crate::domain::recipe::RecipeId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

/// Validates a star rating.
///
/// # Errors
///
/// Returns [`RecipeBoxError::Config`] when `value` lies outside `1..=5`.
///
/// # Example
///
/// ```
/// use recipe_box::domain::preferences::validate_rating;
///
/// assert_eq!(validate_rating(4).unwrap(), 4);
/// assert!(validate_rating(0).is_err());
/// assert!(validate_rating(6).is_err());
/// ```
pub fn validate_rating(value: u8) -> Result<u8> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(value)
    } else {
        Err(RecipeBoxError::Config(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {value}"
        )))
    }
}

/// Favorited recipe identifiers in insertion order.
///
/// Presence means favorited. No identifier appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RecipeId>", into = "Vec<RecipeId>")]
pub struct FavoritesSet {
    ids: Vec<RecipeId>,
}

impl FavoritesSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`.
    ///
    /// # Returns
    ///
    /// `true` if the recipe is now a favorite, `false` if it was removed.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(position) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(position);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipeId> {
        self.ids.iter()
    }
}

impl From<Vec<RecipeId>> for FavoritesSet {
    fn from(ids: Vec<RecipeId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }
}

impl From<FavoritesSet> for Vec<RecipeId> {
    fn from(set: FavoritesSet) -> Self {
        set.ids
    }
}

/// Recipe identifier to star rating. A missing entry means unrated.
///
/// Deserializing keeps only integer entries in `1..=5`; anything else in the stored
/// object is dropped entry by entry instead of failing the whole map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RatingsMap {
    ratings: BTreeMap<RecipeId, u8>,
}

impl RatingsMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or overwrites the rating for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the map untouched, if `value` is not a valid rating.
    pub fn set(&mut self, id: &str, value: u8) -> Result<()> {
        let value = validate_rating(value)?;
        self.ratings.insert(id.to_string(), value);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<u8> {
        self.ratings.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecipeId, &u8)> {
        self.ratings.iter()
    }
}

impl<'de> Deserialize<'de> for RatingsMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<RecipeId, JsonValue>::deserialize(deserializer)?;
        let stored = raw.len();

        let ratings: BTreeMap<RecipeId, u8> = raw
            .into_iter()
            .filter_map(|(id, value)| {
                let stars = value.as_u64().and_then(|n| u8::try_from(n).ok())?;
                validate_rating(stars).ok().map(|stars| (id, stars))
            })
            .collect();

        let dropped = stored - ratings.len();
        if dropped > 0 {
            tracing::warn!(dropped, kept = ratings.len(), "discarded invalid stored ratings");
        }
        Ok(Self { ratings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn toggle_twice_restores_original_set() {
        let mut favorites = FavoritesSet::from(vec!["a".to_string()]);
        let original = favorites.clone();

        assert!(favorites.toggle("b"));
        assert!(!favorites.toggle("b"));

        assert_eq!(favorites, original);
    }

    #[test]
    fn favorites_keep_insertion_order_and_drop_duplicates() {
        let favorites = FavoritesSet::from(vec![
            "c".to_string(),
            "a".to_string(),
            "c".to_string(),
        ]);
        let ids: Vec<&str> = favorites.iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn favorites_serialize_as_plain_array() {
        let mut favorites = FavoritesSet::new();
        favorites.toggle("x");
        assert_eq!(serde_json::to_string(&favorites).unwrap(), r#"["x"]"#);
    }

    #[test]
    fn last_rating_wins() {
        let mut ratings = RatingsMap::new();
        ratings.set("r1", 3).unwrap();
        ratings.set("r1", 5).unwrap();
        assert_eq!(ratings.get("r1"), Some(5));
        assert_eq!(ratings.len(), 1);
    }

    #[test]
    fn invalid_rating_leaves_map_unchanged() {
        let mut ratings = RatingsMap::new();
        ratings.set("r1", 2).unwrap();
        assert!(ratings.set("r1", 9).is_err());
        assert!(ratings.set("r2", 0).is_err());
        assert_eq!(ratings.get("r1"), Some(2));
        assert_eq!(ratings.get("r2"), None);
    }

    #[test]
    fn stored_ratings_drop_only_invalid_entries() {
        let ratings: RatingsMap = serde_json::from_str(
            r#"{"a": 4, "b": 0, "c": 7, "d": 300, "e": -1, "f": 4.5, "g": "5", "h": 1}"#,
        )
        .unwrap();
        assert_eq!(ratings.get("a"), Some(4));
        assert_eq!(ratings.get("h"), Some(1));
        assert_eq!(ratings.len(), 2);
    }

    #[test]
    fn non_object_ratings_blob_is_an_error() {
        assert!(serde_json::from_str::<RatingsMap>("[4, 5]").is_err());
    }
}
