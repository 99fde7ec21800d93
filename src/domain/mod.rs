//! Domain layer for the Recipe Box plugin.
//!
//! Core types for recipes, search inputs and user preferences, independent of Zellij
//! APIs and of how anything is stored or fetched.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`recipe`]: Recipe model as returned by the search API
//! - [`search`]: Filters, sort keys and layout modes
//! - [`preferences`]: Favorites and ratings collections
//!
//! # Examples
//!
//! ```
//! use recipe_box::domain::{FavoritesSet, Recipe};
//!
//! let recipe = Recipe::new("recipe_1", "Pancakes");
//! let mut favorites = FavoritesSet::new();
//! favorites.toggle(&recipe.uri);
//! assert!(favorites.contains(&recipe.uri));
//! ```

pub mod error;
pub mod preferences;
pub mod recipe;
pub mod search;

pub use error::{RecipeBoxError, Result};
pub use preferences::{FavoritesSet, RatingsMap};
pub use recipe::{Nutrient, Recipe, RecipeId};
pub use search::{FilterField, FilterPatch, Filters, SearchInputs, SortKey, ViewMode};
