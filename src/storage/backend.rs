//! Preference store abstraction.
//!
//! This module defines the [`PreferenceStore`] trait that the state container persists
//! through. Each method maps to one slot: the favorites list, the ratings map, or the
//! onboarding flag. Every save replaces the whole slot.

use crate::domain::error::Result;
use crate::domain::preferences::{FavoritesSet, RatingsMap};
use std::fmt::Debug;

/// Abstraction over persistent preference backends.
///
/// Loads are called once at startup. Saves are called after every mutation of the
/// corresponding collection, with the complete new value.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): one JSON file per slot, atomic writes
/// - [`MemoryStorage`](crate::storage::MemoryStorage): in-process map, used in tests
///
/// # Examples
///
/// ```no_run
/// use recipe_box::storage::{JsonStorage, PreferenceStore};
/// use std::path::PathBuf;
///
/// let storage = JsonStorage::new(PathBuf::from("/tmp/recipe-box"))?;
/// let favorites = storage.load_favorites()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait PreferenceStore: Send + Debug {
    /// Reads the favorites slot.
    ///
    /// A slot that was never written yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or does not hold a JSON array of
    /// identifiers.
    fn load_favorites(&self) -> Result<FavoritesSet>;

    /// Replaces the favorites slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_favorites(&mut self, favorites: &FavoritesSet) -> Result<()>;

    /// Reads the ratings slot.
    ///
    /// A slot that was never written yields an empty map. Range checking is left to
    /// the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or does not hold a JSON object of
    /// integers.
    fn load_ratings(&self) -> Result<RatingsMap>;

    /// Replaces the ratings slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_ratings(&mut self, ratings: &RatingsMap) -> Result<()>;

    /// Whether onboarding has been completed on this machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag's presence cannot be determined.
    fn onboarding_completed(&self) -> Result<bool>;

    /// Records that onboarding has been completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag cannot be written.
    fn mark_onboarding_completed(&mut self) -> Result<()>;
}
