//! JSON file-based preference storage.
//!
//! Each slot lives in its own file inside the plugin data directory. Writes go to a
//! temporary sibling first and are then renamed over the target, so a crash never
//! leaves a half-written slot behind.
//!
//! # Layout
//!
//! ```text
//! <data dir>/
//! ├── favorites.json          ["recipe_uri_1", "recipe_uri_2"]
//! ├── ratings.json            {"recipe_uri_1": 4}
//! └── onboarding-completed    2026-01-01T12:00:00+00:00
//! ```

use crate::domain::error::{RecipeBoxError, Result};
use crate::domain::preferences::{FavoritesSet, RatingsMap};
use crate::storage::backend::PreferenceStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File name of the favorites slot.
pub const FAVORITES_FILE: &str = "favorites.json";

/// File name of the ratings slot.
pub const RATINGS_FILE: &str = "ratings.json";

/// File name of the onboarding flag. Its presence is the flag.
pub const ONBOARDING_FILE: &str = "onboarding-completed";

/// Directory-backed preference store.
///
/// Nothing is cached: loads read the file, saves overwrite it. The container keeps
/// the authoritative copy in memory.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    dir: PathBuf,
}

impl JsonStorage {
    /// Opens (and creates if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use recipe_box::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/tmp/recipe-box"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(dir: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?dir, "initializing JSON storage");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read_slot<T>(&self, name: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.slot_path(name);
        if !path.exists() {
            tracing::trace!(slot = name, "slot not written yet");
            return Ok(T::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        serde_json::from_str(&contents)
            .map_err(|e| RecipeBoxError::Storage(format!("failed to parse {name}: {e}")))
    }

    fn write_slot<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| RecipeBoxError::Storage(format!("failed to serialize {name}: {e}")))?;
        write_atomic(&self.slot_path(name), json.as_bytes())
    }
}

/// Writes `contents` to a temporary sibling of `path`, then renames it into place.
///
/// # Errors
///
/// Returns an error if either the write or the rename fails.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp_path = path.with_extension("tmp");

    tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
    std::fs::write(&tmp_path, contents)?;

    tracing::trace!(path = ?path, "renaming temporary file to final location");
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

impl PreferenceStore for JsonStorage {
    fn load_favorites(&self) -> Result<FavoritesSet> {
        let _span = tracing::debug_span!("json_load_favorites").entered();
        let favorites: FavoritesSet = self.read_slot(FAVORITES_FILE)?;
        tracing::debug!(count = favorites.len(), "favorites loaded");
        Ok(favorites)
    }

    fn save_favorites(&mut self, favorites: &FavoritesSet) -> Result<()> {
        let _span = tracing::debug_span!("json_save_favorites", count = favorites.len()).entered();
        self.write_slot(FAVORITES_FILE, favorites)
    }

    fn load_ratings(&self) -> Result<RatingsMap> {
        let _span = tracing::debug_span!("json_load_ratings").entered();
        let ratings: RatingsMap = self.read_slot(RATINGS_FILE)?;
        tracing::debug!(count = ratings.len(), "ratings loaded");
        Ok(ratings)
    }

    fn save_ratings(&mut self, ratings: &RatingsMap) -> Result<()> {
        let _span = tracing::debug_span!("json_save_ratings", count = ratings.len()).entered();
        self.write_slot(RATINGS_FILE, ratings)
    }

    fn onboarding_completed(&self) -> Result<bool> {
        Ok(self.slot_path(ONBOARDING_FILE).exists())
    }

    fn mark_onboarding_completed(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_mark_onboarding_completed").entered();
        let stamp = chrono::Utc::now().to_rfc3339();
        write_atomic(&self.slot_path(ONBOARDING_FILE), stamp.as_bytes())
    }
}
