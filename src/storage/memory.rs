//! In-memory preference storage.
//!
//! Slots are kept as raw JSON strings so a corrupt blob can be planted the same way a
//! damaged file would appear on disk. Clones share the same slots, which lets a test
//! keep a handle after the store has been boxed into the container.

use crate::domain::error::{RecipeBoxError, Result};
use crate::domain::preferences::{FavoritesSet, RatingsMap};
use crate::storage::backend::PreferenceStore;
use crate::storage::json::{FAVORITES_FILE, ONBOARDING_FILE, RATINGS_FILE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Slots {
    raw: HashMap<String, String>,
    fail_writes: bool,
}

/// Shared in-process preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<Slots>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent save fail with a storage error.
    pub fn fail_writes(&self, fail: bool) {
        self.slots().fail_writes = fail;
    }

    /// Raw contents of a slot, if it has been written.
    #[must_use]
    pub fn raw(&self, slot: &str) -> Option<String> {
        self.slots().raw.get(slot).cloned()
    }

    /// Overwrites a slot with arbitrary text.
    pub fn set_raw(&self, slot: &str, contents: impl Into<String>) {
        self.slots().raw.insert(slot.to_string(), contents.into());
    }

    fn slots(&self) -> MutexGuard<'_, Slots> {
        // A poisoned lock only means another test thread panicked mid-write.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn read<T>(&self, slot: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.slots().raw.get(slot).map_or_else(
            || Ok(T::default()),
            |raw| {
                serde_json::from_str(raw)
                    .map_err(|e| RecipeBoxError::Storage(format!("failed to parse {slot}: {e}")))
            },
        )
    }

    fn write(&mut self, slot: &str, contents: String) -> Result<()> {
        let mut slots = self.slots();
        if slots.fail_writes {
            return Err(RecipeBoxError::Storage(format!("write to {slot} refused")));
        }
        slots.raw.insert(slot.to_string(), contents);
        Ok(())
    }

    fn write_json<T: Serialize>(&mut self, slot: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.write(slot, json)
    }
}

impl PreferenceStore for MemoryStorage {
    fn load_favorites(&self) -> Result<FavoritesSet> {
        self.read(FAVORITES_FILE)
    }

    fn save_favorites(&mut self, favorites: &FavoritesSet) -> Result<()> {
        self.write_json(FAVORITES_FILE, favorites)
    }

    fn load_ratings(&self) -> Result<RatingsMap> {
        self.read(RATINGS_FILE)
    }

    fn save_ratings(&mut self, ratings: &RatingsMap) -> Result<()> {
        self.write_json(RATINGS_FILE, ratings)
    }

    fn onboarding_completed(&self) -> Result<bool> {
        Ok(self.slots().raw.contains_key(ONBOARDING_FILE))
    }

    fn mark_onboarding_completed(&mut self) -> Result<()> {
        self.write(ONBOARDING_FILE, chrono::Utc::now().to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clones_share_slots() {
        let handle = MemoryStorage::new();
        let mut store = handle.clone();

        let mut favorites = FavoritesSet::new();
        favorites.toggle("r1");
        store.save_favorites(&favorites).unwrap();

        assert_eq!(handle.raw(FAVORITES_FILE).as_deref(), Some(r#"["r1"]"#));
        assert_eq!(handle.load_favorites().unwrap(), favorites);
    }

    #[test]
    fn refused_writes_leave_slot_untouched() {
        let mut store = MemoryStorage::new();
        store.fail_writes(true);
        assert!(store.save_ratings(&RatingsMap::new()).is_err());
        assert_eq!(store.raw(RATINGS_FILE), None);
    }
}
