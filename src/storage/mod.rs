//! Storage layer for persisted user preferences.
//!
//! Favorites, ratings and the onboarding flag are the only state that outlives a
//! plugin session. They are persisted through the [`PreferenceStore`] trait.
//!
//! # Modules
//!
//! - `backend`: Store trait the state container writes through
//! - `json`: One JSON file per slot with atomic writes
//! - `memory`: Shared in-process store for tests and hosts without disk access

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::PreferenceStore;
pub use json::JsonStorage;
pub use memory::MemoryStorage;
