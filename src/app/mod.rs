//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the domain, storage
//! and fetch layers. It owns the state container and turns events into state
//! mutations plus side-effect commands.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── Timer / Web Request Results ─┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`derived`]: Sorted and favorites-only views over the result list
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode and onboarding step types
//! - [`navigation`]: Route stack for the search, favorites and detail screens
//! - [`runtime`]: The bundle of container, fetch effect, view state and theme
//! - [`state`]: Central state container with persisted preferences
//! - [`view`]: Presentation-only state
//!
//! # Example
//!
//! ```rust
//! use recipe_box::app::{AppState, DEFAULT_QUERY};
//!
//! let mut state = AppState::new(DEFAULT_QUERY);
//! state.toggle_favorite("recipe_1");
//! assert!(state.is_favorite("recipe_1"));
//! ```

pub mod actions;
pub mod derived;
pub mod handler;
pub mod modes;
pub mod navigation;
pub mod runtime;
pub mod state;
pub mod view;

pub use actions::Action;
pub use derived::{favorite_recipes, sorted_recipes};
pub use handler::{handle_event, Event, PERMISSION_DENIED_MESSAGE};
pub use modes::{InputMode, OnboardingStep};
pub use navigation::{NavigationStack, Route};
pub use runtime::App;
pub use state::{AppState, DEFAULT_QUERY};
pub use view::ViewState;
