//! User interface rendering layer with component-based architecture.
//!
//! Transforms the app state into ANSI-styled output through composable rendering
//! components. Provides theme support, responsive card layouts and query-term
//! highlighting.
//!
//! # Architecture
//!
//! ```text
//! App → compute_viewmodel → UIViewModel → render_frame → String → stdout
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, fitting text)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::{Theme, DEFAULT_THEME};
pub use viewmodel::{compute_viewmodel, CardItem, DetailInfo, EmptyState, Screen, UIViewModel};
