//! Recipe Box: a Zellij plugin for searching recipes from the terminal.
//!
//! Recipe Box provides:
//! - Debounced search against the Edamam recipe API, with meal, cuisine, diet and
//!   calorie filters
//! - Client-side sorting by relevance, name, calories per serving or time
//! - Grid, list and compact card layouts with a detail view per recipe
//! - Favorites and 1-5 star ratings persisted as JSON under the plugin data directory
//! - First-run onboarding panels

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State container
//! │  - Event handling and navigation                    │  ← Business logic
//! │  - Action dispatching                               │
//! │  - Derived (sorted / favorites) views               │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Fetch Layer   │
//! │ (ui/)         │   │ (storage/)    │   │ (fetch/)      │
//! │ - Rendering   │   │ - JSON slots  │   │ - Debounce    │
//! │ - Theming     │   │ - In-memory   │   │ - Stale drop  │
//! │ - Components  │   │ - Store trait │   │ - URL / JSON  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Recipe, search and preference models (domain/)   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/recipe-box.wasm" {
//!         app_id "your-edamam-app-id"
//!         app_key "your-edamam-app-key"
//!         default_query "popular"
//!         debounce_ms "500"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing, build
//!    the [`App`] with an in-memory preference store, request permissions.
//! 2. **Permissions Granted**: swap in the JSON store (re-reading favorites,
//!    ratings and the onboarding flag) and enable the fetch effect, which arms the
//!    first debounce timer for the default query.
//! 3. **Timer**: the effect issues a web request tagged with a request id.
//! 4. **Web Request Result**: the latest response replaces the results; stale ones
//!    are dropped.
//! 5. **Rendering**: compute the view model and draw header, toolbar, cards and
//!    footer.
//!
//! # Example
//!
//! ```rust
//! use recipe_box::{handle_event, initialize, Config, Event};
//!
//! let mut app = initialize(&Config::default());
//! for event in [Event::OnboardingSkip, Event::CycleViewMode, Event::CycleSort] {
//!     let (_render, actions) = handle_event(&mut app, &event)?;
//!     // Execute actions...
//! #   assert!(actions.is_empty());
//! }
//! assert!(!app.state.show_onboarding);
//! # Ok::<(), recipe_box::RecipeBoxError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator with 24-bit color

pub mod app;
pub mod domain;
pub mod fetch;
pub mod infrastructure;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, App, AppState, Event, InputMode};
pub use domain::{Recipe, RecipeBoxError, Result, SortKey, ViewMode};
pub use ui::Theme;

use fetch::{ApiConfig, FetchEffect, DEFAULT_API_BASE};
use std::collections::BTreeMap;
use std::time::Duration;
use storage::JsonStorage;

/// Debounce window in milliseconds when none is configured.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/recipe-box.wasm" {
///     app_id "abc123"
///     app_key "secret"
///     api_base "https://api.edamam.com/api/recipes/v2"
///     default_query "pasta"
///     debounce_ms "300"
///     theme "catppuccin-latte"
///     theme_file "~/.config/recipe-box/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Recipe API application id. Requests are sent even when empty.
    pub app_id: String,

    /// Recipe API application key.
    pub app_key: String,

    /// Recipe search endpoint. Default: [`DEFAULT_API_BASE`]
    pub api_base: String,

    /// Query searched on first open. Default: `"popular"`
    pub default_query: String,

    /// Quiet period before a changed search is sent. Default: 500
    pub debounce_ms: u64,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` expands to the sandbox home.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            app_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            default_query: app::DEFAULT_QUERY.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `app_id`, `app_key`: taken verbatim, empty when absent
    /// - `api_base`, `default_query`: blank values fall back to the defaults
    /// - `debounce_ms`: String → `u64` (falls back to 500 on parse error)
    /// - `theme`, `theme_file`, `trace_level`: String → `Option<String>`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use recipe_box::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "250".to_string());
    /// map.insert("default_query".to_string(), "tacos".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.debounce_ms, 250);
    /// assert_eq!(config.default_query, "tacos");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let debounce_ms = config
            .get("debounce_ms")
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(ms) => Some(ms),
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "invalid debounce_ms, using default");
                    None
                }
            })
            .unwrap_or(DEFAULT_DEBOUNCE_MS);

        Self {
            app_id: config.get("app_id").cloned().unwrap_or_default(),
            app_key: config.get("app_key").cloned().unwrap_or_default(),
            api_base: non_blank("api_base").unwrap_or(defaults.api_base),
            default_query: non_blank("default_query").unwrap_or(defaults.default_query),
            debounce_ms,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Recipe API settings for the fetch effect.
    #[must_use]
    pub fn api(&self) -> ApiConfig {
        ApiConfig {
            api_base: self.api_base.clone(),
            app_id: self.app_id.clone(),
            app_key: self.app_key.clone(),
        }
    }

    /// Resolves the configured theme, falling back to the default on any failure.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Initializes the plugin with configuration.
///
/// The returned app holds an in-memory preference store and a disabled fetch
/// effect. The plugin shim attaches the on-disk store and enables fetching once
/// the host grants permissions.
///
/// # Example
///
/// ```rust
/// use recipe_box::{initialize, Config};
///
/// let app = initialize(&Config::default());
/// assert_eq!(app.state.query, "popular");
/// assert!(!app.fetch.is_enabled());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> App {
    tracing::debug!("initializing recipe box plugin");

    if config.app_id.is_empty() || config.app_key.is_empty() {
        tracing::warn!("app_id or app_key not configured, recipe searches will likely be rejected");
    }

    let fetch = FetchEffect::new(config.api(), Duration::from_millis(config.debounce_ms));
    App::new(AppState::new(config.default_query.clone()), fetch, config.theme())
}

/// Opens the on-disk preference store in the plugin data directory.
///
/// # Errors
///
/// Returns [`RecipeBoxError::Io`] if the data directory cannot be created.
pub fn open_storage() -> Result<JsonStorage> {
    JsonStorage::new(infrastructure::get_data_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zellij_config_falls_back_on_bad_values() {
        let map: BTreeMap<String, String> = [
            ("debounce_ms", "soon"),
            ("api_base", "  "),
            ("app_id", "id"),
            ("theme", "catppuccin-frappe"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_zellij(&map);
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.app_id, "id");
        assert_eq!(config.default_query, "popular");
        assert_eq!(config.theme().name, "catppuccin-frappe");
    }

    #[test]
    fn missing_theme_file_uses_default_theme() {
        let config = Config {
            theme_file: Some("/definitely/not/here.toml".to_string()),
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(config.theme().name, "catppuccin-mocha");
    }

    #[test]
    fn initialize_starts_with_fetch_disabled() {
        let app = initialize(&Config {
            default_query: "ramen".to_string(),
            ..Config::default()
        });
        assert_eq!(app.state.query, "ramen");
        assert!(!app.fetch.is_enabled());
        assert!(app.state.show_onboarding);
    }
}
