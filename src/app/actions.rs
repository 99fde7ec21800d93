//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The plugin
//! shim executes them in order against the Zellij host API. Nothing in the library
//! calls the host directly, which keeps the handler testable without a running
//! Zellij.
//!
//! # Example
//!
//! ```rust
//! use recipe_box::app::Action;
//!
//! let actions = vec![
//!     Action::ArmTimer { millis: 500 },
//!     Action::OpenUrl { url: "https://example.com/recipe".to_string() },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use std::collections::BTreeMap;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Arms a one-shot host timer. Its firing comes back as a timer event.
    ArmTimer {
        /// Delay in milliseconds.
        millis: u64,
    },

    /// Issues a GET through the host. The result comes back with `context` intact.
    WebRequest {
        url: String,
        /// Request id and trace ids.
        context: BTreeMap<String, String>,
    },

    /// Opens a link in the user's browser via `xdg-open`.
    OpenUrl { url: String },
}
