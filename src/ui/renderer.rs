//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform [`App`] into [`UIViewModel`](crate::ui::UIViewModel)
//! 2. **Component Rendering**: Delegate to component renderers, writing into one
//!    frame buffer that is printed in a single call
//!
//! # Example
//!
//! ```rust
//! use recipe_box::{initialize, Config};
//! use recipe_box::ui::render_to_string;
//!
//! let app = initialize(&Config::default());
//! let frame = render_to_string(&app, 24, 80);
//! assert!(frame.contains("Recipe Box"));
//! ```

use crate::app::App;
use crate::ui::components;
use crate::ui::viewmodel::compute_viewmodel;

/// Renders the plugin UI to stdout.
///
/// # Parameters
///
/// * `app` - Current application state
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
pub fn render(app: &App, rows: usize, cols: usize) {
    print!("{}", render_to_string(app, rows, cols));
}

/// Renders the plugin UI into a string of ANSI-styled output.
#[must_use]
pub fn render_to_string(app: &App, rows: usize, cols: usize) -> String {
    let _span = tracing::trace_span!("render", rows, cols).entered();
    let viewmodel = compute_viewmodel(app);

    let mut frame = String::new();
    if let Err(e) = components::render_frame(&mut frame, &viewmodel, &app.theme, rows, cols) {
        tracing::warn!(error = %e, "failed to render frame");
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppState, Event, handle_event};
    use crate::domain::recipe::Recipe;
    use crate::domain::search::ViewMode;
    use crate::fetch::{ApiConfig, FetchEffect, DEFAULT_DEBOUNCE};
    use crate::ui::Theme;

    fn app(onboarded: bool) -> App {
        let mut state = AppState::new("pasta");
        if onboarded {
            state.complete_onboarding();
        }
        App::new(
            state,
            FetchEffect::new(ApiConfig::default(), DEFAULT_DEBOUNCE),
            Theme::default(),
        )
    }

    #[test]
    fn first_open_shows_onboarding() {
        let frame = render_to_string(&app(false), 24, 80);
        assert!(frame.contains("●"));
        assert!(frame.contains("Esc: skip"));
    }

    #[test]
    fn every_layout_renders_cards() {
        let mut app = app(true);
        app.state.set_recipes(vec![
            Recipe::new("a", "Pasta Primavera"),
            Recipe::new("b", "Baked Ziti"),
        ]);

        for mode in [ViewMode::Grid, ViewMode::List, ViewMode::Compact] {
            app.state.set_view_mode(mode);
            let frame = render_to_string(&app, 24, 100);
            assert!(frame.contains("Baked Ziti"), "{mode:?}");
            assert!(frame.contains("Search: pasta"), "{mode:?}");
        }
    }

    #[test]
    fn notice_replaces_keybindings() {
        let mut app = app(true);
        app.state.set_recipes(vec![Recipe::new("a", "Pasta Primavera")]);
        handle_event(&mut app, &Event::ToggleFavorite).unwrap();

        let frame = render_to_string(&app, 24, 80);
        assert!(frame.contains("Added to favorites!"));
        assert!(!frame.contains("q: quit"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = app(true);
        app.state.set_recipes(vec![Recipe::new("a", "Pasta Primavera")]);
        let _ = render_to_string(&app, 0, 0);
        let _ = render_to_string(&app, 3, 5);
    }
}
