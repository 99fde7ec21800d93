//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Recipe Box library and the
//! Zellij plugin system. It implements `ZellijPlugin`, translates host events into
//! library events and runs the actions the library returns against the host API.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, build the `App`
//! 2. **Permissions**: Request web access, command execution and filesystem access
//! 3. **Granted**: Attach the on-disk preference store, enable fetching
//! 4. **Update**: Map events, delegate to `handle_event`, execute actions
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → mode-dependent [`Event`] (see keybindings below)
//! - `Timer` → `Event::Timer`
//! - `WebRequestResult` → `Event::WebRequestResult { status, body, context }`
//! - `PermissionRequestResult` → `Event::PermissionsResult { granted }`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Results (search and favorites screens):
//! - `j`/`Down`, `k`/`Up`: Move
//! - `Enter`/`l`: Open details
//! - `/`: Edit search, `f`: Filters, `c`: Clear filters
//! - `s`: Cycle sort, `v`: Cycle layout
//! - `*`: Toggle favorite, `1`-`5`: Rate, `o`: Open original
//! - `F`: Favorites screen, `S`: Search screen
//! - `q`: Close plugin
//!
//! Detail view:
//! - `*`, `1`-`5`, `o` as above; `Esc`/`h`/`Backspace`: Back
//!
//! Search bar:
//! - Characters type, `Enter` searches, `Esc` cancels
//!
//! Filter panel:
//! - `Tab`/`j`: Next filter, `Shift+Tab`/`k`: Previous filter
//! - `Right`/`l`/`Enter`: Next value, `Left`/`h`: Previous value
//! - `c`: Clear all, `Esc`/`f`: Done
//!
//! Onboarding:
//! - `Enter`/`Right`: Next, `Left`: Back, `Esc`: Skip

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use recipe_box::app::Route;
use recipe_box::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper around the library's `App`.
struct State {
    app: recipe_box::App,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: recipe_box::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// Requests:
    /// - `WebAccess`: Query the recipe API
    /// - `RunCommands`: Open recipe pages with `xdg-open`
    /// - `FullHdAccess`: Persist favorites, ratings and the onboarding flag
    ///
    /// # Subscriptions
    ///
    /// - `Key`: Keyboard input
    /// - `Timer`: Search debounce
    /// - `WebRequestResult`: Recipe API responses
    /// - `PermissionRequestResult`: Permission grant
    /// - `RunCommandResult`: `xdg-open` exit status
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        recipe_box::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_base = %config.api_base, debounce_ms = config.debounce_ms, "parsed configuration");
        self.app = recipe_box::initialize(&config);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::RunCommands,
            PermissionType::FullHdAccess,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
            EventType::RunCommandResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// # Returns
    ///
    /// - `true` if the plugin UI should re-render
    /// - `false` if the event was ignored or resulted in no state changes
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Timer,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Event::WebRequestResult {
                    status,
                    body,
                    context,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                self.map_permission_result(permissions)
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, _context) => {
                if exit_code != Some(0) {
                    tracing::warn!(
                        exit_code = ?exit_code,
                        stderr = %String::from_utf8_lossy(&stderr),
                        "failed to open recipe in browser"
                    );
                }
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        recipe_box::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Attaches the on-disk store when permissions are granted.
    ///
    /// A store that cannot be opened leaves the in-memory one in place; the session
    /// still works but nothing survives a restart.
    fn map_permission_result(&mut self, permissions: PermissionStatus) -> Event {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - attaching preference store");
                match recipe_box::open_storage() {
                    Ok(store) => self.app.state.attach_store(Box::new(store)),
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to open preference store, preferences will not persist");
                    }
                }
                Event::PermissionsResult { granted: true }
            }
            PermissionStatus::Denied => Event::PermissionsResult { granted: false },
        }
    }

    /// Maps keyboard events to application events according to the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::CursorDown),
                BareKey::Char('p') => Some(Event::CursorUp),
                _ => None,
            };
        }

        if self.app.state.show_onboarding {
            return Self::map_onboarding_key(key);
        }

        match self.app.view.input_mode {
            InputMode::Search => Self::map_search_key(key),
            InputMode::Filters(_) => Self::map_filters_key(key),
            InputMode::Normal => self.map_normal_key(key),
        }
    }

    fn map_onboarding_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Enter | BareKey::Right | BareKey::Char('l' | ' ') => Event::OnboardingNext,
            BareKey::Left | BareKey::Char('h') => Event::OnboardingBack,
            BareKey::Esc => Event::OnboardingSkip,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_search_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Enter => Event::SubmitSearch,
            BareKey::Esc => Event::ExitSearch,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_filters_key(key: &KeyWithModifier) -> Option<Event> {
        if key.bare_key == BareKey::Tab && key.has_modifiers(&[KeyModifier::Shift]) {
            return Some(Event::PreviousFilter);
        }
        Some(match key.bare_key {
            BareKey::Tab | BareKey::Down | BareKey::Char('j') => Event::NextFilter,
            BareKey::Up | BareKey::Char('k') => Event::PreviousFilter,
            BareKey::Right | BareKey::Enter | BareKey::Char('l' | ' ') => {
                Event::CycleFilter { forward: true }
            }
            BareKey::Left | BareKey::Char('h') => Event::CycleFilter { forward: false },
            BareKey::Char('c') => Event::ClearFilters,
            BareKey::Esc | BareKey::Char('f') => Event::ExitFilters,
            _ => return None,
        })
    }

    fn map_normal_key(&self, key: &KeyWithModifier) -> Option<Event> {
        let route = self.app.view.nav.current();

        let shared = match key.bare_key {
            BareKey::Char('*') => Some(Event::ToggleFavorite),
            BareKey::Char(c @ '1'..='5') => c
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .map(Event::Rate),
            BareKey::Char('o') => Some(Event::OpenOriginal),
            BareKey::Char('q') => Some(Event::CloseFocus),
            _ => None,
        };
        if shared.is_some() {
            return shared;
        }

        if route == Route::Detail {
            return match key.bare_key {
                BareKey::Esc | BareKey::Backspace | BareKey::Left | BareKey::Char('h') => {
                    Some(Event::Back)
                }
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::CursorDown,
            BareKey::Up | BareKey::Char('k') => Event::CursorUp,
            BareKey::Enter | BareKey::Right | BareKey::Char('l') => Event::OpenDetail,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('f') => Event::FiltersMode,
            BareKey::Char('c') => Event::ClearFilters,
            BareKey::Char('s') => Event::CycleSort,
            BareKey::Char('v') => Event::CycleViewMode,
            BareKey::Char('F') => Event::ShowFavorites,
            BareKey::Char('S') => Event::ShowSearch,
            BareKey::Esc if route == Route::Favorites => Event::ShowSearch,
            BareKey::Esc => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Executes an action returned from event handling.
    ///
    /// # Actions
    ///
    /// - `CloseFocus`: Hide plugin pane
    /// - `ArmTimer`: One-shot host timer
    /// - `WebRequest`: GET through the host, context echoed back in the result
    /// - `OpenUrl`: `xdg-open <url>`
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::ArmTimer { millis } => {
                #[allow(clippy::cast_precision_loss)]
                let secs = *millis as f64 / 1000.0;
                set_timeout(secs);
            }
            Action::WebRequest { url, context } => {
                tracing::debug!(context = ?context.keys().collect::<Vec<_>>(), "sending web request");
                web_request(
                    url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    context.clone(),
                );
            }
            Action::OpenUrl { url } => {
                tracing::debug!(url = %url, "opening recipe in browser");
                run_command(&["xdg-open", url.as_str()], BTreeMap::new());
            }
        }
    }
}
