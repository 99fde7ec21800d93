//! Presentation-only state.
//!
//! Everything here is owned by the terminal surface and never persisted: the search
//! bar's edit buffer, the list cursor, the route stack, the transient notice line
//! and the onboarding panel being shown.

use super::modes::{InputMode, OnboardingStep};
use super::navigation::NavigationStack;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub input_mode: InputMode,

    /// Search bar contents while typing. Applied to the query on submit.
    pub input: String,

    /// Index into the visible recipe list.
    pub cursor: usize,

    pub nav: NavigationStack,

    /// One-line confirmation shown until the next key press.
    pub notice: Option<String>,

    pub onboarding_step: OnboardingStep,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            input_mode: InputMode::Normal,
            input: String::new(),
            cursor: 0,
            nav: NavigationStack::new(),
            notice: None,
            onboarding_step: OnboardingStep::FIRST,
        }
    }
}

impl ViewState {
    /// Moves the cursor down, wrapping to the top.
    pub fn cursor_down(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn cursor_up(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    /// Keeps the cursor inside a list of `len` items.
    pub fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_both_ways() {
        let mut view = ViewState::default();
        view.cursor_up(3);
        assert_eq!(view.cursor, 2);
        view.cursor_down(3);
        assert_eq!(view.cursor, 0);
    }

    #[test]
    fn empty_list_pins_cursor_to_zero() {
        let mut view = ViewState {
            cursor: 4,
            ..ViewState::default()
        };
        view.cursor_down(0);
        assert_eq!(view.cursor, 0);

        view.cursor = 7;
        view.clamp_cursor(3);
        assert_eq!(view.cursor, 2);
    }
}
