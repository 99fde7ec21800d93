//! Input mode and onboarding step types.
//!
//! The input mode decides how keys are interpreted: plain navigation and commands,
//! typing into the search bar, or cycling values in the filter panel. Onboarding
//! panels take precedence over all three while they are shown.
//!
//! # Example
//!
//! ```rust
//! use recipe_box::app::modes::{InputMode, OnboardingStep};
//! use recipe_box::domain::FilterField;
//!
//! let mode = InputMode::Filters(FilterField::Cuisine);
//! assert_ne!(mode, InputMode::Normal);
//! assert_eq!(OnboardingStep::FIRST.next(), Some(OnboardingStep::SearchAndFilters));
//! ```

use crate::domain::search::FilterField;

/// Current input handling mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and single-key commands.
    #[default]
    Normal,

    /// Typing into the search bar. The query is applied on submit.
    Search,

    /// Filter panel open with the given field focused.
    Filters(FilterField),
}

/// One of the onboarding panels, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    Welcome,
    SearchAndFilters,
    Favorites,
    Enjoy,
}

impl OnboardingStep {
    pub const FIRST: Self = Self::Welcome;

    pub const ALL: [Self; 4] = [
        Self::Welcome,
        Self::SearchAndFilters,
        Self::Favorites,
        Self::Enjoy,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|step| *step == self).unwrap_or(0)
    }

    /// Following panel, or `None` on the last one.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Preceding panel, or `None` on the first one.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome to Premium Recipes",
            Self::SearchAndFilters => "Smart Search & Filters",
            Self::Favorites => "Save Your Favorites",
            Self::Enjoy => "Enjoy the Experience",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Welcome => {
                "Discover thousands of delicious recipes from around the world with our premium recipe finder."
            }
            Self::SearchAndFilters => {
                "Use advanced search, filters, and sorting to find exactly what you're craving."
            }
            Self::Favorites => {
                "Mark recipes as favorites and rate them to build your personal cookbook."
            }
            Self::Enjoy => "Beautiful design and delightful interactions throughout.",
        }
    }
}
