//! Onboarding panel renderer.

use crate::ui::helpers::{position_cursor, write_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::OnboardingPanel;
use std::fmt::{self, Write};

/// Renders the current onboarding panel centered below `row`.
///
/// # Layout
///
/// ```text
/// [blank]
///            Welcome to Recipe Box!
/// [blank]
///     Discover delicious recipes from around the world...
/// [blank]
///                  ● ○ ○ ○
/// ```
///
/// # Errors
///
/// Propagates the writer's error.
pub fn render_onboarding(
    out: &mut impl Write,
    row: usize,
    panel: &OnboardingPanel,
    theme: &Theme,
    cols: usize,
) -> Result<usize, fmt::Error> {
    let row = row + 1;
    position_cursor(out, row, 1)?;
    write!(out, "{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg))?;
    write_centered(out, &panel.title, cols)?;
    write!(out, "{}", Theme::reset())?;

    position_cursor(out, row + 2, 1)?;
    write!(out, "{}", Theme::fg(&theme.colors.text_normal))?;
    write_centered(out, &panel.description, cols)?;
    write!(out, "{}", Theme::reset())?;

    let dots: Vec<&str> = (1..=panel.total)
        .map(|position| if position == panel.position { "●" } else { "○" })
        .collect();
    position_cursor(out, row + 4, 1)?;
    write!(out, "{}", Theme::fg(&theme.colors.accent))?;
    write_centered(out, &dots.join(" "), cols)?;
    write!(out, "{}", Theme::reset())?;

    Ok(row + 5)
}
