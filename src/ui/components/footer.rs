//! Footer component renderer.
//!
//! Shows keybinding hints, or the pending notice in their place.

use crate::ui::helpers::{position_cursor, write_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;
use std::fmt::{self, Write};

/// Renders the footer help bar at the specified row.
///
/// A notice ("Added to favorites!") is shown bold in the accent color. Otherwise
/// the keybindings are shown dimmed. Text wider than the terminal is cut.
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Errors
///
/// Propagates the writer's error.
pub fn render_footer(
    out: &mut impl Write,
    row: usize,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
) -> Result<usize, fmt::Error> {
    position_cursor(out, row, 1)?;
    match &footer.notice {
        Some(notice) => {
            write!(out, "{}{}", Theme::bold(), Theme::fg(&theme.colors.accent))?;
            write_centered(out, notice, cols)?;
        }
        None => {
            write!(out, "{}", Theme::fg(&theme.colors.text_dim))?;
            write_centered(out, &footer.keybindings, cols)?;
        }
    }
    write!(out, "{}", Theme::reset())?;
    Ok(row + 1)
}
