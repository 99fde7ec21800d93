//! Empty state component renderer.
//!
//! Renders the two-line message shown in place of results: nothing found, a
//! search in progress, or the last fetch error.

use crate::ui::helpers::{position_cursor, write_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyKind, EmptyState};
use std::fmt::{self, Write};

/// Blank rows left above the message.
const TOP_MARGIN: usize = 2;

/// Renders the empty state message below `row`.
///
/// # Layout
///
/// ```text
/// [2 blank lines]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
///
/// The message color follows its kind: `empty_state_fg` for plain information,
/// `accent` while loading and `error_fg` for errors.
///
/// # Errors
///
/// Propagates the writer's error.
pub fn render_empty_state(
    out: &mut impl Write,
    row: usize,
    empty: &EmptyState,
    theme: &Theme,
    cols: usize,
) -> Result<usize, fmt::Error> {
    let color = match empty.kind {
        EmptyKind::Info => &theme.colors.empty_state_fg,
        EmptyKind::Loading => &theme.colors.accent,
        EmptyKind::Error => &theme.colors.error_fg,
    };

    let row = row + TOP_MARGIN;
    position_cursor(out, row, 1)?;
    write!(out, "{}{}", Theme::bold(), Theme::fg(color))?;
    write_centered(out, &empty.message, cols)?;
    write!(out, "{}", Theme::reset())?;

    position_cursor(out, row + 1, 1)?;
    write!(out, "{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim))?;
    write_centered(out, &empty.subtitle, cols)?;
    write!(out, "{}", Theme::reset())?;

    Ok(row + 2)
}
