//! Header component renderer.
//!
//! Renders the plugin title bar: title and current screen name, centered, with
//! theme-aware colors and optional background styling.

use crate::ui::helpers::{position_cursor, write_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;
use std::fmt::{self, Write};

/// Renders the header title bar at the specified row.
///
/// # Parameters
///
/// * `out` - Frame being written
/// * `row` - Row position to render the header (1-indexed)
/// * `header` - Title and section name
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Errors
///
/// Propagates the writer's error.
pub fn render_header(
    out: &mut impl Write,
    row: usize,
    header: &HeaderInfo,
    theme: &Theme,
    cols: usize,
) -> Result<usize, fmt::Error> {
    position_cursor(out, row, 1)?;
    write!(out, "{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg))?;
    if let Some(bg) = &theme.colors.header_bg {
        write!(out, "{}", Theme::bg(bg))?;
    }

    let title = format!("{} · {}", header.title, header.section);
    write_centered(out, &title, cols)?;

    write!(out, "{}", Theme::reset())?;
    Ok(row + 1)
}
