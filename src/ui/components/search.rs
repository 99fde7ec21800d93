//! Search toolbar component renderer.
//!
//! Renders the bordered search box followed by the filter chips and a status line
//! with the sort key, layout and active filter count.

use crate::ui::helpers::{position_cursor, truncate, width, write_fitted};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterChip, ToolbarInfo};
use std::fmt::{self, Write};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Gap between filter chips.
const CHIP_GAP: &str = "  ";

/// Renders the search toolbar at the specified row.
///
/// # Layout
///
/// ```text
/// [margin] ┌─────────────────────┐ [margin]
/// [margin] │ Search: pasta▏      │ [margin]
/// [margin] └─────────────────────┘ [margin]
///   Meal Type: dinner  Cuisine: All Cuisines  ...
///   Sort: Name (A-Z) · View: grid · 1 filter active
/// ```
///
/// # Returns
///
/// The next available row position (row + 5)
///
/// # Errors
///
/// Propagates the writer's error.
pub fn render_toolbar(
    out: &mut impl Write,
    row: usize,
    toolbar: &ToolbarInfo,
    theme: &Theme,
    cols: usize,
) -> Result<usize, fmt::Error> {
    let row = render_search_box(out, row, toolbar, theme, cols)?;
    let row = render_filter_chips(out, row, &toolbar.filters, theme, cols)?;
    render_status_line(out, row, toolbar, theme, cols)
}

fn render_search_box(
    out: &mut impl Write,
    row: usize,
    toolbar: &ToolbarInfo,
    theme: &Theme,
    cols: usize,
) -> Result<usize, fmt::Error> {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if toolbar.search.editing {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    position_cursor(out, row, 1)?;
    write!(
        out,
        "{margin}{}┌{}┐{}",
        Theme::fg(border),
        "─".repeat(inner_width),
        Theme::reset()
    )?;

    let caret = if toolbar.search.editing { "▏" } else { "" };
    let search_text = format!(" Search: {}{caret}", toolbar.search.query);

    position_cursor(out, row + 1, 1)?;
    write!(out, "{margin}{}│", Theme::fg(border))?;
    write!(out, "{}", Theme::fg(&theme.colors.text_normal))?;
    write_fitted(out, &search_text, inner_width)?;
    write!(out, "{}│{}", Theme::fg(border), Theme::reset())?;

    position_cursor(out, row + 2, 1)?;
    write!(
        out,
        "{margin}{}└{}┘{}",
        Theme::fg(border),
        "─".repeat(inner_width),
        Theme::reset()
    )?;

    Ok(row + 3)
}

/// Chips that do not fit in the remaining width are left out.
fn render_filter_chips(
    out: &mut impl Write,
    row: usize,
    chips: &[FilterChip],
    theme: &Theme,
    cols: usize,
) -> Result<usize, fmt::Error> {
    position_cursor(out, row, 1)?;
    write!(out, "{CHIP_GAP}")?;
    let mut used = width(CHIP_GAP);

    for chip in chips {
        let text = format!("{}: {}", chip.label, chip.value);
        let needed = width(&text) + width(CHIP_GAP);
        if used + needed > cols {
            break;
        }

        if chip.is_focused {
            write!(
                out,
                "{}{}",
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg)
            )?;
        } else if chip.is_set {
            write!(out, "{}{}", Theme::bold(), Theme::fg(&theme.colors.accent))?;
        } else {
            write!(out, "{}", Theme::fg(&theme.colors.text_dim))?;
        }
        write!(out, "{text}{}{CHIP_GAP}", Theme::reset())?;
        used += needed;
    }

    write!(out, "{}", " ".repeat(cols.saturating_sub(used)))?;
    Ok(row + 1)
}

fn render_status_line(
    out: &mut impl Write,
    row: usize,
    toolbar: &ToolbarInfo,
    theme: &Theme,
    cols: usize,
) -> Result<usize, fmt::Error> {
    let filters = match toolbar.active_filters {
        0 => "no filters".to_string(),
        1 => "1 filter active".to_string(),
        n => format!("{n} filters active"),
    };
    let status = format!(
        "{CHIP_GAP}Sort: {} · View: {} · {filters}",
        toolbar.sort_label, toolbar.layout_label
    );

    position_cursor(out, row, 1)?;
    write!(out, "{}", Theme::fg(&theme.colors.text_dim))?;
    write_fitted(out, &truncate(&status, cols), cols)?;
    write!(out, "{}", Theme::reset())?;
    Ok(row + 1)
}
