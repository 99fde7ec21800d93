//! Composable UI component renderers.
//!
//! Each component writes one part of the frame and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with the current screen name
//! - [`footer`]: Keybinding hints or the pending notice
//! - [`search`]: Search box, filter chips and status line
//! - [`cards`]: Recipe cards in grid, list or compact layout
//! - [`detail`]: Full view of the selected recipe
//! - [`empty`]: Empty, loading and error messages
//! - [`onboarding`]: First-run panels
//!
//! # Layout
//!
//! Every screen shares the same frame:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Screen body]
//! [Border]
//! [Footer]
//! ```

mod cards;
mod detail;
mod empty;
mod footer;
mod header;
mod onboarding;
mod search;

use crate::ui::helpers::{position_cursor, write_fitted};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ResultsBody, Screen, UIViewModel};
use std::fmt::{self, Write};

use cards::render_cards;
use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use onboarding::render_onboarding;
use search::render_toolbar;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(out: &mut impl Write, row: usize, color: &str, cols: usize) -> Result<usize, fmt::Error> {
    position_cursor(out, row, 1)?;
    write!(out, "{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset())?;
    Ok(row + 1)
}

/// Renders a full frame for the view model.
///
/// # Parameters
///
/// * `out` - Frame being written
/// * `vm` - Pre-computed view model
/// * `theme` - Active color theme
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
///
/// # Errors
///
/// Propagates the writer's error.
pub fn render_frame(
    out: &mut impl Write,
    vm: &UIViewModel,
    theme: &Theme,
    rows: usize,
    cols: usize,
) -> fmt::Result {
    let mut current_row = 2;

    current_row = render_header(out, current_row, &vm.header, theme, cols)?;
    current_row = render_border(out, current_row, &theme.colors.border, cols)?;

    let footer_row = rows.max(current_row + 2);
    let border_row = footer_row - 1;
    let bottom = border_row - 1;

    match &vm.screen {
        Screen::Onboarding(panel) => {
            render_onboarding(out, current_row, panel, theme, cols)?;
        }
        Screen::Search { toolbar, body } => {
            current_row = render_toolbar(out, current_row, toolbar, theme, cols)?;
            render_body(out, current_row, bottom, body, theme, cols)?;
        }
        Screen::Favorites { saved, body } => {
            let noun = if *saved == 1 { "recipe" } else { "recipes" };
            position_cursor(out, current_row, 1)?;
            write!(out, "{}", Theme::fg(&theme.colors.text_dim))?;
            write_fitted(out, &format!("  {saved} {noun} saved"), cols)?;
            write!(out, "{}", Theme::reset())?;
            render_body(out, current_row + 2, bottom, body, theme, cols)?;
        }
        Screen::Detail(detail) => {
            render_detail(out, current_row + 1, bottom, detail, theme, cols)?;
        }
    }

    render_border(out, border_row, &theme.colors.border, cols)?;
    render_footer(out, footer_row, &vm.footer, theme, cols)?;
    Ok(())
}

fn render_body(
    out: &mut impl Write,
    row: usize,
    bottom: usize,
    body: &ResultsBody,
    theme: &Theme,
    cols: usize,
) -> Result<usize, fmt::Error> {
    match body {
        ResultsBody::Cards {
            items,
            layout,
            selected_index,
        } => render_cards(out, row, bottom, items, *layout, *selected_index, theme, cols),
        ResultsBody::Empty(empty) => render_empty_state(out, row, empty, theme, cols),
    }
}
