//! Recipe card component renderer.
//!
//! Cards come in three layouts:
//!
//! - **Grid**: several cards per row, three lines each
//! - **List**: one card per row, two lines each
//! - **Compact**: one line per recipe
//!
//! Only the window of cards that fits on screen is drawn. The window scrolls so the
//! selected card stays visible.

use crate::domain::search::ViewMode;
use crate::ui::helpers::{self, position_cursor, stars, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardItem;
use std::fmt::{self, Write};

/// Minimum width of a grid card, gap included.
const GRID_CARD_WIDTH: usize = 36;

/// Width of the favorite marker column.
const MARKER_WIDTH: usize = 2;

/// Space between grid cards.
const GRID_GAP: usize = 2;

/// Geometry of one layout: how many cards share a band and how tall a band is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bands {
    per_band: usize,
    height: usize,
    card_width: usize,
}

impl Bands {
    fn for_layout(layout: ViewMode, cols: usize) -> Self {
        match layout {
            ViewMode::Grid => {
                let per_band = (cols / GRID_CARD_WIDTH).max(1);
                Self {
                    per_band,
                    height: 4,
                    card_width: (cols / per_band).saturating_sub(GRID_GAP),
                }
            }
            ViewMode::List => Self {
                per_band: 1,
                height: 3,
                card_width: cols,
            },
            ViewMode::Compact => Self {
                per_band: 1,
                height: 1,
                card_width: cols,
            },
        }
    }

    /// Index range of the cards to draw in `lines` rows, keeping `selected` visible.
    fn window(self, total: usize, selected: usize, lines: usize) -> std::ops::Range<usize> {
        let visible_bands = (lines / self.height).max(1);
        let selected_band = selected / self.per_band;
        let first_band = selected_band.saturating_sub(visible_bands - 1);
        let start = first_band * self.per_band;
        let end = (start + visible_bands * self.per_band).min(total);
        start.min(end)..end
    }
}

/// Renders recipe cards between `row` and `bottom` (inclusive).
///
/// # Parameters
///
/// * `out` - Frame being written
/// * `row` - First row available
/// * `bottom` - Last row available
/// * `items` - All cards in display order
/// * `layout` - Grid, list or compact
/// * `selected` - Index of the focused card
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The row after the last card drawn.
///
/// # Errors
///
/// Propagates the writer's error.
#[allow(clippy::too_many_arguments)]
pub fn render_cards(
    out: &mut impl Write,
    row: usize,
    bottom: usize,
    items: &[CardItem],
    layout: ViewMode,
    selected: usize,
    theme: &Theme,
    cols: usize,
) -> Result<usize, fmt::Error> {
    let lines = (bottom + 1).saturating_sub(row);
    let bands = Bands::for_layout(layout, cols);
    let window = bands.window(items.len(), selected, lines);

    let mut current_row = row;
    for band in items[window].chunks(bands.per_band) {
        if current_row > bottom {
            break;
        }
        for (slot, item) in band.iter().enumerate() {
            let col = 1 + slot * (bands.card_width + GRID_GAP);
            match layout {
                ViewMode::Grid => render_grid_card(out, current_row, col, item, theme, bands.card_width)?,
                ViewMode::List => render_list_card(out, current_row, item, theme, bands.card_width)?,
                ViewMode::Compact => render_compact_row(out, current_row, item, theme, bands.card_width)?,
            }
        }
        current_row += bands.height;
    }
    Ok(current_row)
}

/// Base style of a card; re-applied after every colored fragment.
fn base_style(item: &CardItem, theme: &Theme) -> String {
    if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    }
}

/// Favorite marker followed by the (highlighted) name, `card_width` wide.
fn write_title(out: &mut impl Write, item: &CardItem, theme: &Theme, card_width: usize) -> fmt::Result {
    let base = base_style(item, theme);
    write!(out, "{base}")?;
    if item.is_favorite {
        write!(out, "{}♥ {base}", Theme::fg(&theme.colors.favorite_fg))?;
    } else {
        write!(out, "{}", " ".repeat(MARKER_WIDTH))?;
    }

    let room = card_width.saturating_sub(MARKER_WIDTH);
    let name = truncate(&item.name, room);
    if item.is_selected {
        write!(out, "{}", Theme::bold())?;
    }
    helpers::render_highlighted_text(out, &name, &item.highlight_ranges, theme, item.is_selected)?;
    write!(out, "{base}{}", " ".repeat(room.saturating_sub(width(&name))))?;
    write!(out, "{}", Theme::reset())
}

fn stats_text(item: &CardItem) -> String {
    format!(
        "{} min · {} kcal · {} servings",
        item.minutes, item.calories_per_serving, item.servings
    )
}

/// Writes one secondary line: dim `text`, then optional stars, padded to the width.
fn write_detail_line(
    out: &mut impl Write,
    item: &CardItem,
    theme: &Theme,
    text: &str,
    with_stars: bool,
    card_width: usize,
) -> fmt::Result {
    let base = base_style(item, theme);
    let indent = " ".repeat(MARKER_WIDTH);
    write!(out, "{base}{indent}")?;

    let mut used = MARKER_WIDTH;
    if with_stars {
        let rating = stars(item.rating);
        if used + width(&rating) + 1 <= card_width {
            write!(out, "{}{rating}{base} ", Theme::fg(&theme.colors.rating_fg))?;
            used += width(&rating) + 1;
        }
    }

    let text = truncate(text, card_width.saturating_sub(used));
    if !item.is_selected {
        write!(out, "{}", Theme::fg(&theme.colors.text_dim))?;
    }
    write!(out, "{text}{base}")?;
    used += width(&text);

    write!(out, "{}{}", " ".repeat(card_width.saturating_sub(used)), Theme::reset())
}

fn render_grid_card(
    out: &mut impl Write,
    row: usize,
    col: usize,
    item: &CardItem,
    theme: &Theme,
    card_width: usize,
) -> fmt::Result {
    position_cursor(out, row, col)?;
    write_title(out, item, theme, card_width)?;

    position_cursor(out, row + 1, col)?;
    write_detail_line(out, item, theme, &stats_text(item), false, card_width)?;

    position_cursor(out, row + 2, col)?;
    write_detail_line(out, item, theme, &item.diet_labels.join(", "), true, card_width)
}

fn render_list_card(
    out: &mut impl Write,
    row: usize,
    item: &CardItem,
    theme: &Theme,
    card_width: usize,
) -> fmt::Result {
    position_cursor(out, row, 1)?;
    write_title(out, item, theme, card_width)?;

    let mut second = stats_text(item);
    if !item.source.is_empty() {
        second = format!("{second} · {}", item.source);
    }
    if !item.diet_labels.is_empty() {
        second = format!("{second} · {}", item.diet_labels.join(", "));
    }

    position_cursor(out, row + 1, 1)?;
    write_detail_line(out, item, theme, &second, true, card_width)
}

fn render_compact_row(
    out: &mut impl Write,
    row: usize,
    item: &CardItem,
    theme: &Theme,
    card_width: usize,
) -> fmt::Result {
    let stats = format!(
        " {} {:>4} min {:>5} kcal",
        stars(item.rating),
        item.minutes,
        item.calories_per_serving
    );
    let name_width = card_width.saturating_sub(width(&stats));

    position_cursor(out, row, 1)?;
    write_title(out, item, theme, name_width)?;

    let base = base_style(item, theme);
    if item.is_selected {
        write!(out, "{base}")?;
    } else {
        write!(out, "{}", Theme::fg(&theme.colors.text_dim))?;
    }
    write!(out, "{}{}", truncate(&stats, card_width), Theme::reset())
}
