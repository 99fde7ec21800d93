//! Shared rendering utilities and helpers.
//!
//! Components write into a `String` frame through [`std::fmt::Write`]. The helpers
//! here handle cursor positioning, query-term highlighting and width-limited text.
//! All widths are counted in characters, not bytes.
//!
//! # Example
//!
//! ```rust
//! use recipe_box::ui::helpers::{highlight_ranges, truncate};
//!
//! assert_eq!(highlight_ranges("Chicken Soup", "soup"), vec![(8, 12)]);
//! assert_eq!(truncate("Mediterranean", 6), "Medit…");
//! ```

use crate::ui::theme::Theme;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::fmt::{self, Write};

/// Moves the cursor to a 1-indexed row and column.
///
/// # Errors
///
/// Propagates the writer's error.
pub fn position_cursor(out: &mut impl Write, row: usize, col: usize) -> fmt::Result {
    write!(out, "\u{1b}[{row};{col}H")
}

/// Number of terminal columns `text` takes, assuming one per character.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

/// Writes `text` cut or padded to exactly `cols` characters.
///
/// # Errors
///
/// Propagates the writer's error.
pub fn write_fitted(out: &mut impl Write, text: &str, cols: usize) -> fmt::Result {
    let text = truncate(text, cols);
    write!(out, "{text}{}", " ".repeat(cols.saturating_sub(width(&text))))
}

/// Writes `text` centered in `cols`, padding both sides.
///
/// # Errors
///
/// Propagates the writer's error.
pub fn write_centered(out: &mut impl Write, text: &str, cols: usize) -> fmt::Result {
    let text = truncate(text, cols);
    let len = width(&text);
    let padding = cols.saturating_sub(len) / 2;
    write!(
        out,
        "{}{text}{}",
        " ".repeat(padding),
        " ".repeat(cols.saturating_sub(padding + len))
    )
}

/// Character ranges of `text` that fuzzy-match `query`.
///
/// Matched characters are merged into contiguous `(start, end)` runs with `end`
/// exclusive. A blank query or no match yields no ranges.
#[must_use]
pub fn highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let query = query.trim();
    if query.is_empty() {
        return vec![];
    }

    let matcher = SkimMatcherV2::default();
    let Some((_, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for index in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == index => *end = index + 1,
            _ => ranges.push((index, index + 1)),
        }
    }
    ranges
}

/// Writes text with highlighted character ranges.
///
/// When `is_selected` is set the highlights are skipped so they do not fight the
/// selection background.
///
/// # Parameters
///
/// * `out` - Frame being written
/// * `text` - The text to render
/// * `ranges` - Character index ranges to highlight `(start, end)`, end exclusive
/// * `theme` - Active color theme for highlight colors
/// * `is_selected` - Whether the item is currently selected
///
/// # Errors
///
/// Propagates the writer's error.
pub fn render_highlighted_text(
    out: &mut impl Write,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) -> fmt::Result {
    if ranges.is_empty() || is_selected {
        return write!(out, "{text}");
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            write!(out, "{normal_section}")?;
        }

        let highlighted_section: String = chars[start..end].iter().collect();
        write!(
            out,
            "{}{}{highlighted_section}{}{}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg),
            Theme::reset(),
            Theme::fg(&theme.colors.text_normal),
        )?;

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        write!(out, "{remaining}")?;
    }
    Ok(())
}

/// Rating as five stars, filled up to `rating`.
#[must_use]
pub fn stars(rating: Option<u8>) -> String {
    let filled = usize::from(rating.unwrap_or(0).min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn consecutive_matches_merge_into_runs() {
        assert_eq!(highlight_ranges("Pasta Carbonara", "pasta"), vec![(0, 5)]);
        assert_eq!(highlight_ranges("Pasta", "   "), vec![]);
        assert_eq!(highlight_ranges("Pasta", "xyz"), vec![]);
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Crème brûlée", 20), "Crème brûlée");
        assert_eq!(truncate("Crème brûlée", 5), "Crèm…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn fitted_and_centered_fill_the_width() {
        let mut out = String::new();
        write_fitted(&mut out, "ab", 4).unwrap();
        write_centered(&mut out, "ab", 6).unwrap();
        assert_eq!(out, "ab    ab  ");
    }

    #[test]
    fn highlights_skip_when_selected() {
        let theme = Theme::default();
        let mut plain = String::new();
        render_highlighted_text(&mut plain, "Soup", &[(0, 2)], &theme, true).unwrap();
        assert_eq!(plain, "Soup");

        let mut lit = String::new();
        render_highlighted_text(&mut lit, "Soup", &[(0, 2)], &theme, false).unwrap();
        assert!(lit.starts_with(&Theme::fg(&theme.colors.match_highlight_fg)));
        assert!(lit.ends_with("up"));
    }

    #[test]
    fn stars_fill_to_rating() {
        assert_eq!(stars(Some(3)), "★★★☆☆");
        assert_eq!(stars(None), "☆☆☆☆☆");
    }
}
