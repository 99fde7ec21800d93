//! Recipe detail component renderer.
//!
//! Renders the selected recipe top to bottom: title, quick stats, the user's
//! rating, labels, the per-serving nutrition table and the ingredient list. Lines
//! that do not fit above the footer are dropped, ingredients last.

use crate::ui::helpers::{position_cursor, stars, write_fitted};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;
use std::fmt::{self, Write};

/// Left indent of the detail body.
const INDENT: &str = "  ";

/// One styled line of the detail view.
enum Line {
    Title(String),
    Dim(String),
    Rating(String),
    Heading(&'static str),
    Text(String),
    Blank,
}

/// Renders the detail view between `row` and `bottom` (inclusive).
///
/// # Returns
///
/// The row after the last line drawn.
///
/// # Errors
///
/// Propagates the writer's error.
pub fn render_detail(
    out: &mut impl Write,
    row: usize,
    bottom: usize,
    detail: &DetailInfo,
    theme: &Theme,
    cols: usize,
) -> Result<usize, fmt::Error> {
    let mut current_row = row;
    for line in detail_lines(detail) {
        if current_row > bottom {
            break;
        }
        position_cursor(out, current_row, 1)?;
        write_line(out, &line, detail, theme, cols)?;
        current_row += 1;
    }
    Ok(current_row)
}

fn detail_lines(detail: &DetailInfo) -> Vec<Line> {
    let mut lines = vec![Line::Title(detail.name.clone())];
    if !detail.source.is_empty() {
        lines.push(Line::Dim(format!("by {}", detail.source)));
    }
    lines.push(Line::Text(format!(
        "{} min · {} kcal per serving · {} servings",
        detail.minutes, detail.calories_per_serving, detail.servings
    )));
    lines.push(Line::Rating(stars(detail.rating)));
    lines.push(Line::Blank);

    if !detail.diet_labels.is_empty() {
        lines.push(Line::Text(format!("Diet: {}", detail.diet_labels.join(", "))));
    }
    if !detail.health_labels.is_empty() {
        let mut health = format!("Health: {}", detail.health_labels.join(", "));
        if detail.hidden_health_labels > 0 {
            health = format!("{health} +{} more", detail.hidden_health_labels);
        }
        lines.push(Line::Text(health));
    }
    if !detail.cuisine_types.is_empty() {
        lines.push(Line::Text(format!("Cuisine: {}", detail.cuisine_types.join(", "))));
    }
    if !detail.meal_types.is_empty() {
        lines.push(Line::Text(format!("Meal: {}", detail.meal_types.join(", "))));
    }
    if let Some(url) = &detail.url {
        lines.push(Line::Dim(format!("Original: {url}")));
    }
    lines.push(Line::Blank);

    lines.push(Line::Heading("Nutrition per serving"));
    lines.extend(
        detail
            .nutrients
            .iter()
            .map(|row| Line::Text(format!("{:<12}{}", row.label, row.value))),
    );
    lines.push(Line::Blank);

    lines.push(Line::Heading("Ingredients"));
    if detail.ingredients.is_empty() {
        lines.push(Line::Dim("No ingredients listed".to_string()));
    }
    lines.extend(
        detail
            .ingredients
            .iter()
            .map(|ingredient| Line::Text(format!("• {ingredient}"))),
    );
    lines
}

fn write_line(
    out: &mut impl Write,
    line: &Line,
    detail: &DetailInfo,
    theme: &Theme,
    cols: usize,
) -> fmt::Result {
    let body_width = cols.saturating_sub(INDENT.len());
    write!(out, "{INDENT}")?;
    match line {
        Line::Title(name) => {
            if detail.is_favorite {
                write!(out, "{}♥ ", Theme::fg(&theme.colors.favorite_fg))?;
            } else {
                write!(out, "  ")?;
            }
            write!(out, "{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg))?;
            write_fitted(out, name, body_width.saturating_sub(2))?;
        }
        Line::Dim(text) => {
            write!(out, "{}", Theme::fg(&theme.colors.text_dim))?;
            write_fitted(out, text, body_width)?;
        }
        Line::Rating(stars) => {
            write!(out, "{}Your rating: ", Theme::fg(&theme.colors.text_dim))?;
            write!(out, "{}", Theme::fg(&theme.colors.rating_fg))?;
            write_fitted(out, stars, body_width.saturating_sub("Your rating: ".len()))?;
        }
        Line::Heading(text) => {
            write!(out, "{}{}", Theme::bold(), Theme::fg(&theme.colors.accent))?;
            write_fitted(out, text, body_width)?;
        }
        Line::Text(text) => {
            write!(out, "{}", Theme::fg(&theme.colors.text_normal))?;
            write_fitted(out, text, body_width)?;
        }
        Line::Blank => write!(out, "{}", " ".repeat(body_width))?,
    }
    write!(out, "{}", Theme::reset())
}
