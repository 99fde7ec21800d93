//! Recipe search request construction.

use crate::domain::search::SearchInputs;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Default recipe search endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.edamam.com/api/recipes/v2";

/// Bytes left unescaped in a query component: alphanumerics and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Index of the first hit requested.
const RESULT_FROM: u32 = 0;

/// Index one past the last hit requested.
const RESULT_TO: u32 = 30;

/// Endpoint and credentials for the recipe API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_base: String,
    pub app_id: String,
    pub app_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            app_id: String::new(),
            app_key: String::new(),
        }
    }
}

/// Joins the non-empty search fragments with single spaces.
///
/// The query is followed by meal type, cuisine and dietary filter, in that order.
/// The category filter never contributes.
///
/// ```
/// use recipe_box::domain::{Filters, SearchInputs};
/// use recipe_box::fetch::request::search_text;
///
/// let inputs = SearchInputs {
///     query: "pasta".into(),
///     filters: Filters { cuisine: "italian".into(), ..Filters::default() },
/// };
/// assert_eq!(search_text(&inputs), "pasta italian");
/// ```
#[must_use]
pub fn search_text(inputs: &SearchInputs) -> String {
    let filters = &inputs.filters;
    [
        inputs.query.as_str(),
        filters.meal_type.as_str(),
        filters.cuisine.as_str(),
        filters.dietary.as_str(),
    ]
    .iter()
    .map(|fragment| fragment.trim())
    .filter(|fragment| !fragment.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

/// Builds the request URL for `inputs`.
///
/// # Returns
///
/// `None` when the search text is empty, in which case no request should be made.
#[must_use]
pub fn build_url(api: &ApiConfig, inputs: &SearchInputs) -> Option<String> {
    let text = search_text(inputs);
    if text.is_empty() {
        return None;
    }

    let mut url = format!(
        "{}?type=public&q={}&app_id={}&app_key={}&from={RESULT_FROM}&to={RESULT_TO}",
        api.api_base,
        percent_encode(&text),
        percent_encode(&api.app_id),
        percent_encode(&api.app_key),
    );
    if let Some(ceiling) = inputs.filters.max_calories {
        url.push_str(&format!("&calories=0-{ceiling}"));
    }
    Some(url)
}

/// Percent-encodes a query component.
///
/// Leaves ASCII alphanumerics and `-_.!~*'()` alone, like `encodeURIComponent`.
#[must_use]
pub fn percent_encode(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}
