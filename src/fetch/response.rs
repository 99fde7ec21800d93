//! Recipe search response decoding.

use crate::domain::error::{RecipeBoxError, Result};
use crate::domain::recipe::Recipe;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    recipe: Recipe,
}

/// Decodes a host web-request result into recipes.
///
/// # Errors
///
/// Returns [`RecipeBoxError::Fetch`] carrying the user-facing message when the
/// status is not 2xx or the body is not a valid search envelope.
///
/// # Examples
///
/// ```
/// use recipe_box::fetch::response::parse_response;
///
/// let body = br#"{"hits":[{"recipe":{"uri":"r1","label":"Soup"}}]}"#;
/// assert_eq!(parse_response(200, body).unwrap()[0].label, "Soup");
///
/// let err = parse_response(401, b"").unwrap_err();
/// assert_eq!(err.to_string(), "Request failed with status code 401");
/// ```
pub fn parse_response(status: u16, body: &[u8]) -> Result<Vec<Recipe>> {
    if !(200..300).contains(&status) {
        return Err(RecipeBoxError::Fetch(format!(
            "Request failed with status code {status}"
        )));
    }

    let envelope: SearchEnvelope = serde_json::from_slice(body)
        .map_err(|e| RecipeBoxError::Fetch(format!("Invalid response from recipe service: {e}")))?;

    Ok(envelope.hits.into_iter().map(|hit| hit.recipe).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_hits_is_empty_list() {
        assert_eq!(parse_response(200, br#"{"count": 0}"#).unwrap(), vec![]);
    }

    #[test]
    fn keeps_api_order() {
        let body = br#"{"hits":[
            {"recipe":{"uri":"b","label":"B"},"_links":{}},
            {"recipe":{"uri":"a","label":"A"}}
        ]}"#;
        let uris: Vec<String> = parse_response(200, body)
            .unwrap()
            .into_iter()
            .map(|r| r.uri)
            .collect();
        assert_eq!(uris, vec!["b", "a"]);
    }

    #[test]
    fn malformed_json_is_a_fetch_error() {
        let err = parse_response(200, b"<html>").unwrap_err();
        assert!(matches!(err, RecipeBoxError::Fetch(_)));
    }

    #[test]
    fn server_error_reports_status() {
        let err = parse_response(503, br#"{"hits":[]}"#).unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status code 503");
    }
}
