//! Error types for the Recipe Box plugin.
//!
//! This module defines the centralized error type [`RecipeBoxError`] and a type alias
//! [`Result`] used throughout the crate. Errors are built with `thiserror`.
//!
//! Very few errors ever reach the user. Storage failures are absorbed by the state
//! container (defaults on read, a log line on write) and fetch failures are collapsed
//! into a single display message. The enum exists so that the layers underneath can
//! still propagate with `?`.

use thiserror::Error;

/// The main error type for Recipe Box operations.
///
/// # Examples
///
/// ```
/// use recipe_box::RecipeBoxError;
///
/// fn check_ceiling(raw: &str) -> Result<u32, RecipeBoxError> {
///     raw.parse::<u32>()
///         .map_err(|_| RecipeBoxError::Config(format!("invalid calorie ceiling: {raw}")))
/// }
///
/// assert!(check_ceiling("abc").is_err());
/// ```
#[derive(Debug, Error)]
pub enum RecipeBoxError {
    /// Reading from or writing to the preference store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The recipe API request failed or returned something unusable.
    ///
    /// The string is the message shown to the user.
    #[error("{0}")]
    Fetch(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Recipe Box operations.
pub type Result<T> = std::result::Result<T, RecipeBoxError>;
