//! Path utilities for the Zellij sandbox environment.

use std::path::PathBuf;

/// Returns the data directory holding favorites, ratings, the onboarding marker
/// and trace files.
///
/// The directory is `/host/.local/share/zellij/recipe-box` inside the sandbox.
/// `/host` points to the cwd of the last focused terminal, or the folder where
/// Zellij was started. Started from a home directory, this is
/// `~/.local/share/zellij/recipe-box`.
///
/// # Examples
///
/// ```
/// use recipe_box::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/recipe-box");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("recipe-box")
}

/// Expands tilde paths to use the `/host` prefix for the Zellij sandbox.
///
/// # Examples
///
/// ```
/// use recipe_box::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_leading_home_tilde_expands() {
        assert_eq!(expand_tilde("~user/x"), "~user/x");
        assert_eq!(expand_tilde("a/~/b"), "a/~/b");
    }
}
