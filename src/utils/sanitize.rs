//! Input sanitization utilities for security
//!
//! Slugs end up as directory names under the plugins directory and arrive
//! from remote-triggered action calls, so they are validated before use.

use crate::error::{Result, WpdiError};
use regex::Regex;
use std::sync::LazyLock;

/// `dir/file.php` or a single-file `file.php`
static SAFE_SLUG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+(/[A-Za-z0-9._-]+)?$").expect("Invalid regex pattern")
});

const MAX_SLUG_LEN: usize = 200;

/// Validate a plugin slug is safe to use as a filesystem path fragment
///
/// # Security
/// Prevents path traversal: slugs like `../../wp-config.php` are rejected.
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(WpdiError::ConfigError(
            "Dependency slug cannot be empty".to_string(),
        ));
    }

    if slug.len() > MAX_SLUG_LEN {
        return Err(WpdiError::ConfigError(format!(
            "Dependency slug too long (max {} chars)",
            MAX_SLUG_LEN
        )));
    }

    if !SAFE_SLUG.is_match(slug) {
        return Err(WpdiError::ConfigError(format!(
            "Dependency slug contains invalid characters: {}",
            slug
        )));
    }

    if slug.split('/').any(|part| part == "." || part == "..") || slug.contains("..") {
        return Err(WpdiError::ConfigError(format!(
            "Dependency slug cannot contain path traversal: {}",
            slug
        )));
    }

    Ok(())
}

/// Mask a secret token for display (log purposes only)
pub fn redact_token(url: &str, token: Option<&str>) -> String {
    match token {
        Some(t) if !t.is_empty() => url.replace(t, "***"),
        _ => url.to_string(),
    }
}
