//! Central project identity contract.
//!
//! This module is the single source of truth for runtime identity values
//! and the well-known remote endpoints.

pub const BINARY_NAME: &str = "wpdi";
pub const STABLE_PROJECT_ID: &str = "wpdi";
pub const ENV_PREFIX: &str = "WPDI";
pub const SETTINGS_FILE_BASENAME: &str = "wpdi.kdl";
pub const MANIFEST_FILE_NAME: &str = "wp-dependencies.json";
pub const SITE_STATE_FILE_NAME: &str = "site-state.json";
pub const DISMISSALS_FILE_NAME: &str = "dismissals.json";

/// Prefix shared by every notice dismissal key.
pub const DISMISS_KEY_PREFIX: &str = "dependency-installer";

pub const WORDPRESS_DOWNLOADS_BASE: &str = "https://downloads.wordpress.org/plugin";
pub const WORDPRESS_PLUGIN_INFO_API: &str = "https://api.wordpress.org/plugins/info/1.2/";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}

pub fn env_get(suffix: &str) -> Option<String> {
    std::env::var(env_key(suffix))
        .ok()
        .filter(|value| !value.trim().is_empty())
}

pub fn user_agent() -> String {
    format!("{}/{}", BINARY_NAME, env!("CARGO_PKG_VERSION"))
}

pub fn wordpress_fallback_download(plugin_slug: &str) -> String {
    format!("{}/{}.zip", WORDPRESS_DOWNLOADS_BASE, plugin_slug)
}
