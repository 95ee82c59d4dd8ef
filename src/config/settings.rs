//! Settings Module
//!
//! Tool settings live in an optional KDL file:
//!
//! ```kdl
//! plugins-dir "/srv/www/wp-content/plugins"
//! network-admin #false
//! dismiss-days 7
//! dismiss-timeout "my-theme-helper" 14
//! ```
//!
//! Environment variables (`WPDI_PLUGINS_DIR`, `WPDI_STATE_DIR`,
//! `WPDI_CACHE_DIR`) seed the defaults; the file overrides them and CLI
//! flags override both.

use crate::core::filters::DEFAULT_DISMISS_DAYS;
use crate::error::{Result, WpdiError};
use crate::utils::paths;
use kdl::{KdlDocument, KdlNode};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// File the settings were read from, if any
    pub source_file: Option<PathBuf>,
    pub plugins_dir: PathBuf,
    pub state_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub network_admin: bool,
    pub can_manage_plugins: bool,
    pub dismiss_days: u32,
    /// Per-source dismissal timeouts in days
    pub dismiss_timeouts: HashMap<String, u32>,
    pub lookup_timeout_secs: u64,
    pub download_timeout_secs: u64,
}

impl Settings {
    /// Defaults for the given directories
    pub fn with_dirs(plugins_dir: PathBuf, state_dir: PathBuf, cache_dir: PathBuf) -> Self {
        Self {
            source_file: None,
            plugins_dir,
            state_dir,
            cache_dir,
            network_admin: false,
            can_manage_plugins: true,
            dismiss_days: DEFAULT_DISMISS_DAYS,
            dismiss_timeouts: HashMap::new(),
            lookup_timeout_secs: DEFAULT_LOOKUP_TIMEOUT_SECS,
            download_timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
        }
    }

    /// Defaults from the environment and platform directories
    pub fn defaults() -> Result<Self> {
        Ok(Self::with_dirs(
            paths::plugins_dir()?,
            paths::state_dir()?,
            paths::cache_dir()?,
        ))
    }

    /// Load settings from `explicit`, or from the default location when it
    /// exists. An explicit path that does not exist is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let defaults = Self::defaults()?;

        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(WpdiError::ConfigError(format!(
                        "Settings file not found at: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => {
                let default_path = paths::settings_file()?;
                if !default_path.is_file() {
                    return Ok(defaults);
                }
                default_path
            }
        };

        let content = fs::read_to_string(&path).map_err(|e| WpdiError::IoError {
            path: path.clone(),
            source: e,
        })?;

        let mut settings = parse_settings(&content, defaults)?;
        settings.source_file = Some(path);
        Ok(settings)
    }
}

/// Apply the nodes of a KDL settings document on top of `base`
pub fn parse_settings(content: &str, base: Settings) -> Result<Settings> {
    let doc: KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
        let err_msg = e.to_string();
        let hint = if err_msg.contains("unexpected end of file") {
            "\nHint: You might be missing a closing quote or brace."
        } else {
            "\nHint: Settings use the format: node-name value (booleans are #true / #false)"
        };
        WpdiError::ConfigError(format!("KDL parsing error: {}{}", err_msg, hint))
    })?;

    let mut settings = base;

    for node in doc.nodes() {
        match node.name().value() {
            "plugins-dir" => settings.plugins_dir = path_arg(node)?,
            "state-dir" => settings.state_dir = path_arg(node)?,
            "cache-dir" => settings.cache_dir = path_arg(node)?,
            "network-admin" => settings.network_admin = bool_arg(node)?,
            "can-manage-plugins" => settings.can_manage_plugins = bool_arg(node)?,
            "dismiss-days" => settings.dismiss_days = days_value(node, 0)?,
            "dismiss-timeout" => {
                let source = string_arg(node, 0)?;
                let days = days_value(node, 1)?;
                settings.dismiss_timeouts.insert(source, days);
            }
            "lookup-timeout" => settings.lookup_timeout_secs = uint_arg(node, 0)?,
            "download-timeout" => settings.download_timeout_secs = uint_arg(node, 0)?,
            other => {
                return Err(WpdiError::ConfigError(format!(
                    "Unknown setting: '{}'",
                    other
                )));
            }
        }
    }

    Ok(settings)
}

fn invalid(node: &KdlNode, expected: &str) -> WpdiError {
    WpdiError::ConfigError(format!(
        "Invalid value for '{}': expected {}",
        node.name().value(),
        expected
    ))
}

fn string_arg(node: &KdlNode, idx: usize) -> Result<String> {
    node.entries()
        .get(idx)
        .and_then(|entry| entry.value().as_string())
        .map(str::to_string)
        .ok_or_else(|| invalid(node, "a string"))
}

fn path_arg(node: &KdlNode) -> Result<PathBuf> {
    let raw = string_arg(node, 0)?;
    paths::expand_home(Path::new(&raw))
}

fn bool_arg(node: &KdlNode) -> Result<bool> {
    let entry = node.entries().first().ok_or_else(|| invalid(node, "#true or #false"))?;
    let value = entry.value();

    if let Some(b) = value.as_bool() {
        return Ok(b);
    }
    match value.as_string() {
        Some(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Some(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(invalid(node, "#true or #false")),
    }
}

fn uint_arg(node: &KdlNode, idx: usize) -> Result<u64> {
    node.entries()
        .get(idx)
        .and_then(|entry| entry.value().as_integer())
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| invalid(node, "a non-negative integer"))
}

fn days_value(node: &KdlNode, idx: usize) -> Result<u32> {
    uint_arg(node, idx)
        .and_then(|n| u32::try_from(n).map_err(|_| invalid(node, "a number of days")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Settings {
        Settings::with_dirs(
            PathBuf::from("/tmp/plugins"),
            PathBuf::from("/tmp/state"),
            PathBuf::from("/tmp/cache"),
        )
    }

    #[test]
    fn test_defaults() {
        let settings = base();
        assert_eq!(settings.dismiss_days, 7);
        assert!(settings.can_manage_plugins);
        assert!(!settings.network_admin);
        assert!(settings.dismiss_timeouts.is_empty());
    }

    #[test]
    fn test_parse_all_settings() {
        let content = r#"
plugins-dir "/srv/www/wp-content/plugins"
state-dir "/var/lib/wpdi"
network-admin #true
can-manage-plugins "false"
dismiss-days 3
dismiss-timeout "noisy-plugin" 30
lookup-timeout 5
download-timeout 60
"#;
        let settings = parse_settings(content, base()).expect("parse");

        assert_eq!(settings.plugins_dir, PathBuf::from("/srv/www/wp-content/plugins"));
        assert_eq!(settings.state_dir, PathBuf::from("/var/lib/wpdi"));
        assert_eq!(settings.cache_dir, PathBuf::from("/tmp/cache"));
        assert!(settings.network_admin);
        assert!(!settings.can_manage_plugins);
        assert_eq!(settings.dismiss_days, 3);
        assert_eq!(settings.dismiss_timeouts.get("noisy-plugin"), Some(&30));
        assert_eq!(settings.lookup_timeout_secs, 5);
        assert_eq!(settings.download_timeout_secs, 60);
    }

    #[test]
    fn test_unknown_setting_is_rejected() {
        assert!(parse_settings("colour \"always\"", base()).is_err());
    }

    #[test]
    fn test_wrong_value_type_is_rejected() {
        assert!(parse_settings("dismiss-days \"seven\"", base()).is_err());
        assert!(parse_settings("dismiss-days -1", base()).is_err());
        assert!(parse_settings("network-admin 1", base()).is_err());
        assert!(parse_settings("dismiss-timeout \"x\"", base()).is_err());
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let tmp = tempfile::tempdir().expect("tempdir");
        assert!(Settings::load(Some(&tmp.path().join("missing.kdl"))).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("wpdi.kdl");
        fs::write(&path, "dismiss-days 14\n").expect("write");

        let settings = Settings::load(Some(&path)).expect("load");
        assert_eq!(settings.dismiss_days, 14);
        assert_eq!(settings.source_file, Some(path));
    }
}
