//! Manifest parsing
//!
//! A manifest is a JSON array of dependency declarations shipped by a plugin
//! or theme as `wp-dependencies.json`. A manifest either parses completely or
//! is rejected as a whole; there is no partial registration.

use crate::core::types::{Dependency, Host, slug_dir};
use crate::error::{Result, WpdiError};
use crate::project_identity::MANIFEST_FILE_NAME;
use crate::ui;
use crate::utils::sanitize::validate_slug;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_BRANCH: &str = "master";

#[derive(Debug, Deserialize)]
struct RawDependency {
    slug: String,
    uri: String,
    host: Host,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    required: Option<Value>,
    #[serde(default)]
    optional: Option<Value>,
}

/// A manifest read from a caller's directory.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    /// Basename of the calling plugin directory
    pub source: String,
    pub path: PathBuf,
    pub dependencies: Vec<Dependency>,
}

/// Parse manifest text into declarations.
///
/// `source` is left empty; the registry stamps it on registration.
pub fn parse_manifest(content: &str) -> Result<Vec<Dependency>> {
    if content.trim().is_empty() {
        return Err(WpdiError::ConfigError("manifest is empty".into()));
    }

    let raw: Vec<RawDependency> = serde_json::from_str(content)
        .map_err(|e| WpdiError::ConfigError(format!("malformed manifest: {}", e)))?;

    let mut dependencies = Vec::with_capacity(raw.len());
    for entry in raw {
        validate_slug(&entry.slug)?;

        let required_flag = parse_flag(entry.required.as_ref(), "required", &entry.slug);
        let optional_flag = parse_flag(entry.optional.as_ref(), "optional", &entry.slug);

        let name = entry
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| slug_dir(&entry.slug).to_string());

        dependencies.push(Dependency {
            name,
            uri: entry.uri.trim().to_string(),
            host: entry.host,
            branch: entry
                .branch
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            token: entry.token.filter(|t| !t.is_empty()),
            required: is_required(required_flag, optional_flag),
            source: String::new(),
            download_link: None,
            slug: entry.slug,
        });
    }

    Ok(dependencies)
}

/// Requiredness rule: explicit `required: true`, or explicit `optional: false`.
/// Absence of both means not required.
pub fn is_required(required: Option<bool>, optional: Option<bool>) -> bool {
    required == Some(true) || optional == Some(false)
}

/// Three-way flag parse: absent, a recognised boolean, or an unrecognised
/// form that is reported and treated as absent.
fn parse_flag(value: Option<&Value>, field: &str, slug: &str) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        other => {
            ui::warning(&format!(
                "Ignoring unrecognised '{}' value {} for dependency '{}'",
                field, other, slug
            ));
            None
        }
    }
}

/// Load the manifest shipped in `plugin_dir`, if there is one.
pub fn load_manifest(plugin_dir: &Path) -> Result<Option<LoadedManifest>> {
    let path = plugin_dir.join(MANIFEST_FILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|e| WpdiError::IoError {
        path: path.clone(),
        source: e,
    })?;

    let dependencies = parse_manifest(&content).map_err(|e| match e {
        WpdiError::ConfigError(msg) => {
            WpdiError::ConfigError(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;

    Ok(Some(LoadedManifest {
        source: caller_source(plugin_dir),
        path,
        dependencies,
    }))
}

/// Identity of a caller: the basename of its directory.
pub fn caller_source(plugin_dir: &Path) -> String {
    plugin_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| plugin_dir.display().to_string())
}

/// Every directory in `plugins_dir` that ships a manifest, in sorted order.
pub fn discover_callers(plugins_dir: &Path) -> Result<Vec<PathBuf>> {
    if !plugins_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(plugins_dir).map_err(|e| WpdiError::IoError {
        path: plugins_dir.to_path_buf(),
        source: e,
    })?;

    let mut callers: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir() && path.join(MANIFEST_FILE_NAME).is_file())
        .collect();
    callers.sort();

    Ok(callers)
}
