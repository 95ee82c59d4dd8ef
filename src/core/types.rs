use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Source-hosting conventions a dependency can be fetched from.
// Adding a host means adding a builder in core::resolver::url_builders.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Host {
    Github,
    Bitbucket,
    Gitlab,
    Gitea,
    Wordpress,
    Direct,
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Github => write!(f, "github"),
            Self::Bitbucket => write!(f, "bitbucket"),
            Self::Gitlab => write!(f, "gitlab"),
            Self::Gitea => write!(f, "gitea"),
            Self::Wordpress => write!(f, "wordpress"),
            Self::Direct => write!(f, "direct"),
        }
    }
}

/// One declared plugin dependency, normalized from a manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Identity key, e.g. `plugin-dir/plugin-file.php`
    pub slug: String,
    pub name: String,
    pub uri: String,
    pub host: Host,
    /// Ref, tag or branch; unused for `wordpress` and `direct`
    pub branch: String,
    pub token: Option<String>,
    pub required: bool,
    /// Plugin or theme that declared this dependency
    pub source: String,
    /// Derived by the resolver, never read from the manifest
    pub download_link: Option<String>,
}

impl Dependency {
    /// Directory the plugin is expected to live in under the plugins dir.
    pub fn dir_name(&self) -> &str {
        slug_dir(&self.slug)
    }
}

/// Directory part of a plugin slug.
///
/// `akismet/akismet.php` -> `akismet`, single-file `hello.php` -> `hello`.
pub fn slug_dir(slug: &str) -> &str {
    match slug.split_once('/') {
        Some((dir, _)) => dir,
        None => slug.strip_suffix(".php").unwrap_or(slug),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginState {
    NotInstalled,
    InstalledInactive,
    Active,
}

impl fmt::Display for PluginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInstalled => write!(f, "not installed"),
            Self::InstalledInactive => write!(f, "inactive"),
            Self::Active => write!(f, "active"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeStatus {
    Info,
    Success,
    Error,
}

/// Button offered alongside a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeAction {
    Install,
    Activate,
}

impl NoticeAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Install => "Install Now",
            Self::Activate => "Activate Now",
        }
    }
}

impl From<NoticeAction> for Action {
    fn from(action: NoticeAction) -> Self {
        match action {
            NoticeAction::Install => Action::Install,
            NoticeAction::Activate => Action::Activate,
        }
    }
}

/// Ephemeral status message about one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub status: NoticeStatus,
    pub slug: String,
    pub message: String,
    pub action: Option<NoticeAction>,
    pub source: String,
}

impl Notice {
    pub fn success(dep: &Dependency, message: String) -> Self {
        Self {
            status: NoticeStatus::Success,
            slug: dep.slug.clone(),
            message,
            action: None,
            source: dep.source.clone(),
        }
    }

    pub fn error(dep: &Dependency, message: String) -> Self {
        Self {
            status: NoticeStatus::Error,
            slug: dep.slug.clone(),
            message,
            action: None,
            source: dep.source.clone(),
        }
    }

    pub fn offer(dep: &Dependency, action: NoticeAction, message: String) -> Self {
        Self {
            status: NoticeStatus::Info,
            slug: dep.slug.clone(),
            message,
            action: Some(action),
            source: dep.source.clone(),
        }
    }
}

/// Closed set of actions the router accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Activate,
    Dismiss,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Activate => write!(f, "activate"),
            Self::Dismiss => write!(f, "dismiss"),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "install" => Ok(Self::Install),
            "activate" => Ok(Self::Activate),
            "dismiss" => Ok(Self::Dismiss),
            other => Err(format!("unsupported action '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_dir() {
        assert_eq!(slug_dir("akismet/akismet.php"), "akismet");
        assert_eq!(slug_dir("hello.php"), "hello");
        assert_eq!(slug_dir("bare"), "bare");
    }

    #[test]
    fn test_action_parsing_is_exact() {
        assert_eq!("install".parse::<Action>(), Ok(Action::Install));
        assert_eq!("dismiss".parse::<Action>(), Ok(Action::Dismiss));
        assert!("delete".parse::<Action>().is_err());
        assert!("Install".parse::<Action>().is_err());
        assert!("".parse::<Action>().is_err());
    }

    #[test]
    fn test_host_deserializes_lowercase() {
        let host: Host = serde_json::from_str("\"gitlab\"").expect("parse host");
        assert_eq!(host, Host::Gitlab);
        assert!(serde_json::from_str::<Host>("\"svn\"").is_err());
    }
}
