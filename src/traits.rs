//! Core traits for dependency injection and testability
//!
//! The lifecycle controller never touches the filesystem, the network or the
//! hosting platform directly. Every side effect goes through one of these
//! collaborators, so that we can:
//! - Mock the hosting site in unit tests
//! - Swap the filesystem-backed site for another host integration
//! - Avoid global mutable state (one `AppContext` per run)

use crate::config::settings::Settings;
use crate::core::filters::Filters;
use crate::error::Result;
use crate::site;
use std::path::PathBuf;
use std::time::Duration;

/// Installed-plugin inventory
pub trait PluginInventory {
    /// Is the plugin present in the plugins directory?
    fn is_installed(&self, slug: &str) -> bool;

    /// Is the plugin active on this site or network-wide?
    fn is_active(&self, slug: &str) -> bool;
}

/// Fetches and unpacks plugin artifacts
pub trait ArtifactInstaller {
    /// Download `download_link`, unpack it and move the single unpacked root
    /// into the plugins directory as `target_dir`.
    ///
    /// `Ok(None)` means the installer produced nothing usable.
    fn install(&self, download_link: &str, target_dir: &str) -> Result<Option<PathBuf>>;
}

/// Activates installed plugins
pub trait PluginActivator {
    fn activate(&self, slug: &str, network_wide: bool) -> Result<()>;
}

/// Canonical plugin directory lookup, used for the `wordpress` host only
pub trait DirectoryLookup {
    /// Current download link for a plugin directory slug. Never fails;
    /// any error is reported as `None`.
    fn fetch_latest_download_link(&self, plugin_slug: &str) -> Option<String>;
}

/// Key-value store with per-entry expiry
pub trait CacheStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    fn delete(&self, key: &str) -> Result<()>;
}

/// Whether the acting user may install and activate plugins
pub trait PermissionCheck {
    fn can_manage_plugins(&self) -> bool;
}

/// Tracks notice dismissals
pub trait DismissalTracker {
    /// False while a dismissal for `dismiss_key` is still in force.
    fn is_notice_active(&self, dismiss_key: &str) -> bool;

    /// Suppress `dismiss_key` for `days` days.
    fn dismiss(&self, dismiss_key: &str, days: u32) -> Result<()>;
}

/// Application context holding all collaborators
///
/// Constructed once per run and passed by reference to the lifecycle
/// controller and the presentation layer.
pub struct AppContext {
    pub inventory: Box<dyn PluginInventory>,
    pub installer: Box<dyn ArtifactInstaller>,
    pub activator: Box<dyn PluginActivator>,
    pub lookup: Box<dyn DirectoryLookup>,
    pub cache: Box<dyn CacheStore>,
    pub permissions: Box<dyn PermissionCheck>,
    pub dismissals: Box<dyn DismissalTracker>,
    pub filters: Filters,
    /// Activate network-wide instead of per site
    pub network_admin: bool,
}

impl AppContext {
    /// Create a context backed by a plugins directory on disk
    pub fn for_site(settings: &Settings) -> Result<Self> {
        let site_state = site::state::SiteStateStore::new(settings.state_dir.clone());

        Ok(Self {
            inventory: Box::new(site::inventory::FilesystemInventory::new(
                settings.plugins_dir.clone(),
                site_state.clone(),
            )),
            installer: Box::new(site::installer::ZipInstaller::new(
                settings.plugins_dir.clone(),
                Duration::from_secs(settings.download_timeout_secs),
            )),
            activator: Box::new(site::activator::SiteActivator::new(
                settings.plugins_dir.clone(),
                site_state,
            )),
            lookup: Box::new(site::lookup::WordPressOrgLookup::new(Duration::from_secs(
                settings.lookup_timeout_secs,
            ))),
            cache: Box::new(site::cache::FileCache::new(settings.cache_dir.clone())),
            permissions: Box::new(site::permissions::SitePermissions::new(
                settings.plugins_dir.clone(),
                settings.can_manage_plugins,
            )),
            dismissals: Box::new(site::dismissal::FileDismissalTracker::new(
                settings.state_dir.clone(),
            )),
            filters: Filters::from_settings(settings),
            network_admin: settings.network_admin,
        })
    }
}
