use crate::error::{Result, WpdiError};
use crate::site::inventory::FilesystemInventory;
use crate::site::state::SiteStateStore;
use crate::traits::{PluginActivator, PluginInventory};
use std::path::PathBuf;

/// Records activation in the site state file. Only installed plugins can be
/// activated.
#[derive(Debug, Clone)]
pub struct SiteActivator {
    inventory: FilesystemInventory,
    state: SiteStateStore,
}

impl SiteActivator {
    pub fn new(plugins_dir: PathBuf, state: SiteStateStore) -> Self {
        Self {
            inventory: FilesystemInventory::new(plugins_dir, state.clone()),
            state,
        }
    }
}

impl PluginActivator for SiteActivator {
    fn activate(&self, slug: &str, network_wide: bool) -> Result<()> {
        if !self.inventory.is_installed(slug) {
            return Err(WpdiError::ActivationError(
                "Plugin file does not exist.".to_string(),
            ));
        }

        self.state
            .update(|state| {
                if network_wide {
                    state.network_active_plugins.insert(slug.to_string());
                } else {
                    state.active_plugins.insert(slug.to_string());
                }
            })
            .map(|_| ())
            .map_err(|e| WpdiError::ActivationError(format!("Could not activate {}: {}", slug, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn install(plugins: &std::path::Path, slug: &str) {
        let path = plugins.join(slug);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, "<?php").expect("write");
    }

    #[test]
    fn test_activate_site_and_network() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let plugins = tmp.path().join("plugins");
        install(&plugins, "a/a.php");
        install(&plugins, "b/b.php");
        let store = SiteStateStore::new(tmp.path().join("state"));
        let activator = SiteActivator::new(plugins, store.clone());

        activator.activate("a/a.php", false).expect("site activate");
        activator.activate("b/b.php", true).expect("network activate");

        let state = store.load();
        assert!(state.active_plugins.contains("a/a.php"));
        assert!(!state.network_active_plugins.contains("a/a.php"));
        assert!(state.network_active_plugins.contains("b/b.php"));
    }

    #[test]
    fn test_activate_missing_plugin_fails_without_writing_state() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let plugins = tmp.path().join("plugins");
        // Directory present but the main file is not.
        install(&plugins, "ghost/other.php");
        let store = SiteStateStore::new(tmp.path().join("state"));
        let activator = SiteActivator::new(plugins, store.clone());

        let err = activator
            .activate("ghost/ghost.php", false)
            .expect_err("missing main file");
        assert_eq!(err.to_string(), "Plugin file does not exist.");

        let state = store.load();
        assert!(!state.is_active("ghost/ghost.php"));
    }
}
