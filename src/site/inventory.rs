use crate::core::types::slug_dir;
use crate::site::state::SiteStateStore;
use crate::traits::PluginInventory;
use std::path::PathBuf;

/// Installed = the plugin's main file exists under the plugins directory.
/// Active = listed in the site state.
#[derive(Debug, Clone)]
pub struct FilesystemInventory {
    plugins_dir: PathBuf,
    state: SiteStateStore,
}

impl FilesystemInventory {
    pub fn new(plugins_dir: PathBuf, state: SiteStateStore) -> Self {
        Self { plugins_dir, state }
    }

    fn main_file_candidates(&self, slug: &str) -> Vec<PathBuf> {
        let mut candidates = vec![self.plugins_dir.join(slug)];
        if !slug.contains('/') {
            // Single-file plugins may also have been unpacked into their own dir.
            candidates.push(self.plugins_dir.join(slug_dir(slug)).join(slug));
        }
        candidates
    }
}

impl PluginInventory for FilesystemInventory {
    fn is_installed(&self, slug: &str) -> bool {
        self.main_file_candidates(slug)
            .iter()
            .any(|path| path.is_file())
    }

    fn is_active(&self, slug: &str) -> bool {
        self.is_installed(slug) && self.state.load().is_active(slug)
    }
}
