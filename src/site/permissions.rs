use crate::traits::PermissionCheck;
use std::fs;
use std::path::PathBuf;

/// Plugins may be managed when settings allow it and the plugins directory
/// exists and is writable.
#[derive(Debug, Clone)]
pub struct SitePermissions {
    plugins_dir: PathBuf,
    allowed: bool,
}

impl SitePermissions {
    pub fn new(plugins_dir: PathBuf, allowed: bool) -> Self {
        Self {
            plugins_dir,
            allowed,
        }
    }
}

impl PermissionCheck for SitePermissions {
    fn can_manage_plugins(&self) -> bool {
        self.allowed
            && fs::metadata(&self.plugins_dir)
                .map(|meta| meta.is_dir() && !meta.permissions().readonly())
                .unwrap_or(false)
    }
}
