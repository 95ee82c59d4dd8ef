//! Site state: which plugins are active
//!
//! Stored as JSON next to the other tool state. Mutations take an exclusive
//! lock on a sibling lock file so concurrent runs do not lose writes.

use crate::error::{Result, WpdiError};
use crate::project_identity::SITE_STATE_FILE_NAME;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteState {
    #[serde(default)]
    pub active_plugins: BTreeSet<String>,
    #[serde(default)]
    pub network_active_plugins: BTreeSet<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SiteState {
    pub fn is_active(&self, slug: &str) -> bool {
        self.active_plugins.contains(slug) || self.network_active_plugins.contains(slug)
    }
}

#[derive(Debug, Clone)]
pub struct SiteStateStore {
    dir: PathBuf,
}

impl SiteStateStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SITE_STATE_FILE_NAME)
    }

    /// Missing or unreadable state means nothing is active.
    pub fn load(&self) -> SiteState {
        fs::read_to_string(self.path())
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Load, mutate and persist the state under an exclusive lock.
    pub fn update<F>(&self, mutate: F) -> Result<SiteState>
    where
        F: FnOnce(&mut SiteState),
    {
        fs::create_dir_all(&self.dir).map_err(|e| WpdiError::IoError {
            path: self.dir.clone(),
            source: e,
        })?;

        let lock_path = self.dir.join("site-state.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| WpdiError::IoError {
                path: lock_path.clone(),
                source: e,
            })?;
        lock_file.lock_exclusive().map_err(|e| {
            WpdiError::LockError(format!("{}: {}", lock_path.display(), e))
        })?;

        let mut state = self.load();
        mutate(&mut state);
        state.updated_at = Some(Utc::now());

        let path = self.path();
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&state)?;
        fs::write(&tmp_path, json).map_err(|e| WpdiError::IoError {
            path: tmp_path.clone(),
            source: e,
        })?;
        fs::rename(&tmp_path, &path).map_err(|e| WpdiError::IoError {
            path: path.clone(),
            source: e,
        })?;

        let _ = FileExt::unlock(&lock_file);
        Ok(state)
    }
}
