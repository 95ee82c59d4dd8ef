use crate::error::{Result, WpdiError};
use crate::project_identity::DISMISSALS_FILE_NAME;
use crate::traits::DismissalTracker;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Dismissals persisted as `{ key: expires_at }`.
#[derive(Debug, Clone)]
pub struct FileDismissalTracker {
    dir: PathBuf,
}

impl FileDismissalTracker {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(DISMISSALS_FILE_NAME)
    }

    fn load(&self) -> BTreeMap<String, DateTime<Utc>> {
        fs::read_to_string(self.path())
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn is_active_at(&self, dismiss_key: &str, now: DateTime<Utc>) -> bool {
        match self.load().get(dismiss_key) {
            Some(expires_at) => *expires_at <= now,
            None => true,
        }
    }
}

impl DismissalTracker for FileDismissalTracker {
    fn is_notice_active(&self, dismiss_key: &str) -> bool {
        self.is_active_at(dismiss_key, Utc::now())
    }

    fn dismiss(&self, dismiss_key: &str, days: u32) -> Result<()> {
        let now = Utc::now();
        let mut dismissals = self.load();
        // Forget expired dismissals while we are here.
        dismissals.retain(|_, expires_at| *expires_at > now);
        dismissals.insert(
            dismiss_key.to_string(),
            now + Duration::days(i64::from(days)),
        );

        fs::create_dir_all(&self.dir).map_err(|e| WpdiError::IoError {
            path: self.dir.clone(),
            source: e,
        })?;
        let path = self.path();
        let json = serde_json::to_string_pretty(&dismissals)?;
        fs::write(&path, json).map_err(|e| WpdiError::IoError { path, source: e })
    }
}
