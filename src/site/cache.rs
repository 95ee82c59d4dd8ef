use crate::error::{Result, WpdiError};
use crate::traits::CacheStore;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: String,
    pub expires_at: u64,
}

impl CacheEntry {
    pub fn new(data: String, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: now_secs().saturating_add(ttl.as_secs()),
        }
    }

    pub fn is_valid(&self) -> bool {
        now_secs() < self.expires_at
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// One JSON file per key under the cache directory.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| WpdiError::IoError {
                path: self.dir.clone(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Remove every cached entry, returning how many were removed.
    pub fn clear(&self) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| WpdiError::IoError {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut removed = 0;
        for entry in entries {
            let path = entry
                .map_err(|e| WpdiError::IoError {
                    path: self.dir.clone(),
                    source: e,
                })?
                .path();
            if path.extension().and_then(std::ffi::OsStr::to_str) == Some("json")
                && fs::remove_file(&path).is_ok()
            {
                removed += 1;
            }
        }

        Ok(removed)
    }
}

impl CacheStore for FileCache {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        let content = fs::read_to_string(&path).ok()?;
        let entry: CacheEntry = serde_json::from_str(&content).ok()?;

        if entry.is_valid() {
            Some(entry.data)
        } else {
            // Remove expired cache entry
            let _ = fs::remove_file(&path);
            None
        }
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.ensure_dir()?;
        let path = self.entry_path(key);
        let json = serde_json::to_string_pretty(&CacheEntry::new(value.to_string(), ttl))?;

        fs::write(&path, json).map_err(|e| WpdiError::IoError { path, source: e })
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| WpdiError::IoError { path, source: e })?;
        }
        Ok(())
    }
}

/// Process-local cache, for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RefCell<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.borrow_mut();
        match entries.get(key) {
            Some((value, expires)) if Instant::now() < *expires => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Sanitize cache key to be safe for filenames
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
            _ => '_',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    #[test]
    fn test_cache_entry_is_valid() {
        let entry = CacheEntry::new("test data".to_string(), DAY);
        assert!(entry.is_valid());
    }

    #[test]
    fn test_cache_entry_expires() {
        let mut entry = CacheEntry::new("test data".to_string(), DAY);
        // Simulate old entry
        entry.expires_at = now_secs() - 1;
        assert!(!entry.is_valid());
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("test-key"), "test-key");
        assert_eq!(sanitize_key("test/key"), "test_key");
        assert_eq!(sanitize_key("test key"), "test_key");
    }

    #[test]
    fn test_file_cache_roundtrip_and_delete() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cache = FileCache::new(tmp.path().join("cache"));

        assert!(cache.get("k").is_none());
        cache.set("k", "https://example.com/a.zip", DAY).expect("set");
        assert_eq!(cache.get("k").as_deref(), Some("https://example.com/a.zip"));

        cache.delete("k").expect("delete");
        assert!(cache.get("k").is_none());
        cache.delete("k").expect("deleting a missing key is fine");
    }

    #[test]
    fn test_file_cache_drops_expired_entries() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cache = FileCache::new(tmp.path().to_path_buf());
        cache.set("old", "value", Duration::ZERO).expect("set");

        assert!(cache.get("old").is_none());
        assert!(!tmp.path().join("old.json").exists());
    }

    #[test]
    fn test_file_cache_clear() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cache = FileCache::new(tmp.path().to_path_buf());
        cache.set("a", "1", DAY).expect("set");
        cache.set("b", "2", DAY).expect("set");

        assert_eq!(cache.clear().expect("clear"), 2);
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn test_memory_cache_expiry() {
        let cache = MemoryCache::new();
        cache.set("k", "v", DAY).expect("set");
        cache.set("gone", "v", Duration::ZERO).expect("set");

        assert_eq!(cache.get("k").as_deref(), Some("v"));
        assert!(cache.get("gone").is_none());
    }
}
