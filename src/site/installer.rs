//! Archive installer
//!
//! Downloads a plugin archive, unpacks it into a staging directory inside the
//! plugins directory and moves the unpacked root into place under the name
//! the plugin slug expects. Hosted archives unpack into generated names such
//! as `acme-widget-1a2b3c`, hence the rename.

mod source_selection;

use crate::error::{Result, WpdiError};
use crate::project_identity;
use crate::traits::ArtifactInstaller;
use crate::ui;
use reqwest::Url;
use reqwest::blocking::Client;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use zip::ZipArchive;

pub use source_selection::select_source;

const STAGING_PREFIX: &str = ".wpdi-staging-";

#[derive(Debug, Clone)]
pub struct ZipInstaller {
    plugins_dir: PathBuf,
    timeout: Duration,
}

impl ZipInstaller {
    pub fn new(plugins_dir: PathBuf, timeout: Duration) -> Self {
        Self {
            plugins_dir,
            timeout,
        }
    }

    fn fetch(&self, download_link: &str) -> Result<Vec<u8>> {
        let url = Url::parse(download_link)
            .map_err(|e| WpdiError::InstallError(format!("Invalid download link: {}", e)))?;

        if url.scheme() == "file" {
            let path = url.to_file_path().map_err(|_| {
                WpdiError::InstallError(format!("Invalid file link: {}", download_link))
            })?;
            return fs::read(&path).map_err(|e| {
                WpdiError::InstallError(format!("Download failed. {}: {}", path.display(), e))
            });
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(project_identity::user_agent())
            .build()
            .map_err(|e| WpdiError::RemoteFetchError(e.to_string()))?;

        let response = client
            .get(url)
            .send()
            .map_err(|e| WpdiError::InstallError(format!("Download failed. {}", e)))?;

        if !response.status().is_success() {
            return Err(WpdiError::InstallError(format!(
                "Download failed. {}",
                response.status()
            )));
        }

        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|e| WpdiError::InstallError(format!("Download failed. {}", e)))
    }
}

impl ArtifactInstaller for ZipInstaller {
    fn install(&self, download_link: &str, target_dir: &str) -> Result<Option<PathBuf>> {
        let archive = self.fetch(download_link)?;
        if archive.is_empty() {
            return Ok(None);
        }

        ui::verbose(&format!(
            "Downloaded {} bytes, unpacking into {}",
            archive.len(),
            target_dir
        ));
        unpack_into(&self.plugins_dir, &archive, target_dir).map(Some)
    }
}

/// Unpack `archive` and move its single root to `plugins_dir/target_dir`.
pub fn unpack_into(plugins_dir: &Path, archive: &[u8], target_dir: &str) -> Result<PathBuf> {
    fs::create_dir_all(plugins_dir).map_err(|e| WpdiError::IoError {
        path: plugins_dir.to_path_buf(),
        source: e,
    })?;

    // Staging lives inside the plugins dir so the final move is a rename.
    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(plugins_dir)
        .map_err(|e| WpdiError::IoError {
            path: plugins_dir.to_path_buf(),
            source: e,
        })?;

    let mut zip = ZipArchive::new(Cursor::new(archive))
        .map_err(|e| WpdiError::InstallError(format!("Incompatible archive. {}", e)))?;
    zip.extract(staging.path())
        .map_err(|e| WpdiError::InstallError(format!("Could not unpack archive. {}", e)))?;

    select_source(staging.path(), plugins_dir, target_dir)
}
