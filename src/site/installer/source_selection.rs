use crate::error::{Result, WpdiError};
use std::fs;
use std::path::{Path, PathBuf};

/// Metadata folders some archivers add next to the real content.
const IGNORED_ROOTS: &[&str] = &["__MACOSX"];

/// Move the single top-level directory of `unpacked` to
/// `plugins_dir/target_dir`.
///
/// Zero or several top-level entries, or a top-level file, fail the install.
pub fn select_source(unpacked: &Path, plugins_dir: &Path, target_dir: &str) -> Result<PathBuf> {
    let entries = fs::read_dir(unpacked).map_err(|e| WpdiError::IoError {
        path: unpacked.to_path_buf(),
        source: e,
    })?;

    let roots: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            !IGNORED_ROOTS
                .iter()
                .any(|ignored| entry.file_name() == *ignored)
        })
        .map(|entry| entry.path())
        .collect();

    let source = match roots.as_slice() {
        [single] if single.is_dir() => single,
        [_] => {
            return Err(WpdiError::InstallError(
                "Archive root is a file, expected a plugin directory.".into(),
            ));
        }
        _ => {
            return Err(WpdiError::InstallError(format!(
                "Archive must contain exactly one top-level directory, found {}.",
                roots.len()
            )));
        }
    };

    let destination = plugins_dir.join(target_dir);
    if destination.exists() {
        return Err(WpdiError::InstallError(format!(
            "Destination folder already exists. {}",
            destination.display()
        )));
    }

    fs::rename(source, &destination).map_err(|e| {
        WpdiError::InstallError(format!(
            "Could not move {} to {}: {}",
            source.display(),
            destination.display(),
            e
        ))
    })?;

    Ok(destination)
}
