use crate::error::{Result, WpdiError};
use crate::project_identity;
use directories::{ProjectDirs, UserDirs};
use std::path::{Path, PathBuf};

const DEFAULT_PLUGINS_DIR: &str = "wp-content/plugins";

pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let user_dirs = UserDirs::new()
        .ok_or_else(|| WpdiError::Other("Could not determine user home directory".to_string()))?;

    let home = user_dirs.home_dir();

    if path_str == "~" {
        return Ok(home.to_path_buf());
    }

    let stripped = path_str
        .strip_prefix("~/")
        .ok_or_else(|| WpdiError::Other(format!("Invalid path format: {}", path_str)))?;

    Ok(home.join(stripped))
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(
        "org",
        project_identity::STABLE_PROJECT_ID,
        project_identity::STABLE_PROJECT_ID,
    )
    .ok_or_else(|| WpdiError::Other("Could not determine project directories".to_string()))
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

pub fn settings_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(project_identity::SETTINGS_FILE_BASENAME))
}

pub fn state_dir() -> Result<PathBuf> {
    if let Some(dir) = project_identity::env_get("STATE_DIR") {
        return expand_home(Path::new(&dir));
    }
    let dirs = project_dirs()?;
    Ok(dirs
        .state_dir()
        .unwrap_or_else(|| dirs.data_local_dir())
        .to_path_buf())
}

pub fn cache_dir() -> Result<PathBuf> {
    if let Some(dir) = project_identity::env_get("CACHE_DIR") {
        return expand_home(Path::new(&dir));
    }
    Ok(project_dirs()?.cache_dir().to_path_buf())
}

pub fn plugins_dir() -> Result<PathBuf> {
    match project_identity::env_get("PLUGINS_DIR") {
        Some(dir) => expand_home(Path::new(&dir)),
        None => Ok(PathBuf::from(DEFAULT_PLUGINS_DIR)),
    }
}
