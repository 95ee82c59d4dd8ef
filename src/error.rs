use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WpdiError {
    /// Manifest or settings file unreadable or malformed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A download link could not be synthesized for a dependency
    #[error("Unable to resolve download link: {0}")]
    ResolutionError(String),

    /// Artifact download, unpack or rename failed
    #[error("{0}")]
    InstallError(String),

    /// Activation call failed
    #[error("{0}")]
    ActivationError(String),

    /// Acting principal lacks the rights to manage plugins
    #[error("Permission denied: {0}")]
    PermissionError(String),

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("KDL parse error: {0}")]
    KdlError(#[from] kdl::KdlError),

    /// Remote resource fetch error (HTTP, network, etc.)
    #[error("Failed to fetch remote resource: {0}")]
    RemoteFetchError(String),

    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Lock acquisition failed
    #[error("Lock acquisition failed: {0}")]
    LockError(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, WpdiError>;
