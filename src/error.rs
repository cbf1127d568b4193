use std::path::PathBuf;

use thiserror::Error;

/// The dataset text could not be obtained. Fatal: the app shows a blocking
/// notice and never enters a degraded mode.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset {} is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },
}

/// Failures of the local key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("store I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
