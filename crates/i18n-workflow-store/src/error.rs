//! Error types for store operations.

use std::path::PathBuf;

use i18n_workflow_core::CatalogError;
use thiserror::Error;

/// Errors that can occur while loading or saving a catalog.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The catalog file could not be read or written.
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file exists but does not hold a valid catalog.
    #[error("malformed catalog {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },

    /// A document could not be turned into catalog text.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The configuration file is missing, unreadable, or invalid.
    #[error("config error: {0}")]
    Config(String),

    /// A lock guarding the catalog was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
