//! Error types for reading and writing catalogs.

/// Errors that can occur while reading or writing a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The text is not valid YAML.
    #[error("invalid catalog yaml: {0}")]
    InvalidYaml(String),

    /// The text parsed, but its root is not a mapping of locales.
    #[error("catalog root is not a mapping (found {found})")]
    NotAMapping { found: &'static str },

    /// The document could not be written as YAML.
    #[error("could not write catalog yaml: {0}")]
    Emit(String),
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = Result<T, CatalogError>;
