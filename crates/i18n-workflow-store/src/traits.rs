//! The [`CatalogStore`] trait defining where a catalog lives.

use i18n_workflow_core::Document;

use crate::error::Result;

/// Storage backend for a single catalog document.
///
/// Implementations must be thread-safe (`Send + Sync`). A store that holds
/// nothing yet, or holds something that is not a catalog, loads as an empty
/// document rather than failing.
pub trait CatalogStore: Send + Sync {
    /// Read the current catalog.
    fn load(&self) -> Result<Document>;

    /// Replace the stored catalog with `doc`.
    fn save(&self, doc: &Document) -> Result<()>;

    /// Human-readable location of the catalog, used in logs.
    fn describe(&self) -> String;
}
