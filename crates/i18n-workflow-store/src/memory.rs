//! In-memory catalog store for testing and ephemeral use.
//!
//! [`InMemoryCatalogStore`] keeps the catalog as YAML text behind a
//! `RwLock`, so loads and saves go through the same text form as a file.

use std::sync::RwLock;

use i18n_workflow_core::{to_yaml, Document};

use crate::error::{Result, StoreError};
use crate::traits::CatalogStore;

/// An in-memory implementation of [`CatalogStore`].
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    contents: RwLock<Option<String>>,
}

impl InMemoryCatalogStore {
    /// Create an empty store, equivalent to an absent catalog file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `text`.
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: RwLock::new(Some(text.into())),
        }
    }

    /// The stored text, if anything has been stored.
    pub fn contents(&self) -> Result<Option<String>> {
        let contents = self.contents.read().map_err(|e| {
            StoreError::LockPoisoned(e.to_string())
        })?;
        Ok(contents.clone())
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn load(&self) -> Result<Document> {
        let contents = self.contents.read().map_err(|e| {
            StoreError::LockPoisoned(e.to_string())
        })?;
        Ok(contents
            .as_deref()
            .map(Document::from_yaml_str_lenient)
            .unwrap_or_default())
    }

    fn save(&self, doc: &Document) -> Result<()> {
        let text = to_yaml(doc)?;
        let mut contents = self.contents.write().map_err(|e| {
            StoreError::LockPoisoned(e.to_string())
        })?;
        *contents = Some(text);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
