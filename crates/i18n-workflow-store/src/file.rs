//! File-backed catalog store.
//!
//! [`FileCatalogStore`] keeps the catalog as YAML at a fixed path. Saves go
//! to a temporary file in the same directory that is then renamed over the
//! target, so readers see either the old catalog or the new one.
//!
//! [`CatalogStore::load`] never fails on bad contents: a file that is not
//! YAML, not UTF-8, or not a mapping loads as an empty catalog so the flush
//! can replace it. [`FileCatalogStore::load_strict`] reports those files
//! instead, for callers that rewrite a catalog a person may have edited.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use i18n_workflow_core::yaml::is_blank;
use i18n_workflow_core::{to_yaml, Document};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::traits::CatalogStore;

/// A catalog stored as a YAML file.
#[derive(Clone, Debug)]
pub struct FileCatalogStore {
    path: PathBuf,
}

impl FileCatalogStore {
    /// Use the catalog at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog, failing on contents that are not a valid catalog.
    ///
    /// An absent or blank file is an empty catalog.
    pub fn load_strict(&self) -> Result<Document> {
        let Some(bytes) = self.read()? else {
            return Ok(Document::new());
        };
        if is_blank(&bytes) {
            return Ok(Document::new());
        }
        Document::from_yaml_slice(&bytes).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "catalog file absent, starting empty");
                Ok(None)
            }
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl CatalogStore for FileCatalogStore {
    fn load(&self) -> Result<Document> {
        Ok(self
            .read()?
            .map(|bytes| Document::from_yaml_slice_lenient(&bytes))
            .unwrap_or_default())
    }

    fn save(&self, doc: &Document) -> Result<()> {
        let text = to_yaml(doc)?;
        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        tmp.write_all(text.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), "catalog written");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
