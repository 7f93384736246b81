//! Catalog persistence for i18n-workflow.
//!
//! This crate connects the [`Registry`](i18n_workflow_registry::Registry) to
//! a stored catalog. [`MissingTranslations`] owns both and implements the
//! flush: export the recorded paths, merge them into the stored catalog,
//! replicate the key structure into other locales, write, and clear.
//!
//! # Modules
//!
//! - [`error`] -- Error types for store operations
//! - [`config`] -- [`StoreConfig`], loadable from TOML
//! - [`traits`] -- The [`CatalogStore`] trait
//! - [`file`] -- [`FileCatalogStore`], a YAML file replaced atomically on save
//! - [`memory`] -- [`InMemoryCatalogStore`] for tests and embedding
//! - [`flush`] -- [`MissingTranslations`] and [`FlushOutcome`]

pub mod config;
pub mod error;
pub mod file;
pub mod flush;
pub mod memory;
pub mod traits;

pub use config::{StoreConfig, DEFAULT_CATALOG_PATH};
pub use error::{Result, StoreError};
pub use file::FileCatalogStore;
pub use flush::{FlushOutcome, MissingTranslations};
pub use memory::InMemoryCatalogStore;
pub use traits::CatalogStore;
