//! Translation catalog documents for i18n-workflow.
//!
//! A catalog is a tree of string keys whose leaves are translation strings.
//! Root keys are locale identifiers. This crate owns the pure half of the
//! missing-translation pipeline: combining catalogs without losing known
//! translations, copying a locale's key skeleton into other locales, and
//! reading/writing the YAML form of a catalog.
//!
//! # Key Types
//!
//! - [`Document`] / [`DocumentNode`] -- Nested catalog (leaf string or branch)
//! - [`merge`] -- Value-preserving deep union of two documents
//! - [`replicate`] -- Copy a base locale's structure into target locales with empty leaves
//! - [`to_yaml`] / [`Document::from_yaml_str`] -- Deterministic catalog text form

pub mod document;
pub mod error;
pub mod merge;
pub mod yaml;

pub use document::{Document, DocumentNode};
pub use error::{CatalogError, CatalogResult};
pub use merge::{merge, replicate};
pub use yaml::to_yaml;
