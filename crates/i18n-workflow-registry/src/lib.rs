//! Missing-translation registry for i18n-workflow.
//!
//! A lookup collaborator reports every translation it fails to resolve. The
//! [`Registry`] normalizes each report into a [`KeyPath`], hands back a
//! readable placeholder string, and later exports the accumulated paths as a
//! catalog [`Document`](i18n_workflow_core::Document) of empty leaves.
//!
//! # Modules
//!
//! - [`key`] -- Key normalization and the [`KeyPath`] type
//! - [`lookup`] -- Lookup options, placeholder text, and scope rewriting helpers
//! - [`registry`] -- The [`Registry`] log itself

pub mod key;
pub mod lookup;
pub mod registry;

pub use key::{normalize_keys, KeyPath, DEFAULT_SEPARATOR, SCOPE_SUFFIX};
pub use lookup::{
    always_cascade, explicit_scope_key, placeholder_text, LookupOptions, ScopedLookup,
    RESERVED_OPTION_KEYS,
};
pub use registry::{paths_to_document, Registry};
