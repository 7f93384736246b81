//! The [`Registry`]: an append-only log of missing-translation paths.
//!
//! Entries accumulate until [`Registry::clear`] (or a successful flush)
//! empties the log. Duplicates are kept in the log and collapsed only when
//! exporting to a [`Document`].

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use i18n_workflow_core::{to_yaml, CatalogResult, Document};
use regex::Regex;
use tracing::debug;

use crate::key::{normalize_keys, KeyPath};
use crate::lookup::{placeholder_text, LookupOptions};

/// Log of failed translation lookups.
///
/// The log sits behind a single mutex, so one registry can be shared by
/// every thread that performs lookups.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Mutex<Vec<KeyPath>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<KeyPath>> {
        // The log is plain data; a panic elsewhere cannot leave it half-written.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a missing translation and return its placeholder text.
    ///
    /// `scopes` are the raw scope names (without the `_scope` suffix). A
    /// lookup with no leaf key is not recorded, but still gets placeholder
    /// text built from its interpolation values.
    pub fn record<S: AsRef<str>>(
        &self,
        locale: &str,
        leaf: Option<&str>,
        scopes: &[S],
        options: &LookupOptions,
    ) -> String {
        match KeyPath::from_lookup(locale, leaf, scopes) {
            Some(path) => {
                debug!(path = %path, "recording missing translation");
                self.log().push(path);
            }
            None => debug!(locale, "ignoring lookup without a key"),
        }
        placeholder_text(leaf.unwrap_or_default(), options)
    }

    /// Record a failed lookup as reported by a translation backend.
    ///
    /// `key` may be dotted and `scope` entries may be dotted too; both are
    /// split on the separator from `options` before recording.
    pub fn record_failure<S: AsRef<str>>(
        &self,
        locale: &str,
        key: &str,
        scope: &[S],
        options: &LookupOptions,
    ) -> String {
        let mut segments = normalize_keys(None, key, scope, options.separator());
        let leaf = segments.pop();
        self.record(locale, leaf.as_deref(), &segments, options)
    }

    /// Returns `true` if any missing translation has been recorded.
    pub fn has_missing(&self) -> bool {
        !self.log().is_empty()
    }

    /// Number of recorded entries, duplicates included.
    pub fn len(&self) -> usize {
        self.log().len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        !self.has_missing()
    }

    /// A copy of the recorded paths in recording order.
    pub fn entries(&self) -> Vec<KeyPath> {
        self.log().clone()
    }

    /// Forget every recorded entry.
    pub fn clear(&self) {
        self.log().clear();
    }

    /// Drop every entry whose dotted path matches `pattern`.
    ///
    /// Returns the number of entries removed.
    pub fn filter(&self, pattern: &Regex) -> usize {
        let mut log = self.log();
        let before = log.len();
        log.retain(|path| !pattern.is_match(&path.dotted()));
        let removed = before - log.len();
        if removed > 0 {
            debug!(pattern = %pattern, removed, "filtered missing translations");
        }
        removed
    }

    /// Take every entry out of the log, leaving it empty.
    ///
    /// Pair with [`restore`](Self::restore) when the taken entries could not
    /// be persisted.
    pub fn drain(&self) -> Vec<KeyPath> {
        std::mem::take(&mut *self.log())
    }

    /// Put previously drained entries back ahead of anything recorded since.
    pub fn restore(&self, mut entries: Vec<KeyPath>) {
        let mut log = self.log();
        entries.append(&mut log);
        *log = entries;
    }

    /// The recorded paths as a catalog of empty leaves.
    ///
    /// With `locale`, only paths for that locale are included.
    pub fn to_document(&self, locale: Option<&str>) -> Document {
        paths_to_document(&self.log(), locale)
    }

    /// All recorded paths as catalog YAML.
    pub fn to_yaml(&self) -> CatalogResult<String> {
        to_yaml(&self.to_document(None))
    }
}

/// Fold paths into one document, skipping duplicates and other locales.
pub fn paths_to_document(paths: &[KeyPath], locale: Option<&str>) -> Document {
    let mut seen = HashSet::new();
    let mut doc = Document::new();
    for path in paths {
        if locale.is_some_and(|l| path.locale() != l) {
            continue;
        }
        if !seen.insert(path) {
            continue;
        }
        doc.absorb(&Document::from_path(path.segments()));
    }
    doc
}
