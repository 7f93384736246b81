//! Flushing recorded missing translations into a stored catalog.
//!
//! A flush runs `export -> merge -> replicate -> save -> clear` under a
//! single-writer lock. The registry is emptied only once the save has
//! succeeded; on any failure the recorded entries are put back so the next
//! flush retries them.

use std::sync::Mutex;

use i18n_workflow_core::{merge, replicate};
use i18n_workflow_registry::{paths_to_document, KeyPath, LookupOptions, Registry};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::traits::CatalogStore;

/// What a flush did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing was recorded, so the catalog was not touched.
    Skipped,
    /// The catalog was rewritten.
    Written {
        /// Locale whose missing keys were exported.
        locale: String,
        /// Distinct missing keys exported for that locale.
        new_keys: usize,
        /// Locales that received the key structure.
        replicated_to: Vec<String>,
    },
}

/// A [`Registry`] paired with the catalog store it flushes into.
pub struct MissingTranslations<S: CatalogStore> {
    registry: Registry,
    store: S,
    config: StoreConfig,
    write_lock: Mutex<()>,
}

impl<S: CatalogStore> MissingTranslations<S> {
    /// Start a session with an empty registry.
    pub fn new(store: S, config: StoreConfig) -> Self {
        Self {
            registry: Registry::new(),
            store,
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// The registry collecting missing translations.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The backing catalog store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Record a failed lookup and return its placeholder text.
    ///
    /// Uses the configured separator unless `options` names one.
    pub fn record_failure<T: AsRef<str>>(
        &self,
        locale: &str,
        key: &str,
        scope: &[T],
        options: &LookupOptions,
    ) -> String {
        if options.get("separator").is_some() {
            return self.registry.record_failure(locale, key, scope, options);
        }
        let options = options.clone().with("separator", self.config.separator.as_str());
        self.registry.record_failure(locale, key, scope, &options)
    }

    /// Flush using the configured default locale and replication targets.
    pub fn flush(&self) -> Result<FlushOutcome> {
        self.store_missing_translations(None, &self.config.duplicate_to_locales)
    }

    /// Merge the recorded missing translations for `locale` into the stored
    /// catalog and copy the resulting key structure into
    /// `duplicate_to_locales`.
    ///
    /// Does nothing when no missing translation has been recorded. `locale`
    /// defaults to the configured default locale.
    pub fn store_missing_translations<T: AsRef<str>>(
        &self,
        locale: Option<&str>,
        duplicate_to_locales: &[T],
    ) -> Result<FlushOutcome> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;

        if !self.registry.has_missing() {
            debug!("no missing translations recorded, skipping flush");
            return Ok(FlushOutcome::Skipped);
        }

        let locale = locale.unwrap_or(&self.config.default_locale);
        let pending = self.registry.drain();
        match self.write(&pending, locale, duplicate_to_locales) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!(error = %e, entries = pending.len(), "flush failed, keeping missing translations");
                self.registry.restore(pending);
                Err(e)
            }
        }
    }

    fn write<T: AsRef<str>>(
        &self,
        pending: &[KeyPath],
        locale: &str,
        duplicate_to_locales: &[T],
    ) -> Result<FlushOutcome> {
        let existing = self.store.load()?;
        let missing = paths_to_document(pending, Some(locale));
        let new_keys = missing.leaf_count();

        let merged = merge(&missing, &existing);
        let catalog = replicate(&merged, locale, duplicate_to_locales);
        self.store.save(&catalog)?;

        let replicated_to: Vec<String> = duplicate_to_locales
            .iter()
            .map(|l| l.as_ref().to_string())
            .filter(|l| l != locale)
            .collect();
        info!(
            catalog = %self.store.describe(),
            locale,
            new_keys,
            replicated_to = ?replicated_to,
            "stored missing translations"
        );
        Ok(FlushOutcome::Written {
            locale: locale.to_string(),
            new_keys,
            replicated_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCatalogStore;

    fn session(contents: Option<&str>) -> MissingTranslations<InMemoryCatalogStore> {
        let store = match contents {
            Some(text) => InMemoryCatalogStore::with_contents(text),
            None => InMemoryCatalogStore::new(),
        };
        let config = StoreConfig {
            default_locale: "nl".to_string(),
            ..StoreConfig::default()
        };
        MissingTranslations::new(store, config)
    }

    const NONE: &[&str] = &[];

    #[test]
    fn empty_registry_does_not_touch_store() {
        let session = session(None);
        assert_eq!(session.store_missing_translations(None, NONE).unwrap(), FlushOutcome::Skipped);
        assert_eq!(session.store().contents().unwrap(), None);
    }

    #[test]
    fn flush_writes_and_clears() {
        let session = session(None);
        session.record_failure("nl", "missing.key.new_translation", NONE, &LookupOptions::new());

        let outcome = session.store_missing_translations(None, NONE).unwrap();
        assert_eq!(
            outcome,
            FlushOutcome::Written {
                locale: "nl".to_string(),
                new_keys: 1,
                replicated_to: vec![],
            }
        );
        assert!(!session.registry().has_missing());
        assert_eq!(
            session.store().contents().unwrap().as_deref(),
            Some("---\nnl:\n  missing_scope:\n    key_scope:\n      new_translation: ''\n")
        );
    }

    #[test]
    fn flush_only_exports_requested_locale() {
        let session = session(None);
        session.record_failure("nl", "a", NONE, &LookupOptions::new());
        session.record_failure("de", "b", NONE, &LookupOptions::new());

        session.store_missing_translations(Some("nl"), NONE).unwrap();
        let contents = session.store().contents().unwrap().unwrap();
        assert_eq!(contents, "---\nnl:\n  a: ''\n");
        assert!(!session.registry().has_missing());
    }

    #[test]
    fn configured_separator_applies_to_recording() {
        let store = InMemoryCatalogStore::new();
        let config = StoreConfig {
            separator: "/".to_string(),
            ..StoreConfig::default()
        };
        let session = MissingTranslations::new(store, config);
        session.record_failure("en", "admin/title", NONE, &LookupOptions::new());
        assert_eq!(session.registry().entries()[0].dotted(), "en.admin_scope.title");
    }

    #[test]
    fn flush_uses_configured_targets() {
        let store = InMemoryCatalogStore::new();
        let config = StoreConfig {
            default_locale: "nl".to_string(),
            duplicate_to_locales: vec!["en".to_string(), "nl".to_string()],
            ..StoreConfig::default()
        };
        let session = MissingTranslations::new(store, config);
        session.record_failure("nl", "title", NONE, &LookupOptions::new());

        let outcome = session.flush().unwrap();
        assert!(matches!(
            outcome,
            FlushOutcome::Written { ref replicated_to, .. } if replicated_to == &vec!["en".to_string()]
        ));
        assert_eq!(
            session.store().contents().unwrap().as_deref(),
            Some("---\nen:\n  title: ''\nnl:\n  title: ''\n")
        );
    }
}
