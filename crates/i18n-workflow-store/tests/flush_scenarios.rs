//! End-to-end flushes against a catalog file on disk.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use i18n_workflow_core::Document;
use i18n_workflow_registry::LookupOptions;
use i18n_workflow_store::{
    CatalogStore, FileCatalogStore, FlushOutcome, MissingTranslations, StoreConfig, StoreError,
};
use regex::Regex;

fn file_session(path: &Path, locale: &str) -> MissingTranslations<FileCatalogStore> {
    let config = StoreConfig {
        catalog_path: path.to_path_buf(),
        default_locale: locale.to_string(),
        ..StoreConfig::default()
    };
    MissingTranslations::new(FileCatalogStore::new(path), config)
}

fn leaf<'a>(doc: &'a Document, path: &[&str]) -> Option<&'a str> {
    doc.get_path(path).and_then(|n| n.as_leaf())
}

fn record(session: &MissingTranslations<impl CatalogStore>, key: &str) {
    session.record_failure("nl", key, &[] as &[&str], &LookupOptions::new());
}

#[test]
fn merges_into_existing_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config").join("missing_translations.yml");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        "---\nnl:\n  missing_scope:\n    key_scope:\n      translation: ''\n      foobar: ''\n    foobar: ''\n  translation: ''\n",
    )
    .unwrap();

    let session = file_session(&path, "nl");
    record(&session, "missing.key.new_translation");
    session.store_missing_translations(None, &[] as &[&str]).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "---\nnl:\n  missing_scope:\n    foobar: ''\n    key_scope:\n      foobar: ''\n      new_translation: ''\n      translation: ''\n  translation: ''\n"
    );
}

#[test]
fn replicates_into_new_locale() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yml");
    fs::write(&path, "nl:\n  a: X\n").unwrap();

    let session = file_session(&path, "nl");
    record(&session, "b");
    session.store_missing_translations(None, &["en"]).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "---\nen:\n  a: ''\n  b: ''\nnl:\n  a: X\n  b: ''\n"
    );
}

#[test]
fn keeps_existing_values_in_replicated_locale() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yml");
    fs::write(&path, "nl:\n  a: X\nen:\n  a: Y\n").unwrap();

    let session = file_session(&path, "nl");
    record(&session, "b");
    session.store_missing_translations(None, &["en"]).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "---\nen:\n  a: Y\n  b: ''\nnl:\n  a: X\n  b: ''\n"
    );
}

#[test]
fn deeply_nested_replication_preserves_translations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yml");
    fs::write(
        &path,
        "nl:\n  translation_key_one: A Dutch translation\n  translation_scope_two:\n    translation_key_two: Dutch translation 2\n    translation_scope_three:\n      translation_key_three: Dutch translation 3\n\
         en:\n  translation_key_one: An English translation\n  translation_scope_two:\n    translation_key_two: English translation 2\n    translation_scope_three:\n      translation_key_three: English translation 3\n",
    )
    .unwrap();

    let session = file_session(&path, "nl");
    let options = LookupOptions::new();
    session.registry().record("nl", Some("foo"), &["translation_scope_two"], &options);
    session.registry().record("nl", Some("bar"), &["translation_scope_two", "translation_scope_three"], &options);

    // Scope names here already end in `_scope`, so they gain a second suffix.
    session.store_missing_translations(None, &["en"]).unwrap();
    let catalog = Document::from_yaml_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(leaf(&catalog, &["en", "translation_key_one"]), Some("An English translation"));
    assert_eq!(
        leaf(&catalog, &["en", "translation_scope_two", "translation_scope_three", "translation_key_three"]),
        Some("English translation 3")
    );
    assert_eq!(leaf(&catalog, &["en", "translation_scope_two_scope", "foo"]), Some(""));
    assert_eq!(
        leaf(&catalog, &["en", "translation_scope_two_scope", "translation_scope_three_scope", "bar"]),
        Some("")
    );
    assert_eq!(leaf(&catalog, &["nl", "translation_scope_two_scope", "foo"]), Some(""));
}

#[test]
fn malformed_catalog_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yml");
    fs::write(&path, "- this\n- is a list\n").unwrap();

    let session = file_session(&path, "nl");
    record(&session, "foo");
    session.store_missing_translations(None, &[] as &[&str]).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "---\nnl:\n  foo: ''\n");
}

#[test]
fn repeated_flushes_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yml");
    let session = file_session(&path, "nl");

    record(&session, "zeta");
    record(&session, "alpha.beta");
    session.store_missing_translations(None, &["en"]).unwrap();
    let first = fs::read_to_string(&path).unwrap();

    record(&session, "zeta");
    record(&session, "alpha.beta");
    session.store_missing_translations(None, &["en"]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn filtered_keys_are_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yml");
    let session = file_session(&path, "nl");

    record(&session, "debug.internal");
    record(&session, "title");
    session.registry().filter(&Regex::new(r"^nl\.debug_scope\.").unwrap());
    session.store_missing_translations(None, &[] as &[&str]).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "---\nnl:\n  title: ''\n");
}

#[test]
fn long_keys_survive_repeated_flushes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yml");
    fs::write(&path, "nl:\n  known: Bekend\n").unwrap();

    let session = file_session(&path, "nl");
    let long_key = "k".repeat(1100);
    record(&session, &long_key);
    session.store_missing_translations(None, &[] as &[&str]).unwrap();

    let written = Document::from_yaml_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(leaf(&written, &["nl", long_key.as_str()]), Some(""));

    record(&session, "other");
    session.store_missing_translations(None, &[] as &[&str]).unwrap();
    let catalog = Document::from_yaml_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(leaf(&catalog, &["nl", "known"]), Some("Bekend"));
    assert_eq!(leaf(&catalog, &["nl", long_key.as_str()]), Some(""));
    assert_eq!(leaf(&catalog, &["nl", "other"]), Some(""));
}

#[test]
fn line_separator_values_survive_flush() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yml");
    fs::write(&path, "nl:\n  a: \"line\\u2028two\"\n").unwrap();

    let session = file_session(&path, "nl");
    record(&session, "b");
    session.store_missing_translations(None, &[] as &[&str]).unwrap();

    let catalog = Document::from_yaml_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(leaf(&catalog, &["nl", "a"]), Some("line\u{2028}two"));
    assert_eq!(leaf(&catalog, &["nl", "b"]), Some(""));
}

#[test]
fn non_utf8_catalog_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yml");
    fs::write(&path, b"nl:\n  a: \xff\xfe\n").unwrap();

    let session = file_session(&path, "nl");
    record(&session, "foo");
    session.store_missing_translations(None, &[] as &[&str]).unwrap();

    assert!(!session.registry().has_missing());
    assert_eq!(fs::read_to_string(&path).unwrap(), "---\nnl:\n  foo: ''\n");
}

/// A store whose writes fail until told otherwise.
#[derive(Default)]
struct FlakyStore {
    broken: AtomicBool,
    saved: std::sync::Mutex<Option<Document>>,
}

impl CatalogStore for FlakyStore {
    fn load(&self) -> i18n_workflow_store::Result<Document> {
        Ok(self.saved.lock().unwrap().clone().unwrap_or_default())
    }

    fn save(&self, doc: &Document) -> i18n_workflow_store::Result<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                path: "flaky.yml".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }
        *self.saved.lock().unwrap() = Some(doc.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "flaky".to_string()
    }
}

#[test]
fn failed_write_keeps_entries_for_retry() {
    let store = FlakyStore::default();
    store.broken.store(true, Ordering::SeqCst);
    let config = StoreConfig {
        default_locale: "nl".to_string(),
        ..StoreConfig::default()
    };
    let session = MissingTranslations::new(store, config);
    record(&session, "first");

    let err = session.store_missing_translations(None, &[] as &[&str]).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert_eq!(session.registry().len(), 1);

    record(&session, "second");
    session.store().broken.store(false, Ordering::SeqCst);
    let outcome = session.store_missing_translations(None, &[] as &[&str]).unwrap();

    assert!(matches!(outcome, FlushOutcome::Written { new_keys: 2, .. }));
    assert!(!session.registry().has_missing());
    let saved = session.store().saved.lock().unwrap().clone().unwrap();
    assert_eq!(leaf(&saved, &["nl", "first"]), Some(""));
    assert_eq!(leaf(&saved, &["nl", "second"]), Some(""));
}
