//! Value-preserving merge and cross-locale replication.
//!
//! Both operations are pure: they read their inputs and return a new
//! [`Document`]. Neither ever turns a non-empty leaf into an empty one.

use tracing::debug;

use crate::document::{Document, DocumentNode};

/// Deep union of `new` and `existing`, where `existing` wins every conflict.
///
/// - Key in both sides as branches: recurse.
/// - Key in both sides otherwise (two leaves, or a leaf and a branch): keep
///   `existing`'s node.
/// - Key on one side only: take it as-is.
pub fn merge(new: &Document, existing: &Document) -> Document {
    let mut merged = existing.clone();
    merge_into(&mut merged, new);
    merged
}

/// Add everything from `incoming` that `target` lacks, keeping `target`'s
/// nodes on conflict.
fn merge_into(target: &mut Document, incoming: &Document) {
    for (key, node) in incoming {
        if let Some(existing) = target.get_mut(key) {
            if let (DocumentNode::Branch(existing), DocumentNode::Branch(added)) = (existing, node) {
                merge_into(existing, added);
            }
            continue;
        }
        target.insert(key.clone(), node.clone());
    }
}

impl Document {
    /// In-place form of [`merge`] with `self` as the existing side: adds what
    /// `incoming` has that `self` lacks and keeps every node `self` already has.
    pub fn absorb(&mut self, incoming: &Document) {
        merge_into(self, incoming);
    }
}

/// Like [`merge_into`], except nodes copied over from `source` are blanked.
fn merge_structure_into(target: &mut Document, source: &Document) {
    for (key, node) in source {
        if let Some(existing) = target.get_mut(key) {
            if let (DocumentNode::Branch(existing), DocumentNode::Branch(added)) = (existing, node) {
                merge_structure_into(existing, added);
            }
            continue;
        }
        target.insert(key.clone(), node.blanked());
    }
}

/// Copy the key skeleton of `base_locale` into each of `target_locales`.
///
/// An existing target locale keeps all of its leaves and only gains the keys
/// it was missing, each as `""`. A target locale that does not exist yet is
/// created as a blanked copy of the base locale. Targets equal to the base
/// locale are skipped, and the call is a no-op when the base locale is absent
/// or is not a branch.
pub fn replicate<S: AsRef<str>>(doc: &Document, base_locale: &str, target_locales: &[S]) -> Document {
    let mut result = doc.clone();
    let Some(source) = doc.get(base_locale).and_then(DocumentNode::as_branch) else {
        debug!(locale = base_locale, "base locale missing from catalog, nothing to replicate");
        return result;
    };

    for target in target_locales {
        let target = target.as_ref();
        if target == base_locale {
            continue;
        }
        match result.get_mut(target) {
            Some(DocumentNode::Branch(existing)) => {
                debug!(from = base_locale, to = target, "merging key structure into locale");
                merge_structure_into(existing, source);
                continue;
            }
            Some(DocumentNode::Leaf(_)) => {
                debug!(locale = target, "target locale is a plain value, leaving it untouched");
                continue;
            }
            None => {}
        }
        debug!(from = base_locale, to = target, "creating locale from blanked structure");
        result.insert(target, source.blanked());
    }
    result
}
