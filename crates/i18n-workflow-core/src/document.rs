//! The catalog tree: [`Document`] and [`DocumentNode`].
//!
//! Entries live in a `BTreeMap`, so iteration order is always the sorted
//! order of the keys. Serialization relies on this for byte-stable output.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::Serialize;

/// A single value in a catalog: either a translation string or a nested scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DocumentNode {
    /// A translation. The empty string marks an unfilled placeholder.
    Leaf(String),
    /// A nested mapping of keys.
    Branch(Document),
}

impl DocumentNode {
    /// An empty placeholder leaf.
    pub fn placeholder() -> Self {
        Self::Leaf(String::new())
    }

    /// Returns `true` if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns the nested document if this node is a branch.
    pub fn as_branch(&self) -> Option<&Document> {
        match self {
            Self::Branch(doc) => Some(doc),
            Self::Leaf(_) => None,
        }
    }

    /// Returns the leaf value if this node is a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Branch(_) => None,
        }
    }

    /// A copy of this node with every leaf replaced by the empty string.
    pub fn blanked(&self) -> Self {
        match self {
            Self::Leaf(_) => Self::placeholder(),
            Self::Branch(doc) => Self::Branch(doc.blanked()),
        }
    }
}

impl From<&str> for DocumentNode {
    fn from(value: &str) -> Self {
        Self::Leaf(value.to_string())
    }
}

impl From<String> for DocumentNode {
    fn from(value: String) -> Self {
        Self::Leaf(value)
    }
}

impl From<Document> for DocumentNode {
    fn from(doc: Document) -> Self {
        Self::Branch(doc)
    }
}

/// A nested catalog mapping string keys to [`DocumentNode`]s.
///
/// At the root of a persisted catalog the keys are locale identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    entries: BTreeMap<String, DocumentNode>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a single-branch document that ends in an empty placeholder.
    ///
    /// `["nl", "missing_scope", "key"]` becomes `{nl: {missing_scope: {key: ""}}}`.
    /// An empty path yields an empty document.
    pub fn from_path<S: AsRef<str>>(path: &[S]) -> Self {
        let Some((last, parents)) = path.split_last() else {
            return Self::new();
        };

        let mut node = DocumentNode::placeholder();
        let mut doc = Self::new();
        doc.insert(last.as_ref(), node);
        for segment in parents.iter().rev() {
            node = DocumentNode::Branch(doc);
            doc = Self::new();
            doc.insert(segment.as_ref(), node);
        }
        doc
    }

    /// Returns `true` if the document has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&DocumentNode> {
        self.entries.get(key)
    }

    /// Mutable access to a top-level key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut DocumentNode> {
        self.entries.get_mut(key)
    }

    /// Returns `true` if the top-level key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Follow a path of keys through nested branches.
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&DocumentNode> {
        let (first, rest) = path.split_first()?;
        let node = self.entries.get(first.as_ref())?;
        if rest.is_empty() {
            return Some(node);
        }
        node.as_branch()?.get_path(rest)
    }

    /// Insert or replace a top-level key, returning the previous node.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<DocumentNode>) -> Option<DocumentNode> {
        self.entries.insert(key.into(), node.into())
    }

    /// Remove a top-level key.
    pub fn remove(&mut self, key: &str) -> Option<DocumentNode> {
        self.entries.remove(key)
    }

    /// Top-level entries in sorted key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, DocumentNode> {
        self.entries.iter()
    }

    /// Top-level keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Every leaf in the document as `(path, value)`, depth-first in key order.
    pub fn leaf_paths(&self) -> Vec<(Vec<String>, String)> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        self.collect_leaves(&mut prefix, &mut out);
        out
    }

    fn collect_leaves(&self, prefix: &mut Vec<String>, out: &mut Vec<(Vec<String>, String)>) {
        for (key, node) in &self.entries {
            prefix.push(key.clone());
            match node {
                DocumentNode::Leaf(value) => out.push((prefix.clone(), value.clone())),
                DocumentNode::Branch(doc) => doc.collect_leaves(prefix, out),
            }
            prefix.pop();
        }
    }

    /// Number of leaves at any depth.
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                DocumentNode::Leaf(_) => 1,
                DocumentNode::Branch(doc) => doc.leaf_count(),
            })
            .sum()
    }

    /// A copy of this document with the same keys and every leaf set to `""`.
    pub fn blanked(&self) -> Self {
        self.entries
            .iter()
            .map(|(key, node)| (key.clone(), node.blanked()))
            .collect()
    }
}

impl FromIterator<(String, DocumentNode)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, DocumentNode)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Document {
    type Item = (String, DocumentNode);
    type IntoIter = btree_map::IntoIter<String, DocumentNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a DocumentNode);
    type IntoIter = btree_map::Iter<'a, String, DocumentNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
