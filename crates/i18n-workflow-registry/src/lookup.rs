//! Lookup options and the key rewriting used around failed lookups.
//!
//! Deciding *which* scopes a lookup searches belongs to the lookup backend.
//! This module only provides the pieces it needs from us: the option list it
//! passes along, the placeholder text shown in place of a missing
//! translation, and the explicit-scope and always-cascade key rewrites.

use crate::key::{normalize_keys, DEFAULT_SEPARATOR, SCOPE_SUFFIX};

/// Option names reserved by the translation framework.
///
/// Their values are never interpolation arguments, so they are left out of
/// placeholder text.
pub const RESERVED_OPTION_KEYS: &[&str] = &[
    "_implementation",
    "cascade",
    "deep_interpolation",
    "default",
    "exception_handler",
    "fallback",
    "fallback_in_progress",
    "fallback_original_locale",
    "format",
    "object",
    "raise",
    "rescue_format",
    "scope",
    "separator",
    "throw",
];

const CASCADE: &str = "cascade";
const SEPARATOR: &str = "separator";

/// Options attached to a translation lookup, in call-site order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupOptions {
    entries: Vec<(String, String)>,
}

impl LookupOptions {
    /// Create an empty option list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set an option. An existing option keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up an option by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the lookup should cascade through broader scopes.
    pub fn cascade(&self) -> bool {
        self.get(CASCADE) == Some("true")
    }

    /// Key separator for this lookup, falling back to `.`.
    pub fn separator(&self) -> &str {
        self.get(SEPARATOR)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SEPARATOR)
    }

    /// Values of the non-reserved options, in insertion order.
    pub fn interpolation_values(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(name, _)| !RESERVED_OPTION_KEYS.contains(&name.as_str()))
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if no options are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for LookupOptions {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (name, value) in iter {
            options.insert(name, value);
        }
        options
    }
}

/// Text shown in place of a missing translation.
///
/// The leaf key is humanized (underscores become spaces, first letter upper
/// case, the rest lower case) and followed by the interpolation values, so
/// `new_document` with `address: "Main St"` reads `New document Main St`.
pub fn placeholder_text(leaf: &str, options: &LookupOptions) -> String {
    let label = humanize(leaf);
    let mut parts: Vec<&str> = Vec::new();
    if !label.is_empty() {
        parts.push(&label);
    }
    parts.extend(options.interpolation_values());
    parts.join(" ")
}

fn humanize(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// A lookup rewritten so every scope segment is explicit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopedLookup {
    /// Scope segments, each carrying the `_scope` suffix.
    pub scope: Vec<String>,
    /// The final key segment, if the lookup named one.
    pub key: Option<String>,
    /// The caller's options with cascading switched on.
    pub options: LookupOptions,
}

/// Rewrite a lookup so its scopes use the `_scope` naming and it cascades.
///
/// The dotted key and scope list are flattened, the last segment becomes the
/// key, and everything before it becomes suffixed scope.
pub fn explicit_scope_key<S: AsRef<str>>(key: &str, scope: &[S], options: &LookupOptions) -> ScopedLookup {
    let mut segments = normalize_keys(None, key, scope, options.separator());
    let key = segments.pop();
    ScopedLookup {
        scope: segments
            .into_iter()
            .map(|s| format!("{s}{SCOPE_SUFFIX}"))
            .collect(),
        key,
        options: always_cascade(options.clone()),
    }
}

/// Force cascading on for a lookup.
pub fn always_cascade(mut options: LookupOptions) -> LookupOptions {
    options.insert(CASCADE, "true");
    options
}
