//! Key normalization and [`KeyPath`].

use std::fmt;

/// Suffix appended to every scope segment of a recorded path.
///
/// Keeps a scope named `key` and a leaf named `key` from landing on the same
/// catalog entry.
pub const SCOPE_SUFFIX: &str = "_scope";

/// Separator between segments of a dotted translation key.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Split a locale, scope list, and dotted key into flat segments.
///
/// Every scope entry and the key itself are split on `separator`; empty
/// segments are dropped. The locale, when given, comes first.
///
/// `normalize_keys(Some("nl"), "new.title", &["documents"], ".")` yields
/// `["nl", "documents", "new", "title"]`.
pub fn normalize_keys<S: AsRef<str>>(
    locale: Option<&str>,
    key: &str,
    scope: &[S],
    separator: &str,
) -> Vec<String> {
    let separator = if separator.is_empty() { DEFAULT_SEPARATOR } else { separator };
    let mut segments = Vec::new();
    let parts = locale
        .into_iter()
        .chain(scope.iter().map(|s| s.as_ref()))
        .chain(std::iter::once(key));
    for part in parts {
        segments.extend(
            part.split(separator)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
    }
    segments
}

/// A normalized missing-translation path: `[locale, scope_scope..., leaf]`.
///
/// Always holds at least a locale and a leaf key. Scope segments carry the
/// [`SCOPE_SUFFIX`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Build a path from a failed lookup.
    ///
    /// Empty scope segments are skipped and the rest are suffixed. Returns
    /// `None` when there is no locale or no leaf key, since such a lookup
    /// names nothing that could be translated.
    pub fn from_lookup<S: AsRef<str>>(locale: &str, leaf: Option<&str>, scopes: &[S]) -> Option<Self> {
        let leaf = leaf.filter(|l| !l.is_empty())?;
        if locale.is_empty() {
            return None;
        }

        let mut segments = Vec::with_capacity(scopes.len() + 2);
        segments.push(locale.to_string());
        segments.extend(
            scopes
                .iter()
                .map(|s| s.as_ref())
                .filter(|s| !s.is_empty())
                .map(|s| format!("{s}{SCOPE_SUFFIX}")),
        );
        segments.push(leaf.to_string());
        Some(Self { segments })
    }

    /// All segments, locale first and leaf last.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The locale segment.
    pub fn locale(&self) -> &str {
        &self.segments[0]
    }

    /// The leaf key.
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// The suffixed scope segments between locale and leaf.
    pub fn scopes(&self) -> &[String] {
        &self.segments[1..self.segments.len() - 1]
    }

    /// Segments joined with `.`.
    pub fn dotted(&self) -> String {
        self.segments.join(DEFAULT_SEPARATOR)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}
