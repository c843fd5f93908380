use std::collections::BTreeMap;

/// Built-in shorthand names, scoped per backend.
const BUILTIN_ALIASES: &[(&str, &[(&str, &str)])] = &[
    ("claude", &[
        ("opus", "claude-opus-4-1-20250805"),
        ("sonnet", "claude-sonnet-4-5-20250929"),
        ("haiku", "claude-3-5-haiku-20241022"),
        ("default", "claude-sonnet-4-5-20250929"),
    ]),
    ("kiro", &[
        ("opus", "claude-opus-4.1"),
        ("sonnet", "claude-sonnet-4.5"),
        ("haiku", "claude-haiku-4.5"),
        ("default", "claude-sonnet-4.5"),
    ]),
    ("gemini", &[
        ("pro", "gemini-2.5-pro"),
        ("flash", "gemini-2.5-flash"),
        ("default", "gemini-2.5-pro"),
    ]),
    ("codex", &[
        ("codex", "gpt-5-codex"),
        ("mini", "gpt-5-mini"),
        ("default", "gpt-5-codex"),
    ]),
];

/// Backend-scoped map from shorthand model names to canonical identifiers.
///
/// Built once at process start and shared read-only; lookups never fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    /// backend → alias → canonical id. Keys are stored normalised.
    backends: BTreeMap<String, BTreeMap<String, String>>,
}

fn normalize(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

impl AliasTable {
    /// The table shipped with the binary.
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for (backend, entries) in BUILTIN_ALIASES {
            for (alias, canonical) in *entries {
                table.insert(backend, alias, canonical);
            }
        }
        table
    }

    /// Merge user-supplied entries over this table. User entries win.
    #[must_use]
    pub fn with_entries(mut self, entries: &BTreeMap<String, BTreeMap<String, String>>) -> Self {
        for (backend, aliases) in entries {
            for (alias, canonical) in aliases {
                self.insert(backend, alias, canonical);
            }
        }
        self
    }

    /// Add or replace one alias. Blank keys or targets are ignored.
    pub fn insert(&mut self, backend: &str, alias: &str, canonical: &str) {
        let canonical = canonical.trim();
        if backend.trim().is_empty() || alias.trim().is_empty() || canonical.is_empty() {
            return;
        }
        self.backends
            .entry(normalize(backend))
            .or_default()
            .insert(normalize(alias), canonical.to_string());
    }

    /// Canonical id for `alias` on `backend`, if one is registered.
    ///
    /// Backend and alias are matched case-insensitively.
    pub fn lookup(&self, backend: &str, alias: &str) -> Option<&str> {
        self.backends
            .get(&normalize(backend))?
            .get(&normalize(alias))
            .map(String::as_str)
    }

    /// Expand `candidate` if it is a known alias on `backend`; otherwise
    /// return it unchanged.
    pub fn expand<'a>(&'a self, backend: &str, candidate: &'a str) -> &'a str {
        self.lookup(backend, candidate).unwrap_or(candidate)
    }

    /// Backends that have at least one alias, in sorted order.
    pub fn backends(&self) -> impl Iterator<Item = &str> {
        self.backends.keys().map(String::as_str)
    }

    /// `(alias, canonical)` pairs for `backend`, sorted by alias.
    pub fn entries(&self, backend: &str) -> impl Iterator<Item = (&str, &str)> {
        self.backends
            .get(&normalize(backend))
            .into_iter()
            .flatten()
            .map(|(alias, canonical)| (alias.as_str(), canonical.as_str()))
    }
}
