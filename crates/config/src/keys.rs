//! Unknown-key detection for workflow config files.
//!
//! Serde silently ignores keys it does not know, so a misspelled `modle:`
//! would quietly fall back to the default model. The loader walks the raw
//! value tree against the known shape and logs a hint for every stray key.
//! Hints never fail the load.

use std::collections::HashMap;

/// Expected shape of the configuration tree.
enum KnownKeys {
    /// A struct with fixed field names.
    Struct(HashMap<&'static str, KnownKeys>),
    /// A map with dynamic keys (hats, events) whose values have a known shape.
    Map(Box<KnownKeys>),
    /// Scalar or list value; stop recursion.
    Leaf,
}

/// A key present in the file that the schema does not know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey {
    /// Dotted path, e.g. `hats.builder.modle`.
    pub path: String,
    /// Closest known sibling key, if any is within edit distance 3.
    pub suggestion: Option<&'static str>,
}

impl std::fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.suggestion {
            Some(s) => write!(f, "unknown key {} (did you mean \"{s}\"?)", self.path),
            None => write!(f, "unknown key {}", self.path),
        }
    }
}

fn build_schema_map() -> KnownKeys {
    use KnownKeys::{Leaf, Map, Struct};

    let hat = Struct(HashMap::from([
        ("name", Leaf),
        ("description", Leaf),
        ("triggers", Leaf),
        ("subscriptions", Leaf),
        ("publishes", Leaf),
        ("model", Leaf),
        ("backend", Leaf),
        ("instructions", Leaf),
    ]));

    let event = Struct(HashMap::from([("description", Leaf)]));

    Struct(HashMap::from([
        ("name", Leaf),
        ("description", Leaf),
        ("hats", Map(Box::new(hat))),
        (
            "cli",
            Struct(HashMap::from([("model", Leaf), ("backend", Leaf)])),
        ),
        ("events", Map(Box::new(event))),
        ("aliases", Map(Box::new(Map(Box::new(Leaf))))),
    ]))
}

/// Walk `value` and collect every key the workflow schema does not define.
///
/// Results are sorted by path so repeated runs log in the same order.
#[must_use]
pub fn unknown_keys(value: &serde_json::Value) -> Vec<UnknownKey> {
    let mut found = Vec::new();
    check_unknown_fields(value, &build_schema_map(), "", &mut found);
    found.sort_by(|a, b| a.path.cmp(&b.path));
    found
}

fn check_unknown_fields(
    value: &serde_json::Value,
    schema: &KnownKeys,
    prefix: &str,
    found: &mut Vec<UnknownKey>,
) {
    let serde_json::Value::Object(table) = value else {
        // Leaf or type mismatch; type errors surface during deserialization.
        return;
    };

    match schema {
        KnownKeys::Struct(fields) => {
            let mut known: Vec<&'static str> = fields.keys().copied().collect();
            known.sort_unstable();
            for (key, child) in table {
                let path = join(prefix, key);
                match fields.get(key.as_str()) {
                    Some(child_schema) => check_unknown_fields(child, child_schema, &path, found),
                    None => found.push(UnknownKey {
                        path,
                        suggestion: hatrack_common::suggest(key, known.iter().copied(), 3),
                    }),
                }
            }
        },
        KnownKeys::Map(value_schema) => {
            for (key, child) in table {
                check_unknown_fields(child, value_schema, &join(prefix, key), found);
            }
        },
        KnownKeys::Leaf => {},
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
