//! Lenient field deserializers for hand-written workflow files.
//!
//! A key left blank (`description:`) is YAML null and reads as empty text.
//! Event and hat names may be written as bare scalars (`404`, `true`) and are
//! kept as their textual form.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer};

/// A scalar accepted where a name is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(s) => s,
            Scalar::Signed(n) => n.to_string(),
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(from = "Scalar")]
struct Name(String);

impl From<Scalar> for Name {
    fn from(scalar: Scalar) -> Self {
        Self(scalar.into())
    }
}

/// Free text where null means "".
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A list of names; null means none, duplicates collapse.
pub fn name_set<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeSet<String>, D::Error> {
    Ok(Option::<Vec<Name>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(|n| n.0)
        .collect())
}

/// A map keyed by name; null means empty, a null value means `V::default()`.
pub fn name_map<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de> + Default,
{
    Ok(Option::<BTreeMap<Name, Option<V>>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k.0, v.unwrap_or_default()))
        .collect())
}
