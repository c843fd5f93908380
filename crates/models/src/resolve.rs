use {
    hatrack_config::{CliConfig, HatConfig, Override},
    serde::Serialize,
    tracing::trace,
};

use crate::alias::AliasTable;

/// Backend used when neither the hat nor the process-wide defaults name one.
pub const DEFAULT_BACKEND: &str = "claude";

/// Model tier used when neither the hat nor the process-wide defaults name
/// one. Expanded like any other name, so backends that register a `default`
/// alias get a concrete id; others receive `default` and pick for themselves.
pub const DEFAULT_MODEL: &str = "default";

/// Which layer of the cascade supplied a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Hat,
    Defaults,
    BuiltIn,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hat => write!(f, "hat"),
            Self::Defaults => write!(f, "defaults"),
            Self::BuiltIn => write!(f, "built-in"),
        }
    }
}

/// Effective model and backend for one hat. Both strings are always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub model: String,
    pub backend: String,
    pub model_source: Layer,
    pub backend_source: Layer,
}

/// Applies the override cascade and alias expansion.
///
/// Holds the alias table so resolution stays a pure function of its inputs;
/// share one resolver across any number of validations.
#[derive(Debug, Clone)]
pub struct Resolver {
    aliases: AliasTable,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(AliasTable::builtin())
    }
}

impl Resolver {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Compute the effective model and backend for `hat`. Never fails.
    pub fn resolve(&self, hat: &HatConfig, defaults: &CliConfig) -> Selection {
        let (backend, backend_source) = pick(&hat.backend, &defaults.backend, DEFAULT_BACKEND);
        let (candidate, model_source) = pick(&hat.model, &defaults.model, DEFAULT_MODEL);
        let model = self.aliases.expand(backend, candidate);
        if model != candidate {
            trace!(backend, alias = candidate, model, "expanded model alias");
        }

        Selection {
            model: model.to_string(),
            backend: backend.to_string(),
            model_source,
            backend_source,
        }
    }
}

fn pick<'a>(hat: &'a Override, defaults: &'a Override, floor: &'static str) -> (&'a str, Layer) {
    if let Some(v) = hat.value() {
        (v, Layer::Hat)
    } else if let Some(v) = defaults.value() {
        (v, Layer::Defaults)
    } else {
        (floor, Layer::BuiltIn)
    }
}
