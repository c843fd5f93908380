//! Workflow config schema types (hats, events, process-wide backend defaults).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{de, overrides::Override};

/// Root configuration: one workflow made of hats wired together by events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    #[serde(deserialize_with = "de::text")]
    pub description: String,
    /// Hats keyed by hat id.
    #[serde(deserialize_with = "de::name_map")]
    pub hats: BTreeMap<String, HatConfig>,
    /// Process-wide model/backend defaults.
    pub cli: CliConfig,
    /// Declared event vocabulary, keyed by event name.
    #[serde(deserialize_with = "de::name_map")]
    pub events: BTreeMap<String, EventConfig>,
    /// Extra model aliases per backend, merged over the built-in table.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, BTreeMap<String, String>>,
}

/// Process-wide fallback model and backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    #[serde(skip_serializing_if = "Override::is_unset")]
    pub model: Override,
    #[serde(skip_serializing_if = "Override::is_unset")]
    pub backend: Override,
}

/// One role in the workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HatConfig {
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    #[serde(deserialize_with = "de::text")]
    pub description: String,
    /// Events that cause this hat to run. `subscriptions` is the legacy spelling.
    #[serde(alias = "subscriptions", deserialize_with = "de::name_set")]
    pub triggers: BTreeSet<String>,
    /// Events this hat may emit when it finishes.
    #[serde(deserialize_with = "de::name_set")]
    pub publishes: BTreeSet<String>,
    /// Model override; unset or empty defers to `cli.model`.
    #[serde(skip_serializing_if = "Override::is_unset")]
    pub model: Override,
    /// Backend override; unset or empty defers to `cli.backend`.
    #[serde(skip_serializing_if = "Override::is_unset")]
    pub backend: Override,
    #[serde(deserialize_with = "de::text")]
    pub instructions: String,
}

/// A declared event. Only its presence in [`WorkflowConfig::events`] matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    #[serde(deserialize_with = "de::text")]
    pub description: String,
}

impl WorkflowConfig {
    /// Returns `true` when `event` is a key of the `events` map.
    pub fn declares(&self, event: &str) -> bool {
        self.events.contains_key(event)
    }

    /// Replace the process-wide defaults with command-line values, when given.
    ///
    /// Precedence is command line > config file > built-in default; an empty
    /// command-line value leaves the file value alone.
    pub fn apply_cli_overrides(&mut self, model: Option<&str>, backend: Option<&str>) {
        if let Some(model) = model.map(Override::parse).filter(|o| o.value().is_some()) {
            self.cli.model = model;
        }
        if let Some(backend) = backend.map(Override::parse).filter(|o| o.value().is_some()) {
            self.cli.backend = backend;
        }
    }
}
