//! Event-graph checks.
//!
//! A hat's `triggers` and `publishes` must name events declared in the
//! workflow's `events` map. Cycles, self-loops, and events no hat touches
//! are all legal; only undeclared references are errors.

use std::collections::{BTreeMap, BTreeSet};

use {
    hatrack_config::{HatConfig, WorkflowConfig},
    serde::Serialize,
};

use crate::diagnostic::{Diagnostic, Usage};

/// Maximum edit distance for "did you mean" suggestions.
const SUGGEST_DISTANCE: usize = 3;

/// The declared event vocabulary, in lexical order.
pub fn declared_events(config: &WorkflowConfig) -> BTreeSet<&str> {
    config.events.keys().map(String::as_str).collect()
}

/// One diagnostic per `(hat, event, usage)` that references an undeclared
/// event. The same missing event used by two hats yields two diagnostics.
pub fn validate_events(
    declared: &BTreeSet<&str>,
    hats: &BTreeMap<String, HatConfig>,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for (hat_id, hat) in hats {
        let refs = hat
            .triggers
            .iter()
            .map(|e| (e, Usage::Trigger))
            .chain(hat.publishes.iter().map(|e| (e, Usage::Publish)));
        for (event, usage) in refs {
            if declared.contains(event.as_str()) {
                continue;
            }
            let suggestion = hatrack_common::suggest(event, declared.iter().copied(), SUGGEST_DISTANCE)
                .map(str::to_string);
            diagnostics.push(Diagnostic::undeclared_event(hat_id, event, usage, suggestion));
        }
    }
    diagnostics
}

/// Informational view of how hats connect through events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    /// Declared events some hat triggers on but no hat publishes. These are
    /// where a run starts.
    pub entry_events: Vec<String>,
    /// Declared events no hat triggers on or publishes.
    pub unused_events: Vec<String>,
}

pub fn summarize(config: &WorkflowConfig) -> GraphSummary {
    let triggered: BTreeSet<&str> = config
        .hats
        .values()
        .flat_map(|h| h.triggers.iter().map(String::as_str))
        .collect();
    let published: BTreeSet<&str> = config
        .hats
        .values()
        .flat_map(|h| h.publishes.iter().map(String::as_str))
        .collect();

    let mut summary = GraphSummary::default();
    for event in declared_events(config) {
        match (triggered.contains(event), published.contains(event)) {
            (true, false) => summary.entry_events.push(event.to_string()),
            (false, false) => summary.unused_events.push(event.to_string()),
            _ => {},
        }
    }
    summary
}
