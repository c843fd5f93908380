use {
    hatrack_config::HatConfig,
    hatrack_models::{Layer, Selection},
    serde::Serialize,
};

use crate::events::GraphSummary;

/// A hat with its effective model and backend filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedHat {
    pub id: String,
    pub name: String,
    pub model: String,
    pub backend: String,
    pub model_source: Layer,
    pub backend_source: Layer,
    pub triggers: Vec<String>,
    pub publishes: Vec<String>,
}

impl ResolvedHat {
    pub(crate) fn new(id: &str, hat: &HatConfig, selection: Selection) -> Self {
        Self {
            id: id.to_string(),
            name: hat.name.clone(),
            model: selection.model,
            backend: selection.backend,
            model_source: selection.model_source,
            backend_source: selection.backend_source,
            triggers: hat.triggers.iter().cloned().collect(),
            publishes: hat.publishes.iter().cloned().collect(),
        }
    }
}

/// The outcome of a successful dry run: every hat resolved, in id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowPlan {
    pub name: String,
    pub hats: Vec<ResolvedHat>,
    pub graph: GraphSummary,
}

impl WorkflowPlan {
    pub fn hat(&self, id: &str) -> Option<&ResolvedHat> {
        self.hats.iter().find(|h| h.id == id)
    }
}
