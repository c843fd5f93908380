use {
    hatrack_config::WorkflowConfig,
    hatrack_models::{AliasTable, Resolver},
    tracing::{debug, info},
};

use crate::{
    diagnostic::{Severity, ValidationReport},
    events::{declared_events, summarize, validate_events},
    plan::{ResolvedHat, WorkflowPlan},
};

/// Validates a loaded workflow and resolves every hat's model and backend.
///
/// Stateless apart from the alias table; one validator can check any number
/// of workflows.
#[derive(Debug, Clone, Default)]
pub struct WorkflowValidator {
    resolver: Resolver,
}

impl WorkflowValidator {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Check the event graph, then resolve each hat.
    ///
    /// Any graph error fails the whole run: the report carries every
    /// finding and no partial plan is returned.
    pub fn check(&self, config: &WorkflowConfig) -> Result<WorkflowPlan, ValidationReport> {
        let declared = declared_events(config);
        let report = ValidationReport::new(validate_events(&declared, &config.hats));
        if report.has_errors() {
            debug!(
                errors = report.count(Severity::Error),
                "event graph check failed"
            );
            return Err(report);
        }

        let hats = config
            .hats
            .iter()
            .map(|(id, hat)| {
                let selection = self.resolver.resolve(hat, &config.cli);
                debug!(
                    hat = %id,
                    model = %selection.model,
                    model_source = %selection.model_source,
                    backend = %selection.backend,
                    backend_source = %selection.backend_source,
                    "resolved hat"
                );
                ResolvedHat::new(id, hat, selection)
            })
            .collect::<Vec<_>>();

        info!(workflow = %config.name, hats = hats.len(), "workflow check passed");
        Ok(WorkflowPlan {
            name: config.name.clone(),
            hats,
            graph: summarize(config),
        })
    }
}

/// Check `config` with the built-in aliases plus any the config declares.
pub fn check_workflow(config: &WorkflowConfig) -> Result<WorkflowPlan, ValidationReport> {
    let aliases = AliasTable::builtin().with_entries(&config.aliases);
    WorkflowValidator::new(Resolver::new(aliases)).check(config)
}
