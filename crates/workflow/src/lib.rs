//! Dry-run validation of a parsed workflow: per-hat model/backend resolution
//! plus event graph consistency checks.
//!
//! [`WorkflowValidator::check`] is the single pass/fail decision. It either
//! returns a [`WorkflowPlan`] with one [`ResolvedHat`] per hat, or a
//! [`ValidationReport`] carrying every diagnostic found.

pub mod check;
pub mod diagnostic;
pub mod events;
pub mod plan;

pub use {
    check::{WorkflowValidator, check_workflow},
    diagnostic::{Diagnostic, DiagnosticCode, Severity, Usage, ValidationReport},
    events::{GraphSummary, declared_events, summarize, validate_events},
    plan::{ResolvedHat, WorkflowPlan},
};
