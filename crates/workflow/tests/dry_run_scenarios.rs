#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end dry-run checks: workflow file on disk → loader → validator.

use std::io::Write;

use {
    hatrack_config::load_config,
    hatrack_models::Layer,
    hatrack_workflow::{DiagnosticCode, ValidationReport, WorkflowPlan, check_workflow},
    rstest::rstest,
};

const DEFAULTS: &str = r#"
cli:
  model: claude-haiku-3
  backend: claude
"#;

fn dry_run(body: &str) -> Result<WorkflowPlan, ValidationReport> {
    let mut file = tempfile::Builder::new()
        .suffix(".yml")
        .tempfile()
        .unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file.write_all(DEFAULTS.as_bytes()).unwrap();
    let config = load_config(file.path()).unwrap();
    check_workflow(&config)
}

const BASIC_OVERRIDE: &str = r#"
name: Test Basic Override
hats:
  analyzer:
    name: Analyzer
    triggers: [start]
    publishes: [done]
    model: claude-opus-4-20250514
    backend: claude
    instructions: Analyze input
events:
  start: {description: Start}
  done: {description: Done}
"#;

const MODEL_ONLY: &str = r#"
name: Test Model Only
hats:
  processor:
    name: Processor
    triggers: [begin]
    publishes: [end]
    model: claude-sonnet-4-5-20250929
events:
  begin: {description: Begin}
  end: {description: End}
"#;

const USES_DEFAULTS: &str = r#"
name: Test Defaults
hats:
  default_hat:
    name: Default Hat
    triggers: [go]
    publishes: [done]
events:
  go: {description: Go}
  done: {description: Done}
"#;

const MIXED_MODELS: &str = r#"
name: Test Mixed Models
hats:
  thinker:
    triggers: [think.start]
    publishes: [think.done]
    model: claude-opus-4-20250514
  doer:
    triggers: [think.done]
    publishes: [do.done]
    model: claude-sonnet-4-5-20250929
  checker:
    triggers: [do.done]
    publishes: [check.done]
events:
  think.start: {}
  think.done: {}
  do.done: {}
  check.done: {}
"#;

const SHORTHAND: &str = r#"
name: Test Shorthand
hats:
  opus_hat:
    triggers: [start]
    publishes: [done]
    model: opus
events:
  start: {}
  done: {}
"#;

const EMPTY_MODEL: &str = r#"
name: Test Empty Model
hats:
  empty_model:
    triggers: [go]
    publishes: [stop]
    model: ""
events:
  go: {}
  stop: {}
"#;

const FOREIGN_MODEL: &str = r#"
name: Test Invalid Model
hats:
  bad_model:
    triggers: [run]
    publishes: [fail]
    model: gpt-4
events:
  run: {}
  fail: {}
"#;

const BACKEND_ONLY: &str = r#"
name: Test Backend Only
hats:
  backend_hat:
    triggers: [start]
    publishes: [end]
    backend: claude
events:
  start: {}
  end: {}
"#;

const NULL_MODEL: &str = r#"
name: Test Null Model
hats:
  null_model:
    triggers: [begin]
    publishes: [finish]
    model: null
events:
  begin: {}
  finish: {}
"#;

const COMPLEX: &str = r#"
name: Test Complex Workflow
hats:
  architect:
    triggers: [design.start]
    publishes: [design.ready]
    model: claude-opus-4-20250514
    backend: claude
  builder:
    triggers: [design.ready, build.retry]
    publishes: [build.done, build.retry]
    model: claude-sonnet-4-5-20250929
  validator:
    triggers: [build.done]
    publishes: [valid, invalid]
events:
  design.start: {}
  design.ready: {}
  build.done: {}
  build.retry: {}
  valid: {}
  invalid: {}
"#;

#[rstest]
#[case::basic_override(BASIC_OVERRIDE, "analyzer", "claude-opus-4-20250514")]
#[case::model_only(MODEL_ONLY, "processor", "claude-sonnet-4-5-20250929")]
#[case::uses_defaults(USES_DEFAULTS, "default_hat", "claude-haiku-3")]
#[case::mixed_thinker(MIXED_MODELS, "thinker", "claude-opus-4-20250514")]
#[case::mixed_doer(MIXED_MODELS, "doer", "claude-sonnet-4-5-20250929")]
#[case::mixed_checker(MIXED_MODELS, "checker", "claude-haiku-3")]
#[case::shorthand(SHORTHAND, "opus_hat", "claude-opus-4-1-20250805")]
#[case::empty_model(EMPTY_MODEL, "empty_model", "claude-haiku-3")]
#[case::foreign_model(FOREIGN_MODEL, "bad_model", "gpt-4")]
#[case::backend_only(BACKEND_ONLY, "backend_hat", "claude-haiku-3")]
#[case::null_model(NULL_MODEL, "null_model", "claude-haiku-3")]
#[case::complex_architect(COMPLEX, "architect", "claude-opus-4-20250514")]
#[case::complex_validator(COMPLEX, "validator", "claude-haiku-3")]
fn sample_workflows_pass_dry_run(#[case] body: &str, #[case] hat: &str, #[case] model: &str) {
    let plan = dry_run(body).unwrap();
    let resolved = plan.hat(hat).unwrap();
    assert_eq!(resolved.model, model);
    assert_eq!(resolved.backend, "claude");
}

#[test]
fn empty_and_null_model_defer_like_absent() {
    for body in [EMPTY_MODEL, NULL_MODEL] {
        let plan = dry_run(body).unwrap();
        assert_eq!(plan.hats[0].model_source, Layer::Defaults);
    }
}

#[test]
fn complex_workflow_keeps_retry_loop() {
    let plan = dry_run(COMPLEX).unwrap();
    let builder = plan.hat("builder").unwrap();
    assert_eq!(builder.triggers, vec!["build.retry", "design.ready"]);
    assert_eq!(builder.publishes, vec!["build.done", "build.retry"]);
    assert_eq!(plan.graph.entry_events, vec!["design.start"]);
    assert!(plan.graph.unused_events.is_empty());
}

#[test]
fn undeclared_events_fail_with_every_site() {
    let report = dry_run(
        r#"
name: Broken
hats:
  planner:
    triggers: [start]
    publishes: [plan.redy]
  builder:
    triggers: [plan.redy]
    publishes: [build.done]
  reviewer:
    triggers: [plan.redy]
events:
  start: {}
  plan.ready: {}
  build.done: {}
"#,
    )
    .unwrap_err();

    let lines: Vec<_> = report.to_string().lines().map(str::to_string).collect();
    assert_eq!(lines, vec![
        "builder: undeclared event \"plan.redy\" (used as trigger)",
        "planner: undeclared event \"plan.redy\" (used as publish)",
        "reviewer: undeclared event \"plan.redy\" (used as trigger)",
    ]);
    assert!(
        report
            .diagnostics
            .iter()
            .all(|d| d.code == DiagnosticCode::UndeclaredEvent
                && d.suggestion.as_deref() == Some("plan.ready"))
    );
}

#[test]
fn missing_events_section_reports_every_reference() {
    let report = dry_run("hats:\n  solo:\n    triggers: [go]\n    publishes: [done]\n").unwrap_err();
    assert_eq!(report.len(), 2);
}

#[test]
fn legacy_subscriptions_are_checked_as_triggers() {
    let report =
        dry_run("hats:\n  a:\n    subscriptions: [task.start]\nevents:\n  start: {}\n").unwrap_err();
    assert_eq!(
        report.to_string(),
        "a: undeclared event \"task.start\" (used as trigger)"
    );
}
