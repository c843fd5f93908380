//! Dry-run entry point: load a workflow, validate it, and turn the outcome
//! into process output and an exit code.

use std::{path::PathBuf, process::ExitCode};

use {
    anyhow::{Context, Result},
    clap::{Args, ValueEnum},
    hatrack_config::WorkflowConfig,
    hatrack_workflow::{ValidationReport, WorkflowPlan, check_workflow},
    tracing::{debug, info},
};

/// Exit status when every check passed.
pub const EXIT_OK: u8 = 0;
/// Exit status when the workflow has diagnostics.
pub const EXIT_INVALID: u8 = 1;
/// Exit status when the workflow could not be loaded or the command was refused.
pub const EXIT_USAGE: u8 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options shared by `run --dry-run` and `check`.
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Workflow file (default: ./hatrack.{yml,yaml,json,toml}, then the user config dir).
    #[arg(short, long, env = "HATRACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the workflow's default backend.
    #[arg(long, env = "HATRACK_BACKEND")]
    pub backend: Option<String>,

    /// Override the workflow's default model.
    #[arg(long, env = "HATRACK_MODEL")]
    pub model: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// What the command should print and how it should exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub code: u8,
    pub stdout: String,
    pub stderr: String,
}

impl Outcome {
    /// Write both streams and return the exit status.
    pub fn emit(self) -> ExitCode {
        if !self.stdout.is_empty() {
            println!("{}", self.stdout);
        }
        if !self.stderr.is_empty() {
            eprintln!("{}", self.stderr);
        }
        ExitCode::from(self.code)
    }
}

/// Load the workflow named by `args` (or discover one) and apply the
/// command-line default overrides.
pub fn load(args: &CheckArgs) -> Result<(PathBuf, WorkflowConfig)> {
    let (path, mut config) = match &args.config {
        Some(path) => {
            let config = hatrack_config::load_config(path)
                .with_context(|| format!("failed to load workflow {}", path.display()))?;
            (path.clone(), config)
        },
        None => hatrack_config::discover_and_load()?,
    };
    config.apply_cli_overrides(args.model.as_deref(), args.backend.as_deref());
    debug!(path = %path.display(), hats = config.hats.len(), "workflow loaded");
    Ok((path, config))
}

pub fn handle_check(args: &CheckArgs) -> Result<ExitCode> {
    let (path, config) = load(args)?;
    info!(path = %path.display(), "dry-run");
    let result = check_workflow(&config);
    Ok(render(&result, args.format)?.emit())
}

/// Map a validation result to output. Never exits 0 when diagnostics exist.
pub fn render(
    result: &Result<WorkflowPlan, ValidationReport>,
    format: OutputFormat,
) -> Result<Outcome> {
    let outcome = match (result, format) {
        (Ok(plan), OutputFormat::Text) => Outcome {
            code: EXIT_OK,
            stdout: summary(plan),
            stderr: String::new(),
        },
        (Ok(plan), OutputFormat::Json) => Outcome {
            code: EXIT_OK,
            stdout: serde_json::to_string_pretty(plan)?,
            stderr: String::new(),
        },
        (Err(report), OutputFormat::Text) => Outcome {
            code: EXIT_INVALID,
            stdout: String::new(),
            stderr: report.to_string(),
        },
        (Err(report), OutputFormat::Json) => Outcome {
            code: EXIT_INVALID,
            stdout: serde_json::to_string_pretty(report)?,
            stderr: report.to_string(),
        },
    };
    Ok(outcome)
}

/// Human-readable plan: one row per hat with where each value came from.
fn summary(plan: &WorkflowPlan) -> String {
    let title = if plan.name.is_empty() {
        "workflow".to_string()
    } else {
        format!("workflow \"{}\"", plan.name)
    };
    let mut out = format!("{title}: {} hat(s), dry-run OK", plan.hats.len());

    let width = plan.hats.iter().map(|h| h.id.len()).max().unwrap_or(0);
    for hat in &plan.hats {
        out.push_str(&format!(
            "\n  {:<width$}  backend={} ({})  model={} ({})",
            hat.id, hat.backend, hat.backend_source, hat.model, hat.model_source
        ));
    }
    if !plan.graph.entry_events.is_empty() {
        out.push_str(&format!(
            "\n  entry events: {}",
            plan.graph.entry_events.join(", ")
        ));
    }
    if !plan.graph.unused_events.is_empty() {
        out.push_str(&format!(
            "\n  unused events: {}",
            plan.graph.unused_events.join(", ")
        ));
    }
    out
}
