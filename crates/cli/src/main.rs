mod dry_run;
mod models_commands;

use std::process::ExitCode;

use {
    clap::{Parser, Subcommand},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use crate::{
    dry_run::{CheckArgs, EXIT_USAGE},
    models_commands::ModelsArgs,
};

#[derive(Parser)]
#[command(name = "hatrack", version, about = "hatrack: hat-based agent workflows")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a workflow. Only `--dry-run` is supported.
    Run {
        /// Resolve models and check the event graph without running any hat.
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        args: CheckArgs,
    },
    /// Same as `run --dry-run`.
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },
    /// List model aliases per backend.
    Models(ModelsArgs),
}

/// Initialise tracing. Logs go to stderr so stdout stays machine-readable.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Run { dry_run: true, args } | Commands::Check { args } => {
            dry_run::handle_check(&args)
        },
        Commands::Run { dry_run: false, .. } => {
            eprintln!("live execution is not available in this build; pass --dry-run");
            Ok(ExitCode::from(EXIT_USAGE))
        },
        Commands::Models(args) => {
            models_commands::handle_models(&args)?;
            Ok(ExitCode::SUCCESS)
        },
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "hatrack starting");

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_USAGE)
        },
    }
}
