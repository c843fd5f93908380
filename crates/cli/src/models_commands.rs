use std::path::PathBuf;

use {
    anyhow::{Context, Result},
    clap::Args,
    hatrack_models::{AliasTable, DEFAULT_BACKEND, DEFAULT_MODEL},
};

#[derive(Debug, Clone, Args)]
pub struct ModelsArgs {
    /// Only list aliases for this backend.
    #[arg(long)]
    pub backend: Option<String>,

    /// Include the `aliases` section of this workflow file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn handle_models(args: &ModelsArgs) -> Result<()> {
    let mut table = AliasTable::builtin();
    if let Some(path) = &args.config {
        let config = hatrack_config::load_config(path)
            .with_context(|| format!("failed to load workflow {}", path.display()))?;
        table = table.with_entries(&config.aliases);
    }
    println!("{}", render(&table, args.backend.as_deref()));
    Ok(())
}

fn render(table: &AliasTable, only: Option<&str>) -> String {
    let mut lines = vec![format!(
        "built-in defaults: backend={DEFAULT_BACKEND} model={DEFAULT_MODEL}"
    )];
    let backends: Vec<&str> = match only {
        Some(backend) => vec![backend],
        None => table.backends().collect(),
    };
    for backend in backends {
        lines.push(format!("{backend}:"));
        let mut any = false;
        for (alias, canonical) in table.entries(backend) {
            lines.push(format!("  {alias:<10} {canonical}"));
            any = true;
        }
        if !any {
            lines.push("  (no aliases; model names pass through unchanged)".to_string());
        }
    }
    lines.join("\n")
}
