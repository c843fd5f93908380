//! Workflow configuration loading, tri-state override parsing, and env substitution.
//!
//! Config files: `hatrack.yml`, `hatrack.yaml`, `hatrack.json`, or `hatrack.toml`.
//! Searched in `./` then `~/.config/hatrack/`.
//!
//! Supports `${ENV_VAR}` and `${ENV_VAR:-fallback}` substitution in the raw
//! file text before parsing.

mod de;
pub mod env_subst;
pub mod error;
pub mod keys;
pub mod loader;
pub mod overrides;
pub mod schema;

pub use {
    error::{Error, Result},
    loader::{Format, discover_and_load, find_config_file, load_config, parse_config},
    overrides::Override,
    schema::{CliConfig, EventConfig, HatConfig, WorkflowConfig},
};
