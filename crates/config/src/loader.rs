use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{
    env_subst::substitute_env,
    error::{Context, Error, Result},
    keys::unknown_keys,
    schema::WorkflowConfig,
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "hatrack.yml",
    "hatrack.yaml",
    "hatrack.json",
    "hatrack.toml",
];

/// On-disk config formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    /// Pick the format from the file extension. Files without an extension
    /// are read as YAML, the format workflows are usually written in.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yml");
        match ext {
            "yml" | "yaml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            other => Err(Error::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }
}

/// Load a workflow config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<WorkflowConfig> {
    let format = Format::from_path(path)?;
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let raw = substitute_env(&raw);
    debug!(path = %path.display(), ?format, "loading workflow config");
    parse_config(&raw, format)
}

/// Parse raw config text, logging a hint for every key the schema does not know.
pub fn parse_config(raw: &str, format: Format) -> Result<WorkflowConfig> {
    let config = match format {
        Format::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(raw)?;
            // An empty document (or one holding only comments) is null.
            if value.is_null() {
                return Ok(WorkflowConfig::default());
            }
            warn_unknown_keys(serde_json::to_value(&value));
            serde_yaml::from_value(value)?
        },
        Format::Json => {
            let value: serde_json::Value = serde_json::from_str(raw)?;
            warn_unknown_keys(Ok(value.clone()));
            serde_json::from_value(value)?
        },
        Format::Toml => {
            let value: toml::Value = toml::from_str(raw)?;
            warn_unknown_keys(serde_json::to_value(&value));
            value.try_into()?
        },
    };
    Ok(config)
}

fn warn_unknown_keys(value: serde_json::Result<serde_json::Value>) {
    let value = match value {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "skipping unknown-key check");
            return;
        },
    };
    for key in unknown_keys(&value) {
        warn!(path = %key.path, suggestion = ?key.suggestion, "{key}");
    }
}

/// Candidate config paths in search order.
///
/// 1. `./hatrack.{yml,yaml,json,toml}` (project-local)
/// 2. `~/.config/hatrack/hatrack.{yml,yaml,json,toml}` (user-global)
fn search_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = CONFIG_FILENAMES.iter().map(PathBuf::from).collect();
    if let Some(dirs) = directories::ProjectDirs::from("", "", "hatrack") {
        let config_dir = dirs.config_dir();
        paths.extend(CONFIG_FILENAMES.iter().map(|name| config_dir.join(name)));
    }
    paths
}

/// Find the first config file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    search_paths().into_iter().find(|p| p.exists())
}

/// Discover and load a workflow config from standard locations.
///
/// Unlike a missing optional settings file, a missing workflow is an error:
/// there is nothing to validate.
pub fn discover_and_load() -> Result<(PathBuf, WorkflowConfig)> {
    let Some(path) = find_config_file() else {
        return Err(Error::NotFound {
            searched: search_paths(),
        });
    };
    let config = load_config(&path)?;
    Ok((path, config))
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, crate::Override, rstest::rstest, std::io::Write};

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[rstest]
    #[case("a/hatrack.yml", Format::Yaml)]
    #[case("hatrack.yaml", Format::Yaml)]
    #[case("hatrack.json", Format::Json)]
    #[case("hatrack.toml", Format::Toml)]
    #[case("workflow", Format::Yaml)]
    fn format_from_extension(#[case] path: &str, #[case] expected: Format) {
        assert_eq!(Format::from_path(Path::new(path)).unwrap(), expected);
    }

    #[test]
    fn unsupported_extension_is_error() {
        let err = Format::from_path(Path::new("hatrack.ini")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension == "ini"));
        assert_eq!(err.to_string(), "unsupported config format: .ini");
    }

    #[test]
    fn loads_yaml_file() {
        let file = write_temp(
            ".yml",
            r#"
name: Test Basic Override
hats:
  analyzer:
    name: Analyzer
    triggers: [start]
    publishes: [done]
    model: claude-opus-4-20250514
    backend: claude
cli:
  model: claude-haiku-3
  backend: claude
events:
  start: {description: Start}
  done: {description: Done}
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.name, "Test Basic Override");
        assert_eq!(
            config.hats["analyzer"].model,
            Override::from("claude-opus-4-20250514")
        );
    }

    #[test]
    fn loads_json_file_with_null_model() {
        let file = write_temp(
            ".json",
            r#"{
  "hats": {"null_model": {"triggers": ["begin"], "publishes": ["finish"], "model": null}},
  "events": {"begin": {}, "finish": {}}
}"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.hats["null_model"].model, Override::Empty);
    }

    #[test]
    fn loads_toml_file() {
        let file = write_temp(
            ".toml",
            r#"
name = "toml workflow"

[cli]
backend = "gemini"

[hats.planner]
triggers = ["plan.start"]
publishes = ["plan.done"]

[events."plan.start"]
description = "Start"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.cli.backend.value(), Some("gemini"));
        assert!(config.hats["planner"].publishes.contains("plan.done"));
        assert!(config.declares("plan.start"));
    }

    #[test]
    fn empty_yaml_is_default_config() {
        let config = parse_config("", Format::Yaml).unwrap();
        assert!(config.hats.is_empty());
    }

    #[test]
    fn unknown_keys_do_not_fail_the_load() {
        let config = parse_config("hats:\n  a:\n    modle: opus\n", Format::Yaml).unwrap();
        assert!(config.hats["a"].model.is_unset());
    }

    #[rstest]
    #[case::hat_fields("hats:\n  a:\n    name:\n    description:\n    instructions:\n")]
    #[case::event_description("events:\n  go:\n    description:\n")]
    #[case::event_body("events:\n  go:\n")]
    #[case::workflow_fields("name:\ndescription:\n")]
    fn blank_free_text_loads_as_empty(#[case] raw: &str) {
        let config = parse_config(raw, Format::Yaml).unwrap();
        assert!(config.name.is_empty());
        for hat in config.hats.values() {
            assert!(hat.description.is_empty());
            assert!(hat.instructions.is_empty());
        }
        for event in config.events.values() {
            assert!(event.description.is_empty());
        }
    }

    #[test]
    fn numeric_names_are_read_as_text() {
        let config = parse_config(
            "hats:\n  7:\n    triggers: [404]\n    publishes: [200]\nevents:\n  404: {}\n  200: {}\n",
            Format::Yaml,
        )
        .unwrap();
        let hat = &config.hats["7"];
        assert!(hat.triggers.contains("404"));
        assert!(hat.publishes.contains("200"));
        assert!(config.declares("404"));
        assert!(config.declares("200"));
    }

    #[test]
    fn parse_error_names_cause_once() {
        let err = parse_config("hats:\n  a:\n    triggers: 5\n", Format::Yaml).unwrap_err();
        assert_eq!(err.to_string(), "failed to parse YAML");
        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert!(cause.contains("invalid type"), "got: {cause}");
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = parse_config("hats: [unclosed", Format::Yaml).unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn type_error_is_reported() {
        let err = parse_config(r#"{"hats": {"a": {"triggers": 5}}}"#, Format::Json).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/hatrack.yml")).unwrap_err();
        assert!(
            err.to_string().starts_with("failed to read /nonexistent/hatrack.yml"),
            "got: {err}"
        );
    }
}
