use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    #[error("failed to parse YAML")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse TOML")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config format: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("no workflow config found (searched {})", join_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },
}

impl hatrack_common::FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message(message)
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;

hatrack_common::impl_context!();
