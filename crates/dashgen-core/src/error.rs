use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// The document parsed but is not a usable OpenAPI 3.x schema.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),

    #[error("schema failed validation:\n  - {}", .0.join("\n  - "))]
    Problems(Vec<String>),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),

    #[error("reference chain too deep: {0}")]
    ChainTooDeep(String),
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("invalid resource prefix {prefix:?}: {source}")]
    InvalidPrefix {
        prefix: String,
        #[source]
        source: regex::Error,
    },
}

/// Writing generated files to the output root failed.
#[derive(Debug, Error)]
#[error("failed to write {path}: {source}")]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
