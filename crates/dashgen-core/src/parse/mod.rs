pub mod components;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod request_body;
pub mod schema;
pub mod spec;
pub mod validate;

use std::fs;
use std::path::Path;

use crate::error::LoadError;
use spec::OpenApiSpec;

/// Parse and validate an OpenAPI document from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiSpec, LoadError> {
    let spec: OpenApiSpec = serde_yaml_ng::from_str(input)?;
    validate::validate(&spec)?;
    Ok(spec)
}

/// Parse and validate an OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<OpenApiSpec, LoadError> {
    let spec: OpenApiSpec = serde_json::from_str(input)?;
    validate::validate(&spec)?;
    Ok(spec)
}

/// Read a schema file, choosing the parser by extension (`.json` or YAML).
pub fn load(path: &Path) -> Result<OpenApiSpec, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => from_json(&content),
        _ => from_yaml(&content),
    }
}
