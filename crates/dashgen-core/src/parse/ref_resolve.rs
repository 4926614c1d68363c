use super::components::Components;
use super::parameter::{Parameter, ParameterOrRef};
use super::request_body::{RequestBody, RequestBodyOrRef};
use super::schema::{Schema, SchemaOrRef};
use super::spec::OpenApiSpec;
use crate::error::ResolveError;

/// Follows `$ref` pointers into `components` exactly one hop.
///
/// A target that is itself a `$ref` is reported as `ChainTooDeep` rather than
/// followed, so circular chains cannot loop.
pub struct RefLookup<'a> {
    components: Option<&'a Components>,
}

impl<'a> RefLookup<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
        }
    }

    pub fn schema(&self, ref_path: &str) -> Result<&'a Schema, ResolveError> {
        let name = parse_ref_name(ref_path, "schemas")?;
        match self.components.and_then(|c| c.schemas.get(name)) {
            Some(SchemaOrRef::Schema(schema)) => Ok(schema.as_ref()),
            Some(SchemaOrRef::Ref { .. }) => Err(ResolveError::ChainTooDeep(ref_path.to_string())),
            None => Err(ResolveError::RefTargetNotFound(ref_path.to_string())),
        }
    }

    /// Look up a component schema by its bare name.
    pub fn schema_named(&self, name: &str) -> Option<&'a Schema> {
        match self.components?.schemas.get(name)? {
            SchemaOrRef::Schema(schema) => Some(schema.as_ref()),
            SchemaOrRef::Ref { .. } => None,
        }
    }

    pub fn parameter(&self, ref_path: &str) -> Result<&'a Parameter, ResolveError> {
        let name = parse_ref_name(ref_path, "parameters")?;
        match self.components.and_then(|c| c.parameters.get(name)) {
            Some(ParameterOrRef::Parameter(param)) => Ok(param),
            Some(ParameterOrRef::Ref { .. }) => {
                Err(ResolveError::ChainTooDeep(ref_path.to_string()))
            }
            None => Err(ResolveError::RefTargetNotFound(ref_path.to_string())),
        }
    }

    pub fn request_body(&self, ref_path: &str) -> Result<&'a RequestBody, ResolveError> {
        let name = parse_ref_name(ref_path, "requestBodies")?;
        match self.components.and_then(|c| c.request_bodies.get(name)) {
            Some(RequestBodyOrRef::RequestBody(body)) => Ok(body),
            Some(RequestBodyOrRef::Ref { .. }) => {
                Err(ResolveError::ChainTooDeep(ref_path.to_string()))
            }
            None => Err(ResolveError::RefTargetNotFound(ref_path.to_string())),
        }
    }
}

/// Parse a `$ref` path like `#/components/schemas/Foo` and extract the name.
pub fn parse_ref_name<'a>(
    ref_path: &'a str,
    expected_section: &str,
) -> Result<&'a str, ResolveError> {
    let stripped = ref_path
        .strip_prefix("#/components/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    Ok(name)
}
