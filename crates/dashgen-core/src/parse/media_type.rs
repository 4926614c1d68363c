use serde::Deserialize;

use super::schema::SchemaOrRef;

/// A media type object. Only the schema matters for payload derivation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<SchemaOrRef>,
}
