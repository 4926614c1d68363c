use indexmap::IndexMap;
use serde::Deserialize;

use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;

/// Lowercase HTTP verbs that may key an operation inside a path item.
pub const HTTP_VERBS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// An API operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(rename = "requestBody", default)]
    pub request_body: Option<RequestBodyOrRef>,
}

/// A path item. Operations are kept in the order their verbs appear in the
/// source document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "IndexMap<String, serde_json::Value>")]
pub struct PathItem {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<ParameterOrRef>,
    /// Operations keyed by lowercase HTTP verb.
    pub operations: IndexMap<String, Operation>,
    /// Path-item `$ref`, which is not followed.
    pub ref_path: Option<String>,
}

impl TryFrom<IndexMap<String, serde_json::Value>> for PathItem {
    type Error = serde_json::Error;

    fn try_from(raw: IndexMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut item = PathItem::default();

        for (key, value) in raw {
            match key.as_str() {
                "summary" => item.summary = serde_json::from_value(value)?,
                "description" => item.description = serde_json::from_value(value)?,
                "parameters" => item.parameters = serde_json::from_value(value)?,
                "$ref" => item.ref_path = serde_json::from_value(value)?,
                verb if HTTP_VERBS.contains(&verb) => {
                    let op: Operation = serde_json::from_value(value)?;
                    item.operations.insert(key, op);
                }
                // servers, x-* extensions and unknown keys carry nothing we emit
                _ => {}
            }
        }

        Ok(item)
    }
}
