use std::fmt;

use super::operations::{Bucket, ClassifiedOperation, Field};

/// The classified, generator-ready view of an OpenAPI document.
#[derive(Debug, Clone)]
pub struct DashboardSpec {
    pub info: IrInfo,
    /// Resources in the order their first path appears in the document.
    pub resources: Vec<ResourceGroup>,
}

/// API metadata.
#[derive(Debug, Clone)]
pub struct IrInfo {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
}

/// A REST resource inferred from `<prefix>/<resource>` and all of its operations.
#[derive(Debug, Clone)]
pub struct ResourceGroup {
    pub name: NormalizedName,
    pub operations: Vec<ClassifiedOperation>,
    /// Component schema backing the resource's pages, if one was found.
    pub model: Option<ModelSchema>,
}

impl ResourceGroup {
    /// The operation backing a bucket: the first one in source order.
    pub fn binding(&self, bucket: Bucket) -> Option<&ClassifiedOperation> {
        self.operations_in(bucket).next()
    }

    /// Every operation classified into `bucket`, in source order.
    pub fn operations_in(&self, bucket: Bucket) -> impl Iterator<Item = &ClassifiedOperation> {
        self.operations
            .iter()
            .filter(move |op| op.bucket == Some(bucket))
    }

    /// Cache key shared by the list query and every write invalidation.
    pub fn list_cache_key(&self) -> String {
        format!("{}s", self.name.original)
    }
}

/// A named component schema with its properties mapped to fields.
#[derive(Debug, Clone)]
pub struct ModelSchema {
    pub name: String,
    pub fields: Vec<Field>,
}

/// A name with multiple casing variants pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
    pub camel_case: String,
    pub snake_case: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
