use std::collections::HashSet;

use indexmap::IndexMap;

use crate::config::{DashgenConfig, NamingStrategy};
use crate::error::TransformError;
use crate::ir::*;
use crate::parse::operation::{Operation, PathItem};
use crate::parse::ref_resolve::RefLookup;
use crate::parse::spec::OpenApiSpec;

use super::classifier::{ResourceMatcher, group_paths};
use super::name_normalizer::{
    capitalize_first, normalize_name, operation_id_to_name, route_to_name, singularize,
    verb_segment_name,
};
use super::schema_resolver::{resolve_model, resolve_params, resolve_payload};

/// Options controlling resource detection and operation naming.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    pub resource_prefix: String,
    pub naming_strategy: NamingStrategy,
    pub aliases: IndexMap<String, String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            resource_prefix: "/api".to_string(),
            naming_strategy: NamingStrategy::default(),
            aliases: IndexMap::new(),
        }
    }
}

impl From<&DashgenConfig> for TransformOptions {
    fn from(config: &DashgenConfig) -> Self {
        Self {
            resource_prefix: config.resource_prefix.clone(),
            naming_strategy: config.naming.strategy,
            aliases: config.naming.aliases.clone(),
        }
    }
}

/// Transform a validated OpenAPI document into classified resource groups.
pub fn transform(
    spec: &OpenApiSpec,
    options: &TransformOptions,
) -> Result<DashboardSpec, TransformError> {
    let matcher = ResourceMatcher::new(&options.resource_prefix)?;
    let lookup = RefLookup::new(spec);

    let resources = group_paths(spec, &matcher)
        .into_iter()
        .map(|(resource, paths)| build_resource(resource, &paths, &matcher, &lookup, options))
        .collect();

    Ok(DashboardSpec {
        info: IrInfo {
            title: spec.info.title.clone(),
            description: spec.info.description.clone(),
            version: spec.info.version.clone(),
        },
        resources,
    })
}

fn build_resource(
    resource: &str,
    paths: &[(&str, &PathItem)],
    matcher: &ResourceMatcher,
    lookup: &RefLookup<'_>,
    options: &TransformOptions,
) -> ResourceGroup {
    let name = normalize_name(resource);
    let mut taken: HashSet<String> = HashSet::new();
    let mut taken_types: HashSet<String> = HashSet::new();
    let mut operations = Vec::new();

    for (path, item) in paths {
        for (verb, op) in &item.operations {
            let Some(method) = HttpMethod::from_key(verb) else {
                continue;
            };
            let location = format!("{} {}", method.as_str(), path);

            let raw_name = raw_operation_name(method, path, op, matcher, options);
            let function_name = unique_name(
                format!("{raw_name}{}", name.pascal_case),
                &mut taken,
                &location,
                "function name",
            );
            // `getThing` and `GetThing` are distinct callables but share a type prefix.
            let type_prefix = unique_name(
                capitalize_first(&function_name),
                &mut taken_types,
                &location,
                "type prefix",
            );

            operations.push(ClassifiedOperation {
                type_prefix,
                bucket: Bucket::classify(&function_name),
                function_name,
                raw_name,
                operation_id: op.operation_id.clone(),
                method,
                path: path.to_string(),
                url: UrlTemplate::parse(path),
                summary: op.summary.clone(),
                params: resolve_params(&item.parameters, &op.parameters, lookup, &location),
                payload: resolve_payload(op.request_body.as_ref(), lookup, &location),
            });
        }
    }

    report_buckets(resource, &operations);

    let model = find_model(&name, &operations, lookup);
    if model.is_none() {
        log::warn!(
            "no model schema found for resource {resource}; skipping its dashboard page"
        );
    }

    ResourceGroup {
        name,
        operations,
        model,
    }
}

/// The name an operation is known by before the resource suffix is added.
fn raw_operation_name(
    method: HttpMethod,
    path: &str,
    op: &Operation,
    matcher: &ResourceMatcher,
    options: &TransformOptions,
) -> String {
    let raw = match options.naming_strategy {
        NamingStrategy::UseOperationId => match op.operation_id {
            Some(ref id) => operation_id_to_name(id),
            None => verb_segment_name(method, path),
        },
        NamingStrategy::UseRouteBased => route_to_name(method, matcher.strip_prefix(path)),
    };

    match options.aliases.get(&raw) {
        Some(alias) => alias.clone(),
        None => raw,
    }
}

/// Append `2`, `3`, ... until `name` is unused within the resource.
fn unique_name(name: String, taken: &mut HashSet<String>, location: &str, kind: &str) -> String {
    if taken.insert(name.clone()) {
        return name;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{name}{n}");
        if taken.insert(candidate.clone()) {
            log::warn!("{location}: {kind} {name} already used; renamed to {candidate}");
            return candidate;
        }
        n += 1;
    }
}

fn report_buckets(resource: &str, operations: &[ClassifiedOperation]) {
    for op in operations {
        let Some(bucket) = op.bucket else {
            log::info!(
                "{} {}: {} has no CRUD prefix; emitted as a client function only",
                op.method.as_str(),
                op.path,
                op.function_name
            );
            continue;
        };
        let first = operations.iter().find(|o| o.bucket == Some(bucket));
        if let Some(first) = first.filter(|f| f.function_name != op.function_name) {
            log::warn!(
                "resource {resource}: {} is a second {} operation; pages bind {}",
                op.function_name,
                bucket.as_str(),
                first.function_name
            );
        }
    }
}

fn find_model(
    name: &NormalizedName,
    operations: &[ClassifiedOperation],
    lookup: &RefLookup<'_>,
) -> Option<ModelSchema> {
    let singular = normalize_name(&singularize(&name.original)).pascal_case;

    let payload_schema = |bucket: Bucket| {
        operations
            .iter()
            .find(|op| op.bucket == Some(bucket))
            .and_then(|op| match op.payload {
                Payload::Record {
                    schema: Some(ref schema),
                    ..
                } => Some(schema.as_str()),
                _ => None,
            })
    };

    let candidates = [
        Some(name.pascal_case.as_str()),
        Some(singular.as_str()),
        payload_schema(Bucket::Create),
        payload_schema(Bucket::Update),
    ];

    resolve_model(candidates.into_iter().flatten(), lookup)
}
