use indexmap::IndexMap;
use regex::Regex;

use crate::error::TransformError;
use crate::parse::operation::PathItem;
use crate::parse::spec::OpenApiSpec;

/// Extracts the resource segment that follows a fixed path prefix.
#[derive(Debug, Clone)]
pub struct ResourceMatcher {
    prefix: String,
    pattern: Regex,
}

impl ResourceMatcher {
    pub fn new(prefix: &str) -> Result<Self, TransformError> {
        let prefix = prefix.trim_end_matches('/');
        let pattern = Regex::new(&format!("^{}/([^/]+)", regex::escape(prefix))).map_err(
            |source| TransformError::InvalidPrefix {
                prefix: prefix.to_string(),
                source,
            },
        )?;
        Ok(Self {
            prefix: prefix.to_string(),
            pattern,
        })
    }

    /// The resource name for `path`, or `None` when the path is out of scope.
    pub fn resource_of<'p>(&self, path: &'p str) -> Option<&'p str> {
        let segment = self.pattern.captures(path)?.get(1)?.as_str();
        if segment.starts_with('{') {
            return None;
        }
        Some(segment)
    }

    /// The part of `path` after the prefix, e.g. `/widgets/{id}`.
    pub fn strip_prefix<'p>(&self, path: &'p str) -> &'p str {
        path.strip_prefix(self.prefix.as_str()).unwrap_or(path)
    }
}

/// A resource's paths, in document order.
pub type ResourcePaths<'a> = IndexMap<&'a str, Vec<(&'a str, &'a PathItem)>>;

/// Group document paths by resource, keeping first-seen order.
///
/// Paths outside the prefix and path-item `$ref`s are dropped with a warning.
pub fn group_paths<'a>(spec: &'a OpenApiSpec, matcher: &ResourceMatcher) -> ResourcePaths<'a> {
    let mut groups: ResourcePaths<'a> = IndexMap::new();

    for (path, item) in &spec.paths {
        let Some(resource) = matcher.resource_of(path) else {
            log::warn!(
                "skipping {path}: does not match {}/<resource>",
                matcher.prefix
            );
            continue;
        };
        if let Some(ref target) = item.ref_path {
            log::warn!("skipping {path}: path item $ref {target} is not followed");
            continue;
        }
        groups.entry(resource).or_default().push((path.as_str(), item));
    }

    groups
}
