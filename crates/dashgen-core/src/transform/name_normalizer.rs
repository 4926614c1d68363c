use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};

use crate::ir::{HttpMethod, NormalizedName};

/// Create a `NormalizedName` from an arbitrary string, computing all casing variants.
pub fn normalize_name(name: &str) -> NormalizedName {
    let sanitized = sanitize_identifier(name);

    NormalizedName {
        original: name.to_string(),
        pascal_case: sanitized.to_pascal_case(),
        camel_case: sanitized.to_lower_camel_case(),
        snake_case: sanitized.to_snake_case(),
    }
}

/// Whether `name` can be used verbatim as a TypeScript identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Upper-case the first character and leave the rest alone.
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// An `operationId` as a callable name: verbatim when it is already an
/// identifier, camelCased otherwise.
pub fn operation_id_to_name(operation_id: &str) -> String {
    if is_identifier(operation_id) {
        operation_id.to_string()
    } else {
        normalize_name(operation_id).camel_case
    }
}

/// Fallback name for an operation without an `operationId`:
/// lowercase verb plus the PascalCased last path segment.
///
/// - `GET /api/widgets` → `getWidgets`
/// - `GET /api/widgets/{id}` → `getId`
pub fn verb_segment_name(method: HttpMethod, path: &str) -> String {
    let last = path
        .rsplit('/')
        .map(|s| s.trim_matches(|c| c == '{' || c == '}'))
        .find(|s| !s.is_empty());
    match last {
        Some(segment) => format!("{}{}", method.as_lower(), normalize_name(segment).pascal_case),
        None => method.as_lower().to_string(),
    }
}

/// Derive a bucket-style name from HTTP method + path (relative to the resource prefix).
///
/// Examples:
/// - `GET /widgets` → `listWidgets`
/// - `POST /widgets` → `createWidgets`
/// - `GET /widgets/{id}` → `retrieveWidget`
/// - `PUT /widgets/{id}` → `updateWidget`
/// - `PATCH /widgets/{id}` → `updateWidget`
/// - `DELETE /widgets/{id}` → `deleteWidget`
/// - `GET /widgets/{id}/parts` → `listWidgetsParts`
pub fn route_to_name(method: HttpMethod, path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut resource_parts: Vec<&str> = Vec::new();
    let mut ends_with_param = false;

    for seg in &segments {
        if seg.starts_with('{') && seg.ends_with('}') {
            ends_with_param = true;
        } else {
            resource_parts.push(seg);
            ends_with_param = false;
        }
    }

    let prefix = match method {
        HttpMethod::Get if ends_with_param => "retrieve",
        HttpMethod::Get => "list",
        HttpMethod::Post => "create",
        HttpMethod::Put | HttpMethod::Patch => "update",
        HttpMethod::Delete => "delete",
        other => other.as_lower(),
    };

    if resource_parts.is_empty() {
        return prefix.to_string();
    }

    // Single-resource ops (trailing param) singularize the last segment.
    let mut pascal_parts = String::new();
    for (i, part) in resource_parts.iter().enumerate() {
        let is_last = i == resource_parts.len() - 1;
        let word = if is_last && ends_with_param {
            singularize(part)
        } else {
            part.to_string()
        };
        pascal_parts.push_str(&word.to_pascal_case());
    }

    format!("{prefix}{pascal_parts}")
}

/// Naive singularization: strips a trailing plural suffix if present.
pub fn singularize(word: &str) -> String {
    if word.ends_with("ies") && word.len() > 3 {
        format!("{}y", &word[..word.len() - 3])
    } else if word.ends_with("ses") || word.ends_with("xes") || word.ends_with("zes") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") && word.len() > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Sanitize a string to be a valid identifier.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for (i, ch) in name.chars().enumerate() {
        if ch.is_alphanumeric() {
            if i == 0 && ch.is_ascii_digit() {
                result.push('_');
            }
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name() {
        let n = normalize_name("widgets");
        assert_eq!(n.pascal_case, "Widgets");
        assert_eq!(n.camel_case, "widgets");
        assert_eq!(n.snake_case, "widgets");
    }

    #[test]
    fn test_kebab_case() {
        let n = normalize_name("user-profiles");
        assert_eq!(n.pascal_case, "UserProfiles");
        assert_eq!(n.camel_case, "userProfiles");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("retrieveFoo"));
        assert!(is_identifier("_private$"));
        assert!(!is_identifier("list-widgets"));
        assert!(!is_identifier("2fa"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("retrieveFooFoo"), "RetrieveFooFoo");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_operation_id_to_name() {
        assert_eq!(operation_id_to_name("retrieveFoo"), "retrieveFoo");
        assert_eq!(operation_id_to_name("list-widgets"), "listWidgets");
        assert_eq!(operation_id_to_name("widgets_create"), "widgetsCreate");
    }

    #[test]
    fn test_verb_segment_name() {
        assert_eq!(verb_segment_name(HttpMethod::Get, "/api/widgets"), "getWidgets");
        assert_eq!(verb_segment_name(HttpMethod::Get, "/api/widgets/{id}"), "getId");
        assert_eq!(
            verb_segment_name(HttpMethod::Post, "/api/widgets/bulk-import/"),
            "postBulkImport"
        );
    }

    #[test]
    fn test_route_to_name() {
        assert_eq!(route_to_name(HttpMethod::Get, "/widgets"), "listWidgets");
        assert_eq!(route_to_name(HttpMethod::Post, "/widgets"), "createWidgets");
        assert_eq!(route_to_name(HttpMethod::Get, "/widgets/{id}"), "retrieveWidget");
        assert_eq!(route_to_name(HttpMethod::Put, "/widgets/{id}"), "updateWidget");
        assert_eq!(route_to_name(HttpMethod::Patch, "/widgets/{id}"), "updateWidget");
        assert_eq!(route_to_name(HttpMethod::Delete, "/widgets/{id}"), "deleteWidget");
        assert_eq!(
            route_to_name(HttpMethod::Get, "/widgets/{id}/parts"),
            "listWidgetsParts"
        );
        assert_eq!(route_to_name(HttpMethod::Head, "/widgets"), "headWidgets");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("widgets"), "widget");
        assert_eq!(singularize("glass"), "glass");
    }
}
