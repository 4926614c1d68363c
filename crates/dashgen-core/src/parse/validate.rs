use indexmap::IndexMap;

use super::operation::PathItem;
use super::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use super::ref_resolve::RefLookup;
use super::spec::OpenApiSpec;
use crate::error::ValidationError;
use crate::ir::UrlTemplate;

/// Structural checks an OpenAPI validator would reject a document for.
///
/// Everything except the version check is collected so the user sees every
/// problem at once.
pub fn validate(spec: &OpenApiSpec) -> Result<(), ValidationError> {
    if !spec.openapi.starts_with("3.") {
        return Err(ValidationError::UnsupportedVersion(spec.openapi.clone()));
    }

    let lookup = RefLookup::new(spec);
    let mut problems = Vec::new();
    let mut operation_ids: IndexMap<&str, String> = IndexMap::new();

    for (path, item) in &spec.paths {
        if !path.starts_with('/') {
            problems.push(format!("path {path:?} must start with '/'"));
        }

        let path_level = declared_path_params(&item.parameters, &lookup, path, &mut problems);
        check_declared_params(path, item, &path_level, path, &mut problems);

        for (verb, op) in &item.operations {
            let location = format!("{} {}", verb.to_uppercase(), path);

            if let Some(ref id) = op.operation_id {
                if let Some(first) = operation_ids.get(id.as_str()) {
                    problems.push(format!(
                        "operationId {id:?} is used by both {first} and {location}"
                    ));
                } else {
                    operation_ids.insert(id.as_str(), location.clone());
                }
            }

            let op_level = declared_path_params(&op.parameters, &lookup, &location, &mut problems);
            check_template_params(path, item, &path_level, &op_level, &location, &mut problems);
            check_declared_params(path, item, &op_level, &location, &mut problems);
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Problems(problems))
    }
}

/// Collect `in: path` parameter names, flagging ones not marked required.
fn declared_path_params(
    params: &[ParameterOrRef],
    lookup: &RefLookup<'_>,
    location: &str,
    problems: &mut Vec<String>,
) -> Vec<String> {
    let mut names = Vec::new();
    for p in params {
        let param: &Parameter = match p {
            ParameterOrRef::Parameter(param) => param,
            ParameterOrRef::Ref { ref_path } => match lookup.parameter(ref_path) {
                Ok(param) => param,
                Err(e) => {
                    problems.push(format!("{location}: {e}"));
                    continue;
                }
            },
        };
        if param.location == ParameterLocation::Path {
            if !param.required {
                problems.push(format!(
                    "{location}: path parameter {:?} must be required",
                    param.name
                ));
            }
            names.push(param.name.clone());
        }
    }
    names
}

fn check_template_params(
    path: &str,
    item: &PathItem,
    path_level: &[String],
    op_level: &[String],
    location: &str,
    problems: &mut Vec<String>,
) {
    if item.ref_path.is_some() {
        return;
    }
    for name in UrlTemplate::parse(path).param_names() {
        let declared = |names: &[String]| names.iter().any(|n| n == name);
        if !declared(path_level) && !declared(op_level) {
            problems.push(format!(
                "{location}: path template parameter {{{name}}} is not declared"
            ));
        }
    }
}

/// Every declared `in: path` parameter must appear in the template.
fn check_declared_params(
    path: &str,
    item: &PathItem,
    declared: &[String],
    location: &str,
    problems: &mut Vec<String>,
) {
    if item.ref_path.is_some() {
        return;
    }
    let template = UrlTemplate::parse(path);
    for name in declared {
        if !template.param_names().any(|p| p == name) {
            problems.push(format!(
                "{location}: path parameter {name:?} does not appear in the path template"
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{LoadError, ValidationError};
    use crate::parse;

    fn problems(yaml: &str) -> Vec<String> {
        match parse::from_yaml(yaml) {
            Err(LoadError::Invalid(ValidationError::Problems(p))) => p,
            other => panic!("expected validation problems, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_swagger_2() {
        let yaml = "openapi: '2.0'\ninfo: { title: Old, version: '1' }\n";
        assert!(matches!(
            parse::from_yaml(yaml),
            Err(LoadError::Invalid(ValidationError::UnsupportedVersion(v))) if v == "2.0"
        ));
    }

    #[test]
    fn test_undeclared_template_param() {
        let found = problems(
            r#"
openapi: 3.0.3
info: { title: T, version: "1" }
paths:
  /api/widgets/{id}:
    get:
      operationId: retrieveWidgets
"#,
        );
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("{id}"));
    }

    #[test]
    fn test_duplicate_operation_ids_and_bad_path() {
        let found = problems(
            r#"
openapi: 3.0.3
info: { title: T, version: "1" }
paths:
  /api/widgets:
    get: { operationId: listWidgets }
  api/gadgets:
    get: { operationId: listWidgets }
"#,
        );
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|p| p.contains("must start with '/'")));
        assert!(found.iter().any(|p| p.contains("listWidgets")));
    }

    #[test]
    fn test_path_level_param_satisfies_template() {
        let yaml = r#"
openapi: 3.1.0
info: { title: T, version: "1" }
paths:
  /api/widgets/{id}:
    parameters:
      - { name: id, in: path, required: true, schema: { type: integer } }
    get: { operationId: retrieveWidgets }
    delete: { operationId: deleteWidgets }
"#;
        assert!(parse::from_yaml(yaml).is_ok());
    }

    #[test]
    fn test_path_param_missing_from_template() {
        let found = problems(
            r#"
openapi: 3.0.3
info: { title: T, version: "1" }
paths:
  /api/widgets:
    parameters:
      - { name: shopId, in: path, required: true, schema: { type: integer } }
    get:
      operationId: listWidgets
      parameters:
        - { name: id, in: path, required: true, schema: { type: integer } }
"#,
        );
        assert_eq!(
            found,
            vec![
                "/api/widgets: path parameter \"shopId\" does not appear in the path template",
                "GET /api/widgets: path parameter \"id\" does not appear in the path template",
            ]
        );
    }

    #[test]
    fn test_optional_path_param_rejected() {
        let found = problems(
            r#"
openapi: 3.0.3
info: { title: T, version: "1" }
paths:
  /api/widgets/{id}:
    get:
      operationId: retrieveWidgets
      parameters:
        - { name: id, in: path, schema: { type: integer } }
"#,
        );
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("must be required"));
    }
}
