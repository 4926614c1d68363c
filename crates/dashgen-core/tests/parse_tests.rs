use std::path::Path;

use dashgen_core::error::{LoadError, ValidationError};
use dashgen_core::parse;
use dashgen_core::parse::parameter::ParameterOrRef;
use dashgen_core::parse::request_body::RequestBodyOrRef;

const WIDGETS: &str = include_str!("fixtures/widgets.yaml");
const BOOKSTORE: &str = include_str!("fixtures/bookstore.yaml");
const WIDGETS_JSON: &str = include_str!("fixtures/widgets.json");

#[test]
fn parse_widgets() {
    let spec = parse::from_yaml(WIDGETS).unwrap();
    assert_eq!(spec.openapi, "3.0.3");
    assert_eq!(spec.info.title, "Widget Store");
    assert_eq!(spec.paths.len(), 1);

    let item = &spec.paths["/api/widgets"];
    let verbs: Vec<_> = item.operations.keys().map(String::as_str).collect();
    assert_eq!(verbs, vec!["get", "post"]);

    let schemas = &spec.components.as_ref().unwrap().schemas;
    assert!(schemas.contains_key("Widget"));
}

#[test]
fn parse_bookstore_refs() {
    let spec = parse::from_yaml(BOOKSTORE).unwrap();
    assert_eq!(
        spec.info.description.as_deref(),
        Some("Books, authors and a few endpoints outside the API prefix.")
    );

    let item = &spec.paths["/api/books/{id}"];
    assert!(matches!(
        &item.parameters[0],
        ParameterOrRef::Ref { ref_path } if ref_path == "#/components/parameters/BookId"
    ));
    assert!(matches!(
        item.operations["put"].request_body,
        Some(RequestBodyOrRef::Ref { .. })
    ));

    let paths: Vec<_> = spec.paths.keys().map(String::as_str).collect();
    insta::assert_debug_snapshot!(paths, @r#"
    [
        "/health",
        "/api/books",
        "/api/books/{id}",
        "/api/books/{id}/cover",
        "/api/foo/{id}",
        "/api/authors",
        "/api/{tenant}/settings",
        "/v2/books",
    ]
    "#);
}

#[test]
fn parse_json_keeps_verb_order() {
    let spec = parse::from_json(WIDGETS_JSON).unwrap();
    let verbs: Vec<_> = spec.paths["/api/widgets"]
        .operations
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(verbs, vec!["post", "get"]);
}

#[test]
fn load_picks_parser_by_extension() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let yaml = parse::load(&dir.join("widgets.yaml")).unwrap();
    let json = parse::load(&dir.join("widgets.json")).unwrap();
    assert_eq!(yaml.info.title, json.info.title);
}

#[test]
fn load_missing_file() {
    let err = parse::load(Path::new("does/not/exist.yaml")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().starts_with("failed to read does/not/exist.yaml"));
}

#[test]
fn malformed_yaml_is_a_load_error() {
    let err = parse::from_yaml("openapi: [unterminated").unwrap_err();
    assert!(matches!(err, LoadError::Yaml(_)));
}

#[test]
fn missing_info_is_a_load_error() {
    let err = parse::from_yaml("openapi: 3.0.3\npaths: {}\n").unwrap_err();
    assert!(matches!(err, LoadError::Yaml(_)));
}

#[test]
fn validation_collects_every_problem() {
    let yaml = r#"
openapi: 3.0.0
info: { title: Broken, version: "0" }
paths:
  /api/widgets/{id}:
    get: { operationId: dup }
  /api/gadgets:
    get: { operationId: dup }
"#;
    let err = parse::from_yaml(yaml).unwrap_err();
    let LoadError::Invalid(ValidationError::Problems(problems)) = err else {
        panic!("expected validation problems");
    };
    assert_eq!(problems.len(), 2);
}
