use crate::ir::{Field, FieldLocation, FieldType, ModelSchema, Payload};
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::ref_resolve::{RefLookup, parse_ref_name};
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::schema::{Schema, SchemaOrRef};

/// Map a schema's declared type through the fixed lookup.
///
/// A `$ref` is followed one hop to read the target's declared type.
pub fn field_type_of(schema: &SchemaOrRef, lookup: &RefLookup<'_>) -> FieldType {
    match schema {
        SchemaOrRef::Schema(s) => FieldType::from_declared(s.declared_type()),
        SchemaOrRef::Ref { ref_path } => lookup
            .schema(ref_path)
            .map(|s| FieldType::from_declared(s.declared_type()))
            .unwrap_or(FieldType::Any),
    }
}

/// An object schema's properties as fields, in declaration order.
pub fn schema_fields(schema: &Schema, lookup: &RefLookup<'_>) -> Vec<Field> {
    schema
        .properties
        .iter()
        .map(|(name, prop)| {
            let read_only = match prop {
                SchemaOrRef::Schema(s) => s.read_only.unwrap_or(false),
                SchemaOrRef::Ref { .. } => false,
            };
            Field {
                name: name.clone(),
                field_type: field_type_of(prop, lookup),
                required: schema.required.contains(name),
                location: None,
                read_only,
            }
        })
        .collect()
}

/// Merge path-level and operation-level parameters into fields.
///
/// Path-level parameters come first; an operation parameter with the same
/// name and location replaces its path-level counterpart in place.
pub fn resolve_params(
    path_level: &[ParameterOrRef],
    op_level: &[ParameterOrRef],
    lookup: &RefLookup<'_>,
    location: &str,
) -> Vec<Field> {
    let mut merged: Vec<&Parameter> = Vec::new();

    for p in path_level.iter().chain(op_level) {
        let param = match p {
            ParameterOrRef::Parameter(param) => param,
            ParameterOrRef::Ref { ref_path } => match lookup.parameter(ref_path) {
                Ok(param) => param,
                Err(e) => {
                    log::warn!("{location}: skipping parameter: {e}");
                    continue;
                }
            },
        };
        match merged
            .iter_mut()
            .find(|m| m.name == param.name && m.location == param.location)
        {
            Some(slot) => *slot = param,
            None => merged.push(param),
        }
    }

    merged
        .into_iter()
        .map(|param| {
            let location = match param.location {
                ParameterLocation::Path => FieldLocation::Path,
                ParameterLocation::Query => FieldLocation::Query,
                ParameterLocation::Header => FieldLocation::Header,
                ParameterLocation::Cookie => FieldLocation::Cookie,
            };
            Field {
                name: param.name.clone(),
                field_type: param
                    .schema
                    .as_ref()
                    .map(|s| field_type_of(s, lookup))
                    .unwrap_or(FieldType::Any),
                required: param.required || location == FieldLocation::Path,
                location: Some(location),
                read_only: false,
            }
        })
        .collect()
}

/// Derive the payload from a request body.
///
/// A schema `$ref` is resolved one hop into `components.schemas`. Anything
/// that cannot be resolved becomes `Payload::Opaque` with a warning.
pub fn resolve_payload(
    body: Option<&RequestBodyOrRef>,
    lookup: &RefLookup<'_>,
    location: &str,
) -> Payload {
    let body = match body {
        None => return Payload::None,
        Some(RequestBodyOrRef::RequestBody(body)) => body,
        Some(RequestBodyOrRef::Ref { ref_path }) => match lookup.request_body(ref_path) {
            Ok(body) => body,
            Err(e) => {
                log::warn!("{location}: request body typed as any: {e}");
                return Payload::Opaque;
            }
        },
    };

    match body.first_schema() {
        None => Payload::Opaque,
        Some(SchemaOrRef::Ref { ref_path }) => match lookup.schema(ref_path) {
            Ok(schema) => Payload::Record {
                schema: parse_ref_name(ref_path, "schemas").ok().map(str::to_string),
                fields: schema_fields(schema, lookup),
            },
            Err(e) => {
                log::warn!("{location}: request body typed as any: {e}");
                Payload::Opaque
            }
        },
        Some(SchemaOrRef::Schema(schema)) => {
            let is_object = schema.declared_type() == Some("object")
                || (schema.declared_type().is_none() && !schema.properties.is_empty());
            if is_object {
                Payload::Record {
                    schema: None,
                    fields: schema_fields(schema, lookup),
                }
            } else {
                Payload::Opaque
            }
        }
    }
}

/// Find the component schema backing a resource's pages.
///
/// Candidates are tried in order; the first that names an inline component
/// schema wins.
pub fn resolve_model<'s>(
    candidates: impl IntoIterator<Item = &'s str>,
    lookup: &RefLookup<'_>,
) -> Option<ModelSchema> {
    candidates.into_iter().find_map(|name| {
        lookup.schema_named(name).map(|schema| ModelSchema {
            name: name.to_string(),
            fields: schema_fields(schema, lookup),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use crate::parse::spec::OpenApiSpec;

    fn spec() -> OpenApiSpec {
        parse::from_yaml(
            r#"
openapi: 3.0.3
info: { title: T, version: "1" }
paths:
  /api/widgets/{id}:
    parameters:
      - { name: id, in: path, required: true, schema: { type: string } }
      - { name: verbose, in: query, schema: { type: boolean } }
    put:
      operationId: updateWidgets
      parameters:
        - { name: id, in: path, required: true, schema: { $ref: '#/components/schemas/Id' } }
        - { name: page, in: query, schema: { type: number } }
      requestBody:
        content:
          application/json:
            schema: { $ref: '#/components/schemas/Widget' }
    patch:
      operationId: updatePartialWidgets
      requestBody:
        content:
          application/json:
            schema: { $ref: '#/components/schemas/WidgetAlias' }
    post:
      operationId: createNoteWidgets
      requestBody:
        content:
          application/json:
            schema:
              type: object
              required: [text]
              properties:
                text: { type: string }
components:
  schemas:
    Id: { type: integer }
    Widget:
      type: object
      required: [name]
      properties:
        id: { type: integer, readOnly: true }
        name: { type: string }
        tags: { type: array, items: { type: string } }
        price: { type: number }
    WidgetAlias:
      $ref: '#/components/schemas/Widget'
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_params_merge_and_override() {
        let spec = spec();
        let lookup = RefLookup::new(&spec);
        let item = &spec.paths["/api/widgets/{id}"];
        let put = &item.operations["put"];

        let fields = resolve_params(&item.parameters, &put.parameters, &lookup, "PUT");
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "verbose", "page"]);
        // operation-level id replaced the string one and resolved through $ref
        assert_eq!(fields[0].field_type, FieldType::Integer);
        assert_eq!(fields[0].location, Some(FieldLocation::Path));
        assert!(fields[0].required);
        assert_eq!(fields[1].field_type, FieldType::Boolean);
        assert!(!fields[1].required);
        assert_eq!(fields[2].field_type, FieldType::Any);
    }

    #[test]
    fn test_payload_single_hop() {
        let spec = spec();
        let lookup = RefLookup::new(&spec);
        let put = &spec.paths["/api/widgets/{id}"].operations["put"];

        let Payload::Record { schema, fields } =
            resolve_payload(put.request_body.as_ref(), &lookup, "PUT")
        else {
            panic!("expected a record payload");
        };
        assert_eq!(schema.as_deref(), Some("Widget"));
        let summary: Vec<_> = fields
            .iter()
            .map(|f| (f.name.as_str(), f.field_type, f.required, f.read_only))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("id", FieldType::Integer, false, true),
                ("name", FieldType::String, true, false),
                ("tags", FieldType::Array, false, false),
                ("price", FieldType::Any, false, false),
            ]
        );
    }

    #[test]
    fn test_payload_chain_is_opaque() {
        let spec = spec();
        let lookup = RefLookup::new(&spec);
        let patch = &spec.paths["/api/widgets/{id}"].operations["patch"];
        assert_eq!(
            resolve_payload(patch.request_body.as_ref(), &lookup, "PATCH"),
            Payload::Opaque
        );
    }

    #[test]
    fn test_inline_object_payload() {
        let spec = spec();
        let lookup = RefLookup::new(&spec);
        let post = &spec.paths["/api/widgets/{id}"].operations["post"];
        let payload = resolve_payload(post.request_body.as_ref(), &lookup, "POST");
        assert!(matches!(
            payload,
            Payload::Record { schema: None, ref fields } if fields.len() == 1 && fields[0].required
        ));
    }

    #[test]
    fn test_resolve_model_order() {
        let spec = spec();
        let lookup = RefLookup::new(&spec);
        let model = resolve_model(["Widgets", "Widget"], &lookup).unwrap();
        assert_eq!(model.name, "Widget");
        assert_eq!(model.fields.len(), 4);
        // an alias is a chain, not a model
        assert!(resolve_model(["WidgetAlias"], &lookup).is_none());
    }
}
