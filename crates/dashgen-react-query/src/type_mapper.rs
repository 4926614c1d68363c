use dashgen_core::ir::{Field, FieldType};
use dashgen_core::transform::name_normalizer::is_identifier;

/// Map a `FieldType` to its TypeScript type.
pub fn field_type_to_ts(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Integer => "number",
        FieldType::Boolean => "boolean",
        FieldType::String => "string",
        FieldType::Array => "any[]",
        FieldType::Any => "any",
    }
}

/// An object key: bare when it is an identifier, double-quoted otherwise.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("{name:?}")
    }
}

/// Property access on `object`: `params.id` or `params["x-id"]`.
pub fn member_access(object: &str, name: &str) -> String {
    if is_identifier(name) {
        format!("{object}.{name}")
    } else {
        format!("{object}[{name:?}]")
    }
}

/// An interface member declaration without the trailing `;`.
pub fn field_declaration(field: &Field) -> String {
    let optional = if field.required { "" } else { "?" };
    format!(
        "{}{}: {}",
        property_key(&field.name),
        optional,
        field_type_to_ts(field.field_type)
    )
}

/// A column or label title: first letter upper-cased.
pub fn title_case(name: &str) -> String {
    dashgen_core::transform::name_normalizer::capitalize_first(name)
}
