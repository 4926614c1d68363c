use dashgen_core::ir::{
    ClassifiedOperation, Field, FieldLocation, Payload, ResourceGroup, UrlSegment, UrlTemplate,
};
use minijinja::{Environment, context};

use crate::type_mapper::{member_access, property_key};

/// Emit `api/<resource>.ts`: one exported async callable per operation.
pub fn emit_client(
    env: &Environment<'_>,
    resource: &ResourceGroup,
) -> Result<String, minijinja::Error> {
    let tmpl = env.get_template("client.ts.j2")?;

    let mut imported_types = Vec::new();
    let operations: Vec<minijinja::Value> = resource
        .operations
        .iter()
        .map(|op| build_operation(op, &mut imported_types))
        .collect();

    tmpl.render(context! {
        resource => resource.name.original.clone(),
        imported_types => imported_types,
        operations => operations,
    })
}

fn build_operation(
    op: &ClassifiedOperation,
    imported_types: &mut Vec<String>,
) -> minijinja::Value {
    let mut signature = Vec::new();

    if let Some(record) = op.params_record_name() {
        signature.push(format!("params: {record}"));
        imported_types.push(record);
    }
    match op.payload {
        Payload::None => {}
        Payload::Record { .. } => {
            if let Some(record) = op.payload_record_name() {
                signature.push(format!("payload: {record}"));
                imported_types.push(record);
            }
        }
        Payload::Opaque => signature.push("payload: any".to_string()),
    }

    let headers = op
        .params
        .iter()
        .filter(|p| p.location == Some(FieldLocation::Header));

    context! {
        name => op.function_name.clone(),
        summary => op.summary.clone(),
        http_method => op.method.as_lower(),
        signature => signature.join(", "),
        url => url_literal(&op.url),
        query_object => params_object(op.query_params()),
        header_object => params_object(headers),
        has_payload => op.has_payload(),
    }
}

/// A template literal with each `{param}` read from `params`.
pub fn url_literal(url: &UrlTemplate) -> String {
    let mut out = String::from("`");
    for segment in &url.segments {
        match segment {
            UrlSegment::Literal(text) => out.push_str(
                &text
                    .replace('\\', "\\\\")
                    .replace('`', "\\`")
                    .replace("${", "\\${"),
            ),
            UrlSegment::Param(name) => {
                out.push_str("${");
                out.push_str(&member_access("params", name));
                out.push('}');
            }
        }
    }
    out.push('`');
    out
}

/// `{ page: params.page, "x-id": params["x-id"] }`, or `None` when empty.
fn params_object<'a>(fields: impl Iterator<Item = &'a Field>) -> Option<String> {
    let entries: Vec<String> = fields
        .map(|f| format!("{}: {}", property_key(&f.name), member_access("params", &f.name)))
        .collect();
    if entries.is_empty() {
        None
    } else {
        Some(format!("{{ {} }}", entries.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_literal() {
        let url = UrlTemplate::parse("/api/foo/{id}/files/{file-name}");
        assert_eq!(
            url_literal(&url),
            "`/api/foo/${params.id}/files/${params[\"file-name\"]}`"
        );
        assert_eq!(url_literal(&UrlTemplate::parse("/api/foo")), "`/api/foo`");
    }

    #[test]
    fn test_url_literal_escapes_template_syntax() {
        let url = UrlTemplate::parse("/api/a`b$c");
        assert_eq!(url_literal(&url), "`/api/a\\`b$c`");
    }
}
