use dashgen_core::ir::{Field, Payload, ResourceGroup};
use dashgen_core::transform::name_normalizer::normalize_name;
use minijinja::{Environment, context};

use super::hooks::{scope_fields, scope_type_name};
use crate::type_mapper::field_declaration;

/// Emit `types/<resource>.ts`: the model interface, every params and payload
/// record in operation order, then the hook scope if there is one.
pub fn emit_types(
    env: &Environment<'_>,
    resource: &ResourceGroup,
) -> Result<String, minijinja::Error> {
    let tmpl = env.get_template("types.ts.j2")?;

    let mut records = Vec::new();
    for op in &resource.operations {
        if let Some(name) = op.params_record_name() {
            records.push(record(name, &op.params));
        }
        if let (Some(name), Payload::Record { fields, .. }) = (op.payload_record_name(), &op.payload)
        {
            records.push(record(name, fields));
        }
    }

    if let Some(name) = scope_type_name(resource) {
        records.push(record(name, &scope_fields(resource)));
    }

    let model = resource
        .model
        .as_ref()
        .map(|m| record(model_type_name(&m.name), &m.fields));

    tmpl.render(context! {
        model => model,
        records => records,
    })
}

/// TypeScript name of a model interface.
pub fn model_type_name(schema_name: &str) -> String {
    normalize_name(schema_name).pascal_case
}

fn record(name: String, fields: &[Field]) -> minijinja::Value {
    let fields: Vec<String> = fields.iter().map(field_declaration).collect();
    context! { name => name, fields => fields }
}
