use dashgen_core::ir::{Bucket, Field, FieldType, ResourceGroup};
use minijinja::{Environment, context};

use super::hooks::{binding_entry, hook_name, id_type, scope_type_name};
use super::ts_string;
use crate::type_mapper::title_case;

/// A page template rendered per resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    List,
    Create,
    Edit,
    Dashboard,
}

impl Page {
    /// Pages every resource gets, model or not.
    pub const SCAFFOLDS: [Page; 3] = [Page::List, Page::Create, Page::Edit];

    pub fn file_stem(&self) -> &'static str {
        match self {
            Page::List => "List",
            Page::Create => "Create",
            Page::Edit => "Edit",
            Page::Dashboard => "Dashboard",
        }
    }

    fn template_name(&self) -> &'static str {
        match self {
            Page::List => "List.tsx.j2",
            Page::Create => "Create.tsx.j2",
            Page::Edit => "Edit.tsx.j2",
            Page::Dashboard => "Dashboard.tsx.j2",
        }
    }

    /// Bindings the page destructures from the hook, when the resource has them.
    fn bindings(&self) -> &'static [Bucket] {
        match self {
            Page::List => &[Bucket::List, Bucket::Delete],
            Page::Create => &[Bucket::Create],
            Page::Edit => &[Bucket::Retrieve, Bucket::Update],
            Page::Dashboard => &[Bucket::List, Bucket::Create, Bucket::Update, Bucket::Delete],
        }
    }
}

/// Emit `pages/<resource>/<Page>.tsx`.
pub fn emit_page(
    env: &Environment<'_>,
    resource: &ResourceGroup,
    page: Page,
) -> Result<String, minijinja::Error> {
    let tmpl = env.get_template(page.template_name())?;

    let has = |bucket: Bucket| resource.binding(bucket).is_some();
    let has_create = has(Bucket::Create);
    let has_update = has(Bucket::Update);
    let has_delete = has(Bucket::Delete);
    let has_retrieve = has(Bucket::Retrieve);

    let model_fields: &[Field] = resource
        .model
        .as_ref()
        .map(|m| m.fields.as_slice())
        .unwrap_or_default();
    let form_fields: Vec<&Field> = model_fields.iter().filter(|f| !f.read_only).collect();

    let destructured: Vec<String> = page
        .bindings()
        .iter()
        .copied()
        .filter(|b| has(*b))
        .map(binding_entry)
        .collect();

    let numeric_id = id_type(resource) == "number";
    let route_id = if numeric_id {
        "id ? Number(id) : null"
    } else {
        "id ?? null"
    };
    let id_value = if numeric_id { "Number(id)" } else { "id as string" };

    // nested resources take the values their hook needs as a `scope` prop
    let scope_type = scope_type_name(resource);
    let props = scope_type
        .as_ref()
        .map(|t| format!("{{ scope }}: {{ scope: {t} }}"))
        .unwrap_or_default();
    let hook_args = match (page, scope_type.is_some()) {
        (Page::Edit, true) => format!("scope, {route_id}"),
        (Page::Edit, false) => route_id.to_string(),
        (_, true) => "scope".to_string(),
        (_, false) => String::new(),
    };

    let update_payload = resource
        .binding(Bucket::Update)
        .is_some_and(|op| op.has_payload());
    let create_payload = resource
        .binding(Bucket::Create)
        .is_some_and(|op| op.has_payload());

    tmpl.render(context! {
        resource => resource.name.original.clone(),
        pascal => resource.name.pascal_case.clone(),
        component => format!("{}{}", resource.name.pascal_case, page.file_stem()),
        hook_name => hook_name(resource),
        hook_args => hook_args,
        scope_type => scope_type,
        props => props,
        destructured => destructured,
        antd_imports => antd_imports(page, &form_fields, has_create, has_update, has_delete),
        columns => model_fields.iter().map(column).collect::<Vec<_>>(),
        form_items => form_fields.iter().map(|f| form_item(f)).collect::<Vec<_>>(),
        has_create => has_create,
        has_update => has_update,
        has_delete => has_delete,
        has_retrieve => has_retrieve,
        create_variables => if create_payload { "values" } else { "undefined" },
        edit_update_variables => update_variables(id_value, update_payload),
        dashboard_update_variables => update_variables("editItem.id", update_payload),
    })
}

fn update_variables(id: &str, with_payload: bool) -> String {
    if with_payload {
        format!("{{ id: {id}, payload: values }}")
    } else {
        format!("{{ id: {id} }}")
    }
}

fn column(field: &Field) -> minijinja::Value {
    context! {
        title => ts_string(&title_case(&field.name)),
        key => ts_string(&field.name),
    }
}

fn form_item(field: &Field) -> minijinja::Value {
    context! {
        label => ts_string(&title_case(&field.name)),
        name => ts_string(&field.name),
        input => input_component(field.field_type),
        checkbox => field.field_type == FieldType::Boolean,
        required_message => field
            .required
            .then(|| ts_string(&format!("Please input {}!", field.name))),
    }
}

/// The antd input for a field: a switch for booleans, a number box for
/// integers, a text box otherwise.
pub fn input_component(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Boolean => "Switch",
        FieldType::Integer => "InputNumber",
        _ => "Input",
    }
}

fn antd_imports(
    page: Page,
    form_fields: &[&Field],
    has_create: bool,
    has_update: bool,
    has_delete: bool,
) -> Vec<&'static str> {
    let mut imports = match page {
        Page::List => {
            let mut list = vec!["Table"];
            if has_create || has_delete {
                list.push("Button");
            }
            if has_delete {
                list.push("Popconfirm");
            }
            if has_update || has_delete {
                list.push("Space");
            }
            list
        }
        Page::Create => vec!["Button", "Form"],
        Page::Edit => vec!["Button", "Form"],
        Page::Dashboard => {
            let mut list = vec!["Button", "Form", "Modal", "Table"];
            if has_delete {
                list.push("Popconfirm");
            }
            if has_update || has_delete {
                list.push("Space");
            }
            list
        }
    };

    if page != Page::List {
        imports.extend(form_fields.iter().map(|f| input_component(f.field_type)));
    }
    imports.sort_unstable();
    imports.dedup();
    imports
}
