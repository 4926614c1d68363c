use dashgen_core::ir::{Bucket, ClassifiedOperation, Field, FieldType, Payload, ResourceGroup};
use minijinja::{Environment, context};

use super::ts_string;
use crate::generator::ReactQueryConfig;
use crate::type_mapper::{member_access, property_key};

/// Emit `hooks/use<Resource>.ts`: a query or mutation for every classified
/// operation.
///
/// The first operation of a bucket is returned under the bucket's name; later
/// ones get a numbered key (`create2`). Every mutation invalidates the list key.
pub fn emit_hooks(
    env: &Environment<'_>,
    resource: &ResourceGroup,
    config: &ReactQueryConfig,
) -> Result<String, minijinja::Error> {
    let tmpl = env.get_template("hooks.ts.j2")?;
    let id_type = id_type(resource);
    let scope_type = scope_type_name(resource);

    let mut imports = Imports::default();
    if let Some(ref name) = scope_type {
        imports.types.push(name.clone());
    }

    let mut queries = Vec::new();
    let mut mutations = Vec::new();
    let mut returned = Vec::new();
    for bucket in Bucket::ALL {
        for (n, op) in resource.operations_in(bucket).enumerate() {
            let (variable, entry) = binding_names(bucket, n);
            match bucket {
                Bucket::List | Bucket::Retrieve => {
                    queries.push(build_query(resource, bucket, n, &variable, op, &mut imports))
                }
                _ => mutations.push(build_mutation(bucket, &variable, op, &id_type, &mut imports)),
            }
            returned.push(entry);
        }
    }

    let mut query_imports = Vec::new();
    if !queries.is_empty() {
        query_imports.push("useQuery");
    }
    if !mutations.is_empty() {
        query_imports.extend(["useMutation", "useQueryClient"]);
    }

    tmpl.render(context! {
        resource => resource.name.original.clone(),
        pascal => resource.name.pascal_case.clone(),
        hook_name => hook_name(resource),
        id_type => id_type,
        scope_type => scope_type,
        list_key => ts_string(&resource.list_cache_key()),
        stale_time => config.stale_time,
        notifications => config.notifications,
        query_imports => query_imports,
        api_imports => imports.functions,
        type_imports => imports.types,
        queries => queries,
        mutations => mutations,
        returned => returned,
    })
}

/// `use<Pascal>`, the hook every page of the resource calls.
pub fn hook_name(resource: &ResourceGroup) -> String {
    format!("use{}", resource.name.pascal_case)
}

/// The return entry of a bucket's first operation, the one pages bind.
pub fn binding_entry(bucket: Bucket) -> String {
    binding_names(bucket, 0).1
}

/// Local variable and return entry for the `n`th operation of a bucket.
/// `delete` is a reserved word, so its local is `remove`.
fn binding_names(bucket: Bucket, n: usize) -> (String, String) {
    let suffix = if n == 0 { String::new() } else { (n + 1).to_string() };
    let key = format!("{}{suffix}", bucket.as_str());
    match bucket {
        Bucket::Delete => {
            let variable = format!("remove{suffix}");
            let entry = format!("{key}: {variable}");
            (variable, entry)
        }
        _ => (key.clone(), key),
    }
}

/// `<Pascal>Scope` when some bound operation needs values besides the id.
pub(crate) fn scope_type_name(resource: &ResourceGroup) -> Option<String> {
    (!scope_fields(resource).is_empty()).then(|| format!("{}Scope", resource.name.pascal_case))
}

/// Required parameters the hook cannot fill from `id`, merged by name across
/// every classified operation. A name declared with conflicting types is `any`.
pub(crate) fn scope_fields(resource: &ResourceGroup) -> Vec<Field> {
    let mut scope: Vec<Field> = Vec::new();
    for op in &resource.operations {
        let Some(bucket) = op.bucket else {
            continue;
        };
        let id = id_param(op, bucket);
        for param in op.params.iter().filter(|p| p.required && Some(*p) != id) {
            match scope.iter_mut().find(|s| s.name == param.name) {
                Some(field) if field.field_type != param.field_type => {
                    field.field_type = FieldType::Any
                }
                Some(_) => {}
                None => scope.push(Field {
                    location: None,
                    ..param.clone()
                }),
            }
        }
    }
    scope
}

/// The parameter `id` fills: the last path parameter of a retrieve, update or
/// delete operation.
fn id_param(op: &ClassifiedOperation, bucket: Bucket) -> Option<&Field> {
    match bucket {
        Bucket::Retrieve | Bucket::Update | Bucket::Delete => op.last_path_param(),
        Bucket::List | Bucket::Create => None,
    }
}

#[derive(Default)]
struct Imports {
    functions: Vec<String>,
    types: Vec<String>,
}

impl Imports {
    /// A call of `op`, recording imports.
    ///
    /// The params object fills the id parameter from `id` and every other
    /// required parameter from `scope`. Optional parameters are left out, so
    /// the object type-checks against the record without a cast.
    fn call(
        &mut self,
        op: &ClassifiedOperation,
        id: Option<(&Field, &str)>,
        payload: Option<&str>,
    ) -> String {
        self.functions.push(op.function_name.clone());

        let mut args = Vec::new();
        if op.params_record_name().is_some() {
            let entries: Vec<String> = op
                .params
                .iter()
                .filter_map(|p| match id {
                    Some((field, value)) if field == p => Some(object_entry(&p.name, value)),
                    _ if p.required => Some(object_entry(&p.name, &member_access("scope", &p.name))),
                    _ => None,
                })
                .collect();
            args.push(if entries.is_empty() {
                "{}".to_string()
            } else {
                format!("{{ {} }}", entries.join(", "))
            });
        }
        if let Some(payload) = payload {
            args.push(payload.to_string());
        }

        format!("{}({})", op.function_name, args.join(", "))
    }

    fn payload_type(&mut self, op: &ClassifiedOperation) -> Option<String> {
        match op.payload {
            Payload::None => None,
            Payload::Opaque => Some("any".to_string()),
            Payload::Record { .. } => {
                let record = op.payload_record_name()?;
                self.types.push(record.clone());
                Some(record)
            }
        }
    }
}

/// `id` when key and value match, `shopId: scope.shopId` otherwise.
fn object_entry(name: &str, value: &str) -> String {
    let key = property_key(name);
    if key == value {
        key
    } else {
        format!("{key}: {value}")
    }
}

fn build_query(
    resource: &ResourceGroup,
    bucket: Bucket,
    n: usize,
    variable: &str,
    op: &ClassifiedOperation,
    imports: &mut Imports,
) -> minijinja::Value {
    // later queries of a bucket extend the first key, so list invalidation still reaches them
    let extra = if n == 0 {
        String::new()
    } else {
        format!(", {}", ts_string(&op.function_name))
    };

    let (key, call, enabled) = match bucket {
        Bucket::List => (
            format!("[{}{extra}]", ts_string(&resource.list_cache_key())),
            imports.call(op, None, None),
            "enabled",
        ),
        _ => (
            format!(
                "[{}, id{extra}]",
                ts_string(&format!("view{}", resource.name.pascal_case))
            ),
            imports.call(op, id_param(op, bucket).map(|f| (f, "id!")), None),
            "enabled: enabled && id !== null",
        ),
    };

    context! {
        variable => variable,
        key => key,
        call => call,
        enabled => enabled,
    }
}

fn build_mutation(
    bucket: Bucket,
    variable: &str,
    op: &ClassifiedOperation,
    id_type: &str,
    imports: &mut Imports,
) -> minijinja::Value {
    let payload_type = imports.payload_type(op);
    let payload_arg = payload_type.as_ref().map(|_| "payload");
    let id = id_param(op, bucket).map(|f| (f, "id"));

    let (past_tense, verb, signature, call) = match bucket {
        Bucket::Create => (
            "created",
            "create",
            match payload_type {
                Some(ref t) => format!("(payload: {t})"),
                None => "()".to_string(),
            },
            imports.call(op, None, payload_arg),
        ),
        Bucket::Update => (
            "updated",
            "update",
            match payload_type {
                Some(ref t) => format!("({{ id, payload }}: {{ id: {id_type}; payload: {t} }})"),
                None => format!("({{ id }}: {{ id: {id_type} }})"),
            },
            imports.call(op, id, payload_arg),
        ),
        _ => (
            "deleted",
            "delete",
            format!("(id: {id_type})"),
            imports.call(op, id, None),
        ),
    };

    context! {
        variable => variable,
        past_tense => past_tense,
        verb => verb,
        signature => signature,
        call => call,
    }
}

/// TypeScript type of the hook's `id` argument, taken from the id parameter
/// of the retrieve, update or delete operation.
pub(crate) fn id_type(resource: &ResourceGroup) -> String {
    let field_type = [Bucket::Retrieve, Bucket::Update, Bucket::Delete]
        .into_iter()
        .flat_map(move |b| resource.operations_in(b).map(move |op| (op, b)))
        .find_map(|(op, b)| id_param(op, b))
        .map(|p| p.field_type);

    match field_type {
        Some(FieldType::Integer) => "number",
        Some(FieldType::String) => "string",
        _ => "string | number",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use dashgen_core::parse;
    use dashgen_core::transform::{self, TransformOptions};

    use super::*;
    use crate::emitters::environment;

    fn resource(yaml: &str) -> ResourceGroup {
        let spec = parse::from_yaml(yaml).unwrap();
        let mut ir = transform::transform(&spec, &TransformOptions::default()).unwrap();
        ir.resources.remove(0)
    }

    #[test]
    fn test_unclassified_only_resource() {
        let reports = resource(
            r#"
openapi: 3.0.3
info: { title: T, version: "1" }
paths:
  /api/reports:
    post: { operationId: exportReports }
"#,
        );
        let env = environment().unwrap();
        let out = emit_hooks(&env, &reports, &ReactQueryConfig::default()).unwrap();

        assert!(!out.contains("@tanstack/react-query"));
        assert!(!out.contains("../api/reports"));
        assert!(out.contains(
            "export const useReports = (id: string | number | null = null, enabled = true) => {"
        ));
    }

    #[test]
    fn test_path_param_not_named_id() {
        let tags = resource(
            r#"
openapi: 3.0.3
info: { title: T, version: "1" }
paths:
  /api/tags/{slug}:
    get:
      operationId: retrieveTags
      parameters:
        - { name: slug, in: path, required: true, schema: { type: string } }
    delete:
      operationId: deleteTags
      parameters:
        - { name: slug, in: path, required: true, schema: { type: string } }
"#,
        );
        let env = environment().unwrap();
        let out = emit_hooks(&env, &tags, &ReactQueryConfig::default()).unwrap();

        assert!(out.contains("queryFn: () => retrieveTagsTags({ slug: id! }),"));
        assert!(out.contains("mutationFn: (id: string) => deleteTagsTags({ slug: id }),"));
    }

    #[test]
    fn test_every_write_invalidates_the_list() {
        let widgets = resource(
            r#"
openapi: 3.0.3
info: { title: T, version: "1" }
paths:
  /api/widgets:
    post: { operationId: createWidgets }
  /api/widgets/bulk:
    post: { operationId: createBulk }
  /api/widgets/{id}:
    parameters:
      - { name: id, in: path, required: true, schema: { type: integer } }
    delete: { operationId: deleteWidgets }
    patch: { operationId: destroyWidgets }
"#,
        );
        let env = environment().unwrap();
        let out = emit_hooks(&env, &widgets, &ReactQueryConfig::default()).unwrap();

        assert!(out.contains("const create = useMutation({\n    mutationFn: () => createWidgetsWidgets(),"));
        assert!(out.contains("const create2 = useMutation({\n    mutationFn: () => createBulkWidgets(),"));
        assert!(out.contains("const remove2 = useMutation({\n    mutationFn: (id: number) => destroyWidgetsWidgets({ id }),"));
        assert_eq!(out.matches("useMutation({").count(), 4);
        assert_eq!(out.matches("onSuccess: () => onMutationSuccess(").count(), 4);
        assert!(out.contains("queryClient.invalidateQueries({ queryKey: [\"widgetss\"] });"));
        assert!(out.contains("    create,\n    create2,\n    delete: remove,\n    delete2: remove2,\n"));
    }

    #[test]
    fn test_second_list_query_shares_the_list_key_prefix() {
        let widgets = resource(
            r#"
openapi: 3.0.3
info: { title: T, version: "1" }
paths:
  /api/widgets:
    get: { operationId: listWidgets }
  /api/widgets/archived:
    get: { operationId: listArchived }
"#,
        );
        let env = environment().unwrap();
        let out = emit_hooks(&env, &widgets, &ReactQueryConfig::default()).unwrap();

        assert!(out.contains("queryKey: [\"widgetss\"],"));
        assert!(out.contains("queryKey: [\"widgetss\", \"listArchivedWidgets\"],"));
        assert!(out.contains("    list,\n    list2,\n"));
    }

    #[test]
    fn test_scope_collects_required_params_besides_the_id() {
        let shops = resource(
            r#"
openapi: 3.0.3
info: { title: T, version: "1" }
paths:
  /api/shops/{shopId}/items/{itemId}:
    parameters:
      - { name: shopId, in: path, required: true, schema: { type: integer } }
      - { name: itemId, in: path, required: true, schema: { type: string } }
    get:
      operationId: retrieveItem
      parameters:
        - { name: x-tenant, in: header, required: true, schema: { type: string } }
        - { name: expand, in: query, schema: { type: boolean } }
"#,
        );
        let names: Vec<_> = scope_fields(&shops).into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["shopId", "x-tenant"]);
        assert_eq!(id_type(&shops), "string");

        let env = environment().unwrap();
        let out = emit_hooks(&env, &shops, &ReactQueryConfig::default()).unwrap();
        assert!(out.contains(
            "retrieveItemShops({ shopId: scope.shopId, itemId: id!, \"x-tenant\": scope[\"x-tenant\"] })"
        ));
    }

    #[test]
    fn test_binding_entries() {
        let entries: Vec<_> = Bucket::ALL.into_iter().map(binding_entry).collect();
        assert_eq!(
            entries,
            vec!["list", "retrieve", "create", "update", "delete: remove"]
        );
    }
}
