use dashgen_core::ir::DashboardSpec;
use minijinja::{Environment, context};

use super::ts_string;
use crate::type_mapper::title_case;

/// Emit `pages/LayoutWithSidebar.tsx`: a Dashboard entry, then one menu
/// entry per resource in resource order.
pub fn emit_layout(env: &Environment<'_>, spec: &DashboardSpec) -> Result<String, minijinja::Error> {
    let menu: Vec<minijinja::Value> = spec
        .resources
        .iter()
        .map(|r| {
            context! {
                key => ts_string(&r.name.original),
                path => ts_string(&format!("/{}", r.name.original)),
                title => title_case(&r.name.original),
            }
        })
        .collect();

    env.get_template("LayoutWithSidebar.tsx.j2")?
        .render(context! { menu => menu })
}
