pub mod api_base;
pub mod client;
pub mod hooks;
pub mod layout;
pub mod pages;
pub mod types;

use minijinja::{AutoEscape, Environment};

const TEMPLATES: [(&str, &str); 10] = [
    ("api.ts.j2", include_str!("../../templates/api.ts.j2")),
    ("client.ts.j2", include_str!("../../templates/client.ts.j2")),
    ("types.ts.j2", include_str!("../../templates/types.ts.j2")),
    ("hooks.ts.j2", include_str!("../../templates/hooks.ts.j2")),
    ("List.tsx.j2", include_str!("../../templates/List.tsx.j2")),
    ("Create.tsx.j2", include_str!("../../templates/Create.tsx.j2")),
    ("Edit.tsx.j2", include_str!("../../templates/Edit.tsx.j2")),
    ("Dashboard.tsx.j2", include_str!("../../templates/Dashboard.tsx.j2")),
    ("form_items.tsx.j2", include_str!("../../templates/form_items.tsx.j2")),
    (
        "LayoutWithSidebar.tsx.j2",
        include_str!("../../templates/LayoutWithSidebar.tsx.j2"),
    ),
];

/// Build the template environment shared by every emitter.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("escape_jsdoc", escape_jsdoc);
    for (name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }
    Ok(env)
}

/// Keep a summary on one line and stop `*/` from closing the comment.
fn escape_jsdoc(value: String) -> String {
    value.replace("*/", "*\\/").replace(['\r', '\n'], " ")
}

/// A string literal safe to splice into TypeScript source.
pub(crate) fn ts_string(value: &str) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_loads_all_templates() {
        let env = environment().unwrap();
        for (name, _) in TEMPLATES {
            assert!(env.get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_escape_jsdoc() {
        assert_eq!(escape_jsdoc("a */ b\nc".to_string()), "a *\\/ b c");
    }
}
