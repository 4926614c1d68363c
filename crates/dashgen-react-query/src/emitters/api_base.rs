use minijinja::{Environment, context};

use super::ts_string;
use crate::generator::ReactQueryConfig;

/// Emit `utils/api.ts`: the shared axios instance.
pub fn emit_api_base(
    env: &Environment<'_>,
    config: &ReactQueryConfig,
) -> Result<String, minijinja::Error> {
    env.get_template("api.ts.j2")?.render(context! {
        base_url => ts_string(&config.base_url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitters::environment;

    #[test]
    fn test_base_url() {
        let env = environment().unwrap();
        let config = ReactQueryConfig {
            base_url: "https://example.com/v1".to_string(),
            ..ReactQueryConfig::default()
        };
        let out = emit_api_base(&env, &config).unwrap();
        assert!(out.contains("import axios from \"axios\";"));
        assert!(out.contains("baseURL: \"https://example.com/v1\","));
        assert!(out.ends_with("export default instance;\n"));
    }
}
