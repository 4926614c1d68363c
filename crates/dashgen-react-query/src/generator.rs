use dashgen_core::config::DashgenConfig;
use dashgen_core::ir::DashboardSpec;
use dashgen_core::{CodeGenerator, GeneratedFile};
use thiserror::Error;

use crate::emitters;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
}

/// Rendering options for the React Query front-end.
#[derive(Debug, Clone)]
pub struct ReactQueryConfig {
    /// `baseURL` of the shared axios instance.
    pub base_url: String,
    /// Query `staleTime` in milliseconds.
    pub stale_time: u64,
    /// Wire react-toastify toasts into every mutation.
    pub notifications: bool,
    /// Emit `Dashboard.tsx` for resources with a model schema.
    pub dashboard: bool,
}

impl Default for ReactQueryConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            stale_time: 300_000,
            notifications: false,
            dashboard: true,
        }
    }
}

impl From<&DashgenConfig> for ReactQueryConfig {
    fn from(config: &DashgenConfig) -> Self {
        Self {
            base_url: config.client.base_url.clone(),
            stale_time: config.hooks.stale_time,
            notifications: config.hooks.notifications,
            dashboard: config.pages.dashboard,
        }
    }
}

/// React + TanStack Query + antd generator.
///
/// Produces the shared axios instance, then per resource the client module,
/// record types, hook, and pages, then the sidebar layout.
pub struct ReactQueryGenerator;

impl CodeGenerator for ReactQueryGenerator {
    type Config = ReactQueryConfig;
    type Error = GeneratorError;

    fn generate(
        &self,
        spec: &DashboardSpec,
        config: &ReactQueryConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let env = emitters::environment()?;

        let mut files = vec![GeneratedFile {
            path: "utils/api.ts".to_string(),
            content: emitters::api_base::emit_api_base(&env, config)?,
        }];

        for resource in &spec.resources {
            let name = &resource.name.original;
            let pascal = &resource.name.pascal_case;

            files.push(GeneratedFile {
                path: format!("api/{name}.ts"),
                content: emitters::client::emit_client(&env, resource)?,
            });
            files.push(GeneratedFile {
                path: format!("types/{name}.ts"),
                content: emitters::types::emit_types(&env, resource)?,
            });
            files.push(GeneratedFile {
                path: format!("hooks/use{pascal}.ts"),
                content: emitters::hooks::emit_hooks(&env, resource, config)?,
            });

            for page in emitters::pages::Page::SCAFFOLDS {
                files.push(GeneratedFile {
                    path: format!("pages/{name}/{}.tsx", page.file_stem()),
                    content: emitters::pages::emit_page(&env, resource, page)?,
                });
            }

            match resource.model {
                Some(_) if config.dashboard => files.push(GeneratedFile {
                    path: format!("pages/{name}/Dashboard.tsx"),
                    content: emitters::pages::emit_page(
                        &env,
                        resource,
                        emitters::pages::Page::Dashboard,
                    )?,
                }),
                Some(_) => {}
                None => log::debug!("{name}: no model schema, Dashboard.tsx not emitted"),
            }
        }

        files.push(GeneratedFile {
            path: "pages/LayoutWithSidebar.tsx".to_string(),
            content: emitters::layout::emit_layout(&env, spec)?,
        });

        Ok(files)
    }
}
