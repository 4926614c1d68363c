use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

/// Top-level project configuration loaded from `.dashgen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashgenConfig {
    pub input: String,
    pub output: String,
    /// Path prefix whose first following segment names a resource.
    pub resource_prefix: String,
    pub naming: NamingConfig,
    pub client: ClientConfig,
    pub hooks: HooksConfig,
    pub pages: PagesConfig,
}

impl Default for DashgenConfig {
    fn default() -> Self {
        Self {
            input: "./schema.yaml".to_string(),
            output: "./src".to_string(),
            resource_prefix: "/api".to_string(),
            naming: NamingConfig::default(),
            client: ClientConfig::default(),
            hooks: HooksConfig::default(),
            pages: PagesConfig::default(),
        }
    }
}

/// Naming strategy and aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub strategy: NamingStrategy,
    /// Map from raw operation name (operationId or fallback) to a replacement.
    pub aliases: IndexMap<String, String>,
}

/// How raw operation names are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// `operationId`, else `<verb><LastSegment>`.
    #[default]
    UseOperationId,
    /// Bucket-style names derived from verb and path shape.
    UseRouteBased,
}

/// Options for the generated HTTP client base.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
        }
    }
}

/// Options for the generated data-binding hooks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Query `staleTime` in milliseconds.
    pub stale_time: u64,
    /// Show toast notifications on mutation success and failure.
    pub notifications: bool,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            stale_time: 300_000,
            notifications: false,
        }
    }
}

/// Options for the generated pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Emit the all-in-one `Dashboard.tsx` for resources with a model schema.
    pub dashboard: bool,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self { dashboard: true }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".dashgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<DashgenConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: DashgenConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# dashgen configuration
input: ./schema.yaml
output: ./src
resource_prefix: /api     # paths must look like <prefix>/<resource>/...

naming:
  strategy: use_operation_id  # use_operation_id | use_route_based
  aliases: {}
    # getWidgetStats: listWidgetStats   # raw name -> replacement

client:
  base_url: /

hooks:
  stale_time: 300000
  notifications: false    # react-toastify toasts on mutations

pages:
  dashboard: true         # all-in-one Dashboard.tsx when a model schema exists
"#
}
