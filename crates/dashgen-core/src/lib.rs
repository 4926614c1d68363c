pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

/// A generated file with a path relative to the output root and its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for front-end renderers that produce files from a classified spec.
///
/// Classification lives in this crate; everything framework-specific lives
/// behind this trait.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;

    fn generate(
        &self,
        spec: &ir::DashboardSpec,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
