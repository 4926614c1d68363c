pub mod operations;
pub mod types;

pub use operations::*;
pub use types::{DashboardSpec, IrInfo, ModelSchema, NormalizedName, ResourceGroup};
