pub mod cli;
pub mod config;
pub mod envs;
pub mod extract;
pub mod logging;
pub mod placeholders;
pub mod report;
pub mod resolve;
pub mod variant;

// Convenience re-exports
pub use config::ProjectConfig;
pub use envs::list_environments;
pub use extract::{get_bool, get_f64, get_i64, get_str, get_string};
pub use placeholders::Placeholders;
pub use resolve::{ConfigMap, ConfigResolver, Resolution, ResolveError};
pub use variant::VariantBuild;
