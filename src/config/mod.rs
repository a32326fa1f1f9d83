pub mod backend;
#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use backend::{BackendSettings, StorageAccess};
#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::{AppConfig, BackendConfig, CollectionsConfig, LogFormat};
