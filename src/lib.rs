pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{AppConfig, BackendSettings};
pub use crate::core::{
    bootstrap::{AdminApp, AdminBootstrap},
    entity_page::EntityPageLoader,
};
pub use crate::utils::error::{PageError, Result};
pub use crate::web::{router, AppState, HtmlPageRenderer};
