//! navdesk: backend of a desktop media-processing tool.
//!
//! Derives the UI route table from the navigation menu, hands selected media
//! files to an external script and streams its output back.

pub mod config;
pub mod ipc;
pub mod lifecycle;
pub mod media;
pub mod nav;
pub mod observability;
pub mod processing;
pub mod protocol;
pub mod routing;

pub use config::schema::AppConfig;
pub use ipc::IpcHost;
pub use lifecycle::Shutdown;
pub use nav::NavDocument;
pub use routing::{LiveRoutes, RouteTable};

use std::path::Path;

/// Load the configured navigation document, or the built-in menu.
pub fn load_navigation(config: &AppConfig) -> Result<NavDocument, nav::NavError> {
    match config.routing.nav_file.as_deref() {
        Some(path) => nav::load_nav(path),
        None => Ok(NavDocument::builtin()),
    }
}

/// Load config (or defaults) from an optional path.
pub fn load_app_config(path: Option<&Path>) -> Result<AppConfig, config::ConfigError> {
    config::load_or_default(path)
}
