//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for navdesk.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Application paths and run mode.
    pub app: AppSection,

    /// Navigation source and route table settings.
    pub routing: RoutingConfig,

    /// External script invocation.
    pub processor: ProcessorConfig,

    /// File selection defaults.
    pub selection: SelectionConfig,

    /// Local resource URI scheme.
    pub protocol: ProtocolConfig,

    pub logging: LoggingConfig,
}

/// Application paths and run mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppSection {
    /// Project root; scripts live under `src/pythons` in development.
    pub app_root: PathBuf,

    /// Bundled resources; scripts live under `pythons` when packaged.
    pub resources_dir: PathBuf,

    /// Set while running against a UI dev server. Presence selects development mode.
    pub dev_server_url: Option<String>,

    /// Writable directory handed to scripts. Defaults to `<data_local_dir>/navdesk`.
    pub user_data_dir: Option<PathBuf>,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            app_root: PathBuf::from("."),
            resources_dir: PathBuf::from("resources"),
            dev_server_url: None,
            user_data_dir: None,
        }
    }
}

impl AppSection {
    pub fn is_dev(&self) -> bool {
        self.dev_server_url.is_some()
    }

    /// Resolved user data directory.
    pub fn user_data_dir(&self) -> PathBuf {
        self.user_data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("navdesk")
        })
    }
}

/// Navigation source and route table settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Navigation document (`.json` / `.toml`). Built-in menu when unset.
    pub nav_file: Option<PathBuf>,

    /// Root key of the subtree routes are collected from.
    pub nav_root: String,

    /// Target of the `/` redirect appended to the table.
    pub default_redirect: Option<String>,

    /// Maximum nesting accepted when collecting from a loaded file.
    pub max_depth: usize,

    /// Reload the navigation file when it changes.
    pub watch: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            nav_file: None,
            nav_root: "navMain".to_string(),
            default_redirect: Some("/auto/video".to_string()),
            max_depth: 64,
            watch: false,
        }
    }
}

/// External script invocation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Interpreter executable.
    pub interpreter: String,

    /// Arguments placed before the script path.
    pub interpreter_args: Vec<String>,

    /// Explicit script; overrides the dev/packaged lookup.
    pub script_path: Option<PathBuf>,

    /// Kill the script after this many seconds (0 = no limit).
    pub timeout_secs: u64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            interpreter: "python".to_string(),
            interpreter_args: vec!["-u".to_string()],
            script_path: None,
            timeout_secs: 0,
        }
    }
}

/// Extension filter for file selection.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn media() -> Self {
        Self {
            name: "Media".to_string(),
            extensions: ["mp4", "mkv", "jpg", "png"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// File selection defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub multi_select: bool,

    /// `None` accepts any file.
    pub filter: Option<FileFilter>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            multi_select: false,
            filter: Some(FileFilter::media()),
        }
    }
}

/// Local resource URI scheme.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProtocolConfig {
    pub scheme: String,

    /// When set, resources outside this directory are refused.
    pub root: Option<PathBuf>,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            scheme: "local-resource".to_string(),
            root: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "navdesk=info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.routing.nav_root, "navMain");
        assert_eq!(config.routing.default_redirect.as_deref(), Some("/auto/video"));
        assert_eq!(config.processor.interpreter_args, vec!["-u".to_string()]);
        assert_eq!(config.selection.filter, Some(FileFilter::media()));
        assert!(!config.app.is_dev());
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [app]
            dev_server_url = "http://localhost:5173"

            [processor]
            interpreter = "python3"
            timeout_secs = 30

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert!(config.app.is_dev());
        assert_eq!(config.processor.interpreter, "python3");
        assert_eq!(config.processor.interpreter_args, vec!["-u".to_string()]);
        assert_eq!(config.processor.timeout_secs, 30);
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
