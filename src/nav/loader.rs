//! Navigation document loading from disk.
//!
//! The file is read once and kept in two shapes: the raw tree handed to the
//! route collector and the typed `NavData` used for the menu itself.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::nav::node::ConfigNode;
use crate::nav::schema::NavData;

/// Errors that can occur while loading a navigation document.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported navigation file format: {0}")]
    UnsupportedFormat(String),
}

/// Document format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavFormat {
    Json,
    Toml,
}

impl NavFormat {
    pub fn from_path(path: &Path) -> Result<Self, NavError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(NavFormat::Json),
            "toml" => Ok(NavFormat::Toml),
            _ => Err(NavError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A loaded navigation document.
#[derive(Debug, Clone)]
pub struct NavDocument {
    /// Raw tree, keys in document order.
    pub tree: ConfigNode,
    pub data: NavData,
}

impl NavDocument {
    /// The built-in menu, used when no navigation file is configured.
    pub fn builtin() -> Self {
        let data = NavData::builtin();
        Self {
            tree: data.to_node(),
            data,
        }
    }

    /// Parse a document from text.
    pub fn parse(content: &str, format: NavFormat) -> Result<Self, NavError> {
        let tree = match format {
            NavFormat::Json => {
                ConfigNode::from(serde_json::from_str::<serde_json::Value>(content)?)
            }
            NavFormat::Toml => ConfigNode::from(toml::from_str::<toml::Value>(content)?),
        };
        let data = serde_json::from_value(tree.to_json())?;
        Ok(Self { tree, data })
    }

    /// Subtree stored under `key` at the document root.
    pub fn subtree(&self, key: &str) -> &ConfigNode {
        static NULL: ConfigNode = ConfigNode::Null;
        self.tree.get(key).unwrap_or(&NULL)
    }
}

/// Load a navigation document from a `.json` or `.toml` file.
pub fn load_nav(path: &Path) -> Result<NavDocument, NavError> {
    let format = NavFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    let doc = NavDocument::parse(&content, format)?;

    tracing::debug!(
        path = %path.display(),
        groups = doc.data.nav_main.len(),
        "Navigation document loaded"
    );
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML_NAV: &str = r#"
collapsible = "none"

[[navMain]]
title = "Media"
url = { path = "/media", redirect = "/media/list" }

[[navMain.items]]
title = "List"
url = "/media/list"
"#;

    #[test]
    fn test_parse_toml_document() {
        let doc = NavDocument::parse(TOML_NAV, NavFormat::Toml).unwrap();
        assert_eq!(doc.data.nav_main.len(), 1);
        assert_eq!(doc.data.nav_main[0].items[0].url, ConfigNode::from("/media/list"));
        assert!(doc.subtree("navMain").is_composite());
        assert!(doc.subtree("missing").is_null());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(NavFormat::from_path(Path::new("nav.JSON")).unwrap(), NavFormat::Json);
        assert_eq!(NavFormat::from_path(Path::new("nav.toml")).unwrap(), NavFormat::Toml);
        assert!(matches!(
            NavFormat::from_path(Path::new("nav.yaml")),
            Err(NavError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_schema_mismatch_is_reported() {
        let err = NavDocument::parse(r#"{"navMain": [{"url": "/x"}]}"#, NavFormat::Json).unwrap_err();
        assert!(matches!(err, NavError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nav.toml");
        std::fs::write(&path, TOML_NAV).unwrap();
        let doc = load_nav(&path).unwrap();
        assert_eq!(doc.data.nav_main[0].title, "Media");
    }
}
