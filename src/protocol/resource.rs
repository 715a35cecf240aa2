//! Local resource URI scheme.
//!
//! Maps `<scheme>:///absolute/path` URIs onto local files so the UI can load
//! media it cannot reach directly. With a configured root, the URI path is
//! taken relative to that root and anything escaping it is refused.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProtocolConfig;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Malformed resource URI {uri}: {reason}")]
    Malformed { uri: String, reason: String },

    #[error("Expected scheme {expected}, got {actual}")]
    WrongScheme { expected: String, actual: String },

    #[error("Resource outside allowed root: {0}")]
    Forbidden(PathBuf),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A file served through the resource scheme.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub path: PathBuf,
    pub mime: &'static str,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ResourceHandler {
    scheme: String,
    root: Option<PathBuf>,
}

impl ResourceHandler {
    pub fn new(config: &ProtocolConfig) -> Self {
        Self {
            scheme: config.scheme.clone(),
            root: config.root.clone(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Translate a resource URI into a local path.
    pub fn resolve(&self, uri: &str) -> Result<PathBuf, ResourceError> {
        let malformed = |reason: String| ResourceError::Malformed {
            uri: uri.to_string(),
            reason,
        };

        let url = Url::parse(uri).map_err(|e| malformed(e.to_string()))?;
        if url.scheme() != self.scheme {
            return Err(ResourceError::WrongScheme {
                expected: self.scheme.clone(),
                actual: url.scheme().to_string(),
            });
        }

        // `scheme://home/x` puts the first segment in the host slot.
        let encoded = match url.host_str().filter(|h| !h.is_empty()) {
            Some(host) => format!("/{}{}", host, url.path()),
            None => url.path().to_string(),
        };
        let decoded = Url::parse(&format!("file://{}", encoded))
            .ok()
            .and_then(|u| u.to_file_path().ok())
            .ok_or_else(|| malformed("path is not a valid file path".to_string()))?;

        match &self.root {
            None => Ok(decoded),
            Some(root) => confine(root, &decoded),
        }
    }

    /// Resolve and read a resource.
    pub async fn read(&self, uri: &str) -> Result<Resource, ResourceError> {
        let path = self.resolve(uri)?;
        let bytes = tokio::fs::read(&path).await.map_err(|source| ResourceError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Resource served");
        Ok(Resource {
            mime: mime_for(&path),
            path,
            bytes,
        })
    }
}

/// Join `requested` under `root`, refusing `..` segments.
fn confine(root: &Path, requested: &Path) -> Result<PathBuf, ResourceError> {
    let mut joined = root.to_path_buf();
    for component in requested.components() {
        match component {
            Component::Normal(part) => joined.push(part),
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
            Component::ParentDir => return Err(ResourceError::Forbidden(requested.to_path_buf())),
        }
    }
    Ok(joined)
}

/// MIME type from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" => "video/mp4",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "json" => "application/json",
        "txt" | "log" => "text/plain",
        "html" => "text/html",
        "js" | "mjs" => "text/javascript",
        "css" => "text/css",
        _ => "application/octet-stream",
    }
}
