//! Route records parsed from collected descriptors.

use serde::Serialize;
use thiserror::Error;

use crate::nav::node::ConfigNode;
use crate::routing::collector::RouteDescriptor;

/// Errors raised while building or querying the route table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Descriptor is neither a path string nor an object with a string `path`.
    #[error("Invalid route descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Route path must start with '/': {0}")]
    RelativePath(String),

    #[error("Route {from} redirects to unknown path {to}")]
    UnknownRedirect { from: String, to: String },

    #[error("No route matches {0}")]
    NotFound(String),

    #[error("Redirect loop while resolving {0}")]
    RedirectLoop(String),
}

/// A navigable route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRecord {
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    /// Page identifier rendered for this route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl RouteRecord {
    pub fn page(path: impl Into<String>, component: Option<String>) -> Self {
        Self {
            path: path.into(),
            redirect: None,
            component,
        }
    }

    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            redirect: Some(to.into()),
            component: None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        self.redirect.is_some()
    }
}

impl TryFrom<&RouteDescriptor> for RouteRecord {
    type Error = RouteError;

    fn try_from(descriptor: &RouteDescriptor) -> Result<Self, Self::Error> {
        let node = descriptor.node();
        let invalid = || RouteError::InvalidDescriptor(node.to_json().to_string());

        let record = match node {
            ConfigNode::String(path) => RouteRecord::page(path.clone(), None),
            ConfigNode::Mapping(_) => {
                let path = node.get("path").and_then(ConfigNode::as_str).ok_or_else(invalid)?;
                let optional = |key: &str| -> Result<Option<String>, RouteError> {
                    match node.get(key) {
                        None | Some(ConfigNode::Null) => Ok(None),
                        Some(ConfigNode::String(s)) => Ok(Some(s.clone())),
                        Some(_) => Err(invalid()),
                    }
                };
                RouteRecord {
                    path: path.to_string(),
                    redirect: optional("redirect")?,
                    component: optional("component")?,
                }
            }
            _ => return Err(invalid()),
        };

        if !record.path.starts_with('/') {
            return Err(RouteError::RelativePath(record.path));
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<RouteRecord, RouteError> {
        RouteRecord::try_from(&RouteDescriptor(ConfigNode::from(value)))
    }

    #[test]
    fn test_string_descriptor() {
        assert_eq!(parse(json!("/a")).unwrap(), RouteRecord::page("/a", None));
    }

    #[test]
    fn test_object_descriptor() {
        let record = parse(json!({"path": "/auto/video", "component": "Video"})).unwrap();
        assert_eq!(record.component.as_deref(), Some("Video"));
        assert!(!record.is_redirect());

        let record = parse(json!({"path": "/auto", "redirect": "/auto/video"})).unwrap();
        assert_eq!(record, RouteRecord::redirect("/auto", "/auto/video"));
    }

    #[test]
    fn test_invalid_descriptors() {
        assert!(matches!(parse(json!(42)), Err(RouteError::InvalidDescriptor(_))));
        assert!(matches!(parse(json!({"redirect": "/x"})), Err(RouteError::InvalidDescriptor(_))));
        assert!(matches!(
            parse(json!({"path": "/x", "component": 3})),
            Err(RouteError::InvalidDescriptor(_))
        ));
        assert_eq!(parse(json!("auto")), Err(RouteError::RelativePath("auto".into())));
    }
}
