//! Route collection from the navigation tree.
//!
//! # Traversal
//! Depth-first, pre-order. In a mapping, entries are visited in document
//! order; a `url` entry's value is emitted before the walk descends into
//! that same value, so descriptors nested inside a `url` value are collected
//! after their enclosing descriptor.
//!
//! # Design Decisions
//! - Non-composite nodes stop the walk; malformed input never fails
//! - No de-duplication: a descriptor reachable twice is emitted twice
//! - `collect_bounded` adds a depth limit for trees loaded from disk

use serde::Serialize;
use thiserror::Error;

use crate::nav::node::ConfigNode;

/// Key whose values are collected.
pub const URL_KEY: &str = "url";

/// A value found under a `url` key. Opaque to the collector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RouteDescriptor(pub ConfigNode);

impl RouteDescriptor {
    pub fn node(&self) -> &ConfigNode {
        &self.0
    }
}

impl From<ConfigNode> for RouteDescriptor {
    fn from(node: ConfigNode) -> Self {
        Self(node)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectError {
    #[error("Navigation tree nests deeper than {max_depth} levels")]
    DepthExceeded { max_depth: usize },
}

/// Collect every value stored under a `url` key, in traversal order.
pub fn collect(root: &ConfigNode) -> Vec<RouteDescriptor> {
    let mut routes = Vec::new();
    traverse(root, &mut routes);
    routes
}

fn traverse(current: &ConfigNode, routes: &mut Vec<RouteDescriptor>) {
    match current {
        ConfigNode::Sequence(items) => {
            for item in items {
                traverse(item, routes);
            }
        }
        ConfigNode::Mapping(entries) => {
            for (key, value) in entries {
                if key == URL_KEY {
                    routes.push(RouteDescriptor(value.clone()));
                }
                traverse(value, routes);
            }
        }
        _ => {}
    }
}

/// Same as [`collect`], but refuses trees nested deeper than `max_depth`
/// composite levels. The root composite is level 1.
pub fn collect_bounded(
    root: &ConfigNode,
    max_depth: usize,
) -> Result<Vec<RouteDescriptor>, CollectError> {
    let mut routes = Vec::new();
    traverse_bounded(root, 0, max_depth, &mut routes)?;
    Ok(routes)
}

fn traverse_bounded(
    current: &ConfigNode,
    depth: usize,
    max_depth: usize,
    routes: &mut Vec<RouteDescriptor>,
) -> Result<(), CollectError> {
    if !current.is_composite() {
        return Ok(());
    }
    if depth >= max_depth {
        return Err(CollectError::DepthExceeded { max_depth });
    }

    match current {
        ConfigNode::Sequence(items) => {
            for item in items {
                traverse_bounded(item, depth + 1, max_depth, routes)?;
            }
        }
        ConfigNode::Mapping(entries) => {
            for (key, value) in entries {
                if key == URL_KEY {
                    routes.push(RouteDescriptor(value.clone()));
                }
                traverse_bounded(value, depth + 1, max_depth, routes)?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> ConfigNode {
        ConfigNode::from(value)
    }

    fn collected(value: serde_json::Value) -> Vec<serde_json::Value> {
        collect(&node(value)).iter().map(|d| d.node().to_json()).collect()
    }

    #[test]
    fn test_empty_and_null_roots() {
        assert!(collect(&node(json!({}))).is_empty());
        assert!(collect(&ConfigNode::Null).is_empty());
        assert!(collect(&node(json!([]))).is_empty());
    }

    #[test]
    fn test_non_composite_roots() {
        assert!(collect(&ConfigNode::from("x")).is_empty());
        assert!(collect(&ConfigNode::Integer(42)).is_empty());
        assert!(collect(&ConfigNode::Bool(true)).is_empty());
        assert!(collect(&ConfigNode::Float(1.5)).is_empty());
    }

    #[test]
    fn test_flat_mapping() {
        assert_eq!(collected(json!({"url": "/a"})), vec![json!("/a")]);
    }

    #[test]
    fn test_sequence_order_preserved() {
        assert_eq!(
            collected(json!([{"url": "/a"}, {"url": "/b"}])),
            vec![json!("/a"), json!("/b")]
        );
    }

    #[test]
    fn test_nested_url_emits_outer_then_inner() {
        let result = collected(json!({"url": {"path": "/a", "items": [{"url": "/a/1"}]}}));
        assert_eq!(
            result,
            vec![json!({"path": "/a", "items": [{"url": "/a/1"}]}), json!("/a/1")]
        );
    }

    #[test]
    fn test_key_order_follows_document() {
        let result = collected(json!({
            "items": [{"url": "/child"}],
            "url": "/parent"
        }));
        assert_eq!(result, vec![json!("/child"), json!("/parent")]);
    }

    #[test]
    fn test_no_deduplication() {
        let result = collected(json!([{"url": "/same"}, {"nested": {"url": "/same"}}]));
        assert_eq!(result, vec![json!("/same"), json!("/same")]);
    }

    #[test]
    fn test_menu_shape() {
        let result = collected(json!([{
            "title": "Automation",
            "url": {"path": "/auto", "redirect": "/auto/video"},
            "isActive": true,
            "items": [
                {"title": "Video", "url": {"path": "/auto/video", "component": "Video"}},
                {"title": "Auto2", "url": {"path": "/auto/auto2", "component": "Auto2"}}
            ]
        }]));
        assert_eq!(
            result,
            vec![
                json!({"path": "/auto", "redirect": "/auto/video"}),
                json!({"path": "/auto/video", "component": "Video"}),
                json!({"path": "/auto/auto2", "component": "Auto2"}),
            ]
        );
    }

    #[test]
    fn test_idempotent() {
        let tree = node(json!({"a": [{"url": "/x"}, {"url": {"path": "/y"}}]}));
        assert_eq!(collect(&tree), collect(&tree));
    }

    #[test]
    fn test_bounded_matches_unbounded_within_limit() {
        let tree = node(json!({"url": {"path": "/a", "items": [{"url": "/a/1"}]}}));
        assert_eq!(collect_bounded(&tree, 16).unwrap(), collect(&tree));
        assert!(collect_bounded(&ConfigNode::from("x"), 0).unwrap().is_empty());
    }

    #[test]
    fn test_bounded_rejects_deep_tree() {
        let tree = node(json!({"a": {"b": {"c": {"url": "/deep"}}}}));
        assert_eq!(
            collect_bounded(&tree, 3),
            Err(CollectError::DepthExceeded { max_depth: 3 })
        );
        assert_eq!(collect_bounded(&tree, 4).unwrap().len(), 1);
    }
}
