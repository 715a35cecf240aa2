//! Typed view of the side-navigation menu.
//!
//! The on-disk document uses camelCase keys (`navMain`, `isActive`). Route
//! descriptors under `url` stay untyped: they are either a plain path or an
//! object carrying `path`, `redirect` and `component`.

use serde::{Deserialize, Serialize};

use crate::nav::node::ConfigNode;

/// How the sidebar collapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Collapsible {
    Offcanvas,
    #[default]
    Icon,
    None,
}

/// Root of the navigation document.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct NavData {
    pub collapsible: Collapsible,

    pub user: NavUser,

    pub teams: Vec<Team>,

    /// Main menu groups. Routes are collected from this subtree.
    pub nav_main: Vec<NavItem>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct NavUser {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Team {
    pub name: String,

    /// Icon identifier rendered by the UI.
    #[serde(default)]
    pub logo: Option<String>,

    #[serde(default)]
    pub plan: String,
}

/// A top-level menu group.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub title: String,

    /// Route descriptor: a path string or a `{ path, redirect?, component? }` object.
    pub url: ConfigNode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavSubItem>,
}

/// A leaf entry inside a menu group.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NavSubItem {
    pub title: String,
    pub url: ConfigNode,
}

impl NavData {
    /// The menu shipped with the application.
    pub fn builtin() -> Self {
        let route = |path: &str, key: &str, value: &str| {
            ConfigNode::mapping([("path", ConfigNode::from(path)), (key, ConfigNode::from(value))])
        };

        Self {
            collapsible: Collapsible::Icon,
            user: NavUser {
                name: "navdesk".to_string(),
                email: "navdesk@localhost".to_string(),
                avatar: "/avatars/default.jpg".to_string(),
            },
            teams: vec![Team {
                name: "Media Automation".to_string(),
                logo: Some("GalleryVerticalEnd".to_string()),
                plan: "Local".to_string(),
            }],
            nav_main: vec![NavItem {
                title: "Automation".to_string(),
                url: route("/auto", "redirect", "/auto/video"),
                icon: Some("SquareTerminal".to_string()),
                is_active: Some(true),
                items: vec![
                    NavSubItem {
                        title: "Video search".to_string(),
                        url: route("/auto/video", "component", "Video"),
                    },
                    NavSubItem {
                        title: "Automation 2".to_string(),
                        url: route("/auto/auto2", "component", "Auto2"),
                    },
                ],
            }],
        }
    }

    /// Untyped tree of this document, as the route collector sees it.
    pub fn to_node(&self) -> ConfigNode {
        serde_json::to_value(self)
            .map(ConfigNode::from)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tree_uses_camel_case_keys() {
        let node = NavData::builtin().to_node();
        let nav_main = node.get("navMain").expect("navMain present");
        match nav_main {
            ConfigNode::Sequence(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].get("isActive"), Some(&ConfigNode::Bool(true)));
            }
            other => panic!("expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_string_and_object_urls() {
        let doc = r#"{
            "collapsible": "offcanvas",
            "navMain": [
                {"title": "Home", "url": "/home"},
                {"title": "Tools", "url": {"path": "/tools"}, "items": [
                    {"title": "One", "url": "/tools/one"}
                ]}
            ]
        }"#;
        let nav: NavData = serde_json::from_str(doc).unwrap();
        assert_eq!(nav.collapsible, Collapsible::Offcanvas);
        assert_eq!(nav.nav_main[0].url, ConfigNode::from("/home"));
        assert_eq!(nav.nav_main[1].url.get("path"), Some(&ConfigNode::from("/tools")));
        assert_eq!(nav.nav_main[1].items.len(), 1);
    }
}
