//! Untyped configuration tree.
//!
//! `ConfigNode` is the shape the route collector walks. Mappings keep their
//! entries as an ordered list, so traversal order is the order in which keys
//! appear in the source document.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A node of the navigation configuration tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfigNode {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    /// Unsigned integers above `i64::MAX`.
    UInteger(u64),
    Float(f64),
    String(String),
    Sequence(Vec<ConfigNode>),
    /// Key/value entries in insertion order.
    Mapping(Vec<(String, ConfigNode)>),
}

impl ConfigNode {
    /// Build a mapping node from `(key, value)` pairs.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ConfigNode)>,
    {
        ConfigNode::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns true for mappings and sequences.
    pub fn is_composite(&self) -> bool {
        matches!(self, ConfigNode::Mapping(_) | ConfigNode::Sequence(_))
    }

    /// Looks up the first entry named `key` in a mapping.
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        match self {
            ConfigNode::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigNode::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigNode::Null)
    }

    /// Converts the node into a `serde_json::Value`, keeping key order.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            ConfigNode::Null => Value::Null,
            ConfigNode::Bool(b) => Value::Bool(*b),
            ConfigNode::Integer(i) => Value::from(*i),
            ConfigNode::UInteger(u) => Value::from(*u),
            ConfigNode::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ConfigNode::String(s) => Value::String(s.clone()),
            ConfigNode::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            ConfigNode::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ConfigNode {
    fn from(s: &str) -> Self {
        ConfigNode::String(s.to_string())
    }
}

impl From<String> for ConfigNode {
    fn from(s: String) -> Self {
        ConfigNode::String(s)
    }
}

impl From<serde_json::Value> for ConfigNode {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => ConfigNode::Null,
            Value::Bool(b) => ConfigNode::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ConfigNode::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    ConfigNode::UInteger(u)
                } else {
                    ConfigNode::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => ConfigNode::String(s),
            Value::Array(items) => ConfigNode::Sequence(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                ConfigNode::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<toml::Value> for ConfigNode {
    fn from(value: toml::Value) -> Self {
        use toml::Value;
        match value {
            Value::Boolean(b) => ConfigNode::Bool(b),
            Value::Integer(i) => ConfigNode::Integer(i),
            Value::Float(f) => ConfigNode::Float(f),
            Value::String(s) => ConfigNode::String(s),
            Value::Datetime(dt) => ConfigNode::String(dt.to_string()),
            Value::Array(items) => ConfigNode::Sequence(items.into_iter().map(Into::into).collect()),
            Value::Table(table) => {
                ConfigNode::Mapping(table.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl Serialize for ConfigNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigNode::Null => serializer.serialize_unit(),
            ConfigNode::Bool(b) => serializer.serialize_bool(*b),
            ConfigNode::Integer(i) => serializer.serialize_i64(*i),
            ConfigNode::UInteger(u) => serializer.serialize_u64(*u),
            ConfigNode::Float(f) => serializer.serialize_f64(*f),
            ConfigNode::String(s) => serializer.serialize_str(s),
            ConfigNode::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ConfigNode::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ConfigNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(ConfigNode::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_conversion_keeps_key_order() {
        let node = ConfigNode::from(json!({"zeta": 1, "alpha": 2, "mid": 3}));
        match &node {
            ConfigNode::Mapping(entries) => {
                let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
            }
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_toml_conversion_keeps_key_order() {
        let value: toml::Value = toml::from_str("b = 1\na = \"x\"\n[c]\nd = true\n").unwrap();
        let node = ConfigNode::from(value);
        assert_eq!(
            node,
            ConfigNode::mapping([
                ("b", ConfigNode::Integer(1)),
                ("a", ConfigNode::from("x")),
                ("c", ConfigNode::mapping([("d", ConfigNode::Bool(true))])),
            ])
        );
    }

    #[test]
    fn test_get_and_round_trip_to_json() {
        let source = json!({"path": "/a", "items": [1, 2.5, null]});
        let node = ConfigNode::from(source.clone());
        assert_eq!(node.get("path").and_then(ConfigNode::as_str), Some("/a"));
        assert!(node.get("missing").is_none());
        assert_eq!(node.to_json(), source);
        assert_eq!(serde_json::to_value(&node).unwrap(), source);
    }

    #[test]
    fn test_large_unsigned_integers_stay_exact() {
        let source = json!({"id": u64::MAX, "small": 7, "neg": -3});
        let node = ConfigNode::from(source.clone());
        assert_eq!(node.get("id"), Some(&ConfigNode::UInteger(u64::MAX)));
        assert_eq!(node.get("small"), Some(&ConfigNode::Integer(7)));
        assert_eq!(node.to_json(), source);
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"id":18446744073709551615,"small":7,"neg":-3}"#
        );
    }

    #[test]
    fn test_scalars_are_not_composite() {
        assert!(!ConfigNode::Null.is_composite());
        assert!(!ConfigNode::from("x").is_composite());
        assert!(!ConfigNode::Integer(42).is_composite());
        assert!(ConfigNode::Sequence(vec![]).is_composite());
        assert!(ConfigNode::Mapping(vec![]).is_composite());
    }
}
