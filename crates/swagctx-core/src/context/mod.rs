//! The template context: a tree of scalars, sequences and mappings.
//!
//! Resolvers build [`ContextNode`]s, where a missing value is the explicit
//! [`ContextNode::Absent`] case. [`ContextNode::prune`] lowers that tree into
//! a [`Context`], which has no way to represent absence at all.

use indexmap::IndexMap;
use serde::Serialize;

pub type ContextMap = IndexMap<String, ContextNode>;

static ABSENT: ContextNode = ContextNode::Absent;

/// A context tree under construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextNode {
    Absent,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<ContextNode>),
    Mapping(ContextMap),
}

/// A pruned context tree, ready to hand to a template engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Context {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Context>),
    Mapping(IndexMap<String, Context>),
}

impl ContextNode {
    /// Drop every absent mapping entry and sequence element, recursively.
    ///
    /// Returns `None` only when `self` is itself absent.
    pub fn prune(self) -> Option<Context> {
        match self {
            ContextNode::Absent => None,
            ContextNode::Bool(b) => Some(Context::Bool(b)),
            ContextNode::Integer(i) => Some(Context::Integer(i)),
            ContextNode::Float(f) => Some(Context::Float(f)),
            ContextNode::String(s) => Some(Context::String(s)),
            ContextNode::Sequence(items) => Some(Context::Sequence(
                items.into_iter().filter_map(ContextNode::prune).collect(),
            )),
            ContextNode::Mapping(map) => Some(Context::Mapping(
                map.into_iter()
                    .filter_map(|(key, value)| value.prune().map(|v| (key, v)))
                    .collect(),
            )),
        }
    }

    /// Convert any serializable model node, mapping JSON `null` to absent.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(|json| ContextNode::from(&json))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ContextNode::Absent)
    }

    /// Mapping entry lookup; absent for non-mappings and missing keys.
    pub fn get(&self, key: &str) -> &ContextNode {
        match self {
            ContextNode::Mapping(map) => map.get(key).unwrap_or(&ABSENT),
            _ => &ABSENT,
        }
    }
}

impl Context {
    pub fn get(&self, key: &str) -> Option<&Context> {
        match self {
            Context::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    pub fn at(&self, index: usize) -> Option<&Context> {
        match self {
            Context::Sequence(items) => items.get(index),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Context::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Context::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Context::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Context]> {
        match self {
            Context::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Context>> {
        match self {
            Context::Mapping(map) => Some(map),
            _ => None,
        }
    }
}

/// Insertion helper so resolvers can write `ctx.set("key", value)`.
pub trait ContextMapExt {
    fn set(&mut self, key: &str, value: impl Into<ContextNode>);
}

impl ContextMapExt for ContextMap {
    fn set(&mut self, key: &str, value: impl Into<ContextNode>) {
        self.insert(key.to_string(), value.into());
    }
}

impl From<bool> for ContextNode {
    fn from(value: bool) -> Self {
        ContextNode::Bool(value)
    }
}

impl From<i64> for ContextNode {
    fn from(value: i64) -> Self {
        ContextNode::Integer(value)
    }
}

impl From<u16> for ContextNode {
    fn from(value: u16) -> Self {
        ContextNode::Integer(i64::from(value))
    }
}

impl From<String> for ContextNode {
    fn from(value: String) -> Self {
        ContextNode::String(value)
    }
}

impl From<&str> for ContextNode {
    fn from(value: &str) -> Self {
        ContextNode::String(value.to_string())
    }
}

impl From<&String> for ContextNode {
    fn from(value: &String) -> Self {
        ContextNode::String(value.clone())
    }
}

impl From<ContextMap> for ContextNode {
    fn from(value: ContextMap) -> Self {
        ContextNode::Mapping(value)
    }
}

impl<T: Into<ContextNode>> From<Option<T>> for ContextNode {
    fn from(value: Option<T>) -> Self {
        value.map_or(ContextNode::Absent, Into::into)
    }
}

impl<T: Into<ContextNode>> From<Vec<T>> for ContextNode {
    fn from(value: Vec<T>) -> Self {
        ContextNode::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl From<&serde_json::Value> for ContextNode {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ContextNode::Absent,
            serde_json::Value::Bool(b) => ContextNode::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ContextNode::Integer(i),
                None => n.as_f64().map_or(ContextNode::Absent, ContextNode::Float),
            },
            serde_json::Value::String(s) => ContextNode::String(s.clone()),
            serde_json::Value::Array(items) => {
                ContextNode::Sequence(items.iter().map(ContextNode::from).collect())
            }
            serde_json::Value::Object(map) => ContextNode::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), ContextNode::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Context> for ContextNode {
    fn from(value: Context) -> Self {
        match value {
            Context::Bool(b) => ContextNode::Bool(b),
            Context::Integer(i) => ContextNode::Integer(i),
            Context::Float(f) => ContextNode::Float(f),
            Context::String(s) => ContextNode::String(s),
            Context::Sequence(items) => {
                ContextNode::Sequence(items.into_iter().map(ContextNode::from).collect())
            }
            Context::Mapping(map) => ContextNode::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, ContextNode::from(v)))
                    .collect(),
            ),
        }
    }
}
